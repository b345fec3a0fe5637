//! Populated-region bounding boxes used for approximate placement.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::GeoPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    NorthAmerica,
    Europe,
    Asia,
    Australia,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NorthAmerica => write!(f, "North America"),
            Self::Europe => write!(f, "Europe"),
            Self::Asia => write!(f, "Asia"),
            Self::Australia => write!(f, "Australia"),
        }
    }
}

/// A lat/lng rectangle in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub region: Region,
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat)
            && (self.min_lng..=self.max_lng).contains(&point.lng)
    }

    /// Uniform point inside the box.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> GeoPoint {
        GeoPoint::new(
            rng.gen_range(self.min_lat..self.max_lat),
            rng.gen_range(self.min_lng..self.max_lng),
        )
    }
}

pub const REGIONS: [BoundingBox; 4] = [
    BoundingBox {
        region: Region::NorthAmerica,
        min_lat: 25.0, max_lat: 50.0,
        min_lng: -125.0, max_lng: -70.0,
    },
    BoundingBox {
        region: Region::Europe,
        min_lat: 36.0, max_lat: 60.0,
        min_lng: -10.0, max_lng: 30.0,
    },
    BoundingBox {
        region: Region::Asia,
        min_lat: 10.0, max_lat: 45.0,
        min_lng: 70.0, max_lng: 140.0,
    },
    BoundingBox {
        region: Region::Australia,
        min_lat: -38.0, max_lat: -12.0,
        min_lng: 115.0, max_lng: 153.0,
    },
];

/// Pick one of the four regions with equal probability, then a uniform point inside it.
pub fn random_point<R: Rng + ?Sized>(rng: &mut R) -> (Region, GeoPoint) {
    let bbox = &REGIONS[rng.gen_range(0..REGIONS.len())];
    (bbox.region, bbox.sample(rng))
}

/// The region box containing `point`, if any.
pub fn region_of(point: GeoPoint) -> Option<Region> {
    REGIONS.iter().find(|b| b.contains(point)).map(|b| b.region)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_random_point_inside_chosen_region() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let (region, point) = random_point(&mut rng);
            let bbox = REGIONS.iter().find(|b| b.region == region).unwrap();
            assert!(bbox.contains(point), "{:?} outside {}", point, region);
        }
    }

    #[test]
    fn test_random_point_covers_all_regions() {
        let mut rng = StdRng::seed_from_u64(42);
        let seen: HashSet<Region> = (0..200).map(|_| random_point(&mut rng).0).collect();
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_region_of() {
        assert_eq!(region_of(GeoPoint::new(48.85, 2.35)), Some(Region::Europe));
        assert_eq!(region_of(GeoPoint::new(-33.87, 151.2)), Some(Region::Australia));
        assert_eq!(region_of(GeoPoint::new(0.0, 0.0)), None);
        assert_eq!(region_of(GeoPoint::unknown()), None);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = random_point(&mut StdRng::seed_from_u64(99));
        let b = random_point(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
