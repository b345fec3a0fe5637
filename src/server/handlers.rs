use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Path, Query, Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::catalog::{Catalog, CatalogKind};
use crate::cluster::{ClusteredMarker, Marker, MarkerClusterer};
use crate::error::{check_radius, AtlasError};
use crate::location::{hub_list as builtin_hubs, HubInfo, ParsedLocation};
use crate::map::{build_network_map, NetworkMap, ProfileLocation};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

#[derive(Debug)]
pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

impl From<AtlasError> for ApiError {
    fn from(e: AtlasError) -> Self {
        let status = match &e {
            AtlasError::InvalidRadius(_) | AtlasError::Json(_) => StatusCode::BAD_REQUEST,
            AtlasError::UnknownCatalog(_) => StatusCode::NOT_FOUND,
            AtlasError::Io(_) | AtlasError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!(status = status.as_u16(), "{}", e);
        ApiError(status, e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = rejection.status();
        let msg = rejection.body_text();
        warn!(status = status.as_u16(), "{}", msg);
        ApiError(status, msg)
    }
}

/// `Json` body extractor that rejects with the `{error, code}` body.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

fn clusterer_for(state: &AppState, radius: Option<f64>) -> Result<MarkerClusterer, ApiError> {
    let radius = check_radius(radius.unwrap_or(state.config.cluster.radius))?;
    Ok(MarkerClusterer::new(radius))
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

// ─── GET /api/parse ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ParseQuery {
    pub location: Option<String>,
}

pub async fn parse_one(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ParseQuery>,
) -> Json<ParsedLocation> {
    let start = Instant::now();
    let raw = params.location.unwrap_or_default();
    let parsed = state.resolver().resolve(&raw);

    info!(
        location = %raw,
        source = %parsed.source,
        elapsed_ms = elapsed_ms(start),
        "GET /api/parse"
    );
    Json(parsed)
}

// ─── POST /api/parse ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ParseBatchRequest {
    #[serde(default)]
    pub locations: Vec<String>,
}

pub async fn parse_batch(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<ParseBatchRequest>,
) -> Json<Vec<ParsedLocation>> {
    let start = Instant::now();
    let parsed = state
        .resolver()
        .resolve_all(body.locations.iter().map(String::as_str));

    info!(count = parsed.len(), elapsed_ms = elapsed_ms(start), "POST /api/parse");
    Json(parsed)
}

// ─── POST /api/cluster ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct ClusterRequest {
    #[serde(default)]
    pub markers: Vec<Marker>,
    pub radius: Option<f64>,
}

pub async fn cluster(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<ClusterRequest>,
) -> Result<Json<Vec<ClusteredMarker<Marker>>>, ApiError> {
    let start = Instant::now();
    let clusterer = clusterer_for(&state, body.radius)?;
    let count = body.markers.len();
    let clusters = clusterer.cluster(body.markers);

    info!(
        markers = count,
        clusters = clusters.len(),
        radius = clusterer.radius(),
        elapsed_ms = elapsed_ms(start),
        "POST /api/cluster"
    );
    Ok(Json(clusters))
}

// ─── POST /api/map ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct MapRequest {
    #[serde(default)]
    pub profiles: Vec<ProfileLocation>,
    pub radius: Option<f64>,
}

pub async fn network_map(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<MapRequest>,
) -> Result<Json<NetworkMap>, ApiError> {
    let start = Instant::now();
    let clusterer = clusterer_for(&state, body.radius)?;
    let map = {
        let mut resolver = state.resolver();
        build_network_map(body.profiles, &mut resolver, &clusterer)
    };

    info!(
        pins = map.total_pins,
        exact = map.exact_pins,
        clusters = map.clusters.len(),
        elapsed_ms = elapsed_ms(start),
        "POST /api/map"
    );
    Ok(Json(map))
}

// ─── GET /api/hubs ───────────────────────────────────────────────

pub async fn hub_list() -> Json<Vec<HubInfo>> {
    Json(builtin_hubs())
}

// ─── GET /api/catalog/{kind} ─────────────────────────────────────

#[derive(Deserialize)]
pub struct CatalogQuery {
    /// Comma-separated entries added for this request only.
    pub custom: Option<String>,
}

pub async fn catalog(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    Query(params): Query<CatalogQuery>,
) -> Result<Json<Catalog>, ApiError> {
    let kind: CatalogKind = kind.parse()?;
    let mut catalog = state.config.catalog(kind);
    if let Some(custom) = params.custom.as_deref() {
        for name in custom.split(',') {
            catalog.extend(name);
        }
    }
    Ok(Json(catalog))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::location::LocationSource;
    use axum::body::{to_bytes, Body};
    use axum::http::header;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(body: &'static str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .uri("/api/cluster")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    fn test_state() -> Arc<AppState> {
        let mut config = Config::default();
        config.resolver.seed = Some(17);
        config.catalog.extra_blockchains.push("Starknet".into());
        Arc::new(AppState::new(config))
    }

    #[tokio::test]
    async fn test_parse_one_hub() {
        let Json(loc) = parse_one(
            State(test_state()),
            Query(ParseQuery { location: Some("Singapore".into()) }),
        )
        .await;
        assert_eq!(loc.city.as_deref(), Some("Singapore"));
        assert_eq!(loc.source, LocationSource::TechHub);
        assert_eq!(loc.lat, 1.3521);
    }

    #[tokio::test]
    async fn test_parse_one_missing_param() {
        let Json(loc) = parse_one(State(test_state()), Query(ParseQuery { location: None })).await;
        assert!(loc.city.is_none());
        assert_eq!(loc.source, LocationSource::Approximate);
    }

    #[tokio::test]
    async fn test_parse_batch() {
        let body = ParseBatchRequest {
            locations: vec!["Dubai".into(), "".into(), "Atlantis, Ocean".into()],
        };
        let Json(out) = parse_batch(State(test_state()), ApiJson(body)).await;
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].lat, 25.2048);
        assert_eq!(out[2].country.as_deref(), Some("Ocean"));
    }

    #[tokio::test]
    async fn test_seeded_state_is_reproducible() {
        let q = || Query(ParseQuery { location: Some("Atlantis".into()) });
        let Json(a) = parse_one(State(test_state()), q()).await;
        let Json(b) = parse_one(State(test_state()), q()).await;
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_cluster_default_radius() {
        let body = ClusterRequest {
            markers: vec![Marker::at(0.0, 0.0), Marker::at(0.0001, 0.0001), Marker::at(50.0, 50.0)],
            radius: None,
        };
        let Json(clusters) = cluster(State(test_state()), ApiJson(body)).await.unwrap();
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].points.len(), 2);
    }

    #[tokio::test]
    async fn test_cluster_rejects_bad_radius() {
        let body = ClusterRequest { markers: vec![], radius: Some(-3.0) };
        let err = cluster(State(test_state()), ApiJson(body)).await.unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_network_map() {
        let body = MapRequest {
            profiles: vec![
                ProfileLocation::new("London, UK"),
                ProfileLocation::new("london"),
                ProfileLocation::new("Sydney"),
            ],
            radius: Some(40.0),
        };
        let Json(map) = network_map(State(test_state()), ApiJson(body)).await.unwrap();
        assert_eq!(map.total_pins, 3);
        assert_eq!(map.exact_pins, 3);
        assert_eq!(map.clusters.len(), 2);
    }

    #[tokio::test]
    async fn test_hub_list() {
        let Json(hubs) = hub_list().await;
        assert!(hubs.iter().any(|h| h.name == "San Francisco"));
    }

    #[tokio::test]
    async fn test_catalog_request_scoped() {
        let state = test_state();
        let Json(with_custom) = catalog(
            State(state.clone()),
            Path("blockchains".into()),
            Query(CatalogQuery { custom: Some("Sui, Aptos,".into()) }),
        )
        .await
        .unwrap();
        assert!(with_custom.contains("sui"));
        assert!(with_custom.contains("aptos"));
        assert!(with_custom.contains("starknet"));

        let Json(plain) = catalog(State(state), Path("blockchains".into()), Query(CatalogQuery { custom: None }))
            .await
            .unwrap();
        assert!(!plain.contains("sui"));
        assert!(plain.contains("starknet"));
    }

    #[tokio::test]
    async fn test_catalog_unknown_kind() {
        let err = catalog(State(test_state()), Path("wallets".into()), Query(CatalogQuery { custom: None }))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let err = match ApiJson::<ClusterRequest>::from_request(json_request("{not json"), &()).await {
            Ok(_) => panic!("malformed body accepted"),
            Err(e) => e,
        };
        assert_eq!(err.0, StatusCode::BAD_REQUEST);

        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let body = body_json(resp).await;
        assert_eq!(body["code"], 400);
        assert!(body["error"].as_str().unwrap().contains("JSON"));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_json_error() {
        let req = axum::http::Request::builder()
            .method("POST")
            .uri("/api/cluster")
            .body(Body::from(r#"{"markers": []}"#))
            .unwrap();
        let err = match ApiJson::<ClusterRequest>::from_request(req, &()).await {
            Ok(_) => panic!("body without content type accepted"),
            Err(e) => e,
        };
        assert_eq!(err.0, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let body = body_json(err.into_response()).await;
        assert_eq!(body["code"], 415);
    }

    #[tokio::test]
    async fn test_well_formed_body_extracts() {
        let ApiJson(body) = match ApiJson::<ClusterRequest>::from_request(
            json_request(r#"{"markers": [{"location": {"lat": 1, "lng": 2}}], "radius": 10}"#),
            &(),
        )
        .await
        {
            Ok(v) => v,
            Err(e) => panic!("rejected: {:?}", e),
        };
        assert_eq!(body.markers.len(), 1);
        assert_eq!(body.radius, Some(10.0));
    }

    #[tokio::test]
    async fn test_api_error_body_shape() {
        let err = ApiError::from(AtlasError::InvalidRadius(-1.0));
        let body = body_json(err.into_response()).await;
        assert_eq!(body["code"], 400);
        assert!(body["error"].as_str().unwrap().contains("-1"));
    }
}
