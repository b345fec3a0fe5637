use crate::config::Config;
use crate::location::LocationResolver;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub struct AppState {
    pub config: Config,
    pub resolver: Mutex<LocationResolver>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let resolver = LocationResolver::from_seed(config.resolver.seed);
        Self {
            config,
            resolver: Mutex::new(resolver),
        }
    }

    /// The resolver only holds an RNG, so a poisoned lock is still usable.
    pub fn resolver(&self) -> MutexGuard<'_, LocationResolver> {
        self.resolver.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
