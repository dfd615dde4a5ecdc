//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El cache y el rate limiter son servicios
//! explícitos con configuración inyectada, sin estado ambiental, de modo
//! que los tests pueden construir y descartar instancias limpias.

use std::sync::Arc;

use sqlx::PgPool;

use crate::cache::{ApiCache, CacheConfig};
use crate::config::EnvironmentConfig;
use crate::middleware::rate_limit::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub cache: Arc<ApiCache>,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let cache = Arc::new(ApiCache::new(CacheConfig::default()));
        let rate_limiter = RateLimiter::new(&config);
        Self {
            pool,
            config,
            cache,
            rate_limiter,
        }
    }
}
