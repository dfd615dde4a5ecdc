//! Configuración del cache

use std::time::Duration;

/// TTL para listados de referencia que cambian poco (5 minutos)
pub const LIST_CACHE_TTL: Duration = Duration::from_secs(300);

/// TTL para consultas de viajes diarios, de alta rotación (30 segundos)
pub const TRIPS_CACHE_TTL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL aplicado cuando `set` no recibe uno explícito
    pub default_ttl: Duration,
    /// Intervalo del barrido periódico de entradas expiradas
    pub cleanup_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: TRIPS_CACHE_TTL,
            cleanup_interval: Duration::from_secs(60),
        }
    }
}
