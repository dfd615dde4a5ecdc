//! Cache en memoria para respuestas del API
//!
//! Mapa clave → (valor JSON, expiración absoluta) con invalidación manual
//! por clave exacta o por prefijo. La expiración se verifica de forma
//! perezosa en `get`; una tarea periódica llama a `cleanup` para barrer
//! las entradas vencidas. El cache es best-effort: nunca produce errores
//! propios, un fallo de lectura simplemente cae a la base de datos.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::CacheConfig;

struct CacheEntry {
    data: Value,
    expires_at: Instant,
}

/// Estadísticas del cache
#[derive(Debug, Default, Clone)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Cache de respuestas del API con TTL
///
/// Sin límite de tamaño: el número de combinaciones de filtros cacheadas
/// es pequeño a esta escala.
pub struct ApiCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    config: CacheConfig,
    stats: RwLock<CacheStats>,
}

impl ApiCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            config,
            stats: RwLock::new(CacheStats::default()),
        }
    }

    /// Guardar un valor con expiración absoluta
    pub async fn set(&self, key: &str, data: Value, ttl: Option<Duration>) {
        let ttl = ttl.unwrap_or(self.config.default_ttl);
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                data,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Obtener un valor; `None` si no existe o expiró
    pub async fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.write().await;
        let mut stats = self.stats.write().await;

        let expired = match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                stats.hits += 1;
                debug!("cache hit para la clave '{}'", key);
                return Some(entry.data.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            entries.remove(key);
        }
        stats.misses += 1;
        None
    }

    /// Eliminar una entrada por clave exacta
    pub async fn delete(&self, key: &str) {
        let mut entries = self.entries.write().await;
        entries.remove(key);
    }

    /// Eliminar todas las entradas cuya clave empiece por `prefix`
    pub async fn invalidate_prefix(&self, prefix: &str) {
        let mut entries = self.entries.write().await;
        entries.retain(|key, _| !key.starts_with(prefix));
    }

    /// Barrer las entradas expiradas; devuelve cuántas se eliminaron
    pub async fn cleanup(&self) -> usize {
        let mut entries = self.entries.write().await;
        let initial = entries.len();
        let now = Instant::now();
        entries.retain(|_, entry| entry.expires_at > now);
        let cleaned = initial - entries.len();
        if cleaned > 0 {
            info!("cache cleanup: {} entradas expiradas eliminadas", cleaned);
        }
        cleaned
    }

    /// Vaciar el cache por completo
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();
    }

    /// Número de entradas actualmente almacenadas
    pub async fn size(&self) -> usize {
        self.entries.read().await.len()
    }

    pub fn cleanup_interval(&self) -> Duration {
        self.config.cleanup_interval
    }

    pub async fn stats(&self) -> CacheStats {
        self.stats.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_cache() -> ApiCache {
        ApiCache::new(CacheConfig::default())
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = test_cache();
        cache.set("buses:all", json!([{"busNumber": "BUS-001"}]), None).await;

        let value = cache.get("buses:all").await;
        assert_eq!(value, Some(json!([{"busNumber": "BUS-001"}])));

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 0);
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let cache = test_cache();
        assert_eq!(cache.get("nope").await, None);
        assert_eq!(cache.stats().await.misses, 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_evicted() {
        let cache = test_cache();
        cache
            .set("trips:today", json!([]), Some(Duration::from_millis(30)))
            .await;

        tokio::time::sleep(Duration::from_millis(60)).await;

        assert_eq!(cache.get("trips:today").await, None);
        // La lectura expirada elimina la entrada
        assert_eq!(cache.size().await, 0);
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = test_cache();
        cache.set("routes:all", json!([]), None).await;
        cache.delete("routes:all").await;
        assert_eq!(cache.get("routes:all").await, None);
    }

    #[tokio::test]
    async fn test_invalidate_prefix_only_removes_matching_keys() {
        let cache = test_cache();
        cache.set("trips:2024-01-01::::::", json!([1]), None).await;
        cache.set("trips:::::GO:", json!([2]), None).await;
        cache.set("buses:all", json!([3]), None).await;

        cache.invalidate_prefix("trips:").await;

        assert_eq!(cache.get("trips:2024-01-01::::::").await, None);
        assert_eq!(cache.get("trips:::::GO:").await, None);
        assert_eq!(cache.get("buses:all").await, Some(json!([3])));
    }

    #[tokio::test]
    async fn test_cleanup_removes_only_expired() {
        let cache = test_cache();
        cache
            .set("old", json!(1), Some(Duration::from_millis(20)))
            .await;
        cache
            .set("fresh", json!(2), Some(Duration::from_secs(60)))
            .await;

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(cache.cleanup().await, 1);
        assert_eq!(cache.size().await, 1);
        assert_eq!(cache.get("fresh").await, Some(json!(2)));
    }

    #[tokio::test]
    async fn test_overwrite_wins_last_write() {
        let cache = test_cache();
        cache.set("key", json!("a"), None).await;
        cache.set("key", json!("b"), None).await;
        assert_eq!(cache.get("key").await, Some(json!("b")));
    }
}
