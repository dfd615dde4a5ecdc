//! Middleware de Rate Limiting
//!
//! Contador en memoria por dirección de cliente sobre una ventana
//! rodante. Es best-effort: el estado vive en el proceso y se pierde en
//! cada reinicio; no sirve como límite distribuido.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::EnvironmentConfig;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Clone)]
struct RateLimitInfo {
    count: u32,
    reset_at: Instant,
}

/// Estado del rate limiting con configuración inyectada
#[derive(Clone)]
pub struct RateLimiter {
    requests: Arc<RwLock<HashMap<String, RateLimitInfo>>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests: config.rate_limit_requests,
            window: Duration::from_secs(config.rate_limit_window),
        }
    }

    /// Verificar y contabilizar una petición del cliente
    pub async fn check(&self, client: &str) -> Result<(), AppError> {
        let mut requests = self.requests.write().await;
        let now = Instant::now();

        match requests.get_mut(client) {
            Some(info) if now < info.reset_at => {
                if info.count >= self.max_requests {
                    debug!("rate limit excedido para '{}'", client);
                    return Err(AppError::RateLimitExceeded);
                }
                info.count += 1;
            }
            _ => {
                // Ventana nueva o expirada
                requests.insert(
                    client.to_string(),
                    RateLimitInfo {
                        count: 1,
                        reset_at: now + self.window,
                    },
                );
            }
        }
        Ok(())
    }

    /// Barrido periódico de ventanas vencidas
    pub async fn sweep(&self) {
        let mut requests = self.requests.write().await;
        let now = Instant::now();
        requests.retain(|_, info| now < info.reset_at);
    }

    pub async fn tracked_clients(&self) -> usize {
        self.requests.read().await.len()
    }
}

/// Middleware de rate limiting por dirección del cliente
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let client = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|header| header.to_str().ok())
        .unwrap_or("unknown")
        .split(',')
        .next()
        .unwrap_or("unknown")
        .trim()
        .to_string();

    state.rate_limiter.check(&client).await?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_requests: u32, window_secs: u64) -> RateLimiter {
        RateLimiter::new(&EnvironmentConfig {
            environment: "test".to_string(),
            port: 0,
            host: "127.0.0.1".to_string(),
            cors_origins: vec![],
            rate_limit_requests: max_requests,
            rate_limit_window: window_secs,
        })
    }

    #[tokio::test]
    async fn test_allows_up_to_limit() {
        let limiter = limiter(3, 60);
        for _ in 0..3 {
            assert!(limiter.check("1.2.3.4").await.is_ok());
        }
        assert!(matches!(
            limiter.check("1.2.3.4").await,
            Err(AppError::RateLimitExceeded)
        ));
    }

    #[tokio::test]
    async fn test_limits_are_per_client() {
        let limiter = limiter(1, 60);
        assert!(limiter.check("1.1.1.1").await.is_ok());
        assert!(limiter.check("2.2.2.2").await.is_ok());
        assert!(limiter.check("1.1.1.1").await.is_err());
    }

    #[tokio::test]
    async fn test_window_resets() {
        let limiter = RateLimiter {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests: 1,
            window: Duration::from_millis(40),
        };

        assert!(limiter.check("1.2.3.4").await.is_ok());
        assert!(limiter.check("1.2.3.4").await.is_err());

        tokio::time::sleep(Duration::from_millis(70)).await;
        assert!(limiter.check("1.2.3.4").await.is_ok());
    }

    #[tokio::test]
    async fn test_sweep_drops_expired_windows() {
        let limiter = RateLimiter {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests: 5,
            window: Duration::from_millis(20),
        };

        limiter.check("1.2.3.4").await.unwrap();
        limiter.check("5.6.7.8").await.unwrap();
        assert_eq!(limiter.tracked_clients().await, 2);

        tokio::time::sleep(Duration::from_millis(50)).await;
        limiter.sweep().await;
        assert_eq!(limiter.tracked_clients().await, 0);
    }
}
