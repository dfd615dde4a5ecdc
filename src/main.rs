use std::net::SocketAddr;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use university_transport::config::EnvironmentConfig;
use university_transport::database;
use university_transport::routes::create_app;
use university_transport::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚌 Sistema de Administración de Transporte Universitario");
    info!("========================================================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let state = AppState::new(pool, config.clone());

    // Barrido periódico del cache
    let cache = state.cache.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(cache.cleanup_interval());
        loop {
            interval.tick().await;
            cache.cleanup().await;
        }
    });

    // Barrido periódico del rate limiter (cada 10 minutos)
    let rate_limiter = state.rate_limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(600));
        loop {
            interval.tick().await;
            rate_limiter.sweep().await;
        }
    });

    let app = create_app(state);

    let addr: SocketAddr = config.server_addr().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET/POST        /api/universities    (+ /:id GET/PUT/DELETE)");
    info!("   GET/POST        /api/drivers         (+ /:id GET/PUT/DELETE)");
    info!("   GET/POST        /api/buses           (+ /:id GET/PUT/DELETE)");
    info!("   GET/POST        /api/districts       (+ /:id GET/PUT/DELETE)");
    info!("   GET/POST        /api/representatives (+ /:id GET/PUT/DELETE)");
    info!("   GET/POST        /api/routes          (+ /:id GET/PUT/DELETE)");
    info!("   GET/POST        /api/trips           (+ /:id GET/PUT/DELETE)");
    info!("   GET             /api/statistics      - Estadísticas del día");
    info!("   POST            /api/import/excel    - Importación masiva");
    info!("   GET             /api/health          - Salud de la base de datos");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
