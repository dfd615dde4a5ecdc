//! Routers del API
//!
//! Un router por recurso bajo el prefijo `/api`, más salud, estadísticas
//! e importación. Los handlers son finos: delegan en los controladores.

pub mod bus_routes;
pub mod district_routes;
pub mod driver_routes;
pub mod health_routes;
pub mod import_routes;
pub mod representative_routes;
pub mod route_routes;
pub mod statistics_routes;
pub mod trip_routes;
pub mod university_routes;

use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::Value;
use tower_http::trace::TraceLayer;

use crate::cache::CacheStatus;
use crate::middleware;
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = if state.config.cors_origins.is_empty() {
        middleware::cors::cors_middleware()
    } else {
        middleware::cors::cors_middleware_with_origins(&state.config.cors_origins)
    };

    Router::new()
        .nest(
            "/api/universities",
            university_routes::create_university_router(),
        )
        .nest("/api/drivers", driver_routes::create_driver_router())
        .nest("/api/buses", bus_routes::create_bus_router())
        .nest("/api/districts", district_routes::create_district_router())
        .nest(
            "/api/representatives",
            representative_routes::create_representative_router(),
        )
        .nest("/api/routes", route_routes::create_route_router())
        .nest("/api/trips", trip_routes::create_trip_router())
        .nest(
            "/api/statistics",
            statistics_routes::create_statistics_router(),
        )
        .nest("/api/import", import_routes::create_import_router())
        .nest("/api/health", health_routes::create_health_router())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::rate_limit_middleware,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Respuesta JSON con el header `X-Cache`
pub(crate) fn cached_response(value: Value, status: CacheStatus) -> Response {
    let mut response = Json(value).into_response();
    response
        .headers_mut()
        .insert("x-cache", HeaderValue::from_static(status.as_str()));
    response
}
