use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::database::connection::health_check;
use crate::state::AppState;

pub fn create_health_router() -> Router<AppState> {
    Router::new().route("/", get(health))
}

/// Ida y vuelta trivial a la base de datos
async fn health(State(state): State<AppState>) -> Response {
    match health_check(&state.pool).await {
        Ok(db) => Json(json!({ "status": "ok", "db": db })).into_response(),
        Err(error) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "status": "error",
                "message": "فشل التحقق من الاتصال بقاعدة البيانات",
                "details": error.to_string(),
            })),
        )
            .into_response(),
    }
}
