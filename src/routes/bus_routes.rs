use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use uuid::Uuid;

use super::cached_response;
use crate::controllers::bus_controller::BusController;
use crate::dto::bus_dto::{BusResponse, CreateBusRequest, UpdateBusRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_bus_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_buses).post(create_bus))
        .route("/:id", get(get_bus).put(update_bus).delete(delete_bus))
}

async fn list_buses(State(state): State<AppState>) -> Result<Response, AppError> {
    let controller = BusController::new(state.pool.clone(), state.cache.clone());
    let (value, status) = controller.list().await?;
    Ok(cached_response(value, status))
}

async fn get_bus(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BusResponse>, AppError> {
    let controller = BusController::new(state.pool.clone(), state.cache.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn create_bus(
    State(state): State<AppState>,
    Json(request): Json<CreateBusRequest>,
) -> Result<(StatusCode, Json<BusResponse>), AppError> {
    let controller = BusController::new(state.pool.clone(), state.cache.clone());
    let bus = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(bus)))
}

async fn update_bus(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBusRequest>,
) -> Result<Json<BusResponse>, AppError> {
    let controller = BusController::new(state.pool.clone(), state.cache.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_bus(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = BusController::new(state.pool.clone(), state.cache.clone());
    controller.delete(id).await?;
    Ok(Json(json!({ "message": "تم حذف الباص بنجاح" })))
}
