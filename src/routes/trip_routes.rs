use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use uuid::Uuid;

use super::cached_response;
use crate::controllers::trip_controller::TripController;
use crate::dto::trip_dto::{
    CreateTripRequest, TripDetailResponse, TripQueryParams, UpdateTripRequest,
};
use crate::models::Trip;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_trip_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trips).post(create_trip))
        .route("/:id", get(get_trip).put(update_trip).delete(delete_trip))
}

async fn list_trips(
    State(state): State<AppState>,
    Query(params): Query<TripQueryParams>,
) -> Result<Response, AppError> {
    let controller = TripController::new(state.pool.clone(), state.cache.clone());
    let (value, status) = controller.list(params).await?;
    Ok(cached_response(value, status))
}

async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TripDetailResponse>, AppError> {
    let controller = TripController::new(state.pool.clone(), state.cache.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn create_trip(
    State(state): State<AppState>,
    Json(request): Json<CreateTripRequest>,
) -> Result<(StatusCode, Json<Trip>), AppError> {
    let controller = TripController::new(state.pool.clone(), state.cache.clone());
    let trip = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(trip)))
}

async fn update_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTripRequest>,
) -> Result<Json<Trip>, AppError> {
    let controller = TripController::new(state.pool.clone(), state.cache.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = TripController::new(state.pool.clone(), state.cache.clone());
    controller.delete(id).await?;
    Ok(Json(json!({ "message": "تم حذف الرحلة بنجاح" })))
}
