use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use uuid::Uuid;

use super::cached_response;
use crate::controllers::district_controller::DistrictController;
use crate::dto::district_dto::{CreateDistrictRequest, UpdateDistrictRequest};
use crate::models::District;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_district_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_districts).post(create_district))
        .route(
            "/:id",
            get(get_district)
                .put(update_district)
                .delete(delete_district),
        )
}

async fn list_districts(State(state): State<AppState>) -> Result<Response, AppError> {
    let controller = DistrictController::new(state.pool.clone(), state.cache.clone());
    let (value, status) = controller.list().await?;
    Ok(cached_response(value, status))
}

async fn get_district(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<District>, AppError> {
    let controller = DistrictController::new(state.pool.clone(), state.cache.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn create_district(
    State(state): State<AppState>,
    Json(request): Json<CreateDistrictRequest>,
) -> Result<(StatusCode, Json<District>), AppError> {
    let controller = DistrictController::new(state.pool.clone(), state.cache.clone());
    let district = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(district)))
}

async fn update_district(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDistrictRequest>,
) -> Result<Json<District>, AppError> {
    let controller = DistrictController::new(state.pool.clone(), state.cache.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_district(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = DistrictController::new(state.pool.clone(), state.cache.clone());
    controller.delete(id).await?;
    Ok(Json(
        json!({ "success": true, "message": "تم حذف الحي بنجاح" }),
    ))
}
