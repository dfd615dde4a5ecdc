use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use uuid::Uuid;

use super::cached_response;
use crate::controllers::university_controller::UniversityController;
use crate::dto::university_dto::{CreateUniversityRequest, UpdateUniversityRequest};
use crate::models::University;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_university_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_universities).post(create_university))
        .route(
            "/:id",
            get(get_university)
                .put(update_university)
                .delete(delete_university),
        )
}

async fn list_universities(State(state): State<AppState>) -> Result<Response, AppError> {
    let controller = UniversityController::new(state.pool.clone(), state.cache.clone());
    let (value, status) = controller.list().await?;
    Ok(cached_response(value, status))
}

async fn get_university(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<University>, AppError> {
    let controller = UniversityController::new(state.pool.clone(), state.cache.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn create_university(
    State(state): State<AppState>,
    Json(request): Json<CreateUniversityRequest>,
) -> Result<(StatusCode, Json<University>), AppError> {
    let controller = UniversityController::new(state.pool.clone(), state.cache.clone());
    let university = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(university)))
}

async fn update_university(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUniversityRequest>,
) -> Result<Json<University>, AppError> {
    let controller = UniversityController::new(state.pool.clone(), state.cache.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_university(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = UniversityController::new(state.pool.clone(), state.cache.clone());
    controller.delete(id).await?;
    Ok(Json(json!({ "message": "تم حذف الجامعة بنجاح" })))
}
