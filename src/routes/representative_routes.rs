use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use uuid::Uuid;

use crate::controllers::representative_controller::RepresentativeController;
use crate::dto::representative_dto::{
    CreateRepresentativeRequest, UpdateRepresentativeRequest,
};
use crate::models::Representative;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_representative_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_representatives).post(create_representative))
        .route(
            "/:id",
            get(get_representative)
                .put(update_representative)
                .delete(delete_representative),
        )
}

async fn list_representatives(
    State(state): State<AppState>,
) -> Result<Json<Vec<Representative>>, AppError> {
    let controller = RepresentativeController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn get_representative(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Representative>, AppError> {
    let controller = RepresentativeController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn create_representative(
    State(state): State<AppState>,
    Json(request): Json<CreateRepresentativeRequest>,
) -> Result<(StatusCode, Json<Representative>), AppError> {
    let controller = RepresentativeController::new(state.pool.clone());
    let representative = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(representative)))
}

async fn update_representative(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRepresentativeRequest>,
) -> Result<Json<Representative>, AppError> {
    let controller = RepresentativeController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_representative(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = RepresentativeController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(json!({ "message": "تم حذف المندوب بنجاح" })))
}
