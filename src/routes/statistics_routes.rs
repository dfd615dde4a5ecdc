use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::controllers::statistics_controller::StatisticsController;
use crate::dto::statistics_dto::{StatisticsQuery, StatisticsResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_statistics_router() -> Router<AppState> {
    Router::new().route("/", get(get_statistics))
}

async fn get_statistics(
    State(state): State<AppState>,
    Query(query): Query<StatisticsQuery>,
) -> Result<Json<StatisticsResponse>, AppError> {
    let controller = StatisticsController::new(state.pool.clone());
    Ok(Json(controller.get(query.date).await?))
}
