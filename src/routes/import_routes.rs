use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::routing::post;
use axum::{Json, Router};

use crate::controllers::import_controller::ImportController;
use crate::dto::import_dto::ImportResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Las hojas de cálculo reales superan el límite por defecto de axum
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn create_import_router() -> Router<AppState> {
    Router::new()
        .route("/excel", post(import_excel))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

async fn import_excel(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("خطأ في قراءة الطلب: {}", e)))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("خطأ في قراءة الملف: {}", e)))?;
            file = Some((filename, bytes.to_vec()));
        }
    }

    let (filename, bytes) =
        file.ok_or_else(|| AppError::BadRequest("الملف مطلوب".to_string()))?;

    let controller = ImportController::new(state.pool.clone());
    Ok(Json(controller.import(&filename, &bytes).await?))
}
