use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::representative_dto::{
    CreateRepresentativeRequest, UpdateRepresentativeRequest,
};
use crate::models::Representative;
use crate::repositories::representative_repository::RepresentativeRepository;
use crate::utils::errors::{AppError, AppResult};

/// Los representantes no pasan por el cache; el listado se sirve
/// siempre desde la base de datos.
pub struct RepresentativeController {
    repository: RepresentativeRepository,
}

impl RepresentativeController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: RepresentativeRepository::new(pool),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Representative>> {
        self.repository.find_all().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Representative> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("المندوب غير موجود".to_string()))
    }

    pub async fn create(
        &self,
        request: CreateRepresentativeRequest,
    ) -> AppResult<Representative> {
        let name = request
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest("اسم المندوب مطلوب".to_string()))?;

        self.repository
            .create(&name, request.phone, request.email)
            .await
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateRepresentativeRequest,
    ) -> AppResult<Representative> {
        self.repository
            .update(id, request.name, request.phone, request.email)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.delete(id).await
    }
}
