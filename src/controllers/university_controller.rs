use std::sync::Arc;

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::cache_config::LIST_CACHE_TTL;
use crate::cache::{ApiCache, CacheStatus};
use crate::dto::university_dto::{
    CreateUniversityRequest, UniversityListItem, UpdateUniversityRequest,
};
use crate::models::University;
use crate::repositories::university_repository::UniversityRepository;
use crate::utils::errors::{AppError, AppResult};

const CACHE_KEY: &str = "universities:all";

pub struct UniversityController {
    repository: UniversityRepository,
    cache: Arc<ApiCache>,
}

impl UniversityController {
    pub fn new(pool: PgPool, cache: Arc<ApiCache>) -> Self {
        Self {
            repository: UniversityRepository::new(pool),
            cache,
        }
    }

    /// Listado ordenado por nombre, enriquecido con el número de rutas
    pub async fn list(&self) -> AppResult<(Value, CacheStatus)> {
        if let Some(cached) = self.cache.get(CACHE_KEY).await {
            return Ok((cached, CacheStatus::Hit));
        }

        let universities = self.repository.find_all().await?;
        let counts = self.repository.routes_count_by_university().await?;

        let items: Vec<UniversityListItem> = universities
            .into_iter()
            .map(|u| UniversityListItem {
                routes_count: counts.get(&u.id).copied().unwrap_or(0),
                id: u.id,
                name: u.name,
                created_at: u.created_at,
                updated_at: u.updated_at,
            })
            .collect();

        let value = serde_json::to_value(&items)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        self.cache
            .set(CACHE_KEY, value.clone(), Some(LIST_CACHE_TTL))
            .await;

        Ok((value, CacheStatus::Miss))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<University> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("الجامعة غير موجودة".to_string()))
    }

    pub async fn create(&self, request: CreateUniversityRequest) -> AppResult<University> {
        let name = request
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest("اسم الجامعة مطلوب".to_string()))?;

        let university = self.repository.create(&name).await?;
        self.cache.delete(CACHE_KEY).await;
        Ok(university)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateUniversityRequest,
    ) -> AppResult<University> {
        let university = self.repository.update(id, request.name).await?;
        self.cache.delete(CACHE_KEY).await;
        Ok(university)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.delete(id).await?;
        self.cache.delete(CACHE_KEY).await;
        Ok(())
    }
}
