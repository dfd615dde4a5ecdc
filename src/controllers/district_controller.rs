use std::sync::Arc;

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::cache_config::LIST_CACHE_TTL;
use crate::cache::{ApiCache, CacheStatus};
use crate::dto::district_dto::{CreateDistrictRequest, UpdateDistrictRequest};
use crate::models::District;
use crate::repositories::district_repository::DistrictRepository;
use crate::utils::errors::{AppError, AppResult};

const CACHE_KEY: &str = "districts:all";

pub struct DistrictController {
    repository: DistrictRepository,
    cache: Arc<ApiCache>,
}

impl DistrictController {
    pub fn new(pool: PgPool, cache: Arc<ApiCache>) -> Self {
        Self {
            repository: DistrictRepository::new(pool),
            cache,
        }
    }

    pub async fn list(&self) -> AppResult<(Value, CacheStatus)> {
        if let Some(cached) = self.cache.get(CACHE_KEY).await {
            return Ok((cached, CacheStatus::Hit));
        }

        let districts = self.repository.find_all().await?;
        let value = serde_json::to_value(&districts)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        self.cache
            .set(CACHE_KEY, value.clone(), Some(LIST_CACHE_TTL))
            .await;

        Ok((value, CacheStatus::Miss))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<District> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("الحي غير موجود".to_string()))
    }

    pub async fn create(&self, request: CreateDistrictRequest) -> AppResult<District> {
        let name = request
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest("اسم الحي مطلوب".to_string()))?;

        let district = self.repository.create(&name, request.description).await?;
        self.cache.delete(CACHE_KEY).await;
        Ok(district)
    }

    pub async fn update(&self, id: Uuid, request: UpdateDistrictRequest) -> AppResult<District> {
        let district = self
            .repository
            .update(id, request.name, request.description)
            .await?;
        self.cache.delete(CACHE_KEY).await;
        Ok(district)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.delete(id).await?;
        self.cache.delete(CACHE_KEY).await;
        Ok(())
    }
}
