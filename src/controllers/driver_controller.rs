use std::sync::Arc;

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::cache_config::LIST_CACHE_TTL;
use crate::cache::{ApiCache, CacheStatus};
use crate::dto::driver_dto::{CreateDriverRequest, UpdateDriverRequest};
use crate::models::Driver;
use crate::repositories::driver_repository::DriverRepository;
use crate::utils::errors::{AppError, AppResult};

const CACHE_KEY: &str = "drivers:all";

pub struct DriverController {
    repository: DriverRepository,
    cache: Arc<ApiCache>,
}

impl DriverController {
    pub fn new(pool: PgPool, cache: Arc<ApiCache>) -> Self {
        Self {
            repository: DriverRepository::new(pool),
            cache,
        }
    }

    pub async fn list(&self) -> AppResult<(Value, CacheStatus)> {
        if let Some(cached) = self.cache.get(CACHE_KEY).await {
            return Ok((cached, CacheStatus::Hit));
        }

        let drivers = self.repository.find_all().await?;
        let value = serde_json::to_value(&drivers)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        self.cache
            .set(CACHE_KEY, value.clone(), Some(LIST_CACHE_TTL))
            .await;

        Ok((value, CacheStatus::Miss))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Driver> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("السائق غير موجود".to_string()))
    }

    pub async fn create(&self, request: CreateDriverRequest) -> AppResult<Driver> {
        let name = request
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest("اسم السائق مطلوب".to_string()))?;

        let driver = self.repository.create(&name, request.phone).await?;
        self.cache.delete(CACHE_KEY).await;
        Ok(driver)
    }

    pub async fn update(&self, id: Uuid, request: UpdateDriverRequest) -> AppResult<Driver> {
        let driver = self
            .repository
            .update(id, request.name, request.phone)
            .await?;
        self.cache.delete(CACHE_KEY).await;
        Ok(driver)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.delete(id).await?;
        self.cache.delete(CACHE_KEY).await;
        Ok(())
    }
}
