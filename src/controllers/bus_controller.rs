use std::sync::Arc;

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::cache_config::LIST_CACHE_TTL;
use crate::cache::{ApiCache, CacheStatus};
use crate::dto::bus_dto::{BusDistrictEntry, BusResponse, CreateBusRequest, UpdateBusRequest};
use crate::dto::NamedRef;
use crate::repositories::bus_repository::{BusDistrictRow, BusRepository};
use crate::utils::errors::{AppError, AppResult};

const CACHE_KEY: &str = "buses:all";

/// Capacidad por defecto cuando el alta no la indica
const DEFAULT_CAPACITY: i32 = 50;

pub struct BusController {
    repository: BusRepository,
    cache: Arc<ApiCache>,
}

impl BusController {
    pub fn new(pool: PgPool, cache: Arc<ApiCache>) -> Self {
        Self {
            repository: BusRepository::new(pool),
            cache,
        }
    }

    /// Listado por número de autobús con sus distritos asociados
    pub async fn list(&self) -> AppResult<(Value, CacheStatus)> {
        if let Some(cached) = self.cache.get(CACHE_KEY).await {
            return Ok((cached, CacheStatus::Hit));
        }

        let buses = self.repository.find_all().await?;
        let bus_ids: Vec<Uuid> = buses.iter().map(|bus| bus.id).collect();
        let mut districts = self.repository.districts_for_buses(&bus_ids).await?;

        let responses: Vec<BusResponse> = buses
            .into_iter()
            .map(|bus| {
                let entries = districts.remove(&bus.id).unwrap_or_default();
                BusResponse::from_bus(bus, to_entries(entries))
            })
            .collect();

        let value = serde_json::to_value(&responses)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        self.cache
            .set(CACHE_KEY, value.clone(), Some(LIST_CACHE_TTL))
            .await;

        Ok((value, CacheStatus::Miss))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BusResponse> {
        let bus = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("الباص غير موجود".to_string()))?;

        let districts = self.repository.districts_for_bus(id).await?;
        Ok(BusResponse::from_bus(bus, to_entries(districts)))
    }

    pub async fn create(&self, request: CreateBusRequest) -> AppResult<BusResponse> {
        let bus_number = request
            .bus_number
            .filter(|number| !number.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest("رقم الباص مطلوب".to_string()))?;

        let bus = self
            .repository
            .create(
                &bus_number,
                request.capacity.unwrap_or(DEFAULT_CAPACITY),
                &request.district_ids.unwrap_or_default(),
            )
            .await?;

        let districts = self.repository.districts_for_bus(bus.id).await?;
        self.cache.delete(CACHE_KEY).await;

        Ok(BusResponse::from_bus(bus, to_entries(districts)))
    }

    /// Si la petición trae `districtIds`, el conjunto completo de
    /// asociaciones se reemplaza; una lista vacía las elimina todas.
    pub async fn update(&self, id: Uuid, request: UpdateBusRequest) -> AppResult<BusResponse> {
        let bus = self
            .repository
            .update(id, request.bus_number, request.capacity, request.district_ids)
            .await?;

        let districts = self.repository.districts_for_bus(bus.id).await?;
        self.cache.delete(CACHE_KEY).await;

        Ok(BusResponse::from_bus(bus, to_entries(districts)))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.delete(id).await?;
        self.cache.delete(CACHE_KEY).await;
        Ok(())
    }
}

fn to_entries(rows: Vec<BusDistrictRow>) -> Vec<BusDistrictEntry> {
    rows.into_iter()
        .map(|row| BusDistrictEntry {
            id: row.id,
            district_id: row.district_id,
            district: NamedRef {
                id: row.district_id,
                name: row.district_name,
            },
        })
        .collect()
}
