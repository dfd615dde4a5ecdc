use std::sync::Arc;

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::cache::cache_config::LIST_CACHE_TTL;
use crate::cache::{ApiCache, CacheStatus};
use crate::dto::bus_dto::BusDistrictEntry;
use crate::dto::route_dto::{
    CreateRouteRequest, RouteBusResponse, RouteResponse, UpdateRouteRequest,
};
use crate::dto::NamedRef;
use crate::repositories::bus_repository::{BusDistrictRow, BusRepository};
use crate::repositories::route_repository::{RouteRepository, RouteRow};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::parse_uuid;

const CACHE_KEY: &str = "routes:all";

pub struct RouteController {
    repository: RouteRepository,
    buses: BusRepository,
    cache: Arc<ApiCache>,
}

impl RouteController {
    pub fn new(pool: PgPool, cache: Arc<ApiCache>) -> Self {
        Self {
            repository: RouteRepository::new(pool.clone()),
            buses: BusRepository::new(pool),
            cache,
        }
    }

    /// Listado por fecha de creación descendente, con universidad,
    /// conductor, autobús y distritos resueltos
    pub async fn list(&self) -> AppResult<(Value, CacheStatus)> {
        if let Some(cached) = self.cache.get(CACHE_KEY).await {
            return Ok((cached, CacheStatus::Hit));
        }

        let rows = self.repository.find_all().await?;
        let bus_ids: Vec<Uuid> = rows.iter().map(|row| row.bus_id).collect();
        let mut districts = self.buses.districts_for_buses(&bus_ids).await?;

        let responses: Vec<RouteResponse> = rows
            .into_iter()
            .map(|row| {
                let entries = districts.remove(&row.bus_id).unwrap_or_default();
                to_response(row, entries)
            })
            .collect();

        let value = serde_json::to_value(&responses)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        self.cache
            .set(CACHE_KEY, value.clone(), Some(LIST_CACHE_TTL))
            .await;

        Ok((value, CacheStatus::Miss))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<RouteResponse> {
        let row = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("الرحلة غير موجودة".to_string()))?;

        let districts = self.buses.districts_for_bus(row.bus_id).await?;
        Ok(to_response(row, districts))
    }

    /// La forma de la petición se valida antes de tocar la base de datos
    pub async fn create(&self, request: CreateRouteRequest) -> AppResult<RouteResponse> {
        request.validate()?;

        let university_id = parse_uuid(&request.university_id, "معرف الجامعة غير صالح")?;
        let driver_id = parse_uuid(&request.driver_id, "معرف السائق غير صالح")?;
        let bus_id = parse_uuid(&request.bus_id, "معرف الباص غير صالح")?;
        let district_id = match request.district_id {
            Some(value) => Some(parse_uuid(&value, "معرف الحي غير صالح")?),
            None => None,
        };

        let route = self
            .repository
            .create(university_id, driver_id, bus_id, district_id, None, 0, 0)
            .await?;

        self.cache.delete(CACHE_KEY).await;
        self.get_by_id(route.id).await
    }

    pub async fn update(&self, id: Uuid, request: UpdateRouteRequest) -> AppResult<RouteResponse> {
        let route = self
            .repository
            .update(
                id,
                request.university_id,
                request.driver_id,
                request.bus_id,
                request.district_id,
                request.total_go_trips,
                request.total_return_trips,
                request.is_active,
            )
            .await?;

        self.cache.delete(CACHE_KEY).await;
        self.get_by_id(route.id).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.delete(id).await?;
        self.cache.delete(CACHE_KEY).await;
        Ok(())
    }
}

fn to_response(row: RouteRow, districts: Vec<BusDistrictRow>) -> RouteResponse {
    RouteResponse {
        id: row.id,
        university_id: row.university_id,
        driver_id: row.driver_id,
        bus_id: row.bus_id,
        district_id: row.district_id,
        representative_id: row.representative_id,
        total_go_trips: row.total_go_trips,
        total_return_trips: row.total_return_trips,
        is_active: row.is_active,
        created_at: row.created_at,
        updated_at: row.updated_at,
        university: NamedRef {
            id: row.university_id,
            name: row.university_name,
        },
        driver: NamedRef {
            id: row.driver_id,
            name: row.driver_name,
        },
        bus: RouteBusResponse {
            id: row.bus_id,
            bus_number: row.bus_number,
            capacity: row.bus_capacity,
            districts: districts
                .into_iter()
                .map(|district| BusDistrictEntry {
                    id: district.id,
                    district_id: district.district_id,
                    district: NamedRef {
                        id: district.district_id,
                        name: district.district_name,
                    },
                })
                .collect(),
        },
        district: match (row.district_id, row.district_name) {
            (Some(id), Some(name)) => Some(NamedRef { id, name }),
            _ => None,
        },
    }
}
