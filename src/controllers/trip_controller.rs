use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::cache_config::TRIPS_CACHE_TTL;
use crate::cache::{ApiCache, CacheStatus};
use crate::dto::bus_dto::{BusDistrictEntry, BusResponse};
use crate::dto::trip_dto::{
    CreateTripRequest, TripDetailResponse, TripQueryParams, UpdateTripRequest,
};
use crate::dto::NamedRef;
use crate::models::{Trip, TripDirection, TripStatus};
use crate::repositories::bus_repository::BusRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::repositories::trip_repository::{TripFilters, TripRepository};
use crate::services::trip_merge_service::unify_trips;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{parse_date, parse_time, parse_uuid};

/// Prefijo de invalidación: la clave codifica todas las combinaciones
/// de filtros, así que las mutaciones barren el prefijo completo.
const CACHE_PREFIX: &str = "trips:";

const REQUIRED_FIELDS_MESSAGE: &str =
    "الحقول المطلوبة: routeId (أو busId), tripDate, direction, scheduledTime";

pub struct TripController {
    repository: TripRepository,
    buses: BusRepository,
    routes: RouteRepository,
    cache: Arc<ApiCache>,
}

impl TripController {
    pub fn new(pool: PgPool, cache: Arc<ApiCache>) -> Self {
        Self {
            repository: TripRepository::new(pool.clone()),
            buses: BusRepository::new(pool.clone()),
            routes: RouteRepository::new(pool),
            cache,
        }
    }

    /// Vista unificada y filtrable sobre las dos tablas de viajes
    pub async fn list(&self, params: TripQueryParams) -> AppResult<(Value, CacheStatus)> {
        let cache_key = params.cache_key();
        if let Some(cached) = self.cache.get(&cache_key).await {
            return Ok((cached, CacheStatus::Hit));
        }

        let filters = build_filters(&params)?;
        let source = params.source.as_deref();

        let trip_rows = if source != Some("route_trips") {
            self.repository.find_trips(&filters).await?
        } else {
            Vec::new()
        };
        let route_trip_rows = if source != Some("trips") {
            self.repository.find_route_trips(&filters).await?
        } else {
            Vec::new()
        };

        // Distritos de todos los autobuses involucrados, en una consulta
        let mut bus_ids: Vec<Uuid> = trip_rows
            .iter()
            .map(|row| row.bus_id)
            .chain(route_trip_rows.iter().map(|row| row.bus_id))
            .collect();
        bus_ids.sort_unstable();
        bus_ids.dedup();

        let district_rows = self.buses.districts_for_buses(&bus_ids).await?;
        let bus_districts: HashMap<Uuid, Vec<NamedRef>> = district_rows
            .into_iter()
            .map(|(bus_id, rows)| {
                let refs = rows
                    .into_iter()
                    .map(|row| NamedRef {
                        id: row.district_id,
                        name: row.district_name,
                    })
                    .collect();
                (bus_id, refs)
            })
            .collect();

        let unified = unify_trips(trip_rows, route_trip_rows, &bus_districts);

        let value = serde_json::to_value(&unified)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        self.cache
            .set(&cache_key, value.clone(), Some(TRIPS_CACHE_TTL))
            .await;

        Ok((value, CacheStatus::Miss))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<TripDetailResponse> {
        let trip = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("الرحلة غير موجودة".to_string()))?;

        let bus = self
            .buses
            .find_by_id(trip.bus_id)
            .await?
            .ok_or_else(|| AppError::NotFound("الباص غير موجود".to_string()))?;
        let districts = self.buses.districts_for_bus(bus.id).await?;

        Ok(TripDetailResponse {
            trip,
            bus: BusResponse::from_bus(
                bus,
                districts
                    .into_iter()
                    .map(|row| BusDistrictEntry {
                        id: row.id,
                        district_id: row.district_id,
                        district: NamedRef {
                            id: row.district_id,
                            name: row.district_name,
                        },
                    })
                    .collect(),
            ),
        })
    }

    /// Alta de un viaje diario. Si viene `routeId`, el autobús se
    /// resuelve desde la ruta.
    pub async fn create(&self, request: CreateTripRequest) -> AppResult<Trip> {
        let mut bus_id = request.bus_id;
        if let Some(route_id) = request.route_id {
            if let Some(route_bus) = self.routes.find_bus_id(route_id).await? {
                bus_id = Some(route_bus);
            }
        }

        let bus_id =
            bus_id.ok_or_else(|| AppError::BadRequest(REQUIRED_FIELDS_MESSAGE.to_string()))?;
        let trip_date = request
            .trip_date
            .ok_or_else(|| AppError::BadRequest(REQUIRED_FIELDS_MESSAGE.to_string()))?;
        let direction = request
            .direction
            .as_deref()
            .and_then(TripDirection::from_param)
            .ok_or_else(|| AppError::BadRequest(REQUIRED_FIELDS_MESSAGE.to_string()))?;
        let scheduled_label = request
            .scheduled_time
            .ok_or_else(|| AppError::BadRequest(REQUIRED_FIELDS_MESSAGE.to_string()))?;

        let scheduled_naive = parse_time(&scheduled_label, "صيغة الوقت غير صالحة")?;
        let scheduled_time = trip_date.and_time(scheduled_naive).and_utc();

        let status = match request.status.as_deref() {
            Some(value) => TripStatus::from_param(value)
                .ok_or_else(|| AppError::BadRequest("حالة الرحلة غير صالحة".to_string()))?,
            None => TripStatus::Pending,
        };

        let trip = self
            .repository
            .create(
                bus_id,
                request.route_id,
                trip_date,
                direction,
                scheduled_time,
                request.passengers_count.unwrap_or(0),
                status,
                request.notes,
            )
            .await?;

        self.cache.invalidate_prefix(CACHE_PREFIX).await;
        Ok(trip)
    }

    /// Actualización parcial sobre la tabla nueva; los campos de hora
    /// real distinguen "no enviado" de "null"
    pub async fn update(&self, id: Uuid, request: UpdateTripRequest) -> AppResult<Trip> {
        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("الرحلة غير موجودة".to_string()))?;

        let status = match request.status.as_deref() {
            Some(value) => TripStatus::from_param(value)
                .ok_or_else(|| AppError::BadRequest("حالة الرحلة غير صالحة".to_string()))?,
            None => current.status,
        };

        let trip = self
            .repository
            .update(
                id,
                request.passengers_count.unwrap_or(current.passengers_count),
                status,
                request.scheduled_time.unwrap_or(current.scheduled_time),
                match request.actual_departure_time {
                    Some(value) => value,
                    None => current.actual_departure_time,
                },
                match request.actual_arrival_time {
                    Some(value) => value,
                    None => current.actual_arrival_time,
                },
                match request.notes {
                    Some(value) => value,
                    None => current.notes,
                },
            )
            .await?;

        self.cache.invalidate_prefix(CACHE_PREFIX).await;
        Ok(trip)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.delete(id).await?;
        self.cache.invalidate_prefix(CACHE_PREFIX).await;
        Ok(())
    }
}

/// Traducir los parámetros crudos de la query a filtros tipados
fn build_filters(params: &TripQueryParams) -> AppResult<TripFilters> {
    let (date_from, date_to) = if let Some(date) = params.date.as_deref() {
        let day = parse_date(date, "صيغة التاريخ غير صالحة")?;
        (Some(day), Some(day))
    } else if let (Some(start), Some(end)) =
        (params.start_date.as_deref(), params.end_date.as_deref())
    {
        (
            Some(parse_date(start, "صيغة التاريخ غير صالحة")?),
            Some(parse_date(end, "صيغة التاريخ غير صالحة")?),
        )
    } else {
        (None, None)
    };

    let bus_id = match params.bus_id.as_deref() {
        Some(value) => Some(parse_uuid(value, "معرف الباص غير صالح")?),
        None => None,
    };
    let status = match params.status.as_deref() {
        Some(value) => Some(
            TripStatus::from_param(value)
                .ok_or_else(|| AppError::BadRequest("حالة الرحلة غير صالحة".to_string()))?,
        ),
        None => None,
    };
    let direction = match params.direction.as_deref() {
        Some(value) => Some(
            TripDirection::from_param(value)
                .ok_or_else(|| AppError::BadRequest("اتجاه الرحلة غير صالح".to_string()))?,
        ),
        None => None,
    };

    Ok(TripFilters {
        date_from,
        date_to,
        bus_id,
        status,
        direction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filters_single_date() {
        let params = TripQueryParams {
            date: Some("2024-05-01".to_string()),
            ..Default::default()
        };
        let filters = build_filters(&params).unwrap();
        assert_eq!(filters.date_from, filters.date_to);
        assert!(filters.date_from.is_some());
    }

    #[test]
    fn test_build_filters_range() {
        let params = TripQueryParams {
            start_date: Some("2024-05-01".to_string()),
            end_date: Some("2024-05-07".to_string()),
            ..Default::default()
        };
        let filters = build_filters(&params).unwrap();
        assert!(filters.date_from < filters.date_to);
    }

    #[test]
    fn test_build_filters_rejects_bad_status() {
        let params = TripQueryParams {
            status: Some("FLYING".to_string()),
            ..Default::default()
        };
        assert!(build_filters(&params).is_err());
    }

    #[test]
    fn test_build_filters_rejects_bad_date() {
        let params = TripQueryParams {
            date: Some("01/05/2024".to_string()),
            ..Default::default()
        };
        assert!(build_filters(&params).is_err());
    }
}
