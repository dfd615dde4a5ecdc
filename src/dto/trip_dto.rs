use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::bus_dto::BusResponse;
use super::{BusRef, DriverRef, NamedRef};
use crate::models::{Trip, TripDirection, TripStatus};

/// Parámetros de consulta del listado unificado de viajes.
/// Se conservan como strings crudos porque forman la clave del cache.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripQueryParams {
    pub date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub bus_id: Option<String>,
    pub status: Option<String>,
    pub direction: Option<String>,
    pub source: Option<String>,
}

impl TripQueryParams {
    /// La clave codifica cada parámetro de filtro; las mutaciones
    /// invalidan por el prefijo "trips:".
    pub fn cache_key(&self) -> String {
        format!(
            "trips:{}:{}:{}:{}:{}:{}:{}",
            self.date.as_deref().unwrap_or(""),
            self.start_date.as_deref().unwrap_or(""),
            self.end_date.as_deref().unwrap_or(""),
            self.bus_id.as_deref().unwrap_or(""),
            self.status.as_deref().unwrap_or(""),
            self.direction.as_deref().unwrap_or(""),
            self.source.as_deref().unwrap_or(""),
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripRequest {
    pub bus_id: Option<Uuid>,
    pub route_id: Option<Uuid>,
    pub trip_date: Option<NaiveDate>,
    pub direction: Option<String>,
    /// Hora del día como "HH:MM"
    pub scheduled_time: Option<String>,
    pub passengers_count: Option<i32>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Actualización parcial. Los campos de hora real y las notas usan doble
/// Option para distinguir "no enviado" de "enviado como null".
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTripRequest {
    pub passengers_count: Option<i32>,
    pub status: Option<String>,
    pub scheduled_time: Option<DateTime<Utc>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub actual_departure_time: Option<Option<DateTime<Utc>>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub actual_arrival_time: Option<Option<DateTime<Utc>>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub notes: Option<Option<String>>,
}

/// Origen de un viaje unificado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TripSource {
    Trips,
    RouteTrips,
}

/// Ruta asociada a un viaje unificado. `district` conserva el primer
/// distrito por compatibilidad con el código antiguo; `districts` los
/// trae todos.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedTripRoute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub bus: Option<BusRef>,
    pub driver: Option<DriverRef>,
    pub university: Option<NamedRef>,
    pub district: Option<NamedRef>,
    pub districts: Vec<NamedRef>,
}

/// Forma común de un viaje diario sobre las dos tablas de origen
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedTrip {
    pub id: Uuid,
    pub source: TripSource,
    pub trip_date: NaiveDate,
    pub direction: TripDirection,
    pub trip_time: String,
    pub students_count: i32,
    pub status: TripStatus,
    pub notes: Option<String>,
    pub route: UnifiedTripRoute,
}

/// Response de GET /trips/{id}: el viaje con su autobús y distritos
#[derive(Debug, Serialize)]
pub struct TripDetailResponse {
    #[serde(flatten)]
    pub trip: Trip,
    pub bus: BusResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_empty_params() {
        let params = TripQueryParams::default();
        assert_eq!(params.cache_key(), "trips:::::::");
    }

    #[test]
    fn test_cache_key_encodes_every_filter() {
        let params = TripQueryParams {
            date: Some("2024-05-01".to_string()),
            bus_id: Some("abc".to_string()),
            direction: Some("GO".to_string()),
            ..Default::default()
        };
        assert_eq!(params.cache_key(), "trips:2024-05-01:::abc::GO:");
    }

    #[test]
    fn test_update_trip_request_double_option() {
        let body = r#"{"actualDepartureTime": null, "passengersCount": 12}"#;
        let request: UpdateTripRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.actual_departure_time, Some(None));
        assert_eq!(request.actual_arrival_time, None);
        assert_eq!(request.passengers_count, Some(12));
    }
}
