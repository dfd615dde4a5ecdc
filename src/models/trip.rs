//! Modelos de viajes diarios
//!
//! Dos tablas paralelas representan el mismo concepto por razones
//! históricas: `route_trips` (heredada, hora como etiqueta de texto) y
//! `trips` (nueva, hora programada como timestamp). El API las une en
//! lectura; ver el repositorio de viajes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Dirección del viaje - mapea al ENUM trip_direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "trip_direction", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TripDirection {
    Go,
    Return,
}

impl TripDirection {
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "GO" => Some(TripDirection::Go),
            "RETURN" => Some(TripDirection::Return),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TripDirection::Go => "GO",
            TripDirection::Return => "RETURN",
        }
    }
}

/// Estado del viaje - mapea al ENUM trip_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "trip_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TripStatus {
    Pending,
    Departed,
    Arrived,
    Delayed,
    Cancelled,
}

impl TripStatus {
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(TripStatus::Pending),
            "DEPARTED" => Some(TripStatus::Departed),
            "ARRIVED" => Some(TripStatus::Arrived),
            "DELAYED" => Some(TripStatus::Delayed),
            "CANCELLED" => Some(TripStatus::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Pending => "PENDING",
            TripStatus::Departed => "DEPARTED",
            TripStatus::Arrived => "ARRIVED",
            TripStatus::Delayed => "DELAYED",
            TripStatus::Cancelled => "CANCELLED",
        }
    }
}

/// Mapea a la tabla `trips` (nueva)
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: Uuid,
    pub bus_id: Uuid,
    pub route_id: Option<Uuid>,
    pub trip_date: NaiveDate,
    pub direction: TripDirection,
    pub scheduled_time: DateTime<Utc>,
    pub passengers_count: i32,
    pub status: TripStatus,
    pub actual_departure_time: Option<DateTime<Utc>>,
    pub actual_arrival_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mapea a la tabla `route_trips` (heredada)
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteTrip {
    pub id: Uuid,
    pub route_id: Uuid,
    pub trip_date: NaiveDate,
    pub direction: TripDirection,
    pub trip_time: String,
    pub students_count: i32,
    pub status: TripStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_param() {
        assert_eq!(TripStatus::from_param("ARRIVED"), Some(TripStatus::Arrived));
        assert_eq!(TripStatus::from_param("arrived"), None);
        assert_eq!(TripStatus::from_param(""), None);
    }

    #[test]
    fn test_direction_round_trip() {
        for direction in [TripDirection::Go, TripDirection::Return] {
            assert_eq!(TripDirection::from_param(direction.as_str()), Some(direction));
        }
    }
}
