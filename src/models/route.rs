//! Modelo de Route
//!
//! Una ruta es la plantilla recurrente universidad/conductor/autobús de
//! la que se instancian los viajes diarios.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: Uuid,
    pub university_id: Uuid,
    pub driver_id: Uuid,
    pub bus_id: Uuid,
    pub district_id: Option<Uuid>,
    pub representative_id: Option<Uuid>,
    pub total_go_trips: i32,
    pub total_return_trips: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
