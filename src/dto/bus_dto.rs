use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::NamedRef;
use crate::models::Bus;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBusRequest {
    pub bus_number: Option<String>,
    pub capacity: Option<i32>,
    pub district_ids: Option<Vec<Uuid>>,
}

/// Si `district_ids` viene presente, el conjunto completo de asociaciones
/// del autobús se reemplaza dentro de una transacción.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBusRequest {
    pub bus_number: Option<String>,
    pub capacity: Option<i32>,
    pub district_ids: Option<Vec<Uuid>>,
}

/// Asociación autobús-distrito tal como la expone el API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusDistrictEntry {
    pub id: Uuid,
    pub district_id: Uuid,
    pub district: NamedRef,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusResponse {
    pub id: Uuid,
    pub bus_number: String,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub districts: Vec<BusDistrictEntry>,
}

impl BusResponse {
    pub fn from_bus(bus: Bus, districts: Vec<BusDistrictEntry>) -> Self {
        Self {
            id: bus.id,
            bus_number: bus.bus_number,
            capacity: bus.capacity,
            created_at: bus.created_at,
            updated_at: bus.updated_at,
            districts,
        }
    }
}
