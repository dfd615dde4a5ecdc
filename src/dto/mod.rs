//! DTOs de request y response del API
//!
//! Los nombres de campo JSON van en camelCase, que es el contrato que
//! consumen las vistas.

pub mod bus_dto;
pub mod district_dto;
pub mod driver_dto;
pub mod import_dto;
pub mod representative_dto;
pub mod route_dto;
pub mod statistics_dto;
pub mod trip_dto;
pub mod university_dto;

use serde::Serialize;
use uuid::Uuid;

/// Referencia mínima id + nombre, compartida entre responses
#[derive(Debug, Clone, Serialize)]
pub struct NamedRef {
    pub id: Uuid,
    pub name: String,
}

/// Referencia a conductor con teléfono
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverRef {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
}

/// Referencia mínima a un autobús
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusRef {
    pub id: Uuid,
    pub bus_number: String,
}
