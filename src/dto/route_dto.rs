use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::bus_dto::BusDistrictEntry;
use super::NamedRef;

/// Request de creación de ruta. La forma se valida antes de tocar la
/// base de datos; un fallo devuelve 400 con detalle por campo.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRouteRequest {
    #[validate(length(min = 1, message = "معرف الجامعة مطلوب"))]
    pub university_id: String,

    #[validate(custom = "crate::utils::validation::validate_driver_id")]
    pub driver_id: String,

    #[validate(custom = "crate::utils::validation::validate_bus_id")]
    pub bus_id: String,

    #[validate(custom = "crate::utils::validation::validate_district_id")]
    pub district_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRouteRequest {
    pub university_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub bus_id: Option<Uuid>,
    pub district_id: Option<Uuid>,
    pub total_go_trips: Option<i32>,
    pub total_return_trips: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteBusResponse {
    pub id: Uuid,
    pub bus_number: String,
    pub capacity: i32,
    pub districts: Vec<BusDistrictEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
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
    pub university: NamedRef,
    pub driver: NamedRef,
    pub bus: RouteBusResponse,
    pub district: Option<NamedRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_route_request_valid() {
        let request = CreateRouteRequest {
            university_id: "u-123".to_string(),
            driver_id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            bus_id: "550e8400-e29b-41d4-a716-446655440001".to_string(),
            district_id: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_route_request_rejects_bad_driver_id() {
        let request = CreateRouteRequest {
            university_id: "u-123".to_string(),
            driver_id: "not-a-uuid".to_string(),
            bus_id: "550e8400-e29b-41d4-a716-446655440001".to_string(),
            district_id: None,
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("driver_id"));
    }

    #[test]
    fn test_create_route_request_rejects_empty_university() {
        let request = CreateRouteRequest {
            university_id: "".to_string(),
            driver_id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            bus_id: "550e8400-e29b-41d4-a716-446655440001".to_string(),
            district_id: None,
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("university_id"));
    }

    #[test]
    fn test_create_route_request_optional_district() {
        let request = CreateRouteRequest {
            university_id: "u-123".to_string(),
            driver_id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            bus_id: "550e8400-e29b-41d4-a716-446655440001".to_string(),
            district_id: Some("bad".to_string()),
        };
        assert!(request.validate().is_err());
    }
}
