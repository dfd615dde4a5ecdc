//! Utilidades de validación
//!
//! Funciones helper para validación de datos y conversión de tipos
//! usadas por los DTOs y los controladores.

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;
use validator::ValidationError;

use crate::utils::errors::AppError;

/// Validar que un string tenga formato UUID
pub fn validate_uuid(value: &str) -> Result<(), ValidationError> {
    if Uuid::parse_str(value).is_err() {
        let mut error = ValidationError::new("uuid");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

fn invalid_uuid(message: &'static str) -> ValidationError {
    let mut error = ValidationError::new("uuid");
    error.message = Some(message.into());
    error
}

/// Validadores por campo del request de rutas, con su mensaje árabe
pub fn validate_driver_id(value: &str) -> Result<(), ValidationError> {
    if Uuid::parse_str(value).is_err() {
        return Err(invalid_uuid("معرف السائق غير صالح"));
    }
    Ok(())
}

pub fn validate_bus_id(value: &str) -> Result<(), ValidationError> {
    if Uuid::parse_str(value).is_err() {
        return Err(invalid_uuid("معرف الباص غير صالح"));
    }
    Ok(())
}

pub fn validate_district_id(value: &str) -> Result<(), ValidationError> {
    if Uuid::parse_str(value).is_err() {
        return Err(invalid_uuid("معرف الحي غير صالح"));
    }
    Ok(())
}

/// Convertir un string a UUID con mensaje de error para el cliente
pub fn parse_uuid(value: &str, message: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(value).map_err(|_| AppError::BadRequest(message.to_string()))
}

/// Convertir un string `YYYY-MM-DD` a fecha con mensaje para el cliente
pub fn parse_date(value: &str, message: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(message.to_string()))
}

/// Convertir un string `HH:MM` (o `HH:MM:SS`) a hora del día
pub fn parse_time(value: &str, message: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| AppError::BadRequest(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_uuid() {
        let valid_uuid = "550e8400-e29b-41d4-a716-446655440000";
        assert!(validate_uuid(valid_uuid).is_ok());

        let invalid_uuid = "invalid-uuid";
        assert!(validate_uuid(invalid_uuid).is_err());
    }

    #[test]
    fn test_field_validators_carry_messages() {
        let error = validate_driver_id("nope").unwrap_err();
        assert_eq!(error.message.as_deref(), Some("معرف السائق غير صالح"));
        assert!(validate_bus_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_district_id("x").is_err());
    }

    #[test]
    fn test_parse_uuid() {
        assert!(parse_uuid("550e8400-e29b-41d4-a716-446655440000", "خطأ").is_ok());
        assert!(parse_uuid("nope", "خطأ").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-15", "خطأ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert!(parse_date("2024/01/15", "خطأ").is_err());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(
            parse_time("08:30", "خطأ").unwrap(),
            NaiveTime::from_hms_opt(8, 30, 0).unwrap()
        );
        assert_eq!(
            parse_time("14:05:30", "خطأ").unwrap(),
            NaiveTime::from_hms_opt(14, 5, 30).unwrap()
        );
        assert!(parse_time("8h30", "خطأ").is_err());
    }
}
