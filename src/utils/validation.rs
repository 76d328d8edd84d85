//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::ValidationError;

/// Validar y convertir string a UUID
pub fn validate_uuid(value: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value).map_err(|_| {
        let mut error = ValidationError::new("uuid");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar y convertir string a datetime
pub fn validate_datetime(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            let mut error = ValidationError::new("datetime");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"RFC3339".to_string());
            error
        })
}

/// Validar que una cantidad de piezas sea positiva
pub fn validate_positive_quantity(value: i32) -> Result<i32, ValidationError> {
    if value <= 0 {
        let mut error = ValidationError::new("positive_quantity");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(value)
}

/// Validar que un precio no sea negativo
pub fn validate_non_negative_price(value: Decimal) -> Result<Decimal, ValidationError> {
    if value < Decimal::ZERO {
        let mut error = ValidationError::new("non_negative_price");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("no-es-uuid").is_err());
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2025-08-18").is_ok());
        assert!(validate_date("18/08/2025").is_err());
    }

    #[test]
    fn test_validate_positive_quantity() {
        assert!(validate_positive_quantity(1).is_ok());
        assert!(validate_positive_quantity(0).is_err());
        assert!(validate_positive_quantity(-3).is_err());
    }

    #[test]
    fn test_validate_non_negative_price() {
        assert!(validate_non_negative_price(dec("0.00")).is_ok());
        assert!(validate_non_negative_price(dec("19.99")).is_ok());
        assert!(validate_non_negative_price(dec("-0.01")).is_err());
    }
}
