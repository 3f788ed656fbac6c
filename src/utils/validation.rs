//! Utilidades de validación
//!
//! Funciones helper para validar campos obligatorios, convertir fechas
//! ISO-8601 y normalizar los rechazos de extracción de axum.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Json, Path, Query};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::utils::errors::{validation_error, AppError, AppResult};

/// Devuelve el valor si está presente y no vacío
pub fn required<'a>(value: &'a Option<String>, field: &str) -> AppResult<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(validation_error(format!("Missing required field: {}", field))),
    }
}

/// Verifica una lista de campos obligatorios y reporta todos los que faltan
pub fn require_all(fields: &[(&str, &Option<String>)]) -> AppResult<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(validation_error(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// Convierte un string ISO-8601 a timestamp UTC.
///
/// Acepta RFC 3339 completo (`2025-01-10T09:00:00Z`), fecha-hora sin zona
/// (interpretada como UTC) y fecha simple (`2025-01-10`, medianoche UTC).
pub fn parse_timestamp(value: &str, field: &str) -> AppResult<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    Err(validation_error(format!(
        "Invalid date for {}: expected an ISO-8601 date",
        field
    )))
}

/// Campo obligatorio convertido a timestamp
pub fn required_timestamp(value: &Option<String>, field: &str) -> AppResult<DateTime<Utc>> {
    parse_timestamp(required(value, field)?, field)
}

/// Normaliza el body JSON: cualquier rechazo se reporta como 400
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::Validation(format!("Invalid request body: {}", rejection.body_text())))
}

/// Normaliza los parámetros de ruta
pub fn path_param<T>(path: Result<Path<T>, PathRejection>) -> AppResult<T> {
    path.map(|Path(value)| value)
        .map_err(|rejection| AppError::Validation(format!("Invalid path parameter: {}", rejection.body_text())))
}

/// Normaliza los parámetros de query
pub fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> AppResult<T> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| AppError::Validation(format!("Invalid query string: {}", rejection.body_text())))
}
