//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! usadas desde los `#[validate(custom = ...)]` de los requests.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

lazy_static! {
    /// Matrícula normalizada: bloques alfanuméricos separados por guiones (ej: AB-123-CD)
    static ref REGISTRATION_REGEX: Regex = Regex::new(r"^[A-Z0-9]+(-[A-Z0-9]+)*$").unwrap();
    /// Teléfono: dígitos con separadores opcionales y prefijo internacional
    static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9][0-9 .\-]{8,18}[0-9]$").unwrap();
}

/// Normaliza una matrícula: mayúsculas, sin espacios extremos, espacios internos como guiones
pub fn normalize_registration(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_uppercase()
}

/// Validar formato de matrícula (después de normalizar)
pub fn validate_registration(value: &str) -> Result<(), ValidationError> {
    let normalized = normalize_registration(value);
    let len = normalized.chars().count();
    if !(2..=20).contains(&len) || !REGISTRATION_REGEX.is_match(&normalized) {
        let mut error = ValidationError::new("registration");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if !PHONE_REGEX.is_match(value.trim()) || !(10..=15).contains(&digits) {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un importe no sea negativo
pub fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        let mut error = ValidationError::new("non_negative");
        error.add_param("actual".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Limpia una lista de defectos: recorta, descarta vacíos y duplicados, conserva el orden
pub fn normalize_defects<I, S>(defects: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cleaned: Vec<String> = Vec::new();
    for defect in defects {
        let defect = defect.as_ref().trim();
        if !defect.is_empty() && !cleaned.iter().any(|d| d == defect) {
            cleaned.push(defect.to_string());
        }
    }
    cleaned
}
