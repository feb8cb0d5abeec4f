//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus variantes para CRUD operations.
//! La matrícula es el identificador de negocio; el `id` es el identificador técnico.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::config::rental::daily_cost;
use crate::utils::errors::AppResult;
use crate::utils::validation::{
    normalize_defects, normalize_registration, validate_non_negative, validate_not_blank,
    validate_registration,
};

/// Vehicle principal del parque de alquiler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub registration: String,
    pub odometer_km: u64,
    pub daily_price: Decimal,
    pub condition: String,
    pub vehicle_type: String,
    pub available: bool,
    pub defects: Vec<String>,
    pub registered_at: DateTime<Utc>,
}

impl Vehicle {
    /// Crea un vehículo disponible a partir de un request ya validado
    pub fn from_request(request: CreateVehicleRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            brand: request.brand.trim().to_string(),
            model: request.model.trim().to_string(),
            year: request.year,
            registration: normalize_registration(&request.registration),
            odometer_km: request.odometer_km,
            daily_price: request.daily_price,
            condition: request.condition.trim().to_string(),
            vehicle_type: request.vehicle_type.trim().to_string(),
            available: true,
            defects: normalize_defects(request.defects.unwrap_or_default()),
            registered_at: Utc::now(),
        }
    }

    /// Coste de alquiler sin seguro para una duración en días
    pub fn rental_cost(&self, duration_days: u32) -> AppResult<Decimal> {
        daily_cost(self.daily_price, duration_days)
    }

    /// Solicitud de alta equivalente, para volver a pasar por la validación
    pub fn to_request(&self) -> CreateVehicleRequest {
        CreateVehicleRequest {
            brand: self.brand.clone(),
            model: self.model.clone(),
            year: self.year,
            registration: self.registration.clone(),
            odometer_km: self.odometer_km,
            daily_price: self.daily_price,
            condition: self.condition.clone(),
            vehicle_type: self.vehicle_type.clone(),
            defects: Some(self.defects.clone()),
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.brand, self.model, self.registration)
    }

    /// Aplica los campos presentes de un update
    pub fn apply_update(&mut self, request: UpdateVehicleRequest) {
        if let Some(brand) = request.brand {
            self.brand = brand.trim().to_string();
        }
        if let Some(model) = request.model {
            self.model = model.trim().to_string();
        }
        if let Some(year) = request.year {
            self.year = year;
        }
        if let Some(odometer_km) = request.odometer_km {
            self.odometer_km = odometer_km;
        }
        if let Some(daily_price) = request.daily_price {
            self.daily_price = daily_price;
        }
        if let Some(condition) = request.condition {
            self.condition = condition.trim().to_string();
        }
        if let Some(vehicle_type) = request.vehicle_type {
            self.vehicle_type = vehicle_type.trim().to_string();
        }
        if let Some(defects) = request.defects {
            self.defects = normalize_defects(defects);
        }
    }
}

/// Request para registrar un nuevo vehículo
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub brand: String,

    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub model: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,

    #[validate(custom = "validate_registration")]
    pub registration: String,

    #[serde(default)]
    pub odometer_km: u64,

    #[validate(custom = "validate_non_negative")]
    pub daily_price: Decimal,

    #[validate(length(min = 1, max = 50))]
    pub condition: String,

    #[validate(length(min = 1, max = 50))]
    pub vehicle_type: String,

    pub defects: Option<Vec<String>>,
}

/// Request para actualizar un vehículo existente
///
/// La matrícula y la disponibilidad no se modifican por esta vía.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub model: Option<String>,

    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,

    pub odometer_km: Option<u64>,

    #[validate(custom = "validate_non_negative")]
    pub daily_price: Option<Decimal>,

    #[validate(length(min = 1, max = 50))]
    pub condition: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub vehicle_type: Option<String>,

    pub defects: Option<Vec<String>>,
}

/// Filtros para búsqueda de vehículos
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleFilters {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub available: Option<bool>,
    pub vehicle_type: Option<String>,
    pub max_price: Option<Decimal>,
}

impl VehicleFilters {
    /// Comparación de texto sin distinguir mayúsculas
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        fn same(expected: &Option<String>, actual: &str) -> bool {
            expected
                .as_deref()
                .map_or(true, |e| e.trim().to_lowercase() == actual.to_lowercase())
        }

        same(&self.brand, &vehicle.brand)
            && same(&self.model, &vehicle.model)
            && same(&self.vehicle_type, &vehicle.vehicle_type)
            && self.available.map_or(true, |a| a == vehicle.available)
            && self.max_price.map_or(true, |p| vehicle.daily_price <= p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateVehicleRequest {
        CreateVehicleRequest {
            brand: "Peugeot".to_string(),
            model: "208".to_string(),
            year: 2021,
            registration: "ab-123-cd".to_string(),
            odometer_km: 25_000,
            daily_price: Decimal::new(4500, 2),
            condition: "Bon état".to_string(),
            vehicle_type: "Voiture".to_string(),
            defects: Some(vec!["rayure".to_string()]),
        }
    }

    #[test]
    fn test_from_request_normalizes() {
        let vehicle = Vehicle::from_request(request());
        assert_eq!(vehicle.registration, "AB-123-CD");
        assert!(vehicle.available);
        assert_eq!(vehicle.defects, vec!["rayure".to_string()]);
    }

    #[test]
    fn test_create_request_validation() {
        assert!(request().validate().is_ok());

        let mut invalid = request();
        invalid.daily_price = Decimal::new(-100, 2);
        assert!(invalid.validate().is_err());

        let mut invalid = request();
        invalid.year = 1850;
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_rental_cost() {
        let vehicle = Vehicle::from_request(request());
        assert_eq!(vehicle.rental_cost(3).unwrap(), Decimal::new(13500, 2));

        let mut priceless = vehicle.clone();
        priceless.daily_price = Decimal::MAX;
        assert!(matches!(
            priceless.rental_cost(2).unwrap_err(),
            crate::utils::errors::AppError::InvalidPrice(_)
        ));
    }

    #[test]
    fn test_filters() {
        let vehicle = Vehicle::from_request(request());

        let filters = VehicleFilters {
            brand: Some("peugeot".to_string()),
            max_price: Some(Decimal::new(5000, 2)),
            ..Default::default()
        };
        assert!(filters.matches(&vehicle));

        let filters = VehicleFilters {
            available: Some(false),
            ..Default::default()
        };
        assert!(!filters.matches(&vehicle));
    }
}
