//! Modelo de Client
//!
//! Un cliente referencia los vehículos que tiene alquilados; no es dueño
//! de ellos (el vehículo es estado compartido del registro de vehículos).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::{validate_not_blank, validate_phone};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub last_name: String,
    pub first_name: String,
    pub license_number: String,
    pub phone: String,
    pub email: String,
    pub active_rentals: Vec<Uuid>,
    pub registered_at: DateTime<Utc>,
}

impl Client {
    pub fn from_request(request: CreateClientRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            last_name: request.last_name.trim().to_string(),
            first_name: request.first_name.trim().to_string(),
            license_number: request.license_number.trim().to_uppercase(),
            phone: request.phone.trim().to_string(),
            email: request.email.trim().to_lowercase(),
            active_rentals: Vec::new(),
            registered_at: Utc::now(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn has_rented(&self, vehicle_id: Uuid) -> bool {
        self.active_rentals.contains(&vehicle_id)
    }

    /// Añade el vehículo a los alquileres en curso (sin duplicar)
    pub fn start_rental(&mut self, vehicle_id: Uuid) {
        if !self.has_rented(vehicle_id) {
            self.active_rentals.push(vehicle_id);
        }
    }

    /// Retira el vehículo; devuelve `false` si no estaba alquilado
    pub fn end_rental(&mut self, vehicle_id: Uuid) -> bool {
        let before = self.active_rentals.len();
        self.active_rentals.retain(|id| *id != vehicle_id);
        self.active_rentals.len() != before
    }
}

/// Request para registrar un cliente
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateClientRequest {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub last_name: String,

    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub first_name: String,

    #[validate(length(min = 5, max = 30), custom = "validate_not_blank")]
    pub license_number: String,

    #[validate(custom = "validate_phone")]
    pub phone: String,

    #[validate(email)]
    pub email: String,
}
