use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Vehicle;

// Response de vehículo
#[derive(Debug, Serialize, Deserialize)]
pub struct VehicleResponse {
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

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            brand: vehicle.brand,
            model: vehicle.model,
            year: vehicle.year,
            registration: vehicle.registration,
            odometer_km: vehicle.odometer_km,
            daily_price: vehicle.daily_price,
            condition: vehicle.condition,
            vehicle_type: vehicle.vehicle_type,
            available: vehicle.available,
            defects: vehicle.defects,
            registered_at: vehicle.registered_at,
        }
    }
}

// Request para cambiar la disponibilidad
#[derive(Debug, Deserialize)]
pub struct AvailabilityRequest {
    pub available: bool,
}

// Query de coste de alquiler (?duration=N)
#[derive(Debug, Deserialize)]
pub struct RentalCostQuery {
    pub duration: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RentalCostResponse {
    pub vehicle_id: Uuid,
    pub registration: String,
    pub duration_days: u32,
    pub rental_cost: Decimal,
}
