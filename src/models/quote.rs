//! Modelo de Quote (devis)
//!
//! Propuesta de precio para un vehículo, independiente de los contratos.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub registration: String,
    pub price: Decimal,
    pub created_on: NaiveDate,
}
