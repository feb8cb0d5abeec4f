//! Modelo de Insurance (inmutable una vez creado)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::{validate_non_negative, validate_not_blank};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insurance {
    id: Uuid,
    name: String,
    daily_rate: Decimal,
}

impl Insurance {
    pub fn from_request(request: CreateInsuranceRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
            daily_rate: request.daily_rate,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn daily_rate(&self) -> Decimal {
        self.daily_rate
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInsuranceRequest {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub name: String,

    #[validate(custom = "validate_non_negative")]
    pub daily_rate: Decimal,
}
