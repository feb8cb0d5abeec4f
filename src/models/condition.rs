//! Estado de un vehículo constatado en la restitución

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleCondition {
    /// Impecable
    Nickel,
    /// Sucio
    Dirty,
    /// Dañado
    Damaged,
    /// Robado
    Stolen,
}

impl VehicleCondition {
    /// Etiqueta canónica guardada en el vehículo
    pub fn label(self) -> &'static str {
        match self {
            VehicleCondition::Nickel => "Nickel",
            VehicleCondition::Dirty => "Sale",
            VehicleCondition::Damaged => "Endommagé",
            VehicleCondition::Stolen => "Volé",
        }
    }

    /// Un vehículo robado no vuelve al parque disponible
    pub fn keeps_vehicle_available(self) -> bool {
        !matches!(self, VehicleCondition::Stolen)
    }
}

impl fmt::Display for VehicleCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VehicleCondition {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nickel" | "clean" => Ok(VehicleCondition::Nickel),
            "sale" | "dirty" => Ok(VehicleCondition::Dirty),
            "endommagé" | "endommage" | "damaged" => Ok(VehicleCondition::Damaged),
            "volé" | "vole" | "stolen" => Ok(VehicleCondition::Stolen),
            _ => Err(AppError::UnrecognizedCondition(s.to_string())),
        }
    }
}
