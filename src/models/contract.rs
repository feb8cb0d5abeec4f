//! Modelo de ContractLocation
//!
//! Ciclo de vida: `ContractDraft` (validado y tarificado, aún sin guardar)
//! → `Contract` en fase `Open` → fase `Closed` tras la restitución.
//! Los campos son privados: la única mutación posible es [`Contract::close`],
//! y los datos de retorno solo existen en la variante `Closed`.

use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::rental::RentalPolicy;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::normalize_defects;

/// Desglose del coste de un alquiler
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    pub rental_cost: Decimal,
    pub insurance_cost: Decimal,
    pub total_cost: Decimal,
    pub deposit: Decimal,
}

/// Datos constatados al cerrar un contrato
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnReport {
    pub return_date: NaiveDate,
    pub return_odometer_km: u64,
    pub return_defects: Vec<String>,
    pub new_defects: Vec<String>,
    pub withheld_deposit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ContractPhase {
    Open,
    Closed(ReturnReport),
}

/// Contrato validado y tarificado, pendiente de firma
#[derive(Debug, Clone, PartialEq)]
pub struct ContractDraft {
    pub client_id: Uuid,
    pub vehicle_id: Uuid,
    pub insurance_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub duration_days: u32,
    pub pricing: Pricing,
    pub start_odometer_km: u64,
    pub initial_condition: String,
    pub initial_defects: Vec<String>,
}

impl ContractDraft {
    /// Firma el borrador: asigna identificador y abre el contrato
    pub fn sign(self) -> Contract {
        Contract {
            id: Uuid::new_v4(),
            client_id: self.client_id,
            vehicle_id: self.vehicle_id,
            insurance_id: self.insurance_id,
            start_date: self.start_date,
            duration_days: self.duration_days,
            deposit: self.pricing.deposit,
            total_cost: self.pricing.total_cost,
            start_odometer_km: self.start_odometer_km,
            initial_condition: self.initial_condition,
            initial_defects: normalize_defects(self.initial_defects),
            signed_at: Utc::now(),
            phase: ContractPhase::Open,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    id: Uuid,
    client_id: Uuid,
    vehicle_id: Uuid,
    insurance_id: Option<Uuid>,
    start_date: NaiveDate,
    duration_days: u32,
    deposit: Decimal,
    total_cost: Decimal,
    start_odometer_km: u64,
    initial_condition: String,
    initial_defects: Vec<String>,
    signed_at: DateTime<Utc>,
    phase: ContractPhase,
}

impl Contract {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn client_id(&self) -> Uuid {
        self.client_id
    }

    pub fn vehicle_id(&self) -> Uuid {
        self.vehicle_id
    }

    pub fn insurance_id(&self) -> Option<Uuid> {
        self.insurance_id
    }

    pub fn is_insured(&self) -> bool {
        self.insurance_id.is_some()
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn duration_days(&self) -> u32 {
        self.duration_days
    }

    pub fn deposit(&self) -> Decimal {
        self.deposit
    }

    pub fn total_cost(&self) -> Decimal {
        self.total_cost
    }

    pub fn start_odometer_km(&self) -> u64 {
        self.start_odometer_km
    }

    pub fn initial_condition(&self) -> &str {
        &self.initial_condition
    }

    pub fn initial_defects(&self) -> &[String] {
        &self.initial_defects
    }

    pub fn signed_at(&self) -> DateTime<Utc> {
        self.signed_at
    }

    pub fn phase(&self) -> &ContractPhase {
        &self.phase
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.phase, ContractPhase::Closed(_))
    }

    pub fn return_report(&self) -> Option<&ReturnReport> {
        match &self.phase {
            ContractPhase::Closed(report) => Some(report),
            ContractPhase::Open => None,
        }
    }

    /// Fecha de fin prevista (exclusiva): `start_date + duration_days`,
    /// saturada en `NaiveDate::MAX`
    pub fn expected_end_date(&self) -> NaiveDate {
        self.start_date
            .checked_add_days(Days::new(u64::from(self.duration_days)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// El periodo `[start, end)` del contrato contiene `date`
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date < self.expected_end_date()
    }

    /// Contrato abierto cuyo periodo contiene `date`
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        !self.is_closed() && self.covers(date)
    }

    /// Solapamiento con el periodo semiabierto `[start, end)`
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date < end && start < self.expected_end_date()
    }

    /// Contrato abierto cuya fecha de fin prevista ya pasó
    pub fn is_overdue(&self, on: NaiveDate) -> bool {
        !self.is_closed() && on > self.expected_end_date()
    }

    /// Defectos constatados al retorno que no figuraban al inicio
    pub fn new_defects(&self, return_defects: &[String]) -> Vec<String> {
        normalize_defects(return_defects)
            .into_iter()
            .filter(|defect| !self.initial_defects.contains(defect))
            .collect()
    }

    /// Registra la restitución y cierra el contrato.
    ///
    /// Devuelve el importe retenido de la caución. Falla si el contrato ya está
    /// cerrado, si la fecha de retorno es anterior al inicio o si el
    /// kilometraje de retorno es inferior al de salida. En caso de error el
    /// contrato no cambia.
    pub fn close(
        &mut self,
        return_date: NaiveDate,
        return_odometer_km: u64,
        return_defects: &[String],
        policy: &RentalPolicy,
    ) -> AppResult<Decimal> {
        if self.is_closed() {
            return Err(AppError::ContractAlreadyClosed(self.id));
        }
        if return_date < self.start_date {
            return Err(AppError::InvalidReturnData(format!(
                "return date {} is before start date {}",
                return_date, self.start_date
            )));
        }
        if return_odometer_km < self.start_odometer_km {
            return Err(AppError::InvalidReturnData(format!(
                "return odometer {} km is below start odometer {} km",
                return_odometer_km, self.start_odometer_km
            )));
        }

        let new_defects = self.new_defects(return_defects);
        let withheld_deposit =
            policy.withheld_deposit(self.deposit, self.is_insured(), new_defects.len());

        self.phase = ContractPhase::Closed(ReturnReport {
            return_date,
            return_odometer_km,
            return_defects: normalize_defects(return_defects),
            new_defects,
            withheld_deposit,
        });

        Ok(withheld_deposit)
    }
}
