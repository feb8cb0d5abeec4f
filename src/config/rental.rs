//! Política de alquiler
//!
//! Tasas de caución y de penalización por defectos nuevos. Los valores por
//! defecto son la regla canónica: caución = 10% del coste, penalización del
//! 10% de la caución por defecto nuevo (5% si hay seguro), tope = caución.

use std::env;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::contract::Pricing;
use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RentalPolicy {
    pub deposit_rate: Decimal,
    pub penalty_rate: Decimal,
    pub insured_penalty_rate: Decimal,
}

impl Default for RentalPolicy {
    fn default() -> Self {
        Self {
            deposit_rate: Decimal::new(10, 2),
            penalty_rate: Decimal::new(10, 2),
            insured_penalty_rate: Decimal::new(5, 2),
        }
    }
}

impl RentalPolicy {
    /// Carga la política desde variables de entorno, con los valores por defecto como fallback
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            deposit_rate: rate_from_env("RENTAL_DEPOSIT_RATE", defaults.deposit_rate)?,
            penalty_rate: rate_from_env("RENTAL_PENALTY_RATE", defaults.penalty_rate)?,
            insured_penalty_rate: rate_from_env(
                "RENTAL_INSURED_PENALTY_RATE",
                defaults.insured_penalty_rate,
            )?,
        })
    }

    /// Coste total y caución para una duración y un seguro opcional
    ///
    /// Un importe que no cabe en un `Decimal` es un precio inválido.
    pub fn pricing(
        &self,
        daily_price: Decimal,
        insurance_daily_rate: Option<Decimal>,
        duration_days: u32,
    ) -> AppResult<Pricing> {
        let days = Decimal::from(duration_days);
        let rental_cost = daily_cost(daily_price, duration_days)?;
        let insurance_cost = match insurance_daily_rate {
            Some(rate) => rate
                .checked_mul(days)
                .ok_or_else(|| overflow("insurance cost"))?,
            None => Decimal::ZERO,
        };
        let total_cost = rental_cost
            .checked_add(insurance_cost)
            .ok_or_else(|| overflow("total cost"))?;
        let deposit = total_cost
            .checked_mul(self.deposit_rate)
            .ok_or_else(|| overflow("deposit"))?;

        Ok(Pricing {
            rental_cost,
            insurance_cost,
            total_cost,
            deposit: round_cents(deposit),
        })
    }

    pub fn penalty_rate(&self, insured: bool) -> Decimal {
        if insured {
            self.insured_penalty_rate
        } else {
            self.penalty_rate
        }
    }

    /// Importe retenido de la caución: lineal por defecto nuevo, con tope en la caución
    pub fn withheld_deposit(&self, deposit: Decimal, insured: bool, new_defects: usize) -> Decimal {
        if new_defects == 0 {
            return Decimal::ZERO;
        }
        // Una penalización que desborda supera de sobra la caución: se aplica el tope
        deposit
            .checked_mul(self.penalty_rate(insured))
            .and_then(|per_defect| per_defect.checked_mul(Decimal::from(new_defects)))
            .map_or(deposit, |penalty| round_cents(penalty).min(deposit))
    }
}

/// Precio diario por número de días, sin desbordar
pub fn daily_cost(daily_price: Decimal, duration_days: u32) -> AppResult<Decimal> {
    daily_price
        .checked_mul(Decimal::from(duration_days))
        .ok_or_else(|| overflow("rental cost"))
}

fn overflow(what: &str) -> AppError {
    AppError::InvalidPrice(format!("{} overflows the supported amount range", what))
}

/// Redondeo monetario a céntimos
///
/// Caución y retención se redondean a céntimos, el producto exacto no se
/// conserva: una caución de 0.15 con un defecto asegurado retiene 0.01, no 0.0075.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn rate_from_env(key: &str, default: Decimal) -> AppResult<Decimal> {
    match env::var(key) {
        Ok(raw) => {
            let rate = Decimal::from_str(raw.trim())
                .map_err(|e| AppError::Configuration(format!("{} must be a decimal: {}", key, e)))?;
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(AppError::Configuration(format!(
                    "{} must be between 0 and 1, got {}",
                    key, rate
                )));
            }
            Ok(rate)
        }
        Err(_) => Ok(default),
    }
}
