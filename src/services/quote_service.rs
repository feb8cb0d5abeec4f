//! Presupuestos (devis)

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Quote, Vehicle};
use crate::repositories::Repositories;
use crate::services::unit_of_work::transactional;
use crate::utils::clock::Clock;
use crate::utils::errors::{conflict_error, AppError, AppResult};
use crate::utils::validation::normalize_registration;

pub struct QuoteService {
    repos: Repositories,
    clock: Arc<dyn Clock>,
}

impl QuoteService {
    pub fn new(repos: Repositories, clock: Arc<dyn Clock>) -> Self {
        Self { repos, clock }
    }

    /// Propone un precio para un vehículo.
    ///
    /// Si la matrícula no está registrada, el vehículo se valida y se registra
    /// en el mismo paso bajo un id nuevo; si ya existe, el presupuesto apunta al
    /// registro existente. Un id ya usado por otra matrícula es un conflicto.
    pub fn propose(&self, vehicle: Option<&Vehicle>, price: Decimal) -> AppResult<Quote> {
        let vehicle = vehicle
            .ok_or_else(|| AppError::VehicleNotFound("no vehicle supplied for the quote".to_string()))?;
        if price < Decimal::ZERO {
            return Err(AppError::InvalidPrice(format!("{} is negative", price)));
        }

        let _guard = self.repos.exclusive();

        let registration = normalize_registration(&vehicle.registration);
        let known = self.repos.vehicles.get_by_registration(&registration)?;

        let (vehicle_id, new_vehicle) = match known {
            Some(existing) => (existing.id, None),
            None => {
                let new_vehicle = self.vehicle_to_register(vehicle)?;
                (new_vehicle.id, Some(new_vehicle))
            }
        };

        let quote = Quote {
            id: Uuid::new_v4(),
            vehicle_id,
            registration: registration.clone(),
            price,
            created_on: self.clock.today(),
        };

        transactional(&self.repos, |uow| {
            if let Some(new_vehicle) = &new_vehicle {
                uow.insert_vehicle(new_vehicle)?;
            }
            uow.insert_quote(&quote)
        })?;

        if let Some(new_vehicle) = &new_vehicle {
            info!("🚗 Vehículo registrado desde un presupuesto: {}", new_vehicle.display_name());
        }

        info!("💶 Presupuesto {} para {}: {}", quote.id, quote.registration, quote.price);
        Ok(quote)
    }

    pub fn get(&self, quote_id: Uuid) -> AppResult<Quote> {
        self.repos
            .quotes
            .get_by_id(quote_id)?
            .ok_or(AppError::QuoteNotFound(quote_id))
    }

    pub fn quotes_for(&self, registration: &str) -> AppResult<Vec<Quote>> {
        let registration = normalize_registration(registration);
        Ok(self.repos.quotes.find_by_registration(&registration)?)
    }

    pub fn list(&self) -> AppResult<Vec<Quote>> {
        Ok(self.repos.quotes.list()?)
    }

    /// Alta con las mismas reglas que el registro de vehículos, bajo un id nuevo
    fn vehicle_to_register(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        if let Some(existing) = self.repos.vehicles.get_by_id(vehicle.id)? {
            warn!(
                "🚫 El id {} ya pertenece a {}, no se reutiliza",
                vehicle.id,
                existing.display_name()
            );
            return Err(conflict_error("Vehicle", "id", &vehicle.id.to_string()));
        }

        let request = vehicle.to_request();
        request.validate()?;
        Ok(Vehicle::from_request(request))
    }
}
