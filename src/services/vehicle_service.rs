//! Registro de vehículos

use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::models::{CreateVehicleRequest, UpdateVehicleRequest, Vehicle, VehicleFilters};
use crate::repositories::Repositories;
use crate::utils::errors::{conflict_error, AppError, AppResult};
use crate::utils::validation::normalize_registration;

pub struct VehicleService {
    repos: Repositories,
}

impl VehicleService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub fn register(&self, request: CreateVehicleRequest) -> AppResult<Vehicle> {
        request.validate()?;

        let _guard = self.repos.exclusive();
        let vehicle = Vehicle::from_request(request);
        if self
            .repos
            .vehicles
            .get_by_registration(&vehicle.registration)?
            .is_some()
        {
            return Err(conflict_error("Vehicle", "registration", &vehicle.registration));
        }

        self.repos.vehicles.save(&vehicle)?;
        info!("🚗 Vehículo registrado: {}", vehicle.display_name());
        Ok(vehicle)
    }

    pub fn get(&self, id: Uuid) -> AppResult<Vehicle> {
        self.repos
            .vehicles
            .get_by_id(id)?
            .ok_or_else(|| AppError::VehicleNotFound(id.to_string()))
    }

    pub fn get_by_registration(&self, registration: &str) -> AppResult<Vehicle> {
        let registration = normalize_registration(registration);
        self.repos
            .vehicles
            .get_by_registration(&registration)?
            .ok_or(AppError::VehicleNotFound(registration))
    }

    pub fn list(&self) -> AppResult<Vec<Vehicle>> {
        Ok(self.repos.vehicles.list()?)
    }

    pub fn list_available(&self) -> AppResult<Vec<Vehicle>> {
        Ok(self.repos.vehicles.list_available()?)
    }

    pub fn search(&self, filters: &VehicleFilters) -> AppResult<Vec<Vehicle>> {
        Ok(self.repos.vehicles.search(filters)?)
    }

    pub fn update(&self, id: Uuid, request: UpdateVehicleRequest) -> AppResult<Vehicle> {
        request.validate()?;

        let _guard = self.repos.exclusive();
        let mut vehicle = self.get(id)?;
        vehicle.apply_update(request);
        self.repos.vehicles.save(&vehicle)?;

        info!("✏️ Vehículo actualizado: {}", vehicle.display_name());
        Ok(vehicle)
    }

    /// Marcar disponible un vehículo con contrato abierto es un conflicto
    pub fn set_availability(&self, id: Uuid, available: bool) -> AppResult<Vehicle> {
        let _guard = self.repos.exclusive();
        let mut vehicle = self.get(id)?;

        if available && self.has_open_contract(id)? {
            warn!("🚫 {} tiene un contrato abierto", vehicle.display_name());
            return Err(AppError::Conflict(format!(
                "vehicle {} has an open contract",
                vehicle.registration
            )));
        }

        if !self.repos.vehicles.set_availability(id, available)? {
            return Err(AppError::VehicleNotFound(id.to_string()));
        }
        vehicle.available = available;
        Ok(vehicle)
    }

    pub fn delete(&self, id: Uuid) -> AppResult<()> {
        let _guard = self.repos.exclusive();
        let vehicle = self.get(id)?;

        if self.has_open_contract(id)? {
            warn!("🚫 No se puede eliminar {}: contrato abierto", vehicle.display_name());
            return Err(AppError::Conflict(format!(
                "vehicle {} has an open contract",
                vehicle.registration
            )));
        }

        self.repos.vehicles.delete(id)?;
        info!("🗑️ Vehículo eliminado: {}", vehicle.display_name());
        Ok(())
    }

    /// Coste de alquiler sin seguro
    pub fn rental_cost(&self, id: Uuid, duration_days: u32) -> AppResult<Decimal> {
        if duration_days == 0 {
            return Err(AppError::InvalidDuration(
                "duration must be at least one day".to_string(),
            ));
        }
        self.get(id)?.rental_cost(duration_days)
    }

    fn has_open_contract(&self, vehicle_id: Uuid) -> AppResult<bool> {
        Ok(self
            .repos
            .contracts
            .find_by_vehicle(vehicle_id)?
            .iter()
            .any(|c| !c.is_closed()))
    }
}
