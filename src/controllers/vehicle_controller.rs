use std::sync::Arc;

use uuid::Uuid;

use crate::dto::vehicle_dto::{RentalCostResponse, VehicleResponse};
use crate::dto::ApiResponse;
use crate::models::{CreateVehicleRequest, UpdateVehicleRequest, VehicleFilters};
use crate::services::VehicleService;
use crate::utils::errors::AppError;

pub struct VehicleController {
    service: Arc<VehicleService>,
}

impl VehicleController {
    pub fn new(service: Arc<VehicleService>) -> Self {
        Self { service }
    }

    pub fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let vehicle = self.service.register(request)?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub fn get_by_id(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        Ok(self.service.get(id)?.into())
    }

    pub fn list(&self) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.service.list()?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub fn list_available(&self) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.service.list_available()?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub fn search(&self, filters: &VehicleFilters) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.service.search(filters)?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let vehicle = self.service.update(id, request)?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub fn set_availability(
        &self,
        id: Uuid,
        available: bool,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let vehicle = self.service.set_availability(id, available)?;
        Ok(ApiResponse::success(vehicle.into()))
    }

    pub fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.service.delete(id)
    }

    pub fn rental_cost(&self, id: Uuid, duration_days: u32) -> Result<RentalCostResponse, AppError> {
        let rental_cost = self.service.rental_cost(id, duration_days)?;
        let vehicle = self.service.get(id)?;

        Ok(RentalCostResponse {
            vehicle_id: vehicle.id,
            registration: vehicle.registration,
            duration_days,
            rental_cost,
        })
    }
}
