//! Restitución de vehículos
//!
//! Cierra el contrato abierto del par (cliente, vehículo), actualiza el
//! vehículo con el kilometraje, estado y defectos constatados, y lo retira de
//! los alquileres activos del cliente. Las tres escrituras se deshacen juntas.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{Contract, Vehicle, VehicleCondition};
use crate::repositories::Repositories;
use crate::services::contract_service::ContractService;
use crate::services::unit_of_work::transactional;
use crate::utils::clock::Clock;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::normalize_defects;

/// Datos constatados al devolver un vehículo
#[derive(Debug, Clone, Deserialize)]
pub struct ReturnRequest {
    pub client_id: Uuid,
    pub vehicle_id: Uuid,
    pub km_driven: u64,
    /// Nickel, Sale, Endommagé o Volé (o sus alias)
    pub condition: String,
    /// Ausente: se conservan los defectos conocidos del vehículo
    #[serde(default)]
    pub defects: Option<Vec<String>>,
}

/// Resultado de una restitución
#[derive(Debug, Clone, Serialize)]
pub struct RestitutionReceipt {
    pub vehicle: Vehicle,
    pub contract: Contract,
    pub withheld_deposit: Decimal,
}

pub struct RestitutionService {
    repos: Repositories,
    contracts: Arc<ContractService>,
    clock: Arc<dyn Clock>,
}

impl RestitutionService {
    pub fn new(repos: Repositories, contracts: Arc<ContractService>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repos,
            contracts,
            clock,
        }
    }

    pub fn restitute(&self, request: ReturnRequest) -> AppResult<RestitutionReceipt> {
        let _guard = self.repos.exclusive();

        let client = self
            .repos
            .clients
            .get_by_id(request.client_id)?
            .ok_or(AppError::ClientNotFound(request.client_id))?;
        let vehicle = self
            .repos
            .vehicles
            .get_by_id(request.vehicle_id)?
            .ok_or_else(|| AppError::VehicleNotFound(request.vehicle_id.to_string()))?;

        if !client.has_rented(vehicle.id) {
            warn!(
                "🚫 {} no figura entre los alquileres de {}",
                vehicle.display_name(),
                client.full_name()
            );
            return Err(AppError::VehicleNotRentedByClient {
                client_id: client.id,
                vehicle_id: vehicle.id,
            });
        }

        let condition: VehicleCondition = request.condition.parse()?;

        let contract = self
            .repos
            .contracts
            .find_open_for(client.id, vehicle.id)?
            .ok_or_else(|| {
                AppError::ContractNotFound(format!(
                    "no open contract for client {} and vehicle {}",
                    client.id, vehicle.id
                ))
            })?;

        let return_odometer_km = vehicle
            .odometer_km
            .checked_add(request.km_driven)
            .ok_or_else(|| {
                AppError::InvalidReturnData(format!(
                    "{} km driven overflows the odometer",
                    request.km_driven
                ))
            })?;
        let return_defects = match request.defects {
            Some(defects) => normalize_defects(defects),
            None => vehicle.defects.clone(),
        };

        let (closed, withheld_deposit) = self.contracts.closed_copy(
            &contract,
            self.clock.today(),
            return_odometer_km,
            &return_defects,
        )?;

        let mut returned = vehicle.clone();
        returned.odometer_km = return_odometer_km;
        returned.condition = condition.label().to_string();
        returned.defects = return_defects;
        returned.available = condition.keeps_vehicle_available();

        let mut updated_client = client.clone();
        updated_client.end_rental(vehicle.id);

        transactional(&self.repos, |uow| {
            uow.update_contract(&contract, &closed)?;
            uow.update_vehicle(&vehicle, &returned)?;
            uow.update_client(&client, &updated_client)
        })?;

        if returned.available {
            info!(
                "🔙 {} restituido por {} ({}), retenido {}",
                returned.display_name(),
                client.full_name(),
                condition,
                withheld_deposit
            );
        } else {
            warn!(
                "🚨 {} declarado {}, queda fuera del parque disponible",
                returned.display_name(),
                condition
            );
        }

        Ok(RestitutionReceipt {
            vehicle: returned,
            contract: closed,
            withheld_deposit,
        })
    }
}
