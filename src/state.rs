//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Los repositorios y los servicios se construyen
//! una sola vez al arrancar.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::Repositories;
use crate::services::{
    ClientService, ContractService, InsuranceService, QuoteService, RestitutionService,
    VehicleService,
};
use crate::utils::clock::{Clock, SystemClock};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub repositories: Repositories,
    pub vehicles: Arc<VehicleService>,
    pub clients: Arc<ClientService>,
    pub insurances: Arc<InsuranceService>,
    pub contracts: Arc<ContractService>,
    pub restitutions: Arc<RestitutionService>,
    pub quotes: Arc<QuoteService>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, repositories: Repositories, clock: Arc<dyn Clock>) -> Self {
        let contracts = Arc::new(ContractService::new(
            repositories.clone(),
            config.rental,
            clock.clone(),
        ));

        Self {
            vehicles: Arc::new(VehicleService::new(repositories.clone())),
            clients: Arc::new(ClientService::new(repositories.clone())),
            insurances: Arc::new(InsuranceService::new(repositories.clone())),
            restitutions: Arc::new(RestitutionService::new(
                repositories.clone(),
                contracts.clone(),
                clock.clone(),
            )),
            quotes: Arc::new(QuoteService::new(repositories.clone(), clock)),
            contracts,
            repositories,
            config,
        }
    }

    /// Estado con almacenamiento en memoria y reloj del sistema
    pub fn in_memory(config: EnvironmentConfig) -> Self {
        Self::new(config, Repositories::in_memory(), Arc::new(SystemClock))
    }
}
