use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::contract::Contract;

use super::{MemoryTable, RepositoryResult};

/// Almacenamiento de contratos
pub trait ContractRepository: Send + Sync {
    fn get_by_id(&self, id: Uuid) -> RepositoryResult<Option<Contract>>;

    fn list(&self) -> RepositoryResult<Vec<Contract>>;

    fn save(&self, contract: &Contract) -> RepositoryResult<()>;

    /// Solo se usa para deshacer una creación fallida
    fn delete(&self, id: Uuid) -> RepositoryResult<bool>;

    fn find_by_client(&self, client_id: Uuid) -> RepositoryResult<Vec<Contract>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|c| c.client_id() == client_id)
            .collect())
    }

    fn find_by_vehicle(&self, vehicle_id: Uuid) -> RepositoryResult<Vec<Contract>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|c| c.vehicle_id() == vehicle_id)
            .collect())
    }

    /// Contratos abiertos cuyo periodo contiene `date`
    fn find_active_on_date(&self, date: NaiveDate) -> RepositoryResult<Vec<Contract>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|c| c.is_active_on(date))
            .collect())
    }

    /// Contrato abierto para el par (cliente, vehículo)
    fn find_open_for(&self, client_id: Uuid, vehicle_id: Uuid) -> RepositoryResult<Option<Contract>> {
        Ok(self.find_by_vehicle(vehicle_id)?.into_iter().find(|c| {
            c.client_id() == client_id && !c.is_closed()
        }))
    }
}

pub struct InMemoryContractRepository {
    table: MemoryTable<Contract>,
}

impl InMemoryContractRepository {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new("contracts"),
        }
    }
}

impl Default for InMemoryContractRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractRepository for InMemoryContractRepository {
    fn get_by_id(&self, id: Uuid) -> RepositoryResult<Option<Contract>> {
        self.table.get(id)
    }

    fn list(&self) -> RepositoryResult<Vec<Contract>> {
        let mut contracts = self.table.find(|_| true)?;
        contracts.sort_by_key(|c| (c.start_date(), c.signed_at()));
        Ok(contracts)
    }

    fn save(&self, contract: &Contract) -> RepositoryResult<()> {
        self.table.upsert(contract.id(), contract.clone())
    }

    fn delete(&self, id: Uuid) -> RepositoryResult<bool> {
        self.table.remove(id)
    }

    fn find_by_vehicle(&self, vehicle_id: Uuid) -> RepositoryResult<Vec<Contract>> {
        let mut contracts = self.table.find(|c| c.vehicle_id() == vehicle_id)?;
        contracts.sort_by_key(|c| (c.start_date(), c.signed_at()));
        Ok(contracts)
    }
}
