//! Repositorios
//!
//! Cada entidad tiene un trait de almacenamiento y una implementación en
//! memoria. Los repositorios se construyen una vez al arrancar y se comparten
//! por `Arc` a través de [`Repositories`]; no hay instancias globales.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use thiserror::Error;
use uuid::Uuid;

pub mod client_repository;
pub mod contract_repository;
pub mod insurance_repository;
pub mod quote_repository;
pub mod vehicle_repository;

pub use client_repository::{ClientRepository, InMemoryClientRepository};
pub use contract_repository::{ContractRepository, InMemoryContractRepository};
pub use insurance_repository::{InMemoryInsuranceRepository, InsuranceRepository};
pub use quote_repository::{InMemoryQuoteRepository, QuoteRepository};
pub use vehicle_repository::{InMemoryVehicleRepository, VehicleRepository};

/// Errores de la capa de almacenamiento
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("failed to save {entity}: {source}")]
    SaveFailed {
        entity: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{0} store lock poisoned")]
    Poisoned(&'static str),
}

impl RepositoryError {
    pub fn save_failed(
        entity: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RepositoryError::SaveFailed {
            entity,
            source: Box::new(source),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Tabla en memoria indexada por id
pub(crate) struct MemoryTable<V> {
    name: &'static str,
    rows: RwLock<HashMap<Uuid, V>>,
}

impl<V: Clone> MemoryTable<V> {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            rows: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) fn get(&self, id: Uuid) -> RepositoryResult<Option<V>> {
        let rows = self.rows.read().map_err(|_| RepositoryError::Poisoned(self.name))?;
        Ok(rows.get(&id).cloned())
    }

    pub(crate) fn find<F>(&self, predicate: F) -> RepositoryResult<Vec<V>>
    where
        F: Fn(&V) -> bool,
    {
        let rows = self.rows.read().map_err(|_| RepositoryError::Poisoned(self.name))?;
        Ok(rows.values().filter(|row| predicate(*row)).cloned().collect())
    }

    pub(crate) fn find_one<F>(&self, predicate: F) -> RepositoryResult<Option<V>>
    where
        F: Fn(&V) -> bool,
    {
        let rows = self.rows.read().map_err(|_| RepositoryError::Poisoned(self.name))?;
        Ok(rows.values().find(|row| predicate(*row)).cloned())
    }

    pub(crate) fn upsert(&self, id: Uuid, value: V) -> RepositoryResult<()> {
        let mut rows = self.rows.write().map_err(|_| RepositoryError::Poisoned(self.name))?;
        rows.insert(id, value);
        Ok(())
    }

    pub(crate) fn update<F>(&self, id: Uuid, apply: F) -> RepositoryResult<bool>
    where
        F: FnOnce(&mut V),
    {
        let mut rows = self.rows.write().map_err(|_| RepositoryError::Poisoned(self.name))?;
        match rows.get_mut(&id) {
            Some(row) => {
                apply(row);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub(crate) fn remove(&self, id: Uuid) -> RepositoryResult<bool> {
        let mut rows = self.rows.write().map_err(|_| RepositoryError::Poisoned(self.name))?;
        Ok(rows.remove(&id).is_some())
    }
}

/// Conjunto de repositorios compartido por los servicios
#[derive(Clone)]
pub struct Repositories {
    pub vehicles: Arc<dyn VehicleRepository>,
    pub clients: Arc<dyn ClientRepository>,
    pub insurances: Arc<dyn InsuranceRepository>,
    pub contracts: Arc<dyn ContractRepository>,
    pub quotes: Arc<dyn QuoteRepository>,
    write_lock: Arc<Mutex<()>>,
}

impl Repositories {
    pub fn new(
        vehicles: Arc<dyn VehicleRepository>,
        clients: Arc<dyn ClientRepository>,
        insurances: Arc<dyn InsuranceRepository>,
        contracts: Arc<dyn ContractRepository>,
        quotes: Arc<dyn QuoteRepository>,
    ) -> Self {
        Self {
            vehicles,
            clients,
            insurances,
            contracts,
            quotes,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryVehicleRepository::new()),
            Arc::new(InMemoryClientRepository::new()),
            Arc::new(InMemoryInsuranceRepository::new()),
            Arc::new(InMemoryContractRepository::new()),
            Arc::new(InMemoryQuoteRepository::new()),
        )
    }

    /// Serializa las operaciones que leen, verifican y escriben varias entidades
    pub(crate) fn exclusive(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_table_crud() {
        let table: MemoryTable<String> = MemoryTable::new("names");
        let id = Uuid::new_v4();

        table.upsert(id, "Clio".to_string()).unwrap();
        assert_eq!(table.get(id).unwrap(), Some("Clio".to_string()));

        assert!(table.update(id, |name| name.push_str(" V")).unwrap());
        assert_eq!(table.find_one(|n| n.starts_with("Clio")).unwrap(), Some("Clio V".to_string()));

        assert!(table.remove(id).unwrap());
        assert!(!table.remove(id).unwrap());
        assert!(!table.update(id, |_| {}).unwrap());
    }

    #[test]
    fn test_save_failed_keeps_source() {
        use std::error::Error;

        let err = RepositoryError::save_failed(
            "contract",
            std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        );
        assert_eq!(err.source().map(|s| s.to_string()), Some("disk full".to_string()));
    }
}
