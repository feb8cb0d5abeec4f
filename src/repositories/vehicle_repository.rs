use uuid::Uuid;

use crate::models::vehicle::{Vehicle, VehicleFilters};

use super::{MemoryTable, RepositoryResult};

/// Almacenamiento de vehículos
pub trait VehicleRepository: Send + Sync {
    fn get_by_id(&self, id: Uuid) -> RepositoryResult<Option<Vehicle>>;

    /// Búsqueda por matrícula normalizada
    fn get_by_registration(&self, registration: &str) -> RepositoryResult<Option<Vehicle>>;

    fn list(&self) -> RepositoryResult<Vec<Vehicle>>;

    fn save(&self, vehicle: &Vehicle) -> RepositoryResult<()>;

    /// Devuelve `false` si el vehículo no existe
    fn set_availability(&self, id: Uuid, available: bool) -> RepositoryResult<bool>;

    fn delete(&self, id: Uuid) -> RepositoryResult<bool>;

    fn list_available(&self) -> RepositoryResult<Vec<Vehicle>> {
        Ok(self.list()?.into_iter().filter(|v| v.available).collect())
    }

    fn search(&self, filters: &VehicleFilters) -> RepositoryResult<Vec<Vehicle>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|v| filters.matches(v))
            .collect())
    }
}

pub struct InMemoryVehicleRepository {
    table: MemoryTable<Vehicle>,
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new("vehicles"),
        }
    }
}

impl Default for InMemoryVehicleRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl VehicleRepository for InMemoryVehicleRepository {
    fn get_by_id(&self, id: Uuid) -> RepositoryResult<Option<Vehicle>> {
        self.table.get(id)
    }

    fn get_by_registration(&self, registration: &str) -> RepositoryResult<Option<Vehicle>> {
        self.table.find_one(|v| v.registration == registration)
    }

    fn list(&self) -> RepositoryResult<Vec<Vehicle>> {
        let mut vehicles = self.table.find(|_| true)?;
        vehicles.sort_by(|a, b| a.registration.cmp(&b.registration));
        Ok(vehicles)
    }

    fn save(&self, vehicle: &Vehicle) -> RepositoryResult<()> {
        self.table.upsert(vehicle.id, vehicle.clone())
    }

    fn set_availability(&self, id: Uuid, available: bool) -> RepositoryResult<bool> {
        self.table.update(id, |v| v.available = available)
    }

    fn delete(&self, id: Uuid) -> RepositoryResult<bool> {
        self.table.remove(id)
    }
}
