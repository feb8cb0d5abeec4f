use uuid::Uuid;

use crate::models::insurance::Insurance;

use super::{MemoryTable, RepositoryResult};

/// Almacenamiento de seguros
pub trait InsuranceRepository: Send + Sync {
    fn get_by_id(&self, id: Uuid) -> RepositoryResult<Option<Insurance>>;

    fn find_by_name(&self, name: &str) -> RepositoryResult<Vec<Insurance>>;

    fn list(&self) -> RepositoryResult<Vec<Insurance>>;

    fn save(&self, insurance: &Insurance) -> RepositoryResult<()>;
}

pub struct InMemoryInsuranceRepository {
    table: MemoryTable<Insurance>,
}

impl InMemoryInsuranceRepository {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new("insurances"),
        }
    }
}

impl Default for InMemoryInsuranceRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InsuranceRepository for InMemoryInsuranceRepository {
    fn get_by_id(&self, id: Uuid) -> RepositoryResult<Option<Insurance>> {
        self.table.get(id)
    }

    fn find_by_name(&self, name: &str) -> RepositoryResult<Vec<Insurance>> {
        let needle = name.trim().to_lowercase();
        self.table.find(|i| i.name().to_lowercase() == needle)
    }

    fn list(&self) -> RepositoryResult<Vec<Insurance>> {
        let mut insurances = self.table.find(|_| true)?;
        insurances.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(insurances)
    }

    fn save(&self, insurance: &Insurance) -> RepositoryResult<()> {
        self.table.upsert(insurance.id(), insurance.clone())
    }
}
