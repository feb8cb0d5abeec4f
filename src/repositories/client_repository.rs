use uuid::Uuid;

use crate::models::client::Client;

use super::{MemoryTable, RepositoryResult};

/// Almacenamiento de clientes
pub trait ClientRepository: Send + Sync {
    fn get_by_id(&self, id: Uuid) -> RepositoryResult<Option<Client>>;

    /// Coincidencia sin mayúsculas sobre el apellido o el nombre
    fn find_by_name(&self, name: &str) -> RepositoryResult<Vec<Client>>;

    fn find_by_license(&self, license_number: &str) -> RepositoryResult<Option<Client>>;

    fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Client>>;

    fn list(&self) -> RepositoryResult<Vec<Client>>;

    fn save(&self, client: &Client) -> RepositoryResult<()>;

    fn find_with_active_rentals(&self) -> RepositoryResult<Vec<Client>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|c| !c.active_rentals.is_empty())
            .collect())
    }
}

pub struct InMemoryClientRepository {
    table: MemoryTable<Client>,
}

impl InMemoryClientRepository {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new("clients"),
        }
    }
}

impl Default for InMemoryClientRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientRepository for InMemoryClientRepository {
    fn get_by_id(&self, id: Uuid) -> RepositoryResult<Option<Client>> {
        self.table.get(id)
    }

    fn find_by_name(&self, name: &str) -> RepositoryResult<Vec<Client>> {
        let needle = name.trim().to_lowercase();
        let mut clients = self.table.find(|c| {
            c.last_name.to_lowercase() == needle || c.first_name.to_lowercase() == needle
        })?;
        clients.sort_by(|a, b| a.last_name.cmp(&b.last_name));
        Ok(clients)
    }

    fn find_by_license(&self, license_number: &str) -> RepositoryResult<Option<Client>> {
        let license_number = license_number.trim().to_uppercase();
        self.table.find_one(|c| c.license_number == license_number)
    }

    fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Client>> {
        let email = email.trim().to_lowercase();
        self.table.find_one(|c| c.email == email)
    }

    fn list(&self) -> RepositoryResult<Vec<Client>> {
        let mut clients = self.table.find(|_| true)?;
        clients.sort_by(|a, b| a.last_name.cmp(&b.last_name));
        Ok(clients)
    }

    fn save(&self, client: &Client) -> RepositoryResult<()> {
        self.table.upsert(client.id, client.clone())
    }
}
