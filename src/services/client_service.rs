//! Registro de clientes

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Client, CreateClientRequest};
use crate::repositories::Repositories;
use crate::utils::errors::{conflict_error, AppError, AppResult};

pub struct ClientService {
    repos: Repositories,
}

impl ClientService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub fn register(&self, request: CreateClientRequest) -> AppResult<Client> {
        request.validate()?;

        let _guard = self.repos.exclusive();
        let client = Client::from_request(request);
        if self
            .repos
            .clients
            .find_by_license(&client.license_number)?
            .is_some()
        {
            return Err(conflict_error("Client", "license", &client.license_number));
        }

        self.repos.clients.save(&client)?;
        info!("👤 Cliente registrado: {}", client.full_name());
        Ok(client)
    }

    pub fn get(&self, id: Uuid) -> AppResult<Client> {
        self.repos
            .clients
            .get_by_id(id)?
            .ok_or(AppError::ClientNotFound(id))
    }

    pub fn find_by_name(&self, name: &str) -> AppResult<Vec<Client>> {
        Ok(self.repos.clients.find_by_name(name)?)
    }

    pub fn find_by_license(&self, license_number: &str) -> AppResult<Option<Client>> {
        Ok(self.repos.clients.find_by_license(license_number)?)
    }

    pub fn find_by_email(&self, email: &str) -> AppResult<Option<Client>> {
        Ok(self.repos.clients.find_by_email(email)?)
    }

    pub fn list(&self) -> AppResult<Vec<Client>> {
        Ok(self.repos.clients.list()?)
    }

    /// Clientes con al menos un alquiler en curso
    pub fn with_active_rentals(&self) -> AppResult<Vec<Client>> {
        Ok(self.repos.clients.find_with_active_rentals()?)
    }
}
