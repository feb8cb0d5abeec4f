//! Registro de seguros

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::models::{CreateInsuranceRequest, Insurance};
use crate::repositories::Repositories;
use crate::utils::errors::{conflict_error, AppError, AppResult};

pub struct InsuranceService {
    repos: Repositories,
}

impl InsuranceService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub fn create(&self, request: CreateInsuranceRequest) -> AppResult<Insurance> {
        request.validate()?;

        let _guard = self.repos.exclusive();
        if !self.repos.insurances.find_by_name(&request.name)?.is_empty() {
            return Err(conflict_error("Insurance", "name", request.name.trim()));
        }

        let insurance = Insurance::from_request(request);
        self.repos.insurances.save(&insurance)?;
        info!("🛡️ Seguro creado: {} ({}/día)", insurance.name(), insurance.daily_rate());
        Ok(insurance)
    }

    pub fn get(&self, id: Uuid) -> AppResult<Insurance> {
        self.repos
            .insurances
            .get_by_id(id)?
            .ok_or(AppError::InsuranceNotFound(id))
    }

    pub fn find_by_name(&self, name: &str) -> AppResult<Vec<Insurance>> {
        Ok(self.repos.insurances.find_by_name(name)?)
    }

    pub fn list(&self) -> AppResult<Vec<Insurance>> {
        Ok(self.repos.insurances.list()?)
    }
}
