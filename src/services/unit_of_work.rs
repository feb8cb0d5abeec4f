//! Escrituras agrupadas con deshacer
//!
//! Cada escritura exitosa registra cómo restaurar el estado anterior. Si una
//! escritura posterior falla, las anteriores se deshacen en orden inverso y se
//! devuelve el error original.

use tracing::error;
use uuid::Uuid;

use crate::models::{Client, Contract, Quote, Vehicle};
use crate::repositories::{Repositories, RepositoryResult};
use crate::utils::errors::{AppError, AppResult};

enum Undo {
    RemoveContract(Uuid),
    RestoreContract(Contract),
    RemoveVehicle(Uuid),
    RestoreVehicle(Vehicle),
    RestoreAvailability { vehicle_id: Uuid, available: bool },
    RestoreClient(Client),
}

pub(crate) struct UnitOfWork<'a> {
    repos: &'a Repositories,
    undo: Vec<Undo>,
}

impl<'a> UnitOfWork<'a> {
    pub(crate) fn insert_contract(&mut self, contract: &Contract) -> AppResult<()> {
        self.repos.contracts.save(contract)?;
        self.undo.push(Undo::RemoveContract(contract.id()));
        Ok(())
    }

    pub(crate) fn update_contract(&mut self, before: &Contract, after: &Contract) -> AppResult<()> {
        self.repos.contracts.save(after)?;
        self.undo.push(Undo::RestoreContract(before.clone()));
        Ok(())
    }

    pub(crate) fn insert_vehicle(&mut self, vehicle: &Vehicle) -> AppResult<()> {
        self.repos.vehicles.save(vehicle)?;
        self.undo.push(Undo::RemoveVehicle(vehicle.id));
        Ok(())
    }

    pub(crate) fn update_vehicle(&mut self, before: &Vehicle, after: &Vehicle) -> AppResult<()> {
        self.repos.vehicles.save(after)?;
        self.undo.push(Undo::RestoreVehicle(before.clone()));
        Ok(())
    }

    pub(crate) fn set_vehicle_availability(&mut self, vehicle: &Vehicle, available: bool) -> AppResult<()> {
        if !self.repos.vehicles.set_availability(vehicle.id, available)? {
            return Err(AppError::VehicleNotFound(vehicle.id.to_string()));
        }
        self.undo.push(Undo::RestoreAvailability {
            vehicle_id: vehicle.id,
            available: vehicle.available,
        });
        Ok(())
    }

    pub(crate) fn update_client(&mut self, before: &Client, after: &Client) -> AppResult<()> {
        self.repos.clients.save(after)?;
        self.undo.push(Undo::RestoreClient(before.clone()));
        Ok(())
    }

    /// Último paso de un flujo: no necesita deshacer
    pub(crate) fn insert_quote(&mut self, quote: &Quote) -> AppResult<()> {
        self.repos.quotes.save(quote)?;
        Ok(())
    }

    fn rollback(self) {
        for undo in self.undo.into_iter().rev() {
            let result: RepositoryResult<()> = match undo {
                Undo::RemoveContract(id) => self.repos.contracts.delete(id).map(|_| ()),
                Undo::RestoreContract(contract) => self.repos.contracts.save(&contract),
                Undo::RemoveVehicle(id) => self.repos.vehicles.delete(id).map(|_| ()),
                Undo::RestoreVehicle(vehicle) => self.repos.vehicles.save(&vehicle),
                Undo::RestoreAvailability { vehicle_id, available } => self
                    .repos
                    .vehicles
                    .set_availability(vehicle_id, available)
                    .map(|_| ()),
                Undo::RestoreClient(client) => self.repos.clients.save(&client),
            };
            if let Err(e) = result {
                error!("❌ Rollback incompleto: {}", e);
            }
        }
    }
}

/// Ejecuta `work` y deshace sus escrituras si devuelve error
pub(crate) fn transactional<'a, T, F>(repos: &'a Repositories, work: F) -> AppResult<T>
where
    F: FnOnce(&mut UnitOfWork<'a>) -> AppResult<T>,
{
    let mut uow = UnitOfWork {
        repos,
        undo: Vec::new(),
    };
    match work(&mut uow) {
        Ok(value) => Ok(value),
        Err(e) => {
            uow.rollback();
            Err(e)
        }
    }
}
