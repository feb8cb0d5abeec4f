mod common;

use std::error::Error;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use car_rental::models::{Client, Contract};
use car_rental::repositories::{
    ClientRepository, ContractRepository, InMemoryClientRepository, InMemoryContractRepository,
    InMemoryInsuranceRepository, InMemoryQuoteRepository, InMemoryVehicleRepository,
    Repositories, RepositoryError, RepositoryResult,
};
use car_rental::services::ReturnRequest;
use car_rental::state::AppState;
use car_rental::{AppError, ErrorKind};

use common::{new_contract, register_client, register_vehicle, state, state_with, today};

fn return_request(client: &Client, vehicle_id: Uuid, condition: &str) -> ReturnRequest {
    ReturnRequest {
        client_id: client.id,
        vehicle_id,
        km_driven: 350,
        condition: condition.to_string(),
        defects: None,
    }
}

fn rented(state: &AppState, defects: &[&str]) -> (Client, Uuid, Contract) {
    let client = register_client(state, "B1234567");
    let vehicle = register_vehicle(state, "AB-123-CD", defects);
    let contract = state.contracts.create(new_contract(&client, &vehicle, 7)).unwrap();
    (client, vehicle.id, contract)
}

#[test]
fn test_clean_return_frees_vehicle() {
    let state = state();
    let (client, vehicle_id, contract) = rented(&state, &["scratch"]);

    let receipt = state
        .restitutions
        .restitute(return_request(&client, vehicle_id, "nickel"))
        .unwrap();

    assert_eq!(receipt.withheld_deposit, Decimal::ZERO);
    assert_eq!(receipt.vehicle.odometer_km, 42_350);
    assert_eq!(receipt.vehicle.condition, "Nickel");
    assert_eq!(receipt.vehicle.defects, vec!["scratch".to_string()]);
    assert!(receipt.vehicle.available);

    let report = receipt.contract.return_report().unwrap();
    assert_eq!(report.return_date, today());
    assert_eq!(report.return_odometer_km, 42_350);

    assert!(state.contracts.get(contract.id()).unwrap().is_closed());
    assert!(state.vehicles.get(vehicle_id).unwrap().available);
    assert!(state.clients.get(client.id).unwrap().active_rentals.is_empty());
}

#[test]
fn test_damaged_return_withholds_deposit() {
    let state = state();
    let (client, vehicle_id, contract) = rented(&state, &["scratch"]);

    let mut request = return_request(&client, vehicle_id, "  ENDOMMAGÉ ");
    request.defects = Some(vec!["scratch".to_string(), "dent".to_string()]);
    let receipt = state.restitutions.restitute(request).unwrap();

    assert_eq!(contract.deposit(), Decimal::new(3500, 2));
    assert_eq!(receipt.withheld_deposit, Decimal::new(350, 2));
    assert_eq!(receipt.vehicle.condition, "Endommagé");
    assert_eq!(
        receipt.vehicle.defects,
        vec!["scratch".to_string(), "dent".to_string()]
    );
    assert!(receipt.vehicle.available);
}

#[test]
fn test_stolen_vehicle_stays_unavailable() {
    let state = state();
    let (client, vehicle_id, _) = rented(&state, &[]);

    let receipt = state
        .restitutions
        .restitute(return_request(&client, vehicle_id, "Volé"))
        .unwrap();

    assert_eq!(receipt.vehicle.condition, "Volé");
    assert!(!receipt.vehicle.available);
    assert!(!state.vehicles.get(vehicle_id).unwrap().available);
    assert!(state.clients.get(client.id).unwrap().active_rentals.is_empty());
}

#[test]
fn test_vehicle_not_rented_by_client() {
    let state = state();
    let (_, vehicle_id, contract) = rented(&state, &[]);
    let other = register_client(&state, "C7654321");

    let err = state
        .restitutions
        .restitute(return_request(&other, vehicle_id, "Nickel"))
        .unwrap_err();

    assert!(matches!(err, AppError::VehicleNotRentedByClient { .. }));
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(!state.contracts.get(contract.id()).unwrap().is_closed());
}

#[test]
fn test_unrecognized_condition_changes_nothing() {
    let state = state();
    let (client, vehicle_id, contract) = rented(&state, &[]);

    let err = state
        .restitutions
        .restitute(return_request(&client, vehicle_id, "rayée"))
        .unwrap_err();

    assert!(matches!(err, AppError::UnrecognizedCondition(_)));
    assert!(!state.contracts.get(contract.id()).unwrap().is_closed());
    assert_eq!(state.vehicles.get(vehicle_id).unwrap().odometer_km, 42_000);
    assert!(state.clients.get(client.id).unwrap().has_rented(vehicle_id));
}

#[test]
fn test_unknown_client_or_vehicle() {
    let state = state();
    let (client, vehicle_id, _) = rented(&state, &[]);

    let mut request = return_request(&client, vehicle_id, "Nickel");
    request.client_id = Uuid::new_v4();
    assert!(matches!(
        state.restitutions.restitute(request).unwrap_err(),
        AppError::ClientNotFound(_)
    ));

    let request = return_request(&client, Uuid::new_v4(), "Nickel");
    assert!(matches!(
        state.restitutions.restitute(request).unwrap_err(),
        AppError::VehicleNotFound(_)
    ));
}

#[test]
fn test_second_restitution_is_refused() {
    let state = state();
    let (client, vehicle_id, _) = rented(&state, &[]);

    state
        .restitutions
        .restitute(return_request(&client, vehicle_id, "Sale"))
        .unwrap();
    let err = state
        .restitutions
        .restitute(return_request(&client, vehicle_id, "Sale"))
        .unwrap_err();

    assert!(matches!(err, AppError::VehicleNotRentedByClient { .. }));
}

/// Almacén de contratos que falla al guardar
struct FailingContracts {
    inner: InMemoryContractRepository,
}

impl ContractRepository for FailingContracts {
    fn get_by_id(&self, id: Uuid) -> RepositoryResult<Option<Contract>> {
        self.inner.get_by_id(id)
    }

    fn list(&self) -> RepositoryResult<Vec<Contract>> {
        self.inner.list()
    }

    fn save(&self, _contract: &Contract) -> RepositoryResult<()> {
        Err(RepositoryError::save_failed(
            "contract",
            io::Error::new(io::ErrorKind::Other, "disk full"),
        ))
    }

    fn delete(&self, id: Uuid) -> RepositoryResult<bool> {
        self.inner.delete(id)
    }
}

/// Almacén de clientes que falla al guardar una vez armado
struct FlakyClients {
    inner: InMemoryClientRepository,
    armed: AtomicBool,
}

impl ClientRepository for FlakyClients {
    fn get_by_id(&self, id: Uuid) -> RepositoryResult<Option<Client>> {
        self.inner.get_by_id(id)
    }

    fn find_by_name(&self, name: &str) -> RepositoryResult<Vec<Client>> {
        self.inner.find_by_name(name)
    }

    fn find_by_license(&self, license_number: &str) -> RepositoryResult<Option<Client>> {
        self.inner.find_by_license(license_number)
    }

    fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Client>> {
        self.inner.find_by_email(email)
    }

    fn list(&self) -> RepositoryResult<Vec<Client>> {
        self.inner.list()
    }

    fn save(&self, client: &Client) -> RepositoryResult<()> {
        if self.armed.load(Ordering::SeqCst) {
            return Err(RepositoryError::save_failed(
                "client",
                io::Error::new(io::ErrorKind::Other, "connection reset"),
            ));
        }
        self.inner.save(client)
    }
}

#[test]
fn test_failed_contract_save_leaves_vehicle_and_client_untouched() {
    let repositories = Repositories::new(
        Arc::new(InMemoryVehicleRepository::new()),
        Arc::new(InMemoryClientRepository::new()),
        Arc::new(InMemoryInsuranceRepository::new()),
        Arc::new(FailingContracts {
            inner: InMemoryContractRepository::new(),
        }),
        Arc::new(InMemoryQuoteRepository::new()),
    );
    let state = state_with(repositories);
    let client = register_client(&state, "B1234567");
    let vehicle = register_vehicle(&state, "AB-123-CD", &[]);

    let err = state
        .contracts
        .create(new_contract(&client, &vehicle, 7))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Persistence);
    let cause = err.source().and_then(|repo| repo.source()).map(|io| io.to_string());
    assert_eq!(cause, Some("disk full".to_string()));

    assert!(state.vehicles.get(vehicle.id).unwrap().available);
    assert!(state.clients.get(client.id).unwrap().active_rentals.is_empty());
    assert!(state.contracts.list().unwrap().is_empty());
}

#[test]
fn test_failed_client_save_rolls_back_contract_and_availability() {
    let clients = Arc::new(FlakyClients {
        inner: InMemoryClientRepository::new(),
        armed: AtomicBool::new(false),
    });
    let repositories = Repositories::new(
        Arc::new(InMemoryVehicleRepository::new()),
        clients.clone(),
        Arc::new(InMemoryInsuranceRepository::new()),
        Arc::new(InMemoryContractRepository::new()),
        Arc::new(InMemoryQuoteRepository::new()),
    );
    let state = state_with(repositories);
    let client = register_client(&state, "B1234567");
    let vehicle = register_vehicle(&state, "AB-123-CD", &[]);

    clients.armed.store(true, Ordering::SeqCst);
    let err = state
        .contracts
        .create(new_contract(&client, &vehicle, 7))
        .unwrap_err();

    assert!(matches!(err, AppError::Persistence(_)));
    assert!(state.contracts.list().unwrap().is_empty());
    assert!(state.vehicles.get(vehicle.id).unwrap().available);
    assert!(state.clients.get(client.id).unwrap().active_rentals.is_empty());
}

#[test]
fn test_failed_restitution_restores_contract_and_vehicle() {
    let clients = Arc::new(FlakyClients {
        inner: InMemoryClientRepository::new(),
        armed: AtomicBool::new(false),
    });
    let repositories = Repositories::new(
        Arc::new(InMemoryVehicleRepository::new()),
        clients.clone(),
        Arc::new(InMemoryInsuranceRepository::new()),
        Arc::new(InMemoryContractRepository::new()),
        Arc::new(InMemoryQuoteRepository::new()),
    );
    let state = state_with(repositories);
    let (client, vehicle_id, contract) = rented(&state, &[]);

    clients.armed.store(true, Ordering::SeqCst);
    let err = state
        .restitutions
        .restitute(return_request(&client, vehicle_id, "Nickel"))
        .unwrap_err();

    assert!(matches!(err, AppError::Persistence(_)));
    assert!(!state.contracts.get(contract.id()).unwrap().is_closed());
    let vehicle = state.vehicles.get(vehicle_id).unwrap();
    assert_eq!(vehicle.odometer_km, 42_000);
    assert!(!vehicle.available);
    assert!(state.clients.get(client.id).unwrap().has_rented(vehicle_id));
}
