#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use car_rental::config::environment::EnvironmentConfig;
use car_rental::models::{
    Client, CreateClientRequest, CreateInsuranceRequest, CreateVehicleRequest, Insurance, Vehicle,
};
use car_rental::repositories::Repositories;
use car_rental::services::NewContract;
use car_rental::state::AppState;
use car_rental::utils::clock::FixedClock;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

pub fn state_with(repositories: Repositories) -> AppState {
    AppState::new(
        EnvironmentConfig::default(),
        repositories,
        Arc::new(FixedClock(today())),
    )
}

pub fn state() -> AppState {
    state_with(Repositories::in_memory())
}

pub fn register_client(state: &AppState, license: &str) -> Client {
    state
        .clients
        .register(CreateClientRequest {
            last_name: "Dupont".to_string(),
            first_name: "Jean".to_string(),
            license_number: license.to_string(),
            phone: "0601020304".to_string(),
            email: format!("{}@example.com", license.to_lowercase()),
        })
        .unwrap()
}

pub fn register_vehicle(state: &AppState, registration: &str, defects: &[&str]) -> Vehicle {
    state
        .vehicles
        .register(CreateVehicleRequest {
            brand: "Renault".to_string(),
            model: "Clio".to_string(),
            year: 2021,
            registration: registration.to_string(),
            odometer_km: 42_000,
            daily_price: Decimal::new(5000, 2),
            condition: "Nickel".to_string(),
            vehicle_type: "citadine".to_string(),
            defects: Some(defects.iter().map(|d| d.to_string()).collect()),
        })
        .unwrap()
}

pub fn create_insurance(state: &AppState, name: &str, daily_rate: Decimal) -> Insurance {
    state
        .insurances
        .create(CreateInsuranceRequest {
            name: name.to_string(),
            daily_rate,
        })
        .unwrap()
}

pub fn new_contract(client: &Client, vehicle: &Vehicle, duration_days: u32) -> NewContract {
    NewContract {
        client_id: client.id,
        vehicle_id: vehicle.id,
        start_date: today(),
        duration_days,
        insurance_id: None,
        initial_defects: None,
    }
}
