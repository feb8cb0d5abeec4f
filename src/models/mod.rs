//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos del dominio de alquiler:
//! vehículos, clientes, seguros, contratos y presupuestos.

pub mod client;
pub mod condition;
pub mod contract;
pub mod insurance;
pub mod quote;
pub mod vehicle;

pub use client::{Client, CreateClientRequest};
pub use condition::VehicleCondition;
pub use contract::{Contract, ContractDraft, ContractPhase, Pricing, ReturnReport};
pub use insurance::{CreateInsuranceRequest, Insurance};
pub use quote::Quote;
pub use vehicle::{CreateVehicleRequest, UpdateVehicleRequest, Vehicle, VehicleFilters};
