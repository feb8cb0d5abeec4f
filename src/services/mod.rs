//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: el motor de
//! contratos, la restitución, los presupuestos y los registros de vehículos,
//! clientes y seguros. Las operaciones que tocan varias entidades pasan por
//! `unit_of_work`.

pub mod client_service;
pub mod contract_service;
pub mod insurance_service;
pub mod quote_service;
pub mod restitution_service;
pub mod vehicle_service;

mod unit_of_work;

pub use client_service::ClientService;
pub use contract_service::{ContractService, NewContract};
pub use insurance_service::InsuranceService;
pub use quote_service::QuoteService;
pub use restitution_service::{RestitutionReceipt, RestitutionService, ReturnRequest};
pub use vehicle_service::VehicleService;
