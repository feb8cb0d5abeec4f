//! Motor de contratos de alquiler de vehículos
//!
//! Registro de vehículos, clientes y seguros; apertura y cierre de contratos
//! con cálculo de coste y caución; restitución de vehículos y presupuestos.
//! El registro de vehículos se expone además por HTTP (axum).

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use utils::errors::{AppError, AppResult, ErrorKind};
