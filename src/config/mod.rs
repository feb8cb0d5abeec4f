//! Configuración del proyecto
//!
//! Este módulo contiene las variables de entorno del servidor y la política
//! de tarificación de alquileres.

pub mod environment;
pub mod rental;

pub use environment::*;
pub use rental::RentalPolicy;
