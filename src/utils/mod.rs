//! Utilidades compartidas: errores, validación y reloj

pub mod clock;
pub mod errors;
pub mod validation;

pub use errors::{AppError, AppResult, ErrorKind};
