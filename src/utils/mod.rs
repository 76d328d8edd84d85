//! Módulo de utilidades
//!
//! Contiene el sistema de errores y helpers de validación.

pub mod errors;
pub mod validation;
