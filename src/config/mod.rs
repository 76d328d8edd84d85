//! Módulo de configuración
//!
//! Agrupa la configuración de entorno y de base de datos.

pub mod database;
pub mod environment;

pub use environment::EnvironmentConfig;
