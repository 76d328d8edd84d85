//! Controladores
//!
//! Orquestación por recurso: validación de entrada, llamadas a
//! repositorios/servicios y construcción de responses.

pub mod auth_controller;
pub mod customer_controller;
pub mod order_controller;
pub mod part_controller;
pub mod task_controller;
pub mod vehicle_controller;
