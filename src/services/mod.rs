//! Servicios de dominio
//!
//! Lógica transversal: ejecutor de descuentos de almacén, ciclo de
//! vida de órdenes, gate de autorización por rol/ruta y emisión JWT.

pub mod authorization_service;
pub mod deduction_service;
pub mod jwt_service;
pub mod order_lifecycle_service;
