//! Repositorios de acceso a datos
//!
//! Todo el SQL vive aquí, un repositorio por tabla/agregado.

pub mod customer_repository;
pub mod order_part_repository;
pub mod order_repository;
pub mod part_repository;
pub mod task_repository;
pub mod user_repository;
pub mod vehicle_repository;
