//! DTOs de la API
//!
//! Requests y responses serializables por recurso.

pub mod auth_dto;
pub mod common;
pub mod customer_dto;
pub mod order_dto;
pub mod part_dto;
pub mod task_dto;
pub mod vehicle_dto;
