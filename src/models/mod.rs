//! Modelos de datos
//!
//! Structs que mapean a las tablas PostgreSQL del taller.

pub mod customer;
pub mod order;
pub mod order_part;
pub mod part;
pub mod task;
pub mod user;
pub mod vehicle;
