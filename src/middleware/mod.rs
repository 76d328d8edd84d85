//! Middleware HTTP
//!
//! Autenticación JWT y CORS.

pub mod auth;
pub mod cors;
