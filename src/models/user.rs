//! Modelo de User
//!
//! Usuarios del sistema y sus roles. Cada rol tiene un conjunto
//! de páginas permitidas (ver services/authorization_service.rs).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Rol del usuario - mapea al ENUM user_role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Mechanic,
    Client,
    Warehouse,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Mechanic => "mechanic",
            UserRole::Client => "client",
            UserRole::Warehouse => "warehouse",
        }
    }

    /// Parsear un rol desde el segmento de una ruta
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "admin" => Some(UserRole::Admin),
            "mechanic" => Some(UserRole::Mechanic),
            "client" => Some(UserRole::Client),
            "warehouse" => Some(UserRole::Warehouse),
            _ => None,
        }
    }
}

/// Estado del usuario - mapea al ENUM user_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "user_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Suspended,
}

/// User principal - mapea a la tabla users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub user_status: UserStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_segment() {
        assert_eq!(UserRole::from_segment("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::from_segment("warehouse"), Some(UserRole::Warehouse));
        assert_eq!(UserRole::from_segment("dashboard"), None);
    }

    #[test]
    fn test_role_round_trip() {
        for role in [
            UserRole::Admin,
            UserRole::Mechanic,
            UserRole::Client,
            UserRole::Warehouse,
        ] {
            assert_eq!(UserRole::from_segment(role.as_str()), Some(role));
        }
    }
}
