use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::UserRole;

/// Request de login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 3, max = 100))]
    pub username: String,

    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

/// Response de login con el token emitido
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
}

/// Usuario de sesión tal como lo consume el frontend
#[derive(Debug, Clone, Serialize)]
pub struct SessionUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
}

/// Request para evaluar el acceso de un rol a una ruta
#[derive(Debug, Deserialize, Validate)]
pub struct AccessCheckRequest {
    #[validate(length(min = 1, max = 500))]
    pub path: String,
}

/// Response de la evaluación de acceso
#[derive(Debug, Serialize)]
pub struct AccessCheckResponse {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}
