//! Middleware de autenticación JWT
//!
//! Extrae el token Bearer, valida los claims y deja el usuario
//! autenticado en las extensions de la request. El core confía en
//! los claims del proveedor de sesión sin revalidar credenciales.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::models::user::UserRole;
use crate::services::jwt_service;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: UserRole,
    pub email: String,
    pub name: String,
}

fn extract_bearer(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
}

fn user_from_token(token: &str, state: &AppState) -> Result<AuthenticatedUser, AppError> {
    let claims = jwt_service::decode_token(token, &state.config)?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("ID de usuario inválido".to_string()))?;

    Ok(AuthenticatedUser {
        user_id,
        role: claims.role,
        email: claims.email,
        name: claims.name,
    })
}

/// Middleware de autenticación obligatoria
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer(&request)
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let user = user_from_token(token, &state)?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Middleware opcional de autenticación (para rutas que pueden ser
/// públicas o privadas, como la evaluación del gate de acceso)
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(token) = extract_bearer(&request) {
        if let Ok(user) = user_from_token(token, &state) {
            request.extensions_mut().insert(user);
        }
    }

    Ok(next.run(request).await)
}
