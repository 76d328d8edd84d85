//! Servicio de emisión y validación de JWT
//!
//! El proveedor de sesión entrega `{user_id, role, email, name}`;
//! el resto del sistema confía en estos claims sin revalidar
//! credenciales.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::EnvironmentConfig;
use crate::models::user::UserRole;
use crate::utils::errors::AppError;

/// Claims del JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub role: UserRole,
    pub email: String,
    pub name: String,
    pub exp: usize,
    pub iat: usize,
}

/// Generar un token para un usuario autenticado
pub fn generate_token(
    user_id: Uuid,
    role: UserRole,
    email: &str,
    name: &str,
    config: &EnvironmentConfig,
) -> Result<String, AppError> {
    let now = Utc::now();
    let expires_at = now + chrono::Duration::seconds(config.jwt_expiration as i64);

    let claims = Claims {
        sub: user_id.to_string(),
        role,
        email: email.to_string(),
        name: name.to_string(),
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_ref()),
    )
    .map_err(|e| AppError::Jwt(format!("Error generando JWT: {}", e)))
}

/// Decodificar y validar un token
pub fn decode_token(token: &str, config: &EnvironmentConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Token inválido".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EnvironmentConfig {
        EnvironmentConfig {
            environment: "test".to_string(),
            port: 3000,
            host: "127.0.0.1".to_string(),
            jwt_secret: "secreto-de-test".to_string(),
            jwt_expiration: 3600,
            cors_origins: vec![],
        }
    }

    #[test]
    fn test_generate_and_decode_token() {
        let cfg = config();
        let user_id = Uuid::new_v4();
        let token = generate_token(user_id, UserRole::Mechanic, "m@taller.es", "Marta", &cfg)
            .expect("token");

        let claims = decode_token(&token, &cfg).expect("claims");
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, UserRole::Mechanic);
        assert_eq!(claims.email, "m@taller.es");
    }

    #[test]
    fn test_decode_rejects_wrong_secret() {
        let cfg = config();
        let token =
            generate_token(Uuid::new_v4(), UserRole::Admin, "a@taller.es", "Ana", &cfg).unwrap();

        let mut other = config();
        other.jwt_secret = "otro-secreto".to_string();
        assert!(decode_token(&token, &other).is_err());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_token("no-es-un-jwt", &config()).is_err());
    }
}
