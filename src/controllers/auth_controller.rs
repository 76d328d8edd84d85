use validator::Validate;

use crate::config::EnvironmentConfig;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, SessionUser};
use crate::models::user::UserStatus;
use crate::repositories::user_repository::UserRepository;
use crate::services::jwt_service;
use crate::utils::errors::AppError;
use sqlx::PgPool;

pub struct AuthController {
    repository: UserRepository,
    config: EnvironmentConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            repository: UserRepository::new(pool),
            config,
        }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let user = self
            .repository
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        if user.user_status != UserStatus::Active {
            return Err(AppError::Unauthorized(
                "Usuario inactivo o suspendido".to_string(),
            ));
        }

        let valid = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verificando contraseña: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let token = jwt_service::generate_token(
            user.id,
            user.role,
            &user.email,
            &user.full_name,
            &self.config,
        )?;

        Ok(LoginResponse {
            token,
            user: SessionUser {
                id: user.id.to_string(),
                username: user.username,
                email: user.email,
                full_name: user.full_name,
                role: user.role,
            },
        })
    }
}
