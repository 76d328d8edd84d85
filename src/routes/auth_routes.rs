use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{
    AccessCheckRequest, AccessCheckResponse, LoginRequest, LoginResponse, SessionUser,
};
use crate::middleware::auth::{auth_middleware, optional_auth_middleware, AuthenticatedUser};
use crate::repositories::user_repository::UserRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use validator::Validate;

pub fn create_auth_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let access = Router::new()
        .route("/access/check", post(check_access))
        .route_layer(middleware::from_fn_with_state(
            state,
            optional_auth_middleware,
        ));

    Router::new()
        .route("/login", post(login))
        .merge(protected)
        .merge(access)
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone(), state.config.clone());
    let response = controller.login(request).await?;
    Ok(Json(response))
}

async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<SessionUser>, AppError> {
    let repository = UserRepository::new(state.pool.clone());
    let record = repository
        .find_by_id(user.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

    Ok(Json(SessionUser {
        id: record.id.to_string(),
        username: record.username,
        email: record.email,
        full_name: record.full_name,
        role: record.role,
    }))
}

/// Evaluar el gate rol/ruta para una ruta de página.
///
/// Funciona con o sin sesión: sin token, las rutas con prefijo de rol
/// redirigen a /login.
async fn check_access(
    State(state): State<AppState>,
    user: Option<Extension<AuthenticatedUser>>,
    Json(request): Json<AccessCheckRequest>,
) -> Result<Json<AccessCheckResponse>, AppError> {
    request.validate()?;

    let role = user.map(|Extension(u)| u.role);
    let decision = state.access_policy.evaluate(role, &request.path);

    Ok(Json(AccessCheckResponse {
        allowed: decision.is_allowed(),
        redirect_to: decision.redirect_target().map(|s| s.to_string()),
    }))
}
