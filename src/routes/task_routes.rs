use axum::{
    extract::{Path, State},
    middleware,
    routing::{delete, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::task_controller::TaskController;
use crate::dto::common::ApiResponse;
use crate::dto::task_dto::UpdateTaskRequest;
use crate::middleware::auth::auth_middleware;
use crate::models::task::ServiceTask;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_task_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/:id", put(update_task))
        .route("/:id", delete(delete_task))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTaskRequest>,
) -> Result<Json<ApiResponse<ServiceTask>>, AppError> {
    let controller = TaskController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = TaskController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Tarea eliminada exitosamente"
    })))
}
