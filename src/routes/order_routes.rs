//! Rutas del agregado orden de servicio
//!
//! CRUD de órdenes, asociaciones de piezas, tareas y el endpoint
//! explícito del ejecutor de descuentos. El PUT de la orden dispara
//! implícitamente el descuento cuando el estado pasa a COMPLETED.

use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::order_controller::OrderController;
use crate::controllers::task_controller::TaskController;
use crate::dto::common::ApiResponse;
use crate::dto::order_dto::{
    AddOrderPartRequest, CreateOrderRequest, DeductionResponse, OrderFilters,
    OrderWithPartsResponse, UpdateOrderPartRequest, UpdateOrderRequest,
};
use crate::dto::task_dto::CreateTaskRequest;
use crate::middleware::auth::auth_middleware;
use crate::models::order::ServiceOrder;
use crate::models::order_part::OrderPartAssociation;
use crate::models::task::ServiceTask;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_order_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_order))
        .route("/", get(list_orders))
        .route("/:id", get(get_order))
        .route("/:id", put(update_order))
        .route("/:id", delete(delete_order))
        .route("/:id/parts", post(add_order_part))
        .route("/:id/parts/:assoc_id", put(update_order_part))
        .route("/:id/parts/:assoc_id", delete(remove_order_part))
        .route("/:id/deduct-parts", post(deduct_order_parts))
        .route("/:id/tasks", post(create_order_task))
        .route("/:id/tasks", get(list_order_tasks))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<Json<ApiResponse<ServiceOrder>>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderWithPartsResponse>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.get_with_parts(id).await?;
    Ok(Json(response))
}

async fn list_orders(
    State(state): State<AppState>,
    Query(filters): Query<OrderFilters>,
) -> Result<Json<Vec<ServiceOrder>>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateOrderRequest>,
) -> Result<Json<ApiResponse<OrderWithPartsResponse>>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Orden eliminada exitosamente"
    })))
}

async fn add_order_part(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddOrderPartRequest>,
) -> Result<Json<ApiResponse<OrderPartAssociation>>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.add_part(id, request).await?;
    Ok(Json(response))
}

async fn update_order_part(
    State(state): State<AppState>,
    Path((id, assoc_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateOrderPartRequest>,
) -> Result<Json<ApiResponse<OrderPartAssociation>>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.update_part(id, assoc_id, request).await?;
    Ok(Json(response))
}

async fn remove_order_part(
    State(state): State<AppState>,
    Path((id, assoc_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    controller.remove_part(id, assoc_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Asociación eliminada"
    })))
}

async fn deduct_order_parts(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeductionResponse>>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.deduct_parts(id).await?;
    Ok(Json(response))
}

async fn create_order_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<Json<ApiResponse<ServiceTask>>, AppError> {
    let controller = TaskController::new(state.pool.clone());
    let response = controller.create(id, request).await?;
    Ok(Json(response))
}

async fn list_order_tasks(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ServiceTask>>, AppError> {
    let controller = TaskController::new(state.pool.clone());
    let response = controller.list_by_order(id).await?;
    Ok(Json(response))
}
