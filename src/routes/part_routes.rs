use axum::{
    extract::{Path, State},
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::part_controller::PartController;
use crate::dto::common::ApiResponse;
use crate::dto::part_dto::{CreatePartRequest, StockInRequest, UpdatePartRequest};
use crate::middleware::auth::auth_middleware;
use crate::models::part::Part;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_part_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_part))
        .route("/", get(list_parts))
        .route("/low-stock", get(list_low_stock))
        .route("/:id", get(get_part))
        .route("/:id", put(update_part))
        .route("/:id", delete(delete_part))
        .route("/:id/stock-in", post(stock_in))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn create_part(
    State(state): State<AppState>,
    Json(request): Json<CreatePartRequest>,
) -> Result<Json<ApiResponse<Part>>, AppError> {
    let controller = PartController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_part(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Part>, AppError> {
    let controller = PartController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_parts(State(state): State<AppState>) -> Result<Json<Vec<Part>>, AppError> {
    let controller = PartController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn list_low_stock(State(state): State<AppState>) -> Result<Json<Vec<Part>>, AppError> {
    let controller = PartController::new(state.pool.clone());
    let response = controller.list_low_stock().await?;
    Ok(Json(response))
}

async fn update_part(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePartRequest>,
) -> Result<Json<ApiResponse<Part>>, AppError> {
    let controller = PartController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn stock_in(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<StockInRequest>,
) -> Result<Json<ApiResponse<Part>>, AppError> {
    let controller = PartController::new(state.pool.clone());
    let response = controller.stock_in(id, request).await?;
    Ok(Json(response))
}

async fn delete_part(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = PartController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Pieza eliminada exitosamente"
    })))
}
