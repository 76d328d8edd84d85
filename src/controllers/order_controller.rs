//! Controlador de órdenes de servicio
//!
//! Orquesta el agregado orden: CRUD, asociaciones de piezas y los dos
//! caminos de descuento de almacén (explícito y por transición a
//! COMPLETED).

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::order_dto::{
    AddOrderPartRequest, CreateOrderRequest, DeductionResponse, OrderFilters,
    OrderWithPartsResponse, UpdateOrderPartRequest, UpdateOrderRequest,
};
use crate::models::order::{OrderPriority, ServiceOrder};
use crate::models::order_part::OrderPartAssociation;
use crate::repositories::order_part_repository::OrderPartRepository;
use crate::repositories::order_repository::OrderRepository;
use crate::services::deduction_service::DeductionService;
use crate::services::order_lifecycle_service::OrderLifecycleService;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_non_negative_price;

pub struct OrderController {
    repository: OrderRepository,
    parts: OrderPartRepository,
    lifecycle: OrderLifecycleService,
    deduction: DeductionService,
}

impl OrderController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: OrderRepository::new(pool.clone()),
            parts: OrderPartRepository::new(pool.clone()),
            lifecycle: OrderLifecycleService::new(pool.clone()),
            deduction: DeductionService::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateOrderRequest,
    ) -> Result<ApiResponse<ServiceOrder>, AppError> {
        request.validate()?;

        let base_cost = request.base_cost.unwrap_or(Decimal::ZERO);
        validate_non_negative_price(base_cost)
            .map_err(|_| AppError::BadRequest("El coste base no puede ser negativo".to_string()))?;

        let order = self
            .repository
            .create(
                request.customer_id,
                request.vehicle_id,
                request.issue,
                request.description,
                base_cost,
                request.priority.unwrap_or(OrderPriority::Normal),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            order,
            "Orden de servicio creada exitosamente".to_string(),
        ))
    }

    pub async fn get_with_parts(&self, id: Uuid) -> Result<OrderWithPartsResponse, AppError> {
        let order = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Orden no encontrada".to_string()))?;

        let parts = self.parts.find_by_order(id).await?;

        Ok(OrderWithPartsResponse { order, parts })
    }

    pub async fn list(&self, filters: OrderFilters) -> Result<Vec<ServiceOrder>, AppError> {
        self.repository.list(&filters).await
    }

    /// Actualización de campos y/o transición de estado. El paso a
    /// COMPLETED descuenta el almacén en la misma transacción.
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateOrderRequest,
    ) -> Result<ApiResponse<OrderWithPartsResponse>, AppError> {
        request.validate()?;
        if let Some(base_cost) = request.base_cost {
            validate_non_negative_price(base_cost).map_err(|_| {
                AppError::BadRequest("El coste base no puede ser negativo".to_string())
            })?;
        }

        let outcome = self.lifecycle.update_order(id, request).await?;

        if !outcome.deducted.is_empty() {
            info!(
                order_id = %id,
                deducted = outcome.deducted.len(),
                "Orden completada: asociaciones descontadas del almacén"
            );
        }

        let parts = self.parts.find_by_order(id).await?;

        Ok(ApiResponse::success_with_message(
            OrderWithPartsResponse {
                order: outcome.order,
                parts,
            },
            "Orden actualizada exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }

    pub async fn add_part(
        &self,
        order_id: Uuid,
        request: AddOrderPartRequest,
    ) -> Result<ApiResponse<OrderPartAssociation>, AppError> {
        request.validate()?;
        validate_non_negative_price(request.price_at_time)
            .map_err(|_| AppError::BadRequest("El precio no puede ser negativo".to_string()))?;

        let association = self
            .parts
            .add_part(
                order_id,
                request.part_id,
                request.quantity,
                request.price_at_time,
                request.deduct_from_warehouse,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            association,
            "Pieza asociada a la orden".to_string(),
        ))
    }

    pub async fn update_part(
        &self,
        order_id: Uuid,
        association_id: Uuid,
        request: UpdateOrderPartRequest,
    ) -> Result<ApiResponse<OrderPartAssociation>, AppError> {
        request.validate()?;
        if let Some(price) = request.price_at_time {
            validate_non_negative_price(price)
                .map_err(|_| AppError::BadRequest("El precio no puede ser negativo".to_string()))?;
        }

        let association = self
            .parts
            .update_association(
                order_id,
                association_id,
                request.deduct_from_warehouse,
                request.quantity,
                request.price_at_time,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            association,
            "Asociación actualizada".to_string(),
        ))
    }

    pub async fn remove_part(&self, order_id: Uuid, association_id: Uuid) -> Result<(), AppError> {
        self.parts.remove(order_id, association_id).await
    }

    /// Camino explícito del ejecutor de descuentos
    pub async fn deduct_parts(
        &self,
        order_id: Uuid,
    ) -> Result<ApiResponse<DeductionResponse>, AppError> {
        let deducted = self.deduction.execute_for_order(order_id).await?;

        info!(
            order_id = %order_id,
            deducted = deducted.len(),
            "Descuento explícito de almacén ejecutado"
        );

        Ok(ApiResponse::success_with_message(
            DeductionResponse {
                order_id,
                deducted,
            },
            "Descuento de almacén ejecutado".to_string(),
        ))
    }
}
