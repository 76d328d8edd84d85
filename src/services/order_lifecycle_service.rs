//! Ciclo de vida de las órdenes de servicio
//!
//! Toda actualización de una orden (campos y/o estado) corre aquí en
//! una sola transacción. La transición a COMPLETED ejecuta el lote de
//! descuentos de almacén en la misma transacción que el cambio de
//! estado: si falta stock de cualquier pieza, la transición falla y
//! la orden permanece en su estado anterior sin escrituras parciales.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::order_dto::UpdateOrderRequest;
use crate::models::order::{OrderStatus, ServiceOrder};
use crate::models::order_part::OrderPartAssociation;
use crate::repositories::order_part_repository::{lock_active_order, recompute_order_total};
use crate::services::deduction_service::deduct_batch;
use crate::utils::errors::AppError;

pub struct OrderLifecycleService {
    pool: PgPool,
}

/// Resultado de una actualización de orden
pub struct OrderUpdateOutcome {
    pub order: ServiceOrder,
    /// Asociaciones descontadas si la orden pasó a COMPLETED
    pub deducted: Vec<OrderPartAssociation>,
}

impl OrderLifecycleService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn update_order(
        &self,
        order_id: Uuid,
        request: UpdateOrderRequest,
    ) -> Result<OrderUpdateOutcome, AppError> {
        let mut tx = self.pool.begin().await?;

        // Bloquea la orden y rechaza mutaciones sobre estados terminales
        let current = lock_active_order(&mut tx, order_id).await?;

        // Un status igual al actual se trata como "sin cambio de estado"
        let target = request.status.filter(|s| *s != current.status);

        if let Some(target) = target {
            if !current.status.can_transition_to(target) {
                return Err(AppError::Conflict(format!(
                    "Transición de estado no permitida: {} -> {}",
                    current.status.as_str(),
                    target.as_str()
                )));
            }
        }

        // Completar la orden y descontar el almacén son una sola
        // unidad: primero el lote de descuentos, en esta misma
        // transacción
        let deducted = if target == Some(OrderStatus::Completed) {
            deduct_batch(&mut tx, order_id).await?
        } else {
            Vec::new()
        };

        let now = Utc::now();
        let end_date = match target {
            // Al completar se cierra la orden si el caller no mandó fecha
            Some(OrderStatus::Completed) => request.end_date.or(Some(now)),
            _ => request.end_date.or(current.end_date),
        };

        sqlx::query(
            r#"
            UPDATE service_orders
            SET status = $2, issue = $3, description = $4, base_cost = $5,
                priority = $6, end_date = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(order_id)
        .bind(target.unwrap_or(current.status))
        .bind(request.issue.unwrap_or(current.issue))
        .bind(request.description.or(current.description))
        .bind(request.base_cost.unwrap_or(current.base_cost))
        .bind(request.priority.unwrap_or(current.priority))
        .bind(end_date)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        // base_cost pudo cambiar: el total siempre se recalcula desde
        // el conjunto de asociaciones, nunca por deltas
        recompute_order_total(&mut tx, order_id).await?;

        let order = sqlx::query_as::<_, ServiceOrder>("SELECT * FROM service_orders WHERE id = $1")
            .bind(order_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(OrderUpdateOutcome { order, deducted })
    }
}
