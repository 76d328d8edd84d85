//! Repositorio de órdenes de servicio
//!
//! Alta, consulta, listado y baja de órdenes. Las actualizaciones de
//! campos y las transiciones de estado van por
//! services/order_lifecycle_service.rs, que las ejecuta en una sola
//! transacción junto con el descuento de almacén cuando aplica.

use crate::dto::order_dto::OrderFilters;
use crate::models::order::{OrderPriority, OrderStatus, ServiceOrder};
use crate::utils::errors::AppError;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        customer_id: Uuid,
        vehicle_id: Uuid,
        issue: String,
        description: Option<String>,
        base_cost: Decimal,
        priority: OrderPriority,
    ) -> Result<ServiceOrder, AppError> {
        // Cliente y vehículo deben existir
        let customer_exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM customers WHERE id = $1)")
                .bind(customer_id)
                .fetch_one(&self.pool)
                .await?;
        if !customer_exists.0 {
            return Err(AppError::NotFound(format!(
                "Cliente '{}' no encontrado",
                customer_id
            )));
        }

        let vehicle_exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE id = $1)")
                .bind(vehicle_id)
                .fetch_one(&self.pool)
                .await?;
        if !vehicle_exists.0 {
            return Err(AppError::NotFound(format!(
                "Vehículo '{}' no encontrado",
                vehicle_id
            )));
        }

        let now = Utc::now();
        // Sin asociaciones todavía: total_cost arranca igual a base_cost
        let order = sqlx::query_as::<_, ServiceOrder>(
            r#"
            INSERT INTO service_orders
                (id, customer_id, vehicle_id, status, priority, issue, description,
                 base_cost, total_cost, start_date, end_date, created_at, updated_at)
            VALUES ($1, $2, $3, 'new', $4, $5, $6, $7, $7, $8, NULL, $8, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(customer_id)
        .bind(vehicle_id)
        .bind(priority)
        .bind(issue)
        .bind(description)
        .bind(base_cost)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(order)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceOrder>, AppError> {
        let order = sqlx::query_as::<_, ServiceOrder>("SELECT * FROM service_orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    pub async fn list(&self, filters: &OrderFilters) -> Result<Vec<ServiceOrder>, AppError> {
        let orders = sqlx::query_as::<_, ServiceOrder>(
            r#"
            SELECT * FROM service_orders
            WHERE ($1::order_status IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR customer_id = $2)
              AND ($3::order_priority IS NULL OR priority = $3)
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(filters.status)
        .bind(filters.customer_id)
        .bind(filters.priority)
        .bind(filters.limit.unwrap_or(100))
        .bind(filters.offset.unwrap_or(0))
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let order = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Orden no encontrada".to_string()))?;

        // Las órdenes completadas son registros de facturación
        if order.status == OrderStatus::Completed {
            return Err(AppError::Conflict(
                "Una orden completada no puede eliminarse".to_string(),
            ));
        }

        // Las asociaciones y tareas caen por ON DELETE CASCADE
        sqlx::query("DELETE FROM service_orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
