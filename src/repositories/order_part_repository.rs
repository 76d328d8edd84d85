//! Repositorio de asociaciones orden-pieza
//!
//! Cada mutación (alta, toggle, actualización, baja) corre en una
//! transacción que bloquea la fila de la orden y recalcula
//! `total_cost` desde el conjunto de asociaciones. El total nunca se
//! mantiene por deltas read-modify-write: así dos mutaciones
//! concurrentes sobre la misma orden no pueden perder incrementos.

use crate::models::order::ServiceOrder;
use crate::models::order_part::OrderPartAssociation;
use crate::utils::errors::AppError;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

pub struct OrderPartRepository {
    pool: PgPool,
}

impl OrderPartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn add_part(
        &self,
        order_id: Uuid,
        part_id: Uuid,
        quantity: i32,
        price_at_time: Decimal,
        deduct_from_warehouse: bool,
    ) -> Result<OrderPartAssociation, AppError> {
        let mut tx = self.pool.begin().await?;

        lock_active_order(&mut tx, order_id).await?;

        // La pieza debe existir en el catálogo; el precio congelado
        // lo aporta el caller y no se rederiva de aquí
        let part_exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM parts WHERE id = $1)")
                .bind(part_id)
                .fetch_one(&mut *tx)
                .await?;
        if !part_exists.0 {
            return Err(AppError::NotFound(format!(
                "Pieza '{}' no encontrada",
                part_id
            )));
        }

        let association = sqlx::query_as::<_, OrderPartAssociation>(
            r#"
            INSERT INTO order_parts
                (id, order_id, part_id, quantity, price_at_time, deduct_from_warehouse, warehouse_deducted_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NULL, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(order_id)
        .bind(part_id)
        .bind(quantity)
        .bind(price_at_time)
        .bind(deduct_from_warehouse)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        recompute_order_total(&mut tx, order_id).await?;
        tx.commit().await?;

        Ok(association)
    }

    /// Toggle de inclusión y/o actualización de cantidad o precio.
    ///
    /// El toggle solo controla la inclusión en el total facturado y
    /// la elegibilidad para el descuento físico posterior; el
    /// inventario no se toca aquí.
    pub async fn update_association(
        &self,
        order_id: Uuid,
        association_id: Uuid,
        deduct_from_warehouse: Option<bool>,
        quantity: Option<i32>,
        price_at_time: Option<Decimal>,
    ) -> Result<OrderPartAssociation, AppError> {
        let mut tx = self.pool.begin().await?;

        lock_active_order(&mut tx, order_id).await?;
        let current = lock_association(&mut tx, order_id, association_id).await?;

        if current.is_frozen() {
            return Err(AppError::Conflict(
                "La asociación ya fue descontada del almacén y está congelada".to_string(),
            ));
        }

        let association = sqlx::query_as::<_, OrderPartAssociation>(
            r#"
            UPDATE order_parts
            SET deduct_from_warehouse = $2, quantity = $3, price_at_time = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(association_id)
        .bind(deduct_from_warehouse.unwrap_or(current.deduct_from_warehouse))
        .bind(quantity.unwrap_or(current.quantity))
        .bind(price_at_time.unwrap_or(current.price_at_time))
        .fetch_one(&mut *tx)
        .await?;

        recompute_order_total(&mut tx, order_id).await?;
        tx.commit().await?;

        Ok(association)
    }

    pub async fn remove(&self, order_id: Uuid, association_id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        lock_active_order(&mut tx, order_id).await?;
        let current = lock_association(&mut tx, order_id, association_id).await?;

        // Política: una asociación ya descontada no se elimina (el
        // stock ya salió del almacén y no se restaura)
        if current.is_frozen() {
            return Err(AppError::Conflict(
                "La asociación ya fue descontada del almacén y no puede eliminarse".to_string(),
            ));
        }

        sqlx::query("DELETE FROM order_parts WHERE id = $1")
            .bind(association_id)
            .execute(&mut *tx)
            .await?;

        recompute_order_total(&mut tx, order_id).await?;
        tx.commit().await?;

        Ok(())
    }

    pub async fn find_by_order(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<OrderPartAssociation>, AppError> {
        let associations = sqlx::query_as::<_, OrderPartAssociation>(
            "SELECT * FROM order_parts WHERE order_id = $1 ORDER BY created_at",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(associations)
    }
}

/// Bloquear la fila de la orden y verificar que no sea terminal.
///
/// El `FOR UPDATE` serializa todas las mutaciones de asociaciones de
/// una misma orden (disciplina de escritor único por orden).
pub async fn lock_active_order(
    tx: &mut Transaction<'_, Postgres>,
    order_id: Uuid,
) -> Result<ServiceOrder, AppError> {
    let order = sqlx::query_as::<_, ServiceOrder>(
        "SELECT * FROM service_orders WHERE id = $1 FOR UPDATE",
    )
    .bind(order_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Orden '{}' no encontrada", order_id)))?;

    if order.status.is_terminal() {
        return Err(AppError::Conflict(format!(
            "La orden está en estado terminal {} y no admite cambios",
            order.status.as_str()
        )));
    }

    Ok(order)
}

/// Cargar una asociación de la orden con bloqueo de fila
async fn lock_association(
    tx: &mut Transaction<'_, Postgres>,
    order_id: Uuid,
    association_id: Uuid,
) -> Result<OrderPartAssociation, AppError> {
    sqlx::query_as::<_, OrderPartAssociation>(
        "SELECT * FROM order_parts WHERE id = $1 AND order_id = $2 FOR UPDATE",
    )
    .bind(association_id)
    .bind(order_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| {
        AppError::NotFound(format!(
            "Asociación '{}' no encontrada en la orden '{}'",
            association_id, order_id
        ))
    })
}

/// Recalcular `total_cost` desde el conjunto de asociaciones.
///
/// total_cost = base_cost + SUM(price_at_time de asociaciones con
/// deduct_from_warehouse = true). Siempre dentro de la transacción de
/// la mutación que lo invalidó.
pub async fn recompute_order_total(
    tx: &mut Transaction<'_, Postgres>,
    order_id: Uuid,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE service_orders
        SET total_cost = base_cost + COALESCE(
                (SELECT SUM(price_at_time)
                 FROM order_parts
                 WHERE order_id = $1 AND deduct_from_warehouse),
                0),
            updated_at = $2
        WHERE id = $1
        "#,
    )
    .bind(order_id)
    .bind(Utc::now())
    .execute(&mut **tx)
    .await?;

    Ok(())
}
