//! Ejecutor de descuentos de almacén
//!
//! Descuenta del inventario las asociaciones elegibles de una orden:
//! `deduct_from_warehouse = true AND warehouse_deducted_at IS NULL`.
//! El lote completo corre en una sola transacción: si a cualquier
//! pieza le falta stock, ningún descuento del lote sobrevive.
//!
//! El decremento usa un UPDATE condicional
//! (`... SET quantity = quantity - n WHERE quantity >= n`) para que
//! dos descuentos concurrentes no puedan dejar el stock en negativo,
//! y `warehouse_deducted_at IS NULL` actúa como token que impide el
//! doble descuento bajo reintentos.

use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::order_part::OrderPartAssociation;
use crate::repositories::order_part_repository::lock_active_order;
use crate::utils::errors::AppError;

pub struct DeductionService {
    pool: PgPool,
}

impl DeductionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Camino explícito: `POST /api/order/:id/deduct-parts`.
    ///
    /// También es todo-o-nada: o se descuenta el lote elegible
    /// completo o no se descuenta nada. Ejecutarlo de nuevo cuando ya
    /// no queda nada elegible es un no-op que devuelve lista vacía.
    pub async fn execute_for_order(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<OrderPartAssociation>, AppError> {
        let mut tx = self.pool.begin().await?;

        lock_active_order(&mut tx, order_id).await?;
        let deducted = deduct_batch(&mut tx, order_id).await?;

        tx.commit().await?;
        Ok(deducted)
    }
}

/// Descontar el lote elegible de una orden dentro de la transacción
/// del caller.
///
/// El caller debe tener bloqueada la fila de la orden. Devuelve las
/// asociaciones descontadas en esta ejecución.
pub async fn deduct_batch(
    tx: &mut Transaction<'_, Postgres>,
    order_id: Uuid,
) -> Result<Vec<OrderPartAssociation>, AppError> {
    // Lote de descuento: elegibles y aún no descontadas. El FOR UPDATE
    // serializa lotes concurrentes sobre las mismas asociaciones.
    let batch = sqlx::query_as::<_, OrderPartAssociation>(
        r#"
        SELECT * FROM order_parts
        WHERE order_id = $1
          AND deduct_from_warehouse
          AND warehouse_deducted_at IS NULL
        ORDER BY created_at
        FOR UPDATE
        "#,
    )
    .bind(order_id)
    .fetch_all(&mut **tx)
    .await?;

    let now = Utc::now();
    let mut deducted = Vec::with_capacity(batch.len());

    for association in batch {
        // Decremento condicional: cero filas afectadas significa
        // stock insuficiente y aborta el lote entero (rollback al
        // soltar la transacción)
        let result = sqlx::query(
            "UPDATE parts SET quantity = quantity - $2 WHERE id = $1 AND quantity >= $2",
        )
        .bind(association.part_id)
        .bind(association.quantity)
        .execute(&mut **tx)
        .await?;

        if result.rows_affected() == 0 {
            let (part_name, available): (String, i32) =
                sqlx::query_as("SELECT name, quantity FROM parts WHERE id = $1")
                    .bind(association.part_id)
                    .fetch_one(&mut **tx)
                    .await?;

            return Err(AppError::InsufficientStock {
                part_name,
                available,
                needed: association.quantity,
            });
        }

        let stamped = sqlx::query_as::<_, OrderPartAssociation>(
            r#"
            UPDATE order_parts
            SET warehouse_deducted_at = $2
            WHERE id = $1 AND warehouse_deducted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(association.id)
        .bind(now)
        .fetch_one(&mut **tx)
        .await?;

        deducted.push(stamped);
    }

    Ok(deducted)
}

// Tests de integración contra PostgreSQL. Se ejecutan con
// `cargo test -- --ignored` y DATABASE_URL apuntando a una base con
// el schema de migrations/ aplicado.
#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    use crate::dto::order_dto::UpdateOrderRequest;
    use crate::models::order::{OrderPriority, OrderStatus, ServiceOrder};
    use crate::models::part::Part;
    use crate::repositories::customer_repository::CustomerRepository;
    use crate::repositories::order_part_repository::OrderPartRepository;
    use crate::repositories::order_repository::OrderRepository;
    use crate::repositories::part_repository::PartRepository;
    use crate::repositories::vehicle_repository::VehicleRepository;
    use crate::services::order_lifecycle_service::OrderLifecycleService;

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        PgPool::connect(&url).await.expect("conexión de test")
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    fn update_status(status: OrderStatus) -> UpdateOrderRequest {
        UpdateOrderRequest {
            status: Some(status),
            issue: None,
            description: None,
            base_cost: None,
            priority: None,
            end_date: None,
        }
    }

    async fn seed_order(pool: &PgPool, base_cost: Decimal) -> ServiceOrder {
        let suffix = &Uuid::new_v4().to_string()[..8];

        let customer = CustomerRepository::new(pool.clone())
            .create(format!("Cliente {}", suffix), None, None, None)
            .await
            .unwrap();

        let vehicle = VehicleRepository::new(pool.clone())
            .create(
                customer.id,
                format!("TST-{}", suffix),
                Some("SEAT".to_string()),
                Some("León".to_string()),
                Some(2018),
                None,
            )
            .await
            .unwrap();

        OrderRepository::new(pool.clone())
            .create(
                customer.id,
                vehicle.id,
                "Ruido en la suspensión".to_string(),
                None,
                base_cost,
                OrderPriority::Normal,
            )
            .await
            .unwrap()
    }

    async fn seed_part(pool: &PgPool, quantity: i32, price: Decimal) -> Part {
        let suffix = &Uuid::new_v4().to_string()[..8];
        PartRepository::new(pool.clone())
            .create(
                format!("Pieza {}", suffix),
                format!("PN-{}", suffix),
                quantity,
                price,
                0,
                None,
            )
            .await
            .unwrap()
    }

    async fn order_by_id(pool: &PgPool, id: Uuid) -> ServiceOrder {
        OrderRepository::new(pool.clone())
            .find_by_id(id)
            .await
            .unwrap()
            .unwrap()
    }

    async fn part_by_id(pool: &PgPool, id: Uuid) -> Part {
        PartRepository::new(pool.clone())
            .find_by_id(id)
            .await
            .unwrap()
            .unwrap()
    }

    // Escenario de referencia: base 500; alta de pieza incluida de 100
    // -> total 600; toggle a excluida -> 500; baja -> 500
    #[tokio::test]
    #[ignore = "requiere DATABASE_URL con PostgreSQL"]
    async fn test_total_follows_association_mutations() {
        let pool = test_pool().await;
        let order = seed_order(&pool, dec("500")).await;
        let part = seed_part(&pool, 10, dec("100")).await;
        let order_parts = OrderPartRepository::new(pool.clone());

        let assoc = order_parts
            .add_part(order.id, part.id, 1, dec("100"), true)
            .await
            .unwrap();
        assert_eq!(order_by_id(&pool, order.id).await.total_cost, dec("600"));

        order_parts
            .update_association(order.id, assoc.id, Some(false), None, None)
            .await
            .unwrap();
        assert_eq!(order_by_id(&pool, order.id).await.total_cost, dec("500"));

        order_parts.remove(order.id, assoc.id).await.unwrap();
        assert_eq!(order_by_id(&pool, order.id).await.total_cost, dec("500"));
    }

    #[tokio::test]
    #[ignore = "requiere DATABASE_URL con PostgreSQL"]
    async fn test_insufficient_stock_aborts_whole_batch() {
        let pool = test_pool().await;
        let order = seed_order(&pool, dec("0")).await;
        let plenty = seed_part(&pool, 10, dec("20")).await;
        let scarce = seed_part(&pool, 5, dec("30")).await;
        let order_parts = OrderPartRepository::new(pool.clone());

        order_parts
            .add_part(order.id, plenty.id, 2, dec("20"), true)
            .await
            .unwrap();
        order_parts
            .add_part(order.id, scarce.id, 6, dec("30"), true)
            .await
            .unwrap();

        let result = DeductionService::new(pool.clone())
            .execute_for_order(order.id)
            .await;

        match result {
            Err(AppError::InsufficientStock {
                available, needed, ..
            }) => {
                assert_eq!(available, 5);
                assert_eq!(needed, 6);
            }
            other => panic!("se esperaba InsufficientStock, llegó {:?}", other.map(|_| ())),
        }

        // Ningún descuento parcial sobrevive
        assert_eq!(part_by_id(&pool, plenty.id).await.quantity, 10);
        assert_eq!(part_by_id(&pool, scarce.id).await.quantity, 5);
    }

    #[tokio::test]
    #[ignore = "requiere DATABASE_URL con PostgreSQL"]
    async fn test_deduction_is_idempotent() {
        let pool = test_pool().await;
        let order = seed_order(&pool, dec("0")).await;
        let part = seed_part(&pool, 10, dec("15")).await;
        let order_parts = OrderPartRepository::new(pool.clone());

        order_parts
            .add_part(order.id, part.id, 2, dec("15"), true)
            .await
            .unwrap();

        let service = DeductionService::new(pool.clone());

        let first = service.execute_for_order(order.id).await.unwrap();
        assert_eq!(first.len(), 1);
        assert!(first[0].warehouse_deducted_at.is_some());
        assert_eq!(part_by_id(&pool, part.id).await.quantity, 8);

        // Segunda ejecución: no-op, cantidades idénticas
        let second = service.execute_for_order(order.id).await.unwrap();
        assert!(second.is_empty());
        assert_eq!(part_by_id(&pool, part.id).await.quantity, 8);
    }

    #[tokio::test]
    #[ignore = "requiere DATABASE_URL con PostgreSQL"]
    async fn test_completion_deducts_and_freezes_order() {
        let pool = test_pool().await;
        let order = seed_order(&pool, dec("100")).await;
        let part = seed_part(&pool, 4, dec("50")).await;
        let order_parts = OrderPartRepository::new(pool.clone());

        let assoc = order_parts
            .add_part(order.id, part.id, 3, dec("50"), true)
            .await
            .unwrap();

        let lifecycle = OrderLifecycleService::new(pool.clone());
        let outcome = lifecycle
            .update_order(order.id, update_status(OrderStatus::Completed))
            .await
            .unwrap();

        assert_eq!(outcome.order.status, OrderStatus::Completed);
        assert_eq!(outcome.deducted.len(), 1);
        assert_eq!(part_by_id(&pool, part.id).await.quantity, 1);

        // La orden terminal ya no admite mutaciones
        let frozen = order_parts
            .update_association(order.id, assoc.id, Some(false), None, None)
            .await;
        assert!(matches!(frozen, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    #[ignore = "requiere DATABASE_URL con PostgreSQL"]
    async fn test_failed_completion_leaves_order_and_stock_untouched() {
        let pool = test_pool().await;
        let order = seed_order(&pool, dec("100")).await;
        let plenty = seed_part(&pool, 10, dec("20")).await;
        let scarce = seed_part(&pool, 1, dec("30")).await;
        let order_parts = OrderPartRepository::new(pool.clone());

        order_parts
            .add_part(order.id, plenty.id, 2, dec("20"), true)
            .await
            .unwrap();
        order_parts
            .add_part(order.id, scarce.id, 2, dec("30"), true)
            .await
            .unwrap();

        let lifecycle = OrderLifecycleService::new(pool.clone());
        let result = lifecycle
            .update_order(order.id, update_status(OrderStatus::Completed))
            .await;
        assert!(matches!(result, Err(AppError::InsufficientStock { .. })));

        // La transición y el descuento son una sola unidad
        assert_eq!(order_by_id(&pool, order.id).await.status, OrderStatus::New);
        assert_eq!(part_by_id(&pool, plenty.id).await.quantity, 10);
        assert_eq!(part_by_id(&pool, scarce.id).await.quantity, 1);
    }

    #[tokio::test]
    #[ignore = "requiere DATABASE_URL con PostgreSQL"]
    async fn test_concurrent_deductions_never_double_deduct() {
        let pool = test_pool().await;
        let order = seed_order(&pool, dec("0")).await;
        let part = seed_part(&pool, 3, dec("10")).await;

        OrderPartRepository::new(pool.clone())
            .add_part(order.id, part.id, 2, dec("10"), true)
            .await
            .unwrap();

        let a = DeductionService::new(pool.clone());
        let b = DeductionService::new(pool.clone());
        let (ra, rb) = tokio::join!(
            a.execute_for_order(order.id),
            b.execute_for_order(order.id)
        );

        // Exactamente una ejecución descuenta; la otra ve el lote vacío
        let deducted_total = ra.unwrap().len() + rb.unwrap().len();
        assert_eq!(deducted_total, 1);
        assert_eq!(part_by_id(&pool, part.id).await.quantity, 1);
    }
}
