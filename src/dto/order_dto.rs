use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::order::{OrderPriority, OrderStatus, ServiceOrder};
use crate::models::order_part::OrderPartAssociation;

/// Request para crear una orden de servicio
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,

    #[validate(length(min = 3, max = 500))]
    pub issue: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub base_cost: Option<Decimal>,
    pub priority: Option<OrderPriority>,
}

/// Request para actualizar una orden existente.
///
/// Si `status` pasa a COMPLETED, el descuento de almacén se ejecuta
/// en la misma transacción que el cambio de estado: si falta stock
/// la orden permanece en su estado anterior.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateOrderRequest {
    pub status: Option<OrderStatus>,

    #[validate(length(min = 3, max = 500))]
    pub issue: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub base_cost: Option<Decimal>,
    pub priority: Option<OrderPriority>,
    pub end_date: Option<chrono::DateTime<chrono::Utc>>,
}

/// Request para asociar una pieza a una orden
#[derive(Debug, Deserialize, Validate)]
pub struct AddOrderPartRequest {
    pub part_id: Uuid,

    #[validate(range(min = 1))]
    pub quantity: i32,

    /// Precio congelado suministrado por el caller; no se rederiva
    /// del catálogo
    pub price_at_time: Decimal,

    #[serde(default = "default_deduct")]
    pub deduct_from_warehouse: bool,
}

fn default_deduct() -> bool {
    true
}

/// Request para togglear o actualizar una asociación existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateOrderPartRequest {
    pub deduct_from_warehouse: Option<bool>,

    #[validate(range(min = 1))]
    pub quantity: Option<i32>,

    pub price_at_time: Option<Decimal>,
}

/// Response de una orden con sus asociaciones de piezas
#[derive(Debug, Serialize)]
pub struct OrderWithPartsResponse {
    #[serde(flatten)]
    pub order: ServiceOrder,
    pub parts: Vec<OrderPartAssociation>,
}

/// Response del ejecutor de descuentos
#[derive(Debug, Serialize)]
pub struct DeductionResponse {
    pub order_id: Uuid,
    /// Asociaciones descontadas en esta ejecución (vacío si no había
    /// ninguna elegible: la ejecución repetida es un no-op)
    pub deducted: Vec<OrderPartAssociation>,
}

/// Filtros de listado de órdenes
#[derive(Debug, Deserialize)]
pub struct OrderFilters {
    pub status: Option<OrderStatus>,
    pub customer_id: Option<Uuid>,
    pub priority: Option<OrderPriority>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
