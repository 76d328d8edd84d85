//! Modelo de ServiceOrder
//!
//! Órdenes de servicio del taller y su máquina de estados.
//! COMPLETED y CANCELLED son estados terminales: una vez alcanzados
//! no se permite ninguna mutación adicional de la orden ni de sus
//! asociaciones de piezas.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado de la orden - mapea al ENUM order_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,
    InProgress,
    WaitingForParts,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Indica si el estado es terminal (sin transiciones de salida)
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Verifica si la transición `self -> target` está permitida.
    ///
    /// Los estados activos pueden moverse libremente entre sí,
    /// completarse o cancelarse. Los estados terminales no tienen
    /// transiciones de salida.
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        if *self == target {
            return false;
        }
        true
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "NEW",
            OrderStatus::InProgress => "IN_PROGRESS",
            OrderStatus::WaitingForParts => "WAITING_FOR_PARTS",
            OrderStatus::Ready => "READY",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

/// Prioridad de la orden - mapea al ENUM order_priority
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "order_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderPriority {
    Low,
    Normal,
    High,
    Urgent,
}

/// ServiceOrder principal - mapea a la tabla service_orders
///
/// Invariante de coste: en estado estable
/// `total_cost = base_cost + SUM(price_at_time de asociaciones incluidas)`.
/// El recálculo se hace siempre dentro de la misma transacción que la
/// mutación de la asociación (nunca read-modify-write en dos pasos).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceOrder {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub status: OrderStatus,
    pub priority: OrderPriority,
    pub issue: String,
    pub description: Option<String>,
    pub base_cost: Decimal,
    pub total_cost: Decimal,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTIVE: [OrderStatus; 4] = [
        OrderStatus::New,
        OrderStatus::InProgress,
        OrderStatus::WaitingForParts,
        OrderStatus::Ready,
    ];

    #[test]
    fn test_terminal_states() {
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        for status in ACTIVE {
            assert!(!status.is_terminal());
        }
    }

    #[test]
    fn test_cancelled_reachable_from_any_active_state() {
        for status in ACTIVE {
            assert!(status.can_transition_to(OrderStatus::Cancelled));
        }
    }

    #[test]
    fn test_completed_reachable_from_any_active_state() {
        for status in ACTIVE {
            assert!(status.can_transition_to(OrderStatus::Completed));
        }
    }

    #[test]
    fn test_no_transitions_out_of_terminal_states() {
        for target in [
            OrderStatus::New,
            OrderStatus::InProgress,
            OrderStatus::WaitingForParts,
            OrderStatus::Ready,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert!(!OrderStatus::Completed.can_transition_to(target));
            assert!(!OrderStatus::Cancelled.can_transition_to(target));
        }
    }

    #[test]
    fn test_self_transition_rejected() {
        assert!(!OrderStatus::New.can_transition_to(OrderStatus::New));
    }

    #[test]
    fn test_active_states_move_freely() {
        assert!(OrderStatus::New.can_transition_to(OrderStatus::InProgress));
        assert!(OrderStatus::InProgress.can_transition_to(OrderStatus::WaitingForParts));
        assert!(OrderStatus::WaitingForParts.can_transition_to(OrderStatus::Ready));
        // También se permite retroceder, p.ej. READY -> IN_PROGRESS
        assert!(OrderStatus::Ready.can_transition_to(OrderStatus::InProgress));
    }
}
