//! Modelo de OrderPartAssociation
//!
//! Registro de unión entre una orden de servicio y una pieza del
//! almacén, con cantidad y precio congelado en el momento del alta.
//!
//! `warehouse_deducted_at` se escribe como máximo una vez. Una vez
//! fijado, la asociación queda congelada: no se puede volver a
//! descontar, ni togglear, ni actualizar, ni eliminar.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// OrderPartAssociation principal - mapea a la tabla order_parts
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderPartAssociation {
    pub id: Uuid,
    pub order_id: Uuid,
    pub part_id: Uuid,
    /// Unidades físicas que consumirá la orden (> 0)
    pub quantity: i32,
    /// Precio congelado al crear la asociación; nunca se rederiva
    /// del catálogo aunque el precio de la pieza cambie después
    pub price_at_time: Decimal,
    /// Si la asociación cuenta para el total facturado y es
    /// elegible para descuento físico de almacén
    pub deduct_from_warehouse: bool,
    /// Momento del descuento físico; NULL = aún no descontada.
    /// Es a la vez el filtro de elegibilidad y el token que impide
    /// el doble descuento bajo reintentos
    pub warehouse_deducted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl OrderPartAssociation {
    /// Elegible para descuento: incluida y aún no descontada
    pub fn is_eligible_for_deduction(&self) -> bool {
        self.deduct_from_warehouse && self.warehouse_deducted_at.is_none()
    }

    /// Congelada: ya descontada del almacén
    pub fn is_frozen(&self) -> bool {
        self.warehouse_deducted_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assoc(deduct: bool, deducted: bool) -> OrderPartAssociation {
        OrderPartAssociation {
            id: Uuid::new_v4(),
            order_id: Uuid::new_v4(),
            part_id: Uuid::new_v4(),
            quantity: 2,
            price_at_time: Decimal::new(10000, 2),
            deduct_from_warehouse: deduct,
            warehouse_deducted_at: deducted.then(Utc::now),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_eligibility() {
        assert!(assoc(true, false).is_eligible_for_deduction());
        assert!(!assoc(false, false).is_eligible_for_deduction());
        assert!(!assoc(true, true).is_eligible_for_deduction());
        assert!(!assoc(false, true).is_eligible_for_deduction());
    }

    #[test]
    fn test_frozen_after_deduction() {
        assert!(assoc(true, true).is_frozen());
        assert!(!assoc(true, false).is_frozen());
    }
}
