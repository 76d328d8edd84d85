//! Modelo de Part
//!
//! Piezas del almacén. La cantidad en stock solo la mutan el
//! ejecutor de descuentos (decremento) y la operación de entrada
//! de stock.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Part principal - mapea a la tabla parts
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Part {
    pub id: Uuid,
    pub name: String,
    pub part_number: String,
    /// Cantidad en almacén, nunca negativa
    pub quantity: i32,
    pub price: Decimal,
    /// Umbral de stock bajo
    pub min_quantity: i32,
    pub supplier: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Part {
    /// Indica si la pieza está por debajo de su umbral de stock
    pub fn is_low_stock(&self) -> bool {
        self.quantity < self.min_quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(quantity: i32, min_quantity: i32) -> Part {
        Part {
            id: Uuid::new_v4(),
            name: "Pastillas de freno".to_string(),
            part_number: "BP-204".to_string(),
            quantity,
            price: Decimal::new(4550, 2),
            min_quantity,
            supplier: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_low_stock() {
        assert!(part(2, 5).is_low_stock());
        assert!(!part(5, 5).is_low_stock());
        assert!(!part(10, 5).is_low_stock());
    }
}
