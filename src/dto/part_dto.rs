use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

/// Request para dar de alta una pieza en el almacén
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePartRequest {
    #[validate(length(min = 2, max = 200))]
    pub name: String,

    #[validate(length(min = 1, max = 50))]
    pub part_number: String,

    #[validate(range(min = 0))]
    pub quantity: i32,

    pub price: Decimal,

    #[validate(range(min = 0))]
    pub min_quantity: Option<i32>,

    #[validate(length(max = 200))]
    pub supplier: Option<String>,
}

/// Request para actualizar metadatos de una pieza
///
/// La cantidad en stock no se actualiza por aquí: solo el ejecutor
/// de descuentos (decremento) y stock-in (incremento) la mutan.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePartRequest {
    #[validate(length(min = 2, max = 200))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub part_number: Option<String>,

    pub price: Option<Decimal>,

    #[validate(range(min = 0))]
    pub min_quantity: Option<i32>,

    #[validate(length(max = 200))]
    pub supplier: Option<String>,
}

/// Request de entrada de stock
#[derive(Debug, Deserialize, Validate)]
pub struct StockInRequest {
    #[validate(range(min = 1))]
    pub quantity: i32,
}
