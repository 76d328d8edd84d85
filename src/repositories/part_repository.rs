//! Repositorio de piezas del almacén
//!
//! La cantidad en stock solo se muta aquí vía `stock_in` (incremento)
//! y en el ejecutor de descuentos (decremento condicional). El update
//! genérico no toca `quantity`.

use crate::models::part::Part;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_positive_quantity;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PartRepository {
    pool: PgPool,
}

impl PartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: String,
        part_number: String,
        quantity: i32,
        price: Decimal,
        min_quantity: i32,
        supplier: Option<String>,
    ) -> Result<Part, AppError> {
        let part = sqlx::query_as::<_, Part>(
            r#"
            INSERT INTO parts (id, name, part_number, quantity, price, min_quantity, supplier, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(part_number)
        .bind(quantity)
        .bind(price)
        .bind(min_quantity)
        .bind(supplier)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(part)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Part>, AppError> {
        let part = sqlx::query_as::<_, Part>("SELECT * FROM parts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(part)
    }

    pub async fn part_number_exists(&self, part_number: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM parts WHERE part_number = $1)")
                .bind(part_number)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn list(&self) -> Result<Vec<Part>, AppError> {
        let parts = sqlx::query_as::<_, Part>("SELECT * FROM parts ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(parts)
    }

    /// Piezas por debajo de su umbral de stock mínimo
    pub async fn list_low_stock(&self) -> Result<Vec<Part>, AppError> {
        let parts = sqlx::query_as::<_, Part>(
            "SELECT * FROM parts WHERE quantity < min_quantity ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(parts)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        part_number: Option<String>,
        price: Option<Decimal>,
        min_quantity: Option<i32>,
        supplier: Option<String>,
    ) -> Result<Part, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pieza no encontrada".to_string()))?;

        let part = sqlx::query_as::<_, Part>(
            r#"
            UPDATE parts
            SET name = $2, part_number = $3, price = $4, min_quantity = $5, supplier = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name.unwrap_or(current.name))
        .bind(part_number.unwrap_or(current.part_number))
        .bind(price.unwrap_or(current.price))
        .bind(min_quantity.unwrap_or(current.min_quantity))
        .bind(supplier.or(current.supplier))
        .fetch_one(&self.pool)
        .await?;

        Ok(part)
    }

    /// Entrada de stock: incremento atómico, sin read-modify-write
    pub async fn stock_in(&self, id: Uuid, quantity: i32) -> Result<Part, AppError> {
        validate_positive_quantity(quantity).map_err(|_| {
            AppError::BadRequest("La cantidad de entrada debe ser positiva".to_string())
        })?;

        let part = sqlx::query_as::<_, Part>(
            r#"
            UPDATE parts
            SET quantity = quantity + $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Pieza no encontrada".to_string()))?;

        Ok(part)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        // Una pieza referenciada por alguna orden no se puede borrar
        let referenced: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM order_parts WHERE part_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        if referenced.0 {
            return Err(AppError::Conflict(
                "La pieza está asociada a órdenes de servicio".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM parts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Pieza no encontrada".to_string()));
        }

        Ok(())
    }
}
