use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::part_dto::{CreatePartRequest, StockInRequest, UpdatePartRequest};
use crate::models::part::Part;
use crate::repositories::part_repository::PartRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppError};
use crate::utils::validation::validate_non_negative_price;

pub struct PartController {
    repository: PartRepository,
}

impl PartController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PartRepository::new(pool),
        }
    }

    pub async fn create(&self, request: CreatePartRequest) -> Result<ApiResponse<Part>, AppError> {
        request.validate()?;
        validate_non_negative_price(request.price)
            .map_err(|_| AppError::BadRequest("El precio no puede ser negativo".to_string()))?;

        if self
            .repository
            .part_number_exists(&request.part_number)
            .await?
        {
            return Err(conflict_error("Part", "part_number", &request.part_number));
        }

        let part = self
            .repository
            .create(
                request.name,
                request.part_number,
                request.quantity,
                request.price,
                request.min_quantity.unwrap_or(0),
                request.supplier,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            part,
            "Pieza creada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Part, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Part", &id.to_string()))
    }

    pub async fn list(&self) -> Result<Vec<Part>, AppError> {
        self.repository.list().await
    }

    pub async fn list_low_stock(&self) -> Result<Vec<Part>, AppError> {
        self.repository.list_low_stock().await
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdatePartRequest,
    ) -> Result<ApiResponse<Part>, AppError> {
        request.validate()?;
        if let Some(price) = request.price {
            validate_non_negative_price(price)
                .map_err(|_| AppError::BadRequest("El precio no puede ser negativo".to_string()))?;
        }

        let part = self
            .repository
            .update(
                id,
                request.name,
                request.part_number,
                request.price,
                request.min_quantity,
                request.supplier,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            part,
            "Pieza actualizada exitosamente".to_string(),
        ))
    }

    pub async fn stock_in(
        &self,
        id: Uuid,
        request: StockInRequest,
    ) -> Result<ApiResponse<Part>, AppError> {
        request.validate()?;

        let part = self.repository.stock_in(id, request.quantity).await?;

        Ok(ApiResponse::success_with_message(
            part,
            "Entrada de stock registrada".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}
