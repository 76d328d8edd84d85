use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::task_dto::{CreateTaskRequest, UpdateTaskRequest};
use crate::models::task::ServiceTask;
use crate::repositories::task_repository::TaskRepository;
use crate::utils::errors::AppError;

pub struct TaskController {
    repository: TaskRepository,
}

impl TaskController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TaskRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        order_id: Uuid,
        request: CreateTaskRequest,
    ) -> Result<ApiResponse<ServiceTask>, AppError> {
        request.validate()?;

        let task = self
            .repository
            .create(order_id, request.title, request.description, request.assigned_to)
            .await?;

        Ok(ApiResponse::success_with_message(
            task,
            "Tarea creada exitosamente".to_string(),
        ))
    }

    pub async fn list_by_order(&self, order_id: Uuid) -> Result<Vec<ServiceTask>, AppError> {
        self.repository.find_by_order(order_id).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateTaskRequest,
    ) -> Result<ApiResponse<ServiceTask>, AppError> {
        request.validate()?;

        let task = self
            .repository
            .update(
                id,
                request.title,
                request.description,
                request.status,
                request.assigned_to,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            task,
            "Tarea actualizada exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}
