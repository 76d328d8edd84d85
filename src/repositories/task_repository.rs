use crate::models::order::ServiceOrder;
use crate::models::task::{ServiceTask, TaskStatus};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        order_id: Uuid,
        title: String,
        description: Option<String>,
        assigned_to: Option<Uuid>,
    ) -> Result<ServiceTask, AppError> {
        let order = sqlx::query_as::<_, ServiceOrder>("SELECT * FROM service_orders WHERE id = $1")
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Orden '{}' no encontrada", order_id)))?;

        if order.status.is_terminal() {
            return Err(AppError::Conflict(format!(
                "La orden está en estado terminal {} y no admite tareas nuevas",
                order.status.as_str()
            )));
        }

        let now = Utc::now();
        let task = sqlx::query_as::<_, ServiceTask>(
            r#"
            INSERT INTO service_tasks (id, order_id, title, description, status, assigned_to, created_at, updated_at)
            VALUES ($1, $2, $3, $4, 'pending', $5, $6, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(order_id)
        .bind(title)
        .bind(description)
        .bind(assigned_to)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceTask>, AppError> {
        let task = sqlx::query_as::<_, ServiceTask>("SELECT * FROM service_tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(task)
    }

    pub async fn find_by_order(&self, order_id: Uuid) -> Result<Vec<ServiceTask>, AppError> {
        let tasks = sqlx::query_as::<_, ServiceTask>(
            "SELECT * FROM service_tasks WHERE order_id = $1 ORDER BY created_at",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    pub async fn update(
        &self,
        id: Uuid,
        title: Option<String>,
        description: Option<String>,
        status: Option<TaskStatus>,
        assigned_to: Option<Uuid>,
    ) -> Result<ServiceTask, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tarea no encontrada".to_string()))?;

        // Las tareas de una orden terminal quedan congeladas
        let order = sqlx::query_as::<_, ServiceOrder>("SELECT * FROM service_orders WHERE id = $1")
            .bind(current.order_id)
            .fetch_one(&self.pool)
            .await?;

        if order.status.is_terminal() {
            return Err(AppError::Conflict(format!(
                "La orden está en estado terminal {} y sus tareas no admiten cambios",
                order.status.as_str()
            )));
        }

        let task = sqlx::query_as::<_, ServiceTask>(
            r#"
            UPDATE service_tasks
            SET title = $2, description = $3, status = $4, assigned_to = $5, updated_at = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title.unwrap_or(current.title))
        .bind(description.or(current.description))
        .bind(status.unwrap_or(current.status))
        .bind(assigned_to.or(current.assigned_to))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM service_tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Tarea no encontrada".to_string()));
        }

        Ok(())
    }
}
