use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::task::TaskStatus;

/// Request para crear una tarea de una orden
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 2, max = 300))]
    pub title: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub assigned_to: Option<Uuid>,
}

/// Request para actualizar una tarea
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 2, max = 300))]
    pub title: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub status: Option<TaskStatus>,
    pub assigned_to: Option<Uuid>,
}
