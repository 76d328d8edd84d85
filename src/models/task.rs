//! Modelo de ServiceTask
//!
//! Tareas hijas de una orden de servicio, con su propia máquina de
//! estados pequeña e independiente de la lógica de descuentos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado de la tarea - mapea al ENUM task_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Done,
    Blocked,
}

/// ServiceTask principal - mapea a la tabla service_tasks
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceTask {
    pub id: Uuid,
    pub order_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub assigned_to: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
