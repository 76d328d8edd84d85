//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se
//! pasa a través del router de Axum. La tabla de acceso rol/ruta se
//! construye una vez al arrancar y viaja como valor inmutable.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::services::authorization_service::RouteAccessPolicy;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub access_policy: Arc<RouteAccessPolicy>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, access_policy: RouteAccessPolicy) -> Self {
        Self {
            pool,
            config,
            access_policy: Arc::new(access_policy),
        }
    }
}
