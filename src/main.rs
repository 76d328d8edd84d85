mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use dotenvy::dotenv;
use serde_json::json;

use config::environment::EnvironmentConfig;
use database::DatabaseConnection;
use middleware::cors::cors_middleware;
use services::authorization_service::RouteAccessPolicy;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🔧 Workshop Backend - Gestión de taller mecánico");
    info!("================================================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();

    // Tabla de acceso rol/ruta: valor inmutable construido una vez
    let access_policy = RouteAccessPolicy::standard();

    let app_state = AppState::new(pool, EnvironmentConfig::default(), access_policy);

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/auth", routes::auth_routes::create_auth_router(app_state.clone()))
        .nest("/api/customer", routes::customer_routes::create_customer_router(app_state.clone()))
        .nest("/api/vehicle", routes::vehicle_routes::create_vehicle_router(app_state.clone()))
        .nest("/api/part", routes::part_routes::create_part_router(app_state.clone()))
        .nest("/api/order", routes::order_routes::create_order_router(app_state.clone()))
        .nest("/api/task", routes::task_routes::create_task_router(app_state.clone()))
        .layer(cors_middleware())
        .with_state(app_state);

    // Puerto del servidor
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Auth:");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/auth/me - Usuario actual");
    info!("   POST /api/auth/access/check - Evaluar gate rol/ruta");
    info!("👤 Customers:");
    info!("   POST /api/customer - Crear cliente");
    info!("   GET  /api/customer - Listar clientes");
    info!("   GET  /api/customer/:id/vehicles - Vehículos del cliente");
    info!("🚗 Vehicles:");
    info!("   POST /api/vehicle - Registrar vehículo");
    info!("   GET  /api/vehicle/:id - Obtener vehículo");
    info!("🔩 Parts (almacén):");
    info!("   POST /api/part - Alta de pieza");
    info!("   GET  /api/part/low-stock - Piezas bajo mínimo");
    info!("   POST /api/part/:id/stock-in - Entrada de stock");
    info!("📋 Orders:");
    info!("   POST /api/order - Crear orden de servicio");
    info!("   PUT  /api/order/:id - Actualizar orden (COMPLETED descuenta almacén)");
    info!("   POST /api/order/:id/parts - Asociar pieza");
    info!("   PUT  /api/order/:id/parts/:assoc_id - Toggle/actualizar asociación");
    info!("   POST /api/order/:id/deduct-parts - Descuento explícito de almacén");
    info!("   POST /api/order/:id/tasks - Crear tarea");
    info!("📝 Tasks:");
    info!("   PUT  /api/task/:id - Actualizar tarea");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "workshop-backend",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
