use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rental_admin::config::EnvironmentConfig;
use rental_admin::controllers::auth_controller::ensure_bootstrap_admin;
use rental_admin::{build_repositories, create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug,sqlx=warn")),
        )
        .init();

    info!("🚗 Rental Admin - API de reservas y alquileres");
    info!("================================================");

    let config = EnvironmentConfig::from_env().map_err(|e| {
        error!("❌ Configuración inválida: {}", e);
        anyhow::anyhow!("Configuración inválida: {}", e)
    })?;

    // Inicializar almacenamiento
    let repos = match build_repositories(&config).await {
        Ok(repos) => repos,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    if let Some(admin) = &config.bootstrap_admin {
        if let Err(e) = ensure_bootstrap_admin(&repos, admin).await {
            error!("❌ No se pudo crear el administrador inicial: {}", e);
        }
    }

    let addr: SocketAddr = config.server_address().parse()?;
    let storage = repos.backend;
    let app = create_router(AppState::new(config, repos));

    info!("🌐 Servidor iniciando en http://{} (almacenamiento: {})", addr, storage);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Estado del servicio");
    info!("📅 Reservas:");
    info!("   POST /bookings - Crear reserva");
    info!("   GET  /vehicles/:id/availability - Consultar disponibilidad");
    info!("📋 Rentals (sesión):");
    info!("   GET  /rentals - Listar rentals");
    info!("   GET  /rentals/:id - Detalle");
    info!("   PATCH /rentals/:id/status - Cambiar estado");
    info!("   PATCH /rentals/:id/payment-status - Cambiar estado de pago");
    info!("   POST /rentals/bulk-delete - Borrado múltiple");
    info!("   DELETE /rentals/:id - Eliminar rental");
    info!("🚙 Vehículos:");
    info!("   GET  /vehicles - Listar vehículos");
    info!("   POST /vehicles, PUT/DELETE /vehicles/:id - Gestión (admin)");
    info!("👥 Clientes (sesión):");
    info!("   GET  /customers, GET/PUT/DELETE /customers/:id");
    info!("🔔 Notificaciones (sesión):");
    info!("   GET  /notifications, PATCH /notifications/:id/read, POST /notifications/read-all");
    info!("🔐 Autenticación:");
    info!("   POST /auth/login, POST /auth/logout, GET /auth/session");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo escuchar SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
