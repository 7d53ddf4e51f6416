use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

use fleet_backoffice::{
    build_app,
    config::{DatabaseConfig, EnvironmentConfig},
    database::DatabaseConnection,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .init();

    info!("🚛 Fleet Back Office - API REST");
    info!("================================");
    info!("🌍 Entorno: {}", config.environment);
    if config.cors_origins.is_empty() && !config.is_development() {
        warn!("⚠️ CORS_ORIGINS no definido: se aceptan peticiones de cualquier origen");
    }

    // Inicializar base de datos
    let db_config = DatabaseConfig::from_env()?;
    let db_connection = match DatabaseConnection::new(&db_config).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    db_connection.run_migrations().await?;

    let addr = config.server_addr();
    let app = build_app(AppState::new(db_connection.pool().clone(), config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("👤 Usuarios:");
    info!("   POST /api/users/register - Registro de chauffeur");
    info!("   POST /api/users/login - Login");
    info!("   GET  /api/users/me - Usuario actual");
    info!("   GET  /api/users/drivers[/available] - Chauffeurs (admin)");
    info!("   PATCH /api/users/drivers/:id/toggle - Activar/desactivar chauffeur (admin)");
    info!("🚛 Camiones y remolques:");
    info!("   GET/POST /api/trucks, GET/PUT/DELETE /api/trucks/:id, GET /api/trucks/available");
    info!("   GET/POST /api/trailers, GET/PUT/DELETE /api/trailers/:id, GET /api/trailers/available");
    info!("🛞 Neumáticos:");
    info!("   GET/POST /api/tires, GET/PUT/DELETE /api/tires/:id");
    info!("   GET  /api/tires/critical, GET /api/tires/vehicle/:kind/:id");
    info!("   POST /api/tires/check, POST /api/tires/check-trip (admin)");
    info!("🗺️ Trayectos:");
    info!("   GET/POST /api/trips, GET /api/trips/mine, GET/PUT/DELETE /api/trips/:id");
    info!("🔧 Mantenimiento (admin):");
    info!("   GET/POST /api/maintenance, GET/PUT/DELETE /api/maintenance/:id");
    info!("   GET  /api/maintenance/truck/:truck_id, /upcoming, /overdue, /stats");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Servidor terminó con error: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
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
