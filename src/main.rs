use dotenvy::dotenv;
use std::sync::Arc;
use tienda_camaras::{
    api::{self, AppState},
    config::{database, seed, settings::Settings},
    errors::Result,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();

    // 3. Load settings; JWT_SECRET missing is a hard startup failure
    let settings = Settings::from_env()?;
    info!(puerto = settings.puerto, "configuración cargada");

    // 4. Initialize database and schema
    let db = database::create_connection().await?;
    database::create_tables(&db).await?;
    info!("base de datos inicializada");

    // 5. Seed the initial catalog when a config file is present
    match seed::load_config("config.toml") {
        Ok(catalogo) => {
            let insertados = seed::seed_catalogo(&db, &catalogo).await?;
            info!(insertados, "catálogo inicial sembrado");
        }
        Err(e) => warn!("sin catálogo inicial: {e}"),
    }

    // 6. Make sure the invoice directory exists before serving from it
    std::fs::create_dir_all(&settings.directorio_facturas)?;

    // 7. Serve
    let puerto = settings.puerto;
    let state = AppState {
        db: Arc::new(db),
        settings: Arc::new(settings),
    };
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", puerto)).await?;
    info!(puerto, "servidor escuchando");
    axum::serve(listener, app).await?;

    Ok(())
}
