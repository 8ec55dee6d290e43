//! HTTP surface of the store: routing, shared state, and request extractors.

pub mod auth;
pub mod categorias;
pub mod dashboard;
pub mod extract;
pub mod marcas;
pub mod ordenes;
pub mod productos;

use crate::config::settings::Settings;
use axum::{
    Json, Router,
    routing::{delete, get, post, put},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub settings: Arc<Settings>,
}

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    let facturas = ServeDir::new(&state.settings.directorio_facturas);

    Router::new()
        .route("/", get(raiz))
        .route("/api/auth/register", post(auth::registrar))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/users", get(auth::listar_usuarios))
        .route("/api/auth/users/:id", put(auth::actualizar_usuario))
        .route("/api/auth/users/:id", delete(auth::eliminar_usuario))
        .route("/api/auth/perfil", put(auth::actualizar_perfil))
        .route("/api/productos", get(productos::listar))
        .route("/api/productos", post(productos::crear))
        .route("/api/productos/:id", put(productos::actualizar))
        .route("/api/productos/:id", delete(productos::eliminar))
        .route("/api/marcas", get(marcas::listar))
        .route("/api/marcas", post(marcas::crear))
        .route("/api/marcas/:id", put(marcas::actualizar))
        .route("/api/marcas/:id", delete(marcas::eliminar))
        .route("/api/categorias", get(categorias::listar))
        .route("/api/categorias", post(categorias::crear))
        .route("/api/categorias/:id", put(categorias::actualizar))
        .route("/api/categorias/:id", delete(categorias::eliminar))
        .route("/api/ordenes", post(ordenes::crear))
        .route("/api/ordenes", get(ordenes::listar))
        .route("/api/ordenes/mis-compras", get(ordenes::mis_compras))
        .route("/api/ordenes/:id", put(ordenes::actualizar_estado))
        .route("/api/ordenes/:id/total", put(ordenes::actualizar_total))
        .route("/api/ordenes/:id/qr", get(ordenes::qr_pago))
        .route("/api/ordenes/:id/pago", post(ordenes::procesar_pago))
        .route("/api/ordenes/:id/factura", get(ordenes::descargar_factura))
        .route("/api/dashboard/stats", get(dashboard::stats))
        .route("/api/dashboard/sales", get(dashboard::sales))
        .route("/api/dashboard/recent-sales", get(dashboard::recent_sales))
        .nest_service("/facturas", facturas)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn raiz() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "API de Tienda de Cámaras funcionando"
    }))
}
