//! Admin dashboard handlers.

use crate::{
    api::AppState,
    core::dashboard::{self, Estadisticas, VentaMensual, VentaReciente},
    errors::Result,
};
use axum::{Json, extract::State};

pub async fn stats(State(state): State<AppState>) -> Result<Json<Estadisticas>> {
    let stats = dashboard::get_estadisticas(&state.db).await?;
    Ok(Json(stats))
}

pub async fn sales(State(state): State<AppState>) -> Result<Json<Vec<VentaMensual>>> {
    let ventas = dashboard::get_ventas_mensuales(&state.db).await?;
    Ok(Json(ventas))
}

pub async fn recent_sales(State(state): State<AppState>) -> Result<Json<Vec<VentaReciente>>> {
    let ventas = dashboard::get_ventas_recientes(&state.db).await?;
    Ok(Json(ventas))
}
