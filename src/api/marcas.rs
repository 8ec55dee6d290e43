//! Brand handlers.

use crate::{api::AppState, core::marcas, entities::marca, errors::Result};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DatosMarca {
    pub nombre: String,
}

pub async fn listar(State(state): State<AppState>) -> Result<Json<Vec<marca::Model>>> {
    let marcas = marcas::get_todas(&state.db).await?;
    Ok(Json(marcas))
}

pub async fn crear(
    State(state): State<AppState>,
    Json(datos): Json<DatosMarca>,
) -> Result<(StatusCode, Json<marca::Model>)> {
    let marca = marcas::crear(&state.db, datos.nombre).await?;
    Ok((StatusCode::CREATED, Json(marca)))
}

pub async fn actualizar(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(datos): Json<DatosMarca>,
) -> Result<Json<marca::Model>> {
    let marca = marcas::actualizar(&state.db, id, datos.nombre).await?;
    Ok(Json(marca))
}

pub async fn eliminar(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    marcas::eliminar(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
