//! Category handlers.

use crate::{api::AppState, core::categorias, entities::categoria, errors::Result};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DatosCategoria {
    pub nombre: String,
}

pub async fn listar(State(state): State<AppState>) -> Result<Json<Vec<categoria::Model>>> {
    let categorias = categorias::get_todas(&state.db).await?;
    Ok(Json(categorias))
}

pub async fn crear(
    State(state): State<AppState>,
    Json(datos): Json<DatosCategoria>,
) -> Result<(StatusCode, Json<categoria::Model>)> {
    let categoria = categorias::crear(&state.db, datos.nombre).await?;
    Ok((StatusCode::CREATED, Json(categoria)))
}

pub async fn actualizar(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(datos): Json<DatosCategoria>,
) -> Result<Json<categoria::Model>> {
    let categoria = categorias::actualizar(&state.db, id, datos.nombre).await?;
    Ok(Json(categoria))
}

pub async fn eliminar(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    categorias::eliminar(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
