//! Product catalog handlers.

use crate::{
    api::AppState,
    core::productos::{self, DatosProducto, ProductoCatalogo},
    entities::producto,
    errors::Result,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

pub async fn listar(State(state): State<AppState>) -> Result<Json<Vec<ProductoCatalogo>>> {
    let catalogo = productos::get_todos(&state.db).await?;
    Ok(Json(catalogo))
}

pub async fn crear(
    State(state): State<AppState>,
    Json(datos): Json<DatosProducto>,
) -> Result<(StatusCode, Json<producto::Model>)> {
    let producto = productos::crear(&state.db, datos).await?;
    Ok((StatusCode::CREATED, Json(producto)))
}

pub async fn actualizar(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(datos): Json<DatosProducto>,
) -> Result<Json<producto::Model>> {
    let producto = productos::actualizar(&state.db, id, datos).await?;
    Ok(Json(producto))
}

pub async fn eliminar(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    productos::eliminar(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
