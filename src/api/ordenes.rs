//! Order, payment, QR, and invoice handlers.

use crate::{
    api::{AppState, extract::AuthUser},
    core::{
        factura,
        ordenes::{self, DatosPago, NuevaOrden, OrdenCompleta},
    },
    entities::{EstadoEntrega, orden},
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

pub async fn crear(
    State(state): State<AppState>,
    Json(nueva): Json<NuevaOrden>,
) -> Result<(StatusCode, Json<orden::Model>)> {
    let orden = ordenes::crear_orden(&state.db, nueva).await?;
    Ok((StatusCode::CREATED, Json(orden)))
}

pub async fn listar(State(state): State<AppState>) -> Result<Json<Vec<OrdenCompleta>>> {
    let ordenes = ordenes::get_todas_completas(&state.db).await?;
    Ok(Json(ordenes))
}

/// The caller's own purchase history, scoped by the bearer token.
pub async fn mis_compras(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<OrdenCompleta>>> {
    let ordenes = ordenes::get_por_usuario(&state.db, auth_user.usuario_id).await?;
    Ok(Json(ordenes))
}

#[derive(Debug, Deserialize)]
pub struct CambioEstado {
    pub estado: String,
}

/// Fulfillment toggle. Only the delivery state machine is reachable here;
/// payment state changes exclusively through the payment endpoint.
pub async fn actualizar_estado(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(cambio): Json<CambioEstado>,
) -> Result<Json<orden::Model>> {
    let estado = match cambio.estado.as_str() {
        "pendiente" => EstadoEntrega::Pendiente,
        "entregado" => EstadoEntrega::Entregado,
        otro => {
            return Err(Error::Validacion {
                message: format!("estado de entrega desconocido: {otro}"),
            });
        }
    };
    let orden = ordenes::actualizar_estado_entrega(&state.db, id, estado).await?;
    Ok(Json(orden))
}

#[derive(Debug, Deserialize)]
pub struct CambioTotal {
    #[serde(alias = "nuevoTotal")]
    pub total: f64,
}

pub async fn actualizar_total(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(cambio): Json<CambioTotal>,
) -> Result<Json<orden::Model>> {
    let orden = ordenes::actualizar_total(&state.db, id, cambio.total).await?;
    Ok(Json(orden))
}

#[derive(Debug, Deserialize)]
pub struct ParametrosQr {
    #[serde(rename = "deliveryCost", default)]
    pub delivery_cost: f64,
}

#[derive(Debug, Serialize)]
pub struct RespuestaQr {
    #[serde(rename = "qrCode")]
    pub qr_code: String,
}

pub async fn qr_pago(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<ParametrosQr>,
) -> Result<Json<RespuestaQr>> {
    let qr_code = ordenes::generar_qr_pago(&state.db, id, params.delivery_cost).await?;
    Ok(Json(RespuestaQr { qr_code }))
}

/// Settles payment and renders the invoice in one shot, returning the
/// settled order plus the invoice's public URL.
pub async fn procesar_pago(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(datos): Json<DatosPago>,
) -> Result<Json<RespuestaPago>> {
    let orden = ordenes::procesar_pago(&state.db, id, datos).await?;

    let completa = ordenes::get_orden_completa(&state.db, id).await?;
    let factura_url = completa
        .orden
        .numero_factura
        .as_deref()
        .map(|n| format!("/facturas/factura-{n}.pdf"));
    renderizar_factura(completa, &state).await?;

    Ok(Json(RespuestaPago {
        mensaje: "Pago procesado correctamente".to_string(),
        orden,
        factura_url,
    }))
}

#[derive(Debug, Serialize)]
pub struct RespuestaPago {
    pub mensaje: String,
    pub orden: orden::Model,
    pub factura_url: Option<String>,
}

/// Runs the synchronous PDF render on the blocking pool so it does not stall
/// the async worker threads.
async fn renderizar_factura(
    completa: OrdenCompleta,
    state: &AppState,
) -> Result<std::path::PathBuf> {
    let directorio = state.settings.directorio_facturas.clone();
    tokio::task::spawn_blocking(move || factura::generar_factura(&completa, &directorio))
        .await
        .map_err(|e| Error::Pdf {
            message: e.to_string(),
        })?
}

/// Streams the invoice PDF, regenerating it from the order snapshot if the
/// file is missing. Unpaid orders have no invoice and yield a 404.
pub async fn descargar_factura(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let completa = ordenes::get_orden_completa(&state.db, id).await?;
    let ruta = renderizar_factura(completa, &state).await?;
    let bytes = tokio::fs::read(&ruta).await?;

    let nombre = ruta
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("factura.pdf")
        .to_string();
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{nombre}\""),
            ),
        ],
        bytes,
    ))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{config::settings::Settings, entities::Orden, test_utils::*};
    use sea_orm::{DatabaseConnection, EntityTrait};
    use std::sync::Arc;

    fn estado_de_prueba(db: Arc<DatabaseConnection>) -> AppState {
        AppState {
            db,
            settings: Arc::new(Settings {
                puerto: 0,
                jwt_secret: "secreto".to_string(),
                directorio_facturas: std::env::temp_dir().join("facturas-api-test"),
            }),
        }
    }

    #[tokio::test]
    async fn test_actualizar_estado_valor_desconocido() -> Result<()> {
        let db = Arc::new(setup_test_db().await?);
        let usuario = crear_usuario_de_prueba(&db).await?;
        let producto = crear_producto_de_prueba(&db, "Cámara", 100.0, 5).await?;
        let orden = crear_orden_de_prueba(&db, usuario.id_usuario, producto.id_producto, 1).await?;

        let resultado = actualizar_estado(
            State(estado_de_prueba(db.clone())),
            Path(orden.id),
            Json(CambioEstado {
                estado: "enviado".to_string(),
            }),
        )
        .await;
        assert!(matches!(
            resultado.unwrap_err(),
            Error::Validacion { message: _ }
        ));

        // The rejected request left both state machines untouched
        let recargada = Orden::find_by_id(orden.id).one(db.as_ref()).await?.unwrap();
        assert_eq!(recargada.estado_entrega, EstadoEntrega::Pendiente);
        assert_eq!(recargada.estado_pago, crate::entities::EstadoPago::Pendiente);

        Ok(())
    }

    #[tokio::test]
    async fn test_actualizar_estado_valores_validos() -> Result<()> {
        let db = Arc::new(setup_test_db().await?);
        let usuario = crear_usuario_de_prueba(&db).await?;
        let producto = crear_producto_de_prueba(&db, "Cámara", 100.0, 5).await?;
        let orden = crear_orden_de_prueba(&db, usuario.id_usuario, producto.id_producto, 1).await?;

        let Json(entregada) = actualizar_estado(
            State(estado_de_prueba(db.clone())),
            Path(orden.id),
            Json(CambioEstado {
                estado: "entregado".to_string(),
            }),
        )
        .await?;
        assert_eq!(entregada.estado_entrega, EstadoEntrega::Entregado);

        let Json(revertida) = actualizar_estado(
            State(estado_de_prueba(db)),
            Path(orden.id),
            Json(CambioEstado {
                estado: "pendiente".to_string(),
            }),
        )
        .await?;
        assert_eq!(revertida.estado_entrega, EstadoEntrega::Pendiente);

        Ok(())
    }
}
