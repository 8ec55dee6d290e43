//! Order business logic - creation, payment settlement, and order queries.
//!
//! Order creation and payment settlement each run inside one database
//! transaction. Creation snapshots prices into line items but does NOT
//! reserve stock; reservation happens at settlement through an atomic
//! conditional decrement, so two orders racing for the same limited stock are
//! resolved at payment time: the loser's settlement rolls back whole and the
//! order stays `pendiente`.

use crate::{
    entities::{
        DetalleOrden, EstadoEntrega, EstadoPago, Orden, Producto, Usuario, detalle_orden, orden,
        producto, usuario,
    },
    errors::{Error, Result},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use qrcode::QrCode;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait, sea_query::Expr,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

/// One requested line of a new order.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemOrden {
    pub producto_id: i64,
    pub cantidad: i32,
}

/// Payload for order creation.
#[derive(Debug, Clone, Deserialize)]
pub struct NuevaOrden {
    pub usuario_id: i64,
    #[serde(default)]
    pub usuario_nombre: Option<String>,
    pub items: Vec<ItemOrden>,
}

/// Payload for payment settlement.
#[derive(Debug, Clone, Deserialize)]
pub struct DatosPago {
    pub metodo_pago: String,
    #[serde(default)]
    pub tipo_envio: Option<String>,
    #[serde(default)]
    pub descripcion_envio: Option<String>,
    #[serde(default)]
    pub costo_envio: f64,
}

/// Line item with its product resolved (product may have been hard-deleted).
#[derive(Debug, Clone, Serialize)]
pub struct DetalleConProducto {
    #[serde(flatten)]
    pub detalle: detalle_orden::Model,
    pub producto: Option<producto::Model>,
}

/// Condensed owner info attached to admin order listings.
#[derive(Debug, Clone, Serialize)]
pub struct UsuarioResumen {
    pub id: i64,
    pub nombre: String,
    pub correo: String,
}

impl From<usuario::Model> for UsuarioResumen {
    fn from(u: usuario::Model) -> Self {
        Self {
            id: u.id_usuario,
            nombre: u.nombre,
            correo: u.correo,
        }
    }
}

/// Fully-loaded order graph: order, owner, and line items with products.
#[derive(Debug, Clone, Serialize)]
pub struct OrdenCompleta {
    #[serde(flatten)]
    pub orden: orden::Model,
    pub usuario: Option<UsuarioResumen>,
    pub detalles: Vec<DetalleConProducto>,
}

/// Creates an order with price/subtotal snapshots inside one transaction.
///
/// Each item's current product price is read, the total accumulated, the
/// order row inserted in `pendiente` state, and one line item inserted per
/// requested product. Stock is not touched here.
///
/// # Errors
/// A missing product rolls the whole transaction back and surfaces
/// [`Error::ProductoNoEncontrado`]; no partial order is ever persisted.
pub async fn crear_orden(db: &DatabaseConnection, nueva: NuevaOrden) -> Result<orden::Model> {
    if nueva.items.is_empty() {
        return Err(Error::Validacion {
            message: "la orden debe incluir al menos un producto".to_string(),
        });
    }
    if nueva.items.iter().any(|item| item.cantidad <= 0) {
        return Err(Error::Validacion {
            message: "las cantidades deben ser mayores a cero".to_string(),
        });
    }

    let txn = db.begin().await?;

    let mut total = 0.0;
    let mut lineas = Vec::with_capacity(nueva.items.len());
    for item in &nueva.items {
        let producto = Producto::find_by_id(item.producto_id)
            .one(&txn)
            .await?
            .ok_or(Error::ProductoNoEncontrado {
                id: item.producto_id,
            })?;

        let subtotal = producto.precio * f64::from(item.cantidad);
        total += subtotal;
        lineas.push((item.producto_id, item.cantidad, producto.precio, subtotal));
    }

    let orden = orden::ActiveModel {
        usuario_id: Set(nueva.usuario_id),
        usuario_nombre: Set(nueva.usuario_nombre),
        total: Set(total),
        estado_pago: Set(EstadoPago::Pendiente),
        estado_entrega: Set(EstadoEntrega::Pendiente),
        fecha_orden: Set(chrono::Utc::now()),
        costo_envio: Set(0.0),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for (producto_id, cantidad, precio_unitario, subtotal) in lineas {
        detalle_orden::ActiveModel {
            orden_id: Set(orden.id),
            producto_id: Set(producto_id),
            cantidad: Set(cantidad),
            precio_unitario: Set(precio_unitario),
            subtotal: Set(subtotal),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    info!(orden_id = orden.id, total, "orden creada");
    Ok(orden)
}

/// Settles payment for a pending order inside one transaction.
///
/// Stamps shipping fields, moves `estado_pago` to `pagado`, records the
/// payment timestamp and an invoice number (`FAC-<epoch millis>`), then
/// decrements stock for every line item with an atomic conditional update.
/// Any failure - including insufficient stock on any line - rolls the whole
/// settlement back: status change and stock decrements succeed or fail
/// together.
///
/// # Errors
/// [`Error::OrdenNoEncontrada`] for an unknown id,
/// [`Error::TransicionPagoInvalida`] when the order is not `pendiente`, and
/// [`Error::StockInsuficiente`] when any line cannot be fulfilled.
pub async fn procesar_pago(
    db: &DatabaseConnection,
    orden_id: i64,
    datos: DatosPago,
) -> Result<orden::Model> {
    let txn = db.begin().await?;

    let orden = Orden::find_by_id(orden_id)
        .one(&txn)
        .await?
        .ok_or(Error::OrdenNoEncontrada { id: orden_id })?;

    if !orden.estado_pago.puede_transicionar_a(EstadoPago::Pagado) {
        return Err(Error::TransicionPagoInvalida {
            de: orden.estado_pago,
            a: EstadoPago::Pagado,
        });
    }

    let numero_factura = format!("FAC-{}", chrono::Utc::now().timestamp_millis());

    let mut activo: orden::ActiveModel = orden.into();
    activo.tipo_envio = Set(datos.tipo_envio);
    activo.descripcion_envio = Set(datos.descripcion_envio);
    activo.costo_envio = Set(datos.costo_envio);
    activo.estado_pago = Set(EstadoPago::Pagado);
    activo.fecha_pago = Set(Some(chrono::Utc::now()));
    activo.metodo_pago = Set(Some(datos.metodo_pago));
    activo.numero_factura = Set(Some(numero_factura.clone()));
    let orden = activo.update(&txn).await?;

    // Reserve stock line by line, still inside the transaction
    let detalles = DetalleOrden::find()
        .filter(detalle_orden::Column::OrdenId.eq(orden_id))
        .find_also_related(Producto)
        .all(&txn)
        .await?;

    for (detalle, producto) in detalles {
        let producto = producto.ok_or(Error::ProductoNoEncontrado {
            id: detalle.producto_id,
        })?;
        descontar_stock_atomico(&txn, &producto, detalle.cantidad).await?;
    }

    txn.commit().await?;

    info!(orden_id, numero_factura, "pago procesado");
    Ok(orden)
}

/// Atomically decrements a product's stock, refusing to oversell.
///
/// Instead of reading the quantity, modifying it, and writing it back (which
/// loses updates under concurrent settlements), this issues a single
/// conditional statement:
/// `UPDATE productos SET cantidad = cantidad - n WHERE id_producto = ? AND cantidad >= n`
/// and treats zero affected rows as insufficient stock.
pub async fn descontar_stock_atomico<C>(
    db: &C,
    producto: &producto::Model,
    cantidad: i32,
) -> Result<()>
where
    C: ConnectionTrait,
{
    let resultado = Producto::update_many()
        .col_expr(
            producto::Column::Cantidad,
            Expr::col(producto::Column::Cantidad).sub(cantidad),
        )
        .filter(producto::Column::IdProducto.eq(producto.id_producto))
        .filter(producto::Column::Cantidad.gte(cantidad))
        .exec(db)
        .await?;

    if resultado.rows_affected == 0 {
        return Err(Error::StockInsuficiente {
            producto: producto.nombre.clone(),
            solicitado: cantidad,
        });
    }
    Ok(())
}

/// Payload encoded into the simulated payment QR.
#[derive(Debug, Serialize)]
struct DatosQr {
    orden_id: i64,
    total: f64,
    fecha: chrono::DateTime<chrono::Utc>,
    usuario: Option<String>,
}

/// Builds the payment QR for an order as a base64 SVG data URL.
///
/// The encoded payload is the order id, the total including the provided
/// delivery cost, the order date, and the cached customer name.
pub async fn generar_qr_pago(
    db: &DatabaseConnection,
    orden_id: i64,
    costo_envio: f64,
) -> Result<String> {
    let orden = Orden::find_by_id(orden_id)
        .one(db)
        .await?
        .ok_or(Error::OrdenNoEncontrada { id: orden_id })?;

    let datos = DatosQr {
        orden_id: orden.id,
        total: orden.total + costo_envio,
        fecha: orden.fecha_orden,
        usuario: orden.usuario_nombre,
    };
    let payload = serde_json::to_string(&datos).map_err(|e| Error::Validacion {
        message: format!("no se pudo serializar el QR: {e}"),
    })?;

    let codigo = QrCode::new(payload.as_bytes())?;
    let svg = codigo
        .render::<qrcode::render::svg::Color<'_>>()
        .min_dimensions(200, 200)
        .build();

    Ok(format!(
        "data:image/svg+xml;base64,{}",
        STANDARD.encode(svg)
    ))
}

/// Updates the fulfillment state of an order (admin toggle).
///
/// Payment state is untouched here; the two state machines are independent.
pub async fn actualizar_estado_entrega(
    db: &DatabaseConnection,
    orden_id: i64,
    estado: EstadoEntrega,
) -> Result<orden::Model> {
    let orden = Orden::find_by_id(orden_id)
        .one(db)
        .await?
        .ok_or(Error::OrdenNoEncontrada { id: orden_id })?;

    let mut activo: orden::ActiveModel = orden.into();
    activo.estado_entrega = Set(estado);
    activo.update(db).await.map_err(Into::into)
}

/// Explicit admin total update (e.g., to fold in a renegotiated shipping cost).
pub async fn actualizar_total(
    db: &DatabaseConnection,
    orden_id: i64,
    nuevo_total: f64,
) -> Result<orden::Model> {
    if !nuevo_total.is_finite() || nuevo_total < 0.0 {
        return Err(Error::Validacion {
            message: format!("total inválido: {nuevo_total}"),
        });
    }

    let orden = Orden::find_by_id(orden_id)
        .one(db)
        .await?
        .ok_or(Error::OrdenNoEncontrada { id: orden_id })?;

    let mut activo: orden::ActiveModel = orden.into();
    activo.total = Set(nuevo_total);
    activo.update(db).await.map_err(Into::into)
}

/// Loads one order with owner and line items fully resolved.
pub async fn get_orden_completa(db: &DatabaseConnection, orden_id: i64) -> Result<OrdenCompleta> {
    let orden = Orden::find_by_id(orden_id)
        .one(db)
        .await?
        .ok_or(Error::OrdenNoEncontrada { id: orden_id })?;

    let usuario = Usuario::find_by_id(orden.usuario_id)
        .one(db)
        .await?
        .map(UsuarioResumen::from);

    let detalles = DetalleOrden::find()
        .filter(detalle_orden::Column::OrdenId.eq(orden_id))
        .find_also_related(Producto)
        .all(db)
        .await?
        .into_iter()
        .map(|(detalle, producto)| DetalleConProducto { detalle, producto })
        .collect();

    Ok(OrdenCompleta {
        orden,
        usuario,
        detalles,
    })
}

/// Retrieves all orders with owners and line items, newest first.
pub async fn get_todas_completas(db: &DatabaseConnection) -> Result<Vec<OrdenCompleta>> {
    let ordenes = Orden::find()
        .order_by_desc(orden::Column::FechaOrden)
        .find_with_related(DetalleOrden)
        .all(db)
        .await?;

    armar_ordenes_completas(db, ordenes).await
}

/// Retrieves one user's orders with line items, newest first.
pub async fn get_por_usuario(
    db: &DatabaseConnection,
    usuario_id: i64,
) -> Result<Vec<OrdenCompleta>> {
    let ordenes = Orden::find()
        .filter(orden::Column::UsuarioId.eq(usuario_id))
        .order_by_desc(orden::Column::FechaOrden)
        .find_with_related(DetalleOrden)
        .all(db)
        .await?;

    armar_ordenes_completas(db, ordenes).await
}

/// Resolves users and products for a batch of (order, line items) pairs.
async fn armar_ordenes_completas(
    db: &DatabaseConnection,
    ordenes: Vec<(orden::Model, Vec<detalle_orden::Model>)>,
) -> Result<Vec<OrdenCompleta>> {
    let usuarios: HashMap<i64, usuario::Model> = Usuario::find()
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id_usuario, u))
        .collect();
    let productos: HashMap<i64, producto::Model> = Producto::find()
        .all(db)
        .await?
        .into_iter()
        .map(|p| (p.id_producto, p))
        .collect();

    Ok(ordenes
        .into_iter()
        .map(|(orden, detalles)| {
            let usuario = usuarios
                .get(&orden.usuario_id)
                .cloned()
                .map(UsuarioResumen::from);
            let detalles = detalles
                .into_iter()
                .map(|detalle| {
                    let producto = productos.get(&detalle.producto_id).cloned();
                    DetalleConProducto { detalle, producto }
                })
                .collect();
            OrdenCompleta {
                orden,
                usuario,
                detalles,
            }
        })
        .collect())
}
