//! Aggregated admin dashboard queries: counters, monthly sales, recent sales.
//!
//! Sales figures are aggregated in Rust over the loaded rows instead of with
//! backend-specific SQL date functions, keeping the queries portable across
//! `SQLite` backends.

use crate::{
    entities::{
        Categoria, DetalleOrden, EstadoPago, Marca, Orden, Producto, Rol, TipoProducto, orden,
        producto, usuario,
    },
    errors::Result,
};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Headline counters for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Estadisticas {
    #[serde(rename = "totalProductos")]
    pub total_productos: u64,
    #[serde(rename = "totalAccesorios")]
    pub total_accesorios: u64,
    #[serde(rename = "totalMarcas")]
    pub total_marcas: u64,
    #[serde(rename = "totalCategorias")]
    pub total_categorias: u64,
    #[serde(rename = "totalClientes")]
    pub total_clientes: u64,
}

/// Paid line-item revenue aggregated per calendar month of the payment date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VentaMensual {
    #[serde(rename = "año")]
    pub anio: i32,
    pub mes: u32,
    pub ventas: f64,
}

/// One entry of the recent-sales panel.
#[derive(Debug, Clone, Serialize)]
pub struct VentaReciente {
    pub id: i64,
    pub usuario_nombre: Option<String>,
    pub total: f64,
    pub fecha_orden: chrono::DateTime<chrono::Utc>,
}

/// Computes the headline counters.
pub async fn get_estadisticas(db: &DatabaseConnection) -> Result<Estadisticas> {
    let total_productos = Producto::find().count(db).await?;
    let total_accesorios = Producto::find()
        .filter(producto::Column::TipoProducto.eq(TipoProducto::Accesorio))
        .count(db)
        .await?;
    let total_marcas = Marca::find().count(db).await?;
    let total_categorias = Categoria::find().count(db).await?;
    let total_clientes = usuario::Entity::find()
        .filter(usuario::Column::Rol.eq(Rol::Cliente))
        .count(db)
        .await?;

    Ok(Estadisticas {
        total_productos,
        total_accesorios,
        total_marcas,
        total_categorias,
        total_clientes,
    })
}

/// Aggregates paid line-item subtotals per month, ordered chronologically.
pub async fn get_ventas_mensuales(db: &DatabaseConnection) -> Result<Vec<VentaMensual>> {
    use chrono::Datelike;

    let pagadas = Orden::find()
        .filter(orden::Column::EstadoPago.eq(EstadoPago::Pagado))
        .find_with_related(DetalleOrden)
        .all(db)
        .await?;

    let mut por_mes: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for (orden, detalles) in pagadas {
        // Paid orders always carry fecha_pago; fall back to the order date
        let fecha = orden.fecha_pago.unwrap_or(orden.fecha_orden);
        let ventas: f64 = detalles.iter().map(|d| d.subtotal).sum();
        *por_mes.entry((fecha.year(), fecha.month())).or_insert(0.0) += ventas;
    }

    Ok(por_mes
        .into_iter()
        .map(|((anio, mes), ventas)| VentaMensual { anio, mes, ventas })
        .collect())
}

/// Returns the five most recent paid orders, newest first.
pub async fn get_ventas_recientes(db: &DatabaseConnection) -> Result<Vec<VentaReciente>> {
    let pagadas = Orden::find()
        .filter(orden::Column::EstadoPago.eq(EstadoPago::Pagado))
        .order_by_desc(orden::Column::FechaOrden)
        .limit(5)
        .all(db)
        .await?;

    Ok(pagadas
        .into_iter()
        .map(|o| VentaReciente {
            id: o.id,
            usuario_nombre: o.usuario_nombre,
            total: o.total,
            fecha_orden: o.fecha_orden,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{
        core::{marcas, ordenes, productos},
        test_utils::*,
    };

    #[tokio::test]
    async fn test_estadisticas() -> Result<()> {
        let db = setup_test_db().await?;
        crear_usuario_de_prueba(&db).await?;
        marcas::crear(&db, "Canon".to_string()).await?;
        crear_producto_de_prueba(&db, "Cámara", 100.0, 10).await?;
        productos::crear(
            &db,
            productos::DatosProducto {
                nombre: "Tripié".to_string(),
                descripcion: None,
                id_marca: None,
                id_categoria: None,
                precio: 30.0,
                cantidad: 5,
                imagen: None,
                tipo_producto: TipoProducto::Accesorio,
            },
        )
        .await?;

        let stats = get_estadisticas(&db).await?;
        assert_eq!(stats.total_productos, 2);
        assert_eq!(stats.total_accesorios, 1);
        assert_eq!(stats.total_marcas, 1);
        assert_eq!(stats.total_categorias, 0);
        assert_eq!(stats.total_clientes, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_ventas_mensuales_solo_pagadas() -> Result<()> {
        let db = setup_test_db().await?;
        let usuario = crear_usuario_de_prueba(&db).await?;
        let producto = crear_producto_de_prueba(&db, "Cámara", 100.0, 50).await?;

        let pagada = crear_orden_de_prueba(&db, usuario.id_usuario, producto.id_producto, 2).await?;
        ordenes::procesar_pago(&db, pagada.id, datos_pago_de_prueba()).await?;
        // Pending order must not count toward the aggregate
        crear_orden_de_prueba(&db, usuario.id_usuario, producto.id_producto, 1).await?;

        let mensuales = get_ventas_mensuales(&db).await?;
        assert_eq!(mensuales.len(), 1);
        // Monthly sales sum line subtotals, not totals with shipping
        assert_eq!(mensuales[0].ventas, 200.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_ventas_recientes_limite_cinco() -> Result<()> {
        let db = setup_test_db().await?;
        let usuario = crear_usuario_de_prueba(&db).await?;
        let producto = crear_producto_de_prueba(&db, "Cámara", 100.0, 50).await?;

        for _ in 0..6 {
            let orden =
                crear_orden_de_prueba(&db, usuario.id_usuario, producto.id_producto, 1).await?;
            ordenes::procesar_pago(&db, orden.id, datos_pago_de_prueba()).await?;
        }
        crear_orden_de_prueba(&db, usuario.id_usuario, producto.id_producto, 1).await?;

        let recientes = get_ventas_recientes(&db).await?;
        assert_eq!(recientes.len(), 5);
        assert!(recientes.iter().all(|v| v.total == 100.0));
        assert!(recientes[0].fecha_orden >= recientes[4].fecha_orden);

        Ok(())
    }
}
