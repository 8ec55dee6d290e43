//! Shared test utilities for the camera store.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        ordenes::{self, DatosPago, ItemOrden, NuevaOrden},
        productos::{self, DatosProducto},
        usuarios::{self, NuevoUsuario},
    },
    entities::{self, TipoProducto},
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Shipping cost used by [`datos_pago_de_prueba`].
pub const COSTO_ENVIO_DE_PRUEBA: f64 = 25.0;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a registration payload with the given email and fixed defaults.
pub fn nuevo_usuario(correo: &str) -> NuevoUsuario {
    NuevoUsuario {
        nombre: "Ana".to_string(),
        apellido_paterno: "García".to_string(),
        apellido_materno: None,
        correo: correo.to_string(),
        contrasena: "secreta123".to_string(),
        telefono: None,
        rol: None,
    }
}

/// Registers a test customer with a fixed default email.
pub async fn crear_usuario_de_prueba(db: &DatabaseConnection) -> Result<entities::usuario::Model> {
    crear_usuario_con_correo(db, "ana@example.com").await
}

/// Registers a test customer with the given email.
pub async fn crear_usuario_con_correo(
    db: &DatabaseConnection,
    correo: &str,
) -> Result<entities::usuario::Model> {
    usuarios::registrar(db, nuevo_usuario(correo)).await
}

/// Creates a test product without brand or category.
pub async fn crear_producto_de_prueba(
    db: &DatabaseConnection,
    nombre: &str,
    precio: f64,
    cantidad: i32,
) -> Result<entities::producto::Model> {
    crear_producto_con_marca(db, nombre, precio, cantidad, None).await
}

/// Creates a test product, optionally linked to a brand.
pub async fn crear_producto_con_marca(
    db: &DatabaseConnection,
    nombre: &str,
    precio: f64,
    cantidad: i32,
    id_marca: Option<i64>,
) -> Result<entities::producto::Model> {
    productos::crear(
        db,
        DatosProducto {
            nombre: nombre.to_string(),
            descripcion: None,
            id_marca,
            id_categoria: None,
            precio,
            cantidad,
            imagen: None,
            tipo_producto: TipoProducto::Camara,
        },
    )
    .await
}

/// Creates a pending single-line order for the given user and product.
pub async fn crear_orden_de_prueba(
    db: &DatabaseConnection,
    usuario_id: i64,
    producto_id: i64,
    cantidad: i32,
) -> Result<entities::orden::Model> {
    ordenes::crear_orden(
        db,
        NuevaOrden {
            usuario_id,
            usuario_nombre: Some("Ana García".to_string()),
            items: vec![ItemOrden {
                producto_id,
                cantidad,
            }],
        },
    )
    .await
}

/// Builds a settlement payload with standard shipping.
pub fn datos_pago_de_prueba() -> DatosPago {
    DatosPago {
        metodo_pago: "tarjeta".to_string(),
        tipo_envio: Some("estandar".to_string()),
        descripcion_envio: None,
        costo_envio: COSTO_ENVIO_DE_PRUEBA,
    }
}
