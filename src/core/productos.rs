//! Catalog product CRUD.
//!
//! Listing joins brand and category names in Rust over three bulk queries so
//! the storefront gets everything in one response; updates overwrite every
//! mutable field unconditionally - there is no partial-patch path here, an
//! omitted optional field becomes `None`.

use crate::{
    entities::{Categoria, Marca, Producto, TipoProducto, categoria, marca, producto},
    errors::{Error, Result},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Create/update payload for a product.
#[derive(Debug, Clone, Deserialize)]
pub struct DatosProducto {
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub id_marca: Option<i64>,
    #[serde(default)]
    pub id_categoria: Option<i64>,
    pub precio: f64,
    pub cantidad: i32,
    #[serde(default)]
    pub imagen: Option<String>,
    pub tipo_producto: TipoProducto,
}

/// Product together with its resolved brand and category, for catalog listings.
#[derive(Debug, Clone, Serialize)]
pub struct ProductoCatalogo {
    #[serde(flatten)]
    pub producto: producto::Model,
    pub marca: Option<marca::Model>,
    pub categoria: Option<categoria::Model>,
}

/// Retrieves the whole catalog ordered by id, with brands and categories resolved.
pub async fn get_todos(db: &DatabaseConnection) -> Result<Vec<ProductoCatalogo>> {
    let productos = Producto::find()
        .order_by_asc(producto::Column::IdProducto)
        .all(db)
        .await?;

    let marcas: HashMap<i64, marca::Model> = Marca::find()
        .all(db)
        .await?
        .into_iter()
        .map(|m| (m.id_marca, m))
        .collect();
    let categorias: HashMap<i64, categoria::Model> = Categoria::find()
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.id_categoria, c))
        .collect();

    Ok(productos
        .into_iter()
        .map(|p| {
            let marca = p.id_marca.and_then(|id| marcas.get(&id).cloned());
            let categoria = p.id_categoria.and_then(|id| categorias.get(&id).cloned());
            ProductoCatalogo {
                producto: p,
                marca,
                categoria,
            }
        })
        .collect())
}

/// Finds a product by id.
pub async fn get_por_id(db: &DatabaseConnection, id: i64) -> Result<Option<producto::Model>> {
    Producto::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Creates a product, validating name and non-negative price/stock.
pub async fn crear(db: &DatabaseConnection, datos: DatosProducto) -> Result<producto::Model> {
    validar(&datos)?;

    producto::ActiveModel {
        nombre: Set(datos.nombre),
        descripcion: Set(datos.descripcion),
        id_marca: Set(datos.id_marca),
        id_categoria: Set(datos.id_categoria),
        precio: Set(datos.precio),
        cantidad: Set(datos.cantidad),
        imagen: Set(datos.imagen),
        tipo_producto: Set(datos.tipo_producto),
        fecha_creacion: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Overwrites every mutable field of a product from the request payload.
pub async fn actualizar(
    db: &DatabaseConnection,
    id: i64,
    datos: DatosProducto,
) -> Result<producto::Model> {
    validar(&datos)?;

    let producto = Producto::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::ProductoNoEncontrado { id })?;

    let mut activo: producto::ActiveModel = producto.into();
    activo.nombre = Set(datos.nombre);
    activo.descripcion = Set(datos.descripcion);
    activo.id_marca = Set(datos.id_marca);
    activo.id_categoria = Set(datos.id_categoria);
    activo.precio = Set(datos.precio);
    activo.cantidad = Set(datos.cantidad);
    activo.imagen = Set(datos.imagen);
    activo.tipo_producto = Set(datos.tipo_producto);

    activo.update(db).await.map_err(Into::into)
}

/// Hard-deletes a product by id.
pub async fn eliminar(db: &DatabaseConnection, id: i64) -> Result<()> {
    let resultado = Producto::delete_by_id(id).exec(db).await?;
    if resultado.rows_affected == 0 {
        return Err(Error::ProductoNoEncontrado { id });
    }
    Ok(())
}

fn validar(datos: &DatosProducto) -> Result<()> {
    if datos.nombre.trim().is_empty() {
        return Err(Error::Validacion {
            message: "el nombre del producto no puede estar vacío".to_string(),
        });
    }
    if !datos.precio.is_finite() || datos.precio < 0.0 {
        return Err(Error::Validacion {
            message: format!("precio inválido: {}", datos.precio),
        });
    }
    if datos.cantidad < 0 {
        return Err(Error::Validacion {
            message: format!("cantidad inválida: {}", datos.cantidad),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    fn datos(nombre: &str) -> DatosProducto {
        DatosProducto {
            nombre: nombre.to_string(),
            descripcion: Some("Cuerpo de cámara".to_string()),
            id_marca: None,
            id_categoria: None,
            precio: 1500.0,
            cantidad: 3,
            imagen: None,
            tipo_producto: TipoProducto::Camara,
        }
    }

    #[tokio::test]
    async fn test_crear_y_listar() -> Result<()> {
        let db = setup_test_db().await?;
        let marca = crate::core::marcas::crear(&db, "Canon".to_string()).await?;

        let mut con_marca = datos("EOS R5");
        con_marca.id_marca = Some(marca.id_marca);
        crear(&db, con_marca).await?;
        crear(&db, datos("Tripode")).await?;

        let catalogo = get_todos(&db).await?;
        assert_eq!(catalogo.len(), 2);
        assert_eq!(
            catalogo[0].marca.as_ref().map(|m| m.nombre.as_str()),
            Some("Canon")
        );
        assert!(catalogo[1].marca.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_actualizar_sobrescribe_todo() -> Result<()> {
        let db = setup_test_db().await?;
        let producto = crear(&db, datos("EOS R5")).await?;
        assert!(producto.descripcion.is_some());

        // An update without descripcion clears it - no partial patch
        let sin_descripcion = DatosProducto {
            nombre: "EOS R6".to_string(),
            descripcion: None,
            id_marca: None,
            id_categoria: None,
            precio: 1200.0,
            cantidad: 4,
            imagen: None,
            tipo_producto: TipoProducto::Camara,
        };
        let actualizado = actualizar(&db, producto.id_producto, sin_descripcion).await?;
        assert_eq!(actualizado.nombre, "EOS R6");
        assert_eq!(actualizado.descripcion, None);
        assert_eq!(actualizado.precio, 1200.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_validaciones() -> Result<()> {
        let db = setup_test_db().await?;

        let mut invalido = datos("  ");
        assert!(crear(&db, invalido.clone()).await.is_err());

        invalido = datos("X");
        invalido.precio = -1.0;
        assert!(crear(&db, invalido.clone()).await.is_err());

        invalido = datos("X");
        invalido.cantidad = -5;
        assert!(crear(&db, invalido).await.is_err());

        Ok(())
    }

    #[tokio::test]
    async fn test_eliminar_no_encontrado() -> Result<()> {
        let db = setup_test_db().await?;
        let resultado = eliminar(&db, 404).await;
        assert!(matches!(
            resultado.unwrap_err(),
            Error::ProductoNoEncontrado { id: 404 }
        ));
        Ok(())
    }
}
