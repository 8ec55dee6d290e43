//! Brand lookup CRUD.
//!
//! Deletion is a hard delete with no cascade guard: a brand still referenced
//! by products deletes fine and leaves the product's `id_marca` dangling.

use crate::{
    entities::{Marca, marca},
    errors::{Error, Result},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

/// Retrieves all brands ordered by id.
pub async fn get_todas(db: &DatabaseConnection) -> Result<Vec<marca::Model>> {
    Marca::find()
        .order_by_asc(marca::Column::IdMarca)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a brand, validating that the name is not empty.
pub async fn crear(db: &DatabaseConnection, nombre: String) -> Result<marca::Model> {
    if nombre.trim().is_empty() {
        return Err(Error::Validacion {
            message: "el nombre de la marca no puede estar vacío".to_string(),
        });
    }

    marca::ActiveModel {
        nombre: Set(nombre.trim().to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Renames a brand by id.
pub async fn actualizar(db: &DatabaseConnection, id: i64, nombre: String) -> Result<marca::Model> {
    let marca = Marca::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::MarcaNoEncontrada { id })?;

    let mut activo: marca::ActiveModel = marca.into();
    activo.nombre = Set(nombre);
    activo.update(db).await.map_err(Into::into)
}

/// Hard-deletes a brand by id.
pub async fn eliminar(db: &DatabaseConnection, id: i64) -> Result<()> {
    let resultado = Marca::delete_by_id(id).exec(db).await?;
    if resultado.rows_affected == 0 {
        return Err(Error::MarcaNoEncontrada { id });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::Producto;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_crud_marca() -> Result<()> {
        let db = setup_test_db().await?;

        let marca = crear(&db, "Canon".to_string()).await?;
        assert_eq!(marca.nombre, "Canon");

        let renombrada = actualizar(&db, marca.id_marca, "Canon MX".to_string()).await?;
        assert_eq!(renombrada.nombre, "Canon MX");

        assert_eq!(get_todas(&db).await?.len(), 1);

        eliminar(&db, marca.id_marca).await?;
        assert!(get_todas(&db).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_crear_nombre_vacio() -> Result<()> {
        let db = setup_test_db().await?;
        let resultado = crear(&db, "   ".to_string()).await;
        assert!(matches!(
            resultado.unwrap_err(),
            Error::Validacion { message: _ }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_actualizar_no_encontrada() -> Result<()> {
        let db = setup_test_db().await?;
        let resultado = actualizar(&db, 999, "X".to_string()).await;
        assert!(matches!(
            resultado.unwrap_err(),
            Error::MarcaNoEncontrada { id: 999 }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_eliminar_no_cascada() -> Result<()> {
        let db = setup_test_db().await?;
        let marca = crear(&db, "Canon".to_string()).await?;
        let producto = crear_producto_con_marca(&db, "EOS R5", 100.0, 5, Some(marca.id_marca)).await?;

        // Deleting a referenced brand succeeds and does not delete the product
        eliminar(&db, marca.id_marca).await?;

        let restante = Producto::find_by_id(producto.id_producto)
            .one(&db)
            .await?
            .unwrap();
        // The dangling reference remains
        assert_eq!(restante.id_marca, Some(marca.id_marca));

        Ok(())
    }
}
