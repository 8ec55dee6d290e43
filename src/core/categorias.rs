//! Category lookup CRUD. Same shape and caveats as [`crate::core::marcas`].

use crate::{
    entities::{Categoria, categoria},
    errors::{Error, Result},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

/// Retrieves all categories ordered by id.
pub async fn get_todas(db: &DatabaseConnection) -> Result<Vec<categoria::Model>> {
    Categoria::find()
        .order_by_asc(categoria::Column::IdCategoria)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a category, validating that the name is not empty.
pub async fn crear(db: &DatabaseConnection, nombre: String) -> Result<categoria::Model> {
    if nombre.trim().is_empty() {
        return Err(Error::Validacion {
            message: "el nombre de la categoría no puede estar vacío".to_string(),
        });
    }

    categoria::ActiveModel {
        nombre: Set(nombre.trim().to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Renames a category by id.
pub async fn actualizar(
    db: &DatabaseConnection,
    id: i64,
    nombre: String,
) -> Result<categoria::Model> {
    let categoria = Categoria::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::CategoriaNoEncontrada { id })?;

    let mut activo: categoria::ActiveModel = categoria.into();
    activo.nombre = Set(nombre);
    activo.update(db).await.map_err(Into::into)
}

/// Hard-deletes a category by id.
pub async fn eliminar(db: &DatabaseConnection, id: i64) -> Result<()> {
    let resultado = Categoria::delete_by_id(id).exec(db).await?;
    if resultado.rows_affected == 0 {
        return Err(Error::CategoriaNoEncontrada { id });
    }
    Ok(())
}
