//! Database configuration module for the camera store.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary tables
//! based on the entity definitions. The module uses `SeaORM`'s `Schema::create_table_from_entity`
//! method to automatically generate SQL statements from the entity models, ensuring that the
//! database schema matches the Rust struct definitions without requiring manual SQL.

use crate::entities::{Categoria, DetalleOrden, Marca, Orden, Producto, Usuario};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL` environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/tienda_camaras.sqlite?mode=rwc".to_string());

    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from entity definitions.
///
/// Lookup tables (marcas, categorias) are created before productos, and
/// usuarios before ordenes, so foreign-key references resolve in order.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut usuario_table = schema.create_table_from_entity(Usuario);
    let mut marca_table = schema.create_table_from_entity(Marca);
    let mut categoria_table = schema.create_table_from_entity(Categoria);
    let mut producto_table = schema.create_table_from_entity(Producto);
    let mut orden_table = schema.create_table_from_entity(Orden);
    let mut detalle_table = schema.create_table_from_entity(DetalleOrden);

    // Startup re-runs must not fail against an existing database file
    usuario_table.if_not_exists();
    marca_table.if_not_exists();
    categoria_table.if_not_exists();
    producto_table.if_not_exists();
    orden_table.if_not_exists();
    detalle_table.if_not_exists();

    db.execute(builder.build(&usuario_table)).await?;
    db.execute(builder.build(&marca_table)).await?;
    db.execute(builder.build(&categoria_table)).await?;
    db.execute(builder.build(&producto_table)).await?;
    db.execute(builder.build(&orden_table)).await?;
    db.execute(builder.build(&detalle_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        categoria::Model as CategoriaModel, detalle_orden::Model as DetalleOrdenModel,
        marca::Model as MarcaModel, orden::Model as OrdenModel, producto::Model as ProductoModel,
        usuario::Model as UsuarioModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<UsuarioModel> = Usuario::find().limit(1).all(&db).await?;
        let _: Vec<MarcaModel> = Marca::find().limit(1).all(&db).await?;
        let _: Vec<CategoriaModel> = Categoria::find().limit(1).all(&db).await?;
        let _: Vec<ProductoModel> = Producto::find().limit(1).all(&db).await?;
        let _: Vec<OrdenModel> = Orden::find().limit(1).all(&db).await?;
        let _: Vec<DetalleOrdenModel> = DetalleOrden::find().limit(1).all(&db).await?;

        Ok(())
    }
}
