//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod categoria;
pub mod detalle_orden;
pub mod marca;
pub mod orden;
pub mod producto;
pub mod usuario;

// Re-export specific types to avoid conflicts
pub use categoria::{Column as CategoriaColumn, Entity as Categoria, Model as CategoriaModel};
pub use detalle_orden::{
    Column as DetalleOrdenColumn, Entity as DetalleOrden, Model as DetalleOrdenModel,
};
pub use marca::{Column as MarcaColumn, Entity as Marca, Model as MarcaModel};
pub use orden::{
    Column as OrdenColumn, Entity as Orden, EstadoEntrega, EstadoPago, Model as OrdenModel,
};
pub use producto::{
    Column as ProductoColumn, Entity as Producto, Model as ProductoModel, TipoProducto,
};
pub use usuario::{Column as UsuarioColumn, Entity as Usuario, Model as UsuarioModel, Rol};
