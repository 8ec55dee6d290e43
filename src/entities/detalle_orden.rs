//! DetalleOrden entity - One line item of an order.
//!
//! Line items snapshot the unit price and subtotal at order-creation time and
//! are never mutated afterward; `subtotal == precio_unitario * cantidad`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// DetalleOrden database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "detalles_orden")]
pub struct Model {
    /// Unique identifier for the line item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning order
    pub orden_id: i64,
    /// Referenced product
    pub producto_id: i64,
    /// Purchased quantity
    pub cantidad: i32,
    /// Unit price snapshot at order creation
    pub precio_unitario: f64,
    /// `precio_unitario * cantidad` snapshot at order creation
    pub subtotal: f64,
}

/// Defines relationships between DetalleOrden and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line item belongs to one order
    #[sea_orm(
        belongs_to = "super::orden::Entity",
        from = "Column::OrdenId",
        to = "super::orden::Column::Id"
    )]
    Orden,
    /// Each line item references one product
    #[sea_orm(
        belongs_to = "super::producto::Entity",
        from = "Column::ProductoId",
        to = "super::producto::Column::IdProducto"
    )]
    Producto,
}

impl Related<super::orden::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orden.def()
    }
}

impl Related<super::producto::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Producto.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
