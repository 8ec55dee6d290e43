//! Producto entity - Catalog items sold by the store.
//!
//! Each product has a price, on-hand quantity, a type (camera or accessory),
//! and optional brand/category references. The quantity is only decremented
//! as part of payment settlement, through an atomic conditional update.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of catalog item
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum TipoProducto {
    /// Camera body or kit
    #[sea_orm(string_value = "camara")]
    Camara,
    /// Lens, tripod, bag, or other accessory
    #[sea_orm(string_value = "accesorio")]
    Accesorio,
}

/// Producto database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "productos")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id_producto: i64,
    /// Product name
    pub nombre: String,
    /// Free-form description, optional
    pub descripcion: Option<String>,
    /// Brand reference, optional
    pub id_marca: Option<i64>,
    /// Category reference, optional
    pub id_categoria: Option<i64>,
    /// Unit price in store currency
    pub precio: f64,
    /// On-hand stock quantity
    pub cantidad: i32,
    /// Image URL, optional
    pub imagen: Option<String>,
    /// Whether this is a camera or an accessory
    pub tipo_producto: TipoProducto,
    /// When the product was added to the catalog
    pub fecha_creacion: DateTimeUtc,
}

/// Defines relationships between Producto and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product optionally belongs to one brand
    #[sea_orm(
        belongs_to = "super::marca::Entity",
        from = "Column::IdMarca",
        to = "super::marca::Column::IdMarca"
    )]
    Marca,
    /// Each product optionally belongs to one category
    #[sea_orm(
        belongs_to = "super::categoria::Entity",
        from = "Column::IdCategoria",
        to = "super::categoria::Column::IdCategoria"
    )]
    Categoria,
    /// One product appears in many order lines
    #[sea_orm(has_many = "super::detalle_orden::Entity")]
    DetallesOrden,
}

impl Related<super::marca::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Marca.def()
    }
}

impl Related<super::categoria::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categoria.def()
    }
}

impl Related<super::detalle_orden::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DetallesOrden.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
