//! Marca entity - Camera/accessory brand lookup table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Marca database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "marcas")]
pub struct Model {
    /// Unique identifier for the brand
    #[sea_orm(primary_key)]
    pub id_marca: i64,
    /// Brand name (e.g., "Canon", "Nikon")
    pub nombre: String,
}

/// Defines relationships between Marca and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One brand has many products
    #[sea_orm(has_many = "super::producto::Entity")]
    Productos,
}

impl Related<super::producto::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Productos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
