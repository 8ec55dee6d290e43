//! Categoria entity - Product category lookup table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Categoria database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categorias")]
pub struct Model {
    /// Unique identifier for the category
    #[sea_orm(primary_key)]
    pub id_categoria: i64,
    /// Category name (e.g., "Reflex", "Tripodes")
    pub nombre: String,
}

/// Defines relationships between Categoria and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One category has many products
    #[sea_orm(has_many = "super::producto::Entity")]
    Productos,
}

impl Related<super::producto::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Productos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
