//! Usuario entity - Represents registered users of the store.
//!
//! Each user carries identity and contact data, a bcrypt-hashed credential,
//! and a role that separates storefront customers from back-office admins.
//! The email (`correo`) is unique across the table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role of a user within the store
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum Rol {
    /// Storefront customer (default on registration)
    #[sea_orm(string_value = "cliente")]
    Cliente,
    /// Back-office administrator
    #[sea_orm(string_value = "administrador")]
    Administrador,
}

/// Usuario database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "usuarios")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id_usuario: i64,
    /// Given name
    pub nombre: String,
    /// Paternal surname
    pub apellido_paterno: String,
    /// Maternal surname, optional
    pub apellido_materno: Option<String>,
    /// Email address; unique login identifier
    #[sea_orm(unique)]
    pub correo: String,
    /// bcrypt hash of the password; never serialized back to clients as-is
    pub contrasena: String,
    /// Contact phone number, optional
    pub telefono: Option<String>,
    /// Role: `cliente` or `administrador`
    pub rol: Rol,
}

/// Defines relationships between Usuario and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user places many orders
    #[sea_orm(has_many = "super::orden::Entity")]
    Ordenes,
}

impl Related<super::orden::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ordenes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
