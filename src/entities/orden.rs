//! Orden entity - Represents one purchase attempt.
//!
//! The original schema kept a single `estado` column that mixed payment state
//! and fulfillment state; here they are split into `estado_pago` and
//! `estado_entrega`, each with its own transition table. `total` is a
//! snapshot computed from line items at creation time and only changes via
//! the explicit admin total update.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment state of an order
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum EstadoPago {
    /// Created, awaiting settlement
    #[sea_orm(string_value = "pendiente")]
    Pendiente,
    /// Settled; stock has been decremented and an invoice number assigned
    #[sea_orm(string_value = "pagado")]
    Pagado,
    /// Abandoned or voided before settlement
    #[sea_orm(string_value = "cancelado")]
    Cancelado,
}

impl EstadoPago {
    /// Transition table for the payment state machine.
    ///
    /// `pendiente` may move to `pagado` or `cancelado`; the two terminal
    /// states admit no further transitions.
    #[must_use]
    pub fn puede_transicionar_a(self, destino: Self) -> bool {
        matches!(
            (self, destino),
            (Self::Pendiente, Self::Pagado) | (Self::Pendiente, Self::Cancelado)
        )
    }
}

/// Fulfillment state of an order
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum EstadoEntrega {
    /// Not yet handed to the customer
    #[sea_orm(string_value = "pendiente")]
    Pendiente,
    /// Delivered
    #[sea_orm(string_value = "entregado")]
    Entregado,
}

/// Orden database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ordenes")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user
    pub usuario_id: i64,
    /// Display name of the owner, cached at creation time
    pub usuario_nombre: Option<String>,
    /// Order total, snapshotted from line-item prices at creation
    pub total: f64,
    /// Payment state machine
    pub estado_pago: EstadoPago,
    /// Fulfillment state machine
    pub estado_entrega: EstadoEntrega,
    /// When the order was created
    pub fecha_orden: DateTimeUtc,
    /// When the order was paid, if it has been
    pub fecha_pago: Option<DateTimeUtc>,
    /// Payment method recorded at settlement
    pub metodo_pago: Option<String>,
    /// Invoice number assigned at settlement (`FAC-<epoch millis>`)
    pub numero_factura: Option<String>,
    /// Shipping tier selected at settlement (normal, platino, oro)
    pub tipo_envio: Option<String>,
    /// Human-readable description of the shipping tier
    pub descripcion_envio: Option<String>,
    /// Shipping cost, added on top of `total` on the invoice
    pub costo_envio: f64,
}

/// Defines relationships between Orden and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order belongs to one user
    #[sea_orm(
        belongs_to = "super::usuario::Entity",
        from = "Column::UsuarioId",
        to = "super::usuario::Column::IdUsuario"
    )]
    Usuario,
    /// One order has many line items
    #[sea_orm(has_many = "super::detalle_orden::Entity")]
    Detalles,
}

impl Related<super::usuario::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Usuario.def()
    }
}

impl Related<super::detalle_orden::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Detalles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
