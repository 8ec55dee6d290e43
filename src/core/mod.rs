//! Core business logic - framework-agnostic store operations.
//!
//! Everything in here takes a database connection plus plain data and returns
//! `Result` values; the HTTP layer stays a thin mapping on top.

/// JWT issuing and verification
pub mod auth;
/// Category lookup CRUD
pub mod categorias;
/// Dashboard statistics and sales aggregation
pub mod dashboard;
/// PDF invoice rendering
pub mod factura;
/// Brand lookup CRUD
pub mod marcas;
/// Order creation, payment settlement, and order queries
pub mod ordenes;
/// Catalog product CRUD
pub mod productos;
/// User registration, login, and profile management
pub mod usuarios;
