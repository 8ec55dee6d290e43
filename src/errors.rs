//! Unified error types and result handling.
//!
//! Core functions return structured variants; the API layer maps each variant
//! to an HTTP status plus a machine-readable code so clients can branch on
//! more than a free-text message. Anything unexpected collapses to a generic
//! 500 with the underlying error logged server-side.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::entities::EstadoPago;

/// All errors the store can produce.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation error: {message}")]
    Validacion { message: String },

    #[error("El correo {correo} ya está registrado")]
    CorreoEnUso { correo: String },

    #[error("Credenciales inválidas")]
    CredencialesInvalidas,

    #[error("Token no proporcionado o inválido")]
    TokenInvalido,

    #[error("Usuario {id} no encontrado")]
    UsuarioNoEncontrado { id: i64 },

    #[error("Producto {id} no encontrado")]
    ProductoNoEncontrado { id: i64 },

    #[error("Marca {id} no encontrada")]
    MarcaNoEncontrada { id: i64 },

    #[error("Categoría {id} no encontrada")]
    CategoriaNoEncontrada { id: i64 },

    #[error("Orden {id} no encontrada")]
    OrdenNoEncontrada { id: i64 },

    #[error("Transición de pago inválida: {de:?} -> {a:?}")]
    TransicionPagoInvalida { de: EstadoPago, a: EstadoPago },

    #[error("Stock insuficiente para {producto}: solicitado {solicitado}")]
    StockInsuficiente { producto: String, solicitado: i32 },

    #[error("La orden {orden_id} no tiene factura (aún no está pagada)")]
    FacturaNoDisponible { orden_id: i64 },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("QR generation error: {0}")]
    Qr(#[from] qrcode::types::QrError),

    #[error("PDF generation error: {message}")]
    Pdf { message: String },
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[derive(serde::Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
}

impl Error {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validacion { .. } => (StatusCode::BAD_REQUEST, "VALIDACION"),
            Self::CorreoEnUso { .. } => (StatusCode::BAD_REQUEST, "CORREO_EN_USO"),
            Self::CredencialesInvalidas => (StatusCode::UNAUTHORIZED, "CREDENCIALES_INVALIDAS"),
            // Jwt(_) is deliberately absent here: verification failures are
            // converted to TokenInvalido before they reach this mapping, so a
            // remaining Jwt error is a server-side signing failure (500).
            Self::TokenInvalido => (StatusCode::UNAUTHORIZED, "TOKEN_INVALIDO"),
            Self::UsuarioNoEncontrado { .. } => (StatusCode::NOT_FOUND, "USUARIO_NO_ENCONTRADO"),
            Self::ProductoNoEncontrado { .. } => (StatusCode::NOT_FOUND, "PRODUCTO_NO_ENCONTRADO"),
            Self::MarcaNoEncontrada { .. } => (StatusCode::NOT_FOUND, "MARCA_NO_ENCONTRADA"),
            Self::CategoriaNoEncontrada { .. } => {
                (StatusCode::NOT_FOUND, "CATEGORIA_NO_ENCONTRADA")
            }
            Self::OrdenNoEncontrada { .. } => (StatusCode::NOT_FOUND, "ORDEN_NO_ENCONTRADA"),
            Self::FacturaNoDisponible { .. } => (StatusCode::NOT_FOUND, "FACTURA_NO_DISPONIBLE"),
            Self::TransicionPagoInvalida { .. } => (StatusCode::CONFLICT, "TRANSICION_INVALIDA"),
            Self::StockInsuficiente { .. } => (StatusCode::CONFLICT, "STOCK_INSUFICIENTE"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "ERROR_INTERNO"),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Clients get a generic message for internal failures; the detail
        // stays in the server log.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "internal error while handling request");
            "Error interno del servidor".to_string()
        } else {
            self.to_string()
        };

        (
            status,
            Json(ErrorResponse {
                error: message,
                code,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            Error::CredencialesInvalidas.status_and_code().0,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            Error::OrdenNoEncontrada { id: 7 }.status_and_code().0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::StockInsuficiente {
                producto: "X".to_string(),
                solicitado: 3
            }
            .status_and_code(),
            (StatusCode::CONFLICT, "STOCK_INSUFICIENTE")
        );
        assert_eq!(
            Error::Config {
                message: "x".to_string()
            }
            .status_and_code()
            .0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        // A raw jsonwebtoken error is a signing failure, not a bad client token
        assert_eq!(
            Error::Jwt(jsonwebtoken::errors::ErrorKind::InvalidKeyFormat.into())
                .status_and_code()
                .0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::TokenInvalido.status_and_code(),
            (StatusCode::UNAUTHORIZED, "TOKEN_INVALIDO")
        );
    }
}
