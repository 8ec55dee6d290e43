//! Environment-derived application settings.
//!
//! Everything the server needs at startup is read once here. `JWT_SECRET`
//! is mandatory: the process refuses to start without it instead of silently
//! falling back to a predictable development value.

use crate::errors::{Error, Result};
use std::path::PathBuf;

/// Settings loaded at process startup and shared across handlers.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Port the HTTP server listens on (`PORT`, default 5000)
    pub puerto: u16,
    /// Secret used to sign and verify bearer tokens (`JWT_SECRET`, required)
    pub jwt_secret: String,
    /// Directory where generated invoices are written and statically served
    /// (`FACTURAS_DIR`, default `public/facturas`)
    pub directorio_facturas: PathBuf,
}

impl Settings {
    /// Reads settings from the environment.
    ///
    /// # Errors
    /// Fails when `JWT_SECRET` is unset or empty, or `PORT` is not a number.
    pub fn from_env() -> Result<Self> {
        let jwt_secret = std::env::var("JWT_SECRET").map_err(|_| Error::Config {
            message: "JWT_SECRET must be set".to_string(),
        })?;
        if jwt_secret.trim().is_empty() {
            return Err(Error::Config {
                message: "JWT_SECRET must not be empty".to_string(),
            });
        }

        let puerto = match std::env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| Error::Config {
                message: format!("PORT is not a valid port number: {raw}"),
            })?,
            Err(_) => 5000,
        };

        let directorio_facturas = std::env::var("FACTURAS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("public/facturas"));

        Ok(Self {
            puerto,
            jwt_secret,
            directorio_facturas,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Settings tests mutate process-wide env vars, so they run in one test
    // to avoid interleaving with each other.
    #[test]
    fn test_from_env() {
        std::env::remove_var("JWT_SECRET");
        std::env::remove_var("PORT");
        std::env::remove_var("FACTURAS_DIR");
        assert!(Settings::from_env().is_err());

        std::env::set_var("JWT_SECRET", "   ");
        assert!(Settings::from_env().is_err());

        std::env::set_var("JWT_SECRET", "s3creto");
        std::env::set_var("PORT", "8081");
        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.puerto, 8081);
        assert_eq!(settings.jwt_secret, "s3creto");
        assert_eq!(
            settings.directorio_facturas,
            PathBuf::from("public/facturas")
        );

        std::env::set_var("PORT", "not-a-port");
        assert!(Settings::from_env().is_err());
        std::env::remove_var("PORT");
    }
}
