//! JWT issuing and verification.
//!
//! Tokens are HS256-signed with the process-wide secret from [`crate::config::settings::Settings`]
//! and expire after 24 hours. The claims carry the user id and role so the
//! API layer can authorize without a database round trip.

use crate::{
    entities::{Rol, usuario},
    errors::{Error, Result},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Token lifetime in seconds (24 hours).
const VIGENCIA_SEGUNDOS: i64 = 24 * 60 * 60;

/// Claims embedded in every bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id (`id_usuario`)
    pub sub: i64,
    /// Role at token-issue time
    pub rol: Rol,
    /// Expiry as epoch seconds
    pub exp: i64,
}

/// Issues a signed token for the given user.
///
/// # Errors
/// Returns an error if signing fails.
pub fn emitir_token(jwt_secret: &str, usuario: &usuario::Model) -> Result<String> {
    let claims = Claims {
        sub: usuario.id_usuario,
        rol: usuario.rol,
        exp: chrono::Utc::now().timestamp() + VIGENCIA_SEGUNDOS,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .map_err(Into::into)
}

/// Verifies a token's signature and expiry, returning its claims.
///
/// Any decode failure is a client problem, so it collapses to
/// [`Error::TokenInvalido`]; signing failures in [`emitir_token`] stay
/// distinguishable as server-side errors.
///
/// # Errors
/// Returns [`Error::TokenInvalido`] for malformed, tampered, or expired tokens.
pub fn verificar_token(jwt_secret: &str, token: &str) -> Result<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| Error::TokenInvalido)?;

    Ok(data.claims)
}
