//! Request extractors, notably bearer-token authentication.

use crate::{
    api::AppState,
    core::auth,
    entities::Rol,
    errors::{Error, Result},
};
use axum::{extract::FromRequestParts, http::request::Parts};

/// Identity of the authenticated caller, extracted from the `Authorization`
/// header. Using this extractor in a handler makes the route require a valid
/// bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub usuario_id: i64,
    pub rol: Rol,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(Error::TokenInvalido)?;

        let claims = auth::verificar_token(&state.settings.jwt_secret, token)?;
        Ok(Self {
            usuario_id: claims.sub,
            rol: claims.rol,
        })
    }
}
