//! Authentication and user-management handlers.

use crate::{
    api::{AppState, extract::AuthUser},
    core::{
        auth,
        usuarios::{
            self, ActualizacionPerfil, ActualizacionUsuario, NuevoUsuario, UsuarioPublico,
        },
    },
    errors::Result,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

/// Token plus public profile, returned by register and login.
#[derive(Debug, Serialize)]
pub struct RespuestaAuth {
    pub token: String,
    pub usuario: UsuarioPublico,
}

#[derive(Debug, Deserialize)]
pub struct Credenciales {
    pub correo: String,
    #[serde(alias = "contraseña")]
    pub contrasena: String,
}

pub async fn registrar(
    State(state): State<AppState>,
    Json(nuevo): Json<NuevoUsuario>,
) -> Result<(StatusCode, Json<RespuestaAuth>)> {
    let usuario = usuarios::registrar(&state.db, nuevo).await?;
    let token = auth::emitir_token(&state.settings.jwt_secret, &usuario)?;
    Ok((
        StatusCode::CREATED,
        Json(RespuestaAuth {
            token,
            usuario: usuario.into(),
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(credenciales): Json<Credenciales>,
) -> Result<Json<RespuestaAuth>> {
    let usuario =
        usuarios::verificar_credenciales(&state.db, &credenciales.correo, &credenciales.contrasena)
            .await?;
    let token = auth::emitir_token(&state.settings.jwt_secret, &usuario)?;
    Ok(Json(RespuestaAuth {
        token,
        usuario: usuario.into(),
    }))
}

pub async fn listar_usuarios(State(state): State<AppState>) -> Result<Json<Vec<UsuarioPublico>>> {
    let usuarios = usuarios::get_todos(&state.db).await?;
    Ok(Json(usuarios.into_iter().map(Into::into).collect()))
}

pub async fn actualizar_usuario(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(datos): Json<ActualizacionUsuario>,
) -> Result<Json<UsuarioPublico>> {
    let usuario = usuarios::actualizar(&state.db, id, datos).await?;
    Ok(Json(usuario.into()))
}

pub async fn eliminar_usuario(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    usuarios::eliminar(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Self-service profile update; the target user comes from the bearer token,
/// never from the body.
pub async fn actualizar_perfil(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(datos): Json<ActualizacionPerfil>,
) -> Result<Json<UsuarioPublico>> {
    let usuario = usuarios::actualizar_perfil(&state.db, auth_user.usuario_id, datos).await?;
    Ok(Json(usuario.into()))
}
