//! User business logic - registration, credential checks, and account CRUD.
//!
//! Passwords are bcrypt-hashed on every write path; the stored hash never
//! leaves this module except inside the entity model, and the API layer is
//! expected to serialize [`UsuarioPublico`] instead.

use crate::{
    entities::{Rol, Usuario, usuario},
    errors::{Error, Result},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

/// Registration payload.
#[derive(Debug, Clone, Deserialize)]
pub struct NuevoUsuario {
    pub nombre: String,
    pub apellido_paterno: String,
    #[serde(default)]
    pub apellido_materno: Option<String>,
    pub correo: String,
    #[serde(alias = "contraseña")]
    pub contrasena: String,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub rol: Option<Rol>,
}

/// Admin update payload: overwrites the listed fields unconditionally.
#[derive(Debug, Clone, Deserialize)]
pub struct ActualizacionUsuario {
    pub nombre: String,
    pub apellido_paterno: String,
    #[serde(default)]
    pub apellido_materno: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    pub rol: Rol,
}

/// Self-service profile update: omitted fields keep their current values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActualizacionPerfil {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub apellido_paterno: Option<String>,
    #[serde(default)]
    pub apellido_materno: Option<String>,
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default, alias = "contraseña")]
    pub contrasena: Option<String>,
}

/// User representation safe to send to clients (no password hash).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsuarioPublico {
    pub id_usuario: i64,
    pub nombre: String,
    pub apellido_paterno: String,
    pub apellido_materno: Option<String>,
    pub correo: String,
    pub telefono: Option<String>,
    pub rol: Rol,
}

impl From<usuario::Model> for UsuarioPublico {
    fn from(u: usuario::Model) -> Self {
        Self {
            id_usuario: u.id_usuario,
            nombre: u.nombre,
            apellido_paterno: u.apellido_paterno,
            apellido_materno: u.apellido_materno,
            correo: u.correo,
            telefono: u.telefono,
            rol: u.rol,
        }
    }
}

/// Registers a new user, hashing the password with bcrypt.
///
/// # Errors
/// Returns [`Error::CorreoEnUso`] if the email is already registered and
/// [`Error::Validacion`] for empty required fields.
pub async fn registrar(db: &DatabaseConnection, nuevo: NuevoUsuario) -> Result<usuario::Model> {
    if nuevo.correo.trim().is_empty() || nuevo.contrasena.is_empty() {
        return Err(Error::Validacion {
            message: "correo y contraseña son obligatorios".to_string(),
        });
    }

    let existente = buscar_por_correo(db, &nuevo.correo).await?;
    if existente.is_some() {
        return Err(Error::CorreoEnUso {
            correo: nuevo.correo,
        });
    }

    let hash = bcrypt::hash(&nuevo.contrasena, bcrypt::DEFAULT_COST)?;

    let usuario = usuario::ActiveModel {
        nombre: Set(nuevo.nombre),
        apellido_paterno: Set(nuevo.apellido_paterno),
        apellido_materno: Set(nuevo.apellido_materno),
        correo: Set(nuevo.correo),
        contrasena: Set(hash),
        telefono: Set(nuevo.telefono),
        rol: Set(nuevo.rol.unwrap_or(Rol::Cliente)),
        ..Default::default()
    };

    usuario.insert(db).await.map_err(Into::into)
}

/// Checks a login attempt against the stored bcrypt hash.
///
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn verificar_credenciales(
    db: &DatabaseConnection,
    correo: &str,
    contrasena: &str,
) -> Result<usuario::Model> {
    let usuario = buscar_por_correo(db, correo)
        .await?
        .ok_or(Error::CredencialesInvalidas)?;

    if bcrypt::verify(contrasena, &usuario.contrasena)? {
        Ok(usuario)
    } else {
        Err(Error::CredencialesInvalidas)
    }
}

/// Finds a user by email.
pub async fn buscar_por_correo(
    db: &DatabaseConnection,
    correo: &str,
) -> Result<Option<usuario::Model>> {
    Usuario::find()
        .filter(usuario::Column::Correo.eq(correo))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all users ordered by id.
pub async fn get_todos(db: &DatabaseConnection) -> Result<Vec<usuario::Model>> {
    Usuario::find()
        .order_by_asc(usuario::Column::IdUsuario)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Overwrites a user's editable fields from an admin request.
///
/// # Errors
/// Returns [`Error::UsuarioNoEncontrado`] if the id does not exist.
pub async fn actualizar(
    db: &DatabaseConnection,
    id: i64,
    datos: ActualizacionUsuario,
) -> Result<usuario::Model> {
    let usuario = Usuario::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::UsuarioNoEncontrado { id })?;

    let mut activo: usuario::ActiveModel = usuario.into();
    activo.nombre = Set(datos.nombre);
    activo.apellido_paterno = Set(datos.apellido_paterno);
    activo.apellido_materno = Set(datos.apellido_materno);
    activo.telefono = Set(datos.telefono);
    activo.rol = Set(datos.rol);

    activo.update(db).await.map_err(Into::into)
}

/// Hard-deletes a user by id.
///
/// # Errors
/// Returns [`Error::UsuarioNoEncontrado`] if no row was deleted.
pub async fn eliminar(db: &DatabaseConnection, id: i64) -> Result<()> {
    let resultado = Usuario::delete_by_id(id).exec(db).await?;
    if resultado.rows_affected == 0 {
        return Err(Error::UsuarioNoEncontrado { id });
    }
    Ok(())
}

/// Applies a partial profile update for the authenticated user.
///
/// Omitted fields keep their stored values. Changing the email re-checks
/// uniqueness; providing a password re-hashes it.
pub async fn actualizar_perfil(
    db: &DatabaseConnection,
    id: i64,
    datos: ActualizacionPerfil,
) -> Result<usuario::Model> {
    let usuario = Usuario::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::UsuarioNoEncontrado { id })?;

    if let Some(correo) = &datos.correo {
        if correo != &usuario.correo {
            let en_uso = buscar_por_correo(db, correo).await?;
            if en_uso.is_some() {
                return Err(Error::CorreoEnUso {
                    correo: correo.clone(),
                });
            }
        }
    }

    let mut activo: usuario::ActiveModel = usuario.into();
    if let Some(nombre) = datos.nombre {
        activo.nombre = Set(nombre);
    }
    if let Some(apellido_paterno) = datos.apellido_paterno {
        activo.apellido_paterno = Set(apellido_paterno);
    }
    if let Some(apellido_materno) = datos.apellido_materno {
        activo.apellido_materno = Set(Some(apellido_materno));
    }
    if let Some(correo) = datos.correo {
        activo.correo = Set(correo);
    }
    if let Some(telefono) = datos.telefono {
        activo.telefono = Set(Some(telefono));
    }
    if let Some(contrasena) = datos.contrasena {
        activo.contrasena = Set(bcrypt::hash(&contrasena, bcrypt::DEFAULT_COST)?);
    }

    activo.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_registrar_y_login() -> Result<()> {
        let db = setup_test_db().await?;

        let usuario = registrar(&db, nuevo_usuario("ana@example.com")).await?;
        assert_eq!(usuario.rol, Rol::Cliente);
        // The stored credential is a hash, not the raw password
        assert_ne!(usuario.contrasena, "secreta123");

        let verificado = verificar_credenciales(&db, "ana@example.com", "secreta123").await?;
        assert_eq!(verificado.id_usuario, usuario.id_usuario);

        Ok(())
    }

    #[tokio::test]
    async fn test_registrar_correo_duplicado() -> Result<()> {
        let db = setup_test_db().await?;

        registrar(&db, nuevo_usuario("ana@example.com")).await?;
        let resultado = registrar(&db, nuevo_usuario("ana@example.com")).await;
        assert!(matches!(
            resultado.unwrap_err(),
            Error::CorreoEnUso { correo: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_login_contrasena_incorrecta() -> Result<()> {
        let db = setup_test_db().await?;
        registrar(&db, nuevo_usuario("ana@example.com")).await?;

        let resultado = verificar_credenciales(&db, "ana@example.com", "incorrecta").await;
        assert!(matches!(
            resultado.unwrap_err(),
            Error::CredencialesInvalidas
        ));

        let resultado = verificar_credenciales(&db, "nadie@example.com", "secreta123").await;
        assert!(matches!(
            resultado.unwrap_err(),
            Error::CredencialesInvalidas
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_actualizar_y_eliminar() -> Result<()> {
        let db = setup_test_db().await?;
        let usuario = registrar(&db, nuevo_usuario("ana@example.com")).await?;

        let actualizado = actualizar(
            &db,
            usuario.id_usuario,
            ActualizacionUsuario {
                nombre: "Ana María".to_string(),
                apellido_paterno: "García".to_string(),
                apellido_materno: None,
                telefono: Some("5550000".to_string()),
                rol: Rol::Administrador,
            },
        )
        .await?;
        assert_eq!(actualizado.nombre, "Ana María");
        assert_eq!(actualizado.rol, Rol::Administrador);
        // Admin update overwrites unconditionally: materno was cleared
        assert_eq!(actualizado.apellido_materno, None);

        eliminar(&db, usuario.id_usuario).await?;
        let resultado = eliminar(&db, usuario.id_usuario).await;
        assert!(matches!(
            resultado.unwrap_err(),
            Error::UsuarioNoEncontrado { id: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_actualizar_perfil_parcial() -> Result<()> {
        let db = setup_test_db().await?;
        let usuario = registrar(&db, nuevo_usuario("ana@example.com")).await?;

        let actualizado = actualizar_perfil(
            &db,
            usuario.id_usuario,
            ActualizacionPerfil {
                telefono: Some("5551234".to_string()),
                ..Default::default()
            },
        )
        .await?;

        // Omitted fields keep their values
        assert_eq!(actualizado.nombre, usuario.nombre);
        assert_eq!(actualizado.correo, usuario.correo);
        assert_eq!(actualizado.telefono, Some("5551234".to_string()));

        Ok(())
    }

    #[tokio::test]
    async fn test_actualizar_perfil_correo_en_uso() -> Result<()> {
        let db = setup_test_db().await?;
        registrar(&db, nuevo_usuario("ana@example.com")).await?;
        let otro = registrar(&db, nuevo_usuario("luis@example.com")).await?;

        let resultado = actualizar_perfil(
            &db,
            otro.id_usuario,
            ActualizacionPerfil {
                correo: Some("ana@example.com".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(
            resultado.unwrap_err(),
            Error::CorreoEnUso { correo: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_actualizar_perfil_cambia_contrasena() -> Result<()> {
        let db = setup_test_db().await?;
        let usuario = registrar(&db, nuevo_usuario("ana@example.com")).await?;

        actualizar_perfil(
            &db,
            usuario.id_usuario,
            ActualizacionPerfil {
                contrasena: Some("nueva456".to_string()),
                ..Default::default()
            },
        )
        .await?;

        assert!(verificar_credenciales(&db, "ana@example.com", "nueva456")
            .await
            .is_ok());
        assert!(verificar_credenciales(&db, "ana@example.com", "secreta123")
            .await
            .is_err());

        Ok(())
    }
}
