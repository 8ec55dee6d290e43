//! Initial catalog seeding from config.toml.
//!
//! On startup the store can seed its lookup tables (marcas, categorias) from
//! an optional TOML file, so a fresh deployment starts with a usable catalog.
//! Seeding is idempotent: entries whose name already exists are skipped.

use crate::{
    entities::{Categoria, Marca, categoria, marca},
    errors::{Error, Result},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Default)]
pub struct CatalogoConfig {
    /// Brand names to seed
    #[serde(default)]
    pub marcas: Vec<String>,
    /// Category names to seed
    #[serde(default)]
    pub categorias: Vec<String>,
}

/// Loads the catalog seed configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML syntax is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CatalogoConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config file: {e}"),
    })
}

/// Seeds marcas and categorias that are not already present.
///
/// Returns the number of rows inserted.
pub async fn seed_catalogo(db: &DatabaseConnection, config: &CatalogoConfig) -> Result<u64> {
    let mut insertados = 0u64;

    for nombre in &config.marcas {
        let existente = Marca::find()
            .filter(marca::Column::Nombre.eq(nombre.as_str()))
            .one(db)
            .await?;
        if existente.is_none() {
            marca::ActiveModel {
                nombre: Set(nombre.clone()),
                ..Default::default()
            }
            .insert(db)
            .await?;
            insertados += 1;
        }
    }

    for nombre in &config.categorias {
        let existente = Categoria::find()
            .filter(categoria::Column::Nombre.eq(nombre.as_str()))
            .one(db)
            .await?;
        if existente.is_none() {
            categoria::ActiveModel {
                nombre: Set(nombre.clone()),
                ..Default::default()
            }
            .insert(db)
            .await?;
            insertados += 1;
        }
    }

    if insertados > 0 {
        info!(insertados, "seeded initial catalog entries");
    }
    Ok(insertados)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    #[test]
    fn test_parse_config() {
        let config: CatalogoConfig = toml::from_str(
            r#"
            marcas = ["Canon", "Nikon"]
            categorias = ["Reflex"]
            "#,
        )
        .unwrap();
        assert_eq!(config.marcas.len(), 2);
        assert_eq!(config.categorias, vec!["Reflex".to_string()]);
    }

    #[test]
    fn test_parse_config_empty_sections() {
        let config: CatalogoConfig = toml::from_str("").unwrap();
        assert!(config.marcas.is_empty());
        assert!(config.categorias.is_empty());
    }

    #[tokio::test]
    async fn test_seed_idempotente() -> Result<()> {
        let db = setup_test_db().await?;
        let config = CatalogoConfig {
            marcas: vec!["Canon".to_string(), "Sony".to_string()],
            categorias: vec!["Reflex".to_string()],
        };

        assert_eq!(seed_catalogo(&db, &config).await?, 3);
        // Second run inserts nothing
        assert_eq!(seed_catalogo(&db, &config).await?, 0);

        let marcas = Marca::find().all(&db).await?;
        assert_eq!(marcas.len(), 2);
        Ok(())
    }
}
