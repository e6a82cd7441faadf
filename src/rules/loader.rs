//! Load catalogs from TOML

use std::fs;
use std::path::Path;

use crate::core::error::Result;
use crate::rules::catalog::Catalogs;
use crate::rules::validate::validate;

/// Catalogs shipped with the crate
const STANDARD_CATALOGS: &str = include_str!("../../data/catalogs.toml");

impl Catalogs {
    /// The built-in catalogs, parsed and validated
    pub fn standard() -> Result<Self> {
        Self::from_toml_str(STANDARD_CATALOGS)
    }

    /// Parse catalogs from TOML text and validate every cross-reference
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let catalogs: Catalogs = toml::from_str(content)?;
        validate(&catalogs)?;
        tracing::debug!(
            "Loaded catalogs: {} authorities, {} ethics, {} civics, {} origins, {} traits",
            catalogs.authorities.len(),
            catalogs.ethics.len(),
            catalogs.civics.len(),
            catalogs.origins.len(),
            catalogs.traits.len(),
        );
        Ok(catalogs)
    }
}

/// Load catalogs from a TOML file on disk
pub fn load_catalogs(path: &Path) -> Result<Catalogs> {
    let content = fs::read_to_string(path)?;
    Catalogs::from_toml_str(&content)
}
