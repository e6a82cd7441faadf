//! Generator configuration with documented constants
//!
//! The numbers here shape how species are allocated. They can be overridden
//! from a TOML file; missing keys fall back to the defaults below.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{ForgeError, Result};

/// Configuration for the empire generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Maximum number of full restarts the trait allocator may make
    ///
    /// Each attempt discards the whole trait set. With the standard
    /// catalogs an attempt balances roughly one time in ten, so the
    /// default leaves a wide margin before DidNotConverge is reported.
    pub max_trait_attempts: u32,

    /// How many traits an attempt draws, one entry picked uniformly
    ///
    /// Repeated values weight the draw: the default favours 5 traits
    /// (3/9), then 3 and 4 (2/9 each), then 1 and 2 (1/9 each).
    pub trait_count_options: Vec<usize>,

    /// Trait points for a species whose authority doesn't override them
    pub default_trait_points: i32,

    /// Trait points for a sub-species requested by an origin
    pub sub_species_trait_points: i32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_trait_attempts: 10_000,
            trait_count_options: vec![1, 2, 3, 3, 4, 4, 5, 5, 5],
            default_trait_points: 2,
            sub_species_trait_points: 2,
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GeneratorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_trait_attempts == 0 {
            return Err(ForgeError::InvalidConfig(
                "max_trait_attempts must be at least 1".into(),
            ));
        }

        if self.trait_count_options.is_empty() {
            return Err(ForgeError::InvalidConfig(
                "trait_count_options must not be empty".into(),
            ));
        }

        if self.trait_count_options.contains(&0) {
            return Err(ForgeError::InvalidConfig(format!(
                "trait_count_options ({:?}) must only contain positive counts",
                self.trait_count_options
            )));
        }

        Ok(())
    }
}
