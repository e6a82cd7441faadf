use thiserror::Error;

use crate::core::types::Category;

#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("No eligible {0} left to draw from")]
    EmptyEligibleSet(Category),

    #[error("Trait allocation for {pop_type} species did not converge after {attempts} attempts")]
    DidNotConverge { pop_type: String, attempts: u32 },

    #[error("Empire draft is missing its {0}")]
    IncompleteDraft(Category),

    #[error("Invalid catalog: {}", .0.join("; "))]
    InvalidCatalog(Vec<String>),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ForgeError>;
