pub mod config;
pub mod error;
pub mod types;

pub use config::GeneratorConfig;
pub use error::{ForgeError, Result};
pub use types::Category;
