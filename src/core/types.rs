//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix that turns a base ethic into its intensified form
pub const FANATIC_PREFIX: &str = "Fanatic ";

/// The kinds of attribute the generator draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Authority,
    Ethic,
    Civic,
    Origin,
    Homeworld,
    PopType,
    Trait,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Authority => "authority",
            Category::Ethic => "ethic",
            Category::Civic => "civic",
            Category::Origin => "origin",
            Category::Homeworld => "homeworld",
            Category::PopType => "pop type",
            Category::Trait => "trait",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Name of the fanatic form of an ethic
pub fn fanatic(ethic: &str) -> String {
    format!("{}{}", FANATIC_PREFIX, ethic)
}

/// Strip a fanatic prefix, returning the base ethic name
pub fn base_ethic(name: &str) -> &str {
    name.strip_prefix(FANATIC_PREFIX).unwrap_or(name)
}
