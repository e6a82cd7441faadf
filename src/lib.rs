//! Empire Forge - Constrained Random Empire Generator
//!
//! Builds random but rule-consistent empires: ethics, an authority, two
//! civics, an origin, a homeworld and species whose trait costs balance
//! their budget exactly. Every choice is drawn from a data catalog, filtered
//! by rules evaluated against the empire drafted so far.

pub mod core;
pub mod empire;
pub mod generation;
pub mod output;
pub mod rules;

pub use crate::core::{Category, ForgeError, GeneratorConfig, Result};
pub use crate::empire::{describe, Empire, Species, SpeciesTrait};
pub use crate::generation::{generate, EmpireGenerator, RandomSource, ScriptedSource};
pub use crate::output::GenerationOutput;
pub use crate::rules::Catalogs;
