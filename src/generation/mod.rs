//! Empire generation: constrained sampling, ethics draft, species allocation

pub mod ethics;
pub mod generator;
pub mod random;
pub mod sampler;
pub mod species;

pub use ethics::{draft_ethics, EthicsBranch};
pub use generator::{generate, EmpireGenerator};
pub use random::{RandomSource, ScriptedSource};
pub use sampler::draft_empire;
pub use species::{allocate_traits, generate_species};
