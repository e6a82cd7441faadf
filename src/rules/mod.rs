//! Rule catalogs loaded from TOML and the conditions that gate them

pub mod catalog;
pub mod condition;
mod loader;
pub mod validate;

pub use catalog::{
    AuthorityEntry, CatalogEntry, Catalogs, CivicEntry, EthicEntry, HomeworldEntry, OriginEntry,
    TraitEntry,
};
pub use condition::{Condition, EmpireCondition, EmpireRule, Rule, SpeciesCondition, SpeciesRule};
pub use loader::load_catalogs;
pub use validate::validate;
