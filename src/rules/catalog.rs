//! Catalog entry definitions
//!
//! Catalogs are read-only after load. Entry order only matters for which
//! index a random source lands on; probabilities come from eligibility and
//! weights alone.

use serde::{Deserialize, Serialize};

use crate::rules::condition::{Condition, EmpireRule, Rule, SpeciesRule};

/// Common view over every kind of catalog entry
pub trait CatalogEntry {
    type Condition: Condition;

    fn name(&self) -> &str;

    fn allowed(&self) -> &Rule<Self::Condition>;

    /// Relative draw weight among eligible entries
    fn weight(&self) -> u32 {
        1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityEntry {
    pub name: String,
    #[serde(default)]
    pub allowed: EmpireRule,
    /// Gestalt authorities can't take traits flagged `non_gestalt`
    #[serde(default)]
    pub gestalt: bool,
    /// Forces the main species' pop type, overriding origin and civics
    #[serde(default)]
    pub pop_type: Option<String>,
    #[serde(default)]
    pub trait_points: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EthicEntry {
    pub name: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
    #[serde(default)]
    pub allowed: EmpireRule,
}

fn default_weight() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivicEntry {
    pub name: String,
    #[serde(default)]
    pub allowed: EmpireRule,
    /// Informational only
    #[serde(default)]
    pub genocidal: bool,
    /// Trait every species of the empire starts with
    #[serde(default)]
    pub species_trait: Option<String>,
    /// Restricts the pop types a species may be drawn from
    #[serde(default)]
    pub pop_types: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginEntry {
    pub name: String,
    #[serde(default)]
    pub allowed: EmpireRule,
    #[serde(default)]
    pub pop_type: Option<String>,
    /// Trait the main species starts with
    #[serde(default)]
    pub founder_trait: Option<String>,
    #[serde(default)]
    pub sub_species: bool,
    #[serde(default)]
    pub sub_species_trait: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeworldEntry {
    pub name: String,
    #[serde(default)]
    pub allowed: EmpireRule,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitEntry {
    pub name: String,
    pub cost: i32,
    #[serde(default)]
    pub allowed: SpeciesRule,
    #[serde(default)]
    pub non_gestalt: bool,
}

macro_rules! empire_entry {
    ($ty:ty) => {
        impl CatalogEntry for $ty {
            type Condition = crate::rules::condition::EmpireCondition;

            fn name(&self) -> &str {
                &self.name
            }

            fn allowed(&self) -> &EmpireRule {
                &self.allowed
            }
        }
    };
}

empire_entry!(AuthorityEntry);
empire_entry!(CivicEntry);
empire_entry!(OriginEntry);
empire_entry!(HomeworldEntry);

impl CatalogEntry for EthicEntry {
    type Condition = crate::rules::condition::EmpireCondition;

    fn name(&self) -> &str {
        &self.name
    }

    fn allowed(&self) -> &EmpireRule {
        &self.allowed
    }

    fn weight(&self) -> u32 {
        self.weight
    }
}

impl CatalogEntry for TraitEntry {
    type Condition = crate::rules::condition::SpeciesCondition;

    fn name(&self) -> &str {
        &self.name
    }

    fn allowed(&self) -> &SpeciesRule {
        &self.allowed
    }
}

/// Every catalog the generator draws from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalogs {
    /// Standard pop types a species is drawn from when nothing forces one
    pub pop_types: Vec<String>,
    pub authorities: Vec<AuthorityEntry>,
    pub ethics: Vec<EthicEntry>,
    pub civics: Vec<CivicEntry>,
    pub origins: Vec<OriginEntry>,
    pub homeworlds: Vec<HomeworldEntry>,
    pub traits: Vec<TraitEntry>,
}

fn find<'a, E: CatalogEntry>(entries: &'a [E], name: &str) -> Option<&'a E> {
    entries.iter().find(|e| e.name() == name)
}

impl Catalogs {
    pub fn authority(&self, name: &str) -> Option<&AuthorityEntry> {
        find(&self.authorities, name)
    }

    pub fn ethic(&self, name: &str) -> Option<&EthicEntry> {
        find(&self.ethics, name)
    }

    pub fn civic(&self, name: &str) -> Option<&CivicEntry> {
        find(&self.civics, name)
    }

    pub fn origin(&self, name: &str) -> Option<&OriginEntry> {
        find(&self.origins, name)
    }

    pub fn homeworld(&self, name: &str) -> Option<&HomeworldEntry> {
        find(&self.homeworlds, name)
    }

    pub fn trait_entry(&self, name: &str) -> Option<&TraitEntry> {
        find(&self.traits, name)
    }
}
