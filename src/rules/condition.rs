//! Eligibility conditions over partial empire and species state
//!
//! Conditions are plain data so catalogs can be loaded from TOML and checked
//! for dangling references. A [`Rule`] is a conjunction of conditions; the
//! empty rule always holds.

use serde::{Deserialize, Serialize};

use crate::core::types::Category;
use crate::empire::{EmpireDraft, Species};

/// A single predicate evaluated against some subject state
pub trait Condition {
    type Subject;

    /// Evaluate against the subject. Total and side-effect free.
    fn holds(&self, subject: &Self::Subject) -> bool;

    /// Names this condition refers to, with the catalog they belong to
    fn references(&self) -> Vec<(Category, &str)>;
}

/// Conditions on the empire built so far
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmpireCondition {
    AuthorityIs(Vec<String>),
    AuthorityIsNot(Vec<String>),
    EthicIncludes(Vec<String>),
    EthicExcludes(Vec<String>),
    CivicIncludes(Vec<String>),
    CivicExcludes(Vec<String>),
    /// Only before any ethic has been committed
    EthicsEmpty,
}

impl Condition for EmpireCondition {
    type Subject = EmpireDraft;

    fn holds(&self, draft: &EmpireDraft) -> bool {
        match self {
            EmpireCondition::AuthorityIs(names) => draft
                .authority
                .as_deref()
                .is_some_and(|authority| names.iter().any(|n| n == authority)),
            EmpireCondition::AuthorityIsNot(names) => !draft
                .authority
                .as_deref()
                .is_some_and(|authority| names.iter().any(|n| n == authority)),
            EmpireCondition::EthicIncludes(names) => names.iter().any(|n| draft.has_ethic(n)),
            EmpireCondition::EthicExcludes(names) => !names.iter().any(|n| draft.has_ethic(n)),
            EmpireCondition::CivicIncludes(names) => names.iter().any(|n| draft.has_civic(n)),
            EmpireCondition::CivicExcludes(names) => !names.iter().any(|n| draft.has_civic(n)),
            EmpireCondition::EthicsEmpty => draft.ethics.is_empty(),
        }
    }

    fn references(&self) -> Vec<(Category, &str)> {
        let (category, names) = match self {
            EmpireCondition::AuthorityIs(names) | EmpireCondition::AuthorityIsNot(names) => {
                (Category::Authority, names)
            }
            EmpireCondition::EthicIncludes(names) | EmpireCondition::EthicExcludes(names) => {
                (Category::Ethic, names)
            }
            EmpireCondition::CivicIncludes(names) | EmpireCondition::CivicExcludes(names) => {
                (Category::Civic, names)
            }
            EmpireCondition::EthicsEmpty => return Vec::new(),
        };
        names.iter().map(|n| (category, n.as_str())).collect()
    }
}

/// Conditions on the species being drafted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeciesCondition {
    TypeIs(Vec<String>),
    TypeIsNot(Vec<String>),
    TraitExcludes(Vec<String>),
    /// Never drawable; the trait can only be injected by an origin or civic
    Never,
}

impl Condition for SpeciesCondition {
    type Subject = Species;

    fn holds(&self, species: &Species) -> bool {
        match self {
            SpeciesCondition::TypeIs(types) => types.iter().any(|t| *t == species.pop_type),
            SpeciesCondition::TypeIsNot(types) => !types.iter().any(|t| *t == species.pop_type),
            SpeciesCondition::TraitExcludes(names) => !names.iter().any(|n| species.has_trait(n)),
            SpeciesCondition::Never => false,
        }
    }

    fn references(&self) -> Vec<(Category, &str)> {
        match self {
            SpeciesCondition::TypeIs(types) | SpeciesCondition::TypeIsNot(types) => {
                types.iter().map(|t| (Category::PopType, t.as_str())).collect()
            }
            SpeciesCondition::TraitExcludes(names) => {
                names.iter().map(|n| (Category::Trait, n.as_str())).collect()
            }
            SpeciesCondition::Never => Vec::new(),
        }
    }
}

/// Conjunction of conditions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rule<C>(pub Vec<C>);

impl<C> Default for Rule<C> {
    fn default() -> Self {
        Rule(Vec::new())
    }
}

impl<C: Condition> Rule<C> {
    pub fn always() -> Self {
        Self::default()
    }

    pub fn all(conditions: Vec<C>) -> Self {
        Rule(conditions)
    }

    pub fn allows(&self, subject: &C::Subject) -> bool {
        self.0.iter().all(|condition| condition.holds(subject))
    }

    pub fn references(&self) -> Vec<(Category, &str)> {
        self.0.iter().flat_map(|condition| condition.references()).collect()
    }
}

pub type EmpireRule = Rule<EmpireCondition>;
pub type SpeciesRule = Rule<SpeciesCondition>;
