//! Empire and species data model

mod describe;

use serde::{Deserialize, Serialize};

use crate::core::error::{ForgeError, Result};
use crate::core::types::{fanatic, Category};

pub use describe::describe;

/// A trait committed to a species, with the cost it was paid for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesTrait {
    pub name: String,
    pub cost: i32,
}

impl SpeciesTrait {
    pub fn new(name: impl Into<String>, cost: i32) -> Self {
        Self { name: name.into(), cost }
    }
}

/// The dominant lifeform of an empire (or a secondary one)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub pop_type: String,
    /// Budget the trait costs must use up exactly
    pub trait_points: i32,
    pub traits: Vec<SpeciesTrait>,
}

impl Species {
    pub fn new(pop_type: impl Into<String>, trait_points: i32) -> Self {
        Self {
            pop_type: pop_type.into(),
            trait_points,
            traits: Vec::new(),
        }
    }

    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.iter().any(|t| t.name == name)
    }

    /// Points left after paying for every trait
    pub fn remaining_points(&self) -> i32 {
        self.trait_points - self.traits.iter().map(|t| t.cost).sum::<i32>()
    }

    pub fn is_balanced(&self) -> bool {
        self.remaining_points() == 0
    }

    pub fn trait_names(&self) -> impl Iterator<Item = &str> {
        self.traits.iter().map(|t| t.name.as_str())
    }
}

/// Partial empire, the state every empire predicate is evaluated against
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmpireDraft {
    pub authority: Option<String>,
    pub ethics: Vec<String>,
    pub civics: Vec<String>,
    pub origin: Option<String>,
    pub homeworld: Option<String>,
}

impl EmpireDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_ethic(&self, name: &str) -> bool {
        self.ethics.iter().any(|e| e == name)
    }

    /// True if the ethic or its fanatic form is already committed
    pub fn has_ethic_or_fanatic(&self, name: &str) -> bool {
        let fanatic_name = fanatic(name);
        self.ethics.iter().any(|e| *e == name || *e == fanatic_name)
    }

    pub fn has_civic(&self, name: &str) -> bool {
        self.civics.iter().any(|c| c == name)
    }

    /// Seal the draft into a finished empire
    ///
    /// Fails while any of the drawn categories is still missing.
    pub fn finish(self, main_species: Species, sub_species: Option<Species>) -> Result<Empire> {
        let missing = ForgeError::IncompleteDraft;
        Ok(Empire {
            authority: self.authority.ok_or(missing(Category::Authority))?,
            ethics: self.ethics,
            civics: self.civics,
            origin: self.origin.ok_or(missing(Category::Origin))?,
            homeworld: self.homeworld.ok_or(missing(Category::Homeworld))?,
            main_species,
            sub_species,
        })
    }
}

/// A fully generated empire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empire {
    pub authority: String,
    pub ethics: Vec<String>,
    pub civics: Vec<String>,
    pub origin: String,
    pub homeworld: String,
    pub main_species: Species,
    pub sub_species: Option<Species>,
}

impl Empire {
    /// All species of this empire, main first
    pub fn species(&self) -> impl Iterator<Item = &Species> {
        std::iter::once(&self.main_species).chain(self.sub_species.iter())
    }

    pub fn is_gestalt(&self) -> bool {
        self.ethics.iter().any(|e| e == GESTALT_CONSCIOUSNESS)
    }
}

/// The ethic that replaces the regular ethic system for hive minds and machines
pub const GESTALT_CONSCIOUSNESS: &str = "Gestalt Consciousness";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_points() {
        let mut species = Species::new("Avian", 2);
        assert_eq!(species.remaining_points(), 2);
        species.traits.push(SpeciesTrait::new("Intelligent", 2));
        species.traits.push(SpeciesTrait::new("Weak", -1));
        species.traits.push(SpeciesTrait::new("Resilient", 1));
        assert_eq!(species.remaining_points(), 0);
        assert!(species.is_balanced());
    }

    #[test]
    fn test_fanatic_form_blocks_base_ethic() {
        let draft = EmpireDraft {
            ethics: vec!["Fanatic Pacifist".to_string()],
            ..EmpireDraft::default()
        };
        assert!(draft.has_ethic_or_fanatic("Pacifist"));
        assert!(!draft.has_ethic("Pacifist"));
        assert!(!draft.has_ethic_or_fanatic("Militarist"));
    }

    #[test]
    fn test_finish_requires_every_category() {
        let draft = EmpireDraft {
            authority: Some("Imperial".to_string()),
            ethics: vec!["Militarist".to_string()],
            civics: vec!["Feudal Society".to_string(), "Police State".to_string()],
            origin: Some("Doomsday".to_string()),
            homeworld: None,
        };
        let result = draft.clone().finish(Species::new("Avian", 2), None);
        assert!(matches!(result, Err(ForgeError::IncompleteDraft(Category::Homeworld))));

        let draft = EmpireDraft {
            homeworld: Some("Arid".to_string()),
            ..draft
        };
        let empire = draft.finish(Species::new("Avian", 2), None).unwrap();
        assert_eq!(empire.homeworld, "Arid");
        assert_eq!(empire.species().count(), 1);
        assert!(!empire.is_gestalt());
    }
}
