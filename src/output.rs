//! Generation output and serialization

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::empire::{describe, Empire};

/// A generated batch together with run statistics
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationOutput {
    /// Seed the batch was generated from, if it was seeded
    pub seed: Option<u64>,
    pub empires: Vec<Empire>,
    pub statistics: GenerationStats,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationStats {
    pub empires: u32,
    pub gestalt_empires: u32,
    pub sub_species: u32,
    pub generation_time_ms: u64,
}

impl GenerationOutput {
    pub fn new(empires: Vec<Empire>, seed: Option<u64>, elapsed: Duration) -> Self {
        let gestalt_empires = empires.iter().filter(|e| e.is_gestalt()).count() as u32;
        let sub_species = empires.iter().filter(|e| e.sub_species.is_some()).count() as u32;

        Self {
            seed,
            statistics: GenerationStats {
                empires: empires.len() as u32,
                gestalt_empires,
                sub_species,
                generation_time_ms: elapsed.as_millis() as u64,
            },
            empires,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    /// Every empire described, separated by blank lines
    pub fn to_text(&self) -> String {
        self.empires
            .iter()
            .enumerate()
            .map(|(i, empire)| format!("Empire {}\n{}", i + 1, describe(empire)))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn summary(&self) -> String {
        format!(
            "Generated {} empires in {}ms\n{} gestalt, {} with a sub-species",
            self.statistics.empires,
            self.statistics.generation_time_ms,
            self.statistics.gestalt_empires,
            self.statistics.sub_species,
        )
    }
}
