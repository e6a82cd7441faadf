//! Human-readable empire summaries

use std::fmt;

use super::{Empire, Species};

/// Render an empire as a multi-line text block
pub fn describe(empire: &Empire) -> String {
    empire.to_string()
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pop_type)?;
        if !self.traits.is_empty() {
            let traits: Vec<&str> = self.trait_names().collect();
            write!(f, " [{}]", traits.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for Empire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Authority: {}", self.authority)?;
        writeln!(f, "Ethics: {}", self.ethics.join(", "))?;
        writeln!(f, "Civics: {}", self.civics.join(", "))?;
        writeln!(f, "Origin: {}", self.origin)?;
        writeln!(f, "Homeworld: {}", self.homeworld)?;
        write!(f, "Main Species: {}", self.main_species)?;
        if let Some(sub) = &self.sub_species {
            write!(f, "\nSub Species: {}", sub)?;
        }
        Ok(())
    }
}
