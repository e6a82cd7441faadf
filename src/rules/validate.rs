//! Load-time consistency checks for catalogs
//!
//! Every name a rule or species field mentions must exist in the catalog it
//! refers to. Problems are collected rather than failing on the first one so
//! a broken data file can be fixed in a single pass.

use ahash::AHashSet;

use crate::core::error::{ForgeError, Result};
use crate::core::types::{base_ethic, Category};
use crate::rules::catalog::{CatalogEntry, Catalogs};

/// Known names per category
struct NameIndex<'a> {
    authorities: AHashSet<&'a str>,
    ethics: AHashSet<&'a str>,
    civics: AHashSet<&'a str>,
    origins: AHashSet<&'a str>,
    homeworlds: AHashSet<&'a str>,
    pop_types: AHashSet<&'a str>,
    traits: AHashSet<&'a str>,
}

impl<'a> NameIndex<'a> {
    fn build(catalogs: &'a Catalogs) -> Self {
        fn names<E: CatalogEntry>(entries: &[E]) -> AHashSet<&str> {
            entries.iter().map(|e| e.name()).collect()
        }

        let mut pop_types: AHashSet<&str> = catalogs.pop_types.iter().map(String::as_str).collect();
        pop_types.extend(catalogs.authorities.iter().filter_map(|a| a.pop_type.as_deref()));

        Self {
            authorities: names(&catalogs.authorities),
            ethics: names(&catalogs.ethics),
            civics: names(&catalogs.civics),
            origins: names(&catalogs.origins),
            homeworlds: names(&catalogs.homeworlds),
            pop_types,
            traits: names(&catalogs.traits),
        }
    }

    fn contains(&self, category: Category, name: &str) -> bool {
        match category {
            Category::Authority => self.authorities.contains(name),
            // Rules may name the fanatic form of any ethic
            Category::Ethic => self.ethics.contains(base_ethic(name)),
            Category::Civic => self.civics.contains(name),
            Category::Origin => self.origins.contains(name),
            Category::Homeworld => self.homeworlds.contains(name),
            Category::PopType => self.pop_types.contains(name),
            Category::Trait => self.traits.contains(name),
        }
    }
}

/// Validate a full set of catalogs
pub fn validate(catalogs: &Catalogs) -> Result<()> {
    let mut problems = Vec::new();

    if catalogs.pop_types.is_empty() {
        problems.push("pop_types is empty".to_string());
    }
    check_entries(&catalogs.authorities, Category::Authority, &mut problems);
    check_entries(&catalogs.ethics, Category::Ethic, &mut problems);
    check_entries(&catalogs.civics, Category::Civic, &mut problems);
    check_entries(&catalogs.origins, Category::Origin, &mut problems);
    check_entries(&catalogs.homeworlds, Category::Homeworld, &mut problems);
    check_entries(&catalogs.traits, Category::Trait, &mut problems);

    let mut seen = AHashSet::new();
    for pop_type in &catalogs.pop_types {
        if !seen.insert(pop_type.as_str()) {
            problems.push(format!("duplicate pop type '{}'", pop_type));
        }
    }

    for ethic in &catalogs.ethics {
        if ethic.weight == 0 {
            problems.push(format!("ethic '{}' has zero weight", ethic.name));
        }
    }

    let index = NameIndex::build(catalogs);

    check_references(&catalogs.authorities, Category::Authority, &index, &mut problems);
    check_references(&catalogs.ethics, Category::Ethic, &index, &mut problems);
    check_references(&catalogs.civics, Category::Civic, &index, &mut problems);
    check_references(&catalogs.origins, Category::Origin, &index, &mut problems);
    check_references(&catalogs.homeworlds, Category::Homeworld, &index, &mut problems);
    check_references(&catalogs.traits, Category::Trait, &index, &mut problems);

    for civic in &catalogs.civics {
        if civic.pop_types.as_ref().is_some_and(|types| types.is_empty()) {
            problems.push(format!("civic '{}' restricts pop_types to an empty list", civic.name));
        }
    }

    let mut check_field = |owner: &str, field: &str, category: Category, name: &str| {
        if !index.contains(category, name) {
            problems.push(format!("{} {} names unknown {} '{}'", owner, field, category, name));
        }
    };

    for civic in &catalogs.civics {
        if let Some(name) = &civic.species_trait {
            check_field(&civic.name, "species_trait", Category::Trait, name);
        }
        for pop_type in civic.pop_types.iter().flatten() {
            check_field(&civic.name, "pop_types", Category::PopType, pop_type);
        }
    }

    for origin in &catalogs.origins {
        if let Some(name) = &origin.pop_type {
            check_field(&origin.name, "pop_type", Category::PopType, name);
        }
        if let Some(name) = &origin.founder_trait {
            check_field(&origin.name, "founder_trait", Category::Trait, name);
        }
        if let Some(name) = &origin.sub_species_trait {
            check_field(&origin.name, "sub_species_trait", Category::Trait, name);
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        tracing::warn!("Catalog validation found {} problems", problems.len());
        Err(ForgeError::InvalidCatalog(problems))
    }
}

fn check_entries<E: CatalogEntry>(entries: &[E], category: Category, problems: &mut Vec<String>) {
    if entries.is_empty() {
        problems.push(format!("{} catalog is empty", category));
    }

    let mut seen = AHashSet::new();
    for entry in entries {
        if !seen.insert(entry.name()) {
            problems.push(format!("duplicate {} '{}'", category, entry.name()));
        }
    }
}

fn check_references<E: CatalogEntry>(
    entries: &[E],
    category: Category,
    index: &NameIndex<'_>,
    problems: &mut Vec<String>,
) {
    for entry in entries {
        for (referenced, name) in entry.allowed().references() {
            if !index.contains(referenced, name) {
                problems.push(format!(
                    "{} '{}' references unknown {} '{}'",
                    category,
                    entry.name(),
                    referenced,
                    name
                ));
            }
        }
    }
}
