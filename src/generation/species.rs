//! Species classification and trait allocation
//!
//! Classification turns the finished draft into species templates: a pop
//! type, a trait budget and the traits the authority, civics and origin
//! make mandatory. Allocation then tops each template up with random
//! traits until the budget is spent exactly.

use crate::core::config::GeneratorConfig;
use crate::core::error::{ForgeError, Result};
use crate::core::types::Category;
use crate::empire::{EmpireDraft, Species, SpeciesTrait};
use crate::generation::random::{pick_weighted, RandomSource};
use crate::rules::catalog::{AuthorityEntry, CatalogEntry, Catalogs, CivicEntry, OriginEntry, TraitEntry};

/// Everything about the draft that shapes its species
#[derive(Debug, Clone)]
pub struct SpeciesContext<'a> {
    pub authority: Option<&'a AuthorityEntry>,
    pub civics: Vec<&'a CivicEntry>,
    pub origin: Option<&'a OriginEntry>,
    /// Gestalt empires can't take `non_gestalt` traits
    pub gestalt: bool,
    /// Pop types a species may be drawn from
    pub pop_types: &'a [String],
}

impl<'a> SpeciesContext<'a> {
    pub fn resolve(catalogs: &'a Catalogs, draft: &EmpireDraft) -> Self {
        let authority = draft.authority.as_deref().and_then(|name| catalogs.authority(name));
        let civics: Vec<&CivicEntry> = draft
            .civics
            .iter()
            .filter_map(|name| catalogs.civic(name))
            .collect();
        let origin = draft.origin.as_deref().and_then(|name| catalogs.origin(name));

        // The last civic with a restriction wins
        let pop_types = civics
            .iter()
            .rev()
            .copied()
            .find_map(|civic| civic.pop_types.as_deref())
            .unwrap_or(catalogs.pop_types.as_slice());

        Self {
            authority,
            civics,
            origin,
            gestalt: authority.is_some_and(|a| a.gestalt),
            pop_types,
        }
    }

    /// Pop type forced by the authority, overriding everything else
    fn forced_pop_type(&self) -> Option<&'a str> {
        self.authority.and_then(|a| a.pop_type.as_deref())
    }

    fn civic_traits(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.civics
            .iter()
            .copied()
            .filter_map(|civic| civic.species_trait.as_deref())
    }

    pub fn has_sub_species(&self) -> bool {
        self.origin.is_some_and(|o| o.sub_species)
    }
}

fn mandatory_trait(catalogs: &Catalogs, name: &str) -> Result<SpeciesTrait> {
    catalogs
        .trait_entry(name)
        .map(|entry| SpeciesTrait::new(&entry.name, entry.cost))
        .ok_or_else(|| ForgeError::InvalidCatalog(vec![format!("unknown trait '{}'", name)]))
}

fn add_mandatory(species: &mut Species, catalogs: &Catalogs, name: &str) -> Result<()> {
    if !species.has_trait(name) {
        species.traits.push(mandatory_trait(catalogs, name)?);
    }
    Ok(())
}

fn draw_pop_type<R: RandomSource + ?Sized>(pop_types: &[String], rng: &mut R) -> Result<String> {
    if pop_types.is_empty() {
        return Err(ForgeError::EmptyEligibleSet(Category::PopType));
    }
    Ok(pop_types[rng.pick_index(pop_types.len())].clone())
}

/// Template for the main species, drawing its pop type if nothing forces one
pub fn main_template<R: RandomSource + ?Sized>(
    catalogs: &Catalogs,
    context: &SpeciesContext<'_>,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Species> {
    let points = context
        .authority
        .and_then(|a| a.trait_points)
        .unwrap_or(config.default_trait_points);

    if let Some(pop_type) = context.forced_pop_type() {
        return Ok(Species::new(pop_type, points));
    }

    let pop_type = match context.origin.and_then(|o| o.pop_type.as_deref()) {
        Some(pop_type) => pop_type.to_string(),
        None => draw_pop_type(context.pop_types, rng)?,
    };

    let mut species = Species::new(pop_type, points);
    for name in context.civic_traits() {
        add_mandatory(&mut species, catalogs, name)?;
    }
    if let Some(name) = context.origin.and_then(|o| o.founder_trait.as_deref()) {
        add_mandatory(&mut species, catalogs, name)?;
    }
    Ok(species)
}

/// Template for the secondary species an origin brings along
pub fn sub_template<R: RandomSource + ?Sized>(
    catalogs: &Catalogs,
    context: &SpeciesContext<'_>,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Species> {
    let pop_type = draw_pop_type(context.pop_types, rng)?;
    let mut species = Species::new(pop_type, config.sub_species_trait_points);
    for name in context.civic_traits() {
        add_mandatory(&mut species, catalogs, name)?;
    }
    if let Some(name) = context.origin.and_then(|o| o.sub_species_trait.as_deref()) {
        add_mandatory(&mut species, catalogs, name)?;
    }
    Ok(species)
}

/// Traits that may be added to `species` next
pub fn eligible_traits<'a>(traits: &'a [TraitEntry], species: &Species, gestalt: bool) -> Vec<&'a TraitEntry> {
    traits
        .iter()
        .filter(|t| !(gestalt && t.non_gestalt))
        .filter(|t| !species.has_trait(&t.name))
        .filter(|t| t.allowed.allows(species))
        .collect()
}

/// Fill a template with random traits until its budget balances
///
/// Each attempt restarts from the template, draws a trait count, then draws
/// that many eligible traits one at a time. An attempt is kept only if the
/// species ends up balanced. Running out of eligible traits before the count
/// is reached rejects the attempt like an unbalanced one.
pub fn allocate_traits<R: RandomSource + ?Sized>(
    template: &Species,
    traits: &[TraitEntry],
    gestalt: bool,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Species> {
    let counts = &config.trait_count_options;
    if counts.is_empty() {
        return Err(ForgeError::InvalidConfig(
            "trait_count_options must not be empty".to_string(),
        ));
    }

    'attempts: for attempt in 1..=config.max_trait_attempts {
        let mut species = template.clone();
        let count = counts[rng.pick_index(counts.len())];

        for _ in 0..count {
            let pool = eligible_traits(traits, &species, gestalt);
            let Some(picked) = pick_weighted(rng, &pool, |t: &TraitEntry| t.weight()) else {
                tracing::trace!(attempt, drawn = species.traits.len(), "Trait pool ran dry, retrying");
                continue 'attempts;
            };
            species.traits.push(SpeciesTrait::new(&picked.name, picked.cost));
        }

        if species.is_balanced() {
            tracing::debug!(
                pop_type = %species.pop_type,
                attempt,
                "Balanced {} traits",
                species.traits.len()
            );
            return Ok(species);
        }
        tracing::trace!(attempt, remaining = species.remaining_points(), "Unbalanced, retrying");
    }

    tracing::warn!(
        "Trait allocation for {} gave up after {} attempts",
        template.pop_type,
        config.max_trait_attempts
    );
    Err(ForgeError::DidNotConverge {
        pop_type: template.pop_type.clone(),
        attempts: config.max_trait_attempts,
    })
}

/// Classify and allocate every species of a drafted empire
///
/// Random draws happen in order: main pop type, main traits, sub pop type,
/// sub traits.
pub fn generate_species<R: RandomSource + ?Sized>(
    catalogs: &Catalogs,
    config: &GeneratorConfig,
    draft: &EmpireDraft,
    rng: &mut R,
) -> Result<(Species, Option<Species>)> {
    let context = SpeciesContext::resolve(catalogs, draft);

    let template = main_template(catalogs, &context, config, rng)?;
    let main = allocate_traits(&template, &catalogs.traits, context.gestalt, config, rng)?;

    let sub = if context.has_sub_species() {
        let template = sub_template(catalogs, &context, config, rng)?;
        Some(allocate_traits(&template, &catalogs.traits, context.gestalt, config, rng)?)
    } else {
        None
    };

    Ok((main, sub))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::random::ScriptedSource;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn catalogs() -> Catalogs {
        Catalogs::standard().unwrap()
    }

    fn draft(authority: &str, civics: &[&str], origin: &str) -> EmpireDraft {
        EmpireDraft {
            authority: Some(authority.to_string()),
            ethics: vec!["Militarist".to_string()],
            civics: civics.iter().map(|c| c.to_string()).collect(),
            origin: Some(origin.to_string()),
            homeworld: Some("Arid".to_string()),
        }
    }

    fn quick_config() -> GeneratorConfig {
        GeneratorConfig {
            max_trait_attempts: 50,
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_machine_authority_overrides_everything() {
        let catalogs = catalogs();
        let draft = draft("Machine Intelligence", &["Rockbreakers"], "Ocean Paradise");
        let context = SpeciesContext::resolve(&catalogs, &draft);
        let species = main_template(&catalogs, &context, &quick_config(), &mut ScriptedSource::first()).unwrap();
        assert_eq!(species.pop_type, "Machine");
        assert_eq!(species.trait_points, 1);
        assert!(species.traits.is_empty());
        assert!(context.gestalt);
    }

    #[test]
    fn test_origin_pop_type_and_founder_trait() {
        let catalogs = catalogs();
        let draft = draft("Imperial", &["Cutthroat Politics"], "Calamitous Birth");
        let context = SpeciesContext::resolve(&catalogs, &draft);
        let species = main_template(&catalogs, &context, &quick_config(), &mut ScriptedSource::first()).unwrap();
        assert_eq!(species.pop_type, "Lithoid");
        assert_eq!(species.trait_names().collect::<Vec<_>>(), vec!["Lithoid"]);
        assert_eq!(species.trait_points, 2);
    }

    #[test]
    fn test_shared_mandatory_trait_is_added_once() {
        let catalogs = catalogs();
        let draft = draft("Imperial", &["Anglers"], "Ocean Paradise");
        let context = SpeciesContext::resolve(&catalogs, &draft);
        let species = main_template(&catalogs, &context, &quick_config(), &mut ScriptedSource::first()).unwrap();
        assert_eq!(species.pop_type, "Aquatic");
        assert_eq!(species.trait_names().collect::<Vec<_>>(), vec!["Aquatic"]);
    }

    #[test]
    fn test_civic_restricts_pop_types() {
        let catalogs = catalogs();
        let draft = draft("Imperial", &["Idyllic Bloom"], "Prosperous Unification");
        let context = SpeciesContext::resolve(&catalogs, &draft);
        assert_eq!(context.pop_types, ["Fungoid".to_string(), "Plantoid".to_string()]);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..20 {
            let species = main_template(&catalogs, &context, &quick_config(), &mut rng).unwrap();
            assert!(species.pop_type == "Fungoid" || species.pop_type == "Plantoid");
        }
    }

    #[test]
    fn test_sub_species_template() {
        let catalogs = catalogs();
        let draft = draft("Dictatorial", &["Anglers"], "Syncretic Evolution");
        let context = SpeciesContext::resolve(&catalogs, &draft);
        assert!(context.has_sub_species());

        let species = sub_template(&catalogs, &context, &quick_config(), &mut ScriptedSource::new([1])).unwrap();
        assert_eq!(species.pop_type, "Mammalian");
        assert_eq!(species.trait_points, 2);
        assert_eq!(species.trait_names().collect::<Vec<_>>(), vec!["Aquatic", "Serviles"]);
    }

    #[test]
    fn test_gestalt_excludes_non_gestalt_traits() {
        let catalogs = catalogs();
        let species = Species::new("Avian", 2);
        let names: Vec<&str> = eligible_traits(&catalogs.traits, &species, true)
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        for excluded in ["Conformists", "Deviants", "Thrifty", "Decadent"] {
            assert!(!names.contains(&excluded));
        }
        assert!(names.contains(&"Strong"));
    }

    #[test]
    fn test_eligible_traits_respect_conflicts() {
        let catalogs = catalogs();
        let mut species = Species::new("Avian", 2);
        species.traits.push(SpeciesTrait::new("Strong", 1));
        let names: Vec<&str> = eligible_traits(&catalogs.traits, &species, false)
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert!(!names.contains(&"Strong"));
        assert!(!names.contains(&"Very Strong"));
        assert!(!names.contains(&"Weak"));
        assert!(!names.contains(&"Lithoid"));
        assert!(!names.contains(&"Durable"));
    }

    #[test]
    fn test_allocation_that_never_balances() {
        let catalogs = catalogs();
        let mut template = Species::new("Aquatic", 2);
        template.traits.push(SpeciesTrait::new("Aquatic", 1));
        let result = allocate_traits(
            &template,
            &catalogs.traits,
            false,
            &quick_config(),
            &mut ScriptedSource::first(),
        );
        match result {
            Err(ForgeError::DidNotConverge { pop_type, attempts }) => {
                assert_eq!(pop_type, "Aquatic");
                assert_eq!(attempts, 50);
            }
            other => panic!("expected DidNotConverge, got {:?}", other),
        }
    }

    #[test]
    fn test_scripted_allocation_balances_first_try() {
        let catalogs = catalogs();
        let template = Species::new("Mammalian", 2);
        // one trait, the first eligible: Adaptive for 2
        let species = allocate_traits(
            &template,
            &catalogs.traits,
            false,
            &quick_config(),
            &mut ScriptedSource::new([0, 0]),
        )
        .unwrap();
        assert_eq!(species.traits, vec![SpeciesTrait::new("Adaptive", 2)]);
    }

    #[test]
    fn test_empty_trait_catalog_never_converges() {
        let template = Species::new("Mammalian", 2);
        let result = allocate_traits(&template, &[], false, &quick_config(), &mut ScriptedSource::first());
        assert!(matches!(result, Err(ForgeError::DidNotConverge { attempts: 50, .. })));
    }

    #[test]
    fn test_dry_pool_retries_the_attempt() {
        let traits: Vec<TraitEntry> = ["Strong", "Talented"]
            .iter()
            .map(|name| TraitEntry {
                name: name.to_string(),
                cost: 1,
                allowed: Default::default(),
                non_gestalt: false,
            })
            .collect();
        let config = GeneratorConfig {
            max_trait_attempts: 5,
            trait_count_options: vec![3, 2],
            ..GeneratorConfig::default()
        };
        // three traits wanted but only two exist, then two traits that balance
        let mut source = ScriptedSource::new([0, 0, 0, 1, 0, 0]);
        let species = allocate_traits(&Species::new("Avian", 2), &traits, false, &config, &mut source).unwrap();
        assert_eq!(species.trait_names().collect::<Vec<_>>(), vec!["Strong", "Talented"]);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_seeded_allocations_balance_exactly() {
        let catalogs = catalogs();
        let config = GeneratorConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for pop_type in ["Avian", "Lithoid", "Plantoid"] {
            let species = allocate_traits(&Species::new(pop_type, 2), &catalogs.traits, false, &config, &mut rng).unwrap();
            assert_eq!(species.remaining_points(), 0);
            for t in &species.traits {
                let entry = catalogs.trait_entry(&t.name).unwrap();
                assert_eq!(entry.cost, t.cost);
            }
        }
    }

    #[test]
    fn test_machine_species_balances() {
        let catalogs = catalogs();
        let draft = draft("Machine Intelligence", &["Rockbreakers", "Constructobot"], "Prosperous Unification");
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let (main, sub) = generate_species(&catalogs, &GeneratorConfig::default(), &draft, &mut rng).unwrap();
        assert_eq!(main.pop_type, "Machine");
        assert_eq!(main.remaining_points(), 0);
        assert!(sub.is_none());
    }

    #[test]
    fn test_necrophage_brings_sub_species() {
        let catalogs = catalogs();
        let draft = draft("Imperial", &["Cutthroat Politics", "Efficient Bureaucracy"], "Necrophage");
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let (main, sub) = generate_species(&catalogs, &GeneratorConfig::default(), &draft, &mut rng).unwrap();
        assert!(main.has_trait("Necrophage"));
        let sub = sub.unwrap();
        assert_eq!(sub.remaining_points(), 0);
        assert!(!sub.has_trait("Necrophage"));
    }
}
