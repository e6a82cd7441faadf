//! Sequential constrained sampling of empire components
//!
//! Each category is drawn from the entries whose rule holds against the
//! draft as it stands, so every later draw sees every earlier commitment.

use crate::core::error::Result;
use crate::core::types::Category;
use crate::empire::EmpireDraft;
use crate::generation::ethics::draft_ethics;
use crate::generation::random::{draw_entry, RandomSource};
use crate::rules::catalog::{CatalogEntry, Catalogs};
use crate::rules::condition::{Condition, EmpireCondition};

/// Number of civics every empire takes
pub const CIVIC_COUNT: usize = 2;

/// Entries whose rule holds for `subject`, in catalog order
pub fn eligible<'a, E: CatalogEntry>(
    entries: &'a [E],
    subject: &<E::Condition as Condition>::Subject,
) -> Vec<&'a E> {
    entries
        .iter()
        .filter(|entry| entry.allowed().allows(subject))
        .collect()
}

fn commit<E, R>(entries: &[E], draft: &EmpireDraft, category: Category, rng: &mut R) -> Result<String>
where
    E: CatalogEntry<Condition = EmpireCondition>,
    R: RandomSource + ?Sized,
{
    let pool = eligible(entries, draft);
    let entry = draw_entry(rng, &pool, category)?;
    tracing::trace!("Drew {} '{}' from {} eligible", category, entry.name(), pool.len());
    Ok(entry.name().to_string())
}

pub fn draw_authority<R: RandomSource + ?Sized>(
    catalogs: &Catalogs,
    draft: &mut EmpireDraft,
    rng: &mut R,
) -> Result<()> {
    draft.authority = Some(commit(&catalogs.authorities, draft, Category::Authority, rng)?);
    Ok(())
}

/// Draw one civic not already taken
pub fn draw_civic<R: RandomSource + ?Sized>(
    catalogs: &Catalogs,
    draft: &mut EmpireDraft,
    rng: &mut R,
) -> Result<()> {
    let pool: Vec<_> = eligible(&catalogs.civics, draft)
        .into_iter()
        .filter(|civic| !draft.has_civic(&civic.name))
        .collect();
    let civic = draw_entry(rng, &pool, Category::Civic)?;
    tracing::trace!("Drew civic '{}' from {} eligible", civic.name, pool.len());
    draft.civics.push(civic.name.clone());
    Ok(())
}

pub fn draw_origin<R: RandomSource + ?Sized>(
    catalogs: &Catalogs,
    draft: &mut EmpireDraft,
    rng: &mut R,
) -> Result<()> {
    draft.origin = Some(commit(&catalogs.origins, draft, Category::Origin, rng)?);
    Ok(())
}

pub fn draw_homeworld<R: RandomSource + ?Sized>(
    catalogs: &Catalogs,
    draft: &mut EmpireDraft,
    rng: &mut R,
) -> Result<()> {
    draft.homeworld = Some(commit(&catalogs.homeworlds, draft, Category::Homeworld, rng)?);
    Ok(())
}

/// Draft every non-species component in order: ethics, authority, civics,
/// origin, homeworld
pub fn draft_empire<R: RandomSource + ?Sized>(catalogs: &Catalogs, rng: &mut R) -> Result<EmpireDraft> {
    let mut draft = EmpireDraft::new();

    draft_ethics(&catalogs.ethics, &mut draft, rng)?;
    draw_authority(catalogs, &mut draft, rng)?;
    for _ in 0..CIVIC_COUNT {
        draw_civic(catalogs, &mut draft, rng)?;
    }
    draw_origin(catalogs, &mut draft, rng)?;
    draw_homeworld(catalogs, &mut draft, rng)?;

    tracing::debug!(
        authority = ?draft.authority,
        civics = ?draft.civics,
        origin = ?draft.origin,
        homeworld = ?draft.homeworld,
        "Drafted empire"
    );
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ForgeError;
    use crate::empire::GESTALT_CONSCIOUSNESS;
    use crate::generation::random::ScriptedSource;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn catalogs() -> Catalogs {
        Catalogs::standard().unwrap()
    }

    #[test]
    fn test_first_pick_draft() {
        let draft = draft_empire(&catalogs(), &mut ScriptedSource::first()).unwrap();
        assert_eq!(draft.ethics, vec!["Authoritarian", "Spiritualist", "Militarist"]);
        assert_eq!(draft.authority.as_deref(), Some("Oligarchy"));
        assert_eq!(draft.civics, vec!["Anglers", "Corvee System"]);
        assert_eq!(draft.origin.as_deref(), Some("Prosperous Unification"));
        assert_eq!(draft.homeworld.as_deref(), Some("Desert"));
    }

    #[test]
    fn test_gestalt_draft_gets_gestalt_authority() {
        let catalogs = catalogs();
        for index in 0..2 {
            let mut source = ScriptedSource::new([0, 8, index]);
            let draft = draft_empire(&catalogs, &mut source).unwrap();
            assert_eq!(draft.ethics, vec![GESTALT_CONSCIOUSNESS]);
            let authority = draft.authority.unwrap();
            assert!(
                authority == "Hive Mind" || authority == "Machine Intelligence",
                "got {}",
                authority
            );
        }
    }

    #[test]
    fn test_civics_never_repeat() {
        let catalogs = catalogs();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..300 {
            let draft = draft_empire(&catalogs, &mut rng).unwrap();
            assert_eq!(draft.civics.len(), CIVIC_COUNT);
            assert_ne!(draft.civics[0], draft.civics[1]);
        }
    }

    #[test]
    fn test_every_draw_is_eligible_when_made() {
        let catalogs = catalogs();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..300 {
            let draft = draft_empire(&catalogs, &mut rng).unwrap();

            let mut replay = EmpireDraft {
                ethics: draft.ethics.clone(),
                ..EmpireDraft::default()
            };
            let authority = catalogs.authority(draft.authority.as_deref().unwrap()).unwrap();
            assert!(authority.allowed.allows(&replay));
            replay.authority = draft.authority.clone();

            for name in &draft.civics {
                assert!(catalogs.civic(name).unwrap().allowed.allows(&replay));
                replay.civics.push(name.clone());
            }
            let origin = catalogs.origin(draft.origin.as_deref().unwrap()).unwrap();
            assert!(origin.allowed.allows(&replay));
        }
    }

    #[test]
    fn test_exhausted_category_reports_it() {
        let mut catalogs = catalogs();
        catalogs.civics.retain(|c| c.name == "Cutthroat Politics");
        let result = draft_empire(&catalogs, &mut ScriptedSource::first());
        assert!(matches!(result, Err(ForgeError::EmptyEligibleSet(Category::Civic))));
    }

    #[test]
    fn test_eligible_keeps_catalog_order() {
        let catalogs = catalogs();
        let draft = EmpireDraft::new();
        let names: Vec<&str> = eligible(&catalogs.homeworlds, &draft)
            .iter()
            .map(|h| h.name.as_str())
            .collect();
        assert_eq!(names.first(), Some(&"Desert"));
        assert_eq!(names.len(), 9);
    }
}
