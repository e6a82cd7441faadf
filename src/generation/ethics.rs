//! Two-phase ethics draft
//!
//! A fanatic coin is flipped before the first draw. The first draw then
//! decides the branch:
//! - Gestalt Consciousness ends the draft with that single ethic
//! - heads commits the fanatic form plus one more ethic
//! - tails commits the plain ethic plus two more
//!
//! Every draw re-filters the catalog, dropping any ethic whose base or
//! fanatic form is already committed.

use crate::core::error::Result;
use crate::core::types::{fanatic, Category};
use crate::empire::{EmpireDraft, GESTALT_CONSCIOUSNESS};
use crate::generation::random::{draw_entry, RandomSource};
use crate::rules::catalog::EthicEntry;

/// Which branch the draft ended in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EthicsBranch {
    /// Single Gestalt Consciousness ethic
    Gestalt,
    /// One fanatic ethic and one regular ethic
    Fanatic,
    /// Three regular ethics
    Broad,
}

impl EthicsBranch {
    /// Number of ethics the branch commits
    pub fn ethic_count(&self) -> usize {
        match self {
            EthicsBranch::Gestalt => 1,
            EthicsBranch::Fanatic => 2,
            EthicsBranch::Broad => 3,
        }
    }
}

/// Ethics that may be drawn next
pub fn eligible_ethics<'a>(ethics: &'a [EthicEntry], draft: &EmpireDraft) -> Vec<&'a EthicEntry> {
    ethics
        .iter()
        .filter(|ethic| ethic.allowed.allows(draft) && !draft.has_ethic_or_fanatic(&ethic.name))
        .collect()
}

fn draw_ethic<'a, R: RandomSource + ?Sized>(
    ethics: &'a [EthicEntry],
    draft: &EmpireDraft,
    rng: &mut R,
) -> Result<&'a EthicEntry> {
    let pool = eligible_ethics(ethics, draft);
    tracing::trace!("{} ethics eligible", pool.len());
    draw_entry(rng, &pool, Category::Ethic)
}

/// Draft the ethics of an empire into `draft`
pub fn draft_ethics<R: RandomSource + ?Sized>(
    ethics: &[EthicEntry],
    draft: &mut EmpireDraft,
    rng: &mut R,
) -> Result<EthicsBranch> {
    let fanatic_roll = rng.coin();
    let first = draw_ethic(ethics, draft, rng)?;

    let branch = if first.name == GESTALT_CONSCIOUSNESS {
        draft.ethics = vec![first.name.clone()];
        EthicsBranch::Gestalt
    } else if fanatic_roll {
        draft.ethics.push(fanatic(&first.name));
        let next = draw_ethic(ethics, draft, rng)?;
        draft.ethics.push(next.name.clone());
        EthicsBranch::Fanatic
    } else {
        draft.ethics.push(first.name.clone());
        for _ in 0..2 {
            let next = draw_ethic(ethics, draft, rng)?;
            draft.ethics.push(next.name.clone());
        }
        EthicsBranch::Broad
    };

    tracing::debug!(ethics = ?draft.ethics, ?branch, "Drafted ethics");
    Ok(branch)
}
