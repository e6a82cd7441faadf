//! Randomness sources injected into the generator
//!
//! The generator never owns a global RNG. Callers hand in anything that
//! implements [`RandomSource`]: every `rand::Rng` does, and
//! [`ScriptedSource`] replays fixed draws for golden tests.

use std::collections::VecDeque;

use rand::Rng;

use crate::core::error::{ForgeError, Result};
use crate::core::types::Category;
use crate::rules::catalog::CatalogEntry;

/// Source of uniform random choices
pub trait RandomSource {
    /// Uniform index in `0..len`. Callers never pass `len == 0`.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Fair coin flip
    fn coin(&mut self) -> bool {
        self.pick_index(2) == 1
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn pick_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Replays a fixed list of indices, then keeps picking the first option
///
/// Indices past the end of a draw's range are clamped to the last option.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    draws: VecDeque<usize>,
}

impl ScriptedSource {
    pub fn new(draws: impl IntoIterator<Item = usize>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    /// A source that always picks the first eligible entry
    pub fn first() -> Self {
        Self::default()
    }

    /// Scripted draws not consumed yet
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedSource {
    fn pick_index(&mut self, len: usize) -> usize {
        self.draws
            .pop_front()
            .unwrap_or(0)
            .min(len.saturating_sub(1))
    }
}

/// Pick one item with probability proportional to its weight
///
/// Returns `None` when there is nothing to pick from.
pub fn pick_weighted<'a, T, R, W>(rng: &mut R, items: &[&'a T], weight: W) -> Option<&'a T>
where
    T: ?Sized,
    R: RandomSource + ?Sized,
    W: Fn(&T) -> u32,
{
    let total: usize = items.iter().map(|item| weight(*item) as usize).sum();
    if total == 0 {
        return None;
    }

    let mut roll = rng.pick_index(total);
    for item in items {
        let w = weight(*item) as usize;
        if roll < w {
            return Some(*item);
        }
        roll -= w;
    }
    None
}

/// Draw one entry from an eligible subset, weighted by the entry's weight
pub fn draw_entry<'a, E, R>(rng: &mut R, eligible: &[&'a E], category: Category) -> Result<&'a E>
where
    E: CatalogEntry,
    R: RandomSource + ?Sized,
{
    pick_weighted(rng, eligible, |entry| entry.weight())
        .ok_or(ForgeError::EmptyEligibleSet(category))
}
