//! Empire generator
//!
//! Ties the sampler and the species allocator together over one set of
//! catalogs and one config.

use std::sync::OnceLock;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::core::config::GeneratorConfig;
use crate::core::error::Result;
use crate::empire::Empire;
use crate::generation::random::RandomSource;
use crate::generation::sampler::draft_empire;
use crate::generation::species::generate_species;
use crate::rules::catalog::Catalogs;
use crate::rules::validate::validate;

/// Generates empires from validated catalogs
#[derive(Debug, Clone)]
pub struct EmpireGenerator {
    catalogs: Catalogs,
    config: GeneratorConfig,
}

impl EmpireGenerator {
    /// Validate both inputs and build a generator
    pub fn new(catalogs: Catalogs, config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        validate(&catalogs)?;
        Ok(Self { catalogs, config })
    }

    /// Generator over the built-in catalogs with default config
    pub fn standard() -> Result<Self> {
        Self::new(Catalogs::standard()?, GeneratorConfig::default())
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a single empire
    pub fn generate_one<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Empire> {
        let draft = draft_empire(&self.catalogs, rng)?;
        let (main, sub) = generate_species(&self.catalogs, &self.config, &draft, rng)?;
        draft.finish(main, sub)
    }

    /// Generate `count` empires sharing one random source
    ///
    /// Stops at the first failure.
    pub fn generate<R: RandomSource + ?Sized>(&self, count: usize, rng: &mut R) -> Result<Vec<Empire>> {
        tracing::info!("Generating {} empires", count);
        let empires = (0..count)
            .map(|_| self.generate_one(rng))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!("Generated {} empires", empires.len());
        Ok(empires)
    }

    /// Generate `count` empires across threads
    ///
    /// Empire `i` gets its own ChaCha stream `i` of `seed`, so the batch is
    /// identical for a given seed however rayon schedules it.
    pub fn generate_parallel(&self, count: usize, seed: u64) -> Result<Vec<Empire>> {
        tracing::info!("Generating {} empires in parallel from seed {}", count, seed);
        (0..count)
            .into_par_iter()
            .map(|index| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                rng.set_stream(index as u64);
                self.generate_one(&mut rng)
            })
            .collect()
    }
}

/// Shared generator over the built-in catalogs, parsed once per process
fn standard_generator() -> Result<&'static EmpireGenerator> {
    static STANDARD: OnceLock<EmpireGenerator> = OnceLock::new();
    if let Some(generator) = STANDARD.get() {
        return Ok(generator);
    }
    let generator = EmpireGenerator::standard()?;
    Ok(STANDARD.get_or_init(|| generator))
}

/// Generate `count` empires from the built-in catalogs
pub fn generate<R: RandomSource + ?Sized>(count: usize, rng: &mut R) -> Result<Vec<Empire>> {
    standard_generator()?.generate(count, rng)
}
