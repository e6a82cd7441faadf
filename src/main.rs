//! Empire Forge - Entry Point
//!
//! Generates a batch of empires and prints them as text or JSON.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use empire_forge::core::error::Result;
use empire_forge::rules::load_catalogs;
use empire_forge::{Catalogs, EmpireGenerator, GenerationOutput, GeneratorConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Generate random, rule-consistent empires
#[derive(Parser, Debug)]
#[command(name = "empire-forge")]
#[command(about = "Generate random empires that satisfy every catalog rule")]
struct Args {
    /// Number of empires to generate
    #[arg(long, short = 'n', default_value_t = 3)]
    count: usize,

    /// Random seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Generator config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog file replacing the built-in catalogs (TOML)
    #[arg(long)]
    catalogs: Option<PathBuf>,

    /// Spread generation across threads, one random stream per empire
    #[arg(long)]
    parallel: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("empire_forge=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    let catalogs = match &args.catalogs {
        Some(path) => load_catalogs(path)?,
        None => Catalogs::standard()?,
    };
    let generator = EmpireGenerator::new(catalogs, config)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!("Using seed {}", seed);

    let start = Instant::now();
    let empires = if args.parallel {
        generator.generate_parallel(args.count, seed)?
    } else {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        generator.generate(args.count, &mut rng)?
    };
    let output = GenerationOutput::new(empires, Some(seed), start.elapsed());

    match args.format {
        Format::Text => println!("{}", output.to_text()),
        Format::Json => println!("{}", output.to_json()?),
    }
    tracing::info!("{}", output.summary().replace('\n', "; "));

    Ok(())
}
