use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use palettize::{extract_palette, Options, Outcome, SortOrder};

/// Extract a dominant-color palette from an image and render it as a swatch
/// strip.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input image path
    input: PathBuf,

    /// Number of palette clusters (clamped to 1-64)
    #[arg(short = 'k', long, default_value_t = 5)]
    clusters: u32,

    /// Seed for the deterministic random source; identical seeds reproduce
    /// identical palettes
    #[arg(short, long, default_value_t = 2019)]
    seed: u32,

    /// Palette ordering
    #[arg(long, value_enum, default_value = "weight")]
    sort: SortArg,

    /// Iteration ceiling for the clustering loop
    #[arg(long, default_value_t = 300, value_parser = clap::value_parser!(u32).range(1..))]
    iterations: u32,

    /// Output path for the rendered swatch
    #[arg(short, long, default_value = "palette.png")]
    output: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SortArg {
    Weight,
    Red,
    Green,
    Blue,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Weight => SortOrder::Weight,
            SortArg::Red => SortOrder::Red,
            SortArg::Green => SortOrder::Green,
            SortArg::Blue => SortOrder::Blue,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let image = image::open(&args.input)
        .with_context(|| format!("unable to decode {}", args.input.display()))?
        .to_rgba8();

    let options = Options {
        cluster_count: args.clusters,
        seed: args.seed,
        sort_order: args.sort.into(),
        max_iterations: args.iterations,
        ..Options::default()
    };
    let (palette, outcome) = extract_palette(&image, &options)?;

    match outcome {
        Outcome::Converged { iterations } => info!("converged after {iterations} iterations"),
        Outcome::Exhausted { iterations } => {
            info!("stopped at the {iterations}-iteration ceiling")
        }
    }
    for entry in &palette.entries {
        info!(
            "#{:02X}{:02X}{:02X} weight {:.3}",
            entry.rgba[0], entry.rgba[1], entry.rgba[2], entry.weight
        );
    }

    palette
        .render_swatch()
        .save(&args.output)
        .with_context(|| format!("unable to write {}", args.output.display()))?;
    println!("Saved → {}", args.output.display());

    Ok(())
}
