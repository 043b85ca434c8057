//! CLI for conic-section parametrization.
//!
//! Provides:
//! - Sampling conics from JSON definitions
//! - SVG rendering of sampled conics
//! - Random five-point definitions for experimentation

mod render;

use std::{fs, io::Read, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use conic_core::{Conic, ConicSpec, Family, Kind, ParentSpec, R2};
use log::{info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;

use render::{render_svg, Curve, RenderConfig};

#[derive(Parser)]
#[command(name = "conic")]
#[command(version = env!("CONIC_BUILD_SHA"))]
#[command(about = "Parametrize, sample, and render conic sections", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Input {
    /// Conic definition(s), inline JSON (one object or an array)
    #[arg(short, long, conflicts_with = "file")]
    spec: Option<String>,

    /// Read conic definition(s) from a JSON file; stdin if neither is given
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Number of samples per conic
    #[arg(short, long, default_value = "100")]
    num: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample points along each conic, printed as JSON
    Sample {
        #[command(flatten)]
        input: Input,

        /// Output file (JSON); stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render sampled conics to SVG
    Render {
        #[command(flatten)]
        input: Input,

        /// Canvas width in pixels
        #[arg(long, default_value = "800")]
        width: f64,

        /// Canvas height in pixels
        #[arg(long, default_value = "600")]
        height: f64,

        /// Break paths at points farther than this from the origin (per axis)
        #[arg(long, default_value = "50")]
        clip: f64,

        /// Don't mark midpoints
        #[arg(long)]
        no_midpoints: bool,

        /// Output file (SVG); stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print random five-point conic definitions (JSON)
    Random {
        /// Number of definitions
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Points are drawn from [-scale, scale]²
        #[arg(long, default_value = "5")]
        scale: f64,
    },
}

#[derive(Serialize)]
struct Sampled {
    kind: Kind,
    family: Family,
    midpoint: R2<f64>,
    points: Vec<R2<f64>>,
}

impl Input {
    fn read(&self) -> Result<String> {
        match (&self.spec, &self.file) {
            (Some(spec), _) => Ok(spec.clone()),
            (None, Some(path)) => fs::read_to_string(path).with_context(|| format!("reading {}", path.display())),
            (None, None) => {
                let mut s = String::new();
                std::io::stdin().read_to_string(&mut s).context("reading stdin")?;
                Ok(s)
            }
        }
    }

    fn specs(&self) -> Result<Vec<ConicSpec>> {
        let json = self.read()?;
        let specs = ConicSpec::from_json(&json).context("parsing conic definitions")?;
        if specs.is_empty() {
            bail!("no conic definitions given");
        }
        Ok(specs)
    }

    fn sample(&self) -> Result<Vec<Sampled>> {
        self.specs()?
            .iter()
            .enumerate()
            .map(|(idx, spec)| {
                let mut conic: Conic = spec.build().with_context(|| format!("conic {}", idx))?;
                let points = conic.sample(self.num)?;
                let undefined = points.iter().filter(|p| !p.is_finite()).count();
                if undefined > 0 {
                    warn!("conic {} ({}): {} of {} samples undefined", idx, spec.kind, undefined, points.len());
                }
                Ok(Sampled { kind: spec.kind, family: conic.family(), midpoint: conic.midpoint(), points })
            })
            .collect()
    }
}

fn write_output(output: Option<&PathBuf>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn random_specs(count: usize, seed: Option<u64>, scale: f64) -> Vec<ConicSpec> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    (0..count)
        .map(|_| ConicSpec {
            kind: Kind::Conic,
            parents: (0..5)
                .map(|_| ParentSpec::Point(R2::new(rng.gen_range(-scale..scale), rng.gen_range(-scale..scale))))
                .collect(),
            range: None,
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sample { input, output } => {
            let sampled = input.sample()?;
            let json = serde_json::to_string_pretty(&sampled)?;
            write_output(output.as_ref(), &json)?;
        }
        Commands::Render { input, width, height, clip, no_midpoints, output } => {
            let curves: Vec<Curve> = input
                .sample()?
                .into_iter()
                .map(|s| Curve { points: s.points, midpoint: s.midpoint })
                .collect();
            let config = RenderConfig { width, height, clip, show_midpoints: !no_midpoints, ..RenderConfig::default() };
            let svg = render_svg(&curves, &config);
            write_output(output.as_ref(), &svg)?;
        }
        Commands::Random { count, seed, scale } => {
            if scale.is_nan() || scale <= 0. {
                bail!("scale must be positive, got {}", scale);
            }
            let specs = random_specs(count, seed, scale);
            write_output(None, &serde_json::to_string_pretty(&specs)?)?;
        }
    }
    Ok(())
}
