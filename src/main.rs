//! conscore - Alignment Conservation Scores
//!
//! ## Usage
//!
//! ```bash
//! conscore -i alignment.fasta -s trident -o scores.txt
//! conscore -i alignment.fasta -s wentropy -o -      # scores on stdout
//! ```
//!
//! ## Statistics
//!
//! - `wentropy`: (1 - weighted entropy) * (1 - gap frequency)
//! - `jensen`: Jensen-Shannon divergence from the alignment background
//! - `trident`: Valdar (2002), needs a substitution matrix (`-m`)

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use simplelog::{ColorChoice, TermLogger, TerminalMode};

use conscore::config::{Options, TridentExponents, DEFAULT_MATRIX_FILE};
use conscore::msa::Msa;
use conscore::output::write_scores;
use conscore::scoring::{ScoringStrategy, Statistic};

/// Conservation statistic for command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatisticArg {
    /// Weighted entropy with gap penalty
    Wentropy,
    /// Jensen-Shannon divergence from the background distribution
    Jensen,
    /// Trident score: entropy, residue similarity and gaps
    Trident,
}

impl From<StatisticArg> for Statistic {
    fn from(arg: StatisticArg) -> Self {
        match arg {
            StatisticArg::Wentropy => Statistic::WeightedEntropy,
            StatisticArg::Jensen => Statistic::JensenShannon,
            StatisticArg::Trident => Statistic::Trident,
        }
    }
}

/// conscore - per-column conservation scores for multiple sequence alignments
///
/// Reads a FASTA alignment (at most 500 sequences) and writes one score per
/// column, one per line.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Alignment file in FASTA format
    #[arg(short = 'i', long = "input")]
    input: PathBuf,

    /// Conservation statistic to compute
    #[arg(short = 's', long = "statistic", value_enum, default_value = "trident")]
    statistic: StatisticArg,

    /// Output file, one score per line. Use "-" for stdout.
    #[arg(short = 'o', long = "output", default_value = "output.stat")]
    output: PathBuf,

    /// Directory holding the substitution matrix (trident only)
    #[arg(short = 'm', long = "matrix-dir", default_value = "data")]
    matrix_dir: PathBuf,

    /// Substitution matrix file name inside the matrix directory
    #[arg(long = "matrix-file", default_value = DEFAULT_MATRIX_FILE)]
    matrix_file: String,

    /// Trident exponent of the entropy term
    #[arg(short = 'a', default_value = "1.0")]
    factor_a: f64,

    /// Trident exponent of the residue similarity term
    #[arg(short = 'b', default_value = "0.5")]
    factor_b: f64,

    /// Trident exponent of the gap term
    #[arg(short = 'c', default_value = "3.0")]
    factor_c: f64,

    /// Print alignment statistics and sequence weights
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Log level
    #[arg(short = 'l', long = "log-level", default_value = "info")]
    log_level: LevelFilter,
}

impl Args {
    fn options(&self) -> Result<Options> {
        Ok(Options {
            verbose: self.verbose,
            output_path: self.output.clone(),
            matrix_dir: self.matrix_dir.clone(),
            matrix_file: self.matrix_file.clone(),
            exponents: TridentExponents::new(self.factor_a, self.factor_b, self.factor_c)?,
        })
    }
}

fn run(args: &Args) -> Result<()> {
    let options = args.options()?;
    let statistic: Statistic = args.statistic.into();

    info!("Read multiple alignment in {}", args.input.display());
    let msa = Msa::load(&args.input)
        .with_context(|| format!("Cannot load alignment {}", args.input.display()))?;
    if options.verbose {
        msa.log_statistics();
    }

    let strategy = ScoringStrategy::from_options(statistic, &options)
        .with_context(|| format!("Cannot set up the {} statistic", statistic))?;
    let scores = strategy.compute_scores(&msa)?;

    write_scores(options.output_path(), scores.as_slice())?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        args.log_level.max(LevelFilter::Debug)
    } else {
        args.log_level
    };
    TermLogger::init(
        level,
        Default::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("Cannot initialize the logger")?;

    run(&args)
}
