//! bignum-vectors: correctness test vectors for multi-precision add/sub kernels.
//!
//! `generate <add|sub> <bits>` writes `random.csv.gz` and `special.csv.gz` for one
//! pair; `all` covers every operation and the default widths in parallel.

use anyhow::{Context, Result, bail};
use bignum_vectors::{
    ALL_OPERATIONS, BitWidth, DEFAULT_WIDTHS, GeneratorConfig, Operation, run_invocation,
    run_matrix,
};
use clap::{Args, Parser, Subcommand};
use std::{path::PathBuf, thread};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bignum-vectors")]
#[command(about = "Generate test vectors for multi-precision addition and subtraction")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct OutputArgs {
    /// Root of the `<operation>/<bits>/` output tree
    #[arg(long, default_value = GeneratorConfig::OUTPUT_ROOT)]
    out: PathBuf,

    /// Session seed (drawn from the OS when omitted; always logged)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of uniformly random vectors
    #[arg(long, default_value_t = GeneratorConfig::RANDOM_CASES)]
    random_cases: usize,

    /// Number of curated vectors
    #[arg(long, default_value_t = GeneratorConfig::SPECIAL_CASES)]
    special_cases: usize,
}

impl OutputArgs {
    fn config(&self) -> GeneratorConfig {
        GeneratorConfig::default()
            .with_output_root(&self.out)
            .with_seed(self.seed)
            .with_random_cases(self.random_cases)
            .with_special_cases(self.special_cases)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate both corpora for one operation and bit width
    Generate {
        /// Operation: add or sub
        operation: String,

        /// Operand width in bits (256..=131072)
        bits: u32,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate every operation at every default bit width
    All {
        /// Worker threads (defaults to available parallelism)
        #[arg(long)]
        jobs: Option<usize>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "bignum_vectors=debug,info"
    } else {
        "bignum_vectors=info,warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Generate {
            operation,
            bits,
            output,
        } => cmd_generate(&operation, bits, &output),
        Commands::All { jobs, output } => cmd_all(jobs, &output),
    }
}

fn cmd_generate(operation: &str, bits: u32, output: &OutputArgs) -> Result<()> {
    let op: Operation = operation.parse()?;
    let width = BitWidth::new(bits)?;
    let config = output.config();

    let report = run_invocation(&config, op, width)
        .with_context(|| format!("generating {op} test cases for {width} bits"))?;

    println!(
        "Test cases generated in {:.2} seconds (seed {}).",
        report.elapsed.as_secs_f64(),
        report.seed
    );
    println!("Random test cases saved to {}", report.random_path.display());
    println!("Special test cases saved to {}", report.special_path.display());
    Ok(())
}

fn cmd_all(jobs: Option<usize>, output: &OutputArgs) -> Result<()> {
    let widths = DEFAULT_WIDTHS
        .iter()
        .map(|&bits| BitWidth::new(bits))
        .collect::<Result<Vec<_>, _>>()?;
    let jobs = jobs.unwrap_or_else(|| thread::available_parallelism().map_or(1, |n| n.get()));
    let config = output.config();

    let report = run_matrix(&config, &ALL_OPERATIONS, &widths, jobs)?;

    println!();
    println!("Task details:");
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(_) => println!("Completed {} with {} bits", outcome.op, outcome.width),
            Err(err) => println!("Error processing {} with {} bits: {err}", outcome.op, outcome.width),
        }
    }

    let secs = report.elapsed.as_secs();
    println!(
        "Total execution time: {:02}:{:02}:{:02}",
        secs / 3600,
        secs % 3600 / 60,
        secs % 60
    );

    if !report.is_success() {
        bail!(
            "{} out of {} invocations failed",
            report.failures(),
            report.outcomes.len()
        );
    }

    println!("All test cases were generated successfully.");
    Ok(())
}
