//! Square Roots by Hand - command line driver
//!
//! CLI commands:
//! - eval: Compute one square root with a chosen variant
//! - verify: Check every variant against the configured cases
//! - list: List available variants

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use sqrt_by_hand::config::{Config, Settings};
use sqrt_by_hand::{logging, verify, HardwareOracle, ReferenceOracle, SqrtError, Variant};

#[derive(Parser)]
#[command(name = "sqrt-by-hand")]
#[command(about = "Square roots from elementary arithmetic")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to sqrt.yaml config
    #[arg(short, long, default_value = "sqrt.yaml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute sqrt(N) with one variant
    Eval {
        /// Non-negative input
        n: f64,

        /// Variant name (see `list`)
        #[arg(short, long)]
        variant: Option<String>,
    },

    /// Run every configured case through every variant
    Verify {
        /// Write a JSON report to this path
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// List available variants
    List,
}

fn main() -> anyhow::Result<()> {
    let settings = Settings::load();
    logging::init_logging(&settings.log_dir)?;
    tracing::info!("sqrt-by-hand starting up");
    let default_variant = settings.default_variant();

    let cli = Cli::parse();
    tracing::debug!("CLI args parsed: config={:?}", cli.config);

    let config = if cli.config.exists() {
        tracing::info!("Loading config from {:?}", cli.config);
        Config::load(&cli.config)?
    } else {
        tracing::warn!("Config file not found: {:?}, using defaults", cli.config);
        Config::default()
    };
    tracing::info!(
        "Config loaded: {} perfect roots, {} cases, epsilon {}",
        config.perfect_roots.len(),
        config.cases.len(),
        config.precision.epsilon
    );

    match cli.command {
        Commands::Eval { n, variant } => {
            let variant = match variant {
                Some(name) => Variant::from_name(&name).ok_or(SqrtError::UnknownVariant(name))?,
                None => default_variant,
            };
            eval(&config, variant, n)?;
        }

        Commands::Verify { json } => {
            verify_all(&config, json)?;
        }

        Commands::List => {
            list_variants();
        }
    }

    Ok(())
}

/// Evaluate one variant and compare with the oracle
fn eval(config: &Config, variant: Variant, n: f64) -> anyhow::Result<()> {
    let oracle = HardwareOracle;
    let root = variant.evaluate(n, &config.precision)?;
    let expected = oracle.sqrt(n);

    println!("{}({}) = {}", variant, n, root);
    println!("  {:<10} {}", oracle.name(), expected);
    println!("  {:<10} {:e}", "diff", (root - expected).abs());
    Ok(())
}

/// Verify all variants, optionally writing the report as JSON
fn verify_all(config: &Config, json: Option<PathBuf>) -> anyhow::Result<()> {
    let report = verify::run(config, &HardwareOracle);

    for check in &report.checks {
        let status = if check.passed { "OK" } else { "FAIL" };
        match (&check.actual, &check.error) {
            (Some(actual), _) => println!(
                "  [{}] {:<22} sqrt({}) = {} (want {})",
                status, check.variant, check.input, actual, check.expected
            ),
            (None, Some(error)) => {
                println!("  [{}] {:<22} sqrt({}): {}", status, check.variant, check.input, error)
            }
            (None, None) => {}
        }
    }

    if let Some(path) = json {
        std::fs::write(&path, serde_json::to_string_pretty(&report)?)?;
        println!("Report written to {:?}", path);
    }

    let failures = report.failures();
    println!();
    println!("{} checks, {} failed", report.checks.len(), failures.len());
    if !failures.is_empty() {
        anyhow::bail!("{} checks failed", failures.len());
    }
    Ok(())
}

fn list_variants() {
    println!("Available variants ({}):", Variant::ALL.len());
    println!();
    for variant in Variant::ALL {
        let exact = if variant.is_exact() { " [exact]" } else { "" };
        println!("  - {:<22} {}{}", variant.name(), variant.representation(), exact);
    }
}
