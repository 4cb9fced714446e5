#![warn(missing_docs)]
//! GrowthBench CLI Library
//!
//! Command-line front end for the growth-rate estimator. Measures the
//! built-in candidate catalog, optionally filtered by a regex, and prints the
//! estimated complexity of each candidate.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     growthbench_cli::run()
//! }
//! ```

mod catalog;
mod config;
mod executor;

pub use catalog::{CATALOG, CatalogEntry, select};
pub use config::*;
pub use executor::{
    ExecutionOutcome, Executor, RunGroup, build_report, format_human_output, format_ms, plan_runs,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use growthbench_core::{Concurrency, MeasureConfig};
use growthbench_report::{OutputFormat, Report, generate_csv_report, generate_json_report};
use regex::Regex;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// GrowthBench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "growthbench")]
#[command(
    author,
    version,
    about = "GrowthBench - empirical time-complexity estimation"
)]
pub struct Cli {
    /// Optional subcommand (Run, List, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter catalog candidates by regex pattern
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Input sizes, comma separated (overrides per-candidate sizes)
    #[arg(long, value_delimiter = ',')]
    pub sizes: Option<Vec<usize>>,

    /// Invocations per size
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Keep warm-up samples instead of discarding the first quarter
    #[arg(long)]
    pub cold: bool,

    /// Wall-clock budget for a run (e.g., "30s", "500ms")
    #[arg(long)]
    pub time_budget: Option<String>,

    /// Concurrent invocations per chunk: "auto" or a number
    #[arg(long)]
    pub chunk_size: Option<String>,

    /// Output format: human, json, csv
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub quiet: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Measure the selected candidates (default)
    Run,
    /// List the built-in candidates
    List,
    /// Print a default growthbench.toml
    Init,
}

/// Run the GrowthBench CLI with the process arguments.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if something goes wrong.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the GrowthBench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Initialize logging; a subscriber may already be installed
    let filter = if cli.verbose {
        "growthbench=debug"
    } else {
        "growthbench=info"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match cli.command {
        Some(Commands::List) => list_candidates(&cli),
        Some(Commands::Init) => {
            print!("{}", GrowthConfig::default_toml());
            Ok(())
        }
        Some(Commands::Run) | None => {
            // Discover growthbench.toml configuration (CLI flags override)
            let config = GrowthConfig::discover().unwrap_or_default();
            run_candidates(&cli, &config)
        }
    }
}

fn filter_regex(cli: &Cli) -> anyhow::Result<Regex> {
    Regex::new(&cli.filter).with_context(|| format!("Invalid filter pattern: {}", cli.filter))
}

fn list_candidates(cli: &Cli) -> anyhow::Result<()> {
    println!("GrowthBench Catalog:");

    let entries = select(&filter_regex(cli)?);
    for entry in &entries {
        let sizes = match entry.sizes {
            Some(sizes) => format!("{:?}", sizes),
            None => "configured sizes".to_string(),
        };
        println!(
            "├── {} (expected: {}, sizes: {})",
            entry.name, entry.expected, sizes
        );
    }

    println!("{} candidates found.", entries.len());
    Ok(())
}

/// Build a MeasureConfig by layering: growthbench.toml defaults → CLI overrides.
pub fn build_measure_config(cli: &Cli, config: &GrowthConfig) -> anyhow::Result<MeasureConfig> {
    let sizes = cli
        .sizes
        .clone()
        .unwrap_or_else(|| config.runner.sizes.clone());
    if sizes.contains(&0) {
        return Err(anyhow::anyhow!("Input sizes must be positive"));
    }

    let time_budget = cli
        .time_budget
        .as_deref()
        .unwrap_or(&config.runner.time_budget);
    let time_budget = Duration::from_nanos(GrowthConfig::parse_duration(time_budget)?);

    let concurrency = match cli.chunk_size.as_deref() {
        Some(chunk_size) => chunk_size
            .parse::<Concurrency>()
            .map_err(anyhow::Error::msg)?,
        None => config.runner.chunk_size.to_concurrency()?,
    };

    Ok(MeasureConfig::default()
        .with_sizes(sizes)
        .with_iterations(cli.iterations.unwrap_or(config.runner.iterations))
        .with_warmup_discard(config.runner.warmup_discard && !cli.cold)
        .with_time_budget(time_budget)
        .with_concurrency(concurrency))
}

fn run_candidates(cli: &Cli, config: &GrowthConfig) -> anyhow::Result<()> {
    let format = cli
        .format
        .as_deref()
        .unwrap_or(&config.output.format)
        .parse::<OutputFormat>()
        .map_err(anyhow::Error::msg)?;

    let measure_config = build_measure_config(cli, config)?;
    let entries = select(&filter_regex(cli)?);

    if entries.is_empty() {
        println!("No candidates found.");
        return Ok(());
    }

    let groups = plan_runs(&entries, &measure_config, cli.sizes.is_some());
    println!(
        "Measuring {} candidates in {} run(s), {} iterations per size, chunk size {}...\n",
        entries.len(),
        groups.len(),
        measure_config.iterations,
        measure_config.concurrency
    );

    let outcome = Executor::new(!cli.quiet).execute(groups)?;
    let report = build_report(&outcome, &measure_config);
    let output = render(&report, format)?;

    // Write output
    if let Some(ref path) = cli.output {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        file.write_all(output.as_bytes())?;
        println!("Report written to: {}", path.display());
    } else {
        print!("{}", output);
    }

    Ok(())
}

/// Render a report in the given format
pub fn render(report: &Report, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => generate_json_report(report)?,
        OutputFormat::Csv => generate_csv_report(report),
        OutputFormat::Human => format_human_output(report),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("growthbench").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_follow_config() {
        let cli = parse(&[]);
        assert_eq!(cli.filter, ".*");
        assert!(cli.command.is_none());

        let config = build_measure_config(&cli, &GrowthConfig::default()).unwrap();
        assert_eq!(config, MeasureConfig::default());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = parse(&[
            "sort",
            "--sizes",
            "1,2,4",
            "--iterations",
            "7",
            "--cold",
            "--time-budget",
            "500ms",
            "--chunk-size",
            "3",
        ]);
        let config = build_measure_config(&cli, &GrowthConfig::default()).unwrap();

        assert_eq!(cli.filter, "sort");
        assert_eq!(config.sizes, vec![1, 2, 4]);
        assert_eq!(config.iterations, 7);
        assert!(!config.warmup_discard);
        assert_eq!(config.time_budget, Duration::from_millis(500));
        assert_eq!(config.concurrency, Concurrency::Fixed(3));
    }

    #[test]
    fn test_subcommand_after_filter() {
        let cli = parse(&["fib", "list"]);
        assert_eq!(cli.filter, "fib");
        assert!(matches!(cli.command, Some(Commands::List)));
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let config = GrowthConfig::default();
        assert!(build_measure_config(&parse(&["--time-budget", "soon"]), &config).is_err());
        assert!(build_measure_config(&parse(&["--chunk-size", "many"]), &config).is_err());
        assert!(build_measure_config(&parse(&["--sizes", "0,1"]), &config).is_err());
        assert!(filter_regex(&parse(&["("])).is_err());
    }

    #[test]
    fn test_render_formats() {
        let outcome = ExecutionOutcome {
            results: Default::default(),
            truncated: false,
            total_duration_ms: 0.0,
        };
        let report = build_report(&outcome, &MeasureConfig::default());

        assert!(render(&report, OutputFormat::Json).unwrap().starts_with('{'));
        assert!(render(&report, OutputFormat::Csv).unwrap().starts_with("name,"));
        assert!(render(&report, OutputFormat::Human).unwrap().contains("GrowthBench Results"));
    }
}
