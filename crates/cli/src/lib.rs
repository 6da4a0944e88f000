//! CLI for the MLPerf results visualization pipeline.
//!
//! This crate provides the command-line interface: the `parse` subcommand
//! runs the CSV-to-JSON pipeline and the `validate` subcommand re-checks
//! the generated artifacts.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use clap::{Parser as ClapParser, Subcommand};
use tracing_subscriber::EnvFilter;

/// MLPerf results visualization CLI.
#[derive(ClapParser, Debug)]
#[command(name = "mlperf-viz")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse the results export and write the visualization document.
    ///
    /// Reads the tab-delimited submission export, recovers the benchmark
    /// column taxonomy and the per-system 4-row blocks, and writes the
    /// normalized JSON document the static page consumes.
    Parse {
        /// Path of the results export.
        #[arg(short, long, default_value = "inference51results.csv")]
        input: PathBuf,

        /// Path of the JSON document to write.
        #[arg(short, long, default_value = "data.json")]
        output: PathBuf,

        /// Only include the named benchmarks (repeatable).
        #[arg(short, long)]
        benchmark: Vec<String>,

        /// Print the per-benchmark scenario summary.
        #[arg(short, long)]
        verbose: bool,
    },

    /// Check the generated document and sibling static files.
    ///
    /// Purely advisory: every check is printed and the exit status is
    /// non-zero when any check failed.
    Validate {
        /// Directory holding data.json, index.html and app.js.
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
}

/// Run the CLI with the given arguments.
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if the command fails.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            input,
            output,
            benchmark,
            verbose,
        } => {
            println!("Parsing {}...", input.display());

            let parser = if benchmark.is_empty() {
                mlperf_viz_results::Parser::from_path(&input)
            } else {
                mlperf_viz_results::Parser::from_path(&input).with_filter(benchmark)
            };
            let document = parser.parse()?;
            mlperf_viz_results::io::write_document(&document, &output)?;

            println!(
                "Found {} benchmarks, {} systems with results",
                document.metadata.total_benchmarks, document.metadata.total_systems
            );
            if verbose {
                for entry in &document.benchmarks {
                    println!(
                        "  - {}: {} ({})",
                        entry.name,
                        entry.scenarios.join(", "),
                        entry.unit
                    );
                }
            }
            println!("Wrote {}", output.display());

            Ok(())
        }
        Commands::Validate { dir } => {
            let report = mlperf_viz_validate::validate_dir(&dir);

            for check in &report.checks {
                if check.passed {
                    println!("ok   {}", check.name);
                } else {
                    println!("FAIL {} ({})", check.name, check.detail);
                }
            }

            if report.passed() {
                println!("All {} checks passed", report.checks.len());
                Ok(())
            } else {
                Err(format!("{} validation checks failed", report.failures()).into())
            }
        }
    }
}
