//! Command-line interface for the shaper.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::audit::{audit, top_n, AuditReport};
use crate::config::{default_output_path, validate_input_path};
use crate::error::{Result, ShaperError};
use crate::osm::read_elements;
use crate::pipeline::{run as run_pipeline, RunOptions, RunStats};
use crate::sink::JsonLinesSink;

/// OSM Shaper - Clean an OpenStreetMap extract into JSON documents.
#[derive(Parser)]
#[command(name = "osm-shaper")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean an .osm file into a JSON Lines file.
    Process {
        /// Path to the .osm extract
        input: PathBuf,

        /// Output file (default: input with .json extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Stop after reading this many elements
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Report street endings, tag keys, postcodes and amenities of an .osm file.
    Audit {
        /// Path to the .osm extract
        input: PathBuf,

        /// Number of entries shown per frequency table
        #[arg(short = 'n', long, default_value_t = 25)]
        top: usize,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            output,
            limit,
        } => process_command(&input, output.as_deref(), RunOptions { limit }),
        Commands::Audit { input, top } => audit_command(&input, top),
    }
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Execute the process command.
fn process_command(input: &Path, output: Option<&Path>, options: RunOptions) -> Result<()> {
    validate_input_path(input)?;

    let output_path = output.map_or_else(|| default_output_path(input), Path::to_path_buf);

    // Fail before parsing if the output directory is missing
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            return Err(ShaperError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Output directory does not exist: {}", parent.display()),
            )));
        }
    }

    println!(
        "{} {}",
        style("Processing").bold(),
        style(input.display()).cyan()
    );
    println!();

    let pb = spinner();
    pb.set_message("Parsing OSM XML...");

    let elements = match read_elements(input) {
        Ok(elements) => elements,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message(format!("Shaping {} elements...", elements.len()));

    let stats = match JsonLinesSink::create(&output_path)
        .and_then(|mut sink| run_pipeline(elements, &mut sink, &options))
    {
        Ok(stats) => stats,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();
    print_stats(&stats);

    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output_path.display()
    );

    Ok(())
}

fn print_stats(stats: &RunStats) {
    println!("  Elements read: {}", stats.read);
    println!("  Documents written: {}", style(stats.accepted).green());
    if stats.rejected_total() > 0 {
        println!(
            "  Rejected: {}",
            style(stats.rejected_total()).yellow().bold()
        );
        for (reason, count) in &stats.rejected {
            println!("    {reason}: {count}");
        }
    }
}

/// Execute the audit command.
fn audit_command(input: &Path, top: usize) -> Result<()> {
    validate_input_path(input)?;

    let pb = spinner();
    pb.set_message("Parsing OSM XML...");
    let elements = match read_elements(input) {
        Ok(elements) => elements,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.set_message("Auditing...");
    let report = audit(&elements);
    pb.finish_and_clear();

    print_report(&report, top);
    Ok(())
}

fn print_report(report: &AuditReport, top: usize) {
    print_counts("Street endings", &report.street_types, top);
    print_counts("Node tag keys", &report.node_tag_keys, top);
    print_counts("Amenities", &report.amenities, top);

    println!("{}", style("Postcodes").bold());
    println!("  In region: {}", style(report.postcodes.in_region).green());
    println!(
        "  Out of region: {}",
        style(report.postcodes.out_of_region).yellow()
    );
    let states: Vec<&str> = report.postcodes.states.iter().map(String::as_str).collect();
    println!("  States: {}", states.join(", "));
    println!();

    println!("{}", style("Address values").bold());
    for (key, values) in &report.address_values {
        println!("  {key}: {} distinct", values.len());
    }
}

fn print_counts(title: &str, counts: &std::collections::BTreeMap<String, usize>, top: usize) {
    println!("{} ({} distinct)", style(title).bold(), counts.len());
    for (name, count) in top_n(counts, top) {
        println!("  {name:30} {count:>8}");
    }
    println!();
}
