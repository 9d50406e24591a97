use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;

mod config;
mod plotting;
mod weather;
mod workflow;

/// Track glacier mass balance under a weather scenario.
#[derive(Parser, Debug)]
#[command(name = "firnline", version, about)]
struct Cli {
    /// Directory holding the glacier and scenario YAML library.
    #[arg(long, default_value = "./data/library")]
    library: String,

    /// Scenario to run.
    #[arg(long, default_value = "SCEN-BASELINE")]
    scenario: String,

    /// Run a single glacier by id; all glaciers in the library if omitted.
    #[arg(long)]
    glacier: Option<String>,

    /// Days of forecast to project past the end of the series.
    #[arg(long, default_value_t = 7)]
    forecast_days: u32,

    /// Health-index threshold used for the collapse projection.
    #[arg(long, default_value_t = firnline_core::diagnostics::DEFAULT_COLLAPSE_THRESHOLD)]
    collapse_threshold: f64,

    /// Directory where logs, reports, and charts are written.
    #[arg(long, default_value = "./data/runs")]
    output: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    println!("--- Firnline Glacier Tracker ---");

    let library = config::ScenarioLibrary::load(&cli.library)?;
    let scenario = library
        .scenarios
        .get(&cli.scenario)
        .with_context(|| format!("Scenario '{}' not found in library", cli.scenario))?;

    if let Some(glacier_id) = &cli.glacier {
        if !library.glaciers.contains_key(glacier_id) {
            bail!("Glacier '{}' not found in library", glacier_id);
        }
    }

    let output_dir = format!(
        "{}/{}_{}",
        cli.output,
        cli.scenario,
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    );
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir))?;

    let mut glaciers: Vec<_> = library.glaciers.values().collect();
    glaciers.sort_by(|a, b| a.glacier_id.cmp(&b.glacier_id));

    for glacier in glaciers {
        if let Some(only) = &cli.glacier {
            if &glacier.glacier_id != only {
                continue;
            }
        }
        workflow::run_glacier_scenario(
            glacier,
            scenario,
            &output_dir,
            cli.forecast_days,
            cli.collapse_threshold,
        )?;
    }

    println!("\nRun complete. Results are in '{}'", output_dir);
    Ok(())
}
