use crate::{plotting, weather};
use anyhow::{Context, Result};
use chrono::Utc;
use firnline_core::{analysis, model::builder::ModelBuilder};
use firnline_schemas::{
    context::DataContextUpdate,
    glacier::GlacierDefinition,
    projection::DiagnosticsReport,
    scenario::Scenario,
    state::GlacierState,
};
use serde::Serialize;
use std::{fs, path::Path};

/// Everything worth keeping from one glacier's run, written alongside the
/// CSV log and charts.
#[derive(Debug, Serialize)]
struct RunRecord<'a> {
    glacier_id: &'a str,
    scenario_id: &'a str,
    final_state: GlacierState,
    diagnostics: &'a DiagnosticsReport,
}

/// Drives one glacier through a scenario: feed the series, read the
/// diagnostics, run a speculative forecast leg against a snapshot, and
/// leave the observed baseline in place afterwards.
pub fn run_glacier_scenario(
    glacier: &GlacierDefinition,
    scenario: &Scenario,
    output_dir: &str,
    forecast_days: u32,
    collapse_threshold: f64,
) -> Result<()> {
    println!(
        "\n--- [Workflow] {} ({}) under '{}' ---",
        glacier.glacier_name, glacier.region, scenario.scenario_name
    );

    let log_path = Path::new(output_dir).join(format!(
        "{}_{}.csv",
        glacier.glacier_id, scenario.scenario_id
    ));
    let log_path = log_path
        .to_str()
        .context("Output path is not valid UTF-8")?
        .to_string();

    let mut model = ModelBuilder::new()
        .with_parameters(glacier.parameters.unwrap_or_default())
        .with_history_logging_to_file(&log_path)
        .build()?;

    let source_label = format!("Scenario: {}", scenario.scenario_name);
    let series = weather::generate_series(scenario, Utc::now());
    let (first, rest) = series
        .split_first()
        .context("Scenario produced an empty series")?;

    model.reset_with_observation(Some(first), &source_label)?;
    for observation in rest {
        model.apply_daily_observation(observation, &source_label)?;
    }
    let last = series.last().context("Scenario produced an empty series")?;

    // The reliability overlay is derived out here, never inside the model.
    let mut context_update = weather::live_context(&source_label, last.date, Utc::now());
    context_update.is_scenario = Some(true);
    model.set_data_context(context_update);

    let diagnostics = model.diagnostics(collapse_threshold);
    println!("{}", model.summary(last, Some(&diagnostics)));

    let record = RunRecord {
        glacier_id: &glacier.glacier_id,
        scenario_id: &scenario.scenario_id,
        final_state: model.state(),
        diagnostics: &diagnostics,
    };
    let report_path = Path::new(output_dir).join(format!(
        "{}_{}_report.json",
        glacier.glacier_id, scenario.scenario_id
    ));
    fs::write(&report_path, serde_json::to_string_pretty(&record)?)
        .with_context(|| format!("Failed to write report {:?}", report_path))?;

    let season = analysis::summarize_log(&log_path)?;
    println!(
        "Season so far: {} days logged, {} gaining / {} losing, net change {:+.2}, health range {:.1} to {:.1}.",
        season.total_days,
        season.gaining_days,
        season.losing_days,
        season.net_change,
        season.min_health_index,
        season.max_health_index
    );

    plotting::generate_all_plots(output_dir, &log_path, glacier)?;

    // Speculative forecast leg. The snapshot keeps the observed baseline
    // safe; restoring afterwards discards every forecast apply.
    let baseline = model.snapshot();
    let forecast = weather::forecast_from(last, scenario, forecast_days);
    for observation in &forecast {
        model.apply_daily_observation(observation, "Forecast")?;
    }
    model.set_data_context(DataContextUpdate {
        source_label: Some("Forecast".to_string()),
        is_forecast: Some(true),
        ..Default::default()
    });

    let projected = model.diagnostics(collapse_threshold);
    println!("\nAfter a {}-day forecast leg:", forecast_days);
    if let Some(observation) = forecast.last() {
        println!("{}", model.summary(observation, Some(&projected)));
    }

    model.restore(baseline);
    println!(
        "\nRestored observed baseline (health index {:.2}, {} days of history).",
        model.health_index(),
        model.history().len()
    );

    Ok(())
}
