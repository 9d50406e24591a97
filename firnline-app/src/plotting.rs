//! This module is responsible for generating all visualizations from the
//! history log data.

use anyhow::Result;
use firnline_core::analysis::LogEntry;
use firnline_core::diagnostics::{
    CRITICAL_HEALTH_INDEX, DEFAULT_COLLAPSE_THRESHOLD, WARNING_HEALTH_INDEX,
};
use firnline_schemas::glacier::GlacierDefinition;
use plotters::prelude::*;
use std::path::Path;

/// A flattened log record with its day index, ready to plot.
struct PlottingData {
    day: u64,
    daily_change: f64,
    health_index: f64,
}

/// The main function to generate and save all plots for a run.
pub fn generate_all_plots(
    output_dir: &str,
    log_path: &str,
    glacier: &GlacierDefinition,
) -> Result<()> {
    println!("[Plotting] Generating graphs from history data...");

    let data = parse_log_file(log_path)?;
    if data.is_empty() {
        println!("[Plotting] Warning: No data to plot.");
        return Ok(());
    }

    plot_health_index(output_dir, &data, glacier)?;
    plot_daily_change(output_dir, &data, glacier)?;

    println!("[Plotting] Graphs have been saved to '{}'.", output_dir);
    Ok(())
}

/// Parses the history CSV file into a vector of `PlottingData` structs.
fn parse_log_file(log_path: &str) -> Result<Vec<PlottingData>> {
    let mut reader = csv::Reader::from_path(log_path)?;
    let mut data = Vec::new();

    for (day, result) in reader.deserialize().enumerate() {
        let record: LogEntry = result?;
        data.push(PlottingData {
            day: day as u64,
            daily_change: record.daily_change,
            health_index: record.health_index,
        });
    }

    Ok(data)
}

fn plot_health_index(
    output_dir: &str,
    data: &[PlottingData],
    glacier: &GlacierDefinition,
) -> Result<()> {
    let path = Path::new(output_dir).join(format!("{}_health_index.png", glacier.glacier_id));
    let root = BitMapBackend::new(&path, (1024, 640)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_day = data.last().map_or(1, |d| d.day.max(1));

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{} health index", glacier.glacier_name),
            ("sans-serif", 30),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0u64..max_day, 0.0..200.0)?;

    chart
        .configure_mesh()
        .x_desc("Day")
        .y_desc("Health index")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            data.iter().map(|d| (d.day, d.health_index)),
            &BLUE,
        ))?
        .label("Health index")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.filled()));

    let guides = [
        (WARNING_HEALTH_INDEX, YELLOW, "Integrity warning"),
        (CRITICAL_HEALTH_INDEX, RED, "Critical loss"),
        (DEFAULT_COLLAPSE_THRESHOLD, BLACK, "Collapse threshold"),
    ];
    for (value, colour, name) in guides {
        chart
            .draw_series(LineSeries::new([(0u64, value), (max_day, value)], &colour))?
            .label(name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], colour.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

fn plot_daily_change(
    output_dir: &str,
    data: &[PlottingData],
    glacier: &GlacierDefinition,
) -> Result<()> {
    let path = Path::new(output_dir).join(format!("{}_daily_change.png", glacier.glacier_id));
    let root = BitMapBackend::new(&path, (1024, 480)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_day = data.last().map_or(1, |d| d.day.max(1));
    let mut min_change = 0.0f64;
    let mut max_change = 0.0f64;
    for point in data {
        min_change = min_change.min(point.daily_change);
        max_change = max_change.max(point.daily_change);
    }
    let pad = ((max_change - min_change) * 0.1).max(0.1);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{} daily mass change", glacier.glacier_name),
            ("sans-serif", 30),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0u64..max_day, (min_change - pad)..(max_change + pad))?;

    chart
        .configure_mesh()
        .x_desc("Day")
        .y_desc("Daily change")
        .draw()?;

    chart.draw_series(LineSeries::new([(0u64, 0.0), (max_day, 0.0)], &BLACK))?;
    chart.draw_series(LineSeries::new(
        data.iter().map(|d| (d.day, d.daily_change)),
        &GREEN,
    ))?;

    root.present()?;
    Ok(())
}
