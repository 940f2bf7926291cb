// Trend Figure - Dual-axis citation/cost chart
// Thin wrapper over the plotting backend; no pipeline logic lives here

use anyhow::{bail, Context, Result};
use plotters::prelude::*;
use std::path::Path;

use crate::citations::CitationSeries;
use crate::cost::CostRecord;
use crate::ticks::compute_ticks;

/// Line colors in series order: multi-omics blue, personalized medicine red,
/// GxE black, matching the published figure.
const SERIES_COLORS: [RGBColor; 3] = [BLUE, RED, BLACK];

/// Sequencing-cost line (secondary axis) is green.
const COST_COLOR: RGBColor = RGBColor(0x00, 0x80, 0x00);

const MARKER_SIZE: i32 = 4;

pub struct TrendChartConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Tick spacing for both y axes, in log10 units
    pub tick_step: f64,
    /// Label every Nth year on the x axis
    pub x_label_interval: i32,
}

impl Default for TrendChartConfig {
    fn default() -> Self {
        TrendChartConfig {
            title: "Log-Transformed Trends in PubMed Citations and Sequencing Cost (2000-2024)"
                .to_string(),
            width: 1400,
            height: 1000,
            tick_step: 0.5,
            x_label_interval: 3,
        }
    }
}

/// Render the dual-axis trend figure to a PNG.
///
/// Left axis carries the citation series, right axis the cost series; both
/// axes are ticked at `tick_step` via `compute_ticks`, labels to one decimal.
pub fn render_trend(
    series: &[CitationSeries],
    cost: &[CostRecord],
    config: &TrendChartConfig,
    path: &Path,
) -> Result<()> {
    if series.is_empty() || series.iter().all(|s| s.points.is_empty()) {
        bail!("No citation series to plot");
    }
    if cost.is_empty() {
        bail!("No cost records to plot");
    }

    let years: Vec<i32> = series
        .iter()
        .flat_map(|s| s.points.iter().map(|(year, _)| *year))
        .chain(cost.iter().map(|record| record.year))
        .collect();
    let x_min = years.iter().copied().fold(i32::MAX, i32::min) as f64;
    let x_max = years.iter().copied().fold(i32::MIN, i32::max) as f64;

    let citation_values: Vec<f64> = series
        .iter()
        .flat_map(|s| s.points.iter().map(|(_, value)| *value))
        .collect();
    let cost_values: Vec<f64> = cost.iter().map(|record| record.log_cost).collect();

    let (y1_lo, y1_hi) = axis_bounds(&citation_values, config.tick_step);
    let (y2_lo, y2_hi) = axis_bounds(&cost_values, config.tick_step);
    let y1_ticks = compute_ticks(&citation_values, config.tick_step);

    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)
        .with_context(|| format!("Failed to initialize figure canvas: {}", path.display()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 36))
        .margin(24)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .right_y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, y1_lo..y1_hi)?
        .set_secondary_coord(x_min..x_max, y2_lo..y2_hi);

    let x_label_count = ((x_max - x_min) / config.x_label_interval as f64).floor() as usize + 1;

    chart
        .configure_mesh()
        .x_labels(x_label_count)
        .y_labels(y1_ticks.len())
        .x_label_formatter(&|x| format!("{x:.0}"))
        .y_label_formatter(&|y| format!("{y:.1}"))
        .x_desc("Year")
        .y_desc("Log10(Number of Citations)")
        .draw()?;

    chart
        .configure_secondary_axes()
        .y_desc("Log10(Cost per Mb in $)")
        .y_label_formatter(&|y| format!("{y:.1}"))
        .draw()?;

    for (index, topic_series) in series.iter().enumerate() {
        let color = SERIES_COLORS[index % SERIES_COLORS.len()];
        let points: Vec<(f64, f64)> = topic_series
            .points
            .iter()
            .map(|(year, value)| (*year as f64, *value))
            .collect();

        chart
            .draw_series(LineSeries::new(points.clone(), &color))?
            .label(format!("{} (Log Transformed)", topic_series.topic))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

        // GxE gets the cross marker, the others circles
        if index == 2 {
            chart.draw_series(
                points
                    .iter()
                    .map(|&point| Cross::new(point, MARKER_SIZE, color.filled())),
            )?;
        } else {
            chart.draw_series(
                points
                    .iter()
                    .map(|&point| Circle::new(point, MARKER_SIZE, color.filled())),
            )?;
        }
    }

    let cost_points: Vec<(f64, f64)> = cost
        .iter()
        .map(|record| (record.year as f64, record.log_cost))
        .collect();

    chart
        .draw_secondary_series(LineSeries::new(cost_points.clone(), &COST_COLOR))?
        .label("Cost per Mb (Log Transformed)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], COST_COLOR));

    // Square markers for the cost line
    chart.draw_secondary_series(cost_points.iter().map(|&point| {
        EmptyElement::at(point)
            + Rectangle::new(
                [(-MARKER_SIZE, -MARKER_SIZE), (MARKER_SIZE, MARKER_SIZE)],
                COST_COLOR.filled(),
            )
    }))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.85))
        .border_style(&BLACK)
        .label_font(("sans-serif", 20))
        .draw()?;

    root.present()
        .with_context(|| format!("Failed to write figure: {}", path.display()))?;

    Ok(())
}

/// Snap an axis to the tick grid; a flat series still gets a visible span.
fn axis_bounds(values: &[f64], step: f64) -> (f64, f64) {
    let ticks = compute_ticks(values, step);
    let lo = ticks.first().copied().unwrap_or(0.0);
    let hi = ticks.last().copied().unwrap_or(step);

    if (hi - lo).abs() < f64::EPSILON {
        (lo, lo + step)
    } else {
        (lo, hi)
    }
}
