// Sequencing Cost Loader - NHGRI cost-per-Mb table to a yearly series
// Rows with unparseable dates are dropped; yearly means are log10-transformed

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Date formats seen in NHGRI cost-table exports, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y"];

/// Raw row of the cost table. Both columns arrive as text so a malformed
/// cell drops the row instead of failing the whole file.
#[derive(Debug, Deserialize)]
struct CostRow {
    #[serde(rename = "Date")]
    date: String,

    #[serde(rename = "Cost per Mb")]
    cost_per_mb: String,
}

/// Yearly mean sequencing cost, already log10-transformed.
#[derive(Debug, Clone, PartialEq)]
pub struct CostRecord {
    pub year: i32,
    /// Arithmetic mean of all costs dated within the year
    pub cost_per_mb: f64,
    /// log10(cost_per_mb); costs must be strictly positive
    pub log_cost: f64,
}

/// Extract a year from a cost-table date cell.
///
/// Tries full dates first, then the table's "Sep-01" month-year style.
/// `None` means the row is dropped from aggregation.
fn parse_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date.year());
        }
    }

    // Month-year cells carry no day; pin them to the 1st to parse.
    if let Ok(date) = NaiveDate::parse_from_str(&format!("01-{trimmed}"), "%d-%b-%y") {
        return Some(date.year());
    }

    None
}

fn parse_cost(raw: &str) -> Option<f64> {
    raw.trim()
        .trim_start_matches('$')
        .replace(',', "")
        .parse::<f64>()
        .ok()
}

/// Load the cost table and collapse it to one log-transformed mean per year.
///
/// Output is ordered ascending by year. A zero or negative cost is a
/// constraint violation (log10 undefined) and fails the run.
pub fn load_cost_series(path: &Path) -> Result<Vec<CostRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open cost table: {}", path.display()))?;

    let mut by_year: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    let mut dropped = 0usize;

    for row in reader.deserialize() {
        let row: CostRow = row.context("Failed to read cost table row")?;

        let (year, cost) = match (parse_year(&row.date), parse_cost(&row.cost_per_mb)) {
            (Some(year), Some(cost)) => (year, cost),
            _ => {
                dropped += 1;
                continue;
            }
        };

        if cost <= 0.0 {
            bail!(
                "Non-positive cost {} dated {} in {}; log10 is undefined",
                cost,
                row.date,
                path.display()
            );
        }

        by_year.entry(year).or_default().push(cost);
    }

    debug!(years = by_year.len(), dropped, "aggregated cost table");

    let records = by_year
        .into_iter()
        .map(|(year, costs)| {
            let mean = costs.iter().sum::<f64>() / costs.len() as f64;
            CostRecord {
                year,
                cost_per_mb: mean,
                log_cost: mean.log10(),
            }
        })
        .collect();

    Ok(records)
}
