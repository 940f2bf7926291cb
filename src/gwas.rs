// 🧬 GWAS Monitor Loader - Country observations to cumulative sample sizes
// Load repeated (country, N) rows, canonicalize spellings, sum per country

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

// ============================================================================
// OBSERVATIONS
// ============================================================================

/// One row of the GWAS Diversity Monitor export: a country's sample count
/// for one time period. Countries repeat across periods.
#[derive(Debug, Clone, Deserialize)]
pub struct Observation {
    #[serde(rename = "index")]
    pub country: String,

    #[serde(rename = "N")]
    pub n: f64,
}

/// Load the raw monitor export. Schema problems (missing columns,
/// non-numeric N) fail the run; there is no partial load.
pub fn load_observations(path: &Path) -> Result<Vec<Observation>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open GWAS monitor data: {}", path.display()))?;

    let mut observations = Vec::new();
    for row in reader.deserialize() {
        let observation: Observation = row.context("Failed to read GWAS monitor row")?;
        observations.push(observation);
    }

    debug!(rows = observations.len(), "loaded GWAS monitor observations");
    Ok(observations)
}

// ============================================================================
// NAME NORMALIZATION
// ============================================================================

/// Known spelling corrections, applied before aggregation.
///
/// Exactly two entries: the monitor's "Korea, South" listing, and the
/// United States respelled to the atlas join key. This is a finite lookup,
/// not fuzzy matching; any other mismatch becomes "No Data" downstream.
const NAME_CORRECTIONS: &[(&str, &str)] = &[
    ("Korea, South", "South Korea"),
    ("United States", "United States of America"),
];

/// Canonical spelling for a country name; unmatched names pass through.
pub fn normalize_name(raw: &str) -> &str {
    for (variant, canonical) in NAME_CORRECTIONS {
        if raw == *variant {
            return canonical;
        }
    }
    raw
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Sum sample sizes per canonical country name.
///
/// Countries with no observations are absent from the result, never present
/// with 0. Absent means "No Data"; a literal 0 total is a real observation
/// and lands in the lowest numeric bucket.
pub fn aggregate(observations: &[Observation]) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();

    for observation in observations {
        let canonical = normalize_name(&observation.country);
        *totals.entry(canonical.to_string()).or_insert(0.0) += observation.n;
    }

    totals
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn observation(country: &str, n: f64) -> Observation {
        Observation {
            country: country.to_string(),
            n,
        }
    }

    #[test]
    fn test_normalize_south_korea() {
        assert_eq!(normalize_name("Korea, South"), "South Korea");
    }

    #[test]
    fn test_normalize_united_states_to_atlas_spelling() {
        assert_eq!(normalize_name("United States"), "United States of America");
    }

    #[test]
    fn test_normalize_passthrough() {
        assert_eq!(normalize_name("France"), "France");
        assert_eq!(normalize_name("Korea, North"), "Korea, North");
    }

    #[test]
    fn test_aggregate_sums_per_country() {
        let observations = vec![
            observation("France", 100.0),
            observation("France", 50.0),
            observation("Germany", 0.0),
        ];

        let totals = aggregate(&observations);

        assert_eq!(totals.get("France"), Some(&150.0));
        assert_eq!(totals.get("Germany"), Some(&0.0));
    }

    #[test]
    fn test_aggregate_unobserved_country_absent_not_zero() {
        let totals = aggregate(&[observation("France", 100.0)]);

        assert!(totals.get("Mali").is_none());
        assert_eq!(totals.len(), 1);
    }

    #[test]
    fn test_aggregate_merges_spelling_variants() {
        let observations = vec![
            observation("United States", 2_000_000.0),
            observation("United States of America", 500_000.0),
        ];

        let totals = aggregate(&observations);

        assert_eq!(totals.get("United States of America"), Some(&2_500_000.0));
        assert!(totals.get("United States").is_none());
    }

    #[test]
    fn test_load_observations_from_csv() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "index,N,Year").unwrap();
        writeln!(file, "France,1200,2018").unwrap();
        writeln!(file, "France,800,2019").unwrap();
        writeln!(file, "\"Korea, South\",300,2019").unwrap();
        file.flush().unwrap();

        let observations = load_observations(file.path()).unwrap();
        assert_eq!(observations.len(), 3);
        assert_eq!(observations[2].country, "Korea, South");
        assert_eq!(observations[1].n, 800.0);

        let totals = aggregate(&observations);
        assert_eq!(totals.get("France"), Some(&2000.0));
        assert_eq!(totals.get("South Korea"), Some(&300.0));
    }

    #[test]
    fn test_load_observations_missing_file_fails() {
        assert!(load_observations(Path::new("no_such_data.csv")).is_err());
    }
}
