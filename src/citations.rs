// 📚 Citation Series - Per-topic PubMed counts over the study window
// Collects one count per year, log10-transforms, keeps years ascending

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::debug;

use crate::pubmed::CitationSource;

/// Publication years covered by the manuscript trend figure.
pub const STUDY_YEARS: Range<i32> = 2000..2024;

// ============================================================================
// TOPIC
// ============================================================================

/// A named research concept searched via a synonym-expanded keyword query.
///
/// Immutable once built; the synonym list is OR-joined into a single
/// Title/Abstract query by the fetcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    /// Display name used in series labels (e.g. "Multi-Omics")
    pub name: String,

    /// Spelling variants searched for this topic
    pub synonyms: Vec<String>,
}

impl Topic {
    pub fn new(name: &str, synonyms: &[&str]) -> Self {
        Topic {
            name: name.to_string(),
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// The three topics tracked by the manuscript, with the exact synonym lists
/// used for the published figure. Changing these changes the figure.
pub fn default_topics() -> Vec<Topic> {
    vec![
        Topic::new(
            "Multi-Omics",
            &["multiomics", "multi-omics", "Multiomics", "Multi-omics"],
        ),
        Topic::new(
            "Personalized Medicine",
            &[
                "personalized-medicine",
                "precision-medicine",
                "personalized medicine",
                "precision medicine",
            ],
        ),
        Topic::new(
            "GxE Interaction",
            &[
                "gene-environment interaction",
                "gene-environment correlation",
                "GxE interaction",
                "GxE",
            ],
        ),
    ]
}

// ============================================================================
// YEARLY COUNT + SERIES
// ============================================================================

/// Raw count for one (year, topic) lookup, before transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearlyCount {
    pub year: i32,
    pub count: u64,
}

impl YearlyCount {
    /// Plotted height of this count on the log axis.
    pub fn log_value(&self) -> f64 {
        log_transform(self.count)
    }
}

/// One topic's log-transformed trend line, years ascending.
///
/// An explicit value object handed from aggregation to rendering; stages
/// never share a mutable map.
#[derive(Debug, Clone)]
pub struct CitationSeries {
    pub topic: String,
    /// (year, log10 count) pairs, ascending by year
    pub points: Vec<(i32, f64)>,
}

/// Log-transform with a zero floor: a count of 0 plots at 0.
///
/// log10(1) is also 0, so counts 0 and 1 are indistinguishable after the
/// transform. The published figure depends on this exact behavior.
pub fn log_transform(count: u64) -> f64 {
    if count > 0 {
        (count as f64).log10()
    } else {
        0.0
    }
}

/// Fetch one count per year for a topic and build its trend line.
///
/// Calls are strictly sequential, one outbound lookup per year; the output
/// preserves the year order of the input range.
pub fn build_series(
    years: Range<i32>,
    topic: &Topic,
    source: &dyn CitationSource,
) -> Result<CitationSeries> {
    let mut points = Vec::with_capacity(years.len());

    for year in years {
        let sample = YearlyCount {
            year,
            count: source.fetch_count(year, topic)?,
        };
        debug!(topic = %topic.name, year, count = sample.count, "fetched citation count");
        points.push((sample.year, sample.log_value()));
    }

    Ok(CitationSeries {
        topic: topic.name.clone(),
        points,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic stand-in for the PubMed client.
    struct StubSource;

    impl CitationSource for StubSource {
        fn fetch_count(&self, year: i32, _topic: &Topic) -> Result<u64> {
            // 2000 -> 0, 2001 -> 10, 2002 -> 100, ...
            let exponent = (year - 2000) as u32;
            Ok(if exponent == 0 {
                0
            } else {
                10u64.pow(exponent)
            })
        }
    }

    #[test]
    fn test_log_transform_zero_floor() {
        assert_eq!(log_transform(0), 0.0);
    }

    #[test]
    fn test_log_transform_one_collapses_to_zero() {
        // Known precision loss: 1 and 0 plot at the same height
        assert_eq!(log_transform(1), 0.0);
        assert_eq!(log_transform(1), log_transform(0));
    }

    #[test]
    fn test_log_transform_powers_of_ten() {
        assert_eq!(log_transform(10), 1.0);
        assert_eq!(log_transform(1000), 3.0);
        assert!((log_transform(250) - 250f64.log10()).abs() < 1e-12);
    }

    #[test]
    fn test_build_series_preserves_year_order() {
        let topic = Topic::new("Test", &["test"]);
        let series = build_series(2000..2004, &topic, &StubSource).unwrap();

        let years: Vec<i32> = series.points.iter().map(|(y, _)| *y).collect();
        assert_eq!(years, vec![2000, 2001, 2002, 2003]);
    }

    #[test]
    fn test_build_series_applies_log_transform() {
        let topic = Topic::new("Test", &["test"]);
        let series = build_series(2000..2004, &topic, &StubSource).unwrap();

        // 0 -> 0.0 (floor), 10 -> 1.0, 100 -> 2.0, 1000 -> 3.0
        let values: Vec<f64> = series.points.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_default_topics_cover_manuscript_terms() {
        let topics = default_topics();
        assert_eq!(topics.len(), 3);
        assert_eq!(topics[0].name, "Multi-Omics");
        assert!(topics[1].synonyms.contains(&"precision medicine".to_string()));
        assert!(topics[2].synonyms.contains(&"GxE".to_string()));
    }

    #[test]
    fn test_study_years_span() {
        assert_eq!(STUDY_YEARS.start, 2000);
        assert_eq!(STUDY_YEARS.end, 2024);
    }
}
