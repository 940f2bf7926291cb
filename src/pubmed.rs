// 🔎 PubMed Fetcher - Citation counts scraped from the search index
// One GET per (year, topic); a missing result marker reads as zero

use anyhow::{Context, Result};
use regex::Regex;
use std::time::Duration;
use tracing::{debug, warn};

use crate::citations::Topic;

/// Public PubMed search endpoint.
pub const PUBMED_BASE_URL: &str = "https://pubmed.ncbi.nlm.nih.gov";

/// Request timeout; a hung socket must not stall the whole batch.
const REQUEST_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// CITATION SOURCE SEAM
// ============================================================================

/// Narrow seam over the citation lookup so the scraping strategy can be
/// swapped or mocked without touching aggregation.
pub trait CitationSource {
    /// Number of citations indexed for this topic in this publication year.
    fn fetch_count(&self, year: i32, topic: &Topic) -> Result<u64>;
}

// ============================================================================
// PUBMED CLIENT
// ============================================================================

/// Blocking HTTP client for the PubMed results page.
///
/// Fire-and-forget: no retries, no rate limiting, one request per call.
/// The page structure is a brittle external contract; when the result
/// summary is missing the count falls back to 0 rather than erroring, so a
/// year with no publications and a page redesign are indistinguishable.
pub struct PubMedClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl PubMedClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(PubMedClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Client against the public PubMed index.
    pub fn default_remote() -> Result<Self> {
        Self::new(PUBMED_BASE_URL, REQUEST_TIMEOUT_SECS)
    }

    /// Search expression restricted to title/abstract and publication year.
    ///
    /// All synonyms are OR-joined: `(a OR b OR c)[Title/Abstract] AND
    /// 2020[Date - Publication]`.
    pub fn build_query(year: i32, topic: &Topic) -> String {
        format!(
            "({})[Title/Abstract] AND {}[Date - Publication]",
            topic.synonyms.join(" OR "),
            year
        )
    }

    /// Full results-page URL for one (year, topic) lookup.
    pub fn search_url(&self, year: i32, topic: &Topic) -> String {
        let query = Self::build_query(year, topic);
        format!("{}/?term={}", self.base_url, urlencoding::encode(&query))
    }
}

impl CitationSource for PubMedClient {
    fn fetch_count(&self, year: i32, topic: &Topic) -> Result<u64> {
        let url = self.search_url(year, topic);
        debug!(%url, "querying PubMed");

        // Transport failure aborts the run; a page that arrives but lacks
        // the result marker reads as zero. The status line is not checked,
        // so an error page without the marker also counts as zero.
        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("PubMed request failed for {} / {}", topic.name, year))?;

        let body = response
            .text()
            .with_context(|| format!("Failed to read PubMed response for {} / {}", topic.name, year))?;

        match extract_result_count(&body) {
            Some(count) => Ok(count),
            None => {
                warn!(topic = %topic.name, year, "no result marker in PubMed response, using 0");
                Ok(0)
            }
        }
    }
}

// ============================================================================
// RESULT-COUNT EXTRACTION
// ============================================================================

/// Pull the result total out of a PubMed results page.
///
/// The count is the leading integer of the `results-amount` summary element,
/// with thousands separators stripped ("1,234 results" -> 1234). Returns
/// `None` when the marker is absent: empty result set, error page, or a
/// page-structure change.
pub fn extract_result_count(html: &str) -> Option<u64> {
    // The value lives in the first <span> inside the results-amount div.
    let marker = Regex::new(r#"(?s)class="results-amount"[^>]*>.*?<span[^>]*>\s*([\d,]+)"#)
        .expect("result-count pattern is valid");

    let captured = marker.captures(html)?;
    let digits = captured.get(1)?.as_str().replace(',', "");

    digits.parse::<u64>().ok()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn results_page(amount: &str) -> String {
        format!(
            r#"<html><body>
            <div class="results-amount">
                <span class="value">{amount}</span>
                results
            </div>
            </body></html>"#
        )
    }

    #[test]
    fn test_extract_count_plain() {
        let html = results_page("482");
        assert_eq!(extract_result_count(&html), Some(482));
    }

    #[test]
    fn test_extract_count_strips_thousands_separators() {
        let html = results_page("12,345");
        assert_eq!(extract_result_count(&html), Some(12345));
    }

    #[test]
    fn test_extract_count_missing_marker() {
        let html = "<html><body><div class='no-results'>Nothing found</div></body></html>";
        assert_eq!(extract_result_count(html), None);
    }

    #[test]
    fn test_extract_count_empty_body() {
        assert_eq!(extract_result_count(""), None);
    }

    #[test]
    fn test_build_query_joins_synonyms() {
        let topic = Topic::new("Multi-Omics", &["multiomics", "multi-omics"]);
        let query = PubMedClient::build_query(2015, &topic);

        assert_eq!(
            query,
            "(multiomics OR multi-omics)[Title/Abstract] AND 2015[Date - Publication]"
        );
    }

    #[test]
    fn test_search_url_encodes_query() {
        let client = PubMedClient::new("https://pubmed.example.org/", 5).unwrap();
        let topic = Topic::new("GxE", &["GxE interaction"]);
        let url = client.search_url(2010, &topic);

        assert!(url.starts_with("https://pubmed.example.org/?term="));
        // Spaces and brackets must be percent-encoded
        assert!(!url.contains(' '));
        assert!(url.contains("%5BTitle%2FAbstract%5D"));
    }
}
