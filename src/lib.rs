// Omics Figures - Core Library
// Two batch pipelines producing the manuscript's trend and map figures

pub mod citations; // Pipeline A: topics and log-transformed citation series
pub mod pubmed; // Pipeline A: PubMed count scraping behind a narrow seam
pub mod cost; // Pipeline A: NHGRI sequencing-cost series
pub mod ticks; // Shared: axis tick computation
pub mod gwas; // Pipeline B: monitor observations, normalization, aggregation
pub mod category; // Pipeline B: ordered sample-size scale
pub mod world; // Pipeline B: atlas loading and category join
pub mod chart; // Rendering: dual-axis trend figure
pub mod choropleth; // Rendering: world map figure

// Re-export commonly used types
pub use citations::{
    build_series, default_topics, log_transform, CitationSeries, Topic, YearlyCount, STUDY_YEARS,
};
pub use pubmed::{extract_result_count, CitationSource, PubMedClient, PUBMED_BASE_URL};
pub use cost::{load_cost_series, CostRecord};
pub use ticks::compute_ticks;
pub use gwas::{aggregate, load_observations, normalize_name, Observation};
pub use category::{categorize, SampleSizeCategory, ALL_CATEGORIES};
pub use world::{join, load_world, WorldRegion};
pub use chart::{render_trend, TrendChartConfig};
pub use choropleth::{render_map, MapConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
