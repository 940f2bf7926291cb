// Figure 1: dual-axis trend of PubMed citations and sequencing cost.
// Sequential batch run: fetch counts, load the cost table, render, save.

use anyhow::Result;
use std::path::Path;

use omics_figures::{
    build_series, default_topics, load_cost_series, render_trend, PubMedClient, TrendChartConfig,
    STUDY_YEARS,
};

const COST_TABLE_PATH: &str = "data/Sequencing_Cost_Data_Table.csv";
const FIGURE_PATH: &str = "figures/citation_cost_trend.png";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("omics_figures=info")),
        )
        .init();

    println!("📈 Figure 1: citation / sequencing-cost trend");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // 1. Fetch citation counts, one lookup per (year, topic)
    let client = PubMedClient::default_remote()?;
    let mut all_series = Vec::new();

    for topic in default_topics() {
        println!("\n🔎 Fetching PubMed counts for {}...", topic.name);
        let series = build_series(STUDY_YEARS, &topic, &client)?;
        println!("✓ {} years collected", series.points.len());
        all_series.push(series);
    }

    // 2. Load and aggregate the NHGRI cost table
    println!("\n📂 Loading sequencing cost table...");
    let cost = load_cost_series(Path::new(COST_TABLE_PATH))?;
    println!("✓ {} yearly cost means", cost.len());

    // 3. Render
    println!("\n🖼  Rendering figure...");
    std::fs::create_dir_all("figures")?;
    render_trend(
        &all_series,
        &cost,
        &TrendChartConfig::default(),
        Path::new(FIGURE_PATH),
    )?;

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("✓ Figure saved to {FIGURE_PATH}");

    Ok(())
}
