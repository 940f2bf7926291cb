// Figure 5: choropleth of cumulative GWAS sample sizes by country.
// Sequential batch run: load, normalize, aggregate, bucket, join, render.

use anyhow::Result;
use std::path::Path;

use omics_figures::{
    aggregate, join, load_observations, load_world, render_map, MapConfig,
};

const MONITOR_DATA_PATH: &str = "data/GWASmonitor_Data.csv";
const WORLD_ATLAS_PATH: &str = "data/naturalearth_lowres.geojson";
const FIGURE_PATH: &str = "figures/gwas_sample_size_map.png";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("omics_figures=info")),
        )
        .init();

    println!("🗺  Figure 5: GWAS sample sizes by country");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // 1. Load monitor observations and sum per canonical country
    println!("\n📂 Loading GWAS monitor data...");
    let observations = load_observations(Path::new(MONITOR_DATA_PATH))?;
    println!("✓ {} observations loaded", observations.len());

    let totals = aggregate(&observations);
    println!("✓ {} countries with data", totals.len());

    // 2. Load the atlas and join categories onto regions
    println!("\n🌍 Loading world atlas...");
    let regions = load_world(Path::new(WORLD_ATLAS_PATH))?;
    println!("✓ {} regions (Antarctica excluded)", regions.len());

    let categories = join(&totals, &regions);

    // 3. Render
    println!("\n🖼  Rendering figure...");
    std::fs::create_dir_all("figures")?;
    render_map(
        &regions,
        &categories,
        &MapConfig::default(),
        Path::new(FIGURE_PATH),
    )?;

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("✓ Figure saved to {FIGURE_PATH}");

    Ok(())
}
