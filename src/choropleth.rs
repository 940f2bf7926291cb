// 🗺️ Map Figure - Choropleth of bucketed sample sizes
// Fills atlas polygons with legend colors; no axes, legend lower-left

use anyhow::{bail, Context, Result};
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

use crate::category::{SampleSizeCategory, ALL_CATEGORIES};
use crate::world::WorldRegion;

const BOUNDARY_COLOR: RGBColor = BLACK;

pub struct MapConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub legend_title: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            title: "Global Distribution of Total GWAS Sample Sizes by Country".to_string(),
            width: 2500,
            height: 1500,
            legend_title: "GWAS Sample Size".to_string(),
        }
    }
}

fn fill_color(category: SampleSizeCategory) -> RGBColor {
    let (r, g, b) = category.fill_rgb();
    RGBColor(r, g, b)
}

/// Render the choropleth to a PNG.
///
/// Regions missing from `categories` render as NoData. The legend lists all
/// eight classes in scale order regardless of which appear on the map.
pub fn render_map(
    regions: &[WorldRegion],
    categories: &BTreeMap<String, SampleSizeCategory>,
    config: &MapConfig,
    path: &Path,
) -> Result<()> {
    if regions.is_empty() {
        bail!("No atlas regions to plot");
    }

    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)
        .with_context(|| format!("Failed to initialize figure canvas: {}", path.display()))?;

    let titled = root.titled(&config.title, ("sans-serif", 48))?;

    // Plate carree: longitude/latitude straight onto the canvas. Antarctica
    // is already excluded, so the south edge stops at 60S.
    let mut chart = ChartBuilder::on(&titled)
        .margin(10)
        .build_cartesian_2d(-180.0f64..180.0f64, -60.0f64..85.0f64)?;

    for region in regions {
        let category = categories
            .get(&region.name)
            .copied()
            .unwrap_or(SampleSizeCategory::NoData);
        let fill = fill_color(category);

        for ring in &region.rings {
            chart.draw_series(std::iter::once(Polygon::new(ring.clone(), fill.filled())))?;
        }
    }

    // Boundaries on top so light fills stay separated
    for region in regions {
        for ring in &region.rings {
            let mut outline = ring.clone();
            if outline.first() != outline.last() {
                if let Some(&first) = outline.first() {
                    outline.push(first);
                }
            }
            chart.draw_series(std::iter::once(PathElement::new(outline, BOUNDARY_COLOR)))?;
        }
    }

    draw_legend(&titled, config)?;

    root.present()
        .with_context(|| format!("Failed to write figure: {}", path.display()))?;

    Ok(())
}

/// Categorical legend, lower-left, one swatch per scale class.
fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    config: &MapConfig,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let (_, area_height) = area.dim_in_pixel();

    let swatch = 28i32;
    let row_height = 38i32;
    let x0 = 40i32;
    let rows = ALL_CATEGORIES.len() as i32;
    let y0 = area_height as i32 - rows * row_height - 60;

    area.draw(&Text::new(
        config.legend_title.clone(),
        (x0, y0 - 44),
        ("sans-serif", 34).into_font(),
    ))
    .map_err(|e| anyhow::anyhow!("Failed to draw legend title: {}", e))?;

    for (row, category) in ALL_CATEGORIES.iter().enumerate() {
        let y = y0 + row as i32 * row_height;
        let fill = fill_color(*category);

        area.draw(&Rectangle::new(
            [(x0, y), (x0 + swatch, y + swatch)],
            fill.filled(),
        ))
        .map_err(|e| anyhow::anyhow!("Failed to draw legend swatch: {}", e))?;
        area.draw(&Rectangle::new(
            [(x0, y), (x0 + swatch, y + swatch)],
            BOUNDARY_COLOR,
        ))
        .map_err(|e| anyhow::anyhow!("Failed to draw legend swatch border: {}", e))?;

        area.draw(&Text::new(
            category.label().to_string(),
            (x0 + swatch + 14, y + 4),
            ("sans-serif", 28).into_font(),
        ))
        .map_err(|e| anyhow::anyhow!("Failed to draw legend label: {}", e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_rejects_empty_atlas() {
        let config = MapConfig::default();
        let categories = BTreeMap::new();
        assert!(render_map(&[], &categories, &config, Path::new("unused.png")).is_err());
    }

    #[test]
    fn test_fill_color_matches_scale() {
        assert_eq!(
            fill_color(SampleSizeCategory::OverOneMillion),
            RGBColor(0x04, 0x20, 0x37)
        );
        assert_eq!(fill_color(SampleSizeCategory::NoData), RGBColor(0xff, 0xff, 0xff));
    }
}
