// 🌍 World Atlas - Country polygons and the category join
// Natural Earth GeoJSON in, one legend class per region out

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

use crate::category::{categorize, SampleSizeCategory};

/// One country polygon from the reference atlas. The join only ever touches
/// the name; continent and rings exist for filtering and rendering.
#[derive(Debug, Clone)]
pub struct WorldRegion {
    pub name: String,
    pub continent: String,
    /// Closed rings of (longitude, latitude) points. MultiPolygon countries
    /// contribute several rings.
    pub rings: Vec<Vec<(f64, f64)>>,
}

// ============================================================================
// ATLAS LOADING
// ============================================================================

/// Load the Natural Earth low-resolution countries GeoJSON.
///
/// Antarctica is excluded from the join universe. A feature missing its
/// name, continent, or geometry is a malformed atlas and fails the run.
pub fn load_world(path: &Path) -> Result<Vec<WorldRegion>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open world atlas: {}", path.display()))?;

    let reader = BufReader::new(file);
    let json: Value = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse GeoJSON from {}", path.display()))?;

    let features = json
        .get("features")
        .and_then(|f| f.as_array())
        .ok_or_else(|| anyhow!("GeoJSON missing 'features' array"))?;

    let mut regions = Vec::with_capacity(features.len());

    for feature in features {
        let properties = feature
            .get("properties")
            .ok_or_else(|| anyhow!("GeoJSON feature missing 'properties'"))?;

        let name = properties
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow!("GeoJSON feature missing 'name' property"))?
            .to_string();

        let continent = properties
            .get("continent")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow!("Feature '{}' missing 'continent' property", name))?
            .to_string();

        if continent == "Antarctica" {
            continue;
        }

        let geometry = feature
            .get("geometry")
            .ok_or_else(|| anyhow!("Feature '{}' missing geometry", name))?;

        let rings = parse_rings(geometry)
            .with_context(|| format!("Bad geometry for feature '{}'", name))?;

        regions.push(WorldRegion {
            name,
            continent,
            rings,
        });
    }

    debug!(regions = regions.len(), "loaded world atlas");
    Ok(regions)
}

/// Flatten a GeoJSON Polygon or MultiPolygon into its rings.
fn parse_rings(geometry: &Value) -> Result<Vec<Vec<(f64, f64)>>> {
    let geometry_type = geometry
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow!("Geometry missing 'type'"))?;

    let coordinates = geometry
        .get("coordinates")
        .ok_or_else(|| anyhow!("Geometry missing 'coordinates'"))?;

    match geometry_type {
        "Polygon" => polygon_rings(coordinates),
        "MultiPolygon" => {
            let polygons = coordinates
                .as_array()
                .ok_or_else(|| anyhow!("MultiPolygon coordinates not an array"))?;

            let mut rings = Vec::new();
            for polygon in polygons {
                rings.extend(polygon_rings(polygon)?);
            }
            Ok(rings)
        }
        other => Err(anyhow!("Unsupported geometry type '{}'", other)),
    }
}

fn polygon_rings(polygon: &Value) -> Result<Vec<Vec<(f64, f64)>>> {
    let rings = polygon
        .as_array()
        .ok_or_else(|| anyhow!("Polygon coordinates not an array"))?;

    rings
        .iter()
        .map(|ring| {
            let points = ring
                .as_array()
                .ok_or_else(|| anyhow!("Polygon ring not an array"))?;

            points
                .iter()
                .map(|point| {
                    let pair = point
                        .as_array()
                        .filter(|p| p.len() >= 2)
                        .ok_or_else(|| anyhow!("Ring point not a [lon, lat] pair"))?;

                    let lon = pair[0].as_f64().ok_or_else(|| anyhow!("Non-numeric longitude"))?;
                    let lat = pair[1].as_f64().ok_or_else(|| anyhow!("Non-numeric latitude"))?;
                    Ok((lon, lat))
                })
                .collect()
        })
        .collect()
}

// ============================================================================
// JOIN
// ============================================================================

/// Left join of bucketed totals onto the atlas by exact region name.
///
/// Every region is present in the result; regions with no aggregate get an
/// explicit NoData, never a missing key. Name mismatches (including the
/// United States spelling) are the normalizer's job, not the join's.
pub fn join(
    totals: &BTreeMap<String, f64>,
    regions: &[WorldRegion],
) -> BTreeMap<String, SampleSizeCategory> {
    regions
        .iter()
        .map(|region| {
            let category = categorize(totals.get(&region.name).copied());
            (region.name.clone(), category)
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
