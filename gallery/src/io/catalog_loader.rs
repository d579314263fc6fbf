use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::models::{Catalog, CoordinateSet, InfoFields, VetoMasks};
use crate::services::comparison::Comparison;

/// Raw JSON layout of a catalog file.
///
/// ```json
/// {
///   "ra": [150.0, 150.001],
///   "dec": [2.0, 2.001],
///   "veto": [{"label": "star", "mask": [true, false]}],
///   "info": [{"name": "rmag", "values": [18.1, 19.4]}],
///   "centers": [0]
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalog {
    ra: Vec<f64>,
    dec: Vec<f64>,
    veto: VetoMasks,
    #[serde(default)]
    info: Option<InfoFields>,
    /// Candidate stamp centers; every target when omitted.
    #[serde(default)]
    centers: Option<Vec<usize>>,
}

/// A validated catalog and its candidate stamp centers.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub centers: Vec<usize>,
}

/// Load a catalog JSON file.
pub fn load_catalog(path: &Path) -> Result<LoadedCatalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content)
        .with_context(|| format!("Failed to load catalog from {}", path.display()))
}

/// Parse a catalog from a JSON string.
pub fn parse_catalog_str(json_str: &str) -> Result<LoadedCatalog> {
    let raw: RawCatalog = serde_json::from_str(json_str).with_context(|| {
        let preview = if json_str.len() > 200 {
            let end = (0..=200).rev().find(|&i| json_str.is_char_boundary(i)).unwrap_or(0);
            format!("{}...", &json_str[..end])
        } else {
            json_str.to_string()
        };
        format!("Invalid catalog JSON. Preview: {}", preview)
    })?;

    let coords = CoordinateSet::new(raw.ra, raw.dec)?;
    let catalog = Catalog::new(coords, raw.veto, raw.info)?;

    let centers = match raw.centers {
        Some(centers) => {
            if let Some(bad) = centers.iter().find(|&&i| i >= catalog.len()) {
                bail!(
                    "Center index {} is out of range for a catalog of {} targets",
                    bad,
                    catalog.len()
                );
            }
            centers
        }
        None => (0..catalog.len()).collect(),
    };

    log::debug!(
        "Parsed catalog: {} targets, {} veto categories, {} centers",
        catalog.len(),
        catalog.veto.len(),
        centers.len()
    );

    Ok(LoadedCatalog { catalog, centers })
}

/// Load comparison columns from a JSON file shaped like a serialized [`Comparison`].
pub fn load_comparison(path: &Path) -> Result<Comparison> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read comparison file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid comparison JSON in {}", path.display()))
}
