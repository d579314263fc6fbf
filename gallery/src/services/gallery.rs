//! Gallery orchestration: sample centers, build one cell per center, attach controls.

use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::comparison::Comparison;
use super::controls::ControlPanel;
use super::cutout::CutoutService;
use super::postage::{CellBuilder, CellId, PostageCell, StampGeometry};
use super::sampling::{make_rng, sample_centers};
use crate::config::GalleryConfig;
use crate::error::{ErrorContext, GalleryError, GalleryResult};
use crate::models::{Catalog, InfoFields, TargetIndex};

const DEFAULT_TITLE: &str = "--";
const DEFAULT_TEXT: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
}

/// How cells are drawn on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayOptions {
    pub cell_px: u32,
    pub marker_size: f64,
    pub line_width: f64,
    pub crosshair: bool,
}

/// A fully assembled gallery, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gallery {
    pub title: String,
    pub main_text: String,
    pub buttons_text: String,
    pub grid: GridShape,
    pub geometry: StampGeometry,
    pub display: DisplayOptions,
    pub cells: Vec<PostageCell>,
    pub controls: ControlPanel,
}

impl Gallery {
    pub fn marker_count(&self) -> usize {
        self.cells.iter().map(PostageCell::marker_count).sum()
    }
}

/// Build a gallery, sampling centers with the RNG described by `config.seed`.
pub fn build_gallery(
    catalog: &Catalog,
    centers: &[usize],
    config: &GalleryConfig,
    comparison: Option<&Comparison>,
) -> GalleryResult<Gallery> {
    let mut rng = make_rng(config.seed);
    build_gallery_with_rng(catalog, centers, config, comparison, &mut rng)
}

/// Build a gallery with a caller-provided RNG.
pub fn build_gallery_with_rng<R: Rng + ?Sized>(
    catalog: &Catalog,
    centers: &[usize],
    config: &GalleryConfig,
    comparison: Option<&Comparison>,
    rng: &mut R,
) -> GalleryResult<Gallery> {
    config.validate()?;
    catalog
        .validate()
        .map_err(|e| e.with_operation("build_gallery"))?;

    let tooltips = resolve_tooltips(catalog, comparison)?;

    let categories = catalog.veto.len();
    let palette = &config.overlay.palette;
    if categories > palette.len() {
        warn!(
            "{} veto categories but only {} palette colors; colors will repeat",
            categories,
            palette.len()
        );
    }

    let geometry = StampGeometry::from_layout(&config.layout, config.cutout.pixel_scale);
    if geometry.size_px == 0 {
        return Err(GalleryError::configuration_with_context(
            format!(
                "stamp of {}\" is smaller than one {}\" pixel",
                geometry.box_arcsec, geometry.pixel_scale
            ),
            ErrorContext::new("build_gallery").with_entity("layout"),
        ));
    }

    let cutouts = CutoutService::from_settings(&config.cutout);
    let picked = sample_centers(centers, config.layout.cell_count(), catalog.len(), rng)?;

    let builder = CellBuilder {
        catalog,
        geometry,
        border_divisor: config.layout.border_divisor,
        cutouts: &cutouts,
        layers: &config.cutout.layers,
        active_layer: config.cutout.active_layer,
        palette,
        tooltips: tooltips.as_ref(),
    };

    let cells = picked
        .iter()
        .enumerate()
        .map(|(n, &target)| builder.build(CellId::new(n), TargetIndex::new(target)))
        .collect::<GalleryResult<Vec<_>>>()?;

    let colors: Vec<String> = (0..categories).map(|i| builder.color_for(i)).collect();
    let controls = ControlPanel::new(
        &cells,
        &catalog.veto.labels(),
        &colors,
        &config.cutout.layers,
        config.cutout.active_layer,
    )?;

    let gallery = Gallery {
        title: config
            .text
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        main_text: config
            .text
            .main_text
            .clone()
            .unwrap_or_else(|| DEFAULT_TEXT.to_string()),
        buttons_text: config
            .text
            .buttons_text
            .clone()
            .unwrap_or_else(|| DEFAULT_TEXT.to_string()),
        grid: GridShape {
            rows: config.layout.rows,
            cols: config.layout.cols,
        },
        geometry,
        display: DisplayOptions {
            cell_px: config.layout.cell_display_px,
            marker_size: config.overlay.marker_size,
            line_width: config.overlay.line_width,
            crosshair: config.overlay.crosshair,
        },
        cells,
        controls,
    };

    info!(
        "Built gallery '{}': {} cells, {} markers, {} layers",
        gallery.title,
        gallery.cells.len(),
        gallery.marker_count(),
        config.cutout.layers.len()
    );
    Ok(gallery)
}

/// Comparison tooltips replace the catalog's info fields when given.
fn resolve_tooltips(
    catalog: &Catalog,
    comparison: Option<&Comparison>,
) -> GalleryResult<Option<InfoFields>> {
    let Some(comparison) = comparison else {
        return Ok(catalog.info.clone());
    };

    let fields = comparison.tooltip_fields()?;
    for field in fields.iter() {
        if field.values.len() != catalog.len() {
            return Err(GalleryError::validation_with_context(
                format!(
                    "comparison field '{}' has {} entries, expected {}",
                    field.name,
                    field.values.len(),
                    catalog.len()
                ),
                ErrorContext::new("build_gallery").with_entity("comparison"),
            ));
        }
    }
    Ok(Some(fields))
}
