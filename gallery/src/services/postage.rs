//! Per-stamp assembly: geometry, neighbour selection and marker overlays.

use log::debug;
use serde::{Deserialize, Serialize};

use super::cutout::CutoutService;
use super::projection::{project, wrap_ra_offset_arcsec, ARCSEC_PER_DEGREE};
use crate::config::LayoutSettings;
use crate::define_id_type;
use crate::error::{ErrorContext, GalleryError, GalleryResult};
use crate::models::{Catalog, InfoFields, InfoValue, SkyCoordinate, TargetIndex};

define_id_type!(usize, CellId);

/// Size of every stamp in the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StampGeometry {
    /// Half the box side, in degrees.
    pub half_width_deg: f64,
    /// Full box side, in arcseconds.
    pub box_arcsec: f64,
    /// Box side in image pixels.
    pub size_px: u32,
    /// Arcseconds per pixel.
    pub pixel_scale: f64,
}

impl StampGeometry {
    /// Box side is `2 * scale_factor * radius_deg`, rounded to whole pixels.
    pub fn new(scale_factor: f64, radius_deg: f64, pixel_scale: f64) -> Self {
        let half_width_deg = scale_factor * radius_deg;
        let box_arcsec = 2.0 * half_width_deg * ARCSEC_PER_DEGREE;
        let size_px = (box_arcsec / pixel_scale).round() as u32;
        debug!(
            "Stamp geometry: box={}\" size={}px scale={}\"/px",
            box_arcsec, size_px, pixel_scale
        );
        Self {
            half_width_deg,
            box_arcsec,
            size_px,
            pixel_scale,
        }
    }

    pub fn from_layout(layout: &LayoutSettings, pixel_scale: f64) -> Self {
        Self::new(layout.scale_factor, layout.radius_deg, pixel_scale)
    }
}

/// Square sky window around a stamp center, shrunk by a border margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    center: SkyCoordinate,
    /// Usable half-width after removing the border, in degrees.
    inner_half_width_deg: f64,
}

impl BoundingBox {
    /// Window of `half_width_deg` on each side of `center`, minus `2 * half_width / border_divisor`.
    pub fn around(center: SkyCoordinate, half_width_deg: f64, border_divisor: f64) -> Self {
        let margin = 2.0 * half_width_deg / border_divisor;
        Self {
            center,
            inner_half_width_deg: half_width_deg - margin,
        }
    }

    pub fn center(&self) -> SkyCoordinate {
        self.center
    }

    pub fn inner_half_width_deg(&self) -> f64 {
        self.inner_half_width_deg
    }

    /// Strict containment. RA is compared as the wrapped offset from the center.
    pub fn contains(&self, coord: &SkyCoordinate) -> bool {
        let d_ra = wrap_ra_offset_arcsec((coord.ra_deg() - self.center.ra_deg()) * ARCSEC_PER_DEGREE)
            / ARCSEC_PER_DEGREE;
        let d_dec = coord.dec_deg() - self.center.dec_deg();
        d_ra.abs() < self.inner_half_width_deg && d_dec.abs() < self.inner_half_width_deg
    }
}

/// One catalog object drawn on a stamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub target: TargetIndex,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tooltip: Vec<(String, InfoValue)>,
}

/// All markers of one category on one stamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerOverlay {
    /// Position of the category in the veto list (also its checkbox index).
    pub category: usize,
    pub label: String,
    pub color: String,
    pub markers: Vec<Marker>,
}

/// One image layer of a stamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerImage {
    /// Position of the layer in the layer list (also its radio index).
    pub index: usize,
    pub name: String,
    pub cutout_url: String,
}

/// Everything needed to draw one gallery cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostageCell {
    pub id: CellId,
    pub target: TargetIndex,
    pub center: SkyCoordinate,
    pub size_px: u32,
    pub pixel_scale: f64,
    pub layers: Vec<LayerImage>,
    pub overlays: Vec<MarkerOverlay>,
    /// Opened when the stamp is clicked.
    pub viewer_url: String,
}

impl PostageCell {
    pub fn marker_count(&self) -> usize {
        self.overlays.iter().map(|o| o.markers.len()).sum()
    }

    pub fn overlay(&self, label: &str) -> Option<&MarkerOverlay> {
        self.overlays.iter().find(|o| o.label == label)
    }
}

/// Shared inputs for building the cells of one gallery.
#[derive(Debug, Clone)]
pub struct CellBuilder<'a> {
    pub catalog: &'a Catalog,
    pub geometry: StampGeometry,
    pub border_divisor: f64,
    pub cutouts: &'a CutoutService,
    pub layers: &'a [String],
    pub active_layer: usize,
    pub palette: &'a [String],
    pub tooltips: Option<&'a InfoFields>,
}

impl<'a> CellBuilder<'a> {
    /// Color of the category at `index`, cycling through the palette.
    pub fn color_for(&self, index: usize) -> String {
        if self.palette.is_empty() {
            return "green".to_string();
        }
        self.palette[index % self.palette.len()].clone()
    }

    /// Build the cell for the stamp centered on `target`.
    pub fn build(&self, id: CellId, target: TargetIndex) -> GalleryResult<PostageCell> {
        let center = self.catalog.coords.get(target.value()).ok_or_else(|| {
            GalleryError::validation_with_context(
                format!(
                    "target {} is out of range for a catalog of {} targets",
                    target,
                    self.catalog.len()
                ),
                ErrorContext::new("build_cell").with_entity("centers"),
            )
        })?;

        let window = BoundingBox::around(center, self.geometry.half_width_deg, self.border_divisor);
        let neighbours: Vec<usize> = self
            .catalog
            .coords
            .iter()
            .enumerate()
            .filter(|(_, coord)| window.contains(coord))
            .map(|(i, _)| i)
            .collect();

        let layers = self
            .layers
            .iter()
            .enumerate()
            .map(|(index, name)| LayerImage {
                index,
                name: name.clone(),
                cutout_url: self.cutouts.cutout_url(&center, name, self.geometry.size_px),
            })
            .collect();

        let overlays = self
            .catalog
            .veto
            .iter()
            .enumerate()
            .map(|(category, cat)| {
                let members: Vec<usize> = neighbours
                    .iter()
                    .copied()
                    .filter(|&i| cat.mask.get(i).copied().unwrap_or(false))
                    .collect();
                let pixels = project(
                    &center,
                    &self.catalog.coords.select(&members),
                    self.geometry.size_px,
                    self.geometry.pixel_scale,
                );
                let markers = members
                    .iter()
                    .zip(pixels.iter())
                    .map(|(&i, (x, y))| Marker {
                        target: TargetIndex::new(i),
                        x,
                        y,
                        tooltip: self
                            .tooltips
                            .map(|info| info.row(TargetIndex::new(i)))
                            .unwrap_or_default(),
                    })
                    .collect();
                MarkerOverlay {
                    category,
                    label: cat.label.clone(),
                    color: self.color_for(category),
                    markers,
                }
            })
            .collect();

        let viewer_layer = self
            .layers
            .get(self.active_layer)
            .or_else(|| self.layers.first())
            .map(String::as_str)
            .unwrap_or_default();

        Ok(PostageCell {
            id,
            target,
            center,
            size_px: self.geometry.size_px,
            pixel_scale: self.geometry.pixel_scale,
            layers,
            overlays,
            viewer_url: self.cutouts.viewer_url(&center, viewer_layer),
        })
    }
}
