//! Gallery configuration file support.
//!
//! Settings are read from a TOML file (every key optional) and can be adjusted through
//! environment variables:
//!
//! - `POSTAGE_CUTOUT_BASE_URL`: host of the cutout service (default `http://legacysurvey.org`)
//! - `POSTAGE_PIXEL_SCALE`: arcseconds per pixel (default 0.262)
//! - `POSTAGE_SEED`: seed for the center sampling RNG
//!
//! ```toml
//! seed = 42
//!
//! [layout]
//! rows = 3
//! cols = 4
//!
//! [cutout]
//! layers = ["ls-dr9", "ls-dr9-model", "ls-dr9-resid"]
//! active_layer = 0
//!
//! [text]
//! title = "Bright star halos"
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ErrorContext, GalleryError, GalleryResult};

pub const ENV_CUTOUT_BASE_URL: &str = "POSTAGE_CUTOUT_BASE_URL";
pub const ENV_PIXEL_SCALE: &str = "POSTAGE_PIXEL_SCALE";
pub const ENV_SEED: &str = "POSTAGE_SEED";

/// Full gallery configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryConfig {
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub cutout: CutoutSettings,
    #[serde(default)]
    pub overlay: OverlaySettings,
    #[serde(default)]
    pub text: TextSettings,
    /// Seed for the center sampling; random when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Grid shape and stamp geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    #[serde(default = "default_rows")]
    pub rows: usize,
    #[serde(default = "default_cols")]
    pub cols: usize,
    /// Box half-width is `scale_factor * radius_deg`.
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f64,
    #[serde(default = "default_radius_deg")]
    pub radius_deg: f64,
    /// Neighbours closer to the box edge than `width / border_divisor` are dropped.
    #[serde(default = "default_border_divisor")]
    pub border_divisor: f64,
    /// On-page width and height of a grid cell in CSS pixels.
    #[serde(default = "default_cell_display_px")]
    pub cell_display_px: u32,
}

/// Remote cutout service and image layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutoutSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Arcseconds per pixel.
    #[serde(default = "default_pixel_scale")]
    pub pixel_scale: f64,
    #[serde(default = "default_layers")]
    pub layers: Vec<String>,
    /// Layer selected when the page opens.
    #[serde(default = "default_active_layer")]
    pub active_layer: usize,
}

/// Marker appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlaySettings {
    /// Colors assigned to categories in order; reused cyclically.
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
    /// Circle diameter in display pixels.
    #[serde(default = "default_marker_size")]
    pub marker_size: f64,
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    #[serde(default = "default_crosshair")]
    pub crosshair: bool,
}

/// Page texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSettings {
    #[serde(default = "default_page_title")]
    pub page_title: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub main_text: Option<String>,
    #[serde(default)]
    pub buttons_text: Option<String>,
}

fn default_rows() -> usize {
    2
}

fn default_cols() -> usize {
    2
}

fn default_scale_factor() -> f64 {
    4.0
}

fn default_radius_deg() -> f64 {
    4.0 / 3600.0
}

fn default_border_divisor() -> f64 {
    40.0
}

fn default_cell_display_px() -> u32 {
    256
}

fn default_base_url() -> String {
    "http://legacysurvey.org".to_string()
}

fn default_pixel_scale() -> f64 {
    0.262
}

fn default_layers() -> Vec<String> {
    [
        "dr9f-south",
        "dr9f-south-model",
        "dr9f-south-resid",
        "dr9g-south",
        "dr9g-south-model",
        "dr9g-south-resid",
        "dr9f-north",
        "dr9f-north-model",
        "dr9f-north-resid",
        "dr9g-north",
        "dr9g-north-model",
        "dr9g-north-resid",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_active_layer() -> usize {
    3
}

fn default_palette() -> Vec<String> {
    ["green", "red", "blue", "cyan", "yellow"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_marker_size() -> f64 {
    15.0
}

fn default_line_width() -> f64 {
    3.0
}

fn default_crosshair() -> bool {
    true
}

fn default_page_title() -> String {
    "page".to_string()
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            scale_factor: default_scale_factor(),
            radius_deg: default_radius_deg(),
            border_divisor: default_border_divisor(),
            cell_display_px: default_cell_display_px(),
        }
    }
}

impl Default for CutoutSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            pixel_scale: default_pixel_scale(),
            layers: default_layers(),
            active_layer: default_active_layer(),
        }
    }
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            marker_size: default_marker_size(),
            line_width: default_line_width(),
            crosshair: default_crosshair(),
        }
    }
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            page_title: default_page_title(),
            title: None,
            main_text: None,
            buttons_text: None,
        }
    }
}

impl LayoutSettings {
    /// Number of stamps in the grid, `None` when `rows * cols` does not fit in `usize`.
    pub fn checked_cell_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// Number of stamps in the grid. Saturates; [`GalleryConfig::validate`] rejects overflow.
    pub fn cell_count(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }
}

impl GalleryConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(GalleryConfig)` if the file was read, parsed and validated
    /// * `Err(GalleryError::ConfigurationError)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> GalleryResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            GalleryError::configuration_with_context(
                format!("Failed to read config file: {}", e),
                ErrorContext::new("load_config").with_entity(path.display().to_string()),
            )
        })?;

        Self::from_toml_str(&content).map_err(|e| e.with_operation("load_config"))
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> GalleryResult<Self> {
        let config: GalleryConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `gallery.toml` in:
    /// 1. Current directory
    /// 2. `gallery/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> GalleryResult<Self> {
        let search_paths = [
            PathBuf::from("gallery.toml"),
            PathBuf::from("gallery/gallery.toml"),
            PathBuf::from("../gallery.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(GalleryError::configuration_with_context(
            "No gallery.toml found in standard locations",
            ErrorContext::new("load_config"),
        ))
    }

    /// Apply `POSTAGE_*` environment overrides on top of this configuration.
    pub fn with_env_overrides(mut self) -> GalleryResult<Self> {
        if let Ok(base_url) = env::var(ENV_CUTOUT_BASE_URL) {
            self.cutout.base_url = base_url;
        }

        if let Ok(raw) = env::var(ENV_PIXEL_SCALE) {
            self.cutout.pixel_scale = raw.parse().map_err(|_| {
                GalleryError::configuration_with_context(
                    format!("{} must be a number, got '{}'", ENV_PIXEL_SCALE, raw),
                    ErrorContext::new("env_overrides").with_entity(ENV_PIXEL_SCALE),
                )
            })?;
        }

        if let Ok(raw) = env::var(ENV_SEED) {
            let seed = raw.parse().map_err(|_| {
                GalleryError::configuration_with_context(
                    format!("{} must be an unsigned integer, got '{}'", ENV_SEED, raw),
                    ErrorContext::new("env_overrides").with_entity(ENV_SEED),
                )
            })?;
            self.seed = Some(seed);
        }

        self.validate()?;
        Ok(self)
    }

    /// Check that the settings describe a drawable gallery.
    pub fn validate(&self) -> GalleryResult<()> {
        let fail = |entity: &str, message: String| {
            Err(GalleryError::configuration_with_context(
                message,
                ErrorContext::new("validate_config").with_entity(entity),
            ))
        };

        if self.layout.rows == 0 || self.layout.cols == 0 {
            return fail(
                "layout",
                format!(
                    "grid must have at least one row and column, got {}x{}",
                    self.layout.rows, self.layout.cols
                ),
            );
        }
        if self.layout.checked_cell_count().is_none() {
            return fail(
                "layout",
                format!(
                    "grid of {}x{} cells is too large",
                    self.layout.rows, self.layout.cols
                ),
            );
        }
        if !(self.layout.scale_factor > 0.0) {
            return fail("layout", "scale_factor must be positive".to_string());
        }
        if !(self.layout.radius_deg > 0.0) {
            return fail("layout", "radius_deg must be positive".to_string());
        }
        if !(self.layout.border_divisor > 0.0) {
            return fail("layout", "border_divisor must be positive".to_string());
        }
        if self.layout.cell_display_px == 0 {
            return fail("layout", "cell_display_px must be positive".to_string());
        }
        if !(self.cutout.pixel_scale > 0.0) {
            return fail("cutout", "pixel_scale must be positive".to_string());
        }
        if self.cutout.layers.is_empty() {
            return fail("cutout", "at least one image layer is required".to_string());
        }
        if self.cutout.active_layer >= self.cutout.layers.len() {
            return fail(
                "cutout",
                format!(
                    "active_layer {} is out of range for {} layers",
                    self.cutout.active_layer,
                    self.cutout.layers.len()
                ),
            );
        }
        if self.overlay.palette.is_empty() {
            return fail("overlay", "palette must contain at least one color".to_string());
        }

        Ok(())
    }
}
