//! # Postage-stamp galleries
//!
//! Builds HTML galleries of sky-survey postage stamps for visual inspection of catalog
//! classifications.
//!
//! Each stamp is centered on a catalog target, shows remote cutout images of the survey
//! (one per image layer) and overlays a circle for every nearby catalog object, colored by
//! the veto category it belongs to. Checkboxes toggle categories and radio buttons switch
//! the image layer, all in the browser with no server round trip.
//!
//! ## Architecture
//!
//! - [`models`]: sky coordinates, catalog columns and id types
//! - [`services`]: projection, sampling, cutout URLs, cell assembly, controls
//! - [`render`]: HTML pages, tab pages and output modes
//! - [`io`]: JSON catalog loading
//! - [`config`]: TOML configuration with environment overrides
//! - [`error`]: error taxonomy
//!
//! ## Example
//!
//! ```no_run
//! use postage_gallery::{render_postages, GalleryConfig, OutputMode, RenderOutput};
//! use postage_gallery::io::load_catalog;
//!
//! # fn main() -> anyhow::Result<()> {
//! let loaded = load_catalog(std::path::Path::new("catalog.json"))?;
//! let config = GalleryConfig::from_default_location()?.with_env_overrides()?;
//! let mode = OutputMode::Inline { page_title: "veto check".to_string() };
//!
//! if let RenderOutput::Page(html) =
//!     render_postages(&loaded.catalog, &loaded.centers, &config, None, &mode)?
//! {
//!     println!("{} bytes", html.len());
//! }
//! # Ok(())
//! # }
//! ```

// GalleryError carries a context record on every variant
#![allow(clippy::result_large_err)]

pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod render;
pub mod services;

pub use config::GalleryConfig;
pub use error::{ErrorContext, GalleryError, GalleryResult};
pub use models::{Catalog, CoordinateSet, InfoFields, InfoValue, SkyCoordinate, VetoMasks};
pub use render::{render, render_tabs, OutputMode, RenderOutput, TabPanel};
pub use services::{build_gallery, Comparison, Gallery};

/// Build a gallery from `catalog` and render it according to `mode`.
pub fn render_postages(
    catalog: &Catalog,
    centers: &[usize],
    config: &GalleryConfig,
    comparison: Option<&Comparison>,
    mode: &OutputMode,
) -> GalleryResult<RenderOutput> {
    let gallery = build_gallery(catalog, centers, config, comparison)?;
    render(&gallery, mode)
}
