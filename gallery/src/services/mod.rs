//! Service layer: the computations behind a gallery.
//!
//! Services are pure functions over caller-supplied data. They project sky positions onto
//! stamps, pick which targets to show, build the cutout URLs and assemble the per-cell
//! records that the [`crate::render`] layer turns into HTML.

pub mod comparison;
pub mod controls;
pub mod cutout;
pub mod gallery;
pub mod postage;
pub mod projection;
pub mod sampling;


pub use comparison::{ComparedField, Comparison};
pub use controls::{ControlPanel, ControlState, Visibility};
pub use cutout::CutoutService;
pub use gallery::{build_gallery, build_gallery_with_rng, Gallery};
pub use postage::{CellId, PostageCell, StampGeometry};
pub use projection::{project, PixelOffsets};
