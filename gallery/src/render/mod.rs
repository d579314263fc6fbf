//! Turning a [`Gallery`] into HTML: a saved page, an inline page, or a tab panel.

pub mod html;
pub mod output;
pub mod tabs;

use std::path::PathBuf;

use crate::error::GalleryResult;
use crate::services::gallery::Gallery;

pub use html::{escape_html, render_fragment, render_page, slugify};
pub use output::write_page;
pub use tabs::{render_tabs, TabPanel};

/// Where a rendered gallery goes.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputMode {
    /// Standalone page written to `path` (`.html` appended when missing).
    File { path: PathBuf, page_title: String },
    /// Standalone page returned as a string, for embedding in a notebook or response.
    Inline { page_title: String },
    /// Fragment for a tab of a multi-gallery page, see [`render_tabs`].
    Tab { title: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutput {
    Saved(PathBuf),
    Page(String),
    Tab(TabPanel),
}

pub fn render(gallery: &Gallery, mode: &OutputMode) -> GalleryResult<RenderOutput> {
    match mode {
        OutputMode::File { path, page_title } => {
            let html = render_page(gallery, page_title)?;
            Ok(RenderOutput::Saved(write_page(path, &html)?))
        }
        OutputMode::Inline { page_title } => {
            Ok(RenderOutput::Page(render_page(gallery, page_title)?))
        }
        OutputMode::Tab { title } => Ok(RenderOutput::Tab(TabPanel::from_gallery(gallery, title)?)),
    }
}
