//! Several galleries in one page, one tab each.

use std::collections::HashSet;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::html::{escape_html, fill, render_fragment, slugify, wrap_page, TABS_TEMPLATE};
use crate::error::{ErrorContext, GalleryError, GalleryResult};
use crate::services::gallery::Gallery;

/// A rendered gallery fragment and the tab it goes in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabPanel {
    pub title: String,
    /// Element id of the fragment; also namespaces its radio group.
    pub id: String,
    pub fragment: String,
}

impl TabPanel {
    /// Render `gallery` as the content of a tab titled `title`.
    pub fn from_gallery(gallery: &Gallery, title: &str) -> GalleryResult<Self> {
        let id = slugify(title);
        let fragment = render_fragment(gallery, &id)?;
        Ok(Self {
            title: title.to_string(),
            id,
            fragment,
        })
    }
}

/// Assemble tab panels into a standalone page. The first tab is shown on load.
pub fn render_tabs(page_title: &str, panels: &[TabPanel]) -> GalleryResult<String> {
    if panels.is_empty() {
        return Err(GalleryError::render_with_context(
            "no tab panels to render",
            ErrorContext::new("render_tabs"),
        ));
    }

    let mut seen = HashSet::new();
    for panel in panels {
        if !seen.insert(panel.id.as_str()) {
            return Err(GalleryError::render_with_context(
                format!("duplicate tab id '{}'", panel.id),
                ErrorContext::new("render_tabs")
                    .with_entity("tab")
                    .with_details(format!("title '{}'", panel.title)),
            ));
        }
    }

    let mut buttons = String::new();
    let mut bodies = String::new();
    for (n, panel) in panels.iter().enumerate() {
        let id = escape_html(&panel.id);
        let first = n == 0;
        let _ = writeln!(
            buttons,
            r#"    <button type="button" class="tab-button{}" data-tab="{}">{}</button>"#,
            if first { " active" } else { "" },
            id,
            escape_html(&panel.title)
        );
        let _ = writeln!(
            bodies,
            r#"  <div class="tab-panel" data-tab="{}"{}>"#,
            id,
            if first { "" } else { " hidden" }
        );
        bodies.push_str(&panel.fragment);
        bodies.push_str("\n  </div>\n");
    }

    let body = fill(
        TABS_TEMPLATE,
        &[
            ("tab_buttons", buttons.trim_end()),
            ("tab_panels", bodies.trim_end()),
        ],
    )
    .map_err(|e| e.with_operation("render_tabs"))?;

    wrap_page(page_title, &body)
}
