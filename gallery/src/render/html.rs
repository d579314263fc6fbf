//! HTML rendering of a [`Gallery`].
//!
//! Templates live in `templates/` and are compiled into the crate. Placeholders have the
//! form `{{name}}` and are substituted in a single pass, so substituted text is never
//! re-scanned for placeholders.

use std::fmt::Write as _;

use crate::error::{ErrorContext, GalleryError, GalleryResult};
use crate::services::gallery::{DisplayOptions, Gallery};
use crate::services::postage::PostageCell;

pub(crate) const PAGE_TEMPLATE: &str = include_str!("../../templates/page.html");
pub(crate) const FRAGMENT_TEMPLATE: &str = include_str!("../../templates/fragment.html");
pub(crate) const TABS_TEMPLATE: &str = include_str!("../../templates/tabs.html");
pub(crate) const STYLE: &str = include_str!("../../templates/gallery.css");
pub(crate) const SCRIPT: &str = include_str!("../../templates/gallery.js");

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Substitute `{{name}}` placeholders from `values`.
///
/// Unknown or unterminated placeholders are errors.
pub fn fill(template: &str, values: &[(&str, &str)]) -> GalleryResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find("}}").ok_or_else(|| {
            GalleryError::render_with_context(
                "unterminated template placeholder",
                ErrorContext::new("fill_template"),
            )
        })?;
        let key = after[..end].trim();
        let value = values
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .ok_or_else(|| {
                GalleryError::render_with_context(
                    format!("no value for template placeholder '{}'", key),
                    ErrorContext::new("fill_template").with_entity(key),
                )
            })?;
        out.push_str(value);
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    Ok(out)
}

/// JSON safe to embed inside a `<script>` element.
fn script_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

/// Turn free text into an element id: lowercase alphanumerics separated by dashes.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "gallery".to_string()
    } else {
        slug
    }
}

fn layer_radios(gallery: &Gallery, gallery_id: &str) -> String {
    let mut out = String::new();
    for option in &gallery.controls.layers {
        let checked = if option.index == gallery.controls.active_layer {
            " checked"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            r#"        <label><input type="radio" name="{}-layer" value="{}"{}> {}</label>"#,
            escape_html(gallery_id),
            option.index,
            checked,
            escape_html(&option.name)
        );
    }
    out
}

fn category_checkboxes(gallery: &Gallery) -> String {
    let mut out = String::new();
    for toggle in &gallery.controls.categories {
        let checked = if toggle.checked { " checked" } else { "" };
        let _ = writeln!(
            out,
            r#"        <label style="color: {}"><input type="checkbox" value="{}"{}> {}</label>"#,
            escape_html(&toggle.color),
            toggle.index,
            checked,
            escape_html(&toggle.label)
        );
    }
    out
}

/// Markup of one stamp.
///
/// The SVG overlay uses image pixels as user units, with `y` flipped so that the plot
/// coordinates of the markers (y up) land on the right image rows (y down).
pub fn render_cell(cell: &PostageCell, display: &DisplayOptions, active_layer: usize) -> String {
    let size = cell.size_px as f64;
    let cell_px = display.cell_px;
    let px_per_display = size / cell_px as f64;
    let radius = display.marker_size / 2.0 * px_per_display;

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"      <figure class="postage-cell" data-cell="{}" data-target="{}" style="width: {}px; height: {}px;">"#,
        cell.id, cell.target, cell_px, cell_px
    );
    let _ = writeln!(
        out,
        r#"        <a class="postage-link" href="{}" target="_blank" rel="noopener">"#,
        escape_html(&cell.viewer_url)
    );

    for layer in &cell.layers {
        let hidden = if layer.index == active_layer { "" } else { " hidden" };
        let _ = writeln!(
            out,
            r#"          <img class="postage-layer" data-layer="{}" src="{}" alt="{}" width="{}" height="{}" loading="lazy"{}>"#,
            layer.index,
            escape_html(&layer.cutout_url),
            escape_html(&layer.name),
            cell_px,
            cell_px,
            hidden
        );
    }

    let _ = writeln!(
        out,
        r#"          <svg class="postage-overlay" viewBox="0 0 {} {}" preserveAspectRatio="none" xmlns="http://www.w3.org/2000/svg">"#,
        cell.size_px, cell.size_px
    );

    if display.crosshair {
        let mid = size / 2.0;
        let _ = writeln!(
            out,
            r#"            <g class="crosshair"><line x1="{mid:.3}" y1="0" x2="{mid:.3}" y2="{size:.3}" vector-effect="non-scaling-stroke" stroke-width="1"/><line x1="0" y1="{mid:.3}" x2="{size:.3}" y2="{mid:.3}" vector-effect="non-scaling-stroke" stroke-width="1"/></g>"#,
        );
    }

    for overlay in &cell.overlays {
        let _ = writeln!(
            out,
            r#"            <g class="postage-markers" data-category="{}" data-label="{}" stroke="{}" stroke-width="{}" vector-effect="non-scaling-stroke">"#,
            overlay.category,
            escape_html(&overlay.label),
            escape_html(&overlay.color),
            display.line_width
        );
        for marker in &overlay.markers {
            let cy = size - marker.y;
            if marker.tooltip.is_empty() {
                let _ = writeln!(
                    out,
                    r#"              <circle cx="{:.3}" cy="{:.3}" r="{:.3}" vector-effect="non-scaling-stroke"/>"#,
                    marker.x, cy, radius
                );
            } else {
                let title = marker
                    .tooltip
                    .iter()
                    .map(|(name, value)| format!("{}: {}", name, value))
                    .collect::<Vec<_>>()
                    .join("\n");
                let _ = writeln!(
                    out,
                    r#"              <circle cx="{:.3}" cy="{:.3}" r="{:.3}" vector-effect="non-scaling-stroke"><title>{}</title></circle>"#,
                    marker.x,
                    cy,
                    radius,
                    escape_html(&title)
                );
            }
        }
        out.push_str("            </g>\n");
    }

    out.push_str("          </svg>\n");
    out.push_str("        </a>\n");
    out.push_str("      </figure>\n");
    out
}

/// Embeddable markup for one gallery: headings, controls, grid and serialized control state.
pub fn render_fragment(gallery: &Gallery, gallery_id: &str) -> GalleryResult<String> {
    let cells: String = gallery
        .cells
        .iter()
        .map(|cell| render_cell(cell, &gallery.display, gallery.controls.active_layer))
        .collect();

    let state_json = script_json(&gallery.controls.to_json()?);
    let cols = gallery.grid.cols.to_string();
    let cell_px = gallery.display.cell_px.to_string();
    let radios = layer_radios(gallery, gallery_id);
    let gallery_id = escape_html(gallery_id);
    let title = escape_html(&gallery.title);
    let main_text = escape_html(&gallery.main_text);
    let buttons_text = escape_html(&gallery.buttons_text);
    let checkboxes = category_checkboxes(gallery);

    fill(
        FRAGMENT_TEMPLATE,
        &[
            ("gallery_id", &gallery_id),
            ("title", &title),
            ("main_text", &main_text),
            ("buttons_text", &buttons_text),
            ("layer_radios", radios.trim_end()),
            ("category_checkboxes", checkboxes.trim_end()),
            ("cols", &cols),
            ("cell_px", &cell_px),
            ("cells", cells.trim_end()),
            ("state_json", &state_json),
        ],
    )
    .map_err(|e| e.with_operation("render_fragment"))
}

/// Wrap body markup in a standalone document with the stylesheet and script inlined.
pub fn wrap_page(page_title: &str, body: &str) -> GalleryResult<String> {
    let page_title = escape_html(page_title);
    fill(
        PAGE_TEMPLATE,
        &[
            ("page_title", &page_title),
            ("style", STYLE.trim_end()),
            ("body", body),
            ("script", SCRIPT.trim_end()),
        ],
    )
    .map_err(|e| e.with_operation("render_page"))
}

/// Standalone HTML document for one gallery.
pub fn render_page(gallery: &Gallery, page_title: &str) -> GalleryResult<String> {
    let body = render_fragment(gallery, &slugify(&gallery.title))?;
    wrap_page(page_title, &body)
}
