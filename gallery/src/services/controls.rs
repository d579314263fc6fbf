//! Browser controls as data.
//!
//! The page carries a serialized [`ControlPanel`]; the bundled script reads it and applies
//! the same rule as [`ControlPanel::resolve`]: an overlay is shown iff its category checkbox
//! is checked, an image iff its layer is the selected radio option.

use serde::{Deserialize, Serialize};

use super::postage::{CellId, PostageCell};
use crate::error::{ErrorContext, GalleryError, GalleryResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryToggle {
    pub index: usize,
    pub label: String,
    pub color: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerOption {
    pub index: usize,
    pub name: String,
}

/// Checkbox group, radio group and the cells they drive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPanel {
    pub categories: Vec<CategoryToggle>,
    pub layers: Vec<LayerOption>,
    pub active_layer: usize,
    pub cells: Vec<CellId>,
}

/// A snapshot of the widgets: which checkboxes are ticked and which layer is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    pub checked: Vec<bool>,
    pub layer: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverlayVisibility {
    pub cell: CellId,
    pub category: usize,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayerVisibility {
    pub cell: CellId,
    pub layer: usize,
    pub visible: bool,
}

/// Visibility of every overlay and image on the page for one [`ControlState`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Visibility {
    pub overlays: Vec<OverlayVisibility>,
    pub layers: Vec<LayerVisibility>,
}

impl Visibility {
    pub fn overlay_visible(&self, cell: CellId, category: usize) -> Option<bool> {
        self.overlays
            .iter()
            .find(|o| o.cell == cell && o.category == category)
            .map(|o| o.visible)
    }

    pub fn layer_visible(&self, cell: CellId, layer: usize) -> Option<bool> {
        self.layers
            .iter()
            .find(|l| l.cell == cell && l.layer == layer)
            .map(|l| l.visible)
    }
}

impl ControlPanel {
    /// Controls for `cells`, all categories checked and `active_layer` selected.
    pub fn new(
        cells: &[PostageCell],
        labels: &[&str],
        colors: &[String],
        layers: &[String],
        active_layer: usize,
    ) -> GalleryResult<Self> {
        if active_layer >= layers.len() {
            return Err(GalleryError::configuration_with_context(
                format!(
                    "active layer {} is out of range for {} layers",
                    active_layer,
                    layers.len()
                ),
                ErrorContext::new("build_controls").with_entity("layers"),
            ));
        }

        let categories = labels
            .iter()
            .enumerate()
            .map(|(index, label)| CategoryToggle {
                index,
                label: label.to_string(),
                color: colors.get(index).cloned().unwrap_or_default(),
                checked: true,
            })
            .collect();

        let layers = layers
            .iter()
            .enumerate()
            .map(|(index, name)| LayerOption {
                index,
                name: name.clone(),
            })
            .collect();

        Ok(Self {
            categories,
            layers,
            active_layer,
            cells: cells.iter().map(|c| c.id).collect(),
        })
    }

    /// The state the page opens in.
    pub fn initial_state(&self) -> ControlState {
        ControlState {
            checked: self.categories.iter().map(|c| c.checked).collect(),
            layer: self.active_layer,
        }
    }

    /// Visibility of every (cell, category) overlay and (cell, layer) image under `state`.
    pub fn resolve(&self, state: &ControlState) -> GalleryResult<Visibility> {
        if state.checked.len() != self.categories.len() {
            return Err(GalleryError::validation_with_context(
                format!(
                    "control state has {} checkboxes, panel has {}",
                    state.checked.len(),
                    self.categories.len()
                ),
                ErrorContext::new("resolve_controls").with_entity("checked"),
            ));
        }
        if state.layer >= self.layers.len() {
            return Err(GalleryError::validation_with_context(
                format!(
                    "selected layer {} is out of range for {} layers",
                    state.layer,
                    self.layers.len()
                ),
                ErrorContext::new("resolve_controls").with_entity("layer"),
            ));
        }

        let mut visibility = Visibility::default();
        for &cell in &self.cells {
            for (category, &checked) in state.checked.iter().enumerate() {
                visibility.overlays.push(OverlayVisibility {
                    cell,
                    category,
                    visible: checked,
                });
            }
            for option in &self.layers {
                visibility.layers.push(LayerVisibility {
                    cell,
                    layer: option.index,
                    visible: option.index == state.layer,
                });
            }
        }
        Ok(visibility)
    }

    pub fn to_json(&self) -> GalleryResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SkyCoordinate, TargetIndex};

    fn cell(id: usize) -> PostageCell {
        PostageCell {
            id: CellId::new(id),
            target: TargetIndex::new(id),
            center: SkyCoordinate::new(0.0, 0.0),
            size_px: 10,
            pixel_scale: 0.262,
            layers: vec![],
            overlays: vec![],
            viewer_url: String::new(),
        }
    }

    fn panel() -> ControlPanel {
        ControlPanel::new(
            &[cell(0), cell(1)],
            &["star", "galaxy", "artifact"],
            &["green".to_string(), "red".to_string(), "blue".to_string()],
            &["raw".to_string(), "model".to_string(), "resid".to_string()],
            1,
        )
        .unwrap()
    }

    #[test]
    fn test_initial_state_checks_everything() {
        let panel = panel();
        let state = panel.initial_state();
        assert_eq!(state.checked, vec![true, true, true]);
        assert_eq!(state.layer, 1);
    }

    #[test]
    fn test_resolve_unchecked_category_hidden_everywhere() {
        let panel = panel();
        let state = ControlState {
            checked: vec![true, false, true],
            layer: 2,
        };
        let vis = panel.resolve(&state).unwrap();

        assert_eq!(vis.overlays.len(), 6);
        assert_eq!(vis.layers.len(), 6);
        for id in [0, 1] {
            let cell = CellId::new(id);
            assert_eq!(vis.overlay_visible(cell, 0), Some(true));
            assert_eq!(vis.overlay_visible(cell, 1), Some(false));
            assert_eq!(vis.overlay_visible(cell, 2), Some(true));
            assert_eq!(vis.layer_visible(cell, 0), Some(false));
            assert_eq!(vis.layer_visible(cell, 1), Some(false));
            assert_eq!(vis.layer_visible(cell, 2), Some(true));
        }
        assert_eq!(vis.overlay_visible(CellId::new(5), 0), None);
    }

    #[test]
    fn test_exactly_one_layer_visible_per_cell() {
        let panel = panel();
        for layer in 0..3 {
            let vis = panel
                .resolve(&ControlState {
                    checked: vec![true; 3],
                    layer,
                })
                .unwrap();
            for id in [0, 1] {
                let shown = vis
                    .layers
                    .iter()
                    .filter(|l| l.cell == CellId::new(id) && l.visible)
                    .count();
                assert_eq!(shown, 1);
            }
        }
    }

    #[test]
    fn test_resolve_rejects_mismatched_state() {
        let panel = panel();
        assert!(panel
            .resolve(&ControlState {
                checked: vec![true],
                layer: 0
            })
            .is_err());
        assert!(panel
            .resolve(&ControlState {
                checked: vec![true; 3],
                layer: 3
            })
            .is_err());
    }

    #[test]
    fn test_active_layer_out_of_range() {
        let result = ControlPanel::new(&[cell(0)], &["star"], &[], &["raw".to_string()], 1);
        assert!(matches!(result, Err(GalleryError::ConfigurationError { .. })));
    }

    #[test]
    fn test_json_shape() {
        let json: serde_json::Value = serde_json::from_str(&panel().to_json().unwrap()).unwrap();
        assert_eq!(json["activeLayer"], 1);
        assert_eq!(json["cells"], serde_json::json!([0, 1]));
        assert_eq!(json["categories"][1]["label"], "galaxy");
        assert_eq!(json["categories"][1]["checked"], true);
        assert_eq!(json["layers"][2]["name"], "resid");
    }
}
