//! Side-by-side tooltips comparing two catalog versions.
//!
//! A comparison catalog holds columns suffixed by a version tag (`RMAG_dr8`, `RMAG_dr9`, ...).
//! For every displayed field it produces one tooltip entry per version, named
//! `<label>_<tag>`, so hovering a marker shows both values next to each other.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorContext, GalleryError, GalleryResult};
use crate::models::InfoFields;

/// A tooltip field: display label and the column prefix it reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparedField {
    pub label: String,
    pub column: String,
}

impl ComparedField {
    pub fn new(label: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            column: column.into(),
        }
    }
}

/// Fields shown when none are given: position, morphology, grz magnitudes, reference catalog.
pub fn default_fields() -> Vec<ComparedField> {
    vec![
        ComparedField::new("RA", "RA"),
        ComparedField::new("DEC", "DEC"),
        ComparedField::new("morph", "TYPE"),
        ComparedField::new("r", "RMAG"),
        ComparedField::new("g", "GMAG"),
        ComparedField::new("z", "ZMAG"),
        ComparedField::new("refcat", "REF_CAT"),
    ]
}

/// Two catalog versions to compare, index-aligned with the gallery catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Tag of the reference version (shown first).
    pub before: String,
    /// Tag of the new version (shown second).
    pub after: String,
    /// Columns named `<COLUMN>_<tag>`.
    pub columns: InfoFields,
    #[serde(default = "default_fields")]
    pub fields: Vec<ComparedField>,
}

impl Comparison {
    pub fn new(before: impl Into<String>, after: impl Into<String>, columns: InfoFields) -> Self {
        Self {
            before: before.into(),
            after: after.into(),
            columns,
            fields: default_fields(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<ComparedField>) -> Self {
        self.fields = fields;
        self
    }

    /// Tooltip columns, ordered field by field as `<label>_<before>`, `<label>_<after>`.
    pub fn tooltip_fields(&self) -> GalleryResult<InfoFields> {
        let mut out = InfoFields::new();
        for field in &self.fields {
            for tag in [&self.before, &self.after] {
                let column = format!("{}_{}", field.column, tag);
                let source = self.columns.get(&column).ok_or_else(|| {
                    GalleryError::validation_with_context(
                        format!("comparison column '{}' is missing", column),
                        ErrorContext::new("comparison_tooltips")
                            .with_entity("comparison")
                            .with_details(format!("field '{}'", field.label)),
                    )
                })?;
                out.insert(format!("{}_{}", field.label, tag), source.values.clone());
            }
        }
        Ok(out)
    }
}
