//! Catalog of targets with classification masks and display fields.
//!
//! All columns are index-aligned with the [`CoordinateSet`]: entry `i` of every veto mask and
//! every info field describes target `i`.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::sky::CoordinateSet;
use crate::define_id_type;
use crate::error::{ErrorContext, GalleryError, GalleryResult};

define_id_type!(usize, TargetIndex);

/// One classification category ("veto mask") with its per-target flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub label: String,
    pub mask: Vec<bool>,
}

/// Ordered set of categories.
///
/// Order matters: it fixes the checkbox order and the marker color of each category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VetoMasks {
    categories: Vec<Category>,
}

impl VetoMasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a category. A later category with the same label replaces the mask in place.
    pub fn insert(&mut self, label: impl Into<String>, mask: Vec<bool>) {
        let label = label.into();
        match self.categories.iter_mut().find(|c| c.label == label) {
            Some(existing) => existing.mask = mask,
            None => self.categories.push(Category { label, mask }),
        }
    }

    pub fn with(mut self, label: impl Into<String>, mask: Vec<bool>) -> Self {
        self.insert(label, mask);
        self
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.label.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn get(&self, label: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.label == label)
    }
}

impl FromIterator<(String, Vec<bool>)> for VetoMasks {
    fn from_iter<T: IntoIterator<Item = (String, Vec<bool>)>>(iter: T) -> Self {
        let mut masks = VetoMasks::new();
        for (label, mask) in iter {
            masks.insert(label, mask);
        }
        masks
    }
}

/// A scalar shown in a marker tooltip.
///
/// `null` (a masked or NaN entry in the source table) becomes [`InfoValue::Missing`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InfoValue {
    Missing,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for InfoValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfoValue::Missing => write!(f, "--"),
            InfoValue::Bool(b) => write!(f, "{}", b),
            InfoValue::Number(n) => write!(f, "{}", n),
            InfoValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for InfoValue {
    fn from(v: f64) -> Self {
        InfoValue::Number(v)
    }
}

impl From<&str> for InfoValue {
    fn from(v: &str) -> Self {
        InfoValue::Text(v.to_string())
    }
}

impl From<String> for InfoValue {
    fn from(v: String) -> Self {
        InfoValue::Text(v)
    }
}

impl<T: Into<InfoValue>> From<Option<T>> for InfoValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(InfoValue::Missing)
    }
}

impl From<bool> for InfoValue {
    fn from(v: bool) -> Self {
        InfoValue::Bool(v)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoField {
    pub name: String,
    pub values: Vec<InfoValue>,
}

/// Ordered display columns used for marker tooltips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InfoFields {
    fields: Vec<InfoField>,
}

impl InfoFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<V>(&mut self, name: impl Into<String>, values: Vec<V>)
    where
        V: Into<InfoValue>,
    {
        let name = name.into();
        let values: Vec<InfoValue> = values.into_iter().map(Into::into).collect();
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => existing.values = values,
            None => self.fields.push(InfoField { name, values }),
        }
    }

    pub fn with<V>(mut self, name: impl Into<String>, values: Vec<V>) -> Self
    where
        V: Into<InfoValue>,
    {
        self.insert(name, values);
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InfoField> {
        self.fields.iter()
    }

    pub fn get(&self, name: &str) -> Option<&InfoField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Tooltip rows for one target, in field order.
    pub fn row(&self, target: TargetIndex) -> Vec<(String, InfoValue)> {
        self.fields
            .iter()
            .filter_map(|f| {
                f.values
                    .get(target.value())
                    .map(|v| (f.name.clone(), v.clone()))
            })
            .collect()
    }
}

/// Targets plus their classification and display columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub coords: CoordinateSet,
    pub veto: VetoMasks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<InfoFields>,
}

impl Catalog {
    /// Build and validate a catalog.
    pub fn new(
        coords: CoordinateSet,
        veto: VetoMasks,
        info: Option<InfoFields>,
    ) -> GalleryResult<Self> {
        let catalog = Self { coords, veto, info };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Check that every column has one entry per target and that categories are usable.
    pub fn validate(&self) -> GalleryResult<()> {
        let n = self.coords.len();

        if self.coords.dec_deg().len() != n {
            return Err(GalleryError::validation_with_context(
                format!(
                    "RA and DEC columns differ in length ({} vs {})",
                    n,
                    self.coords.dec_deg().len()
                ),
                ErrorContext::new("validate_catalog").with_entity("dec"),
            ));
        }

        if self.veto.is_empty() {
            return Err(GalleryError::validation_with_context(
                "at least one veto category is required",
                ErrorContext::new("validate_catalog").with_entity("veto"),
            ));
        }

        let mut seen = HashSet::new();
        for category in self.veto.iter() {
            if !seen.insert(category.label.as_str()) {
                return Err(GalleryError::validation_with_context(
                    format!("duplicate veto category '{}'", category.label),
                    ErrorContext::new("validate_catalog").with_entity("veto"),
                ));
            }
            if category.mask.len() != n {
                return Err(GalleryError::validation_with_context(
                    format!(
                        "veto mask '{}' has {} entries, expected {}",
                        category.label,
                        category.mask.len(),
                        n
                    ),
                    ErrorContext::new("validate_catalog").with_entity("veto"),
                ));
            }
        }

        if let Some(info) = &self.info {
            for field in info.iter() {
                if field.values.len() != n {
                    return Err(GalleryError::validation_with_context(
                        format!(
                            "info field '{}' has {} entries, expected {}",
                            field.name,
                            field.values.len(),
                            n
                        ),
                        ErrorContext::new("validate_catalog").with_entity("info"),
                    ));
                }
            }
        }

        Ok(())
    }
}
