//! Sky positions and index-aligned coordinate columns.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorContext, GalleryError, GalleryResult};

/// A position on the sky, in degrees.
///
/// RA is circular modulo 360°, DEC lies in [-90°, 90°]. Neither is normalized here;
/// values are taken as given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyCoordinate {
    pub ra: qtty::Degrees,
    pub dec: qtty::Degrees,
}

impl SkyCoordinate {
    pub fn new(ra_deg: f64, dec_deg: f64) -> Self {
        Self {
            ra: qtty::Degrees::new(ra_deg),
            dec: qtty::Degrees::new(dec_deg),
        }
    }

    pub fn ra_deg(&self) -> f64 {
        self.ra.value()
    }

    pub fn dec_deg(&self) -> f64 {
        self.dec.value()
    }
}

/// N targets as two index-aligned columns of RA and DEC (degrees).
///
/// Deserialization goes through [`CoordinateSet::new`], so mismatched columns are
/// rejected there too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinateSet")]
pub struct CoordinateSet {
    ra_deg: Vec<f64>,
    dec_deg: Vec<f64>,
}

#[derive(Deserialize)]
struct RawCoordinateSet {
    ra_deg: Vec<f64>,
    dec_deg: Vec<f64>,
}

impl TryFrom<RawCoordinateSet> for CoordinateSet {
    type Error = GalleryError;

    fn try_from(raw: RawCoordinateSet) -> Result<Self, Self::Error> {
        CoordinateSet::new(raw.ra_deg, raw.dec_deg)
    }
}

impl CoordinateSet {
    /// Build a coordinate set, rejecting columns of different length.
    pub fn new(ra_deg: Vec<f64>, dec_deg: Vec<f64>) -> GalleryResult<Self> {
        if ra_deg.len() != dec_deg.len() {
            return Err(GalleryError::validation_with_context(
                format!(
                    "RA and DEC columns differ in length ({} vs {})",
                    ra_deg.len(),
                    dec_deg.len()
                ),
                ErrorContext::new("new_coordinate_set").with_entity("dec"),
            ));
        }
        Ok(Self { ra_deg, dec_deg })
    }

    pub fn from_coordinates<I>(coords: I) -> Self
    where
        I: IntoIterator<Item = SkyCoordinate>,
    {
        let (ra_deg, dec_deg) = coords
            .into_iter()
            .map(|c| (c.ra_deg(), c.dec_deg()))
            .unzip();
        Self { ra_deg, dec_deg }
    }

    pub fn len(&self) -> usize {
        self.ra_deg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ra_deg.is_empty()
    }

    pub fn ra_deg(&self) -> &[f64] {
        &self.ra_deg
    }

    pub fn dec_deg(&self) -> &[f64] {
        &self.dec_deg
    }

    pub fn get(&self, index: usize) -> Option<SkyCoordinate> {
        let ra = *self.ra_deg.get(index)?;
        let dec = *self.dec_deg.get(index)?;
        Some(SkyCoordinate::new(ra, dec))
    }

    pub fn iter(&self) -> impl Iterator<Item = SkyCoordinate> + '_ {
        self.ra_deg
            .iter()
            .zip(&self.dec_deg)
            .map(|(&ra, &dec)| SkyCoordinate::new(ra, dec))
    }

    /// Subset in the order given by `indices`. Out-of-range indices are skipped.
    pub fn select(&self, indices: &[usize]) -> CoordinateSet {
        CoordinateSet::from_coordinates(indices.iter().filter_map(|&i| self.get(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_length_mismatch() {
        let result = CoordinateSet::new(vec![1.0, 2.0], vec![3.0]);
        assert!(matches!(result, Err(GalleryError::ValidationError { .. })));
    }

    #[test]
    fn test_get_and_iter_are_index_aligned() {
        let coords = CoordinateSet::new(vec![10.0, 20.0, 30.0], vec![-1.0, 0.0, 1.0]).unwrap();
        assert_eq!(coords.len(), 3);
        assert_eq!(coords.get(1), Some(SkyCoordinate::new(20.0, 0.0)));
        assert_eq!(coords.get(3), None);

        let decs: Vec<f64> = coords.iter().map(|c| c.dec_deg()).collect();
        assert_eq!(decs, vec![-1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_select_keeps_requested_order() {
        let coords = CoordinateSet::new(vec![10.0, 20.0, 30.0], vec![1.0, 2.0, 3.0]).unwrap();
        let subset = coords.select(&[2, 0, 7]);
        assert_eq!(subset.ra_deg(), &[30.0, 10.0]);
        assert_eq!(subset.dec_deg(), &[3.0, 1.0]);
    }

    #[test]
    fn test_deserialize_rejects_length_mismatch() {
        let result: Result<CoordinateSet, _> =
            serde_json::from_str(r#"{"ra_deg": [10.0, 10.1, 10.2], "dec_deg": [0.0, 0.0]}"#);
        let err = result.unwrap_err();
        assert!(err
            .to_string()
            .contains("RA and DEC columns differ in length (3 vs 2)"));

        let ok: CoordinateSet =
            serde_json::from_str(r#"{"ra_deg": [10.0], "dec_deg": [0.0]}"#).unwrap();
        assert_eq!(ok.len(), 1);
    }

    #[test]
    fn test_empty_set() {
        let coords = CoordinateSet::default();
        assert!(coords.is_empty());
        assert_eq!(coords.iter().count(), 0);
    }
}
