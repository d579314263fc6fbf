//! Sky-to-pixel projection for postage stamps.
//!
//! Positions are placed relative to a stamp centered on `center`, using a flat-sky
//! approximation: RA offsets are wrapped to the short way around the circle and
//! shrunk by `cos(dec)`, then both offsets are divided by the pixel scale.
//!
//! Pixel coordinates follow the plot convention of the stamp canvas: `x` grows to the
//! west (decreasing RA) and `y` grows upward, measured from the bottom edge. Targets
//! north of the center therefore land above it (`y > size / 2`).

use serde::{Deserialize, Serialize};

use crate::models::{CoordinateSet, SkyCoordinate};

pub const ARCSEC_PER_DEGREE: f64 = 3600.0;
/// 180° in arcseconds.
pub const HALF_TURN_ARCSEC: f64 = 648_000.0;
/// 360° in arcseconds.
pub const FULL_TURN_ARCSEC: f64 = 1_296_000.0;

/// Pixel positions, index-aligned with the projected targets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelOffsets {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl PixelOffsets {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// Wrap an RA difference in arcseconds onto (-180°, 180°].
#[inline]
pub fn wrap_ra_offset_arcsec(d_ra: f64) -> f64 {
    if d_ra > HALF_TURN_ARCSEC {
        d_ra - FULL_TURN_ARCSEC
    } else if d_ra < -HALF_TURN_ARCSEC {
        d_ra + FULL_TURN_ARCSEC
    } else {
        d_ra
    }
}

/// Project a single target. See [`project`].
#[inline]
pub fn project_one(
    center: &SkyCoordinate,
    target: &SkyCoordinate,
    box_size_px: u32,
    pixel_scale: f64,
) -> (f64, f64) {
    let half = box_size_px as f64 / 2.0;

    let d_ra = wrap_ra_offset_arcsec((center.ra_deg() - target.ra_deg()) * ARCSEC_PER_DEGREE);
    let d_ra = d_ra * target.dec.cos();
    let d_dec = (center.dec_deg() - target.dec_deg()) * ARCSEC_PER_DEGREE;

    (half + d_ra / pixel_scale, half - d_dec / pixel_scale)
}

/// Convert absolute sky coordinates to pixel positions on a stamp of `box_size_px`
/// pixels centered on `center`, with `pixel_scale` arcseconds per pixel.
///
/// No validation is performed: NaN or infinite inputs propagate to the output.
pub fn project(
    center: &SkyCoordinate,
    targets: &CoordinateSet,
    box_size_px: u32,
    pixel_scale: f64,
) -> PixelOffsets {
    let (x, y) = targets
        .iter()
        .map(|target| project_one(center, &target, box_size_px, pixel_scale))
        .unzip();
    PixelOffsets { x, y }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SCALE: f64 = 0.262;

    fn targets(ra: Vec<f64>, dec: Vec<f64>) -> CoordinateSet {
        CoordinateSet::new(ra, dec).unwrap()
    }

    #[test]
    fn test_center_projects_to_middle() {
        let center = SkyCoordinate::new(150.1, 2.2);
        let out = project(&center, &targets(vec![150.1], vec![2.2]), 61, SCALE);
        assert_eq!(out.x, vec![30.5]);
        assert_eq!(out.y, vec![30.5]);
    }

    #[test]
    fn test_one_arcsecond_west_example() {
        let center = SkyCoordinate::new(10.0, 0.0);
        let out = project(
            &center,
            &targets(vec![10.0, 10.0002778], vec![0.0, 0.0]),
            100,
            SCALE,
        );

        assert_eq!(out.x[0], 50.0);
        assert_eq!(out.y[0], 50.0);
        assert_relative_eq!(out.x[1], 50.0 - 1.00008 / SCALE, epsilon = 1e-6);
        assert_relative_eq!(out.x[1], 46.18, epsilon = 0.01);
        assert_eq!(out.y[1], 50.0);
    }

    #[test]
    fn test_wraparound_takes_short_path() {
        let center = SkyCoordinate::new(0.0, 0.0);
        let out = project(&center, &targets(vec![359.9999], vec![0.0]), 100, SCALE);

        // 0.0001 deg = 0.36 arcsec on the positive side
        let expected = 50.0 + 0.36 / SCALE;
        assert_relative_eq!(out.x[0], expected, epsilon = 1e-6);
        assert!(out.x[0] - 50.0 < 2.0);
    }

    #[test]
    fn test_wraparound_negative_branch() {
        let center = SkyCoordinate::new(359.9999, 0.0);
        let out = project(&center, &targets(vec![0.0001], vec![0.0]), 100, SCALE);
        let expected = 50.0 - 0.72 / SCALE;
        assert_relative_eq!(out.x[0], expected, epsilon = 1e-6);
    }

    #[test]
    fn test_wrap_ra_offset_boundaries() {
        assert_eq!(wrap_ra_offset_arcsec(HALF_TURN_ARCSEC), HALF_TURN_ARCSEC);
        assert_eq!(wrap_ra_offset_arcsec(-HALF_TURN_ARCSEC), -HALF_TURN_ARCSEC);
        assert_eq!(wrap_ra_offset_arcsec(HALF_TURN_ARCSEC + 1.0), 1.0 - HALF_TURN_ARCSEC);
        assert_eq!(wrap_ra_offset_arcsec(-HALF_TURN_ARCSEC - 1.0), HALF_TURN_ARCSEC - 1.0);
    }

    #[test]
    fn test_foreshortening_near_pole() {
        let equator = project(
            &SkyCoordinate::new(100.0, 0.0),
            &targets(vec![100.001], vec![0.0]),
            100,
            SCALE,
        );
        let polar = project(
            &SkyCoordinate::new(100.0, 80.0),
            &targets(vec![100.001], vec![80.0]),
            100,
            SCALE,
        );

        let equator_offset = (equator.x[0] - 50.0).abs();
        let polar_offset = (polar.x[0] - 50.0).abs();
        assert!(polar_offset < equator_offset);
        assert_relative_eq!(
            polar_offset,
            equator_offset * 80.0_f64.to_radians().cos(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_northern_target_is_above_center() {
        let center = SkyCoordinate::new(200.0, 10.0);
        let out = project(&center, &targets(vec![200.0], vec![10.001]), 100, SCALE);
        assert!(out.y[0] > 50.0);
        assert_relative_eq!(out.y[0], 50.0 + 3.6 / SCALE, epsilon = 1e-6);
    }

    #[test]
    fn test_order_and_length_preserved() {
        let center = SkyCoordinate::new(45.0, -30.0);
        let ras = vec![45.001, 44.999, 45.0, 45.002];
        let decs = vec![-30.0, -30.001, -29.999, -30.0];
        let out = project(&center, &targets(ras.clone(), decs.clone()), 80, SCALE);

        assert_eq!(out.len(), 4);
        for (i, (x, y)) in out.iter().enumerate() {
            let single = project_one(
                &center,
                &SkyCoordinate::new(ras[i], decs[i]),
                80,
                SCALE,
            );
            assert_eq!((x, y), single);
        }
    }

    #[test]
    fn test_empty_targets() {
        let out = project(&SkyCoordinate::new(0.0, 0.0), &CoordinateSet::default(), 100, SCALE);
        assert!(out.is_empty());
    }

    #[test]
    fn test_nan_propagates() {
        let out = project(
            &SkyCoordinate::new(0.0, 0.0),
            &targets(vec![f64::NAN], vec![0.0]),
            100,
            SCALE,
        );
        assert!(out.x[0].is_nan());
        assert_eq!(out.y[0], 50.0);
    }
}
