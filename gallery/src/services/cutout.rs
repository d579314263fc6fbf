//! URLs of the remote cutout and viewer services.
//!
//! Nothing here performs a request: the URLs are embedded in the page and resolved by the
//! browser.

use crate::config::CutoutSettings;
use crate::models::SkyCoordinate;

/// Builds cutout and viewer URLs for one survey host.
#[derive(Debug, Clone, PartialEq)]
pub struct CutoutService {
    base_url: String,
    pixel_scale: f64,
}

impl CutoutService {
    pub fn new(base_url: impl Into<String>, pixel_scale: f64) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            pixel_scale,
        }
    }

    pub fn from_settings(settings: &CutoutSettings) -> Self {
        Self::new(settings.base_url.clone(), settings.pixel_scale)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn pixel_scale(&self) -> f64 {
        self.pixel_scale
    }

    /// JPEG cutout of `size_px` pixels centered on `center`.
    pub fn cutout_url(&self, center: &SkyCoordinate, layer: &str, size_px: u32) -> String {
        format!(
            "{}/viewer-dev/jpeg-cutout/?ra={:.12}&dec={:.12}&pixscale={}&layer={}&size={}",
            self.base_url,
            center.ra_deg(),
            center.dec_deg(),
            self.pixel_scale,
            layer,
            size_px
        )
    }

    /// Interactive viewer page centered on `center`.
    pub fn viewer_url(&self, center: &SkyCoordinate, layer: &str) -> String {
        format!(
            "{}/viewer-dev?ra={:.12}&dec={:.12}&layer={}&zoom=15",
            self.base_url,
            center.ra_deg(),
            center.dec_deg(),
            layer
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cutout_url_format() {
        let service = CutoutService::new("http://legacysurvey.org", 0.262);
        let url = service.cutout_url(&SkyCoordinate::new(150.5, -2.25), "dr9g-south", 61);
        assert_eq!(
            url,
            "http://legacysurvey.org/viewer-dev/jpeg-cutout/?ra=150.500000000000&dec=-2.250000000000&pixscale=0.262&layer=dr9g-south&size=61"
        );
    }

    #[test]
    fn test_viewer_url_format() {
        let service = CutoutService::new("http://legacysurvey.org/", 0.262);
        let url = service.viewer_url(&SkyCoordinate::new(10.0, 41.25), "dr9f-north");
        assert_eq!(
            url,
            "http://legacysurvey.org/viewer-dev?ra=10.000000000000&dec=41.250000000000&layer=dr9f-north&zoom=15"
        );
    }

    #[test]
    fn test_from_settings() {
        let settings = CutoutSettings {
            base_url: "https://example.org".to_string(),
            pixel_scale: 0.5,
            ..CutoutSettings::default()
        };
        let service = CutoutService::from_settings(&settings);
        assert_eq!(service.base_url(), "https://example.org");
        assert_eq!(service.pixel_scale(), 0.5);
        assert!(service
            .cutout_url(&SkyCoordinate::new(1.0, 1.0), "x", 10)
            .contains("pixscale=0.5&"));
    }
}
