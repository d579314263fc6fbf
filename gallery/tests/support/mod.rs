#![allow(dead_code)]

use std::sync::Mutex;

use postage_gallery::{Catalog, CoordinateSet, GalleryConfig, InfoFields, VetoMasks};

/// Guards every test that touches `POSTAGE_*` variables; the environment is process-global.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Run `f` with the given variables set (`Some`) or removed (`None`), then put back
/// whatever was there before, even if `f` panics.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _restore = EnvRestore::apply(changes);
    f()
}

/// Previous values of the overridden variables, restored on drop.
struct EnvRestore(Vec<(String, Option<String>)>);

impl EnvRestore {
    fn apply(changes: &[(&str, Option<&str>)]) -> Self {
        let mut previous: Vec<(String, Option<String>)> = Vec::new();
        for &(key, value) in changes {
            if !previous.iter().any(|(k, _)| k == key) {
                previous.push((key.to_string(), std::env::var(key).ok()));
            }
            set_or_remove(key, value);
        }
        Self(previous)
    }
}

impl Drop for EnvRestore {
    fn drop(&mut self) {
        for (key, value) in self.0.drain(..) {
            set_or_remove(&key, value.as_deref());
        }
    }
}

fn set_or_remove(key: &str, value: Option<&str>) {
    match value {
        Some(v) => std::env::set_var(key, v),
        None => std::env::remove_var(key),
    }
}

pub const ARCSEC: f64 = 1.0 / 3600.0;

/// Number of stamp centers in [`fixture_catalog`].
pub const CENTER_COUNT: usize = 5;

/// Five isolated stars one degree apart, each with a galaxy 5" north of it.
///
/// Targets `0..5` are the stars, `5..10` the galaxies. A third category, "artifact",
/// flags nothing.
pub fn fixture_catalog() -> Catalog {
    let mut ra = Vec::new();
    let mut dec = Vec::new();
    for i in 0..CENTER_COUNT {
        ra.push(40.0 + i as f64);
        dec.push(0.0);
    }
    for i in 0..CENTER_COUNT {
        ra.push(40.0 + i as f64);
        dec.push(5.0 * ARCSEC);
    }
    let n = ra.len();

    let veto = VetoMasks::new()
        .with("star", (0..n).map(|i| i < CENTER_COUNT).collect())
        .with("galaxy", (0..n).map(|i| i >= CENTER_COUNT).collect())
        .with("artifact", vec![false; n]);

    let info = InfoFields::new()
        .with("rmag", (0..n).map(|i| 17.0 + i as f64).collect::<Vec<_>>())
        .with(
            "morph",
            (0..n)
                .map(|i| if i < CENTER_COUNT { "PSF" } else { "EXP" })
                .collect::<Vec<_>>(),
        );

    Catalog::new(CoordinateSet::new(ra, dec).unwrap(), veto, Some(info)).unwrap()
}

pub fn fixture_centers() -> Vec<usize> {
    (0..CENTER_COUNT).collect()
}

/// Default configuration with a fixed seed.
pub fn seeded_config(seed: u64) -> GalleryConfig {
    GalleryConfig {
        seed: Some(seed),
        ..GalleryConfig::default()
    }
}
