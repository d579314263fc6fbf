//! Random choice of stamp centers.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{ErrorContext, GalleryError, GalleryResult};

/// Build the RNG used for sampling: seeded when a seed is configured, OS entropy otherwise.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Draw `count` entries of `candidates` without replacement.
///
/// The result is in draw order, which becomes the gallery's cell order. Every candidate
/// must be a valid index into a catalog of `catalog_len` targets.
pub fn sample_centers<R: Rng + ?Sized>(
    candidates: &[usize],
    count: usize,
    catalog_len: usize,
    rng: &mut R,
) -> GalleryResult<Vec<usize>> {
    if candidates.is_empty() {
        return Err(GalleryError::sampling_with_context(
            "no candidate centers supplied",
            ErrorContext::new("sample_centers").with_entity("centers"),
        ));
    }

    if let Some(&bad) = candidates.iter().find(|&&i| i >= catalog_len) {
        return Err(GalleryError::sampling_with_context(
            format!(
                "center index {} is out of range for a catalog of {} targets",
                bad, catalog_len
            ),
            ErrorContext::new("sample_centers").with_entity("centers"),
        ));
    }

    if count > candidates.len() {
        return Err(GalleryError::sampling_with_context(
            format!(
                "grid needs {} stamps but only {} candidate centers were supplied",
                count,
                candidates.len()
            ),
            ErrorContext::new("sample_centers")
                .with_entity("centers")
                .with_details("reduce the grid size or supply more centers"),
        ));
    }

    let picked: Vec<usize> = rand::seq::index::sample(rng, candidates.len(), count)
        .into_iter()
        .map(|i| candidates[i])
        .collect();

    debug!("Sampled {} of {} candidate centers", picked.len(), candidates.len());
    Ok(picked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_without_replacement() {
        let candidates: Vec<usize> = (0..20).collect();
        let mut rng = make_rng(Some(7));
        let picked = sample_centers(&candidates, 20, 20, &mut rng).unwrap();

        let unique: HashSet<usize> = picked.iter().copied().collect();
        assert_eq!(picked.len(), 20);
        assert_eq!(unique.len(), 20);
    }

    #[test]
    fn test_sample_draws_from_candidates_only() {
        let candidates = vec![3, 9, 14, 27];
        let mut rng = make_rng(Some(1));
        let picked = sample_centers(&candidates, 2, 30, &mut rng).unwrap();
        assert!(picked.iter().all(|i| candidates.contains(i)));
    }

    #[test]
    fn test_same_seed_same_sample() {
        let candidates: Vec<usize> = (0..100).collect();
        let a = sample_centers(&candidates, 6, 100, &mut make_rng(Some(42))).unwrap();
        let b = sample_centers(&candidates, 6, 100, &mut make_rng(Some(42))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_too_few_candidates() {
        let err = sample_centers(&[0, 1, 2], 4, 3, &mut make_rng(Some(0))).unwrap_err();
        assert!(matches!(err, GalleryError::SamplingError { .. }));
        assert!(err.to_string().contains("needs 4 stamps"));
    }

    #[test]
    fn test_out_of_range_candidate() {
        let err = sample_centers(&[0, 5], 1, 5, &mut make_rng(Some(0))).unwrap_err();
        assert!(err.to_string().contains("center index 5 is out of range"));
    }

    #[test]
    fn test_empty_candidates() {
        let err = sample_centers(&[], 0, 5, &mut make_rng(None)).unwrap_err();
        assert!(matches!(err, GalleryError::SamplingError { .. }));
    }
}
