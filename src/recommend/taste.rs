use std::collections::HashSet;

use tracing::debug;

use crate::error::Result;
use crate::matrix::CandidateMatrix;
use crate::recommend::scoring::rank;
use crate::utils::math::vector::math::SparseVecOps;
use crate::utils::math::vector::ZeroSpVec;

/// Taste profile: the arithmetic mean of the liked rows.
///
/// Liked ids missing from the matrix are ignored; `None` when none remain.
/// Every listed id counts once per occurrence.
pub fn aggregate(liked_ids: &[u64], matrix: &CandidateMatrix) -> Result<Option<ZeroSpVec<f64>>> {
    let mut rows = liked_ids.iter().filter_map(|&id| matrix.vector_of(id));
    let Some(first) = rows.next() else {
        return Ok(None);
    };
    let mut count = 1usize;
    let mut sum = first;
    for row in rows {
        sum = sum.checked_add(&row)?;
        count += 1;
    }
    Ok(Some(sum.div_scalar(count as f64)))
}

/// Items closest to the averaged taste of `liked_ids`.
/// Liked items are never returned; no usable likes gives an empty list.
pub fn recommend_from_likes(liked_ids: &[u64], matrix: &CandidateMatrix, top_n: usize) -> Result<Vec<(u64, f64)>> {
    let Some(profile) = aggregate(liked_ids, matrix)? else {
        debug!(likes = liked_ids.len(), "no liked item is known");
        return Ok(Vec::new());
    };
    let exclude: HashSet<u64> = liked_ids.iter().copied().filter(|&id| matrix.contains(id)).collect();
    rank(&profile, matrix, &exclude, top_n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> CandidateMatrix {
        CandidateMatrix::from_rows(vec![
            (1, ZeroSpVec::from(vec![3.0, 0.0, 0.0])),
            (2, ZeroSpVec::from(vec![0.0, 6.0, 0.0])),
            (3, ZeroSpVec::from(vec![3.0, 3.0, 3.0])),
            (4, ZeroSpVec::from(vec![1.0, 1.0, 0.0])),
        ])
        .unwrap()
    }

    #[test]
    fn profile_is_elementwise_mean() {
        let m = matrix();
        let profile = aggregate(&[1, 2, 3], &m).unwrap().unwrap();
        assert_eq!(profile, ZeroSpVec::from(vec![2.0, 3.0, 1.0]));
    }

    #[test]
    fn unknown_likes_are_dropped() {
        let m = matrix();
        assert_eq!(aggregate(&[], &m).unwrap(), None);
        assert_eq!(aggregate(&[99], &m).unwrap(), None);
        let profile = aggregate(&[99, 1], &m).unwrap().unwrap();
        assert_eq!(profile, ZeroSpVec::from(vec![3.0, 0.0, 0.0]));
    }

    #[test]
    fn likes_are_excluded_from_results() {
        let m = matrix();
        let recs = recommend_from_likes(&[1, 2], &m, 10).unwrap();
        let ids: Vec<u64> = recs.iter().map(|(id, _)| *id).collect();
        // profile (1.5, 3, 0): item 4 points closer than item 3
        assert_eq!(ids, vec![4, 3]);
        assert!(recommend_from_likes(&[42], &m, 10).unwrap().is_empty());
    }
}
