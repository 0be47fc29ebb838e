use std::collections::HashSet;
use std::fmt::{self, Debug, Display};

use rayon::prelude::*;
use tracing::debug;

use crate::error::{Error, Result};
use crate::matrix::{CandidateMatrix, RowView};
use crate::utils::math::vector::ZeroSpVec;

/// One ranked candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitEntry {
    pub id: u64,
    pub score: f64,
}

/// Ranked candidates
/// `list` is in matrix row order until sorted.
#[derive(Clone, PartialEq, Default)]
pub struct Hits {
    pub list: Vec<HitEntry>,
}

impl Hits {
    pub fn new(list: Vec<HitEntry>) -> Self {
        Hits { list }
    }

    /// Sort by descending score.
    /// The sort is stable, so equal scores stay in row order.
    pub fn sort_by_score_desc(&mut self) -> &mut Self {
        self.list.retain(|hit| !hit.score.is_nan());
        self.list.sort_by(|a, b| b.score.total_cmp(&a.score));
        self
    }

    pub fn truncate(&mut self, top_n: usize) -> &mut Self {
        self.list.truncate(top_n);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn into_pairs(self) -> Vec<(u64, f64)> {
        self.list.into_iter().map(|hit| (hit.id, hit.score)).collect()
    }
}

impl Debug for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Hits [")?;
            for hit in &self.list {
                writeln!(f, "    {}: {:.6}", hit.id, hit.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list()
                .entries(self.list.iter().map(|hit| (hit.id, hit.score)))
                .finish()
        }
    }
}

impl Display for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (rank, hit) in self.list.iter().enumerate() {
            writeln!(f, "{:>3}. item {:<8} score {:.4}", rank + 1, hit.id, hit.score)?;
        }
        Ok(())
    }
}

/// Cosine similarity between `query` and one matrix row, in `[0, 1]`.
/// 0 when either side has zero norm.
#[inline]
pub fn cosine(query: &ZeroSpVec<f64>, query_norm_sq: f64, row: &RowView<'_>) -> f64 {
    let row_norm_sq = row.norm_sq();
    if query_norm_sq == 0.0 || row_norm_sq == 0.0 {
        return 0.0;
    }
    // rounding can push proportional rows past 1.0, which would also break ties
    (row.dot(query) / (query_norm_sq * row_norm_sq).sqrt()).clamp(0.0, 1.0)
}

/// Score every row of `matrix` against `query`, in row order
pub fn score_all(query: &ZeroSpVec<f64>, matrix: &CandidateMatrix) -> Result<Hits> {
    if matrix.is_empty() {
        return Ok(Hits::default());
    }
    if query.len() != matrix.dim() {
        return Err(Error::DimensionMismatch {
            expected: matrix.dim(),
            found: query.len(),
        });
    }
    let query_norm_sq = query.norm_sq();
    // indexed collect keeps row order
    let list: Vec<HitEntry> = (0..matrix.len())
        .into_par_iter()
        .filter_map(|i| matrix.row(i))
        .map(|row| HitEntry {
            id: row.id,
            score: cosine(query, query_norm_sq, &row),
        })
        .collect();
    Ok(Hits::new(list))
}

/// Rank all candidates by cosine similarity to `query`.
///
/// Highest score first, ties in ascending row order. Ids in `exclude` are
/// never returned. At most `top_n` entries.
///
/// # Errors
/// `DimensionMismatch` when the query and matrix dimensions differ.
pub fn rank(
    query: &ZeroSpVec<f64>,
    matrix: &CandidateMatrix,
    exclude: &HashSet<u64>,
    top_n: usize,
) -> Result<Vec<(u64, f64)>> {
    debug!(
        candidates = matrix.len(),
        dim = matrix.dim(),
        top_n,
        excluded = exclude.len(),
        "ranking candidates"
    );
    let mut hits = score_all(query, matrix)?;
    hits.list.retain(|hit| !exclude.contains(&hit.id));
    hits.sort_by_score_desc().truncate(top_n);
    Ok(hits.into_pairs())
}

/// Items most similar to `item_id`, excluding the item itself.
/// An id missing from the matrix gives an empty list.
pub fn recommend_for(item_id: u64, matrix: &CandidateMatrix, top_n: usize) -> Result<Vec<(u64, f64)>> {
    let Some(query) = matrix.vector_of(item_id) else {
        debug!(item_id, "unknown item, nothing to recommend");
        return Ok(Vec::new());
    };
    let exclude: HashSet<u64> = [item_id].into_iter().collect();
    rank(&query, matrix, &exclude, top_n)
}
