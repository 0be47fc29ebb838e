use std::collections::HashMap;

use tracing::warn;

use crate::codec;
use crate::error::{Error, Result};
use crate::utils::datastruct::arena::RowArena;
use crate::utils::math::vector::math::sparse_dot;
use crate::utils::math::vector::ZeroSpVec;

/// What to do with a stored row whose bytes fail to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// fail the whole load with the codec error
    #[default]
    Abort,
    /// drop the row and log a warning
    Skip,
}

/// Borrowed view of one matrix row
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    pub id: u64,
    pub indices: &'a [u32],
    pub values: &'a [f64],
}

impl RowView<'_> {
    #[inline]
    pub fn norm_sq(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum()
    }

    #[inline]
    pub fn dot(&self, other: &ZeroSpVec<f64>) -> f64 {
        sparse_dot(self.indices, self.values, other.indices(), other.values())
    }
}

/// Candidate Matrix
/// Every feature vector of the current corpus stacked into one arena,
/// with row `i` belonging to `ids()[i]`.
/// The matrix owns the id list, so rows and ids cannot drift apart.
#[derive(Debug, Clone, Default)]
pub struct CandidateMatrix {
    ids: Vec<u64>,
    positions: HashMap<u64, usize>,
    rows: RowArena<f64>,
    dim: Option<usize>,
}

impl CandidateMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack `(id, vector)` rows in the given order
    pub fn from_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u64, ZeroSpVec<f64>)>,
    {
        let mut matrix = Self::new();
        for (id, vec) in rows {
            matrix.push(id, &vec)?;
        }
        Ok(matrix)
    }

    /// Decode stored `(id, bytes)` entries into a matrix.
    /// Rows keep the order of `entries`.
    pub fn from_encoded<I, B>(entries: I, policy: DecodePolicy) -> Result<Self>
    where
        I: IntoIterator<Item = (u64, B)>,
        B: AsRef<[u8]>,
    {
        let mut matrix = Self::new();
        for (id, bytes) in entries {
            match codec::decode(bytes.as_ref()) {
                Ok(vec) => matrix.push(id, &vec)?,
                Err(err) if policy == DecodePolicy::Skip => {
                    warn!(item_id = id, error = %err, "skipping undecodable vector");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(matrix)
    }

    /// Append one row.
    /// The first row fixes the dimension; later rows must match it.
    pub fn push(&mut self, id: u64, vec: &ZeroSpVec<f64>) -> Result<()> {
        match self.dim {
            Some(dim) if dim != vec.len() => {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    found: vec.len(),
                })
            }
            Some(_) => {}
            None => self.dim = Some(vec.len()),
        }
        if self.positions.contains_key(&id) {
            return Err(Error::DuplicateItem(id));
        }
        let row = self.rows.alloc(vec.indices(), vec.values());
        self.positions.insert(id, row);
        self.ids.push(id);
        Ok(())
    }

    /// number of rows
    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Column count, 0 for an empty matrix
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim.unwrap_or(0)
    }

    /// ids in row order
    #[inline]
    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    #[inline]
    pub fn contains(&self, id: u64) -> bool {
        self.positions.contains_key(&id)
    }

    /// row number of `id`
    #[inline]
    pub fn position(&self, id: u64) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    #[inline]
    pub fn row(&self, row: usize) -> Option<RowView<'_>> {
        let (indices, values) = self.rows.get(row)?;
        Some(RowView {
            id: self.ids[row],
            indices,
            values,
        })
    }

    /// rows in order
    pub fn rows(&self) -> impl Iterator<Item = RowView<'_>> + '_ {
        (0..self.len()).filter_map(move |i| self.row(i))
    }

    /// Owned copy of the row belonging to `id`
    pub fn vector_of(&self, id: u64) -> Option<ZeroSpVec<f64>> {
        let row = self.row(self.position(id)?)?;
        let mut vec = ZeroSpVec::with_len(self.dim());
        for (&index, &value) in row.indices.iter().zip(row.values) {
            vec.raw_push(index, value);
        }
        Some(vec)
    }
}
