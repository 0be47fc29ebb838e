use std::cmp::Ordering;
use std::ops::AddAssign;

use num::{Float, Num};

use crate::error::{Error, Result};

use super::ZeroSpVec;

/// Arithmetic a sparse row has to support for profile averaging and cosine scoring
pub trait SparseVecOps<N>: Sized {
    /// Elementwise sum. Both operands must share the same dimension.
    fn checked_add(&self, other: &Self) -> Result<Self>;
    /// Divide every element by `divisor`
    fn div_scalar(&self, divisor: N) -> Self;
    fn dot(&self, other: &Self) -> N;
    fn norm(&self) -> N;
}

/// Dot product of two sparse rows given as ascending index / value slices
#[inline]
pub fn sparse_dot<N>(a_inds: &[u32], a_vals: &[N], b_inds: &[u32], b_vals: &[N]) -> N
where
    N: Num + AddAssign + Copy,
{
    let mut result = N::zero();
    let (mut i, mut j) = (0, 0);
    while i < a_inds.len() && j < b_inds.len() {
        match a_inds[i].cmp(&b_inds[j]) {
            Ordering::Equal => {
                result += a_vals[i] * b_vals[j];
                i += 1;
                j += 1;
            }
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
        }
    }
    result
}

impl<N> ZeroSpVec<N>
where
    N: Num + AddAssign + Copy,
{
    /// Dot product by merging the two index lists
    ///
    /// # Arguments
    /// * `other` - another vector of the same dimension
    #[inline]
    pub fn dot_with(&self, other: &Self) -> N {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "Vectors must be of the same length to compute dot product."
        );
        sparse_dot(self.indices(), self.values(), other.indices(), other.values())
    }

    #[inline]
    pub fn norm_sq(&self) -> N {
        let mut result = N::zero();
        for &v in self.values() {
            result += v * v;
        }
        result
    }

    /// Merge-add of two sparse vectors; entries that cancel to zero are dropped
    pub fn merge_add(&self, other: &Self) -> Self {
        debug_assert_eq!(self.len(), other.len());
        let (a_inds, a_vals) = (self.indices(), self.values());
        let (b_inds, b_vals) = (other.indices(), other.values());
        let mut out = ZeroSpVec::with_capacity(a_inds.len().max(b_inds.len()));
        out.len = self.len();
        let (mut i, mut j) = (0, 0);
        while i < a_inds.len() || j < b_inds.len() {
            let (index, value) = match (a_inds.get(i), b_inds.get(j)) {
                (Some(&a), Some(&b)) if a == b => {
                    i += 1;
                    j += 1;
                    (a, a_vals[i - 1] + b_vals[j - 1])
                }
                (Some(&a), Some(&b)) if a < b => {
                    i += 1;
                    (a, a_vals[i - 1])
                }
                (Some(_), Some(&b)) => {
                    j += 1;
                    (b, b_vals[j - 1])
                }
                (Some(&a), None) => {
                    i += 1;
                    (a, a_vals[i - 1])
                }
                (None, Some(&b)) => {
                    j += 1;
                    (b, b_vals[j - 1])
                }
                (None, None) => unreachable!(),
            };
            if value != N::zero() {
                out.raw_push(index, value);
            }
        }
        out
    }
}

impl<N> SparseVecOps<N> for ZeroSpVec<N>
where
    N: Float + AddAssign,
{
    fn checked_add(&self, other: &Self) -> Result<Self> {
        if self.len() != other.len() {
            return Err(Error::DimensionMismatch {
                expected: self.len(),
                found: other.len(),
            });
        }
        Ok(self.merge_add(other))
    }

    fn div_scalar(&self, divisor: N) -> Self {
        let mut out = ZeroSpVec::with_capacity(self.nnz());
        out.len = self.len();
        for (index, &value) in self.raw_iter() {
            let q = value / divisor;
            if q != N::zero() {
                out.raw_push(index as u32, q);
            }
        }
        out
    }

    #[inline]
    fn dot(&self, other: &Self) -> N {
        self.dot_with(other)
    }

    #[inline]
    fn norm(&self) -> N {
        self.norm_sq().sqrt()
    }
}
