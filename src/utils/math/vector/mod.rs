pub mod math;
pub mod serde;

use std::fmt::{self, Debug};
use std::ops::Index;

use num::Num;

use crate::error::CodecError;
use crate::utils::sort::radix_sort_u32_soa;

/// ZeroSpVec is a sparse vector that treats zero elements as absent.
/// It keeps parallel `inds` / `vals` buffers:
/// `inds` holds the logical position of each stored element,
/// `vals` holds its value.
///
/// Stored elements are always kept in strictly ascending index order,
/// and no stored value is zero.
#[derive(Clone, PartialEq)]
pub struct ZeroSpVec<N>
where
    N: Num,
{
    inds: Vec<u32>,
    vals: Vec<N>,
    len: usize,
    zero: N,
}

impl<N> ZeroSpVec<N>
where
    N: Num,
{
    #[inline]
    pub fn new() -> Self {
        Self::with_len(0)
    }

    /// All-zero vector of logical length `len`
    #[inline]
    pub fn with_len(len: usize) -> Self {
        ZeroSpVec {
            inds: Vec::new(),
            vals: Vec::new(),
            len,
            zero: N::zero(),
        }
    }

    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        ZeroSpVec {
            inds: Vec::with_capacity(cap),
            vals: Vec::with_capacity(cap),
            len: 0,
            zero: N::zero(),
        }
    }

    /// raw_push appends a stored element without touching `len`.
    /// The caller guarantees `index` is greater than every stored index and below `len`.
    #[inline]
    pub(crate) fn raw_push(&mut self, index: u32, value: N) {
        debug_assert!(self.inds.last().map_or(true, |&last| last < index));
        self.inds.push(index);
        self.vals.push(value);
    }

    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.inds.shrink_to_fit();
        self.vals.shrink_to_fit();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// logical dimension
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// number of stored (nonzero) elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.inds
    }

    #[inline]
    pub fn values(&self) -> &[N] {
        &self.vals
    }

    /// Dense push: appends one logical element, storing it only when nonzero
    #[inline]
    pub fn push(&mut self, elem: N) {
        if elem != N::zero() {
            self.inds.push(self.len as u32);
            self.vals.push(elem);
        }
        self.len += 1;
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&N> {
        if index >= self.len {
            return None;
        }
        match self.inds.binary_search(&(index as u32)) {
            Ok(pos) => Some(&self.vals[pos]),
            Err(_) => Some(&self.zero),
        }
    }

    /// Iterate stored elements as (index, &value) in ascending index order
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, &N)> + '_ {
        self.inds.iter().map(|&i| i as usize).zip(self.vals.iter())
    }

    /// Build from (index, value) pairs in any order.
    /// Zero values are dropped. Duplicate indices are not merged; callers pass unique indices.
    pub fn from_unsorted(len: usize, pairs: Vec<(u32, N)>) -> Self
    where
        N: Copy,
    {
        let (mut inds, mut vals): (Vec<u32>, Vec<N>) = pairs
            .into_iter()
            .filter(|(_, v)| *v != N::zero())
            .unzip();
        radix_sort_u32_soa(&mut inds, &mut vals);
        debug_assert!(inds.windows(2).all(|w| w[0] < w[1]), "duplicate index");
        debug_assert!(inds.last().map_or(true, |&i| (i as usize) < len));
        ZeroSpVec {
            inds,
            vals,
            len,
            zero: N::zero(),
        }
    }

    /// Build from decoded wire entries, checking every structural invariant.
    /// Explicit zero entries are dropped.
    pub fn try_from_entries(len: u64, entries: Vec<(u64, N)>) -> Result<Self, CodecError> {
        if len > u32::MAX as u64 + 1 {
            return Err(CodecError::Malformed(format!("dimension {len} exceeds index width")));
        }
        let mut vec = ZeroSpVec::with_capacity(entries.len());
        vec.len = len as usize;
        let mut prev: Option<u64> = None;
        for (pos, (index, value)) in entries.into_iter().enumerate() {
            if index >= len {
                return Err(CodecError::IndexOutOfRange { index, len });
            }
            if prev.map_or(false, |p| p >= index) {
                return Err(CodecError::UnsortedIndices(pos));
            }
            prev = Some(index);
            if value != N::zero() {
                vec.raw_push(index as u32, value);
            }
        }
        Ok(vec)
    }
}

impl<N> Default for ZeroSpVec<N>
where
    N: Num,
{
    #[inline]
    fn default() -> Self {
        ZeroSpVec::new()
    }
}

impl<N> From<Vec<N>> for ZeroSpVec<N>
where
    N: Num,
{
    fn from(vec: Vec<N>) -> Self {
        let mut zero_sp_vec = ZeroSpVec::with_capacity(vec.len());
        for entry in vec {
            zero_sp_vec.push(entry);
        }
        zero_sp_vec
    }
}

impl<N> Index<usize> for ZeroSpVec<N>
where
    N: Num,
{
    type Output = N;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).expect("index out of bounds")
    }
}

impl<N: Num + Debug> Debug for ZeroSpVec<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.debug_list().entries((0..self.len).filter_map(|i| self.get(i))).finish()
        } else {
            f.debug_struct("ZeroSpVec")
                .field("len", &self.len)
                .field("entries", &self.raw_iter().collect::<Vec<_>>())
                .finish()
        }
    }
}
