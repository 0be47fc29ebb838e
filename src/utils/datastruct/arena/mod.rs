/// Append-only storage for many sparse rows.
/// All rows share two contiguous buffers (`inds` / `vals`);
/// `slots` records where each row lives.
#[derive(Debug, Clone, Default)]
pub struct RowArena<N> {
    inds: Vec<u32>,
    vals: Vec<N>,
    slots: Vec<RowSlot>,
}

/// Position of one row inside the arena buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RowSlot {
    offset: usize,
    len: usize,
}

impl<N: Copy> RowArena<N> {
    pub fn new() -> Self {
        Self {
            inds: Vec::new(),
            vals: Vec::new(),
            slots: Vec::new(),
        }
    }

    /// Append one row and return its row number
    pub fn alloc(&mut self, inds: &[u32], vals: &[N]) -> usize {
        debug_assert_eq!(inds.len(), vals.len());
        let slot = RowSlot {
            offset: self.inds.len(),
            len: inds.len(),
        };
        self.inds.extend_from_slice(inds);
        self.vals.extend_from_slice(vals);
        self.slots.push(slot);
        self.slots.len() - 1
    }

    /// number of rows
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// total stored entries across all rows
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    /// (indices, values) of `row`
    #[inline]
    pub fn get(&self, row: usize) -> Option<(&[u32], &[N])> {
        let slot = self.slots.get(row)?;
        let range = slot.offset..slot.offset + slot.len;
        Some((&self.inds[range.clone()], &self.vals[range]))
    }
}
