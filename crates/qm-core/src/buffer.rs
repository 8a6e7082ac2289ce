//! Growable row storage shared by the curve builders.
//!
//! Rows are fixed-width `[f64; N]` records. Capacity doubles whenever an
//! insertion would push the fill level past [`GROWTH_THRESHOLD`], so the
//! algorithms only ever see `push`, `get` and `trim`.

/// Fill ratio at which the buffer doubles its capacity.
pub const GROWTH_THRESHOLD: f64 = 0.75;

const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct DynamicBuffer<const N: usize> {
    rows: Vec<[f64; N]>,
    capacity: usize,
}

impl<const N: usize> Default for DynamicBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> DynamicBuffer<N> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            rows: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a row, growing first if the fill threshold would be exceeded.
    pub fn push(&mut self, row: [f64; N]) {
        let filled = (self.rows.len() + 1) as f64;
        if filled > GROWTH_THRESHOLD * self.capacity as f64 {
            self.grow();
        }
        self.rows.push(row);
    }

    fn grow(&mut self) {
        let target = self.capacity * 2;
        self.rows.reserve_exact(target - self.rows.len());
        self.capacity = target;
    }

    pub fn get(&self, index: usize) -> Option<&[f64; N]> {
        self.rows.get(index)
    }

    pub fn first(&self) -> Option<&[f64; N]> {
        self.rows.first()
    }

    pub fn last(&self) -> Option<&[f64; N]> {
        self.rows.last()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Logical capacity (rows reserved before the next doubling).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn rows(&self) -> &[[f64; N]] {
        &self.rows
    }

    /// Copy one column out of the buffer.
    ///
    /// # Panics
    /// Panics if `col >= N`.
    pub fn column(&self, col: usize) -> Vec<f64> {
        assert!(col < N, "column {col} out of range for width {N}");
        self.rows.iter().map(|row| row[col]).collect()
    }

    /// Release unused capacity and hand the rows to the caller.
    pub fn trim(mut self) -> Vec<[f64; N]> {
        self.rows.shrink_to_fit();
        self.rows
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn fill_never_exceeds_threshold(n in 0usize..2000, start in 1usize..32) {
            let mut buf = DynamicBuffer::<1>::with_capacity(start);
            for i in 0..n {
                buf.push([i as f64]);
                prop_assert!(buf.len() as f64 <= GROWTH_THRESHOLD * buf.capacity() as f64);
            }
            prop_assert_eq!(buf.len(), n);
        }
    }
}
