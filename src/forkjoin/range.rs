//! Work ranges and the split policy shared by every executor.

/// Inclusive index interval `[low, high]` into a dataset.
///
/// An empty range only appears as the root of a zero-length input; the
/// executors never split into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkRange {
    low: usize,
    len: usize,
}

impl WorkRange {
    /// Inclusive range `[low, high]`
    pub fn new(low: usize, high: usize) -> Self {
        assert!(low <= high, "inclusive range requires low <= high");
        Self {
            low,
            len: high - low + 1,
        }
    }

    /// Range covering `0..len` (empty when `len == 0`)
    pub fn covering(len: usize) -> Self {
        Self { low: 0, len }
    }

    pub fn low(&self) -> usize {
        self.low
    }

    /// Inclusive upper bound. Equals `low` for an empty range.
    pub fn high(&self) -> usize {
        self.low + self.len.saturating_sub(1)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn indices(&self) -> std::ops::Range<usize> {
        self.low..self.low + self.len
    }

    /// Split policy: split while more than one unit remains.
    ///
    /// There is no granularity threshold; recursion runs down to
    /// single-element leaves.
    pub fn should_split(&self) -> bool {
        self.len > 1
    }

    /// Split at `mid = (low + high) / 2` into `[low, mid]` and `[mid + 1, high]`.
    ///
    /// Returns `None` when the range is a leaf.
    pub fn split(&self) -> Option<(WorkRange, WorkRange)> {
        if !self.should_split() {
            return None;
        }
        let high = self.high();
        let mid = self.low + (high - self.low) / 2;
        Some((WorkRange::new(self.low, mid), WorkRange::new(mid + 1, high)))
    }
}
