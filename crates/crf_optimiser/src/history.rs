//! Bounded window of per-iteration curvature records.
//!
//! The L-BFGS engine approximates curvature from the last *m* iterations'
//! `(Δpoint, Δgradient)` pairs. [`HistoryWindow`] keeps those pairs in
//! insertion order inside a `VecDeque`: pushing past capacity evicts the
//! oldest record, and the two-loop recursion traverses the window in both
//! directions through [`iter_oldest_first`](HistoryWindow::iter_oldest_first)
//! and [`iter_newest_first`](HistoryWindow::iter_newest_first) without
//! copying.

use std::collections::VecDeque;

/// One iteration's curvature record: `(Δpoint, Δgradient)`.
///
/// `Δpoint = point_k − point_{k−1}` and
/// `Δgradient = gradient_k − gradient_{k−1}`, both the same length as the
/// parameter vector. Immutable once created; the stored vectors are owned
/// copies, never aliases into the engine's working buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRecord {
    point_delta: Vec<f64>,
    gradient_delta: Vec<f64>,
}

impl IterationRecord {
    /// Create a record from owned difference vectors.
    pub fn new(point_delta: Vec<f64>, gradient_delta: Vec<f64>) -> Self {
        Self {
            point_delta,
            gradient_delta,
        }
    }

    /// The point difference `point_k − point_{k−1}`.
    pub fn point_delta(&self) -> &[f64] {
        &self.point_delta
    }

    /// The gradient difference `gradient_k − gradient_{k−1}`.
    pub fn gradient_delta(&self) -> &[f64] {
        &self.gradient_delta
    }
}

/// Insertion-ordered, capacity-bounded store of [`IterationRecord`]s.
///
/// Newest records sit at the back of the deque. `push` appends and, when the
/// bound is exceeded, immediately evicts the oldest record from the front, so
/// `len() <= capacity()` holds after every operation.
///
/// # Example
///
/// ```
/// use crf_optimiser::history::{HistoryWindow, IterationRecord};
///
/// let mut window = HistoryWindow::new(2);
/// for i in 0..3 {
///     let v = i as f64;
///     window.push(IterationRecord::new(vec![v], vec![v + 10.0]));
/// }
///
/// // Capacity 2: record 0 was evicted, records 1 and 2 remain in order
/// assert_eq!(window.len(), 2);
/// let oldest: Vec<f64> = window
///     .iter_oldest_first()
///     .map(|r| r.point_delta()[0])
///     .collect();
/// assert_eq!(oldest, vec![1.0, 2.0]);
/// ```
#[derive(Debug, Clone)]
pub struct HistoryWindow {
    records: VecDeque<IterationRecord>,
    capacity: usize,
}

impl HistoryWindow {
    /// Create an empty window with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be > 0");
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the window holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The configured bound `m`.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a record, evicting the oldest if the bound is exceeded.
    pub fn push(&mut self, record: IterationRecord) {
        self.records.push_back(record);
        if self.records.len() > self.capacity {
            self.records.pop_front();
        }
        debug_assert!(self.records.len() <= self.capacity);
    }

    /// The most recently pushed record, if any.
    pub fn newest(&self) -> Option<&IterationRecord> {
        self.records.back()
    }

    /// Traverse records from oldest to newest.
    pub fn iter_oldest_first(&self) -> impl DoubleEndedIterator<Item = &IterationRecord> {
        self.records.iter()
    }

    /// Traverse records from newest to oldest.
    pub fn iter_newest_first(&self) -> impl DoubleEndedIterator<Item = &IterationRecord> {
        self.records.iter().rev()
    }
}
