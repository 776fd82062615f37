use {
    crate::models::Pivot,
    serde::{Deserialize, Serialize},
    std::{collections::VecDeque, ops::Range},
};

/// Bounded pivot history, most recent first. Pushing past capacity silently drops the oldest entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotHistory {
    pivots: VecDeque<Pivot>,
    capacity: usize,
}

impl PivotHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            pivots: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.pivots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pivots.is_empty()
    }

    /// 0 = most recent.
    pub fn get(&self, i: usize) -> Option<&Pivot> {
        self.pivots.get(i)
    }

    pub fn latest(&self) -> Option<&Pivot> {
        self.pivots.front()
    }

    /// Most recent first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Pivot> + ExactSizeIterator {
        self.pivots.iter()
    }

    /// Owned copies of the pivots in `range` (most-recent-first positions), clamped to what is retained.
    pub fn slice(&self, range: Range<usize>) -> Vec<Pivot> {
        let end = range.end.min(self.pivots.len());
        let start = range.start.min(end);
        self.pivots.range(start..end).cloned().collect()
    }

    pub fn clear(&mut self) {
        self.pivots.clear();
    }

    /// Returns the evicted pivot, if any.
    pub(crate) fn push_front(&mut self, pivot: Pivot) -> Option<Pivot> {
        self.pivots.push_front(pivot);
        if self.pivots.len() > self.capacity {
            self.pivots.pop_back()
        } else {
            None
        }
    }

    pub(crate) fn pop_front(&mut self) -> Option<Pivot> {
        self.pivots.pop_front()
    }
}

impl<'a> IntoIterator for &'a PivotHistory {
    type Item = &'a Pivot;
    type IntoIter = std::collections::vec_deque::Iter<'a, Pivot>;

    fn into_iter(self) -> Self::IntoIter {
        self.pivots.iter()
    }
}
