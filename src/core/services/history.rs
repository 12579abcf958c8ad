//! Bounded session history and aggregates over completed reps

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::core::models::RepAnalysis;

/// FIFO buffer that evicts its oldest entry when full
#[derive(Debug, Clone)]
pub struct RollingBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingBuffer<T> {
    /// Create a buffer holding at most `capacity` items (at least one)
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append, evicting the oldest entry if full
    pub fn push(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    /// Number of buffered items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the buffer is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.items.iter()
    }

    /// The last `n` items, oldest first
    pub fn latest(&self, n: usize) -> impl Iterator<Item = &T> {
        self.items.iter().skip(self.items.len().saturating_sub(n))
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Clone> RollingBuffer<T> {
    /// Copy of the contents, oldest first
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

/// Mean rep score, `None` without reps
#[must_use]
pub fn average_score<'a>(reps: impl IntoIterator<Item = &'a RepAnalysis>) -> Option<f32> {
    let (sum, count) = reps.into_iter().fold((0.0_f32, 0_u32), |(sum, count), rep| {
        (sum + rep.form_score, count + 1)
    });
    if count == 0 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = count as f32;
    Some(sum / count)
}

/// Number of reps in which each violation type occurred
#[must_use]
pub fn violation_frequency<'a>(
    reps: impl IntoIterator<Item = &'a RepAnalysis>,
) -> BTreeMap<String, usize> {
    let mut frequency = BTreeMap::new();
    for rep in reps {
        let types: BTreeSet<&str> = rep.violations.iter().map(|v| v.violation_type.as_str()).collect();
        for t in types {
            *frequency.entry(t.to_string()).or_insert(0) += 1;
        }
    }
    frequency
}
