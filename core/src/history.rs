use std::collections::VecDeque;

use crate::gradient::GradientDescription;

pub const HISTORY_CAPACITY: usize = 9;

/// Previously generated gradients, newest first.
///
/// Eviction is plain truncation from the tail: selecting an entry does not
/// move it, and identical gradients are kept as separate entries.
#[derive(Clone, Debug)]
pub struct GradientHistory {
    entries: VecDeque<GradientDescription>,
}

impl GradientHistory {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAPACITY + 1),
        }
    }

    pub fn record(&mut self, gradient: GradientDescription) {
        self.entries.push_front(gradient);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn select(&self, index: usize) -> Option<&GradientDescription> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GradientDescription> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for GradientHistory {
    fn default() -> Self {
        Self::new()
    }
}
