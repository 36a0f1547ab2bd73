//! TabuList - Bounded recency set of tried builds

use crate::types::Build;
use std::collections::{HashSet, VecDeque};

/// Remembers the most recent builds; the oldest is evicted first
#[derive(Debug, Clone)]
pub struct TabuList {
    capacity: usize,
    order: VecDeque<Build>,
    members: HashSet<Build>,
}

impl TabuList {
    pub fn new(capacity: usize) -> Self {
        TabuList {
            capacity,
            order: VecDeque::with_capacity(capacity),
            members: HashSet::with_capacity(capacity),
        }
    }

    pub fn contains(&self, build: &Build) -> bool {
        self.members.contains(build)
    }

    /// Record a build. Returns false if it was already present.
    ///
    /// The list never holds more than `capacity` entries.
    pub fn insert(&mut self, build: Build) -> bool {
        if self.capacity == 0 || self.members.contains(&build) {
            return false;
        }
        if self.order.len() == self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.members.remove(&oldest);
            }
        }
        self.order.push_back(build);
        self.members.insert(build);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
