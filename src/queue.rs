//! Gang queue: strict FIFO, head-of-line only.

use crate::gang::Gang;
use std::collections::VecDeque;

/// Ordered collection of gangs awaiting admission. Only the head is ever
/// inspected by the scheduler; there is no reordering or skipping.
#[derive(Debug, Default)]
pub struct GangQueue {
    gangs: VecDeque<Gang>,
}

impl GangQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends at the tail.
    pub fn enqueue(&mut self, gang: Gang) {
        self.gangs.push_back(gang);
    }

    /// The head gang, without removing it.
    pub fn peek_head(&self) -> Option<&Gang> {
        self.gangs.front()
    }

    /// Removes and returns the head gang.
    pub fn dequeue_head(&mut self) -> Option<Gang> {
        self.gangs.pop_front()
    }

    pub fn len(&self) -> usize {
        self.gangs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gangs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Gang> {
        self.gangs.iter()
    }
}
