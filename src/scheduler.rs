//! Event queue driving the combat loop

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Round to 3 decimal places so float noise never reorders events
#[inline(always)]
pub fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

/// Scheduled action. Ordered by (time, priority, sequence), lowest first.
#[derive(Debug, Clone)]
pub struct Event<A> {
    pub time: f64,
    /// Lower = handled first among events at the same time
    pub priority: i32,
    sequence: u64,
    pub action: A,
}

impl<A> PartialEq for Event<A> {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.priority == other.priority && self.sequence == other.sequence
    }
}

impl<A> Eq for Event<A> {}

impl<A> PartialOrd for Event<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A> Ord for Event<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap
        other
            .time
            .partial_cmp(&self.time)
            .unwrap_or(Ordering::Equal)
            .then(other.priority.cmp(&self.priority))
            .then(other.sequence.cmp(&self.sequence))
    }
}

#[derive(Debug, Clone)]
pub struct EventQueue<A> {
    heap: BinaryHeap<Event<A>>,
    next_sequence: u64,
}

impl<A> Default for EventQueue<A> {
    fn default() -> Self {
        Self { heap: BinaryHeap::new(), next_sequence: 0 }
    }
}

impl<A> EventQueue<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, time: f64, priority: i32, action: A) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(Event { time: round3(time), priority, sequence, action });
    }

    pub fn pop(&mut self) -> Option<Event<A>> {
        self.heap.pop()
    }

    pub fn peek_time(&self) -> Option<f64> {
        self.heap.peek().map(|e| e.time)
    }

    /// Drop every pending event whose action matches
    pub fn cancel_where<F: FnMut(&A) -> bool>(&mut self, mut pred: F) {
        self.heap.retain(|e| !pred(&e.action));
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
