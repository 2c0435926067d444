// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Depth-first priority queue of pending work items.
//!
//! Every value sitting at some point of the graph, waiting to be pushed
//! through the node's outgoing edges, is a [`WorkItem`]. The queue decides
//! which one the scheduler looks at next.
//!
//! # Priority Ordering
//!
//! Items are ordered by:
//! 1. **Depth** (higher = higher priority): the search dives along the most
//!    recently extended frontier instead of sweeping breadth-first, which
//!    finds a first satisfying result quickly
//! 2. **Insertion order** (earlier = higher priority) among items of equal
//!    depth, so siblings are explored in the order they were emitted
//!
//! The tie-break is fully deterministic: two runs over the same graph and
//! input visit items in the same order.
//!
//! # Examples
//!
//! ```rust
//! use the_thicket::graph::NodeIndex;
//! use the_thicket::engine::work_queue::{PriorityWorkQueue, WorkItem};
//! use the_thicket::Value;
//!
//! let node = NodeIndex::new(0);
//! let mut queue = PriorityWorkQueue::new();
//!
//! queue.push(WorkItem::new(node, Value::new("shallow"), 1));
//! queue.push(WorkItem::new(node, Value::new("deep"), 3));
//! queue.push(WorkItem::new(node, Value::new("deep, later"), 3));
//!
//! let order: Vec<&'static str> = std::iter::from_fn(|| queue.pop())
//!     .map(|item| item.value.downcast::<&'static str>().unwrap())
//!     .collect();
//! assert_eq!(order, vec!["deep", "deep, later", "shallow"]);
//! ```

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use petgraph::graph::NodeIndex;

use crate::value::Value;

/// One value waiting at one node.
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub node: NodeIndex,
    pub value: Value,
    pub depth: usize,
}

impl WorkItem {
    pub fn new(node: NodeIndex, value: Value, depth: usize) -> Self {
        Self { node, value, depth }
    }
}

#[derive(Debug)]
struct PrioritizedItem {
    item: WorkItem,
    sequence: u64,
}

impl PartialEq for PrioritizedItem {
    fn eq(&self, other: &Self) -> bool {
        self.sequence == other.sequence
    }
}

impl Eq for PrioritizedItem {}

impl PartialOrd for PrioritizedItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PrioritizedItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: deeper items pop first, and at equal
        // depth the smaller sequence number (inserted earlier) wins.
        match self.item.depth.cmp(&other.item.depth) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            other_ordering => other_ordering,
        }
    }
}

/// Priority queue of [`WorkItem`]s, deepest first, FIFO among equals.
#[derive(Debug, Default)]
pub struct PriorityWorkQueue {
    heap: BinaryHeap<PrioritizedItem>,
    next_sequence: u64,
}

impl PriorityWorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: WorkItem) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(PrioritizedItem { item, sequence });
    }

    /// Pushes items keeping their relative order for equal depths.
    pub fn extend<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = WorkItem>,
    {
        for item in items {
            self.push(item);
        }
    }

    /// Removes and returns the highest-priority item.
    pub fn pop(&mut self) -> Option<WorkItem> {
        self.heap.pop().map(|prioritized| prioritized.item)
    }

    pub fn peek(&self) -> Option<&WorkItem> {
        self.heap.peek().map(|prioritized| &prioritized.item)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
