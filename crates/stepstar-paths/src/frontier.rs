use std::cmp::Ordering;
use std::collections::BinaryHeap;

use stepstar_core::{Cost, NodeId};

/// Where a node stands in the current search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Membership {
    /// Not reached yet.
    #[default]
    Unseen,
    /// Discovered and waiting to be expanded.
    Open,
    /// Expanded. Never revisited.
    Closed,
}

/// Heap entry ordered so that `BinaryHeap` (a max-heap) pops the best node:
/// lowest `f`, then lowest `h`, then earliest insertion.
#[derive(Clone, Copy, Debug)]
struct Entry {
    id: NodeId,
    f: f64,
    h: f64,
    seq: u64,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.h.total_cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Open and closed sets of a search over one grid.
///
/// Re-keyed nodes leave stale heap entries behind; they are discarded by
/// [`settle`](Frontier::settle). Every mutating method leaves the heap
/// settled, so [`peek`](Frontier::peek) always sees a live entry.
#[derive(Clone, Debug)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Entry>,
    membership: Vec<Membership>,
    // Sequence number of the live heap entry for each open node.
    latest: Vec<u64>,
    next_seq: u64,
    open_len: usize,
    closed_len: usize,
}

impl Frontier {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            heap: BinaryHeap::new(),
            membership: vec![Membership::Unseen; len],
            latest: vec![0; len],
            next_seq: 0,
            open_len: 0,
            closed_len: 0,
        }
    }

    #[inline]
    pub(crate) fn membership(&self, id: NodeId) -> Membership {
        self.membership[id.index()]
    }

    #[inline]
    pub(crate) fn open_len(&self) -> usize {
        self.open_len
    }

    #[inline]
    pub(crate) fn closed_len(&self) -> usize {
        self.closed_len
    }

    /// Insert `id` into the open set, or re-key it if it is already there.
    ///
    /// Closed nodes are ignored.
    pub(crate) fn push(&mut self, id: NodeId, cost: Cost) {
        let i = id.index();
        match self.membership[i] {
            Membership::Closed => return,
            Membership::Unseen => {
                self.membership[i] = Membership::Open;
                self.open_len += 1;
            }
            Membership::Open => {}
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.latest[i] = seq;
        self.heap.push(Entry {
            id,
            f: cost.f(),
            h: cost.h,
            seq,
        });
        self.settle();
    }

    /// The open node with the best priority, if any.
    #[inline]
    pub(crate) fn peek(&self) -> Option<NodeId> {
        self.heap.peek().map(|e| e.id)
    }

    /// Move the best open node to the closed set and return it.
    pub(crate) fn close_min(&mut self) -> Option<NodeId> {
        let entry = self.heap.pop()?;
        let i = entry.id.index();
        self.membership[i] = Membership::Closed;
        self.open_len -= 1;
        self.closed_len += 1;
        self.settle();
        Some(entry.id)
    }

    /// Drop stale entries from the top of the heap.
    fn settle(&mut self) {
        while let Some(top) = self.heap.peek() {
            let i = top.id.index();
            if self.membership[i] == Membership::Open && self.latest[i] == top.seq {
                break;
            }
            self.heap.pop();
        }
    }
}
