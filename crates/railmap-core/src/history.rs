//! Bounded undo/redo history over graph snapshots.
//!
//! The history is a `(past, present, future)` triple of deep-copied
//! snapshots. Committing pushes the old present onto `past` (evicting the
//! oldest entry past the depth cap) and clears `future`. Undo and redo
//! shift the present one step and hand back the snapshot the graph store
//! should be reloaded from; they never fail on an empty stack.

use crate::snapshot::Snapshot;
use std::collections::VecDeque;

pub struct History {
    past: VecDeque<Snapshot>,
    present: Snapshot,
    future: Vec<Snapshot>,
    max_depth: usize,
}

impl History {
    /// Default undo depth.
    pub const DEFAULT_DEPTH: usize = 49;

    pub fn new(initial: Snapshot) -> Self {
        Self::with_depth(initial, Self::DEFAULT_DEPTH)
    }

    pub fn with_depth(initial: Snapshot, max_depth: usize) -> Self {
        Self {
            past: VecDeque::with_capacity(max_depth),
            present: initial,
            future: Vec::new(),
            max_depth,
        }
    }

    /// Record a committed edit. Clears the redo stack; the oldest undo
    /// entry is silently evicted once the depth cap is reached.
    pub fn commit(&mut self, snapshot: Snapshot) {
        self.future.clear();
        self.past.push_back(std::mem::replace(&mut self.present, snapshot));
        if self.past.len() > self.max_depth {
            log::trace!("history at capacity, evicting oldest entry");
            self.past.pop_front();
        }
    }

    /// Step back one edit. Returns the snapshot to reload, or `None` if
    /// there is nothing to undo.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        let previous = self.past.pop_back()?;
        self.future.push(std::mem::replace(&mut self.present, previous));
        Some(&self.present)
    }

    /// Step forward one undone edit. Returns the snapshot to reload, or
    /// `None` if there is nothing to redo.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let next = self.future.pop()?;
        self.past.push_back(std::mem::replace(&mut self.present, next));
        Some(&self.present)
    }

    pub fn present(&self) -> &Snapshot {
        &self.present
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }
}
