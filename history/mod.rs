/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Linear snapshot undo/redo stacks.
//!
//! Snapshots are full deep copies of the editable state, recorded *before*
//! each mutation, so one user action is exactly one undo step. Ephemeral
//! pointer state (connection drafts, drag offsets) never enters these
//! stacks.

/// Maximum retained undo depth; the oldest entries are trimmed first.
pub const MAX_UNDO_STEPS: usize = 128;

/// Two-stack undo/redo over full-state snapshots.
#[derive(Debug, Clone)]
pub struct History<S> {
    /// Past states, most recent last.
    undo: Vec<S>,
    /// Future states, most recent last.
    redo: Vec<S>,
}

impl<S: Clone> History<S> {
    pub fn new() -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
        }
    }

    /// Record the pre-mutation state. Starts a fresh timeline: the redo
    /// stack is cleared entirely.
    pub fn commit(&mut self, prior: S) {
        self.undo.push(prior);
        self.redo.clear();
        if self.undo.len() > MAX_UNDO_STEPS {
            let excess = self.undo.len() - MAX_UNDO_STEPS;
            self.undo.drain(0..excess);
        }
    }

    /// Step back once: `current` moves to the redo stack and the most
    /// recent snapshot is returned as the new current state. `None` on an
    /// empty undo stack (nothing changes).
    pub fn undo(&mut self, current: &S) -> Option<S> {
        let prev = self.undo.pop()?;
        self.redo.push(current.clone());
        Some(prev)
    }

    /// Symmetric inverse of [`History::undo`].
    pub fn redo(&mut self, current: &S) -> Option<S> {
        let next = self.redo.pop()?;
        self.undo.push(current.clone());
        Some(next)
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }
}

impl<S: Clone> Default for History<S> {
    fn default() -> Self {
        Self::new()
    }
}
