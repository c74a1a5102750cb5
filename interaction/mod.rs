/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Ephemeral pointer-driven editing state.
//!
//! Connection drafting and node dragging live outside the undo timeline;
//! only their terminal effects (a new edge, a final position) become
//! history-visible mutations. Nothing here touches the graph.

use euclid::default::{Point2D, Size2D, Vector2D};
use uuid::Uuid;

/// Live state of an in-progress connect gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionDraft {
    /// Step the gesture started from.
    pub source: Uuid,

    /// Last observed pointer position, canvas-local.
    pub pointer: Point2D<f32>,
}

/// Drag-to-connect state machine: idle, or exactly one active draft.
#[derive(Debug, Default)]
pub struct ConnectionSession {
    draft: Option<ConnectionDraft>,
}

impl ConnectionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_drafting(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&ConnectionDraft> {
        self.draft.as_ref()
    }

    /// Start drafting from `source`. An already-active draft is implicitly
    /// cancelled; the new gesture wins.
    pub fn begin(&mut self, source: Uuid, pointer: Point2D<f32>) {
        if self.draft.is_some() {
            log::debug!("connect gesture restarted while drafting; prior draft dropped");
        }
        self.draft = Some(ConnectionDraft { source, pointer });
    }

    /// Track the pointer during a draft. No-op when idle; never touches the
    /// graph.
    pub fn move_pointer(&mut self, pointer: Point2D<f32>) {
        if let Some(draft) = self.draft.as_mut() {
            draft.pointer = pointer;
        }
    }

    /// End the gesture over `target`. Returns the (source, target) edge to
    /// create, or `None` when idle or when the release lands back on the
    /// source (treated as cancel).
    pub fn release(&mut self, target: Uuid) -> Option<(Uuid, Uuid)> {
        let draft = self.draft.take()?;
        if draft.source == target {
            return None;
        }
        Some((draft.source, target))
    }

    /// Abandon the gesture (release landed outside any valid target).
    pub fn cancel(&mut self) {
        self.draft = None;
    }
}

/// A node drag in progress. The pointer-to-node offset is captured once at
/// press time so the card does not jump under the cursor.
#[derive(Debug, Clone, Copy)]
pub struct NodeDrag {
    /// Step being dragged.
    pub node: Uuid,

    /// Pointer minus node origin at drag start.
    grab_offset: Vector2D<f32>,
}

impl NodeDrag {
    /// Capture a drag: `pointer` is the press position and `node_origin` the
    /// node's position at that moment.
    pub fn begin(node: Uuid, pointer: Point2D<f32>, node_origin: Point2D<f32>) -> Self {
        Self {
            node,
            grab_offset: pointer - node_origin,
        }
    }

    /// Position for the dragged node under `pointer`, clamped per axis so
    /// the node stays inside the container. `container` must be the size
    /// measured at call time, not a value cached at drag start; the content
    /// area may have grown since.
    pub fn position_for(
        &self,
        pointer: Point2D<f32>,
        node_size: Size2D<f32>,
        container: Size2D<f32>,
    ) -> Point2D<f32> {
        let raw = pointer - self.grab_offset;
        Point2D::new(
            raw.x.clamp(0.0, (container.width - node_size.width).max(0.0)),
            raw.y.clamp(0.0, (container.height - node_size.height).max(0.0)),
        )
    }
}
