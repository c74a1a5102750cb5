/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Editing session state and the intent reducer.
//!
//! Every mutating command is an `EditIntent`. Applying one commits the
//! pre-mutation task to history first, so each discrete user action is
//! exactly one undo step. Commands that provably would not change anything
//! (self-loop connects, missing ids, empty batches) are dropped before the
//! commit, keeping the undo timeline free of no-ops.
//!
//! Connection drafting and node dragging are wired through here as well,
//! but only their terminal effects reach the reducer; the gestures
//! themselves never enter history.

use euclid::default::{Point2D, Size2D};
use uuid::Uuid;

use crate::exchange::{PlanProposal, TaskDoc};
use crate::graph::{Graph, StepPatch};
use crate::history::History;
use crate::interaction::{ConnectionDraft, ConnectionSession, NodeDrag};
use crate::layout::{self, LayoutParams};

/// The single editable unit: a titled workflow graph plus opaque payload.
#[derive(Clone)]
pub struct Task {
    /// Stable task identity; survives save/reload cycles.
    pub id: Uuid,

    /// Task title.
    pub title: String,

    /// The workflow graph of sub-steps.
    pub graph: Graph,

    /// Task-level payload (description, report data); untouched here.
    pub payload: serde_json::Value,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            graph: Graph::new(),
            payload: serde_json::Value::Null,
        }
    }

    /// The current task as the plain document shared with the plan
    /// generation service (save/reload and "regenerate" unit).
    pub fn to_doc(&self) -> TaskDoc {
        TaskDoc {
            task_id: self.id.to_string(),
            title: self.title.clone(),
            steps: self.graph.to_docs(),
            payload: self.payload.clone(),
        }
    }

    /// Rebuild a task from a document. An unparseable task id gets a fresh
    /// one; malformed steps and edges are pruned by the graph load.
    pub fn from_doc(doc: &TaskDoc) -> Self {
        Self {
            id: Uuid::parse_str(&doc.task_id).unwrap_or_else(|_| Uuid::new_v4()),
            title: doc.title.clone(),
            graph: Graph::from_docs(&doc.steps),
            payload: doc.payload.clone(),
        }
    }
}

/// A mutating (or history-navigating) editor command.
///
/// Steps are addressed by their stable UUID, not by graph key: ids stay
/// valid across undo/redo restores and save/reload cycles, and a command
/// racing a deletion simply resolves to nothing and no-ops.
#[derive(Debug, Clone)]
pub enum EditIntent {
    AddStep {
        label: String,
    },
    RemoveStep {
        step: Uuid,
    },
    UpdateStep {
        step: Uuid,
        patch: StepPatch,
    },
    /// Final position of a finished drag; one undo step per drag.
    MoveStep {
        step: Uuid,
        position: Point2D<f32>,
    },
    Connect {
        source: Uuid,
        target: Uuid,
    },
    Disconnect {
        source: Uuid,
        target: Uuid,
    },
    /// Bulk-create steps from plan-service proposals; one undo step for the
    /// whole batch.
    AcceptProposals {
        proposals: Vec<PlanProposal>,
    },
    /// Run the layered layout once and write the positions back.
    AutoLayout {
        available_width: f32,
    },
    /// Swap in a whole task document (save/reload, regenerate result).
    ReplaceTask {
        doc: TaskDoc,
    },
    Undo,
    Redo,
}

/// Main editing session state.
pub struct WorkflowApp {
    /// The task being edited.
    pub task: Task,

    /// Undo/redo snapshots of the whole task.
    history: History<Task>,

    /// Active connect gesture, if any.
    connection: ConnectionSession,

    /// Active node drag, if any.
    drag: Option<NodeDrag>,

    /// Card metrics used by auto layout.
    pub layout_params: LayoutParams,

    /// Content-area size required by the last auto layout.
    content_size: Size2D<f32>,
}

impl WorkflowApp {
    pub fn new(task: Task) -> Self {
        Self {
            task,
            history: History::new(),
            connection: ConnectionSession::new(),
            drag: None,
            layout_params: LayoutParams::default(),
            content_size: Size2D::zero(),
        }
    }

    pub fn apply_intents<I>(&mut self, intents: I)
    where
        I: IntoIterator<Item = EditIntent>,
    {
        for intent in intents {
            self.apply_intent(intent);
        }
    }

    pub fn apply_intent(&mut self, intent: EditIntent) {
        match intent {
            EditIntent::AddStep { label } => {
                self.commit();
                self.task.graph.add_step(label);
            },
            EditIntent::RemoveStep { step } => {
                let Some(key) = self.task.graph.step_key_by_id(step) else {
                    return;
                };
                self.commit();
                self.task.graph.remove_step(key);
            },
            EditIntent::UpdateStep { step, patch } => {
                if patch.is_empty() {
                    return;
                }
                let Some(key) = self.task.graph.step_key_by_id(step) else {
                    return;
                };
                self.commit();
                self.task.graph.update_step(key, patch);
            },
            EditIntent::MoveStep { step, position } => {
                let Some(key) = self.task.graph.step_key_by_id(step) else {
                    return;
                };
                self.commit();
                if let Some(node) = self.task.graph.get_step_mut(key) {
                    node.position = position;
                }
            },
            EditIntent::Connect { source, target } => {
                let Some(source) = self.task.graph.step_key_by_id(source) else {
                    return;
                };
                let Some(target) = self.task.graph.step_key_by_id(target) else {
                    return;
                };
                if !self.task.graph.can_connect(source, target) {
                    return;
                }
                self.commit();
                self.task.graph.connect(source, target);
            },
            EditIntent::Disconnect { source, target } => {
                let Some(source) = self.task.graph.step_key_by_id(source) else {
                    return;
                };
                let Some(target) = self.task.graph.step_key_by_id(target) else {
                    return;
                };
                if !self.task.graph.has_edge_between(source, target) {
                    return;
                }
                self.commit();
                self.task.graph.disconnect(source, target);
            },
            EditIntent::AcceptProposals { proposals } => {
                if proposals.is_empty() {
                    return;
                }
                self.commit();
                log::info!("accepting {} proposed steps", proposals.len());
                for proposal in proposals {
                    let key = self.task.graph.add_step(proposal.title);
                    if !proposal.description.is_empty()
                        && let Some(step) = self.task.graph.get_step_mut(key)
                    {
                        step.payload =
                            serde_json::json!({ "description": proposal.description });
                    }
                }
            },
            EditIntent::AutoLayout { available_width } => {
                if self.task.graph.step_count() == 0 {
                    return;
                }
                self.commit();
                let layout =
                    layout::layered_layout(&self.task.graph, available_width, &self.layout_params);
                for (&id, &position) in &layout.positions {
                    if let Some(key) = self.task.graph.step_key_by_id(id)
                        && let Some(step) = self.task.graph.get_step_mut(key)
                    {
                        step.position = position;
                    }
                }
                self.content_size = layout.content_size;
            },
            EditIntent::ReplaceTask { doc } => {
                self.commit();
                self.task = Task::from_doc(&doc);
            },
            EditIntent::Undo => {
                if let Some(prev) = self.history.undo(&self.task) {
                    self.task = prev;
                }
            },
            EditIntent::Redo => {
                if let Some(next) = self.history.redo(&self.task) {
                    self.task = next;
                }
            },
        }
    }

    /// Push the pre-mutation task onto the undo stack.
    fn commit(&mut self) {
        self.history.commit(self.task.clone());
    }

    // ---- connection gesture wiring -------------------------------------

    /// Press on a step's connection handle.
    pub fn begin_connect(&mut self, source: Uuid, pointer: Point2D<f32>) {
        if self.task.graph.step_key_by_id(source).is_none() {
            return;
        }
        self.connection.begin(source, pointer);
    }

    /// Pointer moved during a connect gesture; updates only the preview.
    pub fn update_connect_pointer(&mut self, pointer: Point2D<f32>) {
        self.connection.move_pointer(pointer);
    }

    /// Release over a step. The resulting edge goes through the normal
    /// intent path, so it commits like any other mutation.
    pub fn complete_connect(&mut self, target: Uuid) {
        if let Some((source, target)) = self.connection.release(target) {
            self.apply_intent(EditIntent::Connect { source, target });
        }
    }

    /// Release outside any valid target.
    pub fn cancel_connect(&mut self) {
        self.connection.cancel();
    }

    pub fn connection_draft(&self) -> Option<&ConnectionDraft> {
        self.connection.draft()
    }

    // ---- drag wiring ---------------------------------------------------

    /// Press on a step card; captures the grab offset.
    pub fn begin_drag(&mut self, step: Uuid, pointer: Point2D<f32>) {
        let Some(key) = self.task.graph.step_key_by_id(step) else {
            return;
        };
        let Some(node) = self.task.graph.get_step(key) else {
            return;
        };
        self.drag = Some(NodeDrag::begin(step, pointer, node.position));
    }

    /// Preview position for the active drag; pure, no mutation. `container`
    /// is the content-area size measured right now.
    pub fn drag_position(
        &self,
        pointer: Point2D<f32>,
        node_size: Size2D<f32>,
        container: Size2D<f32>,
    ) -> Option<Point2D<f32>> {
        self.drag
            .as_ref()
            .map(|drag| drag.position_for(pointer, node_size, container))
    }

    /// Drop: clamp against the container measured at this moment and commit
    /// a single move. A step deleted mid-drag resolves to a no-op.
    pub fn finish_drag(
        &mut self,
        pointer: Point2D<f32>,
        node_size: Size2D<f32>,
        container: Size2D<f32>,
    ) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        let position = drag.position_for(pointer, node_size, container);
        self.apply_intent(EditIntent::MoveStep {
            step: drag.node,
            position,
        });
    }

    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    // ---- collaborator + inspection surface -----------------------------

    /// The current task as plain data for the plan generation service.
    pub fn task_doc(&self) -> TaskDoc {
        self.task.to_doc()
    }

    /// Content-area size required by the last auto layout.
    pub fn content_size(&self) -> Size2D<f32> {
        self.content_size
    }

    pub fn undo_stack_len(&self) -> usize {
        self.history.undo_len()
    }

    pub fn redo_stack_len(&self) -> usize {
        self.history.redo_len()
    }
}
