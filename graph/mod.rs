/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Graph data structures for the workflow canvas.
//!
//! Core structures:
//! - `Graph`: container for sub-steps backed by petgraph::StableGraph
//! - `StepNode`: a sub-step with label, status, position, and opaque payload
//! - `EdgeView`: read-only (source, target) pair derived from the graph
//!
//! Edges carry no payload of their own; "A leads to B" is the only relation.
//! Duplicate edges collapse and self-loops are rejected, so the outgoing
//! neighbors of a node always form a set.

use euclid::default::Point2D;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::{Directed, Direction};
use std::collections::HashMap;
use uuid::Uuid;

use crate::exchange::StepDoc;

/// Stable node handle (petgraph NodeIndex — survives other deletions)
pub type NodeKey = NodeIndex;

/// Completion state of a sub-step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum StepStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

/// A sub-step on the workflow canvas.
#[derive(Debug, Clone)]
pub struct StepNode {
    /// Stable step identity; survives save/reload cycles.
    pub id: Uuid,

    /// Short label shown on the card.
    pub label: String,

    /// Completion state.
    pub status: StepStatus,

    /// Position in canvas-local coordinates.
    pub position: Point2D<f32>,

    /// Action items and attachments; carried through untouched by every
    /// algorithm in this crate.
    pub payload: serde_json::Value,
}

/// Read-only view of an edge (built from petgraph edge references)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeView {
    pub source: NodeKey,
    pub target: NodeKey,
}

/// Partial update applied by [`Graph::update_step`]; `None` fields are left
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct StepPatch {
    pub label: Option<String>,
    pub status: Option<StepStatus>,
    pub payload: Option<serde_json::Value>,
}

impl StepPatch {
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.status.is_none() && self.payload.is_none()
    }
}

/// Origin of the deterministic stagger for freshly added steps.
const DEFAULT_POSITION_ORIGIN: f32 = 40.0;

/// Per-step diagonal offset for freshly added steps.
const DEFAULT_POSITION_STEP: f32 = 24.0;

/// Workflow graph backed by petgraph::StableGraph.
#[derive(Clone)]
pub struct Graph {
    /// The underlying petgraph stable graph
    inner: StableGraph<StepNode, (), Directed>,

    /// Stable UUID to node mapping.
    id_to_node: HashMap<Uuid, NodeKey>,

    /// Keys in creation order; the within-layer tie-break for auto layout.
    creation_order: Vec<NodeKey>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self {
            inner: StableGraph::new(),
            id_to_node: HashMap::new(),
            creation_order: Vec::new(),
        }
    }

    /// Add a new step with a fresh id and a deterministic staggered default
    /// position. Always succeeds.
    pub fn add_step(&mut self, label: impl Into<String>) -> NodeKey {
        let position = self.default_position();
        self.add_step_with_id(Uuid::new_v4(), label.into(), position)
    }

    /// Add a step with a pre-existing UUID.
    pub fn add_step_with_id(&mut self, id: Uuid, label: String, position: Point2D<f32>) -> NodeKey {
        let key = self.inner.add_node(StepNode {
            id,
            label,
            status: StepStatus::default(),
            position,
            payload: serde_json::Value::Null,
        });

        self.id_to_node.insert(id, key);
        self.creation_order.push(key);
        key
    }

    /// Diagonal stagger keyed on the current step count, so stacked cards
    /// stay individually grabbable and repeated adds are reproducible.
    fn default_position(&self) -> Point2D<f32> {
        let n = self.creation_order.len() as f32;
        Point2D::new(
            DEFAULT_POSITION_ORIGIN + DEFAULT_POSITION_STEP * n,
            DEFAULT_POSITION_ORIGIN + DEFAULT_POSITION_STEP * n,
        )
    }

    /// Remove a step and, in the same operation, every edge touching it.
    /// Returns `false` if the key is absent.
    pub fn remove_step(&mut self, key: NodeKey) -> bool {
        if let Some(step) = self.inner.remove_node(key) {
            self.id_to_node.remove(&step.id);
            self.creation_order.retain(|k| *k != key);
            true
        } else {
            false
        }
    }

    /// Merge the `Some` fields of `patch` into a step. Returns `false` if
    /// the key is absent.
    pub fn update_step(&mut self, key: NodeKey, patch: StepPatch) -> bool {
        let Some(step) = self.inner.node_weight_mut(key) else {
            return false;
        };
        if let Some(label) = patch.label {
            step.label = label;
        }
        if let Some(status) = patch.status {
            step.status = status;
        }
        if let Some(payload) = patch.payload {
            step.payload = payload;
        }
        true
    }

    /// Whether `connect(source, target)` would insert an edge: both
    /// endpoints exist, they differ, and the edge is not already present.
    pub fn can_connect(&self, source: NodeKey, target: NodeKey) -> bool {
        source != target
            && self.inner.contains_node(source)
            && self.inner.contains_node(target)
            && self.inner.find_edge(source, target).is_none()
    }

    /// Insert the edge source → target. Self-loops, missing endpoints, and
    /// duplicates are rejected as no-ops; returns whether an edge was added.
    pub fn connect(&mut self, source: NodeKey, target: NodeKey) -> bool {
        if !self.can_connect(source, target) {
            return false;
        }
        self.inner.add_edge(source, target, ());
        true
    }

    /// Remove the edge source → target if present.
    pub fn disconnect(&mut self, source: NodeKey, target: NodeKey) -> bool {
        match self.inner.find_edge(source, target) {
            Some(edge) => {
                self.inner.remove_edge(edge);
                true
            },
            None => false,
        }
    }

    /// Get a step by key
    pub fn get_step(&self, key: NodeKey) -> Option<&StepNode> {
        self.inner.node_weight(key)
    }

    /// Get a mutable step by key
    pub fn get_step_mut(&mut self, key: NodeKey) -> Option<&mut StepNode> {
        self.inner.node_weight_mut(key)
    }

    /// Get step key by UUID.
    pub fn step_key_by_id(&self, id: Uuid) -> Option<NodeKey> {
        self.id_to_node.get(&id).copied()
    }

    /// Iterate over all steps as (key, step) pairs, in creation order.
    pub fn steps(&self) -> impl Iterator<Item = (NodeKey, &StepNode)> {
        self.creation_order.iter().map(move |&key| (key, &self.inner[key]))
    }

    /// Iterate over all edges as EdgeView
    pub fn edges(&self) -> impl Iterator<Item = EdgeView> + '_ {
        self.inner.edge_references().map(|e| EdgeView {
            source: e.source(),
            target: e.target(),
        })
    }

    /// Iterate outgoing neighbor keys for a step
    pub fn out_neighbors(&self, key: NodeKey) -> impl Iterator<Item = NodeKey> + '_ {
        self.inner.neighbors_directed(key, Direction::Outgoing)
    }

    /// Iterate incoming neighbor keys for a step
    pub fn in_neighbors(&self, key: NodeKey) -> impl Iterator<Item = NodeKey> + '_ {
        self.inner.neighbors_directed(key, Direction::Incoming)
    }

    /// Check if a directed edge exists from `source` to `target`
    pub fn has_edge_between(&self, source: NodeKey, target: NodeKey) -> bool {
        self.inner.find_edge(source, target).is_some()
    }

    /// Count of steps in the graph
    pub fn step_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Count of edges in the graph
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Serialize every step to its document form, in creation order.
    pub fn to_docs(&self) -> Vec<StepDoc> {
        self.steps()
            .map(|(key, step)| StepDoc {
                step_id: step.id.to_string(),
                label: step.label.clone(),
                status: step.status,
                position_x: step.position.x,
                position_y: step.position.y,
                leads_to: self
                    .out_neighbors(key)
                    .filter_map(|target| self.get_step(target))
                    .map(|target| target.id.to_string())
                    .collect(),
                payload: step.payload.clone(),
            })
            .collect()
    }

    /// Rebuild a graph from step documents.
    ///
    /// Steps with unparseable or duplicate ids are dropped; `leads_to`
    /// entries that are malformed, self-referencing, repeated, or that point
    /// at a missing step are pruned by the `connect` guards.
    pub fn from_docs(docs: &[StepDoc]) -> Self {
        let mut graph = Graph::new();

        for doc in docs {
            let Ok(id) = Uuid::parse_str(&doc.step_id) else {
                log::warn!("dropping step with unparseable id {:?}", doc.step_id);
                continue;
            };
            if graph.id_to_node.contains_key(&id) {
                continue;
            }
            let key = graph.add_step_with_id(
                id,
                doc.label.clone(),
                Point2D::new(doc.position_x, doc.position_y),
            );
            if let Some(step) = graph.get_step_mut(key) {
                step.status = doc.status;
                step.payload = doc.payload.clone();
            }
        }

        for doc in docs {
            let Some(source) = Uuid::parse_str(&doc.step_id)
                .ok()
                .and_then(|id| graph.step_key_by_id(id))
            else {
                continue;
            };
            for target_id in &doc.leads_to {
                if let Some(target) = Uuid::parse_str(target_id)
                    .ok()
                    .and_then(|id| graph.step_key_by_id(id))
                {
                    graph.connect(source, target);
                }
            }
        }

        graph
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
