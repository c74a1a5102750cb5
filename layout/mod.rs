/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Deterministic layered auto layout for the workflow canvas.
//!
//! Layers are topological generations peeled off with Kahn's algorithm and
//! packed left to right as columns, wrapping into a new row when a column
//! would overflow the available content width. Identical input always
//! produces identical output; within a layer, steps keep their creation
//! order.
//!
//! Cycles are not an error: once peeling stalls, everything still unpeeled
//! lands together in one final trailing layer.

use euclid::default::{Point2D, Size2D};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::graph::{Graph, NodeKey};

/// Card metrics and spacing used by the auto layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    /// Card footprint on the canvas.
    pub card_size: Size2D<f32>,

    /// Horizontal gap between columns.
    pub h_gap: f32,

    /// Vertical gap between cards in a column.
    pub v_gap: f32,

    /// Margin kept on the left and top of the content area.
    pub margin: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            card_size: Size2D::new(180.0, 120.0),
            h_gap: 60.0,
            v_gap: 24.0,
            margin: 24.0,
        }
    }
}

/// Result of one layout pass.
#[derive(Debug, Clone)]
pub struct LayeredLayout {
    /// Topological generations; creation order within each layer.
    pub layers: Vec<Vec<Uuid>>,

    /// New position for every step.
    pub positions: HashMap<Uuid, Point2D<f32>>,

    /// Bounding box of the placed cards plus margin; the new required
    /// content-area size.
    pub content_size: Size2D<f32>,
}

/// Compute a layered, column-wrapped layout for the whole graph.
///
/// An empty graph yields an empty result. Runs as a one-shot pass on an
/// explicit user command, never per pointer-move frame.
pub fn layered_layout(graph: &Graph, available_width: f32, params: &LayoutParams) -> LayeredLayout {
    let layers = assign_layers(graph);
    let (positions, content_size) = pack_columns(&layers, available_width, params);
    LayeredLayout {
        layers,
        positions,
        content_size,
    }
}

/// Kahn frontier peeling. Layer 0 is every zero-in-degree step in creation
/// order; each following layer is the frontier whose in-degree reaches zero
/// once the previous layer is peeled. If peeling stalls before the graph is
/// consumed, a cycle exists and every unpeeled step forms one trailing
/// layer.
fn assign_layers(graph: &Graph) -> Vec<Vec<Uuid>> {
    let mut in_degree: HashMap<NodeKey, usize> = graph
        .steps()
        .map(|(key, _)| (key, graph.in_neighbors(key).count()))
        .collect();

    // Creation order throughout; this is the only tie-break.
    let mut remaining: Vec<NodeKey> = graph.steps().map(|(key, _)| key).collect();
    let mut layers: Vec<Vec<Uuid>> = Vec::new();

    while !remaining.is_empty() {
        let frontier: Vec<NodeKey> = remaining
            .iter()
            .copied()
            .filter(|key| in_degree.get(key).copied() == Some(0))
            .collect();

        if frontier.is_empty() {
            // Cycle fallback: one final trailing layer, creation order.
            layers.push(remaining.iter().map(|&key| step_id(graph, key)).collect());
            break;
        }

        for &key in &frontier {
            for successor in graph.out_neighbors(key) {
                if let Some(degree) = in_degree.get_mut(&successor) {
                    *degree = degree.saturating_sub(1);
                }
            }
        }

        let peeled: HashSet<NodeKey> = frontier.iter().copied().collect();
        remaining.retain(|key| !peeled.contains(key));
        layers.push(frontier.iter().map(|&key| step_id(graph, key)).collect());
    }

    layers
}

fn step_id(graph: &Graph, key: NodeKey) -> Uuid {
    graph.get_step(key).map(|step| step.id).unwrap_or_default()
}

/// Pack layers as columns, left to right, wrapping into a new row when a
/// column would overflow `available_width`. Cards inside a column stack
/// vertically with `v_gap`; rows are separated by the tallest column of the
/// finished row plus twice `v_gap`.
fn pack_columns(
    layers: &[Vec<Uuid>],
    available_width: f32,
    params: &LayoutParams,
) -> (HashMap<Uuid, Point2D<f32>>, Size2D<f32>) {
    let mut positions = HashMap::new();
    if layers.is_empty() {
        return (positions, Size2D::zero());
    }

    let card = params.card_size;
    let mut x = params.margin;
    let mut y = params.margin;
    let mut row_max_height = 0.0f32;
    let mut max_x = 0.0f32;
    let mut max_y = 0.0f32;

    for (index, layer) in layers.iter().enumerate() {
        let column_height = layer.len() as f32 * (card.height + params.v_gap) - params.v_gap;

        if index > 0 && x + card.width > available_width {
            x = params.margin;
            y += row_max_height + 2.0 * params.v_gap;
            row_max_height = 0.0;
        }

        for (slot, id) in layer.iter().enumerate() {
            let card_y = y + slot as f32 * (card.height + params.v_gap);
            positions.insert(*id, Point2D::new(x, card_y));
            max_x = max_x.max(x + card.width);
            max_y = max_y.max(card_y + card.height);
        }

        row_max_height = row_max_height.max(column_height);
        x += card.width + params.h_gap;
    }

    (
        positions,
        Size2D::new(max_x + params.margin, max_y + params.margin),
    )
}
