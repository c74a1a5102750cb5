/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Plain structured data exchanged with the plan generation service.
//!
//! The service proposes sub-steps and consumes/returns whole task documents;
//! this core never calls it. Ids travel as strings on the wire and are
//! parsed (and pruned when malformed) on load.

use serde::{Deserialize, Serialize};

use crate::graph::StepStatus;

/// A sub-step proposal produced by the plan generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanProposal {
    pub title: String,
    pub description: String,
}

/// Serialized sub-step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepDoc {
    /// Stable step identity; survives save/reload cycles.
    pub step_id: String,
    pub label: String,
    pub status: StepStatus,
    pub position_x: f32,
    pub position_y: f32,
    /// Ids of the steps this one leads to.
    pub leads_to: Vec<String>,
    /// Action items and attachments; opaque to the editor core.
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// The save/reload and regenerate unit: one editable task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDoc {
    pub task_id: String,
    pub title: String,
    pub steps: Vec<StepDoc>,
    /// Task-level payload (descriptions, report data); opaque here.
    #[serde(default)]
    pub payload: serde_json::Value,
}
