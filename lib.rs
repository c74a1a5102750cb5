/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! flowcanvas: interactive directed-graph editor core for workflows of
//! sequential sub-steps.
//!
//! Components, leaves first:
//! - [`graph`]: nodes and their "leads to" edges, with referential integrity
//! - [`layout`]: deterministic layered, column-wrapped auto layout
//! - [`history`]: snapshot undo/redo stacks
//! - [`interaction`]: drag-to-connect and node-drag gesture state
//! - [`exchange`]: plain structured data shared with the plan generation
//!   service
//! - [`app`]: the editing session tying the above together behind an
//!   intent reducer
//!
//! Everything runs synchronously on the caller's thread; layout is a
//! one-shot pass on explicit command, and gesture state never enters the
//! undo timeline.

pub mod app;
pub mod exchange;
pub mod graph;
pub mod history;
pub mod interaction;
pub mod layout;

pub use app::{EditIntent, Task, WorkflowApp};
pub use exchange::{PlanProposal, StepDoc, TaskDoc};
pub use graph::{EdgeView, Graph, NodeKey, StepNode, StepPatch, StepStatus};
pub use history::History;
pub use interaction::{ConnectionDraft, ConnectionSession, NodeDrag};
pub use layout::{LayeredLayout, LayoutParams, layered_layout};
