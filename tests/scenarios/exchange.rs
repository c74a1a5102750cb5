/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use flowcanvas::{EditIntent, PlanProposal, Task, TaskDoc};

use super::harness::TestBench;

#[test]
fn test_accepting_service_proposals_bulk_creates_steps() {
    let mut bench = TestBench::new();
    let proposals = vec![
        PlanProposal {
            title: "collect requirements".into(),
            description: "interview the stakeholders".into(),
        },
        PlanProposal {
            title: "draft plan".into(),
            description: "turn requirements into sub-steps".into(),
        },
        PlanProposal {
            title: "review".into(),
            description: String::new(),
        },
    ];

    bench.app.apply_intent(EditIntent::AcceptProposals { proposals });

    assert_eq!(bench.app.task.graph.step_count(), 3);
    let labels: Vec<String> = bench
        .app
        .task
        .graph
        .steps()
        .map(|(_, s)| s.label.clone())
        .collect();
    assert_eq!(labels, vec!["collect requirements", "draft plan", "review"]);

    // The whole batch is one undo step.
    bench.app.apply_intent(EditIntent::Undo);
    assert_eq!(bench.app.task.graph.step_count(), 0);
}

#[test]
fn test_task_doc_round_trip_keeps_ids_positions_and_edges() {
    let mut bench = TestBench::new();
    let a = bench.add_step("a");
    let b = bench.add_step("b");
    bench.connect(a, b);

    let doc = bench.app.task_doc();
    let serialized = serde_json::to_string(&doc).expect("doc serializes");
    let parsed: TaskDoc = serde_json::from_str(&serialized).expect("doc parses");
    let reloaded = Task::from_doc(&parsed);

    assert_eq!(reloaded.id, bench.app.task.id);
    assert_eq!(reloaded.title, bench.app.task.title);
    assert_eq!(reloaded.graph.step_count(), 2);
    assert_eq!(reloaded.graph.edge_count(), 1);
    for (_, step) in bench.app.task.graph.steps() {
        let key = reloaded
            .graph
            .step_key_by_id(step.id)
            .expect("step ids are stable across save/reload");
        assert_eq!(reloaded.graph.get_step(key).unwrap().position, step.position);
    }
}

#[test]
fn test_regenerate_hands_out_current_state_and_accepts_replacement() {
    let mut bench = TestBench::new();
    let a = bench.add_step("outline");
    let before = bench.app.task_doc();
    assert_eq!(before.steps.len(), 1);

    // The collaborator returns a revised task built on the document we gave
    // it; swapping it in goes through the intent path like any edit.
    let mut revised = before.clone();
    revised.steps[0].label = "outline (revised)".into();
    bench.app.apply_intent(EditIntent::ReplaceTask { doc: revised });

    let key = bench.app.task.graph.step_key_by_id(a).expect("id kept");
    assert_eq!(bench.app.task.graph.get_step(key).unwrap().label, "outline (revised)");

    bench.app.apply_intent(EditIntent::Undo);
    let key = bench.app.task.graph.step_key_by_id(a).expect("id kept");
    assert_eq!(bench.app.task.graph.get_step(key).unwrap().label, "outline");
}

#[test]
fn test_malformed_document_steps_are_pruned_on_load() {
    let mut bench = TestBench::new();
    let a = bench.add_step("a");
    let b = bench.add_step("b");
    bench.connect(a, b);

    let mut doc = bench.app.task_doc();
    doc.steps[1].step_id = "not-a-uuid".into();
    doc.steps[0].leads_to.push("missing".into());

    let reloaded = Task::from_doc(&doc);
    assert_eq!(reloaded.graph.step_count(), 1);
    assert_eq!(reloaded.graph.edge_count(), 0);
}
