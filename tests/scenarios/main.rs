/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! End-to-end editor scenarios driving the public API.


mod auto_layout;
mod exchange;

#[test]
fn scenarios_smoke_builds_an_app() {
    let bench = harness::TestBench::new();
    assert_eq!(bench.app.task.graph.step_count(), 0);
}
