// crates/storecheck-core/tests/schedule.rs
// ============================================================================
// Module: Step Schedule Tests
// Description: Verifies topological execution and failure propagation.
// ============================================================================
//! ## Overview
//! Ensures the step graph runs steps in a deterministic topological order,
//! skips transitive dependents of failed steps without invoking them, and
//! rejects malformed graphs before anything runs.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use storecheck_core::ScheduleError;
use storecheck_core::StepGraph;
use storecheck_core::StepResult;
use storecheck_core::StepStatus;

/// Runs the graph recording invocation order, failing the named steps.
fn run_recording(graph: &StepGraph, failing: &[&str]) -> (Vec<String>, Vec<(String, StepStatus)>) {
    let mut invoked = Vec::new();
    let outcomes = graph
        .run(|name| {
            invoked.push(name.to_string());
            if failing.contains(&name) { StepResult::Failed } else { StepResult::Passed }
        })
        .unwrap();
    let statuses = outcomes.into_iter().map(|outcome| (outcome.name, outcome.status)).collect();
    (invoked, statuses)
}

#[test]
fn steps_run_in_dependency_order() {
    let mut graph = StepGraph::new();
    graph.add("create_product", &["login_admin"]);
    graph.add("login_admin", &[]);
    graph.add("delete_product", &["create_product"]);

    let (invoked, statuses) = run_recording(&graph, &[]);
    assert_eq!(invoked, ["login_admin", "create_product", "delete_product"]);
    assert!(statuses.iter().all(|(_, status)| *status == StepStatus::Passed));
}

#[test]
fn ready_steps_keep_insertion_order() {
    let mut graph = StepGraph::new();
    graph.add("login", &[]);
    graph.add("list_products", &["login"]);
    graph.add("list_categories", &["login"]);
    graph.add("list_orders", &["login"]);

    let (invoked, _) = run_recording(&graph, &[]);
    assert_eq!(invoked, ["login", "list_products", "list_categories", "list_orders"]);
}

#[test]
fn failed_step_skips_transitive_dependents() {
    let mut graph = StepGraph::new();
    graph.add("login", &[]);
    graph.add("create_order", &["login"]);
    graph.add("cancel_order", &["create_order"]);
    graph.add("list_orders", &["login"]);

    let (invoked, statuses) = run_recording(&graph, &["create_order"]);
    assert_eq!(invoked, ["login", "create_order", "list_orders"]);
    assert_eq!(statuses[0], ("login".to_string(), StepStatus::Passed));
    assert_eq!(statuses[1], ("create_order".to_string(), StepStatus::Failed));
    assert_eq!(
        statuses[2],
        (
            "cancel_order".to_string(),
            StepStatus::Skipped {
                blocked_on: "create_order".to_string(),
            }
        )
    );
    assert_eq!(statuses[3], ("list_orders".to_string(), StepStatus::Passed));
}

#[test]
fn skipped_step_blocks_its_own_dependents() {
    let mut graph = StepGraph::new();
    graph.add("a", &[]);
    graph.add("b", &["a"]);
    graph.add("c", &["b"]);

    let (invoked, statuses) = run_recording(&graph, &["a"]);
    assert_eq!(invoked, ["a"]);
    assert_eq!(
        statuses[2],
        (
            "c".to_string(),
            StepStatus::Skipped {
                blocked_on: "b".to_string(),
            }
        )
    );
}

#[test]
fn duplicate_step_is_rejected() {
    let mut graph = StepGraph::new();
    graph.add("login", &[]);
    graph.add("login", &[]);
    assert_eq!(graph.validate(), Err(ScheduleError::DuplicateStep("login".to_string())));
}

#[test]
fn unknown_dependency_is_rejected() {
    let mut graph = StepGraph::new();
    graph.add("create_product", &["missing_step"]);
    assert_eq!(
        graph.validate(),
        Err(ScheduleError::UnknownDependency {
            step: "create_product".to_string(),
            dependency: "missing_step".to_string(),
        })
    );
}

#[test]
fn cycle_is_rejected_before_any_step_runs() {
    let mut graph = StepGraph::new();
    graph.add("a", &["b"]);
    graph.add("b", &["a"]);

    let mut ran = false;
    let result = graph.run(|_| {
        ran = true;
        StepResult::Passed
    });
    assert!(matches!(result, Err(ScheduleError::Cycle(_))));
    assert!(!ran);
}

#[test]
fn empty_graph_runs_to_empty_outcomes() {
    let graph = StepGraph::new();
    assert!(graph.is_empty());
    let outcomes = graph.run(|_| StepResult::Passed).unwrap();
    assert!(outcomes.is_empty());
}
