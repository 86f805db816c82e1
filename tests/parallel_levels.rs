// tests/parallel_levels.rs

mod common;
use crate::common::builders::{chain_graph, graph_from_edges};
use crate::common::{init_tracing, sorted};

use officedag::dag::{TaskGraph, compute_levels};

fn level_sets(graph: &TaskGraph) -> Vec<Vec<String>> {
    graph.get_parallel_groups().iter().map(|l| sorted(l)).collect()
}

#[test]
fn diamond_levels() {
    init_tracing();
    let graph = graph_from_edges(&[
        ("top", "x", &[]),
        ("left", "x", &["top"]),
        ("right", "x", &["top"]),
        ("bottom", "x", &["left", "right"]),
    ]);

    assert_eq!(
        level_sets(&graph),
        vec![
            vec!["top".to_string()],
            vec!["left".to_string(), "right".to_string()],
            vec!["bottom".to_string()],
        ]
    );
}

#[test]
fn task_lands_on_earliest_possible_level() {
    init_tracing();
    // `shortcut` only depends on the root, so it sits next to `mid` even
    // though it was added after the deeper tasks.
    let graph = graph_from_edges(&[
        ("root", "x", &[]),
        ("mid", "x", &["root"]),
        ("deep", "x", &["mid"]),
        ("shortcut", "x", &["root"]),
    ]);

    let levels = graph.parallel_levels();
    assert_eq!(levels.level_of("root"), Some(0));
    assert_eq!(levels.level_of("mid"), Some(1));
    assert_eq!(levels.level_of("shortcut"), Some(1));
    assert_eq!(levels.level_of("deep"), Some(2));
    assert!(levels.is_complete());
}

#[test]
fn levels_follow_insertion_order_within_a_level() {
    init_tracing();
    let graph = graph_from_edges(&[("zeta", "x", &[]), ("alpha", "x", &[]), ("mu", "x", &[])]);

    assert_eq!(graph.get_parallel_groups(), vec![vec!["zeta", "alpha", "mu"]]);
}

#[test]
fn levels_ignore_status() {
    init_tracing();
    let mut graph = chain_graph(3);
    let before = graph.get_parallel_groups();

    graph.mark_completed("t0", None);
    graph.mark_failed("t1", "nope");

    assert_eq!(graph.get_parallel_groups(), before);
}

#[test]
fn unknown_dependencies_do_not_delay_a_level() {
    init_tracing();
    let graph = graph_from_edges(&[("a", "x", &["missing"]), ("b", "x", &["a", "also_missing"])]);

    assert_eq!(graph.get_parallel_groups(), vec![vec!["a"], vec!["b"]]);
}

#[test]
fn two_cycle_is_dropped_and_reported() {
    init_tracing();
    let graph = graph_from_edges(&[
        ("ok", "x", &[]),
        ("ping", "x", &["pong"]),
        ("pong", "x", &["ping"]),
        ("downstream", "x", &["ping"]),
    ]);

    let levels = compute_levels(&graph);
    assert_eq!(levels.groups, vec![vec!["ok".to_string()]]);
    assert_eq!(levels.unresolved, vec!["ping", "pong", "downstream"]);
    assert!(!levels.is_complete());
    assert_eq!(levels.level_of("ping"), None);

    assert_eq!(graph.get_parallel_groups(), levels.groups);
    assert!(graph.find_cycle().is_some());
}

#[test]
fn self_dependency_is_unresolvable() {
    init_tracing();
    let graph = graph_from_edges(&[("loop", "x", &["loop"]), ("free", "x", &[])]);

    let levels = graph.parallel_levels();
    assert_eq!(levels.groups, vec![vec!["free".to_string()]]);
    assert_eq!(levels.unresolved, vec!["loop"]);
    assert_eq!(graph.find_cycle().as_deref(), Some("loop"));
}

#[test]
fn fully_cyclic_graph_yields_no_levels() {
    init_tracing();
    let graph = graph_from_edges(&[("a", "x", &["c"]), ("b", "x", &["a"]), ("c", "x", &["b"])]);

    let levels = graph.parallel_levels();
    assert!(levels.groups.is_empty());
    assert_eq!(levels.unresolved.len(), 3);
}

#[test]
fn acyclic_graph_has_no_cycle() {
    init_tracing();
    let graph = graph_from_edges(&[("a", "x", &["ghost"]), ("b", "x", &["a"])]);
    assert_eq!(graph.find_cycle(), None);
}

#[test]
fn chain_levels_are_singletons() {
    init_tracing();
    let graph = chain_graph(4);
    assert_eq!(
        graph.get_parallel_groups(),
        vec![vec!["t0"], vec!["t1"], vec!["t2"], vec!["t3"]]
    );
}
