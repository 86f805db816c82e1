// tests/config_loading.rs

mod common;
use crate::common::builders::{GraphFileBuilder, TaskConfigBuilder};
use crate::common::init_tracing;

use std::io::Write;

use tempfile::NamedTempFile;

use officedag::TemplateKind;
use officedag::config::{GraphFile, load_and_validate, load_from_str};
use officedag::errors::OfficedagError;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn loads_plain_task_definitions() {
    init_tracing();
    let file = write_config(
        r#"
[task.fetch]
office = "research"
description = "Collect sources"

[task.summarise]
office = "writing"
description = "Summarise findings"
depends_on = ["fetch"]
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();
    let graph = cfg.build_graph();

    assert_eq!(graph.len(), 2);
    assert_eq!(graph.get("summarise").unwrap().depends_on, vec!["fetch"]);
    assert_eq!(graph.get_parallel_groups(), vec![vec!["fetch"], vec!["summarise"]]);
}

#[test]
fn template_is_seeded_and_file_tasks_extend_it() {
    init_tracing();
    let file = write_config(
        r#"
[config]
template = "cli"
goal = "log grepper"

[task.docs]
office = "writing"
description = "Write the README"
depends_on = ["review"]
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.config.template, Some(TemplateKind::Cli));

    let graph = cfg.build_graph();
    assert_eq!(graph.len(), 6);
    assert!(graph.get("research").unwrap().description.contains("log grepper"));

    let groups = graph.get_parallel_groups();
    assert_eq!(groups.len(), 6);
    assert_eq!(groups[5], vec!["docs"]);
}

#[test]
fn file_task_overrides_template_task() {
    init_tracing();
    let cfg = GraphFileBuilder::new()
        .with_template(TemplateKind::Cli, "tool")
        .with_task(
            "sandbox",
            TaskConfigBuilder::new("ops")
                .description("Skip the sandbox, just lint")
                .depends_on("coding")
                .build(),
        )
        .build();

    let graph = cfg.build_graph();
    assert_eq!(graph.len(), 5);
    assert_eq!(graph.get("sandbox").unwrap().office, "ops");
    // Replacement keeps the template position.
    assert_eq!(graph.task_ids().nth(3), Some("sandbox"));
}

#[test]
fn unknown_dependency_is_accepted() {
    init_tracing();
    let cfg = GraphFileBuilder::new()
        .with_task("a", TaskConfigBuilder::new("x").depends_on("pruned").build())
        .build();

    let graph = cfg.build_graph();
    assert_eq!(graph.get_ready_tasks().len(), 1);
}

#[test]
fn cycle_is_allowed_by_default() {
    init_tracing();
    let file = write_config(
        r#"
[task.A]
office = "x"
depends_on = ["B"]

[task.B]
office = "x"
depends_on = ["A"]
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();
    let levels = cfg.build_graph().parallel_levels();
    assert!(levels.groups.is_empty());
    assert_eq!(levels.unresolved, vec!["A", "B"]);
}

#[test]
fn strict_cycles_returns_structured_error() {
    init_tracing();
    let file = write_config(
        r#"
[config]
strict_cycles = true

[task.A]
office = "x"
depends_on = ["B"]

[task.B]
office = "x"
depends_on = ["A"]
"#,
    );

    match load_and_validate(file.path()) {
        Err(OfficedagError::DagCycle(msg)) => {
            assert!(msg.contains("cycle detected"));
            assert!(msg.contains('A') || msg.contains('B'));
        }
        Err(e) => panic!("Expected DagCycle error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn strict_cycles_accepts_acyclic_graphs() {
    init_tracing();
    let cfg = GraphFileBuilder::new()
        .strict_cycles(true)
        .with_template(TemplateKind::Webapp, "shop")
        .build();

    assert_eq!(cfg.build_graph().len(), 9);
}

#[test]
fn empty_office_is_a_config_error() {
    init_tracing();
    let raw = GraphFileBuilder::new()
        .with_task("a", TaskConfigBuilder::new("  ").build())
        .build_raw();

    match GraphFile::try_from(raw) {
        Err(OfficedagError::ConfigError(msg)) => assert!(msg.contains("'a'")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn template_without_goal_is_a_config_error() {
    init_tracing();
    let raw = load_from_str(
        r#"
[config]
template = "webapp"
"#,
    )
    .unwrap();

    match GraphFile::try_from(raw) {
        Err(OfficedagError::ConfigError(msg)) => assert!(msg.contains("goal")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn missing_office_is_a_toml_error() {
    init_tracing();
    let result = load_from_str(
        r#"
[task.a]
description = "no office"
"#,
    );

    assert!(matches!(result, Err(OfficedagError::TomlError(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    init_tracing();
    let result = load_and_validate("/definitely/not/here/Officedag.toml");
    assert!(matches!(result, Err(OfficedagError::IoError(_))));
}

#[test]
fn empty_file_gives_empty_graph() {
    init_tracing();
    let file = write_config("");
    let graph = load_and_validate(file.path()).unwrap().build_graph();
    assert!(graph.is_empty());
    assert!(graph.all_completed());
}
