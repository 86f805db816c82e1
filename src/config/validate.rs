// src/config/validate.rs

use tracing::warn;

use crate::config::model::{RawGraphFile, build_graph_from_sections};
use crate::errors::{OfficedagError, Result};

/// Run semantic validation against a loaded graph definition.
///
/// This checks:
/// - every task names a non-empty office
/// - a `goal` is given whenever a `template` is
/// - with `strict_cycles = true`, the resulting graph has no cycle
///
/// It does **not** reject dependencies on unknown ids; those are treated as
/// satisfied by the scheduler and only logged here.
pub fn validate_config(cfg: &RawGraphFile) -> Result<()> {
    validate_offices(cfg)?;
    validate_template(cfg)?;
    warn_unknown_dependencies(cfg);
    if cfg.config.strict_cycles {
        validate_acyclic(cfg)?;
    }
    Ok(())
}

fn validate_offices(cfg: &RawGraphFile) -> Result<()> {
    for (id, task) in cfg.task.iter() {
        if task.office.trim().is_empty() {
            return Err(OfficedagError::ConfigError(format!(
                "task '{id}' has an empty `office`"
            )));
        }
    }
    Ok(())
}

fn validate_template(cfg: &RawGraphFile) -> Result<()> {
    if let Some(kind) = cfg.config.template {
        let has_goal = cfg
            .config
            .goal
            .as_deref()
            .is_some_and(|g| !g.trim().is_empty());
        if !has_goal {
            return Err(OfficedagError::ConfigError(format!(
                "[config].template = {kind:?} requires a non-empty [config].goal"
            )));
        }
    }
    Ok(())
}

fn warn_unknown_dependencies(cfg: &RawGraphFile) {
    let graph = build_graph_from_sections(&cfg.config, &cfg.task);
    for task in graph.tasks() {
        for dep in task.depends_on.iter() {
            if graph.get(dep).is_none() {
                warn!(
                    task = %task.id,
                    dep = %dep,
                    "dependency names no task; it will be treated as satisfied"
                );
            }
        }
    }
}

fn validate_acyclic(cfg: &RawGraphFile) -> Result<()> {
    let graph = build_graph_from_sections(&cfg.config, &cfg.task);
    match graph.find_cycle() {
        None => Ok(()),
        Some(id) => Err(OfficedagError::DagCycle(format!(
            "cycle detected in task graph involving task '{id}'"
        ))),
    }
}
