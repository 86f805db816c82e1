// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! Scheduler operations never fail (they report unknown ids through `bool` /
//! `Option` returns); these errors cover config loading, serialization and
//! the coordinator loop.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OfficedagError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Cycle detected in task graph: {0}")]
    DagCycle(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, OfficedagError>;
