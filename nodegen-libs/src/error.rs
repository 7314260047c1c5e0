//! Error types for nodegen.
//!
//! Every failure is fatal for a run. Each variant maps to its own process
//! exit code so wrapper scripts can tell a missing inventory apart from a
//! broken one.

use crate::node::Role;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the generator.
#[derive(Error, Debug)]
pub enum AppError {
    /// The node inventory file is absent or cannot be read.
    ///
    /// # Example
    /// ```
    /// use nodegen_libs::AppError;
    /// let error = AppError::InputNotFound {
    ///     path: "node-config.yaml".into(),
    ///     reason: "No such file or directory".to_string(),
    /// };
    /// assert_eq!(error.exit_code(), 2);
    /// ```
    #[error("Input not found: {path:?} ({reason})")]
    InputNotFound { path: PathBuf, reason: String },

    /// A node entry lacks `name` or `ip`.
    ///
    /// `name` carries the entry's name when it was present, so the offending
    /// entry can be located even when only the ip is missing.
    #[error(
        "Malformed node: {}[{}]{} is missing '{}'",
        .role,
        .index,
        display_name(.name),
        .field
    )]
    MalformedNode {
        role: Role,
        index: usize,
        name: Option<String>,
        field: &'static str,
    },

    /// The input parsed as text but is not a node inventory document.
    #[error("Invalid input in {path:?}: {source}")]
    InvalidInput {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Writing an output artifact failed.
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML serialization error
    #[error("YAML serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),
}

impl AppError {
    /// Process exit code for this error kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::InputNotFound { .. } => 2,
            AppError::MalformedNode { .. } => 3,
            AppError::InvalidInput { .. } => 4,
            AppError::Io { .. } => 5,
            AppError::Serialization(_) => 6,
        }
    }
}

fn display_name(name: &Option<String>) -> String {
    match name {
        Some(name) => format!(" ('{}')", name),
        None => String::new(),
    }
}
