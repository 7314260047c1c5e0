//! # nodegen libraries
//!
//! Turns a node inventory (`node-config.yaml`) into the two artifacts the
//! provisioning flow consumes: an Ansible inventory and a Terraform
//! `locals` block.
//!
//! ## Main Components
//!
//! - `NodeSet`: validated input, loaded with `load_node_set`
//! - `transform`: derives hostnames, master priorities and failover states
//! - `InventoryDocument` / `LocalsDocument`: typed outputs with their encoders
//! - `generate` / `validate`: the end-to-end run
//! - `AppError`: every way a run can fail, each with its own exit code

pub mod config;
pub mod error;
pub mod host_map;
pub mod inventory;
pub mod locals;
pub mod node;
pub mod pipeline;
pub mod transform;

// Re-export main types for convenience
pub use config::{GeneratorConfig, NetworkSettings};
pub use error::AppError;
pub use host_map::HostMap;
pub use inventory::{InventoryDocument, MasterHostVars, NodeState, WorkerHostVars};
pub use locals::{LocalsDocument, LocalsHost};
pub use node::{load_node_set, parse_node_set, Node, NodeSet, Role};
pub use pipeline::{
    generate, render, render_node_set, validate, GenerationSummary, RenderedArtifacts,
};
pub use transform::{derive_host, make_hostname, rank, transform, DerivedHost};

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
