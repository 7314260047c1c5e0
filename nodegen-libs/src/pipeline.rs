//! Load → transform → write.
//!
//! Both artifacts are fully rendered in memory before the first byte is
//! written, so a run that fails on input never leaves a half-updated pair
//! of files behind.

use crate::config::GeneratorConfig;
use crate::error::AppError;
use crate::node::{load_node_set, NodeSet};
use crate::transform::transform;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Both artifacts, encoded and ready to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifacts {
    /// Ansible inventory YAML
    pub inventory: String,

    /// Terraform locals HCL
    pub locals: String,

    pub master_count: usize,
    pub worker_count: usize,
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub master_count: usize,
    pub worker_count: usize,

    /// Files written, empty for validation-only runs
    pub written: Vec<PathBuf>,
}

/// Transform an already loaded node set and encode both artifacts.
pub fn render_node_set(
    nodes: &NodeSet,
    config: &GeneratorConfig,
) -> Result<RenderedArtifacts, AppError> {
    let (inventory, locals) = transform(nodes, &config.network);

    Ok(RenderedArtifacts {
        inventory: inventory.to_yaml()?,
        locals: locals.render(),
        master_count: nodes.masters.len(),
        worker_count: nodes.workers.len(),
    })
}

/// Load the configured input and encode both artifacts without writing.
pub fn render(config: &GeneratorConfig) -> Result<RenderedArtifacts, AppError> {
    info!("Loading node inventory from {:?}", config.input);
    let nodes = load_node_set(&config.input)?;
    render_node_set(&nodes, config)
}

/// Check that the input loads and transforms cleanly. Writes nothing.
pub fn validate(config: &GeneratorConfig) -> Result<GenerationSummary, AppError> {
    let rendered = render(config)?;

    info!(
        "Input is valid: {} masters, {} workers",
        rendered.master_count, rendered.worker_count
    );

    Ok(GenerationSummary {
        master_count: rendered.master_count,
        worker_count: rendered.worker_count,
        written: Vec::new(),
    })
}

/// Full run: load, transform, then write both artifacts.
pub fn generate(config: &GeneratorConfig) -> Result<GenerationSummary, AppError> {
    let rendered = render(config)?;

    let inventory_path = config.resolved_inventory_path();
    let locals_path = config.resolved_locals_path();

    write_artifact(&inventory_path, &rendered.inventory)?;
    info!("Ansible inventory written to {:?}", inventory_path);

    write_artifact(&locals_path, &rendered.locals)?;
    info!("Terraform locals written to {:?}", locals_path);

    Ok(GenerationSummary {
        master_count: rendered.master_count,
        worker_count: rendered.worker_count,
        written: vec![inventory_path, locals_path],
    })
}

/// Write `contents` to `path`, creating parent directories as needed.
fn write_artifact(path: &Path, contents: &str) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| AppError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    debug!("Writing {} bytes to {:?}", contents.len(), path);
    fs::write(path, contents).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const INPUT: &str = "masters:\n  - name: master-1\n    ip: 10.0.0.1\nworkers: []\n";

    #[test]
    fn test_write_artifact_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a/b/c.txt");

        write_artifact(&path, "hello").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_validate_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let config = GeneratorConfig::rooted_at(temp_dir.path());
        fs::write(&config.input, INPUT).unwrap();

        let summary = validate(&config).unwrap();
        assert_eq!(summary.master_count, 1);
        assert_eq!(summary.worker_count, 0);
        assert!(summary.written.is_empty());
        assert!(!config.resolved_inventory_path().exists());
        assert!(!config.resolved_locals_path().exists());
    }

    #[test]
    fn test_generate_writes_both() {
        let temp_dir = TempDir::new().unwrap();
        let config = GeneratorConfig::rooted_at(temp_dir.path());
        fs::write(&config.input, INPUT).unwrap();

        let summary = generate(&config).unwrap();
        assert_eq!(summary.written.len(), 2);

        let locals = fs::read_to_string(config.resolved_locals_path()).unwrap();
        assert!(locals.contains("hostname = \"KUBE-MASTER-TERRAFORM-1\""));

        let inventory = fs::read_to_string(config.resolved_inventory_path()).unwrap();
        assert!(inventory.starts_with("all:\n"));
    }

    #[test]
    fn test_render_node_set_counts() {
        let nodes = NodeSet::default();
        let rendered = render_node_set(&nodes, &GeneratorConfig::default()).unwrap();
        assert_eq!(rendered.master_count, 0);
        assert_eq!(rendered.worker_count, 0);
        assert!(rendered.locals.starts_with("locals {\n"));
    }
}
