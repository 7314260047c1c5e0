//! Node inventory model and loading.
//!
//! The inventory file is parsed into a permissive raw shape first, so a
//! missing field can be reported against its role and position instead of
//! surfacing as an anonymous serde error. Validation covers every entry
//! before a [`NodeSet`] is handed out.

use crate::error::AppError;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// The two role groups a node can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Master,
    Worker,
}

impl Role {
    /// Group key used in the input and both outputs (`masters` / `workers`).
    pub fn group(&self) -> &'static str {
        match self {
            Role::Master => "masters",
            Role::Worker => "workers",
        }
    }

    /// Uppercased singular label used in generated hostnames.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Master => "MASTER",
            Role::Worker => "WORKER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.group())
    }
}

/// A single machine entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Node name, conventionally `<role>-<index>`
    pub name: String,

    /// IPv4 address, carried through verbatim
    pub ip: String,

    /// Marks the master responsible for cluster initialization
    pub bootstrap: bool,
}

impl Node {
    pub fn new(name: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ip: ip.into(),
            bootstrap: false,
        }
    }

    /// Same node, flagged as the bootstrap master.
    pub fn bootstrap(mut self) -> Self {
        self.bootstrap = true;
        self
    }
}

/// Validated node inventory.
///
/// # Example YAML
///
/// ```yaml
/// masters:
///   - name: master-1
///     ip: 10.0.0.1
///     bootstrap: true
///   - name: master-2
///     ip: 10.0.0.2
/// workers:
///   - name: worker-1
///     ip: 10.0.1.1
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeSet {
    /// Ordered: position decides priority and state
    pub masters: Vec<Node>,

    pub workers: Vec<Node>,
}

impl NodeSet {
    /// Total number of nodes across both roles.
    pub fn len(&self) -> usize {
        self.masters.len() + self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masters.is_empty() && self.workers.is_empty()
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawNodeSet {
    #[serde(default)]
    masters: Option<Vec<Option<RawNode>>>,
    #[serde(default)]
    workers: Option<Vec<Option<RawNode>>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawNode {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    ip: Option<String>,
    #[serde(default)]
    bootstrap: Option<bool>,
}

impl RawNode {
    fn validate(self, role: Role, index: usize) -> Result<Node, AppError> {
        let name = self.name.filter(|n| !n.trim().is_empty());
        let ip = self.ip.filter(|ip| !ip.trim().is_empty());

        let Some(name) = name else {
            return Err(AppError::MalformedNode {
                role,
                index,
                name: None,
                field: "name",
            });
        };
        let Some(ip) = ip else {
            return Err(AppError::MalformedNode {
                role,
                index,
                name: Some(name),
                field: "ip",
            });
        };

        let bootstrap = self.bootstrap.unwrap_or(false);
        if bootstrap && role == Role::Worker {
            warn!("Ignoring bootstrap flag on worker '{}'", name);
        }

        Ok(Node {
            name,
            ip,
            bootstrap: bootstrap && role == Role::Master,
        })
    }
}

fn validate_group(
    role: Role,
    raw: Option<Vec<Option<RawNode>>>,
) -> Result<Vec<Node>, AppError> {
    let mut nodes: Vec<Node> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (index, raw) in raw.unwrap_or_default().into_iter().enumerate() {
        // A null entry (`-` or `- ~`) has neither field
        let node = raw.unwrap_or_default().validate(role, index)?;

        // Kept in input order: rank comes from the entry's own index
        if !seen.insert(node.name.clone()) {
            warn!(
                "Duplicate {} entry '{}' at index {}, replacing earlier definition",
                role, node.name, index
            );
        }
        nodes.push(node);
    }

    Ok(nodes)
}

/// Parse and validate a node inventory from YAML text.
///
/// `origin` is only used to label errors. An empty document yields an empty
/// [`NodeSet`], as do missing `masters` or `workers` keys.
pub fn parse_node_set(contents: &str, origin: &Path) -> Result<NodeSet, AppError> {
    let raw: RawNodeSet = if contents.trim().is_empty() {
        RawNodeSet::default()
    } else {
        serde_yaml::from_str::<Option<RawNodeSet>>(contents)
            .map_err(|source| AppError::InvalidInput {
                path: origin.to_path_buf(),
                source,
            })?
            .unwrap_or_default()
    };

    let masters = validate_group(Role::Master, raw.masters)?;
    let workers = validate_group(Role::Worker, raw.workers)?;

    debug!(
        "Parsed {} masters and {} workers from {:?}",
        masters.len(),
        workers.len(),
        origin
    );

    Ok(NodeSet { masters, workers })
}

/// Load and validate a node inventory file.
///
/// # Returns
///
/// * `Ok(NodeSet)` - Every entry has a name and an ip
/// * `Err(AppError::InputNotFound)` - The file is absent or unreadable
/// * `Err(AppError::MalformedNode)` - An entry lacks a required field
/// * `Err(AppError::InvalidInput)` - The YAML does not have the expected shape
pub fn load_node_set<P: AsRef<Path>>(input_path: P) -> Result<NodeSet, AppError> {
    let path = input_path.as_ref();

    let contents = fs::read_to_string(path).map_err(|e| AppError::InputNotFound {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    parse_node_set(&contents, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn parse(yaml: &str) -> Result<NodeSet, AppError> {
        parse_node_set(yaml, Path::new("test.yaml"))
    }

    #[test]
    fn test_parse_full_inventory() {
        let yaml = r#"
masters:
  - name: master-1
    ip: 10.0.0.1
    bootstrap: true
  - name: master-2
    ip: 10.0.0.2
workers:
  - name: worker-1
    ip: 10.0.1.1
"#;
        let set = parse(yaml).unwrap();
        assert_eq!(
            set.masters,
            vec![
                Node::new("master-1", "10.0.0.1").bootstrap(),
                Node::new("master-2", "10.0.0.2"),
            ]
        );
        assert_eq!(set.workers, vec![Node::new("worker-1", "10.0.1.1")]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_empty_document_is_empty_set() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("   \n").unwrap().is_empty());
        assert!(parse("~").unwrap().is_empty());
    }

    #[test]
    fn test_missing_groups_are_empty() {
        let set = parse("masters:\n  - name: master-1\n    ip: 10.0.0.1\n").unwrap();
        assert_eq!(set.masters.len(), 1);
        assert!(set.workers.is_empty());

        let set = parse("masters: []\nworkers:\n").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_missing_ip_is_malformed() {
        let yaml = "masters:\n  - name: master-1\n    ip: 10.0.0.1\n  - name: master-2\n";
        match parse(yaml) {
            Err(AppError::MalformedNode {
                role,
                index,
                name,
                field,
            }) => {
                assert_eq!(role, Role::Master);
                assert_eq!(index, 1);
                assert_eq!(name.as_deref(), Some("master-2"));
                assert_eq!(field, "ip");
            }
            other => panic!("expected MalformedNode, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_name_is_malformed() {
        let yaml = "workers:\n  - ip: 10.0.1.1\n";
        match parse(yaml) {
            Err(AppError::MalformedNode {
                role, index, name, field,
            }) => {
                assert_eq!(role, Role::Worker);
                assert_eq!(index, 0);
                assert!(name.is_none());
                assert_eq!(field, "name");
            }
            other => panic!("expected MalformedNode, got {:?}", other),
        }

        for yaml in [
            "masters:\n  - name: master-1\n    ip: 10.0.0.1\n  - ~\n",
            "masters:\n  - name: master-1\n    ip: 10.0.0.1\n  -\n",
        ] {
            match parse(yaml) {
                Err(AppError::MalformedNode {
                    role, index, name, field,
                }) => {
                    assert_eq!(role, Role::Master);
                    assert_eq!(index, 1);
                    assert!(name.is_none());
                    assert_eq!(field, "name");
                }
                other => panic!("expected MalformedNode, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_blank_name_is_malformed() {
        let yaml = "workers:\n  - name: \"\"\n    ip: 10.0.1.1\n";
        assert!(matches!(
            parse(yaml),
            Err(AppError::MalformedNode { field: "name", .. })
        ));
    }

    #[test]
    fn test_wrong_shape_is_invalid_input() {
        let result = parse("masters: not-a-list\n");
        assert!(matches!(result, Err(AppError::InvalidInput { .. })));

        let result = parse("masters:\n  - name: m-1\n    ip: 1.1.1.1\n    bootstrap: maybe\n");
        assert!(matches!(result, Err(AppError::InvalidInput { .. })));
    }

    #[test]
    fn test_worker_bootstrap_is_dropped() {
        let yaml = "workers:\n  - name: worker-1\n    ip: 10.0.1.1\n    bootstrap: true\n";
        let set = parse(yaml).unwrap();
        assert!(!set.workers[0].bootstrap);
    }

    #[test]
    fn test_duplicate_names_keep_input_positions() {
        let yaml = r#"
masters:
  - name: master-1
    ip: 10.0.0.1
  - name: master-2
    ip: 10.0.0.2
  - name: master-1
    ip: 10.0.0.9
"#;
        let set = parse(yaml).unwrap();
        assert_eq!(set.masters.len(), 3);
        assert_eq!(set.masters[2].name, "master-1");
        assert_eq!(set.masters[2].ip, "10.0.0.9");

        let (inventory, _) = crate::transform::transform(&set, &Default::default());
        let names: Vec<&str> = inventory.masters().hosts.names().collect();
        assert_eq!(names, vec!["master-1", "master-2"]);

        let master_1 = inventory.masters().hosts.get("master-1").unwrap();
        assert_eq!(master_1.ansible_host, "10.0.0.9");
        assert_eq!(master_1.node_priority, 80);
        assert_eq!(master_1.node_state, crate::inventory::NodeState::Backup);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("node-config.yaml");

        match load_node_set(&path) {
            Err(AppError::InputNotFound { path: reported, .. }) => {
                assert_eq!(reported, PathBuf::from(&path));
            }
            other => panic!("expected InputNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("node-config.yaml");
        fs::write(&path, "workers:\n  - name: worker-1\n    ip: 10.0.1.1\n").unwrap();

        let set = load_node_set(&path).unwrap();
        assert_eq!(set.workers[0].ip, "10.0.1.1");
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(Role::Master.to_string(), "masters");
        assert_eq!(Role::Worker.group(), "workers");
        assert_eq!(Role::Master.label(), "MASTER");
        assert_eq!(Role::Worker.label(), "WORKER");
    }
}
