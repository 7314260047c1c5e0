//! Generator configuration.
//!
//! Paths and network addresses for a run. Defaults match the conventional
//! repository layout: input at the root, artifacts under `ansible/` and
//! `terraform/`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the node inventory.
pub const DEFAULT_INPUT_PATH: &str = "node-config.yaml";

/// Default location of the Ansible inventory artifact.
pub const DEFAULT_INVENTORY_PATH: &str = "ansible/inventory/hosts.yaml";

/// Default location of the Terraform locals artifact.
pub const DEFAULT_LOCALS_PATH: &str = "terraform/locals.tf";

pub const DEFAULT_GATEWAY: &str = "192.168.1.1";
pub const DEFAULT_DNS: &str = "8.8.8.8";

/// Network attributes stamped onto every host in the locals document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSettings {
    /// Default gateway address
    pub gateway: String,

    /// DNS server address
    pub dns: String,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            gateway: DEFAULT_GATEWAY.to_string(),
            dns: DEFAULT_DNS.to_string(),
        }
    }
}

/// Where to read from, where to write to, and what network values to use.
///
/// Relative output paths are resolved against `output_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Node inventory file
    pub input: PathBuf,

    /// Ansible inventory output, relative to `output_dir` unless absolute
    pub inventory_path: PathBuf,

    /// Terraform locals output, relative to `output_dir` unless absolute
    pub locals_path: PathBuf,

    /// Base directory for output artifacts
    pub output_dir: PathBuf,

    pub network: NetworkSettings,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_PATH),
            inventory_path: PathBuf::from(DEFAULT_INVENTORY_PATH),
            locals_path: PathBuf::from(DEFAULT_LOCALS_PATH),
            output_dir: PathBuf::from("."),
            network: NetworkSettings::default(),
        }
    }
}

impl GeneratorConfig {
    /// Configuration rooted at `dir`: input and outputs all live under it.
    pub fn rooted_at<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            input: dir.join(DEFAULT_INPUT_PATH),
            output_dir: dir.to_path_buf(),
            ..Self::default()
        }
    }

    /// Final path of the Ansible inventory artifact.
    pub fn resolved_inventory_path(&self) -> PathBuf {
        self.output_dir.join(&self.inventory_path)
    }

    /// Final path of the Terraform locals artifact.
    pub fn resolved_locals_path(&self) -> PathBuf {
        self.output_dir.join(&self.locals_path)
    }
}
