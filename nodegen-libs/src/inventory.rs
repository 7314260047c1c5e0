//! Ansible inventory document.
//!
//! Field declaration order is the emitted key order: `serde_yaml` writes
//! struct fields in the order they are declared.

use crate::error::AppError;
use crate::host_map::HostMap;
use serde::Serialize;

/// Disables SSH host key prompts for freshly provisioned machines.
pub const SSH_COMMON_ARGS: &str = "-o StrictHostKeyChecking=no";

/// Active/standby label of a master in the virtual-IP failover group.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeState {
    Master,
    Backup,
}

/// Host variables of a master node.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MasterHostVars {
    pub ansible_host: String,
    pub ansible_user: String,
    pub node_priority: i64,
    pub node_state: NodeState,

    /// Only emitted when set
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_bootstrap: bool,
}

/// Host variables of a worker node.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WorkerHostVars {
    pub ansible_host: String,
    pub ansible_user: String,
}

/// Variables shared by every host in a group.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GroupVars {
    pub ansible_ssh_common_args: String,
}

impl Default for GroupVars {
    fn default() -> Self {
        Self {
            ansible_ssh_common_args: SSH_COMMON_ARGS.to_string(),
        }
    }
}

/// One inventory group: its hosts, then its group variables.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Group<H> {
    pub hosts: HostMap<H>,
    pub vars: GroupVars,
}

impl<H> Default for Group<H> {
    fn default() -> Self {
        Self {
            hosts: HostMap::new(),
            vars: GroupVars::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Children {
    pub masters: Group<MasterHostVars>,
    pub workers: Group<WorkerHostVars>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct AllGroup {
    pub children: Children,
}

/// Root of the inventory: `all.children.{masters,workers}`.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct InventoryDocument {
    pub all: AllGroup,
}

impl InventoryDocument {
    pub fn masters(&self) -> &Group<MasterHostVars> {
        &self.all.children.masters
    }

    pub fn workers(&self) -> &Group<WorkerHostVars> {
        &self.all.children.workers
    }

    /// Encode as block-style YAML.
    pub fn to_yaml(&self) -> Result<String, AppError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
