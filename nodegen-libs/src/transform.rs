//! Node set to inventory/locals transformation.
//!
//! No I/O happens here. Given the same [`NodeSet`] and [`NetworkSettings`]
//! the same documents come out.

use crate::config::NetworkSettings;
use crate::inventory::{InventoryDocument, MasterHostVars, NodeState, WorkerHostVars};
use crate::locals::{LocalsDocument, LocalsHost};
use crate::node::{Node, NodeSet, Role};
use tracing::warn;

/// Priority of the first master.
pub const TOP_PRIORITY: i64 = 100;

/// Priority drop per master position.
pub const PRIORITY_STEP: i64 = 10;

/// Fields computed for a node on top of its name and ip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedHost {
    pub hostname: String,

    /// Masters only
    pub priority: Option<i64>,

    /// Masters only
    pub state: Option<NodeState>,

    pub is_bootstrap: bool,
}

/// Hostname for a node: `KUBE-<ROLE>-TERRAFORM-<suffix>`.
///
/// The suffix is the part of `name` after its last `-`, or the whole name
/// when it has none. `master-3` becomes `KUBE-MASTER-TERRAFORM-3`.
pub fn make_hostname(name: &str, role: Role) -> String {
    let suffix = name.rsplit('-').next().unwrap_or(name);
    format!("KUBE-{}-TERRAFORM-{}", role.label(), suffix)
}

/// Priority and state of the master at `index` in input order.
///
/// Not clamped: the eleventh master onwards gets zero or negative values.
pub fn rank(index: usize) -> (i64, NodeState) {
    let priority = TOP_PRIORITY - PRIORITY_STEP * index as i64;
    let state = if index == 0 {
        NodeState::Master
    } else {
        NodeState::Backup
    };
    (priority, state)
}

/// Compute the derived fields of one node.
pub fn derive_host(node: &Node, role: Role, index: usize) -> DerivedHost {
    let hostname = make_hostname(&node.name, role);

    match role {
        Role::Master => {
            let (priority, state) = rank(index);
            DerivedHost {
                hostname,
                priority: Some(priority),
                state: Some(state),
                is_bootstrap: node.bootstrap,
            }
        }
        Role::Worker => DerivedHost {
            hostname,
            priority: None,
            state: None,
            is_bootstrap: false,
        },
    }
}

fn locals_host(node: &Node, derived: &DerivedHost, network: &NetworkSettings) -> LocalsHost {
    LocalsHost {
        hostname: derived.hostname.clone(),
        vm_name: node.name.clone(),
        ip_address: node.ip.clone(),
        gateway: network.gateway.clone(),
        dns: network.dns.clone(),
    }
}

/// Build both output documents from a validated node set.
pub fn transform(
    nodes: &NodeSet,
    network: &NetworkSettings,
) -> (InventoryDocument, LocalsDocument) {
    let mut inventory = InventoryDocument::default();
    let mut locals = LocalsDocument::default();

    for (index, node) in nodes.masters.iter().enumerate() {
        let derived = derive_host(node, Role::Master, index);
        let (priority, state) = rank(index);

        if priority <= 0 {
            warn!(
                "Master '{}' at position {} gets non-positive priority {}",
                node.name, index, priority
            );
        }

        locals
            .masters
            .insert(node.name.clone(), locals_host(node, &derived, network));
        inventory.all.children.masters.hosts.insert(
            node.name.clone(),
            MasterHostVars {
                ansible_host: node.ip.clone(),
                ansible_user: node.name.clone(),
                node_priority: priority,
                node_state: state,
                is_bootstrap: derived.is_bootstrap,
            },
        );
    }

    for (index, node) in nodes.workers.iter().enumerate() {
        let derived = derive_host(node, Role::Worker, index);

        locals
            .workers
            .insert(node.name.clone(), locals_host(node, &derived, network));
        inventory.all.children.workers.hosts.insert(
            node.name.clone(),
            WorkerHostVars {
                ansible_host: node.ip.clone(),
                ansible_user: node.name.clone(),
            },
        );
    }

    (inventory, locals)
}
