//! Cluster properties from `pcs property config`

use crate::nvset::first_attrs;
use hci_wrap::{extract, Result};
use serde_json::Value;

pub const DESCRIPTION: &str = "cluster properties configuration";

// Maintained by pacemaker itself, cannot be set by the user
const SKIP_KEYS: &[&str] = &[
    "cluster-infrastructure",
    "cluster-name",
    "dc-version",
    "have-watchdog",
    "last-lrm-refresh",
];

/// Attrs of the first cluster properties set, read-only properties left out
pub fn export_cluster_properties(properties: &Value) -> Result<Value> {
    extract(properties, DESCRIPTION, |properties| {
        first_attrs(&properties.at("nvsets")?, SKIP_KEYS)
    })
    .map(Value::from)
}
