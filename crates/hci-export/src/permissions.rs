//! pcsd permissions from pcs_settings.conf

use hci_wrap::{extract, Record, Result};
use serde_json::Value;

pub const DESCRIPTION: &str = "pcs_settings.conf";

/// Local cluster permissions.
///
/// Only format version 2 of pcs_settings.conf is in use, the version is not
/// checked.
pub fn export_pcs_permission_list(pcs_settings_conf: &Value) -> Result<Value> {
    extract(pcs_settings_conf, DESCRIPTION, |conf| {
        let mut permissions = Vec::new();
        for permission in conf.at("permissions")?.at("local_cluster")?.iter()? {
            permissions.push(
                Record::new()
                    .with("type", permission.at("type")?)
                    .with("name", permission.at("name")?)
                    .with("allow_list", permission.at("allow")?.iter()?.collect::<Vec<_>>()),
            );
        }
        Ok(permissions)
    })
    .map(Value::from)
}
