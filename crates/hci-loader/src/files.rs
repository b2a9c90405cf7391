//! Sources read from local files

use crate::config::LoaderConfig;
use crate::error::{LoadError, Result};
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

// File content, `None` if the file does not exist
async fn read_optional(path: &Path) -> Result<Option<String>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(error) if error.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "file not present");
            Ok(None)
        }
        Err(error) => Err(LoadError::io(path, &error)),
    }
}

/// Whether corosync.conf is present, i.e. the host is a cluster node
pub async fn has_corosync_conf(config: &LoaderConfig) -> bool {
    tokio::fs::try_exists(&config.corosync_conf_path)
        .await
        .unwrap_or(false)
}

// `addr`, `addr:port` or `[addr]:port` for IPv6
fn host_address(addr: &str, port: Option<&Value>) -> String {
    let port = match port {
        Some(Value::String(port)) if !port.is_empty() => port.clone(),
        Some(Value::Number(port)) if port.as_f64().is_some_and(|port| port != 0.0) => {
            port.to_string()
        }
        _ => return addr.to_string(),
    };
    if addr.contains(':') {
        format!("[{addr}]:{port}")
    } else {
        format!("{addr}:{port}")
    }
}

/// Node name to pcsd address map from the pcsd known hosts file.
///
/// Nodes without an address are left out. An absent file yields an empty
/// map. Parse errors do not carry the file content, it holds auth tokens.
pub async fn get_pcsd_known_hosts(config: &LoaderConfig) -> Result<Map<String, Value>> {
    let mut result = Map::new();
    let Some(content) = read_optional(&config.known_hosts_path).await? else {
        return Ok(result);
    };
    let known_hosts: Value = serde_json::from_str(&content)
        .map_err(|error| LoadError::json_parse(&error, "not logging data", "known hosts", None))?;

    let Some(hosts) = known_hosts.get("known_hosts").and_then(Value::as_object) else {
        return Ok(result);
    };
    for (host_name, host_data) in hosts {
        // a single address per host is supported
        let Some(dest) = host_data
            .get("dest_list")
            .and_then(Value::as_array)
            .and_then(|dest_list| dest_list.first())
        else {
            continue;
        };
        let Some(addr) = dest.get("addr").and_then(Value::as_str).filter(|addr| !addr.is_empty())
        else {
            continue;
        };
        result.insert(
            host_name.clone(),
            Value::String(host_address(addr, dest.get("port"))),
        );
    }
    Ok(result)
}

/// Parsed pcs_settings.conf, `None` if the file does not exist
pub async fn get_pcsd_settings_conf(config: &LoaderConfig) -> Result<Option<Value>> {
    let Some(content) = read_optional(&config.pcs_settings_path).await? else {
        return Ok(None);
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|error| LoadError::json_parse(&error, content.clone(), "pcsd settings", None))
}

/// Whether the OS is RHEL or a RHEL clone, judged by `PLATFORM_ID` in the OS
/// release file. An unreadable file means no.
pub async fn is_rhel_or_clone(config: &LoaderConfig) -> bool {
    let content = match read_optional(&config.os_release_path).await {
        Ok(Some(content)) => content,
        Ok(None) => return false,
        Err(error) => {
            warn!(%error, "unable to read OS release file");
            return false;
        }
    };
    content
        .lines()
        .filter_map(|line| line.strip_prefix("PLATFORM_ID="))
        .any(|platform| platform.trim().trim_matches('"').starts_with("platform:el"))
}
