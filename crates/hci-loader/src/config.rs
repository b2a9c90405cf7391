//! Loader configuration options

use crate::error::{LoadError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where sources are read from and how commands are run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// pcs executable (default: `pcs` from `PATH`)
    pub pcs_binary: String,
    /// corosync.conf, its presence marks a cluster node
    pub corosync_conf_path: PathBuf,
    /// pcsd known hosts file
    pub known_hosts_path: PathBuf,
    /// pcsd settings file
    pub pcs_settings_path: PathBuf,
    /// OS release file used for distribution detection
    pub os_release_path: PathBuf,
    /// Time limit for a single command in seconds
    pub command_timeout_secs: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            pcs_binary: "pcs".to_string(),
            corosync_conf_path: PathBuf::from("/etc/corosync/corosync.conf"),
            known_hosts_path: PathBuf::from("/var/lib/pcsd/known-hosts"),
            pcs_settings_path: PathBuf::from("/var/lib/pcsd/pcs_settings.conf"),
            os_release_path: PathBuf::from("/etc/os-release"),
            command_timeout_secs: 60,
        }
    }
}

impl LoaderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML document, missing keys keep their defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|error| LoadError::config(error.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|error| LoadError::io(path, &error))?;
        Self::from_yaml_str(&yaml)
    }

    /// Set the pcs executable
    pub fn pcs_binary(mut self, pcs_binary: impl Into<String>) -> Self {
        self.pcs_binary = pcs_binary.into();
        self
    }

    /// Set the corosync.conf path
    pub fn corosync_conf_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.corosync_conf_path = path.into();
        self
    }

    /// Set the pcsd known hosts path
    pub fn known_hosts_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.known_hosts_path = path.into();
        self
    }

    /// Set the pcsd settings path
    pub fn pcs_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.pcs_settings_path = path.into();
        self
    }

    /// Set the OS release file path
    pub fn os_release_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.os_release_path = path.into();
        self
    }

    /// Set the command time limit
    pub fn command_timeout_secs(mut self, seconds: u64) -> Self {
        self.command_timeout_secs = seconds;
        self
    }

    /// Command time limit as a duration
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    /// Check the configuration for values no command could run with
    pub fn validate(&self) -> Result<()> {
        if self.pcs_binary.trim().is_empty() {
            return Err(LoadError::config("pcs_binary must not be empty"));
        }
        if self.command_timeout_secs == 0 {
            return Err(LoadError::config("command_timeout_secs must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = LoaderConfig::default();
        assert_eq!(config.pcs_binary, "pcs");
        assert_eq!(config.corosync_conf_path, PathBuf::from("/etc/corosync/corosync.conf"));
        assert_eq!(config.known_hosts_path, PathBuf::from("/var/lib/pcsd/known-hosts"));
        assert_eq!(config.command_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_builder() {
        let config = LoaderConfig::new()
            .pcs_binary("/usr/sbin/pcs")
            .corosync_conf_path("/tmp/corosync.conf")
            .command_timeout_secs(5);

        assert_eq!(config.pcs_binary, "/usr/sbin/pcs");
        assert_eq!(config.corosync_conf_path, PathBuf::from("/tmp/corosync.conf"));
        assert_eq!(config.command_timeout_secs, 5);
        assert_eq!(config.pcs_settings_path, LoaderConfig::default().pcs_settings_path);
    }

    #[test]
    fn test_partial_yaml() {
        let config = LoaderConfig::from_yaml_str("pcs_binary: /opt/pcs\ncommand_timeout_secs: 10\n")
            .unwrap();

        assert_eq!(config.pcs_binary, "/opt/pcs");
        assert_eq!(config.command_timeout_secs, 10);
        assert_eq!(config.os_release_path, PathBuf::from("/etc/os-release"));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            LoaderConfig::from_yaml_str("unknown_key: 1\n"),
            Err(LoadError::Config { .. })
        ));
        assert!(matches!(
            LoaderConfig::from_yaml_str("command_timeout_secs: 0\n"),
            Err(LoadError::Config { .. })
        ));
    }
}
