use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{json, Value};
use tempfile::TempDir;

fn cargo_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_ha-cluster-info"))
}

fn run_export(config: &Path, extra: &[&str]) -> Output {
    Command::new(cargo_bin())
        .arg("--config")
        .arg(config)
        .arg("export")
        .args(extra)
        .output()
        .expect("ha-cluster-info export should execute")
}

/// Loader configuration pointing every path into `dir`
fn write_config(dir: &TempDir, pcs_binary: &Path) -> PathBuf {
    let path = |name: &str| dir.path().join(name).display().to_string();
    let config = format!(
        "pcs_binary: {}\ncorosync_conf_path: {}\nknown_hosts_path: {}\npcs_settings_path: {}\nos_release_path: {}\ncommand_timeout_secs: 10\n",
        pcs_binary.display(),
        path("corosync.conf"),
        path("known-hosts"),
        path("pcs_settings.conf"),
        path("os-release"),
    );
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, config).unwrap();
    config_path
}

#[cfg(unix)]
fn fake_pcs(dir: &TempDir) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.path().join("pcs");
    fs::write(
        &path,
        "#!/bin/sh\nif [ \"$1\" = \"--version\" ]; then echo 0.11.8; exit 0; fi\nexit 1\n",
    )
    .unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
#[test]
fn test_export_without_cluster() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &fake_pcs(&dir));

    let output = run_export(&config, &[]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result, json!({"ha_cluster": {"ha_cluster_cluster_present": false}}));
}

#[cfg(unix)]
#[test]
fn test_export_yaml() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &fake_pcs(&dir));

    let output = run_export(&config, &["--format", "yaml"]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "ha_cluster:\n  ha_cluster_cluster_present: false\n"
    );
}

#[test]
fn test_export_without_pcs() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &dir.path().join("no-such-pcs"));

    let output = run_export(&config, &[]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Unable to run"), "stderr: {stderr}");
    assert!(stderr.contains("\"kind\":\"spawn\""), "stderr: {stderr}");
}

#[test]
fn test_export_bad_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.yaml");
    fs::write(&config, "pcs_binary: pcs\nunknown_option: 1\n").unwrap();

    let output = run_export(&config, &[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Configuration error"), "stderr: {stderr}");
}

#[test]
fn test_export_missing_config() {
    let dir = TempDir::new().unwrap();

    let output = run_export(&dir.path().join("missing.yaml"), &[]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Unable to read"));
}
