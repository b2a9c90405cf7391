//! Sources exported by the pcs command line tool

use crate::config::LoaderConfig;
use crate::error::{LoadError, Result};
use crate::runner::CommandRunner;
use serde_json::Value;
use tracing::debug;

// English and ASCII output of external processes
pub(crate) const C_LOCALE: &[(&str, &str)] = &[("LC_ALL", "C")];

/// Run pcs with `command` and parse its JSON output.
///
/// `command` comes without the pcs executable itself.
pub async fn call_pcs_cli<R: CommandRunner>(
    runner: &R,
    config: &LoaderConfig,
    command: &[&str],
) -> Result<Value> {
    let full_command: Vec<String> = std::iter::once(config.pcs_binary.as_str())
        .chain(command.iter().copied())
        .map(ToString::to_string)
        .collect();

    let output = runner.run(&full_command, C_LOCALE).await?;
    if !output.success() {
        return Err(LoadError::command(
            &full_command,
            output.rc,
            output.stdout,
            output.stderr,
        ));
    }
    serde_json::from_str(&output.stdout).map_err(|error| {
        LoadError::json_parse(
            &error,
            output.stdout.clone(),
            full_command.join(" "),
            Some(output.stderr.clone()),
        )
    })
}

/// pcs version and the capabilities it advertises.
///
/// `pcs --version --full` prints the version on the first line and space
/// separated capabilities on the second one. Old versions print no
/// capabilities.
pub async fn get_pcs_version_info<R: CommandRunner>(
    runner: &R,
    config: &LoaderConfig,
) -> Result<(String, Vec<String>)> {
    let full_command = vec![
        config.pcs_binary.clone(),
        "--version".to_string(),
        "--full".to_string(),
    ];
    let output = runner.run(&full_command, C_LOCALE).await?;
    if !output.success() {
        return Err(LoadError::command(
            &full_command,
            output.rc,
            output.stdout,
            output.stderr,
        ));
    }

    let mut lines = output.stdout.lines();
    let version = lines.next().unwrap_or_default().trim().to_string();
    let capabilities: Vec<String> = lines
        .next()
        .map(|line| line.split_whitespace().map(ToString::to_string).collect())
        .unwrap_or_default();
    debug!(%version, capabilities = capabilities.len(), "pcs version detected");
    Ok((version, capabilities))
}

/// Whether a systemd service is enabled.
///
/// `service` comes without the `.service` suffix.
pub async fn is_service_enabled<R: CommandRunner>(runner: &R, service: &str) -> Result<bool> {
    let command = vec![
        "systemctl".to_string(),
        "is-enabled".to_string(),
        format!("{service}.service"),
    ];
    Ok(runner.run(&command, C_LOCALE).await?.success())
}

/// Corosync configuration
pub async fn get_corosync_conf<R: CommandRunner>(runner: &R, config: &LoaderConfig) -> Result<Value> {
    call_pcs_cli(runner, config, &["cluster", "config", "--output-format=json"]).await
}

/// Resources configuration
pub async fn get_resources_configuration<R: CommandRunner>(
    runner: &R,
    config: &LoaderConfig,
) -> Result<Value> {
    call_pcs_cli(runner, config, &["resource", "config", "--output-format=json"]).await
}

/// Stonith configuration
pub async fn get_stonith_configuration<R: CommandRunner>(
    runner: &R,
    config: &LoaderConfig,
) -> Result<Value> {
    call_pcs_cli(runner, config, &["stonith", "config", "--output-format=json"]).await
}

/// All constraints, expired ones included
pub async fn get_constraints_configuration<R: CommandRunner>(
    runner: &R,
    config: &LoaderConfig,
) -> Result<Value> {
    call_pcs_cli(runner, config, &["constraint", "--all", "--output-format=json"]).await
}

/// Cluster properties
pub async fn get_cluster_properties_configuration<R: CommandRunner>(
    runner: &R,
    config: &LoaderConfig,
) -> Result<Value> {
    call_pcs_cli(runner, config, &["property", "config", "--output-format=json"]).await
}

/// Resource defaults
pub async fn get_resource_defaults_configuration<R: CommandRunner>(
    runner: &R,
    config: &LoaderConfig,
) -> Result<Value> {
    call_pcs_cli(runner, config, &["resource", "defaults", "config", "--output-format=json"]).await
}

/// Resource operation defaults
pub async fn get_resource_op_defaults_configuration<R: CommandRunner>(
    runner: &R,
    config: &LoaderConfig,
) -> Result<Value> {
    call_pcs_cli(
        runner,
        config,
        &["resource", "op", "defaults", "config", "--output-format=json"],
    )
    .await
}
