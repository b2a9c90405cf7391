//! The live export: load each source, extract it and assemble the variables

use crate::capability::Capability;
use crate::error::Result;
use crate::info::ClusterInfo;
use hci_export as export;
use hci_loader::{self as loader, CommandRunner, LoaderConfig};
use serde_json::Value;
use tracing::{debug, info};

/// Variables derived from the corosync configuration.
///
/// `pcs_node_addr` maps node names to their pcsd addresses.
pub fn cluster_variables(corosync_conf: &Value, pcs_node_addr: &Value) -> Result<ClusterInfo> {
    let mut info = ClusterInfo::new();
    info.insert(
        "ha_cluster_cluster_name",
        export::export_corosync_cluster_name(corosync_conf)?,
    );
    info.insert(
        "ha_cluster_transport",
        export::export_corosync_transport(corosync_conf)?,
    );
    info.insert_truthy("ha_cluster_totem", export::export_corosync_totem(corosync_conf)?);
    info.insert_truthy("ha_cluster_quorum", export::export_corosync_quorum(corosync_conf)?);
    info.insert(
        "ha_cluster_node_options",
        export::export_cluster_nodes(corosync_conf, pcs_node_addr)?,
    );
    Ok(info)
}

/// Variables derived from the resources and stonith configuration
pub fn resource_variables(resources: &Value, stonith: &Value) -> Result<ClusterInfo> {
    let mut info = ClusterInfo::new();
    info.insert_truthy(
        "ha_cluster_resource_primitives",
        export::export_resource_primitive_list(resources, stonith)?,
    );
    info.insert_truthy(
        "ha_cluster_resource_groups",
        export::export_resource_group_list(resources)?,
    );
    info.insert_truthy(
        "ha_cluster_resource_clones",
        export::export_resource_clone_list(resources)?,
    );
    info.insert_truthy(
        "ha_cluster_resource_bundles",
        export::export_resource_bundle_list(resources)?,
    );
    Ok(info)
}

/// Variables derived from the constraints configuration
pub fn constraint_variables(constraints: &Value) -> Result<ClusterInfo> {
    let mut info = ClusterInfo::new();
    info.insert_truthy(
        "ha_cluster_constraints_location",
        export::export_location_constraints(constraints)?,
    );
    info.insert_truthy(
        "ha_cluster_constraints_colocation",
        export::export_colocation_constraints(constraints)?,
    );
    info.insert_truthy(
        "ha_cluster_constraints_order",
        export::export_order_constraints(constraints)?,
    );
    info.insert_truthy(
        "ha_cluster_constraints_ticket",
        export::export_ticket_constraints(constraints)?,
    );
    Ok(info)
}

pub fn cluster_property_variables(properties: &Value) -> Result<ClusterInfo> {
    let mut info = ClusterInfo::new();
    info.insert_truthy(
        "ha_cluster_cluster_properties",
        export::export_cluster_properties(properties)?,
    );
    Ok(info)
}

pub fn resource_defaults_variables(defaults: &Value) -> Result<ClusterInfo> {
    let mut info = ClusterInfo::new();
    if let Some(defaults) = export::export_resource_defaults(defaults)? {
        info.insert_truthy("ha_cluster_resource_defaults", defaults);
    }
    Ok(info)
}

pub fn resource_op_defaults_variables(defaults: &Value) -> Result<ClusterInfo> {
    let mut info = ClusterInfo::new();
    if let Some(defaults) = export::export_resource_op_defaults(defaults)? {
        info.insert_truthy("ha_cluster_resource_operation_defaults", defaults);
    }
    Ok(info)
}

pub fn permission_variables(pcs_settings_conf: &Value) -> Result<ClusterInfo> {
    let mut info = ClusterInfo::new();
    info.insert(
        "ha_cluster_pcs_permission_list",
        export::export_pcs_permission_list(pcs_settings_conf)?,
    );
    Ok(info)
}

async fn export_os<R: CommandRunner>(runner: &R, config: &LoaderConfig) -> ClusterInfo {
    let mut info = ClusterInfo::new();
    if !loader::is_rhel_or_clone(config).await {
        debug!("not a RHEL compatible system, skipping repositories and packages");
        return info;
    }
    if let Some(repolist) = loader::get_dnf_repolist(runner).await {
        info.insert("ha_cluster_enable_repos", export::export_enable_repos_ha(&repolist));
        info.insert(
            "ha_cluster_enable_repos_resilient_storage",
            export::export_enable_repos_rs(&repolist),
        );
    }
    if let Some(packages) = loader::get_rpm_installed_packages(runner).await {
        info.insert(
            "ha_cluster_install_cloud_agents",
            export::export_install_cloud_agents(&packages),
        );
    }
    info
}

async fn export_pcsd(config: &LoaderConfig) -> Result<ClusterInfo> {
    match loader::get_pcsd_settings_conf(config).await? {
        Some(settings) => permission_variables(&settings),
        None => Ok(ClusterInfo::new()),
    }
}

async fn export_cluster<R: CommandRunner>(runner: &R, config: &LoaderConfig) -> Result<ClusterInfo> {
    let mut info = ClusterInfo::new();

    let (corosync_enabled, pacemaker_enabled) = tokio::try_join!(
        loader::is_service_enabled(runner, "corosync"),
        loader::is_service_enabled(runner, "pacemaker"),
    )?;
    info.insert(
        "ha_cluster_start_on_boot",
        export::export_start_on_boot(corosync_enabled, pacemaker_enabled),
    );

    let corosync_conf = loader::get_corosync_conf(runner, config).await?;
    let known_hosts = Value::Object(loader::get_pcsd_known_hosts(config).await?);
    info.merge(cluster_variables(&corosync_conf, &known_hosts)?);
    Ok(info)
}

async fn export_resources<R: CommandRunner>(
    runner: &R,
    config: &LoaderConfig,
) -> Result<ClusterInfo> {
    let (resources, stonith) = tokio::try_join!(
        loader::get_resources_configuration(runner, config),
        loader::get_stonith_configuration(runner, config),
    )?;
    resource_variables(&resources, &stonith)
}

/// Run the whole export.
///
/// Nothing but `ha_cluster_cluster_present: false` is exported on a host
/// without corosync.conf. pcs is queried for its capabilities first so a
/// missing pcs is reported either way. Sections pcs cannot output in JSON
/// are skipped.
pub async fn export_cluster_info<R: CommandRunner>(
    runner: &R,
    config: &LoaderConfig,
) -> Result<ClusterInfo> {
    config.validate()?;
    let (version, capabilities) = loader::get_pcs_version_info(runner, config).await?;
    info!(pcs_version = %version, "exporting cluster configuration");

    let mut info = ClusterInfo::new();
    if !loader::has_corosync_conf(config).await {
        info!("corosync.conf not found, no cluster present");
        info.insert("ha_cluster_cluster_present", false);
        return Ok(info);
    }

    info.merge(export_os(runner, config).await);
    info.merge(export_pcsd(config).await?);
    info.merge(export_cluster(runner, config).await?);

    let supported = |capability: Capability| {
        let supported = capability.is_supported(&capabilities);
        if !supported {
            debug!(%capability, "not supported by pcs, skipping");
        }
        supported
    };

    if supported(Capability::ResourceOutput) {
        info.merge(export_resources(runner, config).await?);
    }
    if supported(Capability::ConstraintsOutput) {
        let constraints = loader::get_constraints_configuration(runner, config).await?;
        info.merge(constraint_variables(&constraints)?);
    }
    if supported(Capability::ClusterPropertiesOutput) {
        let properties = loader::get_cluster_properties_configuration(runner, config).await?;
        info.merge(cluster_property_variables(&properties)?);
    }
    if supported(Capability::ResourceDefaultsOutput) {
        let defaults = loader::get_resource_defaults_configuration(runner, config).await?;
        info.merge(resource_defaults_variables(&defaults)?);
    }
    if supported(Capability::ResourceOpDefaultsOutput) {
        let defaults = loader::get_resource_op_defaults_configuration(runner, config).await?;
        info.merge(resource_op_defaults_variables(&defaults)?);
    }

    info.insert("ha_cluster_cluster_present", true);
    debug!(variables = info.len(), "export finished");
    Ok(info)
}
