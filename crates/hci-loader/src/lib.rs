//! Loading of the sources the `ha_cluster` info export works on.
//!
//! Sources come from three places:
//!
//! - pcs command output in JSON ([`pcs`])
//! - pcsd and corosync files on the local node ([`files`])
//! - OS package tools ([`os`])
//!
//! Commands go through a [`CommandRunner`] so the pipeline can be tested
//! without pcs installed.

pub mod config;
pub mod error;
pub mod files;
pub mod os;
pub mod pcs;
pub mod runner;

pub use config::LoaderConfig;
pub use error::{LoadError, Result};
pub use files::{get_pcsd_known_hosts, get_pcsd_settings_conf, has_corosync_conf, is_rhel_or_clone};
pub use os::{get_dnf_repolist, get_rpm_installed_packages};
pub use pcs::{
    call_pcs_cli, get_cluster_properties_configuration, get_constraints_configuration,
    get_corosync_conf, get_pcs_version_info, get_resource_defaults_configuration,
    get_resource_op_defaults_configuration, get_resources_configuration,
    get_stonith_configuration, is_service_enabled,
};
pub use runner::{CommandOutput, CommandRunner, ProcessRunner, RecordedCall, ScriptedRunner};
