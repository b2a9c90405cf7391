//! Values derived from service state, repositories and installed packages

use std::collections::BTreeSet;

const HA_REPOS: &[&str] = &["highavailability", "HighAvailability"];
const RS_REPOS: &[&str] = &["resilientstorage"];

// Kept in sync with the cloud agent packages the role installs on RHEL and
// CentOS. Packages missing on an architecture are never listed as installed
// there, so the architecture is not checked.
const CLOUD_AGENT_PACKAGES: &[&str] = &[
    "fence-agents-aliyun",
    "fence-agents-aws",
    "fence-agents-azure-arm",
    "fence-agents-compute",
    "fence-agents-gce",
    "fence-agents-ibm-powervs",
    "fence-agents-ibm-vpc",
    "fence-agents-kubevirt",
    "fence-agents-openstack",
    "resource-agents-aliyun",
    "resource-agents-cloud",
    "resource-agents-gcp",
];

/// The cluster starts on boot when either corosync or pacemaker is enabled
pub fn export_start_on_boot(corosync_enabled: bool, pacemaker_enabled: bool) -> bool {
    corosync_enabled || pacemaker_enabled
}

/// Whether the high availability repository shows in `dnf repolist` output
pub fn export_enable_repos_ha(dnf_repolist: &str) -> bool {
    HA_REPOS.iter().any(|repo| dnf_repolist.contains(repo))
}

/// Whether the resilient storage repository shows in `dnf repolist` output
pub fn export_enable_repos_rs(dnf_repolist: &str) -> bool {
    RS_REPOS.iter().any(|repo| dnf_repolist.contains(repo))
}

/// Whether any cloud agent package is installed
pub fn export_install_cloud_agents<S: AsRef<str>>(installed_packages: &[S]) -> bool {
    let installed: BTreeSet<&str> = installed_packages.iter().map(|package| package.as_ref()).collect();
    CLOUD_AGENT_PACKAGES
        .iter()
        .any(|package| installed.contains(package))
}
