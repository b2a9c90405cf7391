//! Offline conversion of pcs JSON output captured earlier

use crate::error::{PipelineError, Result};
use crate::export;
use crate::info::ClusterInfo;
use serde_json::{json, Value};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// A part of the configuration that can be converted on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// `pcs cluster config`, optionally followed by a node to pcsd address map
    Corosync,
    /// `pcs resource config`, optionally followed by `pcs stonith config`
    Resources,
    Constraints,
    ClusterProperties,
    ResourceDefaults,
    ResourceOpDefaults,
    /// pcsd `pcs_settings.conf`
    PcsdSettings,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Corosync,
        Section::Resources,
        Section::Constraints,
        Section::ClusterProperties,
        Section::ResourceDefaults,
        Section::ResourceOpDefaults,
        Section::PcsdSettings,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Section::Corosync => "corosync",
            Section::Resources => "resources",
            Section::Constraints => "constraints",
            Section::ClusterProperties => "cluster-properties",
            Section::ResourceDefaults => "resource-defaults",
            Section::ResourceOpDefaults => "resource-op-defaults",
            Section::PcsdSettings => "pcsd-settings",
        }
    }

    // minimal and maximal number of inputs
    fn arity(self) -> (usize, usize) {
        match self {
            Section::Corosync | Section::Resources => (1, 2),
            _ => (1, 1),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Section {
    type Err = PipelineError;

    fn from_str(name: &str) -> Result<Self> {
        Section::ALL
            .into_iter()
            .find(|section| section.name() == name)
            .ok_or_else(|| {
                let known: Vec<_> = Section::ALL.iter().map(Section::name).collect();
                PipelineError::arguments(format!(
                    "Unknown section '{name}', expected one of: {}",
                    known.join(", ")
                ))
            })
    }
}

/// Read one captured pcs JSON output
pub async fn read_source(path: &Path) -> Result<Value> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|error| PipelineError::input(path.display().to_string(), error.to_string()))?;
    serde_json::from_str(&content)
        .map_err(|error| PipelineError::input(path.display().to_string(), error.to_string()))
}

/// Variables of one section extracted from already loaded sources
pub fn convert_section(section: Section, sources: &[Value]) -> Result<ClusterInfo> {
    let (min, max) = section.arity();
    if sources.len() < min || sources.len() > max {
        return Err(PipelineError::arguments(format!(
            "Section '{section}' takes {} input(s), got {}",
            if min == max {
                min.to_string()
            } else {
                format!("{min} to {max}")
            },
            sources.len()
        )));
    }
    debug!(%section, inputs = sources.len(), "converting section");

    let first = &sources[0];
    match section {
        Section::Corosync => {
            let pcs_node_addr = sources.get(1).cloned().unwrap_or_else(|| json!({}));
            export::cluster_variables(first, &pcs_node_addr)
        }
        Section::Resources => {
            let stonith = sources.get(1).cloned().unwrap_or_else(|| json!({"primitives": []}));
            export::resource_variables(first, &stonith)
        }
        Section::Constraints => export::constraint_variables(first),
        Section::ClusterProperties => export::cluster_property_variables(first),
        Section::ResourceDefaults => export::resource_defaults_variables(first),
        Section::ResourceOpDefaults => export::resource_op_defaults_variables(first),
        Section::PcsdSettings => export::permission_variables(first),
    }
}
