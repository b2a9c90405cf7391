//! pcs capabilities gating parts of the export

use std::fmt;

/// Capabilities the export depends on, as advertised by `pcs --version --full`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Resources and stonith in JSON
    ResourceOutput,
    /// Constraints in JSON
    ConstraintsOutput,
    /// Cluster properties in JSON
    ClusterPropertiesOutput,
    /// Resource defaults in JSON
    ResourceDefaultsOutput,
    /// Resource operation defaults in JSON
    ResourceOpDefaultsOutput,
}

impl Capability {
    pub const ALL: [Capability; 5] = [
        Capability::ResourceOutput,
        Capability::ConstraintsOutput,
        Capability::ClusterPropertiesOutput,
        Capability::ResourceDefaultsOutput,
        Capability::ResourceOpDefaultsOutput,
    ];

    /// Capability name as pcs reports it
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ResourceOutput => "pcmk.resource.config.output-formats",
            Capability::ConstraintsOutput => "pcmk.constraint.config.output-formats",
            Capability::ClusterPropertiesOutput => "pcmk.properties.cluster.config.output-formats",
            Capability::ResourceDefaultsOutput => {
                "pcmk.properties.resource-defaults.config.output-formats"
            }
            Capability::ResourceOpDefaultsOutput => {
                "pcmk.properties.operation-defaults.config.output-formats"
            }
        }
    }

    /// Whether pcs advertised this capability
    pub fn is_supported<S: AsRef<str>>(&self, pcs_capabilities: &[S]) -> bool {
        pcs_capabilities
            .iter()
            .any(|capability| capability.as_ref() == self.as_str())
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
