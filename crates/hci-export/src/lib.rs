//! Extraction of `ha_cluster` role variables from pcs output.
//!
//! Every function takes source data exactly as pcs or pcsd produced it,
//! wraps it for error reporting and returns plain JSON in the role's format.
//! A shape problem in the source is returned as
//! [`hci_wrap::Error::InvalidSource`] naming the source and the location of
//! the problem.
//!
//! ```
//! use serde_json::json;
//!
//! let conf = json!({"cluster_name": "my-cluster"});
//! let name = hci_export::export_corosync_cluster_name(&conf).unwrap();
//! assert_eq!(name, json!("my-cluster"));
//! ```

pub mod cluster_properties;
pub mod constraints;
pub mod corosync;
pub mod nvset;
pub mod options;
pub mod permissions;
pub mod resource_defaults;
pub mod resources;
pub mod various;

pub use cluster_properties::export_cluster_properties;
pub use constraints::{
    export_colocation_constraints, export_location_constraints, export_order_constraints,
    export_ticket_constraints,
};
pub use corosync::{
    export_cluster_nodes, export_corosync_cluster_name, export_corosync_quorum,
    export_corosync_totem, export_corosync_transport,
};
pub use permissions::export_pcs_permission_list;
pub use resource_defaults::{export_resource_defaults, export_resource_op_defaults};
pub use resources::{
    export_resource_bundle_list, export_resource_clone_list, export_resource_group_list,
    export_resource_primitive_list,
};
pub use various::{
    export_enable_repos_ha, export_enable_repos_rs, export_install_cloud_agents,
    export_start_on_boot,
};
