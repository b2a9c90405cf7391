//! # hci-pipeline
//!
//! Orchestration of the `ha_cluster` info export.
//!
//! [`export_cluster_info`] queries pcs and the local files of a cluster node
//! and turns them into `ha_cluster_*` variables. Parts pcs cannot output in
//! JSON are skipped based on the [`Capability`] list pcs reports.
//! [`convert_section`] runs the same extraction over pcs output captured
//! earlier, without pcs.

pub mod capability;
pub mod convert;
pub mod error;
pub mod export;
pub mod info;

pub use capability::Capability;
pub use convert::{convert_section, read_source, Section};
pub use error::{PipelineError, Result};
pub use export::export_cluster_info;
pub use info::ClusterInfo;
