//! Primitives, groups, clones and bundles from `pcs resource config` and
//! `pcs stonith config`

use crate::nvset::{member_attrs, nv, nv_list};
use hci_wrap::{extract, invalid_part, Arguments, Boundary, Record, Result, Wrapped};
use serde_json::Value;
use tracing::debug;

pub const DESCRIPTION: &str = "resources configuration";
pub const STONITH_DESCRIPTION: &str = "stonith configuration";

const PACEMAKER_TRUE: &[&str] = &["true", "on", "yes", "y", "1"];

const OPERATION_SKIP_KEYS: &[&str] = &["id", "name", "meta_attributes", "instance_attributes"];

const CONTAINER_KEY_MAP: &[(&str, &str)] = &[
    ("promoted_max", "promoted-max"),
    ("replicas_per_host", "replicas-per-host"),
    ("run_command", "run-command"),
];
const NETWORK_KEY_MAP: &[(&str, &str)] = &[
    ("add_host", "add-host"),
    ("control_port", "control-port"),
    ("host_interface", "host-interface"),
    ("host_netmask", "host-netmask"),
    ("ip_range_start", "ip-range-start"),
];
const PORT_MAP_KEY_MAP: &[(&str, &str)] = &[("internal_port", "internal-port")];
const STORAGE_MAP_KEY_MAP: &[(&str, &str)] = &[
    ("source_dir", "source-dir"),
    ("source_dir_root", "source-dir-root"),
    ("target_dir", "target-dir"),
];

fn operations<'a>(primitive: &Wrapped<'a>) -> Result<Vec<Record<'a>>> {
    let Some(operation_list) = primitive.get("operations")? else {
        return Ok(Vec::new());
    };
    let mut operations = Vec::new();
    for operation in operation_list.iter()? {
        let attrs = nv_list(&operation, OPERATION_SKIP_KEYS, &[])?;
        if attrs.is_empty() {
            return Err(invalid_part(&operation, "No attributes in operation"));
        }
        operations.push(
            Record::new()
                .with("action", operation.at("name")?)
                .with("attrs", attrs),
        );
    }
    Ok(operations)
}

fn agent(agent_name: &Wrapped<'_>) -> Result<String> {
    let standard = agent_name.at("standard")?;
    let provider = agent_name.at("provider")?;
    let agent_type = agent_name.at("type")?;
    Ok(if provider.truthy() {
        format!("{}:{}:{}", standard.as_str()?, provider.as_str()?, agent_type.as_str()?)
    } else {
        format!("{}:{}", standard.as_str()?, agent_type.as_str()?)
    })
}

fn primitive<'a>(primitive: &Wrapped<'a>, use_utilization: bool) -> Result<Record<'a>> {
    let mut result = Record::new()
        .with("id", primitive.at("id")?)
        // exactly the operations stored in the CIB
        .with("copy_operations_from_agent", false)
        .with("agent", agent(&primitive.at("agent_name")?)?);

    result.insert_truthy("instance_attrs", member_attrs(primitive, "instance_attributes")?);
    result.insert_truthy("meta_attrs", member_attrs(primitive, "meta_attributes")?);
    if use_utilization {
        result.insert_truthy("utilization", member_attrs(primitive, "utilization")?);
    }
    result.insert_truthy("operations", operations(primitive)?);
    Ok(result)
}

/// Primitive resources, stonith devices first.
///
/// Stonith must be configured before the resources that depend on it can
/// start. Stonith devices carry no utilization.
pub fn export_resource_primitive_list(resources: &Value, stonith: &Value) -> Result<Value> {
    let boundary = Boundary::new("export_resource_primitive_list")
        .source("resources", DESCRIPTION)
        .source("stonith", STONITH_DESCRIPTION);
    let arguments = Arguments::new().arg(resources).arg(stonith);

    boundary
        .call(arguments, |bound| {
            let resources = bound.source("resources")?;
            let stonith = bound.source("stonith")?;

            let mut result = Vec::new();
            for stonith_primitive in stonith.at("primitives")?.iter()? {
                result.push(primitive(&stonith_primitive, false)?);
            }
            for resource_primitive in resources.at("primitives")?.iter()? {
                result.push(primitive(&resource_primitive, true)?);
            }
            Ok(result)
        })
        .map(Value::from)
}

/// Resource groups
pub fn export_resource_group_list(resources: &Value) -> Result<Value> {
    extract(resources, DESCRIPTION, |resources| {
        let mut result = Vec::new();
        for group in resources.at("groups")?.iter()? {
            let mut record = Record::new()
                .with("id", group.at("id")?)
                .with("resource_ids", group.at("member_ids")?);
            record.insert_truthy("meta_attrs", member_attrs(&group, "meta_attributes")?);
            result.push(record);
        }
        Ok(result)
    })
    .map(Value::from)
}

// Attrs of the first meta attributes set without the `promotable` pair, and
// whether that pair was set to a pacemaker true value
fn meta_attrs_promotable<'a>(clone: &Wrapped<'a>) -> Result<(Vec<Record<'a>>, bool)> {
    let Some(nvsets) = clone.get("meta_attributes")? else {
        return Ok((Vec::new(), false));
    };
    if nvsets.is_empty()? {
        return Ok((Vec::new(), false));
    }

    let mut promoted_pair = None;
    let mut remaining_pairs = Vec::new();
    for pair in nvsets.at(0)?.at("nvpairs")?.iter()? {
        if pair.at("name")? == "promotable" {
            promoted_pair = Some(pair);
        } else {
            remaining_pairs.push(nv(pair.at("name")?, pair.at("value")?));
        }
    }

    let promotable = match promoted_pair {
        Some(pair) => {
            let value = pair.at("value")?.as_str()?.to_lowercase();
            PACEMAKER_TRUE.contains(&value.as_str())
        }
        None => false,
    };
    let attrs = if remaining_pairs.is_empty() {
        Vec::new()
    } else {
        vec![Record::new().with("attrs", remaining_pairs)]
    };
    Ok((attrs, promotable))
}

/// Resource clones, promotable clones flagged
pub fn export_resource_clone_list(resources: &Value) -> Result<Value> {
    extract(resources, DESCRIPTION, |resources| {
        let mut result = Vec::new();
        for clone in resources.at("clones")?.iter()? {
            let mut record = Record::new()
                .with("id", clone.at("id")?)
                .with("resource_id", clone.at("member_id")?);
            let (meta_attrs, promotable) = meta_attrs_promotable(&clone)?;
            if promotable {
                record.insert("promotable", true);
            }
            record.insert_truthy("meta_attrs", meta_attrs);
            result.push(record);
        }
        Ok(result)
    })
    .map(Value::from)
}

fn container<'a>(bundle: &Wrapped<'a>) -> Result<Record<'a>> {
    let mut container = Record::new().with("type", bundle.at("container_type")?);
    if let Some(options) = bundle.get("container_options")? {
        container.insert_truthy("options", nv_list(&options, &[], CONTAINER_KEY_MAP)?);
    }
    Ok(container)
}

fn mapping_list<'a>(
    bundle: &Wrapped<'a>,
    key: &str,
    key_map: &[(&str, &str)],
) -> Result<Vec<Vec<Record<'a>>>> {
    let Some(mappings) = bundle.get(key)? else {
        return Ok(Vec::new());
    };
    mappings
        .iter()?
        .map(|mapping| nv_list(&mapping, &["id"], key_map))
        .collect()
}

/// Resource bundles.
///
/// A bundle whose container type pcs does not support comes without a
/// container type and is skipped.
pub fn export_resource_bundle_list(resources: &Value) -> Result<Value> {
    extract(resources, DESCRIPTION, |resources| {
        let mut result = Vec::new();
        for bundle in resources.at("bundles")?.iter()? {
            match bundle.get("container_type")? {
                Some(container_type) if !container_type.is_null() => {}
                _ => {
                    let id = bundle.get("id")?.map(|id| id.to_string()).unwrap_or_default();
                    debug!(bundle = %id, "skipping bundle without container type");
                    continue;
                }
            }

            let mut record = Record::new().with("id", bundle.at("id")?);
            if let Some(member_id) = bundle.get("member_id")? {
                record.insert_truthy("resource_id", member_id);
            }
            record.insert("container", container(&bundle)?);
            record.insert_truthy("meta_attrs", member_attrs(&bundle, "meta_attributes")?);

            // network is null when not set
            if let Some(network) = bundle.get("network")?.filter(|network| network.truthy()) {
                record.insert_truthy("network_options", nv_list(&network, &[], NETWORK_KEY_MAP)?);
            }

            record.insert_truthy("port_map", mapping_list(&bundle, "port_mappings", PORT_MAP_KEY_MAP)?);
            record.insert_truthy(
                "storage_map",
                mapping_list(&bundle, "storage_mappings", STORAGE_MAP_KEY_MAP)?,
            );
            result.push(record);
        }
        Ok(result)
    })
    .map(Value::from)
}
