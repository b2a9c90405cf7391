//! Cluster name, transport, totem, quorum and nodes from the corosync
//! configuration as exported by pcs

use crate::nvset::dict_to_nv_list;
use hci_wrap::{extract, Arguments, Boundary, Extracted, Record, Result, Wrapped};
use serde_json::Value;

pub const DESCRIPTION: &str = "corosync configuration";

/// Cluster name
pub fn export_corosync_cluster_name(corosync_conf: &Value) -> Result<Value> {
    extract(corosync_conf, DESCRIPTION, |conf| Ok(conf.at("cluster_name")?))
}

/// Transport type with its options, links, compression and crypto settings
pub fn export_corosync_transport(corosync_conf: &Value) -> Result<Value> {
    extract(corosync_conf, DESCRIPTION, |conf| {
        let mut transport =
            Record::new().with("type", conf.at("transport")?.as_str()?.to_lowercase());

        let options = conf.at("transport_options")?;
        if options.truthy() {
            transport.insert("options", dict_to_nv_list(&options)?);
        }

        // the link number is both the key and a member of each link
        let links = conf.at("links_options")?;
        if links.truthy() {
            let links = links
                .values()?
                .map(|link| dict_to_nv_list(&link))
                .collect::<Result<Vec<_>>>()?;
            transport.insert("links", links);
        }

        for (key, name) in [("compression_options", "compression"), ("crypto_options", "crypto")] {
            let options = conf.at(key)?;
            if options.truthy() {
                transport.insert(name, dict_to_nv_list(&options)?);
            }
        }

        Ok(transport)
    })
}

fn options_only<'a>(conf: &Wrapped<'a>, key: &str) -> Result<Record<'a>> {
    let mut result = Record::new();
    let options = conf.at(key)?;
    if options.truthy() {
        result.insert("options", dict_to_nv_list(&options)?);
    }
    Ok(result)
}

/// Totem options
pub fn export_corosync_totem(corosync_conf: &Value) -> Result<Value> {
    extract(corosync_conf, DESCRIPTION, |conf| options_only(&conf, "totem_options"))
}

/// Quorum options
pub fn export_corosync_quorum(corosync_conf: &Value) -> Result<Value> {
    extract(corosync_conf, DESCRIPTION, |conf| options_only(&conf, "quorum_options"))
}

/// Cluster nodes with their corosync addresses ordered by link number.
///
/// `pcs_node_addr` maps node names to the address pcsd reaches them on. It is
/// not source data and is used as is.
pub fn export_cluster_nodes(corosync_conf: &Value, pcs_node_addr: &Value) -> Result<Value> {
    let boundary = Boundary::new("export_cluster_nodes")
        .source("corosync_conf", DESCRIPTION)
        .plain("pcs_node_addr");
    let arguments = Arguments::new().arg(corosync_conf).arg(pcs_node_addr);

    boundary
        .call(arguments, |bound| {
            let conf = bound.source("corosync_conf")?;
            let pcs_node_addr = bound.plain("pcs_node_addr")?;

            let nodes = conf.at("nodes")?;
            let mut node_list = Vec::new();
            if !nodes.truthy() {
                return Ok(node_list);
            }
            for node in nodes.iter()? {
                let name = node.at("name")?;
                let addresses = node
                    .at("addrs")?
                    .sorted_by_key(|addr| addr.at("link"))?
                    .into_iter()
                    .map(|addr| addr.at("addr").map(Extracted::from))
                    .collect::<std::result::Result<Vec<_>, _>>()?;

                let pcs_address = name
                    .value()
                    .as_str()
                    .and_then(|name| pcs_node_addr.get(name))
                    .cloned();

                let mut one_node = Record::new()
                    .with("node_name", name)
                    .with("corosync_addresses", addresses);
                if let Some(pcs_address) = pcs_address {
                    one_node.insert("pcs_address", pcs_address);
                }
                node_list.push(one_node);
            }
            Ok(node_list)
        })
        .map(Value::from)
}
