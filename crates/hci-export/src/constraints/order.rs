use super::{required, resource_sets, DESCRIPTION};
use crate::options::{keep, rename, to_options, OptionKey};
use hci_wrap::{extract, Record, Result, Wrapped};
use serde_json::Value;

const OPTIONS: &[OptionKey] = &[
    keep("score"),
    keep("kind"),
    keep("symmetrical"),
    rename("require_all", "require-all"),
];

// `{id, action}` of the first or then resource
fn resource<'a>(order: &Wrapped<'a>, side: &str) -> Result<Record<'a>> {
    let id_key = format!("{side}_resource_id");
    let id = required(order, &id_key, &format!("Order is missing {id_key}"))?;
    let mut resource = Record::new().with("id", id);
    resource.insert_truthy("action", order.at(format!("{side}_action"))?);
    Ok(resource)
}

fn order<'a>(order: &Wrapped<'a>) -> Result<Record<'a>> {
    let attributes = order.at("attributes")?;
    let mut result = Record::new()
        .with("id", attributes.at("constraint_id")?)
        .with("resource_first", resource(order, "first")?)
        .with("resource_then", resource(order, "then")?);
    result.insert_truthy("options", to_options(&attributes, OPTIONS)?);
    Ok(result)
}

fn order_set<'a>(order_set: &Wrapped<'a>) -> Result<Record<'a>> {
    let resource_sets = resource_sets(order_set, "Order is missing resource_sets")?;
    let attributes = order_set.at("attributes")?;
    let mut result = Record::new()
        .with("id", attributes.at("constraint_id")?)
        .with("resource_sets", resource_sets);
    result.insert_truthy("options", to_options(&attributes, OPTIONS)?);
    Ok(result)
}

/// Order constraints followed by order set constraints
pub fn export_order_constraints(constraints: &Value) -> Result<Value> {
    extract(constraints, DESCRIPTION, |constraints| {
        let mut result = Vec::new();
        for constraint in constraints.at("order")?.iter()? {
            result.push(order(&constraint)?);
        }
        for constraint in constraints.at("order_set")?.iter()? {
            result.push(order_set(&constraint)?);
        }
        Ok(result)
    })
    .map(Value::from)
}
