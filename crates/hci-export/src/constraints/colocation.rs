use super::{resource, resource_sets, DESCRIPTION};
use crate::options::{keep, to_options, OptionKey};
use hci_wrap::{extract, Record, Result, Wrapped};
use serde_json::Value;

const OPTIONS: &[OptionKey] = &[keep("score"), keep("influence")];

fn colocation<'a>(colocation: &Wrapped<'a>) -> Result<Record<'a>> {
    let attributes = colocation.at("attributes")?;
    let mut result = Record::new()
        .with("id", attributes.at("constraint_id")?)
        .with(
            "resource_leader",
            resource(
                colocation,
                "with_resource_id",
                "with_resource_role",
                "Colocation is missing with_resource_id",
            )?,
        )
        .with(
            "resource_follower",
            resource(
                colocation,
                "resource_id",
                "resource_role",
                "Colocation is missing resource_id",
            )?,
        );
    result.insert_truthy("options", to_options(&attributes, OPTIONS)?);
    Ok(result)
}

fn colocation_set<'a>(colocation_set: &Wrapped<'a>) -> Result<Record<'a>> {
    let resource_sets = resource_sets(colocation_set, "Colocation is missing resource_sets")?;
    let attributes = colocation_set.at("attributes")?;
    let mut result = Record::new()
        .with("id", attributes.at("constraint_id")?)
        .with("resource_sets", resource_sets);
    result.insert_truthy("options", to_options(&attributes, OPTIONS)?);
    Ok(result)
}

/// Colocation constraints followed by colocation set constraints
pub fn export_colocation_constraints(constraints: &Value) -> Result<Value> {
    extract(constraints, DESCRIPTION, |constraints| {
        let mut result = Vec::new();
        for constraint in constraints.at("colocation")?.iter()? {
            result.push(colocation(&constraint)?);
        }
        for constraint in constraints.at("colocation_set")?.iter()? {
            result.push(colocation_set(&constraint)?);
        }
        Ok(result)
    })
    .map(Value::from)
}
