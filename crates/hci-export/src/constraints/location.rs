use super::DESCRIPTION;
use crate::options::{create_option, rename, to_options};
use hci_wrap::{extract, invalid_part, Record, Result, Wrapped};
use serde_json::Value;

fn resource<'a>(location: &Wrapped<'a>) -> Result<Record<'a>> {
    let resource_id = location.at("resource_id")?;
    let resource_pattern = location.at("resource_pattern")?;
    match (resource_id.truthy(), resource_pattern.truthy()) {
        (true, true) => Err(invalid_part(
            location,
            "Location constraint has both resource_id and resource_pattern",
        )),
        (true, false) => Ok(Record::new().with("id", resource_id)),
        (false, true) => Ok(Record::new().with("pattern", resource_pattern)),
        (false, false) => Err(invalid_part(
            location,
            "Location constraint has neither resource_id nor resource_pattern",
        )),
    }
}

fn location<'a>(location: &Wrapped<'a>) -> Result<Record<'a>> {
    let attributes = location.at("attributes")?;
    let id = attributes.at("constraint_id")?;
    let mut resource = resource(location)?;

    let node = attributes.at("node")?;
    let rules = attributes.at("rules")?;
    if node.truthy() && rules.truthy() {
        return Err(invalid_part(location, "Location constraint has both node and rule"));
    }

    let (target, role, score, score_attribute) = if node.truthy() {
        let role = location.at("role")?;
        let score = attributes.at("score")?;
        (("node", node), Some(role), Some(score), None)
    } else if rules.truthy() {
        // a single rule per constraint is supported, the rest are dropped
        let rule = rules.at(0)?;
        let rule_options = rule.at("options")?;
        (
            ("rule", rule.at("as_string")?),
            rule_options.get("role")?,
            rule_options.get("score")?,
            rule_options.get("score-attribute")?,
        )
    } else {
        return Err(invalid_part(location, "Location constraint has neither node nor rule"));
    };

    if let Some(role) = role.filter(|role| role.truthy()) {
        resource.insert("role", role);
    }

    let mut options =
        to_options(&attributes, &[rename("resource_discovery", "resource-discovery")])?;
    if let Some(score) = score.filter(|score| score.truthy()) {
        options.push(create_option("score", score));
    }
    if let Some(score_attribute) = score_attribute.filter(|attribute| attribute.truthy()) {
        options.push(create_option("score-attribute", score_attribute));
    }

    let mut result = Record::new()
        .with("id", id)
        .with("resource", resource)
        .with(target.0, target.1);
    result.insert_truthy("options", options);
    Ok(result)
}

/// Location constraints.
///
/// Location constraints with resource sets are not exported.
pub fn export_location_constraints(constraints: &Value) -> Result<Value> {
    extract(constraints, DESCRIPTION, |constraints| {
        constraints
            .at("location")?
            .iter()?
            .map(|constraint| location(&constraint))
            .collect::<Result<Vec<_>>>()
    })
    .map(Value::from)
}
