use super::{required, resource, resource_sets, DESCRIPTION};
use crate::options::{rename, to_options, OptionKey};
use hci_wrap::{extract, invalid_part, Record, Result, Wrapped};
use serde_json::Value;

const OPTIONS: &[OptionKey] = &[rename("loss_policy", "loss-policy")];

fn ticket_attribute<'a>(constraint: &Wrapped<'a>) -> Result<Wrapped<'a>> {
    let attributes = constraint.at("attributes")?;
    let ticket = attributes.at("ticket")?;
    if !ticket.truthy() {
        return Err(invalid_part(
            constraint,
            "Ticket constraint is missing ticket attribute",
        ));
    }
    Ok(ticket)
}

fn ticket<'a>(ticket: &Wrapped<'a>) -> Result<Record<'a>> {
    let ticket_name = ticket_attribute(ticket)?;
    let attributes = ticket.at("attributes")?;
    let mut result = Record::new()
        .with("id", attributes.at("constraint_id")?)
        .with(
            "resource",
            resource(ticket, "resource_id", "role", "Ticket is missing resource_id")?,
        )
        .with("ticket", ticket_name);
    result.insert_truthy("options", to_options(&attributes, OPTIONS)?);
    Ok(result)
}

fn ticket_set<'a>(ticket_set: &Wrapped<'a>) -> Result<Record<'a>> {
    required(ticket_set, "resource_sets", "Ticket is missing resource_sets")?;
    let ticket_name = ticket_attribute(ticket_set)?;
    let attributes = ticket_set.at("attributes")?;
    let mut result = Record::new()
        .with("id", attributes.at("constraint_id")?)
        .with(
            "resource_sets",
            resource_sets(ticket_set, "Ticket is missing resource_sets")?,
        )
        .with("ticket", ticket_name);
    result.insert_truthy("options", to_options(&attributes, OPTIONS)?);
    Ok(result)
}

/// Ticket constraints followed by ticket set constraints
pub fn export_ticket_constraints(constraints: &Value) -> Result<Value> {
    extract(constraints, DESCRIPTION, |constraints| {
        let mut result = Vec::new();
        for constraint in constraints.at("ticket")?.iter()? {
            result.push(ticket(&constraint)?);
        }
        for constraint in constraints.at("ticket_set")?.iter()? {
            result.push(ticket_set(&constraint)?);
        }
        Ok(result)
    })
    .map(Value::from)
}
