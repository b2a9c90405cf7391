//! Constraints from `pcs constraint --all --output-format=json`

mod colocation;
mod location;
mod order;
mod resource_set;
mod ticket;

pub use colocation::export_colocation_constraints;
pub use location::export_location_constraints;
pub use order::export_order_constraints;
pub use resource_set::export_resource_set;
pub use ticket::export_ticket_constraints;

use hci_wrap::{invalid_part, Record, Result, Wrapped};

pub const DESCRIPTION: &str = "constraints configuration";

// Member of `src` that must be truthy, reported at `src` otherwise
fn required<'a>(src: &Wrapped<'a>, key: &str, reason: &str) -> Result<Wrapped<'a>> {
    let member = src.at(key)?;
    if !member.truthy() {
        return Err(invalid_part(src, reason));
    }
    Ok(member)
}

// Exported resource sets of a set constraint
fn resource_sets<'a>(constraint_set: &Wrapped<'a>, reason: &str) -> Result<Vec<Record<'a>>> {
    required(constraint_set, "resource_sets", reason)?
        .iter()?
        .map(|resource_set| export_resource_set(&resource_set))
        .collect()
}

// `{id, role}` of a constrained resource, role only when set
fn resource<'a>(
    src: &Wrapped<'a>,
    id_key: &str,
    role_key: &str,
    missing: &str,
) -> Result<Record<'a>> {
    let mut resource = Record::new().with("id", required(src, id_key, missing)?);
    resource.insert_truthy("role", src.at(role_key)?);
    Ok(resource)
}
