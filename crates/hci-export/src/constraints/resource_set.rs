use crate::options::{keep, rename, to_options, OptionKey};
use hci_wrap::{invalid_part, Record, Result, Wrapped};

const OPTIONS: &[OptionKey] = &[
    keep("ordering"),
    keep("action"),
    keep("role"),
    keep("score"),
    keep("kind"),
    keep("sequential"),
    rename("require_all", "require-all"),
];

/// One resource set of a set constraint
pub fn export_resource_set<'a>(resource_set: &Wrapped<'a>) -> Result<Record<'a>> {
    let resource_ids = resource_set.at("resources_ids")?;
    if !resource_ids.truthy() {
        return Err(invalid_part(resource_set, "Resource set without resource_ids"));
    }

    let mut result = Record::new().with("resource_ids", resource_ids);
    result.insert_truthy("options", to_options(resource_set, OPTIONS)?);
    Ok(result)
}
