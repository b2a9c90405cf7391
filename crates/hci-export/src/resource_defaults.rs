//! Resource and resource operation defaults from
//! `pcs resource [op] defaults config`

use crate::nvset::nvset_to_attrs;
use hci_wrap::{extract, Record, Result, Wrapped};
use serde_json::Value;

pub const DESCRIPTION: &str = "resource defaults configuration";
pub const OP_DESCRIPTION: &str = "resource operation defaults configuration";

fn meta_attrs_set<'a>(nvset: &Wrapped<'a>) -> Result<Record<'a>> {
    let mut meta_attrs_set = Record::new().with("id", nvset.at("id")?);

    let attrs = nvset_to_attrs(nvset)?;
    if !attrs.is_empty() {
        meta_attrs_set.insert("attrs", attrs);
    }

    if let Some(score) = nvset.at("options")?.get("score")? {
        meta_attrs_set.insert_truthy("score", score);
    }

    let rule = nvset.at("rule")?;
    if rule.truthy() {
        meta_attrs_set.insert("rule", rule.at("as_string")?);
    }

    Ok(meta_attrs_set)
}

fn defaults<'a>(defaults: &Wrapped<'a>) -> Result<Option<Record<'a>>> {
    let nvsets = defaults.at("meta_attributes")?;
    if nvsets.len()? < 1 {
        return Ok(None);
    }

    let meta_attrs = nvsets
        .iter()?
        .map(|nvset| meta_attrs_set(&nvset))
        .collect::<Result<Vec<_>>>()?;
    Ok(Some(Record::new().with("meta_attrs", meta_attrs)))
}

/// Meta attribute sets of resource defaults, `None` if there are none
pub fn export_resource_defaults(defaults_conf: &Value) -> Result<Option<Value>> {
    extract(defaults_conf, DESCRIPTION, |src| defaults(&src))
}

/// Meta attribute sets of resource operation defaults, `None` if there are
/// none
pub fn export_resource_op_defaults(defaults_conf: &Value) -> Result<Option<Value>> {
    extract(defaults_conf, OP_DESCRIPTION, |src| defaults(&src))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_meta_attributes() {
        let conf = json!({"instance_attributes": [], "meta_attributes": []});

        assert_eq!(export_resource_defaults(&conf).unwrap(), None);
        assert_eq!(export_resource_op_defaults(&conf).unwrap(), None);
    }

    #[test]
    fn test_description_differs() {
        let conf = json!({});
        let error = export_resource_op_defaults(&conf).unwrap_err();
        let error = error.as_invalid_source().unwrap();

        assert_eq!(error.description, OP_DESCRIPTION);
        assert_eq!(error.reason, "Missing key 'meta_attributes'");
    }

    #[test]
    fn test_empty_score_skipped() {
        let conf = json!({"meta_attributes": [
            {"id": "id-1", "options": {"score": ""}, "rule": null, "nvpairs": []},
        ]});

        assert_eq!(
            export_resource_defaults(&conf).unwrap(),
            Some(json!({"meta_attrs": [{"id": "id-1"}]}))
        );
    }
}
