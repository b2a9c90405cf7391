//! Name-value pairs and nvsets

use hci_wrap::{Extracted, Record, Result, Wrapped};

/// Single `{name, value}` item
pub fn nv<'a>(name: impl Into<Extracted<'a>>, value: impl Into<Extracted<'a>>) -> Record<'a> {
    Record::new().with("name", name).with("value", value)
}

/// Convert an object to a list of `{name, value}` items, in key order
pub fn dict_to_nv_list<'a>(dict: &Wrapped<'a>) -> Result<Vec<Record<'a>>> {
    Ok(dict
        .items()?
        .into_iter()
        .map(|(name, value)| nv(name, value))
        .collect())
}

/// Like [`dict_to_nv_list`] but dropping null values and `skip_keys`, and
/// renaming keys found in `key_map`
pub fn nv_list<'a>(
    dict: &Wrapped<'a>,
    skip_keys: &[&str],
    key_map: &[(&str, &str)],
) -> Result<Vec<Record<'a>>> {
    let mut list = Vec::new();
    for (key, value) in dict.items()? {
        let key = key.to_string();
        if value.is_null() || skip_keys.contains(&key.as_str()) {
            continue;
        }
        let name = key_map
            .iter()
            .find(|(from, _)| *from == key)
            .map_or(key.clone(), |(_, to)| (*to).to_string());
        list.push(nv(name, value));
    }
    Ok(list)
}

/// Attrs taken from the first nvset only: `[{attrs: [{name, value}, ...]}]`,
/// or an empty list when there is no nvset or the first one has no pairs
pub fn first_attrs<'a>(nvsets: &Wrapped<'a>, skip_keys: &[&str]) -> Result<Vec<Record<'a>>> {
    if nvsets.len()? < 1 {
        return Ok(Vec::new());
    }
    let nvpairs = nvsets.at(0)?.at("nvpairs")?;
    if nvpairs.len()? < 1 {
        return Ok(Vec::new());
    }

    let mut attrs = Vec::new();
    for nvpair in nvpairs.iter()? {
        let name = nvpair.at("name")?;
        if skip_keys.iter().any(|skipped| name == *skipped) {
            continue;
        }
        attrs.push(nv(name, nvpair.at("value")?));
    }
    Ok(vec![Record::new().with("attrs", attrs)])
}

/// First nvset attrs of an optional member of `src`
pub fn member_attrs<'a>(src: &Wrapped<'a>, key: &str) -> Result<Vec<Record<'a>>> {
    match src.get(key)? {
        Some(nvsets) => first_attrs(&nvsets, &[]),
        None => Ok(Vec::new()),
    }
}

/// All pairs of one nvset as a flat `{name, value}` list
pub fn nvset_to_attrs<'a>(nvset: &Wrapped<'a>) -> Result<Vec<Record<'a>>> {
    nvset
        .at("nvpairs")?
        .iter()?
        .map(|nvpair| -> Result<Record<'a>> {
            Ok(nv(nvpair.at("name")?, nvpair.at("value")?))
        })
        .collect()
}
