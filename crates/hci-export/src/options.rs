//! Role-format options

use crate::nvset::nv;
use hci_wrap::{Extracted, Record, Result, Wrapped};
use serde_json::Value;

/// Source key of an option and the name it is exported under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionKey {
    pub key: &'static str,
    pub name: &'static str,
}

/// Option exported under its source key
pub const fn keep(key: &'static str) -> OptionKey {
    OptionKey { key, name: key }
}

/// Option exported under a different name
pub const fn rename(key: &'static str, name: &'static str) -> OptionKey {
    OptionKey { key, name }
}

/// Option in role format
pub fn create_option<'a>(name: &str, value: impl Into<Extracted<'a>>) -> Record<'a> {
    nv(name, value)
}

/// Take the listed options from `src`.
///
/// Absent keys and falsy values are skipped. Booleans are exported as the
/// strings `"true"` and `"false"`, so `false` is kept.
pub fn to_options<'a>(src: &Wrapped<'a>, keys: &[OptionKey]) -> Result<Vec<Record<'a>>> {
    let mut options = Vec::new();
    for option in keys {
        if !src.contains(option.key)? {
            continue;
        }
        let value = src.at(option.key)?;
        if let Value::Bool(flag) = value.value() {
            options.push(create_option(option.name, flag.to_string()));
        } else if value.truthy() {
            options.push(create_option(option.name, value));
        }
    }
    Ok(options)
}
