//! The exported variables

use hci_wrap::is_truthy;
use serde::Serialize;
use serde_json::{Map, Value};

/// `ha_cluster_*` variables in export order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ClusterInfo {
    variables: Map<String, Value>,
}

impl ClusterInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable
    pub fn insert(&mut self, name: &str, value: impl Into<Value>) {
        self.variables.insert(name.to_string(), value.into());
    }

    /// Set a variable unless the value is null, false, zero or empty
    pub fn insert_truthy(&mut self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        if is_truthy(&value) {
            self.variables.insert(name.to_string(), value);
        }
    }

    /// Move all variables of `other` into this one
    pub fn merge(&mut self, other: ClusterInfo) {
        self.variables.extend(other.variables);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Variable names in export order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.variables)
    }
}
