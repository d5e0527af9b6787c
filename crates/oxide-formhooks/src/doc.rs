//! The form document: the key-value record being edited.
//!
//! The host owns the document; behavior modules read it through the
//! accessors here and write it through [`Form`](crate::Form) patches.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A key-value record representing the entity being edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDoc {
    #[serde(flatten)]
    fields: BTreeMap<String, Value>,
}

impl FormDoc {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value, builder style.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Returns the raw value of a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns a field as a string, if it holds one.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Returns a field interpreted as a flag.
    ///
    /// Booleans read as themselves; numbers read as true when non-zero
    /// (check columns are stored as 0/1). Anything else reads as false.
    pub fn get_bool(&self, field: &str) -> bool {
        match self.fields.get(field) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            _ => false,
        }
    }

    /// Returns whether a field holds a non-empty value.
    ///
    /// Null and the empty string both count as unset.
    pub fn is_set(&self, field: &str) -> bool {
        match self.fields.get(field) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }

    /// Writes a field value. `Value::Null` leaves the field present but unset.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Clears a field back to null.
    pub fn clear(&mut self, field: impl Into<String>) {
        self.fields.insert(field.into(), Value::Null);
    }
}
