//! Field query specifications.
//!
//! A behavior module restricts the selectable values of a reference field by
//! installing a query provider on the form. The provider returns a
//! [`FieldQuery`], which serializes to the shape the host's list query
//! endpoint consumes: either `{"filters": {...}}` or
//! `{"query": "<method>", ...params}`.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Restriction applied to the candidate values of a reference field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldQuery {
    /// Key/value constraints evaluated by the host's standard list query.
    Filters(QueryFilters),
    /// A named server-side lookup with extra parameters.
    Lookup(ServerLookup),
}

/// A set of equality constraints on the target doctype's columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryFilters {
    filters: BTreeMap<String, Value>,
}

impl QueryFilters {
    /// Creates an empty constraint set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a constraint.
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Returns the constraint for a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.filters.get(key)
    }

    /// Returns whether any constraints are present.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

/// A reference to a named server-side lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerLookup {
    query: String,
    #[serde(flatten)]
    params: BTreeMap<String, Value>,
}

impl ServerLookup {
    /// Creates a lookup reference for the given method name.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            params: BTreeMap::new(),
        }
    }

    /// Adds a parameter passed through to the lookup.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Returns the lookup method name.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns a parameter value.
    pub fn get_param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filters_wire_shape() {
        let query = FieldQuery::Filters(
            QueryFilters::new().filter("issingle", 0).filter("istable", 0),
        );
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"filters": {"issingle": 0, "istable": 0}})
        );
    }

    #[test]
    fn test_lookup_wire_shape() {
        let query = FieldQuery::Lookup(
            ServerLookup::new("user_group_permission.get_applicable_for_doctype_list")
                .param("doctype", "Customer"),
        );
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "query": "user_group_permission.get_applicable_for_doctype_list",
                "doctype": "Customer",
            })
        );
    }

    #[test]
    fn test_filter_accessors() {
        let filters = QueryFilters::new().filter("istable", 0);
        assert_eq!(filters.get("istable"), Some(&json!(0)));
        assert!(filters.get("issingle").is_none());
        assert!(!filters.is_empty());
    }
}
