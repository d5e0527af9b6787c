//! Form state and the host contract behavior modules drive.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::doc::FormDoc;
use crate::query::FieldQuery;

/// Provider evaluated each time the host needs a field's query, so the
/// returned restriction always reflects the current document.
pub type QueryProvider = Arc<dyn Fn(&FormDoc) -> FieldQuery + Send + Sync>;

/// A form being edited: the document plus per-field UI state.
///
/// The mutating methods mirror the host contract consumed by behavior
/// modules: `set_query`, `toggle_reqd`, `toggle_display`, `set_value`.
/// Fields are displayed and optional until toggled otherwise.
#[derive(Default)]
pub struct Form {
    doc: FormDoc,
    required: BTreeMap<String, bool>,
    displayed: BTreeMap<String, bool>,
    queries: BTreeMap<String, QueryProvider>,
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("doc", &self.doc)
            .field("required", &self.required)
            .field("displayed", &self.displayed)
            .finish_non_exhaustive()
    }
}

impl Form {
    /// Creates a form over the given document.
    pub fn new(doc: FormDoc) -> Self {
        Self {
            doc,
            ..Self::default()
        }
    }

    /// Returns the document being edited.
    pub fn doc(&self) -> &FormDoc {
        &self.doc
    }

    /// Installs a query provider for a reference field.
    pub fn set_query(
        &mut self,
        field: impl Into<String>,
        provider: impl Fn(&FormDoc) -> FieldQuery + Send + Sync + 'static,
    ) {
        self.set_query_provider(field, Arc::new(provider));
    }

    /// Installs an already-boxed query provider.
    pub fn set_query_provider(&mut self, field: impl Into<String>, provider: QueryProvider) {
        self.queries.insert(field.into(), provider);
    }

    /// Evaluates a field's query provider against the current document.
    pub fn get_query(&self, field: &str) -> Option<FieldQuery> {
        self.queries.get(field).map(|provider| provider(&self.doc))
    }

    /// Marks a field required or optional.
    pub fn toggle_reqd(&mut self, field: impl Into<String>, required: bool) {
        self.required.insert(field.into(), required);
    }

    /// Shows or hides a field.
    pub fn toggle_display(&mut self, field: impl Into<String>, displayed: bool) {
        self.displayed.insert(field.into(), displayed);
    }

    /// Writes a field value. `Value::Null` clears the field.
    ///
    /// This is the raw write; dispatching the field's change event is the
    /// job of [`FormHooks`](crate::FormHooks).
    pub fn set_value(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.doc.set(field, value);
    }

    /// Returns whether a field is currently required.
    pub fn is_required(&self, field: &str) -> bool {
        self.required.get(field).copied().unwrap_or(false)
    }

    /// Returns whether a field is currently displayed.
    pub fn is_displayed(&self, field: &str) -> bool {
        self.displayed.get(field).copied().unwrap_or(true)
    }
}
