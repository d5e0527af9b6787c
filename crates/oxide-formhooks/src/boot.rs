//! Host-supplied boot context.

/// Read-only values the host injects once at application load.
///
/// Currently this carries the list of doctypes with nested-set (tree)
/// semantics, which behavior modules consult when deciding whether
/// descendant-related fields apply.
#[derive(Debug, Clone, Default)]
pub struct BootContext {
    nested_set_doctypes: Vec<String>,
}

impl BootContext {
    /// Creates an empty boot context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the doctypes that support nested-set semantics.
    #[must_use]
    pub fn nested_set_doctypes(mut self, names: &[&str]) -> Self {
        self.nested_set_doctypes = names.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Returns whether a doctype's records form a tree.
    pub fn is_nested_set(&self, doctype: &str) -> bool {
        self.nested_set_doctypes.iter().any(|name| name == doctype)
    }
}
