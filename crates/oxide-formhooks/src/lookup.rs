//! Server-side lookup backing the `applicable_for` field query.
//!
//! The host implements [`LinkedDoctypeSource`] over its link metadata;
//! [`applicable_for_doctype_list`] turns that into the candidate list the
//! form's lookup query returns.

use crate::error::Result;

/// A doctype holding a link to some target doctype. When the link lives on
/// a child table row, `child_doctype` names that child table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedDoctype {
    /// The linking doctype.
    pub name: String,
    /// Child table carrying the link, if any.
    pub child_doctype: Option<String>,
}

impl LinkedDoctype {
    /// Creates a link entry with no child table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            child_doctype: None,
        }
    }

    /// Sets the child table carrying the link.
    #[must_use]
    pub fn child(mut self, child_doctype: impl Into<String>) -> Self {
        self.child_doctype = Some(child_doctype.into());
        self
    }
}

/// Source of link metadata, implemented by the host.
pub trait LinkedDoctypeSource: Send + Sync {
    /// Returns the doctypes holding a link to `doctype`.
    ///
    /// Failures are reported as
    /// [`FormHookError::LookupFailed`](crate::FormHookError::LookupFailed).
    fn linked_doctypes(&self, doctype: &str) -> Result<Vec<LinkedDoctype>>;
}

/// Returns the valid `applicable_for` values for a chosen target doctype.
///
/// Candidates are the doctypes linked to `doctype`, the child tables
/// carrying those links, and `doctype` itself. `txt` applies a
/// case-insensitive substring filter; the sorted result is windowed to
/// indices `start..page_len`, matching the host's search pagination.
pub fn applicable_for_doctype_list(
    source: &dyn LinkedDoctypeSource,
    doctype: &str,
    txt: &str,
    start: usize,
    page_len: usize,
) -> Result<Vec<String>> {
    let mut candidates = Vec::new();
    for linked in source.linked_doctypes(doctype)? {
        candidates.push(linked.name);
        if let Some(child) = linked.child_doctype {
            candidates.push(child);
        }
    }
    candidates.push(doctype.to_string());

    if !txt.is_empty() {
        let needle = txt.to_lowercase();
        candidates.retain(|name| name.to_lowercase().contains(&needle));
    }
    candidates.sort();

    Ok(candidates.into_iter().take(page_len).skip(start).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormHookError;

    struct StubSource(Vec<LinkedDoctype>);

    impl LinkedDoctypeSource for StubSource {
        fn linked_doctypes(&self, _doctype: &str) -> Result<Vec<LinkedDoctype>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    impl LinkedDoctypeSource for FailingSource {
        fn linked_doctypes(&self, doctype: &str) -> Result<Vec<LinkedDoctype>> {
            Err(FormHookError::LookupFailed {
                doctype: doctype.to_string(),
                message: "metadata unavailable".to_string(),
            })
        }
    }

    #[test]
    fn test_collects_links_children_and_self() {
        let source = StubSource(vec![
            LinkedDoctype::new("Sales Invoice").child("Sales Invoice Item"),
            LinkedDoctype::new("Delivery Note"),
        ]);

        let list = applicable_for_doctype_list(&source, "Customer", "", 0, 20).unwrap();
        assert_eq!(
            list,
            vec![
                "Customer",
                "Delivery Note",
                "Sales Invoice",
                "Sales Invoice Item",
            ]
        );
    }

    #[test]
    fn test_text_filter_is_case_insensitive() {
        let source = StubSource(vec![
            LinkedDoctype::new("Sales Invoice"),
            LinkedDoctype::new("Delivery Note"),
        ]);

        let list = applicable_for_doctype_list(&source, "Customer", "invoice", 0, 20).unwrap();
        assert_eq!(list, vec!["Sales Invoice"]);
    }

    #[test]
    fn test_window_end_is_page_len() {
        let source = StubSource(vec![
            LinkedDoctype::new("A"),
            LinkedDoctype::new("B"),
            LinkedDoctype::new("C"),
            LinkedDoctype::new("D"),
        ]);

        // Window is start..page_len over the sorted list, which here is
        // [A, B, C, Customer, D].
        let list = applicable_for_doctype_list(&source, "Customer", "", 1, 3).unwrap();
        assert_eq!(list, vec!["B", "C"]);

        let empty = applicable_for_doctype_list(&source, "Customer", "", 3, 2).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_source_failure_propagates() {
        let err =
            applicable_for_doctype_list(&FailingSource, "Customer", "", 0, 20).unwrap_err();
        assert!(matches!(err, FormHookError::LookupFailed { .. }));
    }
}
