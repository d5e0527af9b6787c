//! Behavior for the User Group Permission admin form.
//!
//! The form grants a user group access to records of a chosen doctype
//! (`allow` / `for_value`), either across all doctypes
//! (`apply_to_all_doctypes`) or scoped to one (`applicable_for`), with an
//! option to exclude tree descendants (`hide_descendants`).

use serde_json::Value;

use crate::hooks::{FormHooks, FormPatch};
use crate::query::{FieldQuery, QueryFilters, ServerLookup};

/// Server lookup named by the `applicable_for` field query.
pub const APPLICABLE_FOR_QUERY: &str =
    "user_group_permission.get_applicable_for_doctype_list";

/// Builds the hook set for the User Group Permission form.
///
/// Events handled: `setup`, `refresh`, the field changes `allow` and
/// `apply_to_all_doctypes`, and the internal triggers
/// `set_applicable_for_constraint` and `toggle_hide_descendants`.
pub fn hooks() -> FormHooks {
    FormHooks::new()
        .on("setup", |_, _| {
            FormPatch::new()
                // Single and child-table doctypes cannot carry permissions.
                .set_query("allow", |_| {
                    FieldQuery::Filters(
                        QueryFilters::new().filter("issingle", 0).filter("istable", 0),
                    )
                })
                .set_query("applicable_for", |doc| {
                    FieldQuery::Lookup(
                        ServerLookup::new(APPLICABLE_FOR_QUERY)
                            .param("doctype", doc.get("allow").cloned().unwrap_or(Value::Null)),
                    )
                })
        })
        .on("refresh", |_, _| {
            // Could grow a "View Permitted Documents" report link here.
            FormPatch::new()
                .trigger("set_applicable_for_constraint")
                .trigger("toggle_hide_descendants")
        })
        .on("allow", |form, _| {
            let mut patch = FormPatch::new();
            if form.doc().is_set("allow") {
                if form.doc().is_set("for_value") {
                    patch = patch.set_value("for_value", Value::Null);
                }
                patch = patch.trigger("toggle_hide_descendants");
            }
            patch
        })
        .on("apply_to_all_doctypes", |_, _| {
            FormPatch::new().trigger("set_applicable_for_constraint")
        })
        .on("set_applicable_for_constraint", |form, _| {
            let all_doctypes = form.doc().get_bool("apply_to_all_doctypes");
            let mut patch = FormPatch::new().toggle_reqd("applicable_for", !all_doctypes);
            if all_doctypes && form.doc().is_set("applicable_for") {
                // Stale scope from before the switch; drop it without firing
                // the field's change event.
                patch = patch.set_value_silent("applicable_for", Value::Null);
            }
            patch
        })
        .on("toggle_hide_descendants", |form, boot| {
            let show = form
                .doc()
                .get_str("allow")
                .is_some_and(|allow| boot.is_nested_set(allow));
            FormPatch::new().toggle_display("hide_descendants", show)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boot::BootContext;
    use crate::doc::FormDoc;
    use crate::form::Form;
    use serde_json::json;

    #[test]
    fn test_setup_restricts_allow_to_plain_doctypes() {
        let hooks = hooks();
        let mut form = Form::new(FormDoc::new());
        hooks
            .trigger(&mut form, &BootContext::new(), "setup")
            .unwrap();

        let query = form.get_query("allow").unwrap();
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"filters": {"issingle": 0, "istable": 0}})
        );
    }

    #[test]
    fn test_applicable_for_query_tracks_allow() {
        let hooks = hooks();
        let mut form = Form::new(FormDoc::new());
        let boot = BootContext::new();
        hooks.trigger(&mut form, &boot, "setup").unwrap();

        let query = form.get_query("applicable_for").unwrap();
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"query": APPLICABLE_FOR_QUERY, "doctype": null})
        );

        hooks
            .change_value(&mut form, &boot, "allow", "Customer")
            .unwrap();
        let query = form.get_query("applicable_for").unwrap();
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"query": APPLICABLE_FOR_QUERY, "doctype": "Customer"})
        );
    }

    #[test]
    fn test_allow_change_clears_for_value() {
        let hooks = hooks();
        let boot = BootContext::new();
        let mut form = Form::new(FormDoc::new().with("for_value", "ABC Corp"));

        hooks
            .change_value(&mut form, &boot, "allow", "Customer")
            .unwrap();
        assert!(!form.doc().is_set("for_value"));
    }

    #[test]
    fn test_empty_allow_keeps_for_value() {
        let hooks = hooks();
        let boot = BootContext::new();
        let mut form = Form::new(FormDoc::new().with("for_value", "ABC Corp"));

        hooks
            .change_value(&mut form, &boot, "allow", Value::Null)
            .unwrap();
        assert_eq!(form.doc().get_str("for_value"), Some("ABC Corp"));
    }

    #[test]
    fn test_hide_descendants_follows_nested_set_list() {
        let hooks = hooks();
        let boot = BootContext::new().nested_set_doctypes(&["Territory"]);
        let mut form = Form::new(FormDoc::new());

        hooks
            .change_value(&mut form, &boot, "allow", "Territory")
            .unwrap();
        assert!(form.is_displayed("hide_descendants"));

        hooks
            .change_value(&mut form, &boot, "allow", "Customer")
            .unwrap();
        assert!(!form.is_displayed("hide_descendants"));
    }

    #[test]
    fn test_applicable_for_required_unless_all_doctypes() {
        let hooks = hooks();
        let boot = BootContext::new();

        let mut form = Form::new(FormDoc::new());
        hooks.trigger(&mut form, &boot, "refresh").unwrap();
        assert!(form.is_required("applicable_for"));

        let mut form = Form::new(FormDoc::new().with("apply_to_all_doctypes", 1));
        hooks.trigger(&mut form, &boot, "refresh").unwrap();
        assert!(!form.is_required("applicable_for"));
    }

    #[test]
    fn test_all_doctypes_clears_stale_applicable_for() {
        let hooks = hooks();
        let boot = BootContext::new();
        let mut form = Form::new(FormDoc::new().with("applicable_for", "Sales Invoice"));

        hooks
            .change_value(&mut form, &boot, "apply_to_all_doctypes", 1)
            .unwrap();
        assert!(!form.doc().is_set("applicable_for"));
        assert!(!form.is_required("applicable_for"));
    }

    #[test]
    fn test_switching_back_restores_requiredness() {
        let hooks = hooks();
        let boot = BootContext::new();
        let mut form = Form::new(FormDoc::new().with("apply_to_all_doctypes", 1));

        hooks
            .change_value(&mut form, &boot, "apply_to_all_doctypes", 0)
            .unwrap();
        assert!(form.is_required("applicable_for"));
    }
}
