//! # oxide-formhooks
//!
//! Declarative client-side behavior for admin forms: field query filters,
//! conditional visibility and requiredness, and value resets triggered by
//! user edits.
//!
//! This crate provides:
//! - A form document and per-field UI state (`FormDoc`, `Form`)
//! - Field query specifications (`FieldQuery`) in the host's wire shape
//! - An event registry with pure handlers returning patches (`FormHooks`,
//!   `FormPatch`)
//! - The server-side lookup backing scoped permission queries (`lookup`)
//! - The shipped behavior module for the User Group Permission form
//!   (`user_group_permission`)
//!
//! Handlers are keyed by event name. The host fires `setup` once,
//! `refresh` whenever the form is (re)displayed, and a field's name when
//! the user edits it; handlers return a [`FormPatch`] that the dispatcher
//! applies, chaining any follow-up events. Dispatch is single-threaded and
//! runs to completion.
//!
//! ## Quick Start
//!
//! ```rust
//! use oxide_formhooks::{user_group_permission, BootContext, Form, FormDoc};
//!
//! let hooks = user_group_permission::hooks();
//! let boot = BootContext::new().nested_set_doctypes(&["Territory"]);
//! let mut form = Form::new(
//!     FormDoc::new()
//!         .with("allow", "Customer")
//!         .with("for_value", "ABC Corp"),
//! );
//!
//! hooks.trigger(&mut form, &boot, "setup")?;
//! hooks.trigger(&mut form, &boot, "refresh")?;
//! assert!(form.is_required("applicable_for"));
//!
//! // A user edit fires the field's change handlers.
//! hooks.change_value(&mut form, &boot, "allow", "Territory")?;
//! assert!(!form.doc().is_set("for_value"));
//! assert!(form.is_displayed("hide_descendants"));
//! # Ok::<(), oxide_formhooks::FormHookError>(())
//! ```

mod boot;
mod doc;
mod error;
mod form;
mod hooks;
pub mod lookup;
pub mod query;
pub mod user_group_permission;

pub use boot::BootContext;
pub use doc::FormDoc;
pub use error::{FormHookError, Result};
pub use form::{Form, QueryProvider};
pub use hooks::{FormHooks, FormPatch, Handler, PatchOp};
pub use lookup::{applicable_for_doctype_list, LinkedDoctype, LinkedDoctypeSource};
pub use query::{FieldQuery, QueryFilters, ServerLookup};
