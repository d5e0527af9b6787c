//! Event registry and dispatch.
//!
//! Handlers are pure: they read the form and the boot context and return a
//! [`FormPatch`] describing what should change. The dispatcher applies each
//! patch in order and chains follow-up events, so a handler that sets a
//! field's value fires that field's change handler, exactly as if the user
//! had edited it.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::boot::BootContext;
use crate::doc::FormDoc;
use crate::error::{FormHookError, Result};
use crate::form::{Form, QueryProvider};
use crate::query::FieldQuery;

/// Maximum events processed by a single dispatch before it is treated as a
/// runaway trigger chain.
const MAX_TRIGGER_DEPTH: usize = 64;

/// A handler bound to an event name.
pub type Handler = Arc<dyn Fn(&Form, &BootContext) -> FormPatch + Send + Sync>;

/// One operation produced by a handler.
#[derive(Clone)]
pub enum PatchOp {
    /// Write a field value; unless silent, the field's change event fires.
    SetValue {
        field: String,
        value: Value,
        silent: bool,
    },
    /// Mark a field required or optional.
    ToggleReqd { field: String, required: bool },
    /// Show or hide a field.
    ToggleDisplay { field: String, displayed: bool },
    /// Install a query provider for a reference field.
    SetQuery {
        field: String,
        provider: QueryProvider,
    },
    /// Fire another named event after this patch is applied.
    Trigger { event: String },
}

impl std::fmt::Debug for PatchOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SetValue {
                field,
                value,
                silent,
            } => f
                .debug_struct("SetValue")
                .field("field", field)
                .field("value", value)
                .field("silent", silent)
                .finish(),
            Self::ToggleReqd { field, required } => f
                .debug_struct("ToggleReqd")
                .field("field", field)
                .field("required", required)
                .finish(),
            Self::ToggleDisplay { field, displayed } => f
                .debug_struct("ToggleDisplay")
                .field("field", field)
                .field("displayed", displayed)
                .finish(),
            Self::SetQuery { field, .. } => f
                .debug_struct("SetQuery")
                .field("field", field)
                .finish_non_exhaustive(),
            Self::Trigger { event } => {
                f.debug_struct("Trigger").field("event", event).finish()
            }
        }
    }
}

/// An ordered list of operations returned by a handler.
#[derive(Debug, Clone, Default)]
pub struct FormPatch {
    ops: Vec<PatchOp>,
}

impl FormPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a field value and fires its change event.
    #[must_use]
    pub fn set_value(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.ops.push(PatchOp::SetValue {
            field: field.into(),
            value: value.into(),
            silent: false,
        });
        self
    }

    /// Writes a field value without firing its change event.
    #[must_use]
    pub fn set_value_silent(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.ops.push(PatchOp::SetValue {
            field: field.into(),
            value: value.into(),
            silent: true,
        });
        self
    }

    /// Marks a field required or optional.
    #[must_use]
    pub fn toggle_reqd(mut self, field: impl Into<String>, required: bool) -> Self {
        self.ops.push(PatchOp::ToggleReqd {
            field: field.into(),
            required,
        });
        self
    }

    /// Shows or hides a field.
    #[must_use]
    pub fn toggle_display(mut self, field: impl Into<String>, displayed: bool) -> Self {
        self.ops.push(PatchOp::ToggleDisplay {
            field: field.into(),
            displayed,
        });
        self
    }

    /// Installs a query provider for a reference field.
    #[must_use]
    pub fn set_query(
        mut self,
        field: impl Into<String>,
        provider: impl Fn(&FormDoc) -> FieldQuery + Send + Sync + 'static,
    ) -> Self {
        self.ops.push(PatchOp::SetQuery {
            field: field.into(),
            provider: Arc::new(provider),
        });
        self
    }

    /// Fires another named event after this patch is applied.
    #[must_use]
    pub fn trigger(mut self, event: impl Into<String>) -> Self {
        self.ops.push(PatchOp::Trigger {
            event: event.into(),
        });
        self
    }

    /// Returns whether the patch contains no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Returns the operations in application order.
    pub fn ops(&self) -> &[PatchOp] {
        &self.ops
    }
}

/// Named event handlers for one form.
///
/// The host dispatches one event at a time; each dispatch runs to
/// completion before returning.
#[derive(Default)]
pub struct FormHooks {
    handlers: HashMap<String, Handler>,
}

impl FormHooks {
    /// Creates an empty hook set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a handler to an event name.
    ///
    /// Field-change events use the field name as the event name.
    #[must_use]
    pub fn on(
        mut self,
        event: impl Into<String>,
        handler: impl Fn(&Form, &BootContext) -> FormPatch + Send + Sync + 'static,
    ) -> Self {
        self.handlers.insert(event.into(), Arc::new(handler));
        self
    }

    /// Returns whether a handler is bound to an event.
    pub fn has(&self, event: &str) -> bool {
        self.handlers.contains_key(event)
    }

    /// Dispatches an event and every event it transitively triggers.
    ///
    /// Events with no bound handler are no-ops, since the host fires events
    /// this module may not care about.
    pub fn trigger(&self, form: &mut Form, boot: &BootContext, event: &str) -> Result<()> {
        let mut queue = VecDeque::from([event.to_string()]);
        let mut processed = 0usize;

        while let Some(current) = queue.pop_front() {
            processed += 1;
            if processed > MAX_TRIGGER_DEPTH {
                return Err(FormHookError::TriggerDepthExceeded {
                    event: event.to_string(),
                    limit: MAX_TRIGGER_DEPTH,
                });
            }

            let Some(handler) = self.handlers.get(&current).map(Arc::clone) else {
                debug!(event = %current, "no handler bound, skipping");
                continue;
            };

            let patch = handler(form, boot);
            debug!(event = %current, ops = patch.ops().len(), "applying patch");

            for op in patch.ops {
                match op {
                    PatchOp::SetValue {
                        field,
                        value,
                        silent,
                    } => {
                        form.set_value(&field, value);
                        if !silent {
                            queue.push_back(field);
                        }
                    }
                    PatchOp::ToggleReqd { field, required } => form.toggle_reqd(field, required),
                    PatchOp::ToggleDisplay { field, displayed } => {
                        form.toggle_display(field, displayed);
                    }
                    PatchOp::SetQuery { field, provider } => {
                        form.set_query_provider(field, provider);
                    }
                    PatchOp::Trigger { event } => queue.push_back(event),
                }
            }
        }

        Ok(())
    }

    /// Applies a user edit: writes the value, then fires the field's
    /// change event.
    pub fn change_value(
        &self,
        form: &mut Form,
        boot: &BootContext,
        field: &str,
        value: impl Into<Value>,
    ) -> Result<()> {
        form.set_value(field, value);
        self.trigger(form, boot, field)
    }
}
