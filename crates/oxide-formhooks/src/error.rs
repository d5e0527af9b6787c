//! Error types for form hooks.

use thiserror::Error;

/// Errors surfaced by hook dispatch and server-side lookups.
#[derive(Debug, Error)]
pub enum FormHookError {
    /// A chain of triggered events exceeded the dispatch limit.
    #[error("trigger chain starting at '{event}' exceeded {limit} events")]
    TriggerDepthExceeded {
        /// The event the host originally dispatched.
        event: String,
        /// Maximum number of events processed per dispatch.
        limit: usize,
    },

    /// A server-side lookup source failed.
    #[error("lookup for doctype '{doctype}' failed: {message}")]
    LookupFailed {
        /// The doctype the lookup was scoped to.
        doctype: String,
        /// Host-provided failure description.
        message: String,
    },
}

/// Result type alias for form hook operations.
pub type Result<T> = std::result::Result<T, FormHookError>;
