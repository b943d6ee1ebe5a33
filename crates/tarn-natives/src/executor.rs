//! Executor seam — error routing for scheduled invocations
//!
//! The bridge schedules nothing itself. It only needs to know, per
//! invocation, whether an executor owns the calling strand and can absorb
//! language-level errors. [`ExecContext`] carries that answer plus the
//! executor handle when one exists.

use std::fmt;
use std::sync::Arc;

/// Language-level error value produced when native logic fails.
///
/// Wraps the failure message in the shape the engine's error channel
/// carries; the bridge never interprets it further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    message: String,
}

impl ErrorValue {
    /// Create an error value from a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Error channel an executor exposes to the bridge.
///
/// Implementations decide what absorbing an error means — typically
/// recording it on the strand and unwinding the language-level call.
pub trait Executor: Send + Sync {
    /// Absorb a language-level error raised by a native unit
    fn handle_error(&self, error: ErrorValue);
}

/// Per-invocation execution context.
///
/// `scheduled` invocations carry the owning executor and route failures
/// into its error channel. `detached` invocations — engine-internal calls
/// that never left the host — have no channel, and failures travel back to
/// the caller unchanged.
#[derive(Clone, Default)]
pub struct ExecContext {
    executor: Option<Arc<dyn Executor>>,
}

impl fmt::Debug for ExecContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecContext")
            .field("scheduled", &self.executor.is_some())
            .finish()
    }
}

impl ExecContext {
    /// Context for an engine-internal call with no executor attached
    pub fn detached() -> Self {
        Self { executor: None }
    }

    /// Context for a call owned by `executor`'s scheduling loop
    pub fn scheduled(executor: Arc<dyn Executor>) -> Self {
        Self {
            executor: Some(executor),
        }
    }

    /// Check if this invocation has an error channel
    pub fn has_error_channel(&self) -> bool {
        self.executor.is_some()
    }

    /// The owning executor, when scheduled
    pub fn executor(&self) -> Option<&dyn Executor> {
        self.executor.as_deref()
    }
}
