//! Native invocation wrapper
//!
//! [`execute_native`] is the single entry point the engine uses to run a
//! linked native unit against a frame: bind the call context, run the
//! logic behind a panic barrier, write results back into the frame's
//! return bank, and route failures by execution mode.

use std::panic::{self, AssertUnwindSafe};

use tarn_sdk::{CallContext, CallResult, NativeError, NativeUnit, Value};

use crate::executor::{ErrorValue, ExecContext};
use crate::frame::StackFrame;
use crate::unit::NativeUnitDef;

// ============================================================================
// FrameCallContext
// ============================================================================

/// Call context backed by a live stack frame.
///
/// Binds a unit's descriptor to the frame the executor prepared for it.
/// Argument reads are bounds-checked against the declared arity before
/// touching the frame, so a bad index can never read an adjacent slot.
pub struct FrameCallContext<'a> {
    def: &'a NativeUnitDef,
    frame: &'a StackFrame,
}

impl<'a> FrameCallContext<'a> {
    /// Bind a descriptor to the frame prepared for it
    pub fn new(def: &'a NativeUnitDef, frame: &'a StackFrame) -> Self {
        Self { def, frame }
    }
}

impl CallContext for FrameCallContext<'_> {
    fn arity(&self) -> usize {
        self.def.arity()
    }

    fn return_count(&self) -> usize {
        self.def.return_count()
    }

    fn argument(&self, index: usize) -> CallResult<Value> {
        let arity = self.def.arity();
        if index >= arity {
            return Err(NativeError::ArgumentOutOfRange { index, arity });
        }
        self.frame
            .argument(index)
            .ok_or(NativeError::NullArgument(index))
    }
}

// ============================================================================
// Invocation wrapper
// ============================================================================

/// How a wrapped invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    /// The unit completed; its results are in the frame's return bank
    Completed,
    /// The unit failed and the error went to the executor's channel
    Faulted,
}

impl CallOutcome {
    /// Check if the unit completed
    #[inline]
    pub const fn is_completed(self) -> bool {
        matches!(self, CallOutcome::Completed)
    }

    /// Check if the unit faulted into the executor channel
    #[inline]
    pub const fn is_faulted(self) -> bool {
        matches!(self, CallOutcome::Faulted)
    }
}

/// Run a native unit against a prepared frame.
///
/// The unit executes behind a panic barrier; panics become
/// [`NativeError::Panic`] with the payload message preserved. On success
/// the results are written into the frame's leading return slots — fewer
/// results than slots leaves the rest untouched and excess results are
/// dropped — and the call reports [`CallOutcome::Completed`].
///
/// Failure routing depends on `cx`. A scheduled invocation wraps the
/// failure message into an [`ErrorValue`], hands it to the executor's
/// error channel, and reports [`CallOutcome::Faulted`] with the return
/// bank untouched. A detached invocation returns the failure unchanged to
/// the caller.
pub fn execute_native(
    def: &NativeUnitDef,
    unit: &dyn NativeUnit,
    cx: &ExecContext,
    frame: &mut StackFrame,
) -> CallResult<CallOutcome> {
    match run_unit(def, unit, frame) {
        Ok(results) => {
            frame.write_returns(&results);
            Ok(CallOutcome::Completed)
        }
        Err(failure) => match cx.executor() {
            Some(executor) => {
                executor.handle_error(ErrorValue::new(failure.to_string()));
                Ok(CallOutcome::Faulted)
            }
            None => Err(failure),
        },
    }
}

/// Execute the unit's logic behind the panic barrier
fn run_unit(
    def: &NativeUnitDef,
    unit: &dyn NativeUnit,
    frame: &StackFrame,
) -> CallResult<Vec<Value>> {
    let call = FrameCallContext::new(def, frame);
    match panic::catch_unwind(AssertUnwindSafe(|| unit.execute(&call))) {
        Ok(result) => result,
        Err(payload) => Err(NativeError::Panic(panic_message(payload))),
    }
}

/// Extract a printable message from a panic payload
fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
