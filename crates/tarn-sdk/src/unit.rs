//! NativeUnit trait — the executable face of a native callable unit

use crate::context::CallContext;
use crate::error::CallResult;
use crate::value::Value;

/// Shared return sequence for void units.
///
/// Units with no declared returns hand this back instead of building a
/// fresh empty vector per call.
pub const VOID_RETURN: Vec<Value> = Vec::new();

/// Executable logic of a native callable unit.
///
/// `execute` receives the call context and produces the unit's results in
/// declaration order. Failures are returned, never panicked; the engine's
/// invocation wrapper still catches stray panics as a last resort, but a
/// returned error carries a far better message.
pub trait NativeUnit: Send + Sync {
    /// Run the unit against the active frame
    fn execute(&self, call: &dyn CallContext) -> CallResult<Vec<Value>>;
}

impl<F> NativeUnit for F
where
    F: Fn(&dyn CallContext) -> CallResult<Vec<Value>> + Send + Sync,
{
    fn execute(&self, call: &dyn CallContext) -> CallResult<Vec<Value>> {
        self(call)
    }
}
