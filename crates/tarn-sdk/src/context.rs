//! CallContext trait — frame argument access for native units
//!
//! Defines the interface the engine implements to expose the active stack
//! frame to native logic. Units program against this trait without
//! depending on executor internals.

use crate::error::{CallResult, NativeError};
use crate::value::{HeapRef, Value};

/// Abstract view of the frame a native unit executes against.
///
/// The engine provides the concrete implementation backed by the live
/// stack frame. Units only see this trait — dynamic dispatch through
/// `&dyn CallContext` keeps the SDK free of engine internals.
pub trait CallContext {
    /// Declared parameter count of the executing unit
    fn arity(&self) -> usize;

    /// Declared return-parameter count of the executing unit
    fn return_count(&self) -> usize;

    /// Read the argument at `index`.
    ///
    /// Fails with [`NativeError::ArgumentOutOfRange`] when `index` is not
    /// below [`arity`](Self::arity), and with [`NativeError::NullArgument`]
    /// when the executor never populated the slot. A populated slot holding
    /// the language null comes back as [`Value::Null`], not as an error.
    fn argument(&self, index: usize) -> CallResult<Value>;

    /// Read the argument at `index` as a boolean
    fn bool_argument(&self, index: usize) -> CallResult<bool> {
        match self.argument(index)? {
            Value::Bool(b) => Ok(b),
            other => Err(NativeError::TypeMismatch {
                expected: "bool",
                got: other.type_name(),
            }),
        }
    }

    /// Read the argument at `index` as an integer
    fn int_argument(&self, index: usize) -> CallResult<i64> {
        match self.argument(index)? {
            Value::Int(i) => Ok(i),
            other => Err(NativeError::TypeMismatch {
                expected: "int",
                got: other.type_name(),
            }),
        }
    }

    /// Read the argument at `index` as a float
    fn float_argument(&self, index: usize) -> CallResult<f64> {
        match self.argument(index)? {
            Value::Float(f) => Ok(f),
            other => Err(NativeError::TypeMismatch {
                expected: "float",
                got: other.type_name(),
            }),
        }
    }

    /// Read the argument at `index` as a heap handle
    fn ref_argument(&self, index: usize) -> CallResult<HeapRef> {
        match self.argument(index)? {
            Value::Ref(r) => Ok(r),
            other => Err(NativeError::TypeMismatch {
                expected: "ref",
                got: other.type_name(),
            }),
        }
    }
}
