//! Tarn Natives - Native callable-unit bridge for the Tarn engine
//!
//! This crate is the engine side of native invocation: everything needed to
//! link a unit implemented in host code into the interpreter's symbol space
//! and call it like an interpreted function:
//! - **Descriptors**: callable-unit identity, signature, and frame layout (`unit` module)
//! - **Frames**: executor activation records with argument, temp, and return banks (`frame` module)
//! - **Invocation**: the wrapper that runs unit logic and routes failures (`call` module)
//! - **Linking**: the symbol-keyed registry of descriptor/logic pairs (`registry` module)
//! - **Reflection**: serializable descriptor snapshots for tooling (`reflect` module)
//!
//! # Example
//!
//! ```ignore
//! use tarn_natives::{NativeRegistry, NativeUnitDef, TypeName, Value};
//! use tarn_sdk::{CallContext, CallResult};
//!
//! let mut def = NativeUnitDef::new("add", "math");
//! def.set_param_type_names(vec![TypeName::from("int"), TypeName::from("int")]);
//! def.set_return_type_names(vec![TypeName::from("int")]);
//! def.set_stack_frame_size(2)?;
//!
//! let registry = NativeRegistry::new();
//! let add = registry.register_unit(def, |call: &dyn CallContext| {
//!     Ok(vec![Value::Int(call.int_argument(0)? + call.int_argument(1)?)])
//! })?;
//!
//! let results = add.invoke(&[Value::Int(100), Value::Int(5)])?;
//! assert_eq!(results, vec![Value::Int(105)]);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod call;
pub mod error;
pub mod executor;
pub mod frame;
pub mod reflect;
pub mod registry;
pub mod symbol;
pub mod types;
pub mod unit;

// Re-export SDK types (canonical definitions live in tarn-sdk)
pub use tarn_sdk::{CallContext, CallResult, HeapRef, NativeError, NativeUnit, Value, VOID_RETURN};

pub use call::{execute_native, CallOutcome, FrameCallContext};
pub use error::{FrameError, FrameResult, LinkError, LinkResult};
pub use executor::{ErrorValue, ExecContext, Executor};
pub use frame::StackFrame;
pub use reflect::{ParamMetadata, UnitMetadata};
pub use registry::{NativeFunction, NativeRegistry};
pub use symbol::SymbolName;
pub use types::{TypeId, TypeName};
pub use unit::{Annotation, NativeUnitDef, ParamDesc, ReturnDesc, Visibility};
