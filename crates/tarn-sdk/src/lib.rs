//! Tarn SDK - Lightweight SDK for writing native units
//!
//! This crate provides the minimal types and traits needed to write Tarn
//! native units without depending on the full tarn-natives bridge: the
//! value model, the call context a unit reads arguments through, the
//! [`NativeUnit`] trait, and the failure taxonomy.
//!
//! # Example
//!
//! ```ignore
//! use tarn_sdk::{CallContext, CallResult, Value};
//!
//! fn add(call: &dyn CallContext) -> CallResult<Vec<Value>> {
//!     let total = call.int_argument(0)? + call.int_argument(1)?;
//!     Ok(vec![Value::Int(total)])
//! }
//! ```

#![warn(missing_docs)]

mod context;
mod error;
mod unit;
mod value;

pub use context::CallContext;
pub use error::{CallResult, NativeError};
pub use unit::{NativeUnit, VOID_RETURN};
pub use value::{HeapRef, Value};
