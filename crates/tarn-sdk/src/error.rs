//! Error types for the native bridge ABI

/// Result type for native-bridge calls
pub type CallResult<T> = Result<T, NativeError>;

/// Failures raised while binding arguments or running native logic
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NativeError {
    /// Argument index outside the unit's declared arity
    #[error("Argument index {index} out of range for arity {arity}")]
    ArgumentOutOfRange {
        /// Requested slot index
        index: usize,
        /// Declared parameter count
        arity: usize,
    },

    /// A declared argument slot the executor never populated
    #[error("Argument {0} is unset")]
    NullArgument(usize),

    /// Type mismatch during a typed argument read
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// Expected type name
        expected: &'static str,
        /// Actual type name
        got: &'static str,
    },

    /// Native logic panicked
    #[error("Native unit panicked: {0}")]
    Panic(String),

    /// Any other failure raised by native logic
    #[error("{0}")]
    Failed(String),
}

impl From<String> for NativeError {
    fn from(s: String) -> Self {
        NativeError::Failed(s)
    }
}

impl From<&str> for NativeError {
    fn from(s: &str) -> Self {
        NativeError::Failed(s.to_string())
    }
}
