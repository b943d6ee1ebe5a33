//! Error types for linking and frame access

use crate::symbol::SymbolName;

/// Result type for linking operations
pub type LinkResult<T> = Result<T, LinkError>;

/// Errors raised while linking native units
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LinkError {
    /// Two linking passes computed different frame sizes for one unit
    #[error("Conflicting {field} for `{symbol}`: already {current}, attempted {requested}")]
    FrameSizeConflict {
        /// Which size cell conflicted
        field: &'static str,
        /// Symbol of the unit being linked
        symbol: String,
        /// Size already recorded
        current: usize,
        /// Size the later pass attempted to record
        requested: usize,
    },

    /// A unit with the same symbol is already linked
    #[error("Native unit `{0}` is already registered")]
    DuplicateSymbol(SymbolName),
}

/// Result type for frame slot operations
pub type FrameResult<T> = Result<T, FrameError>;

/// Errors from executor-side frame slot access
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameError {
    /// Value slot index outside the frame's value bank
    #[error("Value slot {index} out of range ({slots} slots)")]
    ValueSlotOutOfRange {
        /// Requested slot index
        index: usize,
        /// Size of the value bank
        slots: usize,
    },

    /// Temp slot index outside the frame's temp bank
    #[error("Temp slot {index} out of range ({slots} slots)")]
    TempSlotOutOfRange {
        /// Requested slot index
        index: usize,
        /// Size of the temp bank
        slots: usize,
    },

    /// Return slot index outside the frame's return bank
    #[error("Return slot {index} out of range ({slots} slots)")]
    ReturnSlotOutOfRange {
        /// Requested slot index
        index: usize,
        /// Size of the return bank
        slots: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_error_messages() {
        let err = LinkError::FrameSizeConflict {
            field: "stack frame size",
            symbol: "math:add".to_string(),
            current: 5,
            requested: 7,
        };
        assert_eq!(
            err.to_string(),
            "Conflicting stack frame size for `math:add`: already 5, attempted 7"
        );

        let err = LinkError::DuplicateSymbol(SymbolName::new("math", "add"));
        assert_eq!(err.to_string(), "Native unit `math:add` is already registered");
    }

    #[test]
    fn test_frame_error_messages() {
        let err = FrameError::ValueSlotOutOfRange { index: 4, slots: 2 };
        assert_eq!(err.to_string(), "Value slot 4 out of range (2 slots)");

        let err = FrameError::ReturnSlotOutOfRange { index: 1, slots: 0 };
        assert_eq!(err.to_string(), "Return slot 1 out of range (0 slots)");
    }
}
