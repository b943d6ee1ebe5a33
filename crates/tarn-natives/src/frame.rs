//! Executor stack frames for native invocation
//!
//! A [`StackFrame`] is the activation record one native invocation runs
//! against: a value bank holding arguments and locals, a temp bank for
//! executor scratch, and a return bank the invocation wrapper writes
//! results into.
//!
//! Slots hold `Option<Value>`. `None` is a slot the executor never
//! populated — distinct from a populated slot holding the language null,
//! which reads back as an ordinary [`Value::Null`].

use tarn_sdk::Value;

use crate::error::{FrameError, FrameResult};
use crate::unit::NativeUnitDef;

/// Activation record for one native invocation
#[derive(Debug, Clone)]
pub struct StackFrame {
    values: Vec<Option<Value>>,
    temps: Vec<Option<Value>>,
    returns: Vec<Option<Value>>,
}

impl StackFrame {
    /// Create a frame with explicit bank sizes
    pub fn new(value_slots: usize, temp_slots: usize, return_slots: usize) -> Self {
        Self {
            values: vec![None; value_slots],
            temps: vec![None; temp_slots],
            returns: vec![None; return_slots],
        }
    }

    /// Create a frame sized for one unit's negotiated layout.
    ///
    /// Unset size cells count as zero; the return bank always matches the
    /// declared return-parameter count.
    pub fn for_unit(def: &NativeUnitDef) -> Self {
        Self::new(
            def.stack_frame_size().unwrap_or(0),
            def.temp_frame_size().unwrap_or(0),
            def.return_count(),
        )
    }

    // ========================================================================
    // Value slots (arguments and locals)
    // ========================================================================

    /// Number of value slots
    #[inline]
    pub fn value_slot_count(&self) -> usize {
        self.values.len()
    }

    /// Read the value slot at `index`; `None` when out of range or unset
    #[inline]
    pub fn argument(&self, index: usize) -> Option<Value> {
        self.values.get(index).copied().flatten()
    }

    /// Populate the value slot at `index`
    pub fn set_argument(&mut self, index: usize, value: Value) -> FrameResult<()> {
        let slots = self.values.len();
        match self.values.get_mut(index) {
            Some(slot) => {
                *slot = Some(value);
                Ok(())
            }
            None => Err(FrameError::ValueSlotOutOfRange { index, slots }),
        }
    }

    /// Populate the leading value slots from `args`.
    ///
    /// Callers check capacity first; `args` must not be longer than the
    /// value bank.
    pub(crate) fn fill_arguments(&mut self, args: &[Value]) {
        for (slot, value) in self.values.iter_mut().zip(args) {
            *slot = Some(*value);
        }
    }

    // ========================================================================
    // Temp slots (executor scratch)
    // ========================================================================

    /// Number of temp slots
    #[inline]
    pub fn temp_slot_count(&self) -> usize {
        self.temps.len()
    }

    /// Read the temp slot at `index`; `None` when out of range or unset
    #[inline]
    pub fn temp(&self, index: usize) -> Option<Value> {
        self.temps.get(index).copied().flatten()
    }

    /// Populate the temp slot at `index`
    pub fn set_temp(&mut self, index: usize, value: Value) -> FrameResult<()> {
        let slots = self.temps.len();
        match self.temps.get_mut(index) {
            Some(slot) => {
                *slot = Some(value);
                Ok(())
            }
            None => Err(FrameError::TempSlotOutOfRange { index, slots }),
        }
    }

    // ========================================================================
    // Return slots
    // ========================================================================

    /// Number of return slots
    #[inline]
    pub fn return_slot_count(&self) -> usize {
        self.returns.len()
    }

    /// Read the return slot at `index`; `None` when out of range or unset
    #[inline]
    pub fn return_slot(&self, index: usize) -> Option<Value> {
        self.returns.get(index).copied().flatten()
    }

    /// Populate the return slot at `index` ahead of a call
    pub fn set_return_slot(&mut self, index: usize, value: Value) -> FrameResult<()> {
        let slots = self.returns.len();
        match self.returns.get_mut(index) {
            Some(slot) => {
                *slot = Some(value);
                Ok(())
            }
            None => Err(FrameError::ReturnSlotOutOfRange { index, slots }),
        }
    }

    /// Write `results` into the leading return slots.
    ///
    /// Fewer results than slots leaves the remaining slots exactly as they
    /// were — no implicit null-fill; excess results are dropped silently.
    /// Count mismatches are a unit-author bug this policy tolerates rather
    /// than surfaces, so callers that want to compare declared and produced
    /// counts must do so themselves.
    pub(crate) fn write_returns(&mut self, results: &[Value]) {
        for (slot, value) in self.returns.iter_mut().zip(results) {
            *slot = Some(*value);
        }
    }

    /// Harvest the populated leading return slots in order.
    ///
    /// Stops at the first unpopulated slot, yielding exactly the prefix the
    /// invocation wrote plus any slots the executor pre-populated.
    pub fn return_values(&self) -> Vec<Value> {
        self.returns.iter().map_while(|slot| *slot).collect()
    }
}
