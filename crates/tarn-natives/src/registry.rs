//! Native unit registry — link-time symbol resolution
//!
//! [`NativeRegistry`] is the engine's symbol table of linked native units.
//! Registration pairs a descriptor with its logic and rejects duplicate
//! symbols; lookup hands out shared handles the dispatch path holds on to.
//! The table is interior-synchronized because modules load while executors
//! are already dispatching.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tarn_sdk::{CallResult, NativeError, NativeUnit, Value};

use crate::call::{execute_native, CallOutcome};
use crate::error::{LinkError, LinkResult};
use crate::executor::ExecContext;
use crate::frame::StackFrame;
use crate::reflect::UnitMetadata;
use crate::symbol::SymbolName;
use crate::unit::NativeUnitDef;

// ============================================================================
// NativeFunction
// ============================================================================

/// A linked native unit: descriptor plus executable logic
pub struct NativeFunction {
    def: NativeUnitDef,
    unit: Box<dyn NativeUnit>,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("symbol", &self.def.symbol().to_string())
            .field("arity", &self.def.arity())
            .finish()
    }
}

impl NativeFunction {
    /// Pair a descriptor with its logic
    pub fn new(def: NativeUnitDef, unit: impl NativeUnit + 'static) -> Self {
        Self {
            def,
            unit: Box::new(unit),
        }
    }

    /// The unit's descriptor
    pub fn def(&self) -> &NativeUnitDef {
        &self.def
    }

    /// Run this unit against a prepared frame (see [`execute_native`])
    pub fn execute(&self, cx: &ExecContext, frame: &mut StackFrame) -> CallResult<CallOutcome> {
        execute_native(&self.def, self.unit.as_ref(), cx, frame)
    }

    /// Synchronous convenience harness: build a frame sized for this unit,
    /// bind `args` to its leading value slots, run detached, and harvest
    /// the produced returns.
    ///
    /// There is no executor channel on this path, so failures come back to
    /// the caller. Argument lists longer than the unit's value bank are
    /// rejected up front.
    pub fn invoke(&self, args: &[Value]) -> CallResult<Vec<Value>> {
        let mut frame = StackFrame::for_unit(&self.def);
        if args.len() > frame.value_slot_count() {
            return Err(NativeError::Failed(format!(
                "{} arguments exceed the {}-slot frame of `{}`",
                args.len(),
                frame.value_slot_count(),
                self.def.symbol()
            )));
        }
        frame.fill_arguments(args);
        execute_native(&self.def, self.unit.as_ref(), &ExecContext::detached(), &mut frame)?;
        Ok(frame.return_values())
    }
}

// ============================================================================
// NativeRegistry
// ============================================================================

/// Symbol table of linked native units
pub struct NativeRegistry {
    units: RwLock<FxHashMap<SymbolName, Arc<NativeFunction>>>,
}

impl fmt::Debug for NativeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeRegistry")
            .field("count", &self.len())
            .finish()
    }
}

impl NativeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            units: RwLock::new(FxHashMap::default()),
        }
    }

    /// Link a paired unit, rejecting duplicate symbols.
    ///
    /// Returns the shared handle on success so callers can keep it for
    /// direct dispatch without a second lookup.
    pub fn register(&self, function: NativeFunction) -> LinkResult<Arc<NativeFunction>> {
        let symbol = function.def().symbol().clone();
        let mut units = self.units.write();
        if units.contains_key(&symbol) {
            return Err(LinkError::DuplicateSymbol(symbol));
        }
        let function = Arc::new(function);
        units.insert(symbol, Arc::clone(&function));
        Ok(function)
    }

    /// Pair a descriptor with logic and link it in one step
    pub fn register_unit(
        &self,
        def: NativeUnitDef,
        unit: impl NativeUnit + 'static,
    ) -> LinkResult<Arc<NativeFunction>> {
        self.register(NativeFunction::new(def, unit))
    }

    /// Resolve a symbol to its linked unit
    pub fn get(&self, symbol: &SymbolName) -> Option<Arc<NativeFunction>> {
        self.units.read().get(symbol).cloned()
    }

    /// Resolve by module path and unit name
    pub fn lookup(&self, module: &str, name: &str) -> Option<Arc<NativeFunction>> {
        self.get(&SymbolName::new(module, name))
    }

    /// Check if a symbol is linked
    pub fn contains(&self, symbol: &SymbolName) -> bool {
        self.units.read().contains_key(symbol)
    }

    /// Number of linked units
    pub fn len(&self) -> usize {
        self.units.read().len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.units.read().is_empty()
    }

    /// Snapshot descriptor metadata for every linked unit, sorted by symbol
    pub fn metadata(&self) -> Vec<UnitMetadata> {
        let units = self.units.read();
        let mut entries: Vec<UnitMetadata> =
            units.values().map(|f| UnitMetadata::of(f.def())).collect();
        entries.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        entries
    }
}

impl Default for NativeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
