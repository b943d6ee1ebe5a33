//! Value — tagged runtime value crossing the native boundary
//!
//! Primitives are stored inline; anything heap-backed crosses the boundary
//! as an opaque [`HeapRef`] handle. The bridge never inspects what a handle
//! points at — allocation, layout, and collection stay on the engine side.

/// Opaque handle to a heap value owned by the engine.
///
/// Native units receive and return handles without dereferencing them;
/// only the engine can turn a handle back into an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct HeapRef(u64);

impl HeapRef {
    /// Create a handle from a raw engine-assigned id
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw engine-assigned id
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// A runtime value as seen by native units.
///
/// `Value` is `Copy`; moving one between frame slots and native logic never
/// touches the heap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// The language null value
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit float
    Float(f64),
    /// Opaque handle to an engine-managed heap value
    Ref(HeapRef),
}

impl Value {
    /// Check if this is the language null
    #[inline]
    pub const fn is_null(self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as boolean if this is a bool
    #[inline]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Get as i64 if this is an integer
    #[inline]
    pub const fn as_int(self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }

    /// Get as f64 if this is a float
    #[inline]
    pub const fn as_float(self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(f),
            _ => None,
        }
    }

    /// Get the heap handle if this is a reference
    #[inline]
    pub const fn as_heap_ref(self) -> Option<HeapRef> {
        match self {
            Value::Ref(r) => Some(r),
            _ => None,
        }
    }

    /// Name of this value's kind, for diagnostics
    #[inline]
    pub const fn type_name(self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Ref(_) => "ref",
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<HeapRef> for Value {
    fn from(r: HeapRef) -> Self {
        Value::Ref(r)
    }
}
