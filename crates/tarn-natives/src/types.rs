//! Type descriptors carried through linking
//!
//! The bridge stores source-level type names verbatim and treats resolved
//! types as opaque handles. The type system itself — subtyping, layout,
//! resolution — lives outside this crate.

use serde::Serialize;
use std::fmt;

/// Source-level type name, carried verbatim from declaration to tooling
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    /// Create a type name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TypeName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TypeName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Opaque handle to a resolved type.
///
/// Assigned by the engine's type resolver during linking; the bridge only
/// stores and forwards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    /// Create a handle from a raw resolver-assigned id
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw resolver-assigned id
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}
