//! Symbol identity for native callable units

use std::fmt;

/// Structured symbol identity of a native callable unit.
///
/// Resolution keys on the full module-qualified identity, never on the
/// bare unit name — two modules can both export an `abs`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolName {
    module: String,
    name: String,
}

impl SymbolName {
    /// Create a symbol from a module path and unit name
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }

    /// Module path component
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Unit name component
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for SymbolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module, self.name)
    }
}
