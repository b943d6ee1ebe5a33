//! Descriptor metadata snapshots for tooling
//!
//! Serializable views over linked descriptors, decoupled from the live
//! registry so inspectors, doc generators, and debug dumps can hold them
//! without touching engine state. Snapshots render as JSON through the
//! workspace serde stack.

use std::fmt;

use serde::Serialize;

use crate::types::TypeName;
use crate::unit::{Annotation, NativeUnitDef, Visibility};

/// Snapshot of one declared parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamMetadata {
    /// Declared type name
    pub type_name: TypeName,
    /// Declared argument name, when signature analysis recorded one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Snapshot of one linked unit's descriptor.
///
/// Everything tooling needs to describe a unit: identity, signature names,
/// negotiated frame layout, and attached annotations. Resolved type handles
/// are omitted — they are engine-internal and meaningless outside a running
/// resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitMetadata {
    /// Module-qualified symbol, rendered as `module:name`
    pub symbol: String,
    /// Unit name
    pub name: String,
    /// Defining module path
    pub module_path: String,
    /// Visibility in the defining module
    pub visibility: Visibility,
    /// Declared parameters in binding order
    pub params: Vec<ParamMetadata>,
    /// Declared return type names in binding order
    pub returns: Vec<TypeName>,
    /// Negotiated stack frame size, absent until frame planning ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_frame_size: Option<usize>,
    /// Negotiated temp frame size, absent until frame planning ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_frame_size: Option<usize>,
    /// Attached source annotations
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl UnitMetadata {
    /// Snapshot a descriptor
    pub fn of(def: &NativeUnitDef) -> Self {
        Self {
            symbol: def.symbol().to_string(),
            name: def.name().to_string(),
            module_path: def.module_path().to_string(),
            visibility: def.visibility(),
            params: def
                .params()
                .map(|p| ParamMetadata {
                    type_name: p.type_name.clone(),
                    name: p.name.map(str::to_string),
                })
                .collect(),
            returns: def.return_type_names().to_vec(),
            stack_frame_size: def.stack_frame_size(),
            temp_frame_size: def.temp_frame_size(),
            annotations: def.annotations().to_vec(),
        }
    }
}

impl fmt::Display for UnitMetadata {
    /// Render as pretty-printed JSON
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
