//! Native callable-unit descriptors
//!
//! A [`NativeUnitDef`] is the engine-side identity of one native callable
//! unit: its name and module path, visibility, symbol, annotations, the
//! parameter and return descriptors filled in over several linker passes,
//! and the two frame-size cells negotiated before execution.
//!
//! # Linking protocol
//!
//! Linker passes populate a descriptor in stages: declaration supplies the
//! identity fields, signature analysis supplies type names and argument
//! names, type resolution supplies resolved type handles, and frame
//! planning supplies the frame sizes. Identity and signature setters are
//! called once per descriptor; the frame-size setters are write-once cells
//! that tolerate re-asserting the same size but reject a different one.

use serde::Serialize;

use crate::error::{LinkError, LinkResult};
use crate::symbol::SymbolName;
use crate::types::{TypeId, TypeName};

// ============================================================================
// Visibility & Annotations
// ============================================================================

/// Visibility of a callable unit in its defining module
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Callable from any module
    #[default]
    Public,
    /// Callable only within the defining module
    Private,
}

impl Visibility {
    /// Check if this is public visibility
    #[inline]
    pub const fn is_public(self) -> bool {
        matches!(self, Visibility::Public)
    }
}

/// Source annotation attached to a callable unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    /// Annotation name
    pub name: String,
    /// Optional literal value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Annotation {
    /// Create an annotation with no value
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// Create an annotation carrying a literal value
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

// ============================================================================
// Parameter / Return views
// ============================================================================

/// Read view over one declared parameter.
///
/// The name and resolved type come from later linker passes than the type
/// name, so either may still be absent on a partially linked descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDesc<'a> {
    /// Declared type name
    pub type_name: &'a TypeName,
    /// Declared argument name, when signature analysis recorded one
    pub name: Option<&'a str>,
    /// Resolved type handle, when type resolution has run
    pub ty: Option<TypeId>,
}

/// Read view over one declared return parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnDesc<'a> {
    /// Declared type name
    pub type_name: &'a TypeName,
    /// Resolved type handle, when type resolution has run
    pub ty: Option<TypeId>,
}

// ============================================================================
// NativeUnitDef
// ============================================================================

/// Descriptor of a native callable unit.
///
/// Carries everything the engine knows about one unit apart from its
/// executable logic: identity, signature, annotations, and the negotiated
/// frame layout. The declared parameter count — the unit's arity — is
/// defined by the parameter type-name table; argument names and resolved
/// types are parallel tables that may lag behind it during linking.
#[derive(Debug, Clone)]
pub struct NativeUnitDef {
    name: String,
    module_path: String,
    visibility: Visibility,
    symbol: SymbolName,
    annotations: Vec<Annotation>,

    param_type_names: Vec<TypeName>,
    arg_names: Vec<String>,
    param_types: Vec<TypeId>,

    return_type_names: Vec<TypeName>,
    return_types: Vec<TypeId>,

    stack_frame_size: Option<usize>,
    temp_frame_size: Option<usize>,
}

impl NativeUnitDef {
    /// Create a descriptor for `name` defined in `module_path`.
    ///
    /// The symbol defaults to the module-qualified name; linkers that use
    /// mangled or aliased symbols override it with
    /// [`set_symbol`](Self::set_symbol). Visibility defaults to public.
    pub fn new(name: impl Into<String>, module_path: impl Into<String>) -> Self {
        let name = name.into();
        let module_path = module_path.into();
        let symbol = SymbolName::new(module_path.clone(), name.clone());
        Self {
            name,
            module_path,
            visibility: Visibility::default(),
            symbol,
            annotations: Vec::new(),
            param_type_names: Vec::new(),
            arg_names: Vec::new(),
            param_types: Vec::new(),
            return_type_names: Vec::new(),
            return_types: Vec::new(),
            stack_frame_size: None,
            temp_frame_size: None,
        }
    }

    // ========================================================================
    // Identity
    // ========================================================================

    /// Unit name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Defining module path
    pub fn module_path(&self) -> &str {
        &self.module_path
    }

    /// Visibility in the defining module
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Set visibility (declaration pass)
    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    /// Symbol identity used for resolution
    pub fn symbol(&self) -> &SymbolName {
        &self.symbol
    }

    /// Override the derived symbol (declaration pass)
    pub fn set_symbol(&mut self, symbol: SymbolName) {
        self.symbol = symbol;
    }

    /// Source annotations in declaration order
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Attach a source annotation (declaration pass)
    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    // ========================================================================
    // Signature
    // ========================================================================

    /// Declared parameter count
    #[inline]
    pub fn arity(&self) -> usize {
        self.param_type_names.len()
    }

    /// Declared return-parameter count
    #[inline]
    pub fn return_count(&self) -> usize {
        self.return_type_names.len()
    }

    /// Declared parameter type names in order
    pub fn param_type_names(&self) -> &[TypeName] {
        &self.param_type_names
    }

    /// Set the parameter type-name table (signature pass)
    pub fn set_param_type_names(&mut self, names: Vec<TypeName>) {
        self.param_type_names = names;
    }

    /// Declared argument names in order
    pub fn arg_names(&self) -> &[String] {
        &self.arg_names
    }

    /// Set the argument-name table (signature pass)
    pub fn set_arg_names(&mut self, names: Vec<String>) {
        self.arg_names = names;
    }

    /// Resolved parameter type handles in order
    pub fn param_types(&self) -> &[TypeId] {
        &self.param_types
    }

    /// Set the resolved parameter types (type-resolution pass)
    pub fn set_param_types(&mut self, types: Vec<TypeId>) {
        self.param_types = types;
    }

    /// Declared return type names in order
    pub fn return_type_names(&self) -> &[TypeName] {
        &self.return_type_names
    }

    /// Set the return type-name table (signature pass)
    pub fn set_return_type_names(&mut self, names: Vec<TypeName>) {
        self.return_type_names = names;
    }

    /// Resolved return type handles in order
    pub fn return_types(&self) -> &[TypeId] {
        &self.return_types
    }

    /// Set the resolved return types (type-resolution pass)
    pub fn set_return_types(&mut self, types: Vec<TypeId>) {
        self.return_types = types;
    }

    /// Iterate the declared parameters as joined views
    pub fn params(&self) -> impl Iterator<Item = ParamDesc<'_>> {
        self.param_type_names
            .iter()
            .enumerate()
            .map(|(i, type_name)| ParamDesc {
                type_name,
                name: self.arg_names.get(i).map(String::as_str),
                ty: self.param_types.get(i).copied(),
            })
    }

    /// Iterate the declared return parameters as joined views
    pub fn returns(&self) -> impl Iterator<Item = ReturnDesc<'_>> {
        self.return_type_names
            .iter()
            .enumerate()
            .map(|(i, type_name)| ReturnDesc {
                type_name,
                ty: self.return_types.get(i).copied(),
            })
    }

    // ========================================================================
    // Frame-size cells
    // ========================================================================

    /// Negotiated stack frame size, once frame planning has set it
    pub fn stack_frame_size(&self) -> Option<usize> {
        self.stack_frame_size
    }

    /// Record the stack frame size (frame-planning pass).
    ///
    /// Write-once: re-asserting the recorded size is a no-op, any other
    /// size fails with [`LinkError::FrameSizeConflict`]. Zero is a value
    /// like any other, not an unset marker.
    pub fn set_stack_frame_size(&mut self, size: usize) -> LinkResult<()> {
        Self::set_size_cell(
            &mut self.stack_frame_size,
            "stack frame size",
            &self.symbol,
            size,
        )
    }

    /// Negotiated temp frame size, once frame planning has set it
    pub fn temp_frame_size(&self) -> Option<usize> {
        self.temp_frame_size
    }

    /// Record the temp frame size (frame-planning pass).
    ///
    /// Same write-once rule as [`set_stack_frame_size`](Self::set_stack_frame_size).
    pub fn set_temp_frame_size(&mut self, size: usize) -> LinkResult<()> {
        Self::set_size_cell(
            &mut self.temp_frame_size,
            "temp frame size",
            &self.symbol,
            size,
        )
    }

    fn set_size_cell(
        cell: &mut Option<usize>,
        field: &'static str,
        symbol: &SymbolName,
        requested: usize,
    ) -> LinkResult<()> {
        match *cell {
            Some(current) if current != requested => Err(LinkError::FrameSizeConflict {
                field,
                symbol: symbol.to_string(),
                current,
                requested,
            }),
            _ => {
                *cell = Some(requested);
                Ok(())
            }
        }
    }
}
