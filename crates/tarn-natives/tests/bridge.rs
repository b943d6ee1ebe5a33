//! Integration tests for the native invocation bridge
//!
//! Exercises the full link → frame → execute path: descriptor population,
//! argument binding, return write-back, failure routing through both
//! execution modes, and the registry surface.

use std::sync::Arc;

use parking_lot::Mutex;
use tarn_natives::{
    execute_native, Annotation, CallContext, CallResult, ErrorValue, ExecContext, Executor,
    FrameCallContext, LinkError, NativeError, NativeRegistry, NativeUnitDef, StackFrame,
    SymbolName, TypeName, Value, VOID_RETURN,
};

fn add_def() -> NativeUnitDef {
    let mut def = NativeUnitDef::new("add", "math");
    def.set_param_type_names(vec![TypeName::from("int"), TypeName::from("int")]);
    def.set_arg_names(vec!["a".to_string(), "b".to_string()]);
    def.set_return_type_names(vec![TypeName::from("int")]);
    def.set_stack_frame_size(2).unwrap();
    def.set_temp_frame_size(0).unwrap();
    def
}

fn add(call: &dyn CallContext) -> CallResult<Vec<Value>> {
    let total = call.int_argument(0)? + call.int_argument(1)?;
    Ok(vec![Value::Int(total)])
}

#[derive(Default)]
struct RecordingExecutor {
    errors: Mutex<Vec<ErrorValue>>,
}

impl RecordingExecutor {
    fn drain(&self) -> Vec<ErrorValue> {
        std::mem::take(&mut *self.errors.lock())
    }
}

impl Executor for RecordingExecutor {
    fn handle_error(&self, error: ErrorValue) {
        self.errors.lock().push(error);
    }
}

// ============================================================================
// Argument binding
// ============================================================================

#[test]
fn test_arguments_read_back_exactly_as_placed() {
    let mut def = NativeUnitDef::new("probe", "test");
    def.set_param_type_names(vec![
        TypeName::from("int"),
        TypeName::from("bool"),
        TypeName::from("float"),
        TypeName::from("any"),
    ]);
    def.set_stack_frame_size(4).unwrap();

    let placed = [
        Value::Int(-7),
        Value::Bool(true),
        Value::Float(2.25),
        Value::Null,
    ];

    let mut frame = StackFrame::for_unit(&def);
    for (i, value) in placed.iter().enumerate() {
        frame.set_argument(i, *value).unwrap();
    }

    let call = FrameCallContext::new(&def, &frame);
    for (i, value) in placed.iter().enumerate() {
        assert_eq!(call.argument(i).unwrap(), *value);
    }
}

#[test]
fn test_argument_bounds_checked_on_both_sides() {
    let def = add_def();
    let frame = StackFrame::for_unit(&def);
    let call = FrameCallContext::new(&def, &frame);

    // One past the declared arity
    assert_eq!(
        call.argument(2).unwrap_err(),
        NativeError::ArgumentOutOfRange { index: 2, arity: 2 }
    );
    // The unsigned image of -1 hits the same bound
    assert_eq!(
        call.argument(usize::MAX).unwrap_err(),
        NativeError::ArgumentOutOfRange {
            index: usize::MAX,
            arity: 2
        }
    );
}

#[test]
fn test_populated_locals_beyond_arity_are_not_arguments() {
    // Frame planning gives two local slots beyond the declared parameters
    let mut def = NativeUnitDef::new("scan", "text");
    def.set_param_type_names(vec![TypeName::from("string"), TypeName::from("int")]);
    def.set_stack_frame_size(4).unwrap();

    let mut frame = StackFrame::for_unit(&def);
    frame.set_argument(0, Value::Int(10)).unwrap();
    frame.set_argument(1, Value::Int(20)).unwrap();
    // Executor locals share the value bank with arguments
    frame.set_argument(2, Value::Int(777)).unwrap();
    frame.set_argument(3, Value::Int(888)).unwrap();

    let call = FrameCallContext::new(&def, &frame);
    assert_eq!(call.arity(), 2);
    assert_eq!(call.argument(0).unwrap(), Value::Int(10));
    assert_eq!(call.argument(1).unwrap(), Value::Int(20));

    // Slots 2 and 3 hold values, but the arity bound rejects the reads
    assert_eq!(
        call.argument(2).unwrap_err(),
        NativeError::ArgumentOutOfRange { index: 2, arity: 2 }
    );
    assert_eq!(
        call.argument(3).unwrap_err(),
        NativeError::ArgumentOutOfRange { index: 3, arity: 2 }
    );
}

#[test]
fn test_unset_argument_slot_is_a_binding_failure() {
    let def = add_def();
    let mut frame = StackFrame::for_unit(&def);
    frame.set_argument(0, Value::Int(100)).unwrap();
    // Slot 1 never populated

    let err = execute_native(&def, &add, &ExecContext::detached(), &mut frame).unwrap_err();
    assert_eq!(err, NativeError::NullArgument(1));
}

// ============================================================================
// End-to-end invocation
// ============================================================================

#[test]
fn test_add_two_integers() {
    let registry = NativeRegistry::new();
    let linked = registry.register_unit(add_def(), add).unwrap();

    // Through the synchronous harness
    let results = linked.invoke(&[Value::Int(100), Value::Int(5)]).unwrap();
    assert_eq!(results, vec![Value::Int(105)]);

    // Through an executor-prepared frame
    let mut frame = StackFrame::for_unit(linked.def());
    frame.set_argument(0, Value::Int(100)).unwrap();
    frame.set_argument(1, Value::Int(5)).unwrap();

    let outcome = linked.execute(&ExecContext::detached(), &mut frame).unwrap();
    assert!(outcome.is_completed());
    assert_eq!(frame.return_slot(0), Some(Value::Int(105)));
}

#[test]
fn test_short_result_leaves_second_return_slot_at_default() {
    // Declares two returns but only produces one
    let mut def = add_def();
    def.set_return_type_names(vec![TypeName::from("int"), TypeName::from("int")]);

    let short = |call: &dyn CallContext| -> CallResult<Vec<Value>> {
        Ok(vec![Value::Int(call.int_argument(0)?)])
    };

    let registry = NativeRegistry::new();
    let linked = registry.register_unit(def, short).unwrap();

    let mut frame = StackFrame::for_unit(linked.def());
    frame.set_argument(0, Value::Int(9)).unwrap();
    frame.set_argument(1, Value::Int(1)).unwrap();

    linked.execute(&ExecContext::detached(), &mut frame).unwrap();

    assert_eq!(frame.return_slot(0), Some(Value::Int(9)));
    assert_eq!(frame.return_slot(1), None);

    // The standard invocation path observes only the written slot
    let observed = linked.invoke(&[Value::Int(9), Value::Int(1)]).unwrap();
    assert_eq!(observed, vec![Value::Int(9)]);
}

#[test]
fn test_excess_results_silently_dropped() {
    let chatty = |_call: &dyn CallContext| -> CallResult<Vec<Value>> {
        Ok(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    };

    let registry = NativeRegistry::new();
    let linked = registry.register_unit(add_def(), chatty).unwrap();

    // One declared return slot; the extra two results vanish
    let results = linked.invoke(&[Value::Int(0), Value::Int(0)]).unwrap();
    assert_eq!(results, vec![Value::Int(1)]);
}

#[test]
fn test_void_unit_produces_no_returns() {
    let mut def = NativeUnitDef::new("touch", "fs");
    def.set_param_type_names(vec![TypeName::from("string")]);
    def.set_stack_frame_size(1).unwrap();

    let touch = |call: &dyn CallContext| -> CallResult<Vec<Value>> {
        call.argument(0)?;
        Ok(VOID_RETURN)
    };

    let registry = NativeRegistry::new();
    let linked = registry.register_unit(def, touch).unwrap();

    let results = linked.invoke(&[Value::Ref(tarn_natives::HeapRef::new(1))]).unwrap();
    assert!(results.is_empty());
}

// ============================================================================
// Failure routing
// ============================================================================

#[test]
fn test_scheduled_failure_reaches_executor_exactly_once() {
    let failing = |_call: &dyn CallContext| -> CallResult<Vec<Value>> {
        Err(NativeError::Failed("key not found".to_string()))
    };

    let registry = NativeRegistry::new();
    let linked = registry.register_unit(add_def(), failing).unwrap();

    let executor = Arc::new(RecordingExecutor::default());
    let cx = ExecContext::scheduled(executor.clone());

    let mut frame = StackFrame::for_unit(linked.def());
    frame.set_argument(0, Value::Int(1)).unwrap();
    frame.set_argument(1, Value::Int(2)).unwrap();

    // No failure escapes the wrapper
    let outcome = linked.execute(&cx, &mut frame).unwrap();
    assert!(outcome.is_faulted());

    let errors = executor.drain();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message(), "key not found");

    // The return bank stays untouched on the faulted path
    assert_eq!(frame.return_slot(0), None);
}

#[test]
fn test_detached_failure_propagates_unchanged() {
    let failing = |_call: &dyn CallContext| -> CallResult<Vec<Value>> {
        Err(NativeError::Failed("key not found".to_string()))
    };

    let registry = NativeRegistry::new();
    let linked = registry.register_unit(add_def(), failing).unwrap();

    let err = linked.invoke(&[Value::Int(1), Value::Int(2)]).unwrap_err();
    assert_eq!(err, NativeError::Failed("key not found".to_string()));
}

#[test]
fn test_binding_failure_routes_like_any_other() {
    // Wrong arity assumption inside the unit: reads argument 5 of 2
    let confused = |call: &dyn CallContext| -> CallResult<Vec<Value>> {
        Ok(vec![call.argument(5)?])
    };

    let registry = NativeRegistry::new();
    let linked = registry.register_unit(add_def(), confused).unwrap();

    let executor = Arc::new(RecordingExecutor::default());
    let cx = ExecContext::scheduled(executor.clone());

    let mut frame = StackFrame::for_unit(linked.def());
    frame.set_argument(0, Value::Int(1)).unwrap();
    frame.set_argument(1, Value::Int(2)).unwrap();

    let outcome = linked.execute(&cx, &mut frame).unwrap();
    assert!(outcome.is_faulted());

    let errors = executor.drain();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].message(),
        "Argument index 5 out of range for arity 2"
    );
}

#[test]
fn test_type_mismatch_surfaces_through_the_channel() {
    let registry = NativeRegistry::new();
    let linked = registry.register_unit(add_def(), add).unwrap();

    let executor = Arc::new(RecordingExecutor::default());
    let cx = ExecContext::scheduled(executor.clone());

    let mut frame = StackFrame::for_unit(linked.def());
    frame.set_argument(0, Value::Int(1)).unwrap();
    frame.set_argument(1, Value::Bool(true)).unwrap();

    let outcome = linked.execute(&cx, &mut frame).unwrap();
    assert!(outcome.is_faulted());

    let errors = executor.drain();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message(), "Type mismatch: expected int, got bool");
}

#[test]
fn test_panic_contained_in_both_modes() {
    let panicking = |_call: &dyn CallContext| -> CallResult<Vec<Value>> {
        panic!("native heap corrupted");
    };

    let registry = NativeRegistry::new();
    let linked = registry.register_unit(add_def(), panicking).unwrap();

    // Detached: the panic comes back as an error value
    let err = linked.invoke(&[Value::Int(1), Value::Int(2)]).unwrap_err();
    assert_eq!(err, NativeError::Panic("native heap corrupted".to_string()));

    // Scheduled: the panic message rides the executor channel
    let executor = Arc::new(RecordingExecutor::default());
    let cx = ExecContext::scheduled(executor.clone());

    let mut frame = StackFrame::for_unit(linked.def());
    frame.set_argument(0, Value::Int(1)).unwrap();
    frame.set_argument(1, Value::Int(2)).unwrap();

    let outcome = linked.execute(&cx, &mut frame).unwrap();
    assert!(outcome.is_faulted());

    let errors = executor.drain();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message().contains("native heap corrupted"));
}

// ============================================================================
// Linking
// ============================================================================

#[test]
fn test_frame_size_negotiation() {
    let mut def = NativeUnitDef::new("fold", "list");

    // Same size twice in either order is fine
    def.set_temp_frame_size(3).unwrap();
    def.set_stack_frame_size(4).unwrap();
    def.set_temp_frame_size(3).unwrap();
    def.set_stack_frame_size(4).unwrap();

    // A different size conflicts regardless of which pass asserts first
    let err = def.set_temp_frame_size(5).unwrap_err();
    assert!(matches!(
        err,
        LinkError::FrameSizeConflict {
            field: "temp frame size",
            current: 3,
            requested: 5,
            ..
        }
    ));

    let err = def.set_stack_frame_size(1).unwrap_err();
    assert!(matches!(
        err,
        LinkError::FrameSizeConflict {
            field: "stack frame size",
            current: 4,
            requested: 1,
            ..
        }
    ));

    // Recorded sizes survive both failed attempts
    assert_eq!(def.stack_frame_size(), Some(4));
    assert_eq!(def.temp_frame_size(), Some(3));
}

#[test]
fn test_duplicate_symbol_rejected() {
    let registry = NativeRegistry::new();
    registry.register_unit(add_def(), add).unwrap();

    let err = registry.register_unit(add_def(), add).unwrap_err();
    assert_eq!(
        err,
        LinkError::DuplicateSymbol(SymbolName::new("math", "add"))
    );
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_lookup_is_module_qualified() {
    let registry = NativeRegistry::new();
    registry.register_unit(add_def(), add).unwrap();

    let mut vector_add = NativeUnitDef::new("add", "vector");
    vector_add.set_param_type_names(vec![TypeName::from("vec"), TypeName::from("vec")]);
    vector_add.set_return_type_names(vec![TypeName::from("vec")]);
    vector_add.set_stack_frame_size(2).unwrap();
    registry
        .register_unit(vector_add, |call: &dyn CallContext| -> CallResult<Vec<Value>> {
            Ok(vec![call.argument(0)?])
        })
        .unwrap();

    assert_eq!(registry.len(), 2);
    assert!(registry.lookup("math", "add").is_some());
    assert!(registry.lookup("vector", "add").is_some());
    assert!(registry.lookup("matrix", "add").is_none());

    let math = registry.get(&SymbolName::new("math", "add")).unwrap();
    assert_eq!(math.invoke(&[Value::Int(2), Value::Int(2)]).unwrap(), vec![Value::Int(4)]);
}

// ============================================================================
// Reflection
// ============================================================================

#[test]
fn test_metadata_dump_sorted_and_shaped() {
    let registry = NativeRegistry::new();

    let mut length = NativeUnitDef::new("length", "lang.string");
    length.set_param_type_names(vec![TypeName::from("string")]);
    length.set_arg_names(vec!["s".to_string()]);
    length.set_return_type_names(vec![TypeName::from("int")]);
    length.set_stack_frame_size(1).unwrap();
    length.add_annotation(Annotation::with_value("doc", "String length in code points"));
    registry
        .register_unit(length, |call: &dyn CallContext| -> CallResult<Vec<Value>> {
            call.argument(0)?;
            Ok(vec![Value::Int(0)])
        })
        .unwrap();
    registry.register_unit(add_def(), add).unwrap();

    let dump = registry.metadata();
    assert_eq!(dump.len(), 2);

    // Sorted by symbol: lang.string:length before math:add
    assert_eq!(dump[0].symbol, "lang.string:length");
    assert_eq!(dump[1].symbol, "math:add");

    assert_eq!(dump[0].params[0].name.as_deref(), Some("s"));
    assert_eq!(dump[0].annotations[0].value.as_deref(), Some("String length in code points"));
    assert_eq!(dump[1].module_path, "math");
    assert_eq!(dump[1].stack_frame_size, Some(2));

    // Dumps serialize for tooling
    let json = serde_json::to_value(&dump).unwrap();
    assert_eq!(json[1]["returns"][0], "int");
}
