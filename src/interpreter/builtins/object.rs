//! Host prototypes and constructors for the core primitives: `Object`,
//! `String`, `Number`, `Boolean`. `toString` for each primitive lives on
//! its prototype so method dispatch reaches it through `__proto__`.

use crate::heap::Value;
use crate::interpreter::{Completion, Interpreter};
use crate::value::{to_number, value_to_string};

pub fn install(interp: &mut Interpreter) {
    let object_prototype = interp.object_prototype;
    interp.register_method(object_prototype, "toString", to_string);
    interp.register_method(object_prototype, "hasOwnProperty", has_own_property);
    install_constructor(interp, "Object", object_constructor, object_prototype);

    let string_prototype = interp.string_prototype;
    interp.register_method(string_prototype, "toString", to_string);
    install_constructor(interp, "String", string_constructor, string_prototype);

    let number_prototype = interp.number_prototype;
    interp.register_method(number_prototype, "toString", to_string);
    install_constructor(interp, "Number", number_constructor, number_prototype);

    let boolean_prototype = interp.boolean_prototype;
    interp.register_method(boolean_prototype, "toString", to_string);
    install_constructor(interp, "Boolean", boolean_constructor, boolean_prototype);

    let function_prototype = interp.function_prototype;
    interp.register_method(function_prototype, "toString", to_string);
}

/// Wire a builtin constructor to its prototype and register it globally.
pub fn install_constructor(
    interp: &mut Interpreter,
    name: &'static str,
    constructor: crate::value::NativeFn,
    prototype: Value,
) -> Value {
    let function = interp.native_function(name, constructor);
    function.set_property("prototype", prototype);
    prototype.set_property("constructor", function);
    interp.global.set_property(name, function);
    function
}

/// Shared `toString`: every primitive renders through the language-level
/// conversion, objects as `[object Name]`.
fn to_string(interp: &mut Interpreter, this: Value, _args: &[Value]) -> Completion {
    let rendered = value_to_string(this);
    Ok(interp.string(rendered))
}

fn has_own_property(interp: &mut Interpreter, this: Value, args: &[Value]) -> Completion {
    let result = match args.first() {
        Some(key) => this.get_own(&value_to_string(*key)).is_some(),
        None => false,
    };
    Ok(interp.boolean(result))
}

fn object_constructor(interp: &mut Interpreter, _this: Value, _args: &[Value]) -> Completion {
    Ok(interp.object())
}

fn string_constructor(interp: &mut Interpreter, _this: Value, args: &[Value]) -> Completion {
    let rendered = match args.first() {
        Some(value) => value_to_string(*value),
        None => String::new(),
    };
    Ok(interp.string(rendered))
}

fn number_constructor(interp: &mut Interpreter, _this: Value, args: &[Value]) -> Completion {
    let n = match args.first() {
        Some(value) => to_number(*value),
        None => 0.0,
    };
    Ok(interp.number(n))
}

fn boolean_constructor(interp: &mut Interpreter, _this: Value, args: &[Value]) -> Completion {
    let b = args.first().map(|value| value.is_truthy()).unwrap_or(false);
    Ok(interp.boolean(b))
}
