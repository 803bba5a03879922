//! Error constructors.
//!
//! `Error`, `ReferenceError` and `TypeError` set `name` and `message` on
//! their receiver; the derived prototypes chain to `Error.prototype`, which
//! carries the shared `toString`.

use crate::heap::Value;
use crate::interpreter::{Completion, Interpreter};
use crate::value::{value_to_string, ValueKind};

use super::object::install_constructor;

pub fn install(interp: &mut Interpreter) {
    let error_prototype = interp.error_prototype;
    preset_identity(interp, error_prototype, "Error");
    interp.register_method(error_prototype, "toString", error_to_string);
    install_constructor(interp, "Error", error_constructor, error_prototype);

    let reference_error_prototype = interp.reference_error_prototype;
    preset_identity(interp, reference_error_prototype, "ReferenceError");
    install_constructor(
        interp,
        "ReferenceError",
        reference_error_constructor,
        reference_error_prototype,
    );

    let type_error_prototype = interp.type_error_prototype;
    preset_identity(interp, type_error_prototype, "TypeError");
    install_constructor(
        interp,
        "TypeError",
        type_error_constructor,
        type_error_prototype,
    );
}

fn preset_identity(interp: &mut Interpreter, prototype: Value, name: &str) {
    let name_value = interp.string(name);
    prototype.set_property("name", name_value);
    let empty = interp.string("");
    prototype.set_property("message", empty);
}

/// Error.prototype.toString(): "name: message", or just "name" when the
/// message is empty.
fn error_to_string(interp: &mut Interpreter, this: Value, _args: &[Value]) -> Completion {
    let name = match this.get_property("name") {
        Some(value) if !value.is_undefined() => value_to_string(value),
        _ => "Error".to_string(),
    };
    let message = match this.get_property("message") {
        Some(value) if !value.is_undefined() => value_to_string(value),
        _ => String::new(),
    };

    let rendered = if message.is_empty() {
        name
    } else {
        format!("{}: {}", name, message)
    };
    Ok(interp.string(rendered))
}

fn initialize(interp: &mut Interpreter, this: Value, name: &str, args: &[Value]) {
    if !matches!(this.borrow().kind, ValueKind::Object) {
        return;
    }
    let name_value = interp.string(name);
    this.set_property("name", name_value);
    if let Some(message) = args.first() {
        this.set_property("message", *message);
    }
}

fn error_constructor(interp: &mut Interpreter, this: Value, args: &[Value]) -> Completion {
    initialize(interp, this, "Error", args);
    Ok(interp.undefined())
}

fn reference_error_constructor(interp: &mut Interpreter, this: Value, args: &[Value]) -> Completion {
    initialize(interp, this, "ReferenceError", args);
    Ok(interp.undefined())
}

fn type_error_constructor(interp: &mut Interpreter, this: Value, args: &[Value]) -> Completion {
    initialize(interp, this, "TypeError", args);
    Ok(interp.undefined())
}
