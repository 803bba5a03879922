//! The `Array` constructor and prototype methods.
//!
//! Iterating methods snapshot the length up front and re-fetch each element
//! by index, so callbacks that mutate the receiver cannot invalidate a held
//! borrow.

use crate::heap::Value;
use crate::interpreter::{Completion, Control, Interpreter};
use crate::value::{to_number, ValueKind};

use super::object::install_constructor;

pub fn install(interp: &mut Interpreter) {
    let array_prototype = interp.array_prototype;
    interp.register_method(array_prototype, "push", array_push);
    interp.register_method(array_prototype, "pop", array_pop);
    interp.register_method(array_prototype, "fill", array_fill);
    interp.register_method(array_prototype, "forEach", array_for_each);
    interp.register_method(array_prototype, "map", array_map);
    interp.register_method(array_prototype, "filter", array_filter);
    interp.register_method(array_prototype, "reduce", array_reduce);
    interp.register_method(array_prototype, "toString", array_to_string);

    let array_fn = install_constructor(interp, "Array", array_constructor, array_prototype);
    interp.register_method(array_fn, "from", array_from);
}

/// Array() -> empty array; Array(n) -> array of length n filled with
/// undefined.
fn array_constructor(interp: &mut Interpreter, _this: Value, args: &[Value]) -> Completion {
    let elements = match args.first() {
        Some(length) => {
            let n = to_number(*length);
            if n >= 0.0 && n.fract() == 0.0 {
                vec![interp.undefined(); n as usize]
            } else {
                return Err(interp.throw_type_error("invalid array length".to_string()));
            }
        }
        None => Vec::new(),
    };
    Ok(interp.array(elements))
}

fn expect_array_length(interp: &mut Interpreter, this: Value, method: &str) -> Result<usize, Control> {
    let length = match &this.borrow().kind {
        ValueKind::Array(elements) => Some(elements.len()),
        _ => None,
    };
    match length {
        Some(length) => Ok(length),
        None => Err(interp.throw_type_error(format!("{} called on a non-array", method))),
    }
}

fn element_at(array: Value, index: usize) -> Option<Value> {
    match &array.borrow().kind {
        ValueKind::Array(elements) => elements.get(index).copied(),
        _ => None,
    }
}

fn callback_argument(
    interp: &mut Interpreter,
    args: &[Value],
    method: &str,
) -> Result<Value, Control> {
    match args.first() {
        Some(callback) if callback.is_function() => Ok(*callback),
        _ => Err(interp.throw_type_error(format!("{} expects a function", method))),
    }
}

fn array_push(interp: &mut Interpreter, this: Value, args: &[Value]) -> Completion {
    expect_array_length(interp, this, "push")?;

    let new_length = {
        let mut data = this.borrow_mut();
        match &mut data.kind {
            ValueKind::Array(elements) => {
                elements.extend_from_slice(args);
                elements.len()
            }
            _ => 0,
        }
    };
    Ok(interp.number(new_length as f64))
}

fn array_pop(interp: &mut Interpreter, this: Value, _args: &[Value]) -> Completion {
    expect_array_length(interp, this, "pop")?;

    let popped = {
        let mut data = this.borrow_mut();
        match &mut data.kind {
            ValueKind::Array(elements) => elements.pop(),
            _ => None,
        }
    };
    Ok(popped.unwrap_or(interp.undefined()))
}

fn array_fill(interp: &mut Interpreter, this: Value, args: &[Value]) -> Completion {
    expect_array_length(interp, this, "fill")?;
    let fill_value = args.first().copied().unwrap_or(interp.undefined());

    {
        let mut data = this.borrow_mut();
        if let ValueKind::Array(elements) = &mut data.kind {
            for slot in elements.iter_mut() {
                *slot = fill_value;
            }
        }
    }
    Ok(this)
}

fn array_for_each(interp: &mut Interpreter, this: Value, args: &[Value]) -> Completion {
    let length = expect_array_length(interp, this, "forEach")?;
    let callback = callback_argument(interp, args, "forEach")?;

    for i in 0..length {
        let Some(element) = element_at(this, i) else {
            break;
        };
        let index = interp.number(i as f64);
        interp.call_value(callback, interp.global, &[element, index, this])?;
    }
    Ok(interp.undefined())
}

fn array_map(interp: &mut Interpreter, this: Value, args: &[Value]) -> Completion {
    let length = expect_array_length(interp, this, "map")?;
    let callback = callback_argument(interp, args, "map")?;

    let mut mapped = Vec::with_capacity(length);
    for i in 0..length {
        let Some(element) = element_at(this, i) else {
            break;
        };
        let index = interp.number(i as f64);
        mapped.push(interp.call_value(callback, interp.global, &[element, index, this])?);
    }
    Ok(interp.array(mapped))
}

fn array_filter(interp: &mut Interpreter, this: Value, args: &[Value]) -> Completion {
    let length = expect_array_length(interp, this, "filter")?;
    let callback = callback_argument(interp, args, "filter")?;

    let mut kept = Vec::new();
    for i in 0..length {
        let Some(element) = element_at(this, i) else {
            break;
        };
        let index = interp.number(i as f64);
        let verdict = interp.call_value(callback, interp.global, &[element, index, this])?;
        if verdict.is_truthy() {
            kept.push(element);
        }
    }
    Ok(interp.array(kept))
}

fn array_reduce(interp: &mut Interpreter, this: Value, args: &[Value]) -> Completion {
    let length = expect_array_length(interp, this, "reduce")?;
    let callback = callback_argument(interp, args, "reduce")?;

    let (mut accumulator, start) = match args.get(1) {
        Some(initial) => (*initial, 0),
        None => match element_at(this, 0) {
            Some(first) => (first, 1),
            None => {
                return Err(interp.throw_type_error(
                    "Reduce of empty array with no initial value".to_string(),
                ))
            }
        },
    };

    for i in start..length {
        let Some(element) = element_at(this, i) else {
            break;
        };
        let index = interp.number(i as f64);
        accumulator =
            interp.call_value(callback, interp.global, &[accumulator, element, index, this])?;
    }
    Ok(accumulator)
}

fn array_to_string(interp: &mut Interpreter, this: Value, _args: &[Value]) -> Completion {
    let rendered = crate::value::value_to_string(this);
    Ok(interp.string(rendered))
}

/// Array.from(arrayLike, mapFn?) - copy of the elements, optionally mapped.
fn array_from(interp: &mut Interpreter, _this: Value, args: &[Value]) -> Completion {
    let source = args.first().copied().unwrap_or(interp.undefined());
    let map_fn = args.get(1).copied().filter(|f| f.is_function());

    let length = match &source.borrow().kind {
        ValueKind::Array(elements) => elements.len(),
        _ => 0,
    };

    let mut elements = Vec::with_capacity(length);
    for i in 0..length {
        let Some(element) = element_at(source, i) else {
            break;
        };
        let value = match map_fn {
            Some(map_fn) => {
                let index = interp.number(i as f64);
                interp.call_value(map_fn, interp.global, &[element, index])?
            }
            None => element,
        };
        elements.push(value);
    }
    Ok(interp.array(elements))
}
