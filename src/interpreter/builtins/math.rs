//! The `Math` object.

use crate::heap::Value;
use crate::interpreter::{Completion, Interpreter};
use crate::value::to_number;

pub fn install(interp: &mut Interpreter) {
    let math = interp.object();
    interp.register_method(math, "abs", math_abs);
    interp.register_method(math, "round", math_round);
    interp.register_method(math, "sqrt", math_sqrt);
    interp.register_method(math, "floor", math_floor);
    interp.global.set_property("Math", math);
}

fn unary_argument(args: &[Value]) -> f64 {
    args.first().map(|value| to_number(*value)).unwrap_or(f64::NAN)
}

fn math_abs(interp: &mut Interpreter, _this: Value, args: &[Value]) -> Completion {
    let n = unary_argument(args);
    Ok(interp.number(n.abs()))
}

fn math_round(interp: &mut Interpreter, _this: Value, args: &[Value]) -> Completion {
    let n = unary_argument(args);
    Ok(interp.number(n.round()))
}

fn math_sqrt(interp: &mut Interpreter, _this: Value, args: &[Value]) -> Completion {
    let n = unary_argument(args);
    Ok(interp.number(n.sqrt()))
}

fn math_floor(interp: &mut Interpreter, _this: Value, args: &[Value]) -> Completion {
    let n = unary_argument(args);
    Ok(interp.number(n.floor()))
}
