//! Free-standing globals: the `undefined` binding, `parseInt` and
//! `parseFloat`.

use crate::heap::Value;
use crate::interpreter::{Completion, Interpreter};
use crate::value::{to_number, value_to_string};

pub fn install(interp: &mut Interpreter) {
    let undefined = interp.undefined();
    interp.global.set_property("undefined", undefined);

    let global = interp.global;
    interp.register_method(global, "parseInt", parse_int);
    interp.register_method(global, "parseFloat", parse_float);
}

/// parseInt(s, radix?) - integer prefix of the input in the given radix
/// (default 10). A `0x` prefix switches to base 16.
fn parse_int(interp: &mut Interpreter, _this: Value, args: &[Value]) -> Completion {
    let input = match args.first() {
        Some(value) => value_to_string(*value),
        None => return Ok(interp.number(f64::NAN)),
    };

    let mut radix = match args.get(1) {
        Some(value) => {
            let r = to_number(*value);
            if r.is_nan() || r == 0.0 {
                10
            } else {
                r as u32
            }
        }
        None => 10,
    };
    if !(2..=36).contains(&radix) {
        return Ok(interp.number(f64::NAN));
    }

    let mut rest = input.trim();
    let mut negative = false;
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    if radix == 16 || radix == 10 {
        if let Some(stripped) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
            rest = stripped;
            radix = 16;
        }
    }

    let digits: String = rest
        .chars()
        .take_while(|c| c.is_digit(radix))
        .collect();
    if digits.is_empty() {
        return Ok(interp.number(f64::NAN));
    }

    let parsed = i64::from_str_radix(&digits, radix)
        .map(|v| v as f64)
        .unwrap_or(f64::NAN);
    let result = if negative { -parsed } else { parsed };
    Ok(interp.number(result))
}

/// parseFloat(s) - longest leading decimal prefix of the input.
fn parse_float(interp: &mut Interpreter, _this: Value, args: &[Value]) -> Completion {
    let input = match args.first() {
        Some(value) => value_to_string(*value),
        None => return Ok(interp.number(f64::NAN)),
    };

    let rest = input.trim();
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in rest.char_indices() {
        match c {
            '+' | '-' if i == 0 => end = i + 1,
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => {
                seen_dot = true;
                end = i + 1;
            }
            _ => break,
        }
    }

    let parsed = rest[..end].parse::<f64>().unwrap_or(f64::NAN);
    Ok(interp.number(parsed))
}
