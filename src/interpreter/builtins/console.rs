//! The `console` object.

use crate::heap::Value;
use crate::interpreter::{Completion, Interpreter};
use crate::value::render_console_value;

pub fn install(interp: &mut Interpreter) {
    let console = interp.object();
    interp.register_method(console, "log", console_log);
    interp.register_method(console, "error", console_error);
    interp.global.set_property("console", console);
}

fn render_line(args: &[Value]) -> String {
    args.iter()
        .map(|value| render_console_value(*value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// console.log(...args) - JSON-like rendering, space-separated, newline.
fn console_log(interp: &mut Interpreter, _this: Value, args: &[Value]) -> Completion {
    let line = render_line(args);
    interp.console().write_out(&line);
    Ok(interp.undefined())
}

/// console.error(...args) - same rendering, error stream.
fn console_error(interp: &mut Interpreter, _this: Value, args: &[Value]) -> Completion {
    let line = render_line(args);
    interp.console().write_err(&line);
    Ok(interp.undefined())
}
