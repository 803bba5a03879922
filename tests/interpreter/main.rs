//! Interpreter integration tests, organized by feature.

mod arrays;
mod basics;
mod functions;
mod gc;
mod objects;

use jsrun::parser::Parser;
use jsrun::{BufferedConsole, Interpreter};

/// Evaluate a source string and extract the final value as a number.
pub fn eval_number(source: &str) -> f64 {
    let mut interp = Interpreter::new();
    let value = interp.eval(source).unwrap();
    value
        .as_number()
        .unwrap_or_else(|| panic!("expected a number, got {:?}", value))
}

pub fn eval_bool(source: &str) -> bool {
    let mut interp = Interpreter::new();
    let value = interp.eval(source).unwrap();
    value
        .as_bool()
        .unwrap_or_else(|| panic!("expected a boolean, got {:?}", value))
}

pub fn eval_string(source: &str) -> String {
    let mut interp = Interpreter::new();
    let value = interp.eval(source).unwrap();
    value
        .as_js_string()
        .unwrap_or_else(|| panic!("expected a string, got {:?}", value))
        .to_string()
}

pub fn eval_is_undefined(source: &str) -> bool {
    let mut interp = Interpreter::new();
    interp.eval(source).unwrap().is_undefined()
}

/// Run a program and capture both console streams.
pub fn run_capture(source: &str) -> (Vec<String>, Vec<String>) {
    let console = BufferedConsole::new();
    let mut interp = Interpreter::with_console(console.clone());
    let program = Parser::parse_source(source).unwrap();
    interp.run(&program);
    (console.out_lines(), console.err_lines())
}

/// Convenience wrapper: captured stdout lines only.
pub fn run_stdout(source: &str) -> Vec<String> {
    run_capture(source).0
}

#[test]
fn eval_reports_uncaught_values_as_errors() {
    let mut interp = Interpreter::new();
    let err = interp.eval("throw new Error(\"boom\");").unwrap_err();
    assert_eq!(err.to_string(), "Uncaught Error: boom");
}
