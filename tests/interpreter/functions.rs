//! Function semantics: calls, parameters, closures, `arguments`, carriers.

use super::{eval_bool, eval_is_undefined, eval_number, eval_string};
use jsrun::parser::Parser;
use jsrun::Interpreter;

#[test]
fn declaration_and_call() {
    assert_eq!(
        eval_number("function f(a, b) { return a * b; } f(3, 4);"),
        12.0
    );
}

#[test]
fn function_expression_and_arrow() {
    assert_eq!(
        eval_number("var f = function(a) { return a + 1; }; f(1);"),
        2.0
    );
    assert_eq!(eval_number("var f = () => 123; f();"), 123.0);
    assert_eq!(eval_number("var f = (x) => x + 1; f(2);"), 3.0);
    assert_eq!(eval_number("var f = x => x * 2; f(4);"), 8.0);
}

#[test]
fn arrow_block_body_needs_return() {
    assert!(eval_is_undefined("var f = () => { 123; }; f();"));
    assert_eq!(eval_number("var f = () => { return 9; }; f();"), 9.0);
}

#[test]
fn statement_body_without_return_yields_undefined() {
    assert!(eval_is_undefined("function f() { 1 + 1; } f();"));
}

#[test]
fn missing_parameters_bind_undefined_and_excess_is_ignored() {
    assert!(eval_bool(
        "function f(a, b) { return b === undefined; } f(1);"
    ));
    assert_eq!(
        eval_number("function f(a) { return a; } f(7, 8, 9);"),
        7.0
    );
}

#[test]
fn arguments_object() {
    assert_eq!(eval_number("function f() { return arguments.length; } f(1, 2, 3);"), 3.0);
    assert_eq!(eval_number("function f() { return arguments[1]; } f(1, 2, 3);"), 2.0);
}

#[test]
fn closures_capture_their_creation_scope() {
    let source = "
        function makeCounter() {
            var count = 0;
            return function() { count = count + 1; return count; };
        }
        var counter = makeCounter();
        counter();
        counter();
        counter();
    ";
    assert_eq!(eval_number(source), 3.0);
}

#[test]
fn closures_are_independent() {
    let source = "
        function makeCounter() {
            var count = 0;
            return function() { count = count + 1; return count; };
        }
        var a = makeCounter();
        var b = makeCounter();
        a(); a();
        b();
    ";
    assert_eq!(eval_number(source), 1.0);
}

#[test]
fn recursion() {
    assert_eq!(
        eval_number("function fib(n) { if (n < 2) { return n; } return fib(n - 1) + fib(n - 2); } fib(10);"),
        55.0
    );
}

#[test]
fn functions_are_values_with_a_prototype_object() {
    assert!(eval_bool("function f() {} f.prototype.constructor === f;"));
    assert_eq!(eval_string("function f() {} typeof f.prototype;"), "object");
}

#[test]
fn return_passes_through_try_catch_unchanged() {
    // A `return` in flight is not a catchable value.
    let source = "
        function f() {
            try { return 1; }
            catch (e) { return 2; }
        }
        f();
    ";
    assert_eq!(eval_number(source), 1.0);
}

#[test]
fn return_without_value_is_undefined() {
    assert!(eval_is_undefined("function f() { return; } f();"));
}

#[test]
fn scope_depth_is_preserved_across_calls() {
    let mut interp = Interpreter::new();
    let before = interp.scope_depth();

    let program =
        Parser::parse_source("function f(n) { if (n > 0) { return f(n - 1); } return 0; } f(10);")
            .unwrap();
    interp.execute(&program).unwrap();

    assert_eq!(interp.scope_depth(), before);
}

#[test]
fn scope_depth_is_preserved_when_a_call_throws() {
    let mut interp = Interpreter::new();
    let before = interp.scope_depth();

    let program = Parser::parse_source(
        "function f() { g(); } function g() { throw new Error(\"x\"); } try { f(); } catch (e) {}",
    )
    .unwrap();
    interp.execute(&program).unwrap();

    assert_eq!(interp.scope_depth(), before);
}

#[test]
fn method_call_binds_this_to_the_receiver() {
    assert_eq!(
        eval_number("var o = { n: 5, get: function() { return this.n; } }; o.get();"),
        5.0
    );
}

#[test]
fn plain_call_binds_this_to_the_global_object() {
    // Globals are properties of `this` inside a plain call.
    assert!(eval_bool(
        "function f() { return this.Math !== undefined; } f();"
    ));
    assert!(eval_bool(
        "function f() { this.fromCall = 42; } f(); fromCall === 42;"
    ));
}
