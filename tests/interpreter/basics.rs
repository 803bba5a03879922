//! Core expression semantics: arithmetic, comparison, truthiness, typeof.

use super::{eval_bool, eval_is_undefined, eval_number, eval_string};

#[test]
fn arithmetic() {
    assert_eq!(eval_number("1 + 2;"), 3.0);
    assert_eq!(eval_number("10 - 4;"), 6.0);
    assert_eq!(eval_number("3 * 4;"), 12.0);
    assert_eq!(eval_number("15 / 3;"), 5.0);
    assert_eq!(eval_number("7 % 4;"), 3.0);
    assert_eq!(eval_number("2 ** 3;"), 8.0);
}

#[test]
fn binary_chains_group_to_the_right() {
    // No precedence table: chains are right-associative, so grouping must
    // be spelled out with parentheses.
    assert_eq!(eval_number("1 + 2 * 3;"), 7.0);
    assert_eq!(eval_number("2 * 3 + 1;"), 8.0);
    assert_eq!(eval_number("(2 * 3) + 1;"), 7.0);
}

#[test]
fn division_by_zero_follows_ieee754() {
    assert_eq!(eval_number("1 / 0;"), f64::INFINITY);
    assert!(eval_number("0 / 0;").is_nan());
}

#[test]
fn hex_literals() {
    assert_eq!(eval_number("0x1;"), 1.0);
    assert_eq!(eval_number("0xff;"), 255.0);
}

#[test]
fn string_concatenation() {
    assert_eq!(eval_string("\"foo\" + \"bar\";"), "foobar");
    assert_eq!(eval_string("\"n = \" + 42;"), "n = 42");
    assert_eq!(eval_string("1 + \"x\";"), "1x");
    assert_eq!(eval_string("\"flag: \" + true;"), "flag: true");
}

#[test]
fn numeric_comparison() {
    assert!(eval_bool("1 < 2;"));
    assert!(eval_bool("2 > 1;"));
    assert!(eval_bool("2 <= 2;"));
    assert!(eval_bool("3 >= 2;"));
    assert!(!eval_bool("2 < 1;"));
}

#[test]
fn equality() {
    assert!(eval_bool("123 == 123;"));
    assert!(eval_bool("123 === 123;"));
    assert!(eval_bool("123 != 124;"));
    assert!(eval_bool("123 !== 124;"));
    assert!(eval_bool("\"a\" === \"a\";"));
    assert!(eval_bool("\"a\" !== \"b\";"));
    assert!(eval_bool("null === null;"));
    assert!(eval_bool("undefined === undefined;"));
}

#[test]
fn nan_is_never_equal_to_itself() {
    assert!(eval_bool("(0 / 0) != (0 / 0);"));
}

#[test]
fn logical_operators_return_booleans() {
    assert!(eval_bool("true && true;"));
    assert!(!eval_bool("true && false;"));
    assert!(eval_bool("false || true;"));
    assert!(!eval_bool("false || false;"));
    // Truthiness of operands collapses to a boolean result.
    assert!(eval_bool("1 && \"x\";"));
}

#[test]
fn logical_operators_short_circuit() {
    // The right side must not run when the left side decides.
    assert_eq!(
        eval_number("var n = 0; var bump = function() { n = n + 1; return true; }; false && bump(); n;"),
        0.0
    );
    assert_eq!(
        eval_number("var n = 0; var bump = function() { n = n + 1; return true; }; true || bump(); n;"),
        0.0
    );
}

#[test]
fn bitwise_operators_truncate() {
    assert_eq!(eval_number("0 | 1;"), 1.0);
    assert_eq!(eval_number("1 & 1;"), 1.0);
    assert_eq!(eval_number("1 & 0;"), 0.0);
    assert_eq!(eval_number("6 | 1;"), 7.0);
    assert_eq!(eval_number("6.9 & 3.2;"), 2.0);
}

#[test]
fn unary_not() {
    assert!(eval_bool("!false;"));
    assert!(eval_bool("!0;"));
    assert!(eval_bool("!\"\";"));
    assert!(!eval_bool("!1;"));
    assert!(!eval_bool("!\"x\";"));
}

#[test]
fn typeof_table() {
    assert_eq!(eval_string("typeof undefined;"), "undefined");
    assert_eq!(eval_string("typeof 1;"), "number");
    assert_eq!(eval_string("typeof \"\";"), "string");
    assert_eq!(eval_string("typeof true;"), "boolean");
    assert_eq!(eval_string("var o = {}; typeof o;"), "object");
    assert_eq!(eval_string("var a = []; typeof a;"), "object");
    assert_eq!(eval_string("var n = null; typeof n;"), "object");
    assert_eq!(eval_string("var f = function() {}; typeof f;"), "function");
    assert_eq!(eval_string("var f = () => {}; typeof f;"), "function");
}

#[test]
fn ternary() {
    assert_eq!(eval_number("true ? 1 : 2;"), 1.0);
    assert_eq!(eval_number("false ? 1 : 2;"), 2.0);
    assert_eq!(eval_number("(1 < 2) ? 3 : 4;"), 3.0);
}

#[test]
fn variables() {
    assert_eq!(eval_number("var x = 5; x;"), 5.0);
    assert_eq!(eval_number("var x = 5; x = 10; x;"), 10.0);
    assert_eq!(eval_number("let y = 1; y;"), 1.0);
    assert_eq!(eval_number("const z = 2; z;"), 2.0);
    assert!(eval_is_undefined("var empty; empty;"));
}

#[test]
fn undeclared_assignment_lands_on_the_global() {
    assert_eq!(eval_number("function f() { leak = 9; } f(); leak;"), 9.0);
}

#[test]
fn update_expressions() {
    assert_eq!(eval_number("var i = 1; i++;"), 1.0);
    assert_eq!(eval_number("var i = 1; i++; i;"), 2.0);
    assert_eq!(eval_number("var i = 1; ++i;"), 2.0);
    assert_eq!(eval_number("var i = 1; i--; i;"), 0.0);
    assert_eq!(eval_number("var i = 1; --i;"), 0.0);
}

#[test]
fn compound_assignment() {
    assert_eq!(eval_number("var x = 4; x += 2; x;"), 6.0);
    assert_eq!(eval_number("var x = 4; x -= 2; x;"), 2.0);
    assert_eq!(eval_number("var x = 4; x *= 2; x;"), 8.0);
    assert_eq!(eval_number("var x = 4; x /= 2; x;"), 2.0);
    assert_eq!(eval_string("var s = \"a\"; s += \"b\"; s;"), "ab");
}

#[test]
fn this_at_top_level_is_the_global_object() {
    assert!(eval_bool("this.Math === Math;"));
}
