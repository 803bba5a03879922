//! Array semantics: literals, indexing, the virtual `length`, prototype
//! methods and the `Array` constructor.

use super::{eval_bool, eval_is_undefined, eval_number, eval_string};

#[test]
fn literal_and_length() {
    assert_eq!(eval_number("var a = [1, 2, 3, 4]; a.length;"), 4.0);
    assert_eq!(eval_number("var a = []; a.length;"), 0.0);
}

#[test]
fn indexing() {
    assert_eq!(eval_number("var a = [123]; a[0];"), 123.0);
    assert_eq!(eval_number("var a = [1, 2, 3]; a[2];"), 3.0);
    assert!(eval_is_undefined("var a = [1]; a[5];"));
    assert!(eval_is_undefined("var a = [1]; a[0.5];"));
}

#[test]
fn index_assignment_grows_the_array() {
    assert_eq!(eval_number("var a = [1]; a[0] = 9; a[0];"), 9.0);
    assert_eq!(eval_number("var a = []; a[2] = 7; a.length;"), 3.0);
    assert!(eval_is_undefined("var a = []; a[2] = 7; a[1];"));
}

#[test]
fn constructor_with_length() {
    assert_eq!(eval_number("var a = new Array(5); a.length;"), 5.0);
    assert!(eval_is_undefined("var a = new Array(5); a[3];"));
    assert_eq!(eval_number("var a = Array(); a.length;"), 0.0);
}

#[test]
fn push_and_pop() {
    assert_eq!(eval_number("var a = []; a.push(123); a[0];"), 123.0);
    assert_eq!(eval_number("var a = [1]; a.push(2, 3);"), 3.0);
    assert_eq!(eval_number("var a = [1, 2]; a.pop();"), 2.0);
    assert_eq!(eval_number("var a = [1, 2]; a.pop(); a.length;"), 1.0);
    assert!(eval_is_undefined("var a = []; a.pop();"));
}

#[test]
fn fill() {
    let source = "
        var a = new Array(5);
        a.fill(123);
        a[0] + a[4];
    ";
    assert_eq!(eval_number(source), 246.0);
}

#[test]
fn for_each_visits_in_order() {
    let source = "
        var seen = [];
        [10, 20, 30].forEach(function(x, i) { seen.push(x + i); });
        seen[0] + seen[1] + seen[2];
    ";
    assert_eq!(eval_number(source), 63.0);
}

#[test]
fn map_builds_a_new_array() {
    assert_eq!(
        eval_number("var b = [1, 2, 3].map(function(x) { return x * 2; }); b[2];"),
        6.0
    );
    assert_eq!(
        eval_number("var a = [1, 2, 3]; a.map(function(x) { return 0; }); a[0];"),
        1.0
    );
}

#[test]
fn filter_keeps_matching_elements() {
    let source = "
        var b = [1, 2, 3, 4, 5].filter(function(x) { return x > 2; });
        b.length;
    ";
    assert_eq!(eval_number(source), 3.0);
}

#[test]
fn reduce_with_initial_value() {
    assert_eq!(
        eval_number("[1, 2, 3, 4].reduce(function(p, x) { return p + x; }, 0);"),
        10.0
    );
}

#[test]
fn reduce_without_initial_value_starts_at_the_first_element() {
    assert_eq!(
        eval_number("[1, 2, 3, 4].reduce(function(p, x) { return p * x; });"),
        24.0
    );
}

#[test]
fn reduce_of_empty_array_without_initial_value_throws() {
    assert!(eval_bool(
        "var caught = false; try { [].reduce(function(p, x) { return p; }); } catch (e) { caught = true; } caught;"
    ));
}

#[test]
fn from_copies_elements() {
    let source = "
        var a = [1, 2, 3, 4];
        var b = Array.from(a);
        b.push(5);
        a.length + b.length;
    ";
    assert_eq!(eval_number(source), 9.0);
}

#[test]
fn from_applies_the_map_function() {
    assert_eq!(
        eval_number("var b = Array.from([1, 2, 3], (x) => x + 1); b[0] + b[1] + b[2];"),
        9.0
    );
}

#[test]
fn array_to_string_joins_with_commas() {
    assert_eq!(eval_string("\"\" + [1, 2, 3];"), "1,2,3");
    assert_eq!(eval_string("[1, [2, 3]] + \"\";"), "1,2,3");
}

#[test]
fn arrays_report_object_typeof_but_have_array_methods() {
    assert_eq!(eval_string("typeof [];"), "object");
    assert_eq!(eval_string("typeof [].push;"), "function");
}
