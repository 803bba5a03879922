//! Object semantics: literals, member access, prototypes, `new`.

use super::{eval_bool, eval_is_undefined, eval_number, eval_string};

#[test]
fn literal_and_member_access() {
    assert_eq!(eval_number("var o = { a: 1, b: 2 }; o.a + o.b;"), 3.0);
    assert_eq!(eval_number("var o = { a: 1 }; o[\"a\"];"), 1.0);
    assert!(eval_is_undefined("var o = {}; o.missing;"));
}

#[test]
fn member_assignment() {
    assert_eq!(eval_number("var o = {}; o.a = 5; o.a;"), 5.0);
    assert_eq!(eval_number("var o = {}; o[\"key\"] = 6; o.key;"), 6.0);
    assert_eq!(eval_number("var o = { a: 1 }; o.a = 2; o.a;"), 2.0);
}

#[test]
fn nested_objects() {
    assert_eq!(
        eval_number("var o = { inner: { deep: { n: 7 } } }; o.inner.deep.n;"),
        7.0
    );
}

#[test]
fn computed_keys_are_stringified() {
    assert_eq!(eval_number("var o = {}; o[1] = 10; o[\"1\"];"), 10.0);
}

#[test]
fn methods_see_the_receiver_as_this() {
    let source = "
        var rect = {
            w: 3,
            h: 4,
            area: function() { return this.w * this.h; }
        };
        rect.area();
    ";
    assert_eq!(eval_number(source), 12.0);
}

#[test]
fn constructor_with_new() {
    let source = "
        function Point(x, y) { this.x = x; this.y = y; }
        var p = new Point(3, 4);
        p.x + p.y;
    ";
    assert_eq!(eval_number(source), 7.0);
}

#[test]
fn prototype_methods_resolve_through_the_chain() {
    let source = "
        function Point(x, y) { this.x = x; this.y = y; }
        Point.prototype.norm = function() { return (this.x * this.x) + (this.y * this.y); };
        var p = new Point(3, 4);
        p.norm();
    ";
    assert_eq!(eval_number(source), 25.0);
}

#[test]
fn constructor_return_value_overrides_the_instance() {
    let source = "
        function Weird() { return { marker: 1 }; }
        var w = new Weird();
        w.marker;
    ";
    assert_eq!(eval_number(source), 1.0);
}

#[test]
fn instances_report_their_constructor_in_to_string() {
    let source = "
        function Point(x, y) { this.x = x; this.y = y; }
        var p = new Point(1, 2);
        \"\" + p;
    ";
    assert_eq!(eval_string(source), "[object Point]");
    assert_eq!(eval_string("var o = {}; \"\" + o;"), "[object Object]");
}

#[test]
fn shared_prototype_assignment() {
    // The pattern used by the original test helpers: a user constructor
    // borrowing Error's prototype for its instances.
    let source = "
        function AssertError(message) {
            this.name = \"AssertError\";
            this.message = message;
        }
        AssertError.prototype = Error.prototype;
        var e = new AssertError(\"nope\");
        e.name + \": \" + e.message;
    ";
    assert_eq!(eval_string(source), "AssertError: nope");
}

#[test]
fn own_property_shadows_the_prototype() {
    let source = "
        function T() {}
        T.prototype.x = 1;
        var t = new T();
        var before = t.x;
        t.x = 2;
        before + t.x + T.prototype.x;
    ";
    // 1 (inherited) + 2 (own) + 1 (prototype untouched)
    assert_eq!(eval_number(source), 4.0);
}

#[test]
fn prototype_lookup_terminates_on_user_made_cycles() {
    // A __proto__ cycle must not hang property resolution; a miss simply
    // comes back undefined.
    assert!(eval_is_undefined(
        "var a = {}; var b = {}; a.__proto__ = b; b.__proto__ = a; a.missing;"
    ));
}

#[test]
fn has_own_property() {
    assert!(eval_bool("var o = { a: 1 }; o.hasOwnProperty(\"a\");"));
    assert!(!eval_bool("var o = {}; o.hasOwnProperty(\"toString\");"));
}

#[test]
fn primitives_dispatch_methods_through_their_prototypes() {
    assert_eq!(eval_string("(5).toString();"), "5");
    assert_eq!(eval_string("(1.5).toString();"), "1.5");
    assert_eq!(eval_string("true.toString();"), "true");
    assert_eq!(eval_string("\"abc\".toString();"), "abc");
}

#[test]
fn string_length_is_virtual() {
    assert_eq!(eval_number("\"abc\".length;"), 3.0);
}

#[test]
fn string_and_number_conversion_builtins() {
    assert_eq!(eval_string("String(42);"), "42");
    assert_eq!(eval_number("Number(\"42\");"), 42.0);
    assert!(eval_number("Number(\"nope\");").is_nan());
    assert!(eval_bool("Boolean(1);"));
    assert!(!eval_bool("Boolean(\"\");"));
}
