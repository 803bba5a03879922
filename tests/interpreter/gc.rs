//! Collector behavior through the public interpreter surface.

use jsrun::parser::Parser;
use jsrun::Interpreter;

fn run(interp: &mut Interpreter, source: &str) {
    let program = Parser::parse_source(source).unwrap();
    interp.execute(&program).unwrap();
}

#[test]
fn reachable_values_survive_a_forced_collection() {
    let mut interp = Interpreter::new();
    run(
        &mut interp,
        "var keep = { list: [1, 2, 3], label: \"alive\" };",
    );

    interp.collect_garbage();

    run(&mut interp, "var total = keep.list[0] + keep.list[2];");
    let total = interp.eval("total;").unwrap();
    assert_eq!(total.as_number(), Some(4.0));
    let label = interp.eval("keep.label;").unwrap();
    assert_eq!(label.as_js_string().unwrap(), "alive");
}

#[test]
fn collection_reclaims_garbage() {
    let mut interp = Interpreter::new();
    run(
        &mut interp,
        "function churn() { var a = [1, 2, 3]; var o = { x: a }; return 0; } \
         for (var i = 0; i < 200; i++) churn();",
    );

    let before = interp.heap_stats().live;
    interp.collect_garbage();
    let after = interp.heap_stats().live;
    assert!(after < before, "collection freed nothing: {} -> {}", before, after);
}

#[test]
fn cyclic_structures_are_collected_once_unreachable() {
    let mut interp = Interpreter::new();
    run(
        &mut interp,
        "function cycle() { var a = {}; var b = {}; a.other = b; b.other = a; return 0; } \
         cycle();",
    );

    interp.collect_garbage();
    let after_first = interp.heap_stats().live;

    // A second cycle with no roots left behind collects down to the same
    // footprint.
    run(&mut interp, "cycle();");
    interp.collect_garbage();
    assert_eq!(interp.heap_stats().live, after_first);
}

#[test]
fn collection_does_not_break_closures() {
    let mut interp = Interpreter::new();
    run(
        &mut interp,
        "function makeCounter() { var n = 0; return function() { n = n + 1; return n; }; } \
         var counter = makeCounter();",
    );

    interp.collect_garbage();

    let value = interp.eval("counter(); counter();").unwrap();
    assert_eq!(value.as_number(), Some(2.0));
}

#[test]
fn automatic_collection_under_a_tiny_threshold_is_sound() {
    let mut interp = Interpreter::new();
    interp.set_gc_threshold(64);

    let program = Parser::parse_source(
        "var s = 0; \
         for (var i = 1; i <= 100; i++) { s = s + i; } \
         var words = []; \
         for (var j = 0; j < 50; j++) { words.push(\"w\" + j); } \
         s;",
    )
    .unwrap();
    let result = interp.execute(&program).unwrap();
    assert_eq!(result.as_number(), Some(5050.0));

    let tail = interp.eval("words[49];").unwrap();
    assert_eq!(tail.as_js_string().unwrap(), "w49");

    assert!(interp.heap_stats().collections > 0);
}

#[test]
fn stats_report_pool_reuse() {
    let mut interp = Interpreter::new();
    run(&mut interp, "for (var i = 0; i < 100; i++) { var t = { n: i }; }");

    interp.collect_garbage();
    let stats = interp.heap_stats();
    assert!(stats.pooled > 0);
    assert_eq!(stats.total, stats.live + stats.pooled);
}
