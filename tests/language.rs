use std::{
    fs::{self},
    sync::mpsc,
};

use kpl::{
    error::{ParseError, RuntimeError},
    get_result,
    interpreter::{evaluator::core::Context, value::core::Value},
};
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_kpl_blocks(&content).into_iter().enumerate() {
            count += 1;
            if let Err(e) = get_result(&code, false) {
                panic!("KPL example {} in {:?} failed:\n{}\nError: {:?}",
                       i + 1,
                       path,
                       code,
                       e);
            }
        }
    }

    assert!(count > 0, "No KPL examples found in book/src");
}

fn extract_kpl_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```kpl") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn assert_success(src: &str) {
    if let Err(e) = get_result(src, false) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if get_result(src, false).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

fn eval(src: &str) -> Option<Value> {
    Context::new().run(src)
                  .unwrap_or_else(|e| panic!("Script failed: {e}"))
}

fn number(src: &str) -> f64 {
    match eval(src) {
        Some(Value::Number(n)) => n,
        other => panic!("Expected a number from {src:?}, found {other:?}"),
    }
}

fn output(src: &str) -> Vec<String> {
    let (sender, receiver) = mpsc::channel();
    let mut context = Context::with_print_sink(sender);

    context.run(src)
           .unwrap_or_else(|e| panic!("Script failed: {e}"));
    receiver.try_iter().collect()
}

fn parse_error(src: &str) -> ParseError {
    let err = Context::new().run(src)
                            .expect_err("Script succeeded but was expected to fail");
    match err.downcast::<ParseError>() {
        Ok(e) => *e,
        Err(e) => panic!("Expected a parse error, found: {e}"),
    }
}

fn runtime_error(src: &str) -> RuntimeError {
    let err = Context::new().run(src)
                            .expect_err("Script succeeded but was expected to fail");
    match err.downcast::<RuntimeError>() {
        Ok(e) => *e,
        Err(e) => panic!("Expected a runtime error, found: {e}"),
    }
}

#[test]
fn arithmetic_precedence() {
    assert_eq!(number("2 + 3 * 4"), 14.0);
    assert_eq!(number("(2 + 3) * 4"), 20.0);
    assert_eq!(number("-2 + 3"), 1.0);
    assert_eq!(number("10 - 4 - 3"), 3.0);
    assert_eq!(number("7 % 4 * 2"), 6.0);
    assert_eq!(number(".5 + 1.25"), 1.75);
}

#[test]
fn arithmetic_is_numeric_only() {
    assert!(matches!(runtime_error("\"a\" + 1"), RuntimeError::TypeError { .. }));
    assert!(matches!(runtime_error("true * 2"), RuntimeError::TypeError { .. }));
    assert!(matches!(runtime_error("-\"x\""), RuntimeError::TypeError { .. }));
    assert!(matches!(runtime_error("1 / 0"), RuntimeError::DivisionByZero { line: 1 }));
    assert!(matches!(runtime_error("1 % 0"), RuntimeError::DivisionByZero { .. }));
}

#[test]
fn equality() {
    assert_eq!(eval("1 == 1"), Some(Value::Bool(true)));
    assert_eq!(eval("\"ab\" == \"ab\""), Some(Value::Bool(true)));
    assert_eq!(eval("1 == \"1\""), Some(Value::Bool(false)));
    assert_eq!(eval("[1, 2] == [1, 2]"), Some(Value::Bool(true)));
    assert_eq!(eval("[1, 2] == [2, 1]"), Some(Value::Bool(false)));
    assert_eq!(eval("fn f = () : => 1 : f == f"), Some(Value::Bool(true)));
}

#[test]
fn declarations_and_lookup() {
    assert_eq!(number("num x = 5 x"), 5.0);
    assert_eq!(eval("str s = \"hi\" s"), Some(Value::from("hi")));
    assert_eq!(eval("bool b = 1 == 1 b"), Some(Value::Bool(true)));
    assert_eq!(eval("arr a = [10, 2 + 3] a"),
               Some(Value::from(vec![Value::Number(10.0), Value::Number(5.0)])));
}

#[test]
fn declarations_check_their_type() {
    assert!(matches!(runtime_error("num x = \"five\""), RuntimeError::TypeError { .. }));
    assert!(matches!(runtime_error("str s = 5"), RuntimeError::TypeError { .. }));
    assert!(matches!(runtime_error("arr a = 5"), RuntimeError::TypeError { .. }));
    assert!(matches!(runtime_error("bool b = \"true\""), RuntimeError::TypeError { .. }));
}

#[test]
fn redeclaration_overwrites() {
    assert_eq!(number("num x = 1 num x = 2 x"), 2.0);
    assert_eq!(eval("num x = 1 str x = \"now a string\" x"),
               Some(Value::from("now a string")));
}

#[test]
fn undeclared_identifier_is_an_error() {
    let err = runtime_error("num y = 1\nnum z = x + y");
    assert!(matches!(err, RuntimeError::UnknownVariable { ref name, line: 2 } if name == "x"));

    assert!(matches!(runtime_error("nothing(1)"), RuntimeError::UnknownVariable { .. }));
    assert!(matches!(runtime_error("num x = 1 x(2)"), RuntimeError::NotCallable { .. }));
}

#[test]
fn functions_bind_their_arguments() {
    assert_eq!(number("fn add = (num a, num b) : => a + b : add(2, 3)"), 5.0);
    assert_eq!(number("fn sub = (num a, num b) : => a - b : sub(10, 4)"), 6.0);
    assert_eq!(number("fn three = () : => 3 : three()"), 3.0);
    assert_eq!(number("fn nested = (num x) : => (x + 1) * 2 : nested((1 + 2))"), 8.0);
}

#[test]
fn function_arguments_are_type_checked() {
    assert!(matches!(runtime_error("fn add = (num a, num b) : => a + b : add(\"2\", 3)"),
                     RuntimeError::TypeError { .. }));
    assert!(matches!(runtime_error("fn f = (fn g) : => g(1) : f(2)"),
                     RuntimeError::TypeError { .. }));
    assert_success("fn first = (arr a) : => index(a, 0) : first([1])");
}

#[test]
fn function_arity_is_enforced() {
    assert!(matches!(runtime_error("fn add = (num a, num b) : => a + b : add(1)"),
                     RuntimeError::ArgumentCountMismatch { found: 1, .. }));
    assert!(matches!(runtime_error("shon()"),
                     RuntimeError::ArgumentCountMismatch { found: 0, .. }));
    assert!(matches!(runtime_error("arr a = [] push(a)"),
                     RuntimeError::ArgumentCountMismatch { .. }));
}

#[test]
fn recursive_fib() {
    let fib = "fn fib = (num n) :
                   lada n == 0 : => 0 :
                   badlada n == 1 : => 1 :
                   hynrei : => fib(n - 1) + fib(n - 2) :
               :";

    for (n, expected) in [(0, 0.0), (1, 1.0), (2, 1.0), (5, 5.0), (10, 55.0)] {
        assert_eq!(number(&format!("{fib} fib({n})")), expected);
    }
}

#[test]
fn functions_are_values() {
    assert_eq!(number("fn twice = (fn f, num x) : => f(f(x)) :
                       fn inc = (num x) : => x + 1 :
                       twice(inc, 5)"),
               7.0);
    assert_eq!(output("fn f = () : => 1 : shon(f)"), ["<fn f>"]);
}

#[test]
fn function_value_is_last_expression_without_return() {
    assert_eq!(number("fn square = (num x) : x * x : square(4)"), 16.0);
    assert_eq!(eval("fn quiet = () : num x = 1 : quiet()"), None);
}

#[test]
fn function_locals_do_not_leak() {
    assert!(matches!(runtime_error("fn f = () : num local = 1 => local : f() local"),
                     RuntimeError::UnknownVariable { .. }));
    // A function sees the globals, but not its caller's frame.
    assert_eq!(number("num g = 10 fn f = () : => g : f()"), 10.0);
    assert!(matches!(runtime_error("fn inner = () : => secret :
                                    fn outer = () : num secret = 1 => inner() :
                                    outer()"),
                     RuntimeError::UnknownVariable { .. }));
}

#[test]
fn functions_declared_in_bodies_can_recurse() {
    let src = "fn outer = (num x) :
                   fn down = (num n) :
                       lada n == 0 : => 0 :
                       hynrei : => 1 + down(n - 1) :
                   :
                   => down(x)
               :
               outer(3)";
    assert_eq!(number(src), 3.0);

    let siblings = "fn outer = (num x) :
                        fn a = (num n) : => n + 1 :
                        fn b = (num n) : => a(n) * 2 :
                        => b(x)
                    :";
    assert_eq!(number(&format!("{siblings} outer(4)")), 10.0);
    // Functions go to the global store, unlike the locals next to them.
    assert_eq!(number(&format!("{siblings} outer(4) a(1)")), 2.0);
}

#[test]
fn loops_count_both_ways() {
    assert_eq!(output("naduh 0 haduh 2 da i : shon(i) :"), ["0", "1", "2"]);
    assert_eq!(output("naduh 2 haduh 0 da i : shon(i) :"), ["2", "1", "0"]);
    assert_eq!(output("naduh 3 haduh 3 da i : shon(i) :"), ["3"]);
    assert_eq!(output("num n = 2 naduh n - 1 haduh n * 2 da i : shon(i) :"),
               ["1", "2", "3", "4"]);
}

#[test]
fn loop_bounds_must_be_integers() {
    assert!(matches!(runtime_error("naduh 0 haduh 1.5 da i : shon(i) :"),
                     RuntimeError::InvalidLoopBounds { .. }));
    assert!(matches!(runtime_error("naduh \"a\" haduh 2 da i : shon(i) :"),
                     RuntimeError::InvalidLoopBounds { .. }));
}

#[test]
fn loop_scoping() {
    assert_eq!(number("num total = 0 naduh 1 haduh 4 da i : num total = total + i : total"),
               10.0);
    assert!(matches!(runtime_error("naduh 0 haduh 1 da i : shon(i) : i"),
                     RuntimeError::UnknownVariable { .. }));
}

#[test]
fn return_in_loop_ends_only_the_iteration() {
    assert_eq!(output("naduh 0 haduh 2 da i : => i shon(\"unreachable\") : shon(\"done\")"),
               ["done"]);
}

#[test]
fn conditional_selects_one_branch() {
    let src = "lada 1 == 2 : shon(\"a\") : badlada 2 == 2 : shon(\"X\") : hynrei : shon(\"Y\") :";
    assert_eq!(output(src), ["X"]);

    assert_eq!(output("lada false : shon(1) : hynrei : shon(2) :"), ["2"]);
    assert_eq!(output("lada false : shon(1) :"), Vec::<String>::new());
    assert_eq!(output("lada true : shon(1) : badlada true : shon(2) :"), ["1"]);
}

#[test]
fn conditions_are_evaluated_lazily() {
    // The second condition would fail if it were evaluated.
    assert_success("lada true : shon(1) : badlada missing == 1 : shon(2) :");
}

#[test]
fn conditions_must_be_booleans() {
    assert!(matches!(runtime_error("lada 1 : shon(1) :"),
                     RuntimeError::ExpectedBoolean { .. }));
}

#[test]
fn conditional_declarations_persist() {
    assert_eq!(eval("lada true : str seen = \"yes\" : seen"), Some(Value::from("yes")));
}

#[test]
fn return_propagates_out_of_conditionals() {
    let src = "fn classify = (num x) :
                   lada x == 0 : => \"zero\" :
                   naduh 1 haduh 1 da i : shon(i) :
                   => \"other\"
               :";

    assert_eq!(eval(&format!("{src} classify(0)")), Some(Value::from("zero")));
    assert_eq!(eval(&format!("{src} classify(3)")), Some(Value::from("other")));
}

#[test]
fn program_value() {
    assert_eq!(number("=> 1 2"), 1.0);
    assert_eq!(number("1 2"), 2.0);
    assert_eq!(number("lada true : => 7 : 8"), 7.0);
    assert_eq!(eval("num x = 1"), None);
    assert_eq!(eval(""), None);
    assert_eq!(eval("  \n\t // just a comment\n"), None);
}

#[test]
fn shon_formats_values() {
    assert_eq!(output("shon(\"a\", 1, 2.5, true, [1, \"b\"])"),
               ["a 1 2.5 true [1, b]"]);
    assert_eq!(eval("shon(1)"), None);
}

#[test]
fn push_and_index() {
    assert_eq!(output("arr a = [] push(a, 1) push(a, \"2\") shon(a, index(a, 1))"),
               ["[1, 2] 2"]);

    // Natives reach the global array from inside a function.
    assert_eq!(number("arr a = [] fn add = (num x) : push(a, x) : add(4) add(5) index(a, 1)"),
               5.0);

    assert!(matches!(runtime_error("push([1], 2)"), RuntimeError::InvalidArgument { .. }));
    assert!(matches!(runtime_error("num n = 1 push(n, 2)"),
                     RuntimeError::ExpectedArray { .. }));
    assert!(matches!(runtime_error("arr a = [1] index(a, -1)"),
                     RuntimeError::IndexOutOfBounds { len: 1, found: -1, .. }));
    assert!(matches!(runtime_error("arr a = [1] index(a, 0.5)"),
                     RuntimeError::RealIsFractional { .. }));
}

#[test]
fn global_store_is_shared_between_runs() {
    let mut context = Context::new();

    context.run("fn double = (num x) : => x * 2 :").unwrap();
    context.run("num y = double(21)").unwrap();

    assert_eq!(context.get_variable("y"), Some(&Value::Number(42.0)));
}

#[test]
fn lexing_errors() {
    assert!(matches!(parse_error("num x = 5 # 2"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_error("str s = \"unterminated"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_error("num\nx = 1 !"), ParseError::UnexpectedToken { line: 2, .. }));
}

#[test]
fn syntax_errors() {
    assert!(matches!(parse_error("(1 + 2"), ParseError::ExpectedClosingParen { .. }));
    assert!(matches!(parse_error("num = 3"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_error("num x 3"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_error("hynrei : shon(1) :"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_error("badlada true : shon(1) :"),
                     ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_error("fn f = (num a) => a"), ParseError::ExpectedWrapper { .. }));
    assert!(matches!(parse_error("lada true shon(1)"), ParseError::ExpectedWrapper { .. }));
    assert_failure("shon(1 +)");
    assert_failure("num x = ");
}

#[test]
fn nothing_runs_when_parsing_fails() {
    let (sender, receiver) = mpsc::channel();
    let mut context = Context::with_print_sink(sender);

    assert!(context.run("shon(1) (").is_err());
    assert_eq!(receiver.try_iter().count(), 0);
}

#[test]
fn invalid_parameter_lists() {
    for src in ["fn f = (num a,) : => a :",
                "fn f = (num a num b) : => a :",
                "fn f = (a) : => a :",
                "fn f = (num) : => 1 :",
                "fn f = (num a, , num b) : => a :"]
    {
        assert!(matches!(parse_error(src), ParseError::InvalidParameterList { .. }),
                "{src} should be rejected");
    }
}

#[test]
fn unterminated_blocks() {
    assert!(matches!(parse_error("fn f = (num a) : => a"),
                     ParseError::UnterminatedBlock { line: 1 }));
    assert!(matches!(parse_error("lada true :\nshon(1)\nlada false : shon(2) :"),
                     ParseError::UnterminatedBlock { line: 1 }));
    assert!(matches!(parse_error("naduh 0 haduh 1 da i :\n\nshon(i)"),
                     ParseError::UnterminatedBlock { line: 1 }));
}

#[test]
fn nested_bodies() {
    let src = "fn count = (num n) :
                   num evens = 0
                   naduh 1 haduh n da i :
                       lada i % 2 == 0 :
                           num evens = evens + 1
                       :
                   :
                   => evens
               :
               count(9)";
    assert_eq!(number(src), 4.0);

    let src = "fn outer = (num x) :
                   fn inner = (num y) : => y * 10 :
                   => inner(x) + 1
               :
               outer(4)";
    assert_eq!(number(src), 41.0);
}

#[test]
fn fn_parameter_types_inside_nested_bodies() {
    let src = "fn double = (num n) : => n * 2 :
               naduh 0 haduh 1 da i :
                   fn g = (fn f, num x) :
                       lada x == 0 : => 1 :
                       => f(x)
                   :
                   shon(g(double, i))
               :";
    assert_eq!(output(src), ["1", "2"]);

    let src = "lada true :
                   fn apply = (fn f, num x) : => f(x) :
                   shon(apply(double, 5))
               :";
    assert_eq!(output(&format!("fn double = (num n) : => n * 2 : {src}")), ["10"]);
}

#[test]
fn malformed_loops() {
    assert!(matches!(parse_error("naduh 0 2 da i : shon(i) :"), ParseError::MalformedLoop { .. }));
    assert!(matches!(parse_error("naduh 0 haduh 2 i : shon(i) :"),
                     ParseError::MalformedLoop { .. }));
    assert!(matches!(parse_error("naduh 0 haduh 2 da : shon(1) :"),
                     ParseError::MalformedLoop { .. }));
    assert!(matches!(parse_error("while true : shon(1) :"),
                     ParseError::UnsupportedLoop { .. }));
}

#[test]
fn deep_recursion_works() {
    let src = "fn sum = (num n) :
                   lada n == 0 : => 0 :
                   hynrei : => n + sum(n - 1) :
               :
               sum(1000)";
    assert_eq!(number(src), 500_500.0);
}

#[test]
fn runaway_recursion_is_an_error() {
    let src = "fn forever = (num n) : => forever(n + 1) : forever(0)";
    assert!(matches!(runtime_error(src),
                     RuntimeError::RecursionLimit { depth: 5_000, .. }));
}

#[test]
fn error_messages_name_the_line() {
    let err = get_result("num x = 1\n\nnum y = x + missing", false).unwrap_err();
    assert!(err.to_string().starts_with("Error on line 3:"), "{err}");
}

#[test]
fn end_of_input_names_the_line() {
    assert!(matches!(parse_error("num x = "), ParseError::UnexpectedEndOfInput { line: 1 }));
    assert!(matches!(parse_error("num a = 1\nnum b = a +"),
                     ParseError::UnexpectedEndOfInput { line: 2 }));
    assert!(matches!(parse_error("num a = 1\n\n=> -"),
                     ParseError::UnexpectedEndOfInput { line: 3 }));
}
