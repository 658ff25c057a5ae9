use std::{fs, io};

use minilang::{
    Config, Interpreter,
    error::{Error, LexError, ParseError, RuntimeError},
    interpreter::{parser::nesting::MAX_NESTING_DEPTH, value::Value},
    run, run_with_config, stdlib,
    util::Position,
};
use walkdir::WalkDir;

#[test]
fn script_files_match_expected_output() {
    let mut count = 0;

    for entry in WalkDir::new("tests/scripts").into_iter()
                                              .filter_map(Result::ok)
                                              .filter(|e| e.path().extension().is_some_and(|ext| ext == "st"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                             panic!("Failed to read {expected_path:?}: {e}")
                                                         });

        count += 1;
        match run(&source, &stdlib::registry()) {
            Ok(execution) => assert_eq!(execution.output, expected, "output of {path:?} differs"),
            Err(e) => panic!("Script {path:?} failed:\n{source}\nError: {e}"),
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

fn output(src: &str) -> String {
    match run(src, &stdlib::registry()) {
        Ok(execution) => execution.output,
        Err(e) => panic!("Script failed: {e}\n{src}"),
    }
}

fn value(src: &str) -> Value {
    match run(src, &stdlib::registry()) {
        Ok(execution) => execution.value,
        Err(e) => panic!("Script failed: {e}\n{src}"),
    }
}

fn assert_success(src: &str) {
    if let Err(e) = run(src, &stdlib::registry()) {
        panic!("Script failed: {e}\n{src}");
    }
}

fn assert_failure(src: &str) -> Error {
    match run(src, &stdlib::registry()) {
        Ok(_) => panic!("Script succeeded but was expected to fail\n{src}"),
        Err(e) => e,
    }
}

fn runtime_failure(src: &str) -> RuntimeError {
    match assert_failure(src) {
        Error::Runtime(e) => e,
        other => panic!("Expected a runtime error, got: {other}"),
    }
}

#[test]
fn precedence_and_grouping() {
    assert_eq!(value("1 + 2 * 3"), Value::Integer(7));
    assert_eq!(value("(1 + 2) * 3"), Value::Integer(9));
    assert_eq!(value("10 - 4 - 3"), Value::Integer(3));
    assert_eq!(value("-2 * -3"), Value::Integer(6));
    assert_eq!(value("1 + 1 == 2"), Value::Integer(1));
}

#[test]
fn division_truncates_toward_zero() {
    for (a, b) in [(7, 2), (-7, 2), (7, -2), (-7, -2), (0, 5), (1, 3), (-1, 3), (100, 7)] {
        assert_eq!(value(&format!("{a} / {b}")), Value::Integer(a / b), "{a} / {b}");
    }
}

#[test]
fn division_by_zero_is_error() {
    for src in ["1 / 0", "0 / 0", "let z = 0\n-5 / z"] {
        assert!(matches!(runtime_failure(src), RuntimeError::DivisionByZero { .. }), "{src}");
    }
}

#[test]
fn integer_overflow_is_error() {
    assert!(matches!(runtime_failure("9223372036854775807 + 1"),
                     RuntimeError::Overflow { .. }));
    assert!(matches!(runtime_failure("let m = -9223372036854775807 - 1\nm / -1"),
                     RuntimeError::Overflow { .. }));
    assert!(matches!(assert_failure("9223372036854775808"),
                     Error::Lex(LexError::IntegerTooLarge { .. })));
}

#[test]
fn strings_concatenate_but_never_convert() {
    assert_eq!(output("print(\"foo\" + \"bar\")"), "foobar\n");
    assert_eq!(output("print(\"n = \" + str(4))"), "n = 4\n");

    assert!(matches!(runtime_failure("\"a\" + 1"), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(runtime_failure("1 + \"a\""), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(runtime_failure("\"a\" - \"b\""), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(runtime_failure("\"a\" < \"b\""), RuntimeError::TypeMismatch { .. }));
}

#[test]
fn equality_rules() {
    assert_eq!(value("\"abc\" == \"abc\""), Value::Integer(1));
    assert_eq!(value("1 == \"1\""), Value::Integer(0));
    assert_eq!(value("1 != \"1\""), Value::Integer(1));
    assert_eq!(value("[1] == [1]"), Value::Integer(0));
    assert_eq!(value("let a = [1]\nlet b = a\na == b"), Value::Integer(1));
    assert_eq!(value("def f() { }\nf == f"), Value::Integer(1));
    assert_eq!(value("def f() { }\ndef g() { }\nf == g"), Value::Integer(0));
    assert_eq!(value("def f() { }\ndef g() { }\nf() == g()"), Value::Integer(1));
}

#[test]
fn let_scoping_and_shadowing() {
    let src = "
        let x = 1
        if (1) { let x = 2 print(x) }
        print(x)
        while (x < 3) { let y = x x = x + 1 }
        print(x)
    ";
    assert_eq!(output(src), "2\n1\n3\n");

    for src in ["if (1) { let inner = 1 }\nprint(inner)",
                "while (0) { }\nlet n = 0\nwhile (n < 1) { let inner = n n = n + 1 }\ninner",
                "for (let k = 0; k < 1; k = k + 1) { let inner = k }\ninner",
                "for (let k = 0; k < 1; k = k + 1) { }\nk",
                "{ let inner = 1 }\ninner"]
    {
        assert!(matches!(runtime_failure(src), RuntimeError::UndefinedVariable { .. }), "{src}");
    }
}

#[test]
fn redeclaring_in_the_same_scope_rebinds() {
    assert_eq!(value("let a = 1\nlet a = a + 1\na"), Value::Integer(2));
}

#[test]
fn assignment_never_declares() {
    let e = runtime_failure("nope = 1");
    assert_eq!(e.to_string(),
               "Error on line 1, column 1: undefined variable: nope");
}

#[test]
fn undefined_variable_names_the_variable() {
    let e = runtime_failure("print(y)");
    assert!(matches!(&e, RuntimeError::UndefinedVariable { name, .. } if name == "y"));
    assert!(e.to_string().contains("undefined variable: y"));
}

#[test]
fn arrays_are_shared_by_reference() {
    assert_eq!(output("let a = [1, 2, 3]\nlet b = a\nb[0] = 9\nprint(a[0])"), "9\n");
    assert_eq!(output("def fill(xs) { push(xs, 4) }\nlet a = [1]\nfill(a)\nprint(a)"),
               "[1, 4]\n");
    assert_eq!(output("let grid = [[0, 0], [0, 0]]\nlet row = grid[1]\nrow[0] = 5\nprint(grid)"),
               "[[0, 0], [5, 0]]\n");
}

#[test]
fn integers_and_strings_are_copied() {
    assert_eq!(output("let a = 1\nlet b = a\nb = 2\nprint(a)"), "1\n");
    assert_eq!(output("let s = \"x\"\nlet t = s\nt = t + \"y\"\nprint(s)"), "x\n");
}

#[test]
fn index_errors() {
    let e = runtime_failure("[1, 2][5]");
    assert!(matches!(e,
                     RuntimeError::IndexOutOfBounds { index: 5,
                                                      length: 2,
                                                      .. }));
    assert!(matches!(runtime_failure("[1, 2][-1]"), RuntimeError::IndexOutOfBounds { .. }));
    assert!(matches!(runtime_failure("let a = []\na[0] = 1"), RuntimeError::IndexOutOfBounds { .. }));
    assert!(matches!(runtime_failure("5[0]"), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(runtime_failure("[1][\"0\"]"), RuntimeError::TypeMismatch { .. }));
}

#[test]
fn recursion() {
    let factorial = "def factorial(n) { if (n < 2) { return 1 } return n * factorial(n - 1) }\n";
    assert_eq!(value(&format!("{factorial}factorial(5)")), Value::Integer(120));
    assert_eq!(value(&format!("{factorial}factorial(0)")), Value::Integer(1));
    assert_eq!(value(&format!("{factorial}factorial(20)")),
               Value::Integer(2_432_902_008_176_640_000));
}

#[test]
fn recursive_calls_resolve_the_name_at_call_time() {
    let src = "
        def count(n) { if (n == 0) { return 0 } return 1 + count(n - 1) }
        let original = count
        def count(n) { return 100 }
        original(3)
    ";
    assert_eq!(value(src), Value::Integer(101));
}

#[test]
fn closures_keep_their_defining_scope() {
    let src = "
        def make_counter() {
            let count = 0
            def next() { count = count + 1 return count }
            return next
        }
        let a = make_counter()
        let b = make_counter()
        a()
        a()
        print(a())
        print(b())
    ";
    assert_eq!(output(src), "3\n1\n");
}

#[test]
fn closures_see_later_changes_to_captured_scope() {
    let src = "
        let base = 1
        def add(n) { return n + base }
        base = 10
        add(5)
    ";
    assert_eq!(value(src), Value::Integer(15));
}

#[test]
fn calls_use_lexical_not_dynamic_scope() {
    let src = "
        let x = \"global\"
        def show() { return x }
        def caller() { let x = \"local\" return show() }
        caller()
    ";
    assert_eq!(value(src), Value::from("global"));
}

#[test]
fn for_loop_matches_while_loop() {
    let for_loop = output("for (let k = 0; k < 3; k = k + 1) { print(k) }");
    let while_loop = output("let k = 0\nwhile (k < 3) { print(k) k = k + 1 }");

    assert_eq!(for_loop, "0\n1\n2\n");
    assert_eq!(for_loop, while_loop);
}

#[test]
fn for_loop_with_outer_counter() {
    assert_eq!(output("let i = 10\nfor (i = 0; i < 2; i = i + 1) { }\nprint(i)"), "2\n");
}

#[test]
fn return_unwinds_nested_blocks() {
    let src = "
        def find(xs, target) {
            for (let i = 0; i < len(xs); i = i + 1) {
                while (1) {
                    if (xs[i] == target) { return i }
                    i = i + 0
                    { return -1 }
                }
            }
            return -2
        }
        print(find([4, 5, 6], 4))
        print(find([4, 5, 6], 9))
        print(find([], 9))
    ";
    assert_eq!(output(src), "0\n-1\n-2\n");
}

#[test]
fn functions_without_return_yield_null() {
    assert_eq!(value("def f() { 1 }\nf()"), Value::Null);
    assert_eq!(value("def f() { return }\nf()"), Value::Null);
    assert_eq!(output("def f() { }\nprint(f())"), "null\n");
}

#[test]
fn return_outside_function_is_error() {
    assert!(matches!(runtime_failure("return 1"),
                     RuntimeError::ReturnOutsideFunction { .. }));
    assert!(matches!(runtime_failure("if (1) { return }"),
                     RuntimeError::ReturnOutsideFunction { .. }));
}

#[test]
fn wrong_function_arity_is_error() {
    let e = runtime_failure("def add(a, b) { return a + b }\nadd(1)");
    assert!(matches!(e,
                     RuntimeError::ArityMismatch { found: 1,
                                                   .. }));
    assert!(e.to_string().contains("'add' expects 2 argument(s), got 1"));

    assert!(matches!(runtime_failure("len(1, 2)"), RuntimeError::ArityMismatch { .. }));
}

#[test]
fn calling_a_non_function_is_error() {
    assert!(matches!(runtime_failure("let x = 3\nx()"),
                     RuntimeError::NotCallable { .. }));
    assert!(matches!(runtime_failure("\"print\"(1)"),
                     RuntimeError::NotCallable { .. }));
}

#[test]
fn conditions_must_be_integers() {
    assert_eq!(output("if (-3) { print(1) } else { print(0) }"), "1\n");
    assert_eq!(output("if (0) { print(1) } else if (2) { print(2) } else { print(3) }"),
               "2\n");
    assert!(matches!(runtime_failure("if (\"yes\") { }"), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(runtime_failure("while ([]) { }"), RuntimeError::TypeMismatch { .. }));
}

#[test]
fn evaluation_order_is_left_to_right() {
    let src = "
        let log = []
        def note(n) { push(log, n) return n }
        note(1) + note(2) * note(3)
        def three(a, b, c) { }
        three(note(4), note(5), note(6))
        print(log)
    ";
    assert_eq!(output(src), "[1, 2, 3, 4, 5, 6]\n");
}

#[test]
fn program_value_is_last_statement() {
    assert_eq!(value(""), Value::Null);
    assert_eq!(value("let x = 5"), Value::Integer(5));
    assert_eq!(value("let x = 5\nx = 6"), Value::Integer(6));
    assert_eq!(value("if (0) { 1 }"), Value::Null);
    assert_eq!(value("if (1) { 1 2 }"), Value::Integer(2));
    assert_eq!(value("def f() { }"), Value::Null);
}

#[test]
fn display_text() {
    assert_eq!(output("print([1, \"two\", [3], []])"), "[1, two, [3], []]\n");
    assert_eq!(output("def f() { }\nprint(f)"), "<function f>\n");
    assert_eq!(output("print(print)"), "<native fn print>\n");
    assert_eq!(output("let xs = [1]\npush(xs, xs)\nprint(xs)"), "[1, [...]]\n");
}

#[test]
fn standard_library() {
    assert_eq!(value("len([1, 2, 3]) + len(\"ab\")"), Value::Integer(5));
    assert_eq!(value("let xs = [1]\npush(xs, 2)\npop(xs) + len(xs)"), Value::Integer(3));
    assert_eq!(value("int(\"41\") + 1"), Value::Integer(42));
    assert_eq!(value("abs(-4) + min(3, 9) + max(3, 9)"), Value::Integer(16));
    assert_eq!(value("type([])"), Value::from("array"));
    assert_eq!(value("type(clock)"), Value::from("native function"));
    assert_eq!(value("let r = random(5, 5)\nr"), Value::Integer(5));
    assert_eq!(value("clock() > 0"), Value::Integer(1));

    assert!(matches!(runtime_failure("len(5)"), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(runtime_failure("pop([])"), RuntimeError::NativeFailure { .. }));
    assert!(matches!(runtime_failure("int(\"x\")"), RuntimeError::NativeFailure { .. }));
}

#[test]
fn natives_can_be_shadowed_and_passed_around() {
    assert_eq!(output("let say = print\nsay(\"hi\")"), "hi\n");
    assert_eq!(value("def len(x) { return 0 }\nlen([1, 2])"), Value::Integer(0));
}

#[test]
fn deep_recursion_reports_stack_overflow() {
    let src = "def down(n) { return down(n + 1) }\ndown(0)";
    let config = Config::default().with_max_call_depth(50);

    match run_with_config(src, &stdlib::registry(), config) {
        Err(e) => {
            assert!(e.is_stack_overflow(), "unexpected error: {e}");
            assert!(e.to_string().contains("call depth exceeded 50"));
        },
        Ok(_) => panic!("unbounded recursion terminated"),
    }
}

#[test]
fn recursion_within_the_limit_succeeds() {
    let src = "def sum(n) { if (n == 0) { return 0 } return n + sum(n - 1) }\nsum(40)";
    let config = Config::default().with_max_call_depth(41);

    let execution = run_with_config(src, &stdlib::registry(), config).unwrap();
    assert_eq!(execution.value, Value::Integer(820));
}

const NESTED_LOOP_RECURSION: &str = "
def f(n) {
    if (n == 0) { return 0 }
    for (let i = 0; i < 1; i = i + 1) {
        while (1) {
            {
                if (1) { return 1 + f(n - 1) }
            }
        }
    }
}
";

#[test]
fn recursion_through_nested_statements_reaches_the_default_limit() {
    assert_eq!(value(&format!("{NESTED_LOOP_RECURSION}f(199)")), Value::Integer(199));
    assert_eq!(value(&format!("{NESTED_LOOP_RECURSION}f(900)")), Value::Integer(900));

    let e = assert_failure(&format!("{NESTED_LOOP_RECURSION}f(5000)"));
    assert!(e.is_stack_overflow(), "unexpected error: {e}");
    assert!(e.to_string().contains("call depth exceeded 1000"));
}

#[test]
fn excessive_nesting_is_rejected_before_execution() {
    let depth = 20_000;
    let src = format!("print(1)\n{}1{}", "(".repeat(depth), ")".repeat(depth));

    match run(&src, &stdlib::registry()) {
        Err(Error::Parse(ParseError::NestingTooDeep { limit, .. })) => {
            assert_eq!(limit, MAX_NESTING_DEPTH);
        },
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("nesting {depth} levels deep was accepted"),
    }
}

#[test]
fn deeply_nested_arrays_are_built_and_released() {
    let src = "let a = []\nlet i = 0\nwhile (i < 200000) { a = [a] i = i + 1 }\n0";
    assert_eq!(value(src), Value::Integer(0));

    let src = "let a = []\nlet i = 0\nwhile (i < 2000) { a = [a] i = i + 1 }\nprint(a)";
    let printed = output(src);
    assert_eq!(printed.len(), 2 * 2001 + 1);
    assert!(printed.starts_with("[[[") && printed.ends_with("]]]\n"));
}

#[test]
fn globals_persist_between_runs() {
    let mut interpreter = Interpreter::new(&stdlib::registry(), Config::default(), Box::new(io::sink()));
    interpreter.run("let counter = 41").unwrap();
    interpreter.run("counter = counter + 1").unwrap();

    assert_eq!(interpreter.globals().get("counter"), Some(Value::Integer(42)));
}

#[test]
fn closure_scopes_are_released_with_the_interpreter() {
    let mut interpreter = Interpreter::new(&stdlib::registry(), Config::default(), Box::new(io::sink()));
    let src = "def make(n) {\n    def get() { return n }\n    return get\n}\nlet counter = make(5)\nmake(6)";
    interpreter.run(src).unwrap();
    assert_eq!(interpreter.run("counter()").unwrap(), Value::Integer(5));

    let Some(Value::Function(closure)) = interpreter.globals().get("counter") else {
        panic!("counter is not a function");
    };
    let scope = closure.env.downgrade();
    drop(closure);
    assert!(scope.upgrade().is_some());

    drop(interpreter);
    assert!(scope.upgrade().is_none());
}

#[test]
fn lex_errors() {
    assert!(matches!(assert_failure("let a = 1 @ 2"),
                     Error::Lex(LexError::UnexpectedCharacter { character: '@', .. })));
    assert!(matches!(assert_failure("print(\"oops)"),
                     Error::Lex(LexError::UnterminatedString { .. })));
}

#[test]
fn parse_errors_stop_before_execution() {
    let e = assert_failure("print(1)\nlet = 2");
    assert!(matches!(e, Error::Parse(ParseError::UnexpectedToken { .. })));
    assert_eq!(e.position().line, 2);

    assert!(matches!(assert_failure("def f( { }"), Error::Parse(_)));
    assert!(matches!(assert_failure("if (1) print(1)"), Error::Parse(_)));
    assert!(matches!(assert_failure("1 = 2"),
                     Error::Parse(ParseError::InvalidAssignmentTarget { .. })));
}

#[test]
fn runtime_errors_stop_execution() {
    let src = "print(1)\nprint(missing)\nprint(2)";
    assert!(matches!(runtime_failure(src), RuntimeError::UndefinedVariable { .. }));
}

#[test]
fn comments_and_semicolons() {
    assert_success("# a comment\nlet a = 1; # trailing\n;; print(a);");
    assert_eq!(output("print(\"# not a comment\")"), "# not a comment\n");
}

#[test]
fn error_positions_point_at_the_offending_code() {
    let e = runtime_failure("let a = 1\n  print(a / 0)");
    assert_eq!(e.position(), Position::new(2, 11));
}
