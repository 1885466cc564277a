use kiesel::expr::EvalErr;
use kiesel::interpreter::{Config, InterpretErr, Interpreter};
use kiesel::parser::ParseErr;
use kiesel::scanner::LexErr;

#[test]
fn undefined_variable() {
    let mut interp = Interpreter::new();
    let err = interp.run("x = 1\ny = z + 1").unwrap_err();
    match err {
        InterpretErr::Eval(EvalErr::UndefinedVariable { name, line }) => {
            assert_eq!(name, "z");
            assert_eq!(line, 2);
        }
        x => panic!("{x:?} should not be reported here."),
    }
    assert_eq!(interp.get_global("x"), Some(1.0));
    assert_eq!(interp.get_global("y"), None);
}

#[test]
fn division_by_zero_keeps_bindings() {
    let mut interp = Interpreter::new();
    interp.run("a = 10").unwrap();

    let err = interp.run("b = a / 0").unwrap_err();
    assert_eq!(err, InterpretErr::Eval(EvalErr::DivisionByZero { line: 1 }));

    let err = interp.run("b = a % (5 - 5)").unwrap_err();
    assert_eq!(err, InterpretErr::Eval(EvalErr::ModuloByZero { line: 1 }));

    assert_eq!(interp.get_global("a"), Some(10.0));
    assert_eq!(interp.run("print(a)").unwrap(), vec!["10"]);
}

#[test]
fn nan_is_an_invalid_operand() {
    let mut interp = Interpreter::new();
    let err = interp.run("x = (0 - 8) ** 0.5").unwrap_err();
    assert!(matches!(err, InterpretErr::Eval(EvalErr::InvalidOperand { .. })));
}

#[test]
fn infinite_loop_is_capped() {
    let mut interp = Interpreter::new();
    let err = interp.run("n = 0\nwhile (1) { n = n + 1 }").unwrap_err();
    assert_eq!(err, InterpretErr::Eval(EvalErr::LoopLimit { limit: 10_000, line: 2 }));
    assert_eq!(interp.get_global("n"), Some(10_000.0));

    let err = interp.run("while (1) { }").unwrap_err();
    assert!(matches!(err, InterpretErr::Eval(EvalErr::LoopLimit { .. })));
}

#[test]
fn loop_limit_is_per_loop_execution() {
    let mut interp = Interpreter::with_config(Config { max_loop_iterations: 3 });
    let code = "
i = 0
while (i < 3) {
    j = 0
    while (j < 3) { j = j + 1 }
    i = i + 1
}
";
    interp.run(code).unwrap();
    assert_eq!(interp.get_global("i"), Some(3.0));

    let err = interp.run("k = 0 while (k < 4) { k = k + 1 }").unwrap_err();
    assert_eq!(err, InterpretErr::Eval(EvalErr::LoopLimit { limit: 3, line: 1 }));
}

#[test]
fn partial_output_survives_errors() {
    let mut interp = Interpreter::new();
    let mut out = vec![];
    let err = interp.run_into("print(1) print(2) print(nope)", &mut out).unwrap_err();
    assert_eq!(out, vec!["1", "2"]);
    assert_eq!(err.line(), 1);
}

#[test]
fn lex_error() {
    let mut interp = Interpreter::new();
    let err = interp.run("x = 1\ny = 2 @ 3").unwrap_err();
    assert_eq!(err, InterpretErr::Lex(LexErr::UnexpectedChar { ch: '@', line: 2 }));
    // Nothing runs when the input does not lex.
    assert_eq!(interp.get_global("x"), None);
}

#[test]
fn missing_paren_after_if() {
    let mut interp = Interpreter::new();
    match interp.run("if 1 > 0 { print(1) }").unwrap_err() {
        InterpretErr::Parse(ParseErr::Expected { expected, found, line }) => {
            assert!(expected.contains("'('"));
            assert_eq!(found, "1");
            assert_eq!(line, 1);
        }
        x => panic!("{x:?} should not be reported here."),
    }
}

#[test]
fn error_messages_carry_lines() {
    let mut interp = Interpreter::new();
    let err = interp.run("\n\nprint(q)").unwrap_err();
    assert_eq!(err.to_string(), "[line 3] Undefined variable 'q'.");

    let err = interp.run("x = 1 +").unwrap_err();
    assert_eq!(err.to_string(), "[line 1] Expected expression but got 'end of input'.");
}

#[test]
fn deep_nesting_is_a_parse_error() {
    let mut interp = Interpreter::new();
    let nested = [
        format!("x = {}1", "-".repeat(100_000)),
        format!("x = {}1{}", "(".repeat(100_000), ")".repeat(100_000)),
        format!("x = 2{}", " ** 2".repeat(100_000)),
        format!("{}{}", "{".repeat(100_000), "}".repeat(100_000)),
        format!("if (1) {{ }}{}", " else if (1) { }".repeat(100_000)),
        format!("x = 1{}", " + 1".repeat(100_000)),
    ];

    for code in &nested {
        match interp.run(code).unwrap_err() {
            InterpretErr::Parse(ParseErr::TooDeep { line, .. }) => assert_eq!(line, 1),
            x => panic!("{x:?} should not be reported here."),
        }
    }

    // The session survives and keeps working.
    interp.run("y = 2").unwrap();
    assert_eq!(interp.get_global("y"), Some(2.0));
}

#[test]
fn moderate_nesting_is_fine() {
    let mut interp = Interpreter::new();
    interp
        .run(&format!("x = {}1{}", "(".repeat(200), ")".repeat(200)))
        .unwrap();
    assert_eq!(interp.get_global("x"), Some(1.0));

    interp.run(&format!("s = 0{}", " + 1".repeat(500))).unwrap();
    assert_eq!(interp.get_global("s"), Some(500.0));
}
