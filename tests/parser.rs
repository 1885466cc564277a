use kiesel::expr::{BinOp, Expr, UnOp};
use kiesel::inspect::{render_ast, render_tokens};
use kiesel::parser::ParseErr;
use kiesel::statement::{Program, Stmt};
use kiesel::token::TokenType;
use kiesel::{parse, tokenize};

fn parsed(code: &str) -> Result<Program, ParseErr> {
    parse(&tokenize(code).unwrap())
}

fn num(x: f64) -> Box<Expr> {
    Box::new(Expr::Number(x))
}

#[test]
fn multiplication_binds_tighter() {
    let program = parsed("1 + 2 * 3").unwrap();
    assert_eq!(
        program,
        vec![Stmt::Expr(Box::new(Expr::Binary(
            BinOp::Add,
            num(1.0),
            Box::new(Expr::Binary(BinOp::Mul, num(2.0), num(3.0), 1)),
            1,
        )))]
    );
}

#[test]
fn power_nests_to_the_right() {
    let program = parsed("2 ** 3 ** 2").unwrap();
    let Stmt::Expr(expr) = &program[0] else {
        panic!("expected an expression statement");
    };
    let Expr::Binary(BinOp::Pow, base, exponent, _) = &**expr else {
        panic!("expected a power");
    };
    assert_eq!(**base, Expr::Number(2.0));
    assert!(matches!(**exponent, Expr::Binary(BinOp::Pow, _, _, _)));
}

#[test]
fn comparison_operators() {
    let ops = [
        ("<", BinOp::Less),
        ("<=", BinOp::LessEqual),
        (">", BinOp::Greater),
        (">=", BinOp::GreaterEqual),
        ("==", BinOp::Equal),
        ("!=", BinOp::NotEqual),
    ];
    for (src, op) in ops {
        let program = parsed(&format!("a {src} b")).unwrap();
        match &program[0] {
            Stmt::Expr(expr) => assert!(matches!(**expr, Expr::Binary(found, _, _, 1) if found == op)),
            x => panic!("{x:?} is not an expression"),
        }
    }
}

#[test]
fn grouping_and_unary() {
    let program = parsed("-(x)").unwrap();
    assert_eq!(
        program,
        vec![Stmt::Expr(Box::new(Expr::Unary(
            UnOp::Neg,
            Box::new(Expr::Grouping(Box::new(Expr::Variable("x".into(), 1)))),
            1,
        )))]
    );
}

#[test]
fn statements() {
    let program = parsed("x = 1; print(x)\nwhile (x < 3) { x = x + 1 }\n{ }").unwrap();
    assert_eq!(program.len(), 4);
    assert!(matches!(program[0], Stmt::Assign(..)));
    assert!(matches!(program[1], Stmt::Print(_)));
    assert!(matches!(&program[2], Stmt::While(_, body, 2) if body.len() == 1));
    assert_eq!(program[3], Stmt::Block(vec![]));
}

#[test]
fn if_with_else() {
    let program = parsed("if (a) { print(1) } else { print(2) print(3) }").unwrap();
    match &program[0] {
        Stmt::If(_, then, Some(other)) => {
            assert_eq!(then.len(), 1);
            assert_eq!(other.len(), 2);
        }
        x => panic!("{x:?} is not an if/else"),
    }
}

#[test]
fn parsing_is_deterministic() {
    let code = "a = 1\nwhile (a < 10) { if (a % 2 == 0) { print(a) } a = a + 1 }";
    assert_eq!(parsed(code).unwrap(), parsed(code).unwrap());
}

#[test]
fn unclosed_brace() {
    let err = parsed("while (1) {\n x = 1\n").unwrap_err();
    assert_eq!(
        err,
        ParseErr::Unclosed {
            open: TokenType::LeftBrace,
            close: TokenType::RightBrace,
            open_line: 1,
            found: "end of input".into(),
            line: 3,
        }
    );
}

#[test]
fn unmatched_closing_brace() {
    let err = parsed("x = 1 }").unwrap_err();
    assert_eq!(err, ParseErr::UnmatchedClose { close: TokenType::RightBrace, line: 1 });
}

#[test]
fn unclosed_paren() {
    let err = parsed("print((1 + 2)").unwrap_err();
    assert!(matches!(err, ParseErr::Unclosed { open: TokenType::LeftParen, close: TokenType::RightParen, .. }));
}

#[test]
fn missing_paren_after_while() {
    let err = parsed("while x < 3 { }").unwrap_err();
    assert!(matches!(err, ParseErr::Expected { expected: "'(' after 'while'", .. }));
}

#[test]
fn missing_operand() {
    let err = parsed("x = 2 *\ny = 1").unwrap_err();
    assert!(matches!(err, ParseErr::Expected { expected: "expression", line: 2, .. }));
}

#[test]
fn body_must_be_a_block() {
    let err = parsed("if (1) print(1)").unwrap_err();
    assert!(matches!(err, ParseErr::Expected { expected: "'{'", .. }));
}

#[test]
fn inspectors() {
    let tokens = tokenize("x = 2 ** 3").unwrap();
    let rendered = render_tokens(&tokens);
    assert_eq!(rendered.lines().count(), 6);
    assert!(rendered.lines().next().unwrap().starts_with("IDENTIFIER"));
    assert!(rendered.contains("**"));

    let program = parse(&tokens).unwrap();
    assert_eq!(
        render_ast(&program),
        "Assignment x\n  BinaryOp **\n    NumberLiteral 2\n    NumberLiteral 3\n"
    );
}
