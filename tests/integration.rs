//! Integration tests for the full pipeline

use monkey::lexer::{lex, TokenKind};
use monkey::repl::{Reply, Session};
use monkey::{interpret, interpret_in, Environment, ParseErrors, Reporter, SourceFile};
use pretty_assertions::assert_eq;

const PROGRAM: &str = r#"
let newAdder = fn(x) {
    fn(y) { x + y };
};

let addTwo = newAdder(2);

let greet = fn(name) {
    if (len(name) > 0) {
        return "hello " + name;
    }
    "hello stranger"
};

let map_sum = fn(f, a, b) { f(a) + f(b) };

if (map_sum(addTwo, 1, 2) == 7) {
    greet("monkey")
} else {
    greet("")
}
"#;

#[test]
fn test_lex_program() {
    let tokens = lex(PROGRAM);
    assert!(tokens.len() > 50, "expected many tokens, got {}", tokens.len());
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    assert!(tokens.iter().all(|t| t.kind != TokenKind::Illegal));
}

#[test]
fn test_parse_program() {
    let (program, errors) = monkey::parse(PROGRAM);
    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(program.len(), 5);
}

#[test]
fn test_interpret_program() {
    let value = interpret(PROGRAM).expect("program parses");
    assert_eq!(value.inspect(), "hello monkey");
}

#[test]
fn test_rendered_program_evaluates_the_same() {
    let (program, errors) = monkey::parse(PROGRAM);
    assert!(errors.is_empty());
    let rendered = program.to_string();
    let value = interpret(&rendered).expect("rendered program parses");
    assert_eq!(value.inspect(), "hello monkey");
}

#[test]
fn test_interpret_reports_all_parse_errors() {
    let report = interpret("let x 5; let = 10; let 838383;").unwrap_err();
    assert_eq!(report.to_string(), "found 3 parse error(s)");

    let errors = report
        .downcast_ref::<ParseErrors>()
        .expect("parse errors are preserved");
    let messages: Vec<_> = errors.errors.iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        vec![
            "expected next token to be =, got INT instead",
            "expected next token to be IDENT, got = instead",
            "expected next token to be IDENT, got INT instead",
        ]
    );
}

#[test]
fn test_runtime_error_is_a_value() {
    let value = interpret("let a = 1; a + true; a").expect("program parses");
    assert!(value.is_error());
    assert_eq!(value.inspect(), "ERROR: type mismatch: INTEGER + BOOLEAN");
}

#[test]
fn test_interpret_in_shares_environment() {
    let env = Environment::new();
    interpret_in("let counter = 41;", &env).unwrap();
    let value = interpret_in("counter + 1", &env).unwrap();
    assert_eq!(value.as_int(), Some(42));
}

#[test]
fn test_reporter_renders_source_context() {
    let source = "let x 5;";
    let (_, errors) = monkey::parse(source);

    let mut reporter = Reporter::new(SourceFile::new("bad.mk", source));
    reporter.extend(errors);
    assert!(reporter.has_errors());
    assert_eq!(reporter.error_count(), 1);

    let rendered = reporter.render_all();
    assert_eq!(rendered.len(), 1);
    assert!(rendered[0].contains("expected next token to be =, got INT instead"));
    assert!(rendered[0].contains("bad.mk"));
}

#[test]
fn test_repl_session() {
    let mut session = Session::new();
    let lines = [
        "let newAdder = fn(x) { fn(y) { x + y } };",
        "let addTwo = newAdder(2);",
        "addTwo(3)",
        "len(\"monkey\")",
        "foobar",
        "let x 5;",
    ];
    let replies: Vec<_> = lines.iter().map(|line| session.handle_line(line)).collect();
    assert_eq!(
        replies,
        vec![
            Reply::Print("null".into()),
            Reply::Print("null".into()),
            Reply::Print("5".into()),
            Reply::Print("6".into()),
            Reply::Print("ERROR: identifier not found: foobar".into()),
            Reply::Print("parser errors:\n\texpected next token to be =, got INT instead".into()),
        ]
    );
    assert_eq!(session.handle_line(":quit"), Reply::Quit);
}

#[test]
fn test_repl_error_does_not_poison_session() {
    let mut session = Session::new();
    session.handle_line("let a = 2;");
    session.handle_line("a + true");
    assert_eq!(session.handle_line("a * 3"), Reply::Print("6".into()));
}

#[test]
fn test_top_level_return_in_repl_line() {
    let mut session = Session::new();
    assert_eq!(
        session.handle_line("return 7; 8"),
        Reply::Print("7".into())
    );
    assert_eq!(session.handle_line("9"), Reply::Print("9".into()));
}
