//! Lexer tests

use monkey::lexer::{lex, Lexer, TokenKind};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn kinds_and_literals(source: &str) -> Vec<(TokenKind, String)> {
    lex(source)
        .into_iter()
        .map(|t| (t.kind, t.literal))
        .collect()
}

#[test]
fn test_lex_empty() {
    let tokens = lex("");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
    assert_eq!(tokens[0].literal, "");
}

#[test]
fn test_lex_whitespace() {
    let tokens = lex("   \t\n\r  ");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
}

#[test]
fn test_lex_single_char_tokens() {
    use TokenKind::*;
    let kinds: Vec<_> = lex("=+(){},;").into_iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![Assign, Plus, LParen, RParen, LBrace, RBrace, Comma, Semicolon, Eof]
    );
}

#[test]
fn test_lex_program() {
    use TokenKind::*;

    let source = r#"let five = 5;
let ten = 10;

let add = fn(x, y) {
  x + y;
};

let result = add(five, ten);
!-/*5;
5 < 10 > 5;

if (5 < 10) {
    return true;
} else {
    return false;
}

10 == 10;
10 != 9;
"foobar"
"foo bar"
"#;

    let expected: Vec<(TokenKind, &str)> = vec![
        (Let, "let"),
        (Ident, "five"),
        (Assign, "="),
        (Int, "5"),
        (Semicolon, ";"),
        (Let, "let"),
        (Ident, "ten"),
        (Assign, "="),
        (Int, "10"),
        (Semicolon, ";"),
        (Let, "let"),
        (Ident, "add"),
        (Assign, "="),
        (Function, "fn"),
        (LParen, "("),
        (Ident, "x"),
        (Comma, ","),
        (Ident, "y"),
        (RParen, ")"),
        (LBrace, "{"),
        (Ident, "x"),
        (Plus, "+"),
        (Ident, "y"),
        (Semicolon, ";"),
        (RBrace, "}"),
        (Semicolon, ";"),
        (Let, "let"),
        (Ident, "result"),
        (Assign, "="),
        (Ident, "add"),
        (LParen, "("),
        (Ident, "five"),
        (Comma, ","),
        (Ident, "ten"),
        (RParen, ")"),
        (Semicolon, ";"),
        (Bang, "!"),
        (Minus, "-"),
        (Slash, "/"),
        (Asterisk, "*"),
        (Int, "5"),
        (Semicolon, ";"),
        (Int, "5"),
        (Lt, "<"),
        (Int, "10"),
        (Gt, ">"),
        (Int, "5"),
        (Semicolon, ";"),
        (If, "if"),
        (LParen, "("),
        (Int, "5"),
        (Lt, "<"),
        (Int, "10"),
        (RParen, ")"),
        (LBrace, "{"),
        (Return, "return"),
        (True, "true"),
        (Semicolon, ";"),
        (RBrace, "}"),
        (Else, "else"),
        (LBrace, "{"),
        (Return, "return"),
        (False, "false"),
        (Semicolon, ";"),
        (RBrace, "}"),
        (Int, "10"),
        (Eq, "=="),
        (Int, "10"),
        (Semicolon, ";"),
        (Int, "10"),
        (NotEq, "!="),
        (Int, "9"),
        (Semicolon, ";"),
        (String, "foobar"),
        (String, "foo bar"),
        (Eof, ""),
    ];

    let expected: Vec<(TokenKind, std::string::String)> = expected
        .into_iter()
        .map(|(kind, literal)| (kind, literal.to_string()))
        .collect();
    assert_eq!(kinds_and_literals(source), expected);
}

#[test]
fn test_lex_two_char_operators_need_adjacency() {
    use TokenKind::*;
    let kinds: Vec<_> = lex("= = ! =").into_iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![Assign, Assign, Bang, Assign, Eof]);
}

#[test]
fn test_lex_identifiers_have_no_digits() {
    use TokenKind::*;
    let tokens = kinds_and_literals("x1 foo_bar");
    assert_eq!(tokens[0], (Ident, "x".to_string()));
    assert_eq!(tokens[1], (Int, "1".to_string()));
    assert_eq!(tokens[2], (Ident, "foo_bar".to_string()));
}

#[test]
fn test_lex_keyword_prefix_is_identifier() {
    let tokens = lex("lettuce iffy fnord");
    assert!(tokens[..3].iter().all(|t| t.kind == TokenKind::Ident));
    assert_eq!(tokens[0].literal, "lettuce");
}

#[test]
fn test_lex_illegal() {
    let tokens = lex("5 @ 6");
    assert_eq!(tokens[1].kind, TokenKind::Illegal);
    assert_eq!(tokens[1].literal, "@");
    assert_eq!(tokens[2].kind, TokenKind::Int);
}

#[test]
fn test_lex_string_escapes() {
    let tokens = lex(r#""a \"quoted\" word\n""#);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].literal, "a \"quoted\" word\n");
    assert_eq!(tokens[1].kind, TokenKind::Eof);
}

#[test]
fn test_lex_unterminated_string_runs_to_end() {
    let tokens = lex("\"abc def");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].literal, "abc def");
}

#[test]
fn test_lex_empty_string() {
    let tokens = lex(r#""""#);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].literal, "");
}

#[test]
fn test_next_token_after_eof() {
    let mut lexer = Lexer::new("");
    for _ in 0..5 {
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }
}

proptest! {
    #[test]
    fn prop_integer_literals_lex_whole(n in any::<u64>()) {
        let text = n.to_string();
        let tokens = lex(&text);
        prop_assert_eq!(tokens.len(), 2);
        prop_assert_eq!(tokens[0].kind, TokenKind::Int);
        prop_assert_eq!(&tokens[0].literal, &text);
    }

    #[test]
    fn prop_identifiers_lex_whole(name in "[a-zA-Z_]{1,12}") {
        let tokens = lex(&name);
        prop_assert_eq!(tokens.len(), 2);
        prop_assert_eq!(&tokens[0].literal, &name);
        prop_assert!(tokens[0].kind == TokenKind::Ident || tokens[0].kind.is_keyword());
    }

    #[test]
    fn prop_lexing_always_ends_with_eof(source in "\\PC{0,64}") {
        let tokens = lex(&source);
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        prop_assert_eq!(
            tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(),
            1
        );
    }
}
