//! Unit tests for the lexer module.
//!
//! Covers keywords and identifiers, literals, operators, comments, the
//! layout tokens produced from indentation, and error cases.

use super::{
    lexer::tokenize,
    tokens::{Token, TokenKind},
};

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|token| token.kind).collect()
}

#[test]
fn test_tokenize_keywords() {
    let source = "def return if elif else while for in pass break continue and or not None".to_string();
    let tokens = tokenize(source, Some("test.py".to_string())).unwrap();

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Def,
            TokenKind::Return,
            TokenKind::If,
            TokenKind::Elif,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::For,
            TokenKind::In,
            TokenKind::Pass,
            TokenKind::Break,
            TokenKind::Continue,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Not,
            TokenKind::None,
            TokenKind::Newline,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 _underscore CamelCase".to_string();
    let tokens = tokenize(source, Some("test.py".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "bar");
    assert_eq!(tokens[2].value, "baz_123");
    assert_eq!(tokens[3].value, "_underscore");
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].value, "CamelCase");
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 0 100".to_string();
    let tokens = tokenize(source, Some("test.py".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "0");
    assert_eq!(tokens[2].value, "100");
}

#[test]
fn test_tokenize_strings_keep_quotes() {
    let source = r#""hello" 'world' "it's" 'say "hi"'"#.to_string();
    let tokens = tokenize(source, Some("test.py".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "\"hello\"");
    assert_eq!(tokens[1].value, "'world'");
    assert_eq!(tokens[2].value, "\"it's\"");
    assert_eq!(tokens[3].value, "'say \"hi\"'");
}

#[test]
fn test_tokenize_escaped_quote_in_string() {
    let source = r#""quote\"test""#.to_string();
    let tokens = tokenize(source, Some("test.py".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, r#""quote\"test""#);
    assert_eq!(tokens[1].kind, TokenKind::Newline);
}

#[test]
fn test_tokenize_operators() {
    let source = "+ - * / // % == != < > <= >= = << >> & | ^ ~".to_string();
    let tokens = tokenize(source, Some("test.py".to_string())).unwrap();

    assert_eq!(
        kinds(&tokens[..19]),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::SlashSlash,
            TokenKind::Percent,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Assignment,
            TokenKind::ShiftLeft,
            TokenKind::ShiftRight,
            TokenKind::Ampersand,
            TokenKind::Pipe,
            TokenKind::Caret,
            TokenKind::Tilde,
        ]
    );
}

#[test]
fn test_tokenize_compound_operators() {
    let source = "+= -= *= ->".to_string();
    let tokens = tokenize(source, Some("test.py".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::PlusEquals);
    assert_eq!(tokens[1].kind, TokenKind::MinusEquals);
    assert_eq!(tokens[2].kind, TokenKind::StarEquals);
    assert_eq!(tokens[3].kind, TokenKind::Arrow);
}

#[test]
fn test_tokenize_comments() {
    let source = "x = 5 # this is a comment\n# a whole line\ny = 10".to_string();
    let tokens = tokenize(source, Some("test.py".to_string())).unwrap();

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Number,
            TokenKind::Newline,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Number,
            TokenKind::Newline,
            TokenKind::EOF,
        ]
    );
    assert_eq!(tokens[4].value, "y");
}

#[test]
fn test_tokenize_indented_block() {
    let source = "if x:\n    y = 1\n\n    z = 2\nw = 3\n".to_string();
    let tokens = tokenize(source, Some("test.py".to_string())).unwrap();

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::If,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::Newline,
            TokenKind::Indent,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Number,
            TokenKind::Newline,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Number,
            TokenKind::Newline,
            TokenKind::Dedent,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Number,
            TokenKind::Newline,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_closes_blocks_at_eof() {
    let source = "def f():\n  if x:\n    pass".to_string();
    let tokens = tokenize(source, Some("test.py".to_string())).unwrap();

    let tail = kinds(&tokens[tokens.len() - 4..]);
    assert_eq!(
        tail,
        vec![
            TokenKind::Newline,
            TokenKind::Dedent,
            TokenKind::Dedent,
            TokenKind::EOF
        ]
    );
}

#[test]
fn test_tokenize_inconsistent_indentation() {
    let source = "if x:\n    y = 1\n  z = 2\n".to_string();
    let error = tokenize(source, Some("test.py".to_string())).unwrap_err();

    assert_eq!(error.get_error_name(), "InconsistentIndentation");
}

#[test]
fn test_tokenize_newlines_inside_brackets() {
    let source = "xs = [1,\n      2]\n".to_string();
    let tokens = tokenize(source, Some("test.py".to_string())).unwrap();

    assert!(!tokens[..tokens.len() - 2]
        .iter()
        .any(|token| token.kind == TokenKind::Newline || token.kind == TokenKind::Indent));
    assert_eq!(tokens[tokens.len() - 2].kind, TokenKind::Newline);
}

#[test]
fn test_tokenize_unrecognized_token() {
    let source = "x = @".to_string();
    let error = tokenize(source, Some("test.py".to_string())).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 4);
}

#[test]
fn test_tokenize_spans() {
    let source = "abc = 12".to_string();
    let tokens = tokenize(source, Some("test.py".to_string())).unwrap();

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[0].span.end.0, 3);
    assert_eq!(tokens[2].span.start.0, 6);
    assert_eq!(*tokens[2].span.start.1, "test.py");
}

#[test]
fn test_tokenize_empty_source() {
    let tokens = tokenize(String::new(), None).unwrap();

    assert_eq!(kinds(&tokens), vec![TokenKind::EOF]);
    assert_eq!(*tokens[0].span.start.1, "shell");
}
