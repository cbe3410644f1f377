//! Unit tests for the parser module.
//!
//! This module contains tests for parsing language constructs including:
//! - Assignments, compound assignments and element assignments
//! - Operator precedence
//! - Function declarations with and without annotations
//! - Control flow statements and block layout
//! - Syntax errors

use std::rc::Rc;

use crate::{
    ast::{
        ast::{ExprKind, Operator, StmtKind},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
    type_checker::program::Program,
};

use super::parser::parse;

fn parse_source(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source.to_string(), Some("test.py".to_string()))?;
    parse(tokens, Rc::new("test.py".to_string()))
}

#[test]
fn test_parse_assignment() {
    let program = parse_source("x = 42\ny = x + 1\n").unwrap();

    assert_eq!(program.body.statements.len(), 2);
    let y = program.resolve(program.root, "y").unwrap();
    assert_eq!(program.definition_type(y).to_string(), "int");
}

#[test]
fn test_parse_empty_token_stream() {
    let program = parse(vec![], Rc::new("test.py".to_string())).unwrap();
    assert!(program.body.is_empty());
}

#[test]
fn test_parse_compound_assignment() {
    let program = parse_source("x = 1\nx += 2\n").unwrap();

    match &program.body.statements[1].kind {
        StmtKind::Assignment { name, value, .. } => {
            assert_eq!(name, "x");
            assert!(matches!(
                value.kind,
                ExprKind::Binary {
                    operator: Operator::Add,
                    ..
                }
            ));
        }
        other => panic!("expected an assignment, got {:?}", other),
    }
}

#[test]
fn test_parse_precedence() {
    let program = parse_source("x = 1 + 2 * 3\n").unwrap();

    let StmtKind::Assignment { value, .. } = &program.body.statements[0].kind else {
        panic!("expected an assignment");
    };
    let ExprKind::Binary {
        operator, right, ..
    } = &value.kind
    else {
        panic!("expected a binary expression");
    };

    assert_eq!(*operator, Operator::Add);
    assert!(matches!(
        right.kind,
        ExprKind::Binary {
            operator: Operator::Multiply,
            ..
        }
    ));
}

#[test]
fn test_parse_not_binds_looser_than_comparison() {
    let program = parse_source("x = 1\ny = not x == 2\n").unwrap();

    let StmtKind::Assignment { value, .. } = &program.body.statements[1].kind else {
        panic!("expected an assignment");
    };
    let ExprKind::Unary { operator, operand } = &value.kind else {
        panic!("expected a unary expression");
    };

    assert_eq!(*operator, Operator::Not);
    assert!(operand.is_binary());
}

#[test]
fn test_parse_modulus_is_a_call() {
    let program = parse_source("x = 7 % 2\n").unwrap();

    let StmtKind::Assignment { value, .. } = &program.body.statements[0].kind else {
        panic!("expected an assignment");
    };
    assert!(matches!(&value.kind, ExprKind::Call { name, .. } if name == "modulus"));
}

#[test]
fn test_parse_index_assignment() {
    let program = parse_source("xs = [1, 2]\nxs[0] = 5\n").unwrap();

    assert!(matches!(
        program.body.statements[1].kind,
        StmtKind::IndexAssignment { .. }
    ));
}

#[test]
fn test_parse_if_elif_else() {
    let source = "x = 3\nif x < 1:\n    x = 1\nelif x < 2:\n    x = 2\nelse:\n    pass\n";
    let program = parse_source(source).unwrap();

    match &program.body.statements[1].kind {
        StmtKind::If {
            body,
            elifs,
            else_body,
            ..
        } => {
            assert_eq!(body.statements.len(), 1);
            assert_eq!(elifs.len(), 1);
            assert!(else_body.is_some());
        }
        other => panic!("expected an if statement, got {:?}", other),
    }
}

#[test]
fn test_parse_single_line_suite() {
    let program = parse_source("if 1: pass\nx = 1\n").unwrap();
    assert_eq!(program.body.statements.len(), 2);
}

#[test]
fn test_parse_while_with_break_and_continue() {
    let source = "i = 0\nwhile i < 10:\n    i += 1\n    if i == 2:\n        continue\n    break\n";
    let program = parse_source(source).unwrap();

    let StmtKind::While { body, .. } = &program.body.statements[1].kind else {
        panic!("expected a while loop");
    };
    assert_eq!(body.statements.len(), 3);
    assert!(matches!(body.statements[2].kind, StmtKind::Break));
}

#[test]
fn test_parse_for_range() {
    let program = parse_source("for i in range(1, 5):\n    print(i)\n").unwrap();

    match &program.body.statements[0].kind {
        StmtKind::For {
            variable,
            definition,
            ..
        } => {
            assert_eq!(variable, "i");
            assert_eq!(program.definition_type(*definition).to_string(), "int");
        }
        other => panic!("expected a for loop, got {:?}", other),
    }
}

#[test]
fn test_parse_annotated_function() {
    let source = "def add(a: int, b: int) -> int:\n    return a + b\n";
    let program = parse_source(source).unwrap();

    let function = &program.functions[0];
    assert_eq!(function.name, "add");
    assert_eq!(function.params.len(), 2);
    assert_eq!(function.params[0].param_type.to_string(), "int");
    assert_eq!(function.return_type.to_string(), "int");
    assert!(function.is_top_level());
}

#[test]
fn test_parse_list_annotations() {
    let source = "def first(xs: list[int]) -> int:\n    return xs[0]\ndef size(xs: str[]) -> int: return len(xs)\n";
    let program = parse_source(source).unwrap();

    assert_eq!(
        program.functions[0].params[0].param_type.to_string(),
        "std::vector<int>"
    );
    assert_eq!(
        program.functions[1].params[0].param_type.to_string(),
        "std::vector<std::string>"
    );
}

#[test]
fn test_parse_inferred_return() {
    let program = parse_source("def greet():\n    return \"hi\"\n").unwrap();
    assert!(matches!(program.functions[0].return_type, Type::Text));

    let program = parse_source("def noop():\n    pass\n").unwrap();
    assert!(program.functions[0].return_type.is_void());
}

#[test]
fn test_parse_nested_blocks_close_at_eof() {
    let program = parse_source("if 1:\n    if 2:\n        pass").unwrap();

    let StmtKind::If { body, .. } = &program.body.statements[0].kind else {
        panic!("expected an if statement");
    };
    assert!(matches!(body.statements[0].kind, StmtKind::If { .. }));
}

#[test]
fn test_parse_missing_expression() {
    let error = parse_source("x = \n").unwrap_err();
    assert!(matches!(error.get_kind(), ErrorImpl::UnexpectedToken { .. }));
}

#[test]
fn test_parse_missing_indent() {
    let error = parse_source("if 1:\npass\n").unwrap_err();
    assert!(matches!(
        error.get_kind(),
        ErrorImpl::UnexpectedTokenDetailed { .. }
    ));
}

#[test]
fn test_parse_assign_to_call() {
    let error = parse_source("print(1) = 2\n").unwrap_err();
    assert!(matches!(
        error.get_kind(),
        ErrorImpl::UnexpectedTokenDetailed { .. }
    ));
}

#[test]
fn test_parse_none_parameter() {
    let error = parse_source("def f(a: None):\n    pass\n").unwrap_err();
    assert!(matches!(
        error.get_kind(),
        ErrorImpl::UnexpectedTokenDetailed { token, .. } if token == "None"
    ));
}

#[test]
fn test_parse_trailing_tokens_on_line() {
    let error = parse_source("x = 1 2\n").unwrap_err();
    assert!(matches!(
        error.get_kind(),
        ErrorImpl::UnexpectedToken { .. } | ErrorImpl::UnexpectedTokenDetailed { .. }
    ));
}
