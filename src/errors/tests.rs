//! Unit tests for error handling.
//!
//! This module contains tests for error kinds, tips and the internal
//! error relabelling used by the generator.

use crate::errors::errors::{At, Error, ErrorImpl, ErrorTip};
use crate::Position;
use std::rc::Rc;

fn position() -> Position {
    Position(0, Rc::new("test.py".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position(10, Rc::new("test.py".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 10);
}

#[test]
fn test_type_conflict_error() {
    let error = Error::new(
        ErrorImpl::TypeConflict {
            expected: "int".to_string(),
            received: "std::string".to_string(),
        },
        position(),
    );

    assert_eq!(error.get_error_name(), "TypeConflict");
    assert_eq!(
        error.get_tip().to_string(),
        "Expected type `int`, received `std::string`"
    );
}

#[test]
fn test_semantic_error_names() {
    let cases = vec![
        (
            ErrorImpl::DuplicateDefinition {
                name: "f".to_string(),
                previous: "function".to_string(),
            },
            "DuplicateDefinition",
        ),
        (
            ErrorImpl::UndefinedFunction {
                name: "f".to_string(),
            },
            "UndefinedFunction",
        ),
        (
            ErrorImpl::NotAFunction {
                name: "x".to_string(),
            },
            "NotAFunction",
        ),
        (
            ErrorImpl::ArgumentMismatch {
                function: "f".to_string(),
                received: "int".to_string(),
            },
            "ArgumentMismatch",
        ),
        (
            ErrorImpl::UndefinedVariable {
                name: "x".to_string(),
            },
            "UndefinedVariable",
        ),
        (
            ErrorImpl::ConflictingRedeclaration {
                name: "x".to_string(),
                declared: "int".to_string(),
            },
            "ConflictingRedeclaration",
        ),
        (
            ErrorImpl::VoidFunctionReturnsValue {
                function: "f".to_string(),
            },
            "VoidFunctionReturnsValue",
        ),
        (ErrorImpl::ReturnOutsideFunction, "ReturnOutsideFunction"),
        (
            ErrorImpl::NotIterable {
                type_: "int".to_string(),
            },
            "NotIterable",
        ),
        (
            ErrorImpl::NoLength {
                type_: "int".to_string(),
            },
            "NoLength",
        ),
        (ErrorImpl::EmptyUntypedList, "EmptyUntypedList"),
        (
            ErrorImpl::ListTypeMismatch {
                expected: "int".to_string(),
                received: "std::string".to_string(),
            },
            "ListTypeMismatch",
        ),
        (
            ErrorImpl::Unsupported {
                feature: "range".to_string(),
            },
            "Unsupported",
        ),
        (ErrorImpl::UndeclaredType { name: None }, "UndeclaredType"),
    ];

    for (kind, name) in cases {
        let error = Error::new(kind, position());
        assert_eq!(error.get_error_name(), name);
        assert!(!error.is_internal());
    }
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        position(),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_undeclared_type_tip_names_binding() {
    let error = Error::new(
        ErrorImpl::UndeclaredType {
            name: Some("a".to_string()),
        },
        position(),
    );

    assert_eq!(
        error.get_tip().to_string(),
        "The type of `a` could not be inferred"
    );
}

#[test]
fn test_into_internal() {
    let error = Error::new(ErrorImpl::UndeclaredType { name: None }, position()).into_internal();

    assert!(error.is_internal());
    assert_eq!(error.get_error_name(), "InternalError");

    // Relabelling twice keeps the original message
    let again = error.clone().into_internal();
    assert_eq!(again.get_kind(), error.get_kind());
}

#[test]
fn test_at_attaches_position() {
    let result: Result<(), ErrorImpl> = Err(ErrorImpl::EmptyUntypedList);
    let error = result
        .at(&Position(7, Rc::new("test.py".to_string())))
        .unwrap_err();

    assert_eq!(error.get_error_name(), "EmptyUntypedList");
    assert_eq!(error.get_position().0, 7);
}
