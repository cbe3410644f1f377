use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Whether this error reports a broken invariant of the generator rather
    /// than a problem in the compiled program.
    pub fn is_internal(&self) -> bool {
        matches!(self.internal_error, ErrorImpl::InternalError { .. })
    }

    /// Re-labels an error raised while generating output. Construction has
    /// already accepted the tree at that point, so any failure is a bug.
    pub fn into_internal(self) -> Self {
        if self.is_internal() {
            return self;
        }

        Error {
            internal_error: ErrorImpl::InternalError {
                message: self.internal_error.to_string(),
            },
            position: self.position,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::InconsistentIndentation { .. } => "InconsistentIndentation",
            ErrorImpl::DuplicateDefinition { .. } => "DuplicateDefinition",
            ErrorImpl::UndefinedFunction { .. } => "UndefinedFunction",
            ErrorImpl::NotAFunction { .. } => "NotAFunction",
            ErrorImpl::ArgumentMismatch { .. } => "ArgumentMismatch",
            ErrorImpl::UndefinedVariable { .. } => "UndefinedVariable",
            ErrorImpl::TypeConflict { .. } => "TypeConflict",
            ErrorImpl::ConflictingRedeclaration { .. } => "ConflictingRedeclaration",
            ErrorImpl::VoidFunctionReturnsValue { .. } => "VoidFunctionReturnsValue",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
            ErrorImpl::NotIterable { .. } => "NotIterable",
            ErrorImpl::NoLength { .. } => "NoLength",
            ErrorImpl::EmptyUntypedList => "EmptyUntypedList",
            ErrorImpl::ListTypeMismatch { .. } => "ListTypeMismatch",
            ErrorImpl::Unsupported { .. } => "Unsupported",
            ErrorImpl::UndeclaredType { .. } => "UndeclaredType",
            ErrorImpl::InternalError { .. } => "InternalError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::InconsistentIndentation { width } => ErrorTip::Suggestion(format!(
                "Indentation of {} does not match any enclosing block",
                width
            )),
            ErrorImpl::DuplicateDefinition { name, previous } => ErrorTip::Suggestion(format!(
                "`{}` was previously declared as a {} in this scope",
                name, previous
            )),
            ErrorImpl::UndefinedFunction { name } => {
                ErrorTip::Suggestion(format!("Function `{}` is undefined", name))
            }
            ErrorImpl::NotAFunction { name } => {
                ErrorTip::Suggestion(format!("`{}` is not defined as a function", name))
            }
            ErrorImpl::ArgumentMismatch { function, received } => ErrorTip::Suggestion(format!(
                "`{}` cannot be called with arguments ({})",
                function, received
            )),
            ErrorImpl::UndefinedVariable { name } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", name))
            }
            ErrorImpl::TypeConflict { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::ConflictingRedeclaration { name, declared } => {
                ErrorTip::Suggestion(format!(
                    "`{}` was previously declared as a `{}`",
                    name, declared
                ))
            }
            ErrorImpl::VoidFunctionReturnsValue { function } => ErrorTip::Suggestion(format!(
                "`{}` returns a value, so every return in it needs one",
                function
            )),
            ErrorImpl::ReturnOutsideFunction => {
                ErrorTip::Suggestion(String::from("Return statement outside of function"))
            }
            ErrorImpl::NotIterable { type_ } => {
                ErrorTip::Suggestion(format!("A `{}` is not iterable", type_))
            }
            ErrorImpl::NoLength { type_ } => {
                ErrorTip::Suggestion(format!("A `{}` has no length", type_))
            }
            ErrorImpl::EmptyUntypedList => ErrorTip::Suggestion(String::from(
                "No type associated with list declaration, add at least one element",
            )),
            ErrorImpl::ListTypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Type mismatch in `{}` list, received `{}`",
                expected, received
            )),
            ErrorImpl::Unsupported { feature } => {
                ErrorTip::Suggestion(format!("{} is not supported", feature))
            }
            ErrorImpl::UndeclaredType { name } => match name {
                Some(name) => {
                    ErrorTip::Suggestion(format!("The type of `{}` could not be inferred", name))
                }
                None => ErrorTip::Suggestion(String::from(
                    "This value is used before its type is known",
                )),
            },
            ErrorImpl::InternalError { message } => {
                ErrorTip::Suggestion(format!("Internal compiler error: {}", message))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.position)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("inconsistent indentation of width {width}")]
    InconsistentIndentation { width: usize },
    #[error("definition {name:?} previously declared as a {previous}")]
    DuplicateDefinition { name: String, previous: String },
    #[error("{name:?} function is undefined")]
    UndefinedFunction { name: String },
    #[error("{name:?} is not defined as a function")]
    NotAFunction { name: String },
    #[error("arguments ({received}) do not match {function:?}")]
    ArgumentMismatch { function: String, received: String },
    #[error("variable {name:?} not declared")]
    UndefinedVariable { name: String },
    #[error("types do not match: expected {expected:?}, received {received:?}")]
    TypeConflict { expected: String, received: String },
    #[error("{name:?} was previously declared as a {declared:?}")]
    ConflictingRedeclaration { name: String, declared: String },
    #[error("cannot return without a value from function {function:?}")]
    VoidFunctionReturnsValue { function: String },
    #[error("return statement outside of function")]
    ReturnOutsideFunction,
    #[error("a {type_} is not iterable")]
    NotIterable { type_: String },
    #[error("a {type_} has no length")]
    NoLength { type_: String },
    #[error("no type associated with list declaration")]
    EmptyUntypedList,
    #[error("type mismatch in {expected} list: received {received}")]
    ListTypeMismatch { expected: String, received: String },
    #[error("unsupported: {feature}")]
    Unsupported { feature: String },
    #[error("undeclared type")]
    UndeclaredType { name: Option<String> },
    #[error("internal error: {message}")]
    InternalError { message: String },
}

/// Attaches a source position to errors raised by position-less queries
/// (type descriptors, scope tables).
pub trait At<T> {
    fn at(self, position: &Position) -> Result<T, Error>;
}

impl<T> At<T> for Result<T, ErrorImpl> {
    fn at(self, position: &Position) -> Result<T, Error> {
        self.map_err(|error| Error::new(error, position.clone()))
    }
}
