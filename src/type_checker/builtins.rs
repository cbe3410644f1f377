//! The built-in function library.
//!
//! Built-ins are function definitions with no declaration behind them. Each
//! one decides which argument types it accepts and what it returns; the
//! generator decides how calls to it are spelled (see `compiler::stdlib`).

use crate::{ast::types::Type, errors::errors::ErrorImpl};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Print,
    Exit,
    Str,
    Int,
    Len,
    Modulus,
    Range,
}

impl Builtin {
    /// Every built-in, in the order scopes are seeded with them.
    pub const ALL: [Builtin; 7] = [
        Builtin::Print,
        Builtin::Exit,
        Builtin::Str,
        Builtin::Int,
        Builtin::Modulus,
        Builtin::Range,
        Builtin::Len,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Print => "print",
            Builtin::Exit => "exit",
            Builtin::Str => "str",
            Builtin::Int => "int",
            Builtin::Len => "len",
            Builtin::Modulus => "modulus",
            Builtin::Range => "range",
        }
    }

    pub fn return_type(&self) -> Type {
        match self {
            Builtin::Print | Builtin::Exit => Type::Void,
            Builtin::Str => Type::Text,
            Builtin::Int | Builtin::Len | Builtin::Modulus => Type::int(),
            Builtin::Range => Type::list_of(Type::int()),
        }
    }

    /// Whether the function drives a `for` header itself instead of
    /// producing an iterable value.
    pub fn has_custom_iterator(&self) -> bool {
        matches!(self, Builtin::Range)
    }

    /// Accepts or rejects a call with arguments of the given types.
    ///
    /// Errors (rather than `false`) come from asking an unresolved type for
    /// its name, or from `len` on a type with no length.
    pub fn check_args(&self, arguments: &[Type]) -> Result<bool, ErrorImpl> {
        match self {
            Builtin::Print => {
                for argument in arguments {
                    if !is_int_or_text(argument)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Builtin::Exit => match arguments {
                [code] => code.is_named("int"),
                _ => Ok(false),
            },
            Builtin::Str | Builtin::Int => match arguments {
                [value] => is_int_or_text(value),
                _ => Ok(false),
            },
            Builtin::Len => match arguments {
                [value] => {
                    value.length_accessor()?;
                    Ok(true)
                }
                _ => Ok(false),
            },
            Builtin::Modulus => match arguments {
                [a, b] => Ok(a.is_named("int")? && b.is_named("int")?),
                _ => Ok(false),
            },
            Builtin::Range => match arguments {
                [stop] => stop.is_named("int"),
                [start, stop] => Ok(start.is_named("int")? && stop.is_named("int")?),
                _ => Ok(false),
            },
        }
    }
}

fn is_int_or_text(ty: &Type) -> Result<bool, ErrorImpl> {
    let name = ty.canonical_name()?;
    Ok(name == "int" || name == "std::string")
}
