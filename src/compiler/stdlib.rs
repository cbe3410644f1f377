//! Emission of built-in function calls.
//!
//! Each built-in has its own spelling in the target language, chosen by the
//! argument types where the target needs different calls for text and
//! integers. The runtime header provides `javelin::modulus` and
//! `javelin::string_itr`.

use crate::{
    ast::{
        ast::{Expr, ExprKind},
        types::Type,
    },
    errors::errors::{At, Error, ErrorImpl},
    type_checker::builtins::Builtin,
};

use super::{
    compiler::Compiler,
    expr::{gen_arguments, gen_expression, gen_operand},
};

pub fn gen_builtin_call(
    compiler: &mut Compiler,
    builtin: Builtin,
    arguments: &[Expr],
    call: &Expr,
) -> Result<String, Error> {
    match builtin {
        Builtin::Print => {
            let mut line = String::from("std::cout");
            for (index, argument) in arguments.iter().enumerate() {
                if index > 0 {
                    line.push_str(" << ' '");
                }
                // `<<` binds tighter than the bitwise and logical operators
                line.push_str(" << ");
                line.push_str(&gen_operand(compiler, argument)?);
            }
            line.push_str(" << std::endl");
            Ok(line)
        }
        Builtin::Exit => Ok(format!("exit({})", gen_arguments(compiler, arguments)?)),
        Builtin::Str => {
            let (argument_type, argument) = single_argument(compiler, arguments, call)?;
            if matches!(argument_type, Type::Text) {
                Ok(format!("std::string({})", argument))
            } else {
                Ok(format!("std::to_string({})", argument))
            }
        }
        Builtin::Int => {
            let (argument_type, argument) = single_argument(compiler, arguments, call)?;
            if matches!(argument_type, Type::Text) {
                Ok(format!("std::stoi({})", argument))
            } else if matches!(
                arguments.first().map(|argument| &argument.kind),
                Some(ExprKind::Binary { .. } | ExprKind::Unary { .. })
            ) {
                // No call wraps the value, so keep its grouping
                Ok(format!("({})", argument))
            } else {
                Ok(argument)
            }
        }
        Builtin::Len => {
            let (argument_type, argument) = single_argument(compiler, arguments, call)?;
            let accessor = argument_type.length_accessor().at(&call.span.start)?;
            Ok(format!("({}){}", argument, accessor))
        }
        Builtin::Modulus => Ok(format!(
            "javelin::modulus({})",
            gen_arguments(compiler, arguments)?
        )),
        Builtin::Range => Err(Error::new(
            ErrorImpl::Unsupported {
                feature: String::from("`range` outside of a for loop header"),
            },
            call.span.start.clone(),
        )),
    }
}

/// Header of a `for` loop driven by a built-in instead of an iterable.
///
/// For `range` the counter is decremented once when the condition fails, so
/// that after the loop it holds the last value produced, as it would in the
/// source language.
pub fn gen_custom_iterator_header(
    compiler: &mut Compiler,
    builtin: Builtin,
    variable: &str,
    arguments: &[Expr],
) -> Result<String, Error> {
    let (start, stop) = match (builtin, arguments) {
        (Builtin::Range, [stop]) => (String::from("0"), gen_operand(compiler, stop)?),
        (Builtin::Range, [start, stop]) => (
            gen_operand(compiler, start)?,
            gen_operand(compiler, stop)?,
        ),
        _ => {
            return Err(Error::new(
                ErrorImpl::InternalError {
                    message: format!("`{}` cannot drive a loop header", builtin.name()),
                },
                arguments
                    .first()
                    .map(|argument| argument.span.start.clone())
                    .unwrap_or_else(crate::Position::null),
            ));
        }
    };

    Ok(format!(
        "for (int {v} = {}; {v} < {} || ({v}-- && false); {v}++) {{",
        start,
        stop,
        v = variable
    ))
}

fn single_argument(
    compiler: &mut Compiler,
    arguments: &[Expr],
    call: &Expr,
) -> Result<(Type, String), Error> {
    match arguments {
        [argument] => Ok((
            compiler
                .program
                .type_of(argument)
                .at(&argument.span.start)?,
            gen_expression(compiler, argument)?,
        )),
        _ => Err(Error::new(
            ErrorImpl::InternalError {
                message: String::from("expected exactly one argument"),
            },
            call.span.start.clone(),
        )),
    }
}
