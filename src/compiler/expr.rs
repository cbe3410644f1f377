use crate::{
    ast::{
        ast::{Expr, ExprKind},
        types::Type,
    },
    errors::errors::{At, Error, ErrorImpl},
    type_checker::definitions::{DefId, Definition},
};

use super::{
    compiler::Compiler,
    stdlib::{gen_builtin_call, gen_custom_iterator_header},
};

pub fn gen_expression(compiler: &mut Compiler, expr: &Expr) -> Result<String, Error> {
    let program = compiler.program;

    match &expr.kind {
        ExprKind::Integer(value) => Ok(value.to_string()),
        ExprKind::Text(value) => Ok(format!("std::string(\"{}\")", escape_quotes(value))),
        ExprKind::Identifier { name, .. } => Ok(name.clone()),
        ExprKind::Binary {
            left,
            operator,
            right,
        } => Ok(format!(
            "{} {} {}",
            gen_operand(compiler, left)?,
            operator.symbol(),
            gen_operand(compiler, right)?
        )),
        ExprKind::Unary { operator, operand } => {
            let operand_text = gen_expression(compiler, operand)?;
            if matches!(operand.kind, ExprKind::Binary { .. } | ExprKind::Unary { .. }) {
                Ok(format!("{}({})", operator.symbol(), operand_text))
            } else {
                Ok(format!("{}{}", operator.symbol(), operand_text))
            }
        }
        ExprKind::List { elements } => {
            let list_type = program.type_of(expr).at(&expr.span.start)?;
            let element_type = list_type
                .element_type()
                .and_then(|element| element.canonical_name())
                .at(&expr.span.start)?;

            Ok(format!(
                "std::vector<{}>{{{}}}",
                element_type,
                gen_arguments(compiler, elements)?
            ))
        }
        ExprKind::Index { target, index } => {
            let target_type = program.type_of(target).at(&target.span.start)?;
            let target_text = gen_operand(compiler, target)?;
            let index_text = gen_expression(compiler, index)?;

            // Indexing text yields text, not a character
            if matches!(target_type, Type::Text) {
                Ok(format!("std::string(1, {}[{}])", target_text, index_text))
            } else {
                Ok(format!("{}[{}]", target_text, index_text))
            }
        }
        ExprKind::Call {
            name,
            function,
            arguments,
        } => match program.definition(*function) {
            Definition::Builtin(builtin) => gen_builtin_call(compiler, *builtin, arguments, expr),
            _ => Ok(format!("{}({})", name, gen_arguments(compiler, arguments)?)),
        },
    }
}

/// Comma-separated arguments, without spaces.
pub fn gen_arguments(compiler: &mut Compiler, arguments: &[Expr]) -> Result<String, Error> {
    let arguments = arguments
        .iter()
        .map(|argument| gen_expression(compiler, argument))
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(arguments.join(","))
}

/// Parenthesizes nested binary expressions so the tree's grouping survives
/// the target's precedence rules.
pub(super) fn gen_operand(compiler: &mut Compiler, expr: &Expr) -> Result<String, Error> {
    let text = gen_expression(compiler, expr)?;

    if expr.is_binary() {
        Ok(format!("({})", text))
    } else {
        Ok(text)
    }
}

/// Header line of a `for` loop, opening brace included.
pub fn gen_iterator_header(
    compiler: &mut Compiler,
    variable: &str,
    definition: DefId,
    iterable: &Expr,
) -> Result<String, Error> {
    let program = compiler.program;

    if let ExprKind::Call {
        function,
        arguments,
        ..
    } = &iterable.kind
    {
        if let Definition::Builtin(builtin) = program.definition(*function) {
            if builtin.has_custom_iterator() {
                return gen_custom_iterator_header(compiler, *builtin, variable, arguments);
            }
        }
    }

    let iterable_type = program.type_of(iterable).at(&iterable.span.start)?;
    let iterable_text = gen_expression(compiler, iterable)?;

    match iterable_type {
        Type::Text => Ok(format!(
            "for (std::string {} : javelin::string_itr({})) {{",
            variable, iterable_text
        )),
        Type::List(_) => {
            let element_type = program
                .definition_type(definition)
                .canonical_name()
                .at(&iterable.span.start)?;
            Ok(format!(
                "for ({} {} : {}) {{",
                element_type, variable, iterable_text
            ))
        }
        other => Err(Error::new(
            ErrorImpl::NotIterable {
                type_: other.to_string(),
            },
            iterable.span.start.clone(),
        )),
    }
}

/// Escapes double quotes that the source literal left bare, which happens
/// when the literal was written with single quotes.
pub(super) fn escape_quotes(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    let mut backslash = false;

    for c in value.chars() {
        if c == '"' && !backslash {
            escaped.push('\\');
        }
        backslash = c == '\\' && !backslash;
        escaped.push(c);
    }

    escaped
}

