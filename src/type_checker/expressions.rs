//! Expression constructors.
//!
//! Every constructor resolves names against the current scope and unifies
//! the types of its operands before returning the node.

use log::debug;

use crate::{
    ast::{
        ast::{Expr, ExprKind, Operator},
        types::Type,
    },
    errors::errors::{At, Error, ErrorImpl},
    Span,
};

use super::{definitions::Definition, type_checker::TypeChecker};

impl TypeChecker {
    pub fn integer(&mut self, value: i64, span: Span) -> Result<Expr, Error> {
        Ok(self.mk_expr(ExprKind::Integer(value), span))
    }

    /// Builds a text literal from its raw token, quotes included.
    pub fn string(&mut self, raw: &str, span: Span) -> Result<Expr, Error> {
        let mut chars = raw.chars();
        chars.next();
        chars.next_back();

        Ok(self.mk_expr(ExprKind::Text(chars.as_str().to_string()), span))
    }

    pub fn identifier(&mut self, name: &str, span: Span) -> Result<Expr, Error> {
        let definition = self
            .program
            .resolve(self.current_scope, name)
            .filter(|definition| self.program.definition(*definition).is_variable())
            .ok_or_else(|| {
                Error::new(
                    ErrorImpl::UndefinedVariable {
                        name: name.to_string(),
                    },
                    span.start.clone(),
                )
            })?;

        Ok(self.mk_expr(
            ExprKind::Identifier {
                name: name.to_string(),
                definition,
            },
            span,
        ))
    }

    /// Both operands must end up with the same type. Whichever side is
    /// already known is pushed into the other one.
    pub fn binary(
        &mut self,
        left: Expr,
        operator: Operator,
        right: Expr,
        span: Span,
    ) -> Result<Expr, Error> {
        self.reject_custom_iterator(&left)?;
        self.reject_custom_iterator(&right)?;

        let left_type = self.type_of(&left)?;
        if !left_type.is_unset() {
            self.propagate(&right, &left_type)?;
        } else {
            let right_type = self.type_of(&right)?;
            self.propagate(&left, &right_type)?;
        }

        Ok(self.mk_expr(
            ExprKind::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            },
            span,
        ))
    }

    pub fn unary(&mut self, operator: Operator, operand: Expr, span: Span) -> Result<Expr, Error> {
        self.reject_custom_iterator(&operand)?;

        Ok(self.mk_expr(
            ExprKind::Unary {
                operator,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    /// A list literal takes its element type from its first element.
    pub fn list(&mut self, elements: Vec<Expr>, span: Span) -> Result<Expr, Error> {
        let Some(first) = elements.first() else {
            return Err(Error::new(ErrorImpl::EmptyUntypedList, span.start));
        };

        let expected = self.value_type(first)?;
        for element in &elements[1..] {
            self.value_type(element)?;
            match self.program.propagate_type(element, &expected) {
                Err(ErrorImpl::TypeConflict { .. }) => {
                    return Err(Error::new(
                        ErrorImpl::ListTypeMismatch {
                            expected: expected.to_string(),
                            received: self.type_of(element)?.to_string(),
                        },
                        element.span.start.clone(),
                    ));
                }
                result => result.at(&element.span.start)?,
            }
        }

        Ok(self.mk_expr(ExprKind::List { elements }, span))
    }

    pub fn index(&mut self, target: Expr, index: Expr, span: Span) -> Result<Expr, Error> {
        let target_type = self.value_type(&target)?;
        if target_type.is_unset() {
            return Err(Error::new(
                ErrorImpl::UndeclaredType {
                    name: expression_name(&target),
                },
                target.span.start.clone(),
            ));
        }
        target_type.element_type().at(&target.span.start)?;

        self.value_type(&index)?;
        self.propagate(&index, &Type::int())?;

        Ok(self.mk_expr(
            ExprKind::Index {
                target: Box::new(target),
                index: Box::new(index),
            },
            span,
        ))
    }

    /// Resolves `name` to a function and checks the arguments against it.
    pub fn call(&mut self, name: &str, arguments: Vec<Expr>, span: Span) -> Result<Expr, Error> {
        let Some(function) = self.program.resolve(self.current_scope, name) else {
            return Err(Error::new(
                ErrorImpl::UndefinedFunction {
                    name: name.to_string(),
                },
                span.start,
            ));
        };

        for argument in &arguments {
            self.reject_custom_iterator(argument)?;
        }

        match self.program.definition(function).clone() {
            Definition::Builtin(builtin) => {
                let argument_types = arguments
                    .iter()
                    .map(|argument| {
                        let argument_type = self.type_of(argument)?;
                        if argument_type.is_unset() {
                            return Err(Error::new(
                                ErrorImpl::UndeclaredType {
                                    name: expression_name(argument),
                                },
                                argument.span.start.clone(),
                            ));
                        }
                        Ok(argument_type)
                    })
                    .collect::<Result<Vec<_>, Error>>()?;

                if !builtin.check_args(&argument_types).at(&span.start)? {
                    return Err(self.argument_mismatch(name, &arguments, &span));
                }
            }
            Definition::Function(id) => {
                let params = self.program.function(id).params.clone();
                if params.len() != arguments.len() {
                    return Err(self.argument_mismatch(name, &arguments, &span));
                }

                for (index, (param, argument)) in params.iter().zip(&arguments).enumerate() {
                    let argument_type = self.value_type(argument)?;

                    if param.param_type.is_unset() {
                        // Recursive call before the parameter's type is known
                        if !argument_type.is_unset() {
                            debug!(
                                "inferred parameter `{}` of `{}` as {}",
                                param.name, name, argument_type
                            );
                            self.program.function_mut(id).params[index].param_type = argument_type;
                        }
                    } else if argument_type.is_unset() {
                        self.propagate(argument, &param.param_type)?;
                    } else if !argument_type
                        .same_as(&param.param_type)
                        .at(&argument.span.start)?
                    {
                        return Err(self.argument_mismatch(name, &arguments, &span));
                    }
                }
            }
            _ => {
                return Err(Error::new(
                    ErrorImpl::NotAFunction {
                        name: name.to_string(),
                    },
                    span.start,
                ));
            }
        }

        Ok(self.mk_expr(
            ExprKind::Call {
                name: name.to_string(),
                function,
                arguments,
            },
            span,
        ))
    }

    fn argument_mismatch(&self, name: &str, arguments: &[Expr], span: &Span) -> Error {
        let received = arguments
            .iter()
            .map(|argument| match self.program.type_of(argument) {
                Ok(argument_type) => argument_type.to_string(),
                Err(_) => String::from("<unset>"),
            })
            .collect::<Vec<_>>()
            .join(", ");

        Error::new(
            ErrorImpl::ArgumentMismatch {
                function: name.to_string(),
                received,
            },
            span.start.clone(),
        )
    }
}

fn expression_name(expr: &Expr) -> Option<String> {
    match &expr.kind {
        ExprKind::Identifier { name, .. } | ExprKind::Call { name, .. } => Some(name.clone()),
        _ => None,
    }
}
