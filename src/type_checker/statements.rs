use log::debug;

use crate::{
    ast::{
        ast::{Block, ConditionalBlock, Expr, Stmt, StmtKind},
        types::Type,
    },
    errors::errors::{At, Error, ErrorImpl},
    Span,
};

use super::{
    definitions::{Definition, FunctionDecl, FunctionId, Param},
    scope::ScopeKind,
    type_checker::{ForHeader, FunctionFrame, FunctionHeader, TypeChecker},
};

impl TypeChecker {
    pub fn expression_stmt(&mut self, expr: Expr, span: Span) -> Result<Stmt, Error> {
        self.reject_custom_iterator(&expr)?;
        Ok(self.mk_stmt(StmtKind::Expression(expr), span))
    }

    /// `name = value`. The first assignment visible from the current scope
    /// declares the variable with the value's type; later ones must agree.
    pub fn assignment(
        &mut self,
        name: &str,
        name_span: Span,
        value: Expr,
        span: Span,
    ) -> Result<Stmt, Error> {
        let value_type = self.value_type(&value)?;

        let definition = match self.program.resolve(self.current_scope, name) {
            None => self
                .program
                .define(
                    self.current_scope,
                    name,
                    Definition::Variable {
                        name: name.to_string(),
                        var_type: value_type,
                        predeclared: false,
                        position: name_span.start.clone(),
                    },
                )
                .at(&name_span.start)?,
            Some(definition) if self.program.definition(definition).is_function() => {
                return Err(Error::new(
                    ErrorImpl::ConflictingRedeclaration {
                        name: name.to_string(),
                        declared: String::from("function"),
                    },
                    name_span.start,
                ));
            }
            Some(definition) => {
                let declared = self.program.definition_type(definition);

                if declared.is_unset() {
                    self.program
                        .set_definition_type(definition, value_type)
                        .at(&name_span.start)?;
                } else if value_type.is_unset() {
                    self.propagate(&value, &declared)?;
                } else if !declared.same_as(&value_type).at(&value.span.start)? {
                    return Err(Error::new(
                        ErrorImpl::ConflictingRedeclaration {
                            name: name.to_string(),
                            declared: declared.to_string(),
                        },
                        value.span.start.clone(),
                    ));
                }

                definition
            }
        };

        Ok(self.mk_stmt(
            StmtKind::Assignment {
                name: name.to_string(),
                definition,
                value,
            },
            span,
        ))
    }

    /// `target[index] = value`, only for lists.
    pub fn index_assignment(
        &mut self,
        target: Expr,
        index: Expr,
        value: Expr,
        span: Span,
    ) -> Result<Stmt, Error> {
        let target_type = self.value_type(&target)?;
        if target_type.is_unset() {
            return Err(Error::new(
                ErrorImpl::UndeclaredType { name: None },
                target.span.start.clone(),
            ));
        }
        if !target_type.is_index_assignable() {
            let target_name = target_type.canonical_name().at(&target.span.start)?;
            return Err(Error::new(
                if target_type.is_indexable() {
                    ErrorImpl::Unsupported {
                        feature: format!("assigning into a {}", target_name),
                    }
                } else {
                    ErrorImpl::NotIterable { type_: target_name }
                },
                target.span.start.clone(),
            ));
        }

        self.value_type(&index)?;
        self.propagate(&index, &Type::int())?;

        self.value_type(&value)?;
        let element = target_type.element_type().at(&target.span.start)?;
        self.propagate(&value, &element)?;

        Ok(self.mk_stmt(
            StmtKind::IndexAssignment {
                target,
                index,
                value,
            },
            span,
        ))
    }

    pub fn if_stmt(
        &mut self,
        condition: Expr,
        body: Block,
        elifs: Vec<ConditionalBlock>,
        else_body: Option<Block>,
        span: Span,
    ) -> Result<Stmt, Error> {
        self.value_type(&condition)?;
        for elif in &elifs {
            self.value_type(&elif.condition)?;
        }

        Ok(self.mk_stmt(
            StmtKind::If {
                condition,
                body,
                elifs,
                else_body,
            },
            span,
        ))
    }

    pub fn while_stmt(&mut self, condition: Expr, body: Block, span: Span) -> Result<Stmt, Error> {
        self.value_type(&condition)?;
        Ok(self.mk_stmt(StmtKind::While { condition, body }, span))
    }

    /// Opens the loop's block scope with the loop variable bound in it.
    ///
    /// The iterable is either a list or text value, or a call to a built-in
    /// that drives the header itself (`range`), whose variable is an int.
    pub fn begin_for(
        &mut self,
        variable: &str,
        variable_span: Span,
        iterable: Expr,
    ) -> Result<ForHeader, Error> {
        let element = if self.program.is_custom_iterator(&iterable) {
            Type::int()
        } else {
            let iterable_type = self.value_type(&iterable)?;
            if iterable_type.is_unset() {
                return Err(Error::new(
                    ErrorImpl::UndeclaredType { name: None },
                    iterable.span.start.clone(),
                ));
            }
            iterable_type.element_type().at(&iterable.span.start)?
        };

        let scope = self.begin_block();
        let definition = self
            .program
            .define(
                scope,
                variable,
                Definition::Variable {
                    name: variable.to_string(),
                    var_type: element,
                    predeclared: true,
                    position: variable_span.start.clone(),
                },
            )
            .at(&variable_span.start)?;

        Ok(ForHeader {
            variable: variable.to_string(),
            definition,
            iterable,
        })
    }

    pub fn end_for(&mut self, header: ForHeader, body: Block, span: Span) -> Result<Stmt, Error> {
        self.end_block();

        Ok(self.mk_stmt(
            StmtKind::For {
                variable: header.variable,
                definition: header.definition,
                iterable: header.iterable,
                body,
            },
            span,
        ))
    }

    /// Declares the function in the current scope and opens its body scope.
    ///
    /// The body scope does not see the enclosing scopes. It is seeded with
    /// the built-ins, the function's own name, and its parameters. A missing
    /// annotation leaves the parameter or return type to be inferred from
    /// the body.
    pub fn begin_function(
        &mut self,
        name: &str,
        params: Vec<(String, Option<Type>, Span)>,
        return_type: Option<Type>,
        span: Span,
    ) -> Result<FunctionHeader, Error> {
        let function = FunctionId(self.program.functions.len());
        let level = self.program.depth(self.current_scope);
        let body_scope = self
            .program
            .push_scope(ScopeKind::Function(function), Some(self.current_scope));

        self.program.add_function(FunctionDecl {
            name: name.to_string(),
            params: params
                .iter()
                .map(|(param, param_type, param_span)| Param {
                    name: param.clone(),
                    param_type: param_type.clone().unwrap_or(Type::Unset),
                    position: param_span.start.clone(),
                })
                .collect(),
            return_type: return_type.unwrap_or(Type::Unset),
            body: Block::default(),
            level,
            scope: self.current_scope,
            body_scope,
            position: span.start.clone(),
        });

        self.program
            .define(self.current_scope, name, Definition::Function(function))
            .at(&span.start)?;
        self.program
            .define(body_scope, name, Definition::Function(function))
            .at(&span.start)?;

        for (index, (param, _, param_span)) in params.iter().enumerate() {
            self.program
                .define(body_scope, param, Definition::Argument { function, index })
                .at(&param_span.start)?;
        }

        debug!("entering function `{}` at level {}", name, level);

        self.function_stack.push(FunctionFrame {
            function,
            outer_scope: self.current_scope,
            returns_value: false,
        });
        self.current_scope = body_scope;

        Ok(FunctionHeader { function, span })
    }

    /// Closes the body. Anything still unresolved about the signature is
    /// settled here: a function that never returned a value returns void,
    /// and every parameter must have been inferred.
    pub fn end_function(&mut self, header: FunctionHeader, body: Block) -> Result<Stmt, Error> {
        let frame = self.function_stack.pop().ok_or_else(|| {
            Error::new(
                ErrorImpl::InternalError {
                    message: String::from("no function to close"),
                },
                header.span.start.clone(),
            )
        })?;
        self.current_scope = frame.outer_scope;

        let function = self.program.function_mut(header.function);
        function.body = body;

        if function.return_type.is_unset() {
            if frame.returns_value {
                return Err(Error::new(
                    ErrorImpl::UndeclaredType {
                        name: Some(function.name.clone()),
                    },
                    function.position.clone(),
                ));
            }
            function.return_type = Type::Void;
        }

        if let Some(param) = function.params.iter().find(|param| param.param_type.is_unset()) {
            return Err(Error::new(
                ErrorImpl::UndeclaredType {
                    name: Some(param.name.clone()),
                },
                param.position.clone(),
            ));
        }

        debug!(
            "closed function `{}` returning {}",
            function.name, function.return_type
        );

        Ok(self.mk_stmt(StmtKind::FunctionDecl(header.function), header.span))
    }

    /// The first return of a function without a declared return type fixes
    /// that type. Every later return must agree with it.
    pub fn return_stmt(&mut self, value: Option<Expr>, span: Span) -> Result<Stmt, Error> {
        let frame = self.current_frame(&span.start)?;
        let function = frame.function;

        if value.is_some() {
            frame.returns_value = true;
        }

        let declared = self.program.function(function).return_type.clone();
        let function_name = self.program.function(function).name.clone();

        match &value {
            Some(value) => {
                let value_type = self.value_type(value)?;

                if declared.is_void() {
                    return Err(Error::new(
                        ErrorImpl::TypeConflict {
                            expected: declared.to_string(),
                            received: value_type.to_string(),
                        },
                        value.span.start.clone(),
                    ));
                }

                if declared.is_unset() {
                    if !value_type.is_unset() {
                        debug!("inferred return of `{}` as {}", function_name, value_type);
                        self.program.function_mut(function).return_type = value_type;
                    }
                } else {
                    self.propagate(value, &declared)?;
                }
            }
            None => {
                if declared.is_unset() {
                    debug!("inferred return of `{}` as void", function_name);
                    self.program.function_mut(function).return_type = Type::Void;
                } else if !declared.is_void() {
                    return Err(Error::new(
                        ErrorImpl::VoidFunctionReturnsValue {
                            function: function_name,
                        },
                        span.start,
                    ));
                }
            }
        }

        Ok(self.mk_stmt(StmtKind::Return(value), span))
    }

    pub fn pass_stmt(&mut self, span: Span) -> Result<Stmt, Error> {
        Ok(self.mk_stmt(StmtKind::Pass, span))
    }

    pub fn break_stmt(&mut self, span: Span) -> Result<Stmt, Error> {
        Ok(self.mk_stmt(StmtKind::Break, span))
    }

    pub fn continue_stmt(&mut self, span: Span) -> Result<Stmt, Error> {
        Ok(self.mk_stmt(StmtKind::Continue, span))
    }
}
