use log::debug;

use crate::{
    ast::{
        ast::{Block, Expr, ExprKind, Stmt, StmtKind},
        types::Type,
    },
    errors::errors::{At, Error, ErrorImpl},
    Position, Span,
};

use super::{
    definitions::{DefId, Definition, FunctionId},
    program::Program,
    scope::{ScopeId, ScopeKind},
};

/// A function whose body is still being built.
#[derive(Debug, Clone)]
pub struct FunctionFrame {
    pub function: FunctionId,
    /// Scope to return to once the body is closed
    pub outer_scope: ScopeId,
    pub returns_value: bool,
}

/// Returned by `begin_function`, handed back to `end_function`.
#[derive(Debug)]
pub struct FunctionHeader {
    pub function: FunctionId,
    pub span: Span,
}

/// Returned by `begin_for`, handed back to `end_for`.
#[derive(Debug)]
pub struct ForHeader {
    pub variable: String,
    pub definition: DefId,
    pub iterable: Expr,
}

/// Construction context for a program.
///
/// The parser builds the tree bottom-up and hands every node to the checker
/// as it goes. Each node is checked against the scope that is current at
/// that moment, and every type fact learned from it is pushed into the
/// definitions immediately. Scopes are opened and closed by the parser
/// through `begin_block`/`end_block` and the `begin_*`/`end_*` pairs for
/// functions and `for` loops.
#[derive(Debug)]
pub struct TypeChecker {
    pub(super) program: Program,
    pub(super) current_scope: ScopeId,
    pub(super) function_stack: Vec<FunctionFrame>,
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeChecker {
    pub fn new() -> Self {
        let program = Program::new();
        let current_scope = program.root;

        TypeChecker {
            program,
            current_scope,
            function_stack: vec![],
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn current_scope(&self) -> ScopeId {
        self.current_scope
    }

    pub fn type_of(&self, expr: &Expr) -> Result<Type, Error> {
        self.program.type_of(expr).at(&expr.span.start)
    }

    /// Opens a nested block scope and makes it current.
    pub fn begin_block(&mut self) -> ScopeId {
        self.current_scope = self
            .program
            .push_scope(ScopeKind::Block, Some(self.current_scope));
        self.current_scope
    }

    pub fn end_block(&mut self) {
        self.current_scope = self
            .program
            .scope(self.current_scope)
            .next
            .unwrap_or(self.program.root);
    }

    /// Closes construction. Every variable must have a type by now.
    pub fn finish(mut self, body: Block) -> Result<Program, Error> {
        if let Some(frame) = self.function_stack.last() {
            let function = self.program.function(frame.function);
            return Err(Error::new(
                ErrorImpl::InternalError {
                    message: format!("function `{}` was never closed", function.name),
                },
                function.position.clone(),
            ));
        }

        for definition in &self.program.definitions {
            if let Definition::Variable {
                name,
                var_type,
                position,
                ..
            } = definition
            {
                if var_type.is_unset() {
                    return Err(Error::new(
                        ErrorImpl::UndeclaredType {
                            name: Some(name.clone()),
                        },
                        position.clone(),
                    ));
                }
            }
        }

        self.program.body = body;
        debug!(
            "constructed {} statements, {} functions, {} scopes",
            self.program.statement_count(),
            self.program.functions.len(),
            self.program.scopes.len()
        );

        Ok(self.program)
    }

    pub(super) fn mk_expr(&self, kind: ExprKind, span: Span) -> Expr {
        Expr {
            kind,
            scope: self.current_scope,
            span,
        }
    }

    pub(super) fn mk_stmt(&self, kind: StmtKind, span: Span) -> Stmt {
        Stmt {
            kind,
            scope: self.current_scope,
            span,
        }
    }

    /// Rejects a value that only makes sense as a `for` header, such as a
    /// call to `range`.
    pub(super) fn reject_custom_iterator(&self, expr: &Expr) -> Result<(), Error> {
        if self.program.is_custom_iterator(expr) {
            if let ExprKind::Call { name, .. } = &expr.kind {
                return Err(Error::new(
                    ErrorImpl::Unsupported {
                        feature: format!("`{}` outside of a for loop header", name),
                    },
                    expr.span.start.clone(),
                ));
            }
        }

        Ok(())
    }

    /// Type of an expression used as a value. Void calls are rejected.
    pub(super) fn value_type(&self, expr: &Expr) -> Result<Type, Error> {
        self.reject_custom_iterator(expr)?;
        let value_type = self.type_of(expr)?;

        if value_type.is_void() {
            return Err(Error::new(
                ErrorImpl::TypeConflict {
                    expected: String::from("a value"),
                    received: String::from("void"),
                },
                expr.span.start.clone(),
            ));
        }

        Ok(value_type)
    }

    pub(super) fn propagate(&mut self, expr: &Expr, new_type: &Type) -> Result<(), Error> {
        self.program
            .propagate_type(expr, new_type)
            .at(&expr.span.start)
    }

    pub(super) fn current_frame(&mut self, position: &Position) -> Result<&mut FunctionFrame, Error> {
        self.function_stack
            .last_mut()
            .ok_or_else(|| Error::new(ErrorImpl::ReturnOutsideFunction, position.clone()))
    }
}
