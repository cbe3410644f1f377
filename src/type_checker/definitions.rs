//! Named bindings stored in scope tables.
//!
//! Definitions are arena-allocated and addressed by `DefId`, so the same
//! binding can be referenced from a scope table and from any number of
//! expression nodes. Function declarations live in their own arena; both a
//! `Function` definition and each `Argument` of that function point back to
//! the declaration by `FunctionId`, which keeps the graph acyclic.

use crate::{
    ast::{ast::Block, types::Type},
    Position,
};

use super::{builtins::Builtin, scope::ScopeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DefId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionId(pub usize);

#[derive(Debug, Clone)]
pub enum Definition {
    Variable {
        name: String,
        var_type: Type,
        /// Declared by its loop header, so assignments never re-declare it
        predeclared: bool,
        position: Position,
    },
    /// A parameter seen from inside its function body. Its type is the
    /// parameter slot's type, so inferring one rewrites the other.
    Argument { function: FunctionId, index: usize },
    Function(FunctionId),
    Builtin(Builtin),
}

impl Definition {
    pub fn is_function(&self) -> bool {
        matches!(self, Definition::Function(_) | Definition::Builtin(_))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Definition::Variable { .. } | Definition::Argument { .. })
    }

    /// Whether the generator must not emit a declaration for this binding.
    pub fn is_predeclared(&self) -> bool {
        match self {
            Definition::Variable { predeclared, .. } => *predeclared,
            _ => true,
        }
    }

    pub fn describe(&self) -> &'static str {
        if self.is_function() {
            "function"
        } else {
            "variable"
        }
    }
}

#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub param_type: Type,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<Param>,
    /// Declared, inferred from the first return, or still unset while the
    /// body is being built
    pub return_type: Type,
    pub body: Block,
    /// 0 for a function declared directly in the root block
    pub level: usize,
    /// Scope the function's name was declared in
    pub scope: ScopeId,
    pub body_scope: ScopeId,
    pub position: Position,
}

impl FunctionDecl {
    pub fn is_top_level(&self) -> bool {
        self.level == 0
    }
}
