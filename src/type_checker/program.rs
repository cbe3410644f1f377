use log::debug;

use crate::{
    ast::{
        ast::{Block, Expr, ExprKind, Stmt, StmtKind},
        types::Type,
    },
    errors::errors::ErrorImpl,
};

use super::{
    builtins::Builtin,
    definitions::{DefId, Definition, FunctionDecl, FunctionId},
    scope::{Scope, ScopeId, ScopeKind},
};

/// A fully constructed program: the root block plus the arenas every node
/// refers into.
#[derive(Debug, Clone)]
pub struct Program {
    pub scopes: Vec<Scope>,
    pub definitions: Vec<Definition>,
    pub functions: Vec<FunctionDecl>,
    pub root: ScopeId,
    pub body: Block,
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

impl Program {
    /// An empty program with a root scope seeded with the built-ins.
    pub fn new() -> Self {
        let mut program = Program {
            scopes: vec![],
            definitions: vec![],
            functions: vec![],
            root: ScopeId(0),
            body: Block::default(),
        };

        program.root = program.push_scope(ScopeKind::Root, None);
        program
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn definition(&self, id: DefId) -> &Definition {
        &self.definitions[id.0]
    }

    pub fn function(&self, id: FunctionId) -> &FunctionDecl {
        &self.functions[id.0]
    }

    pub fn function_mut(&mut self, id: FunctionId) -> &mut FunctionDecl {
        &mut self.functions[id.0]
    }

    /// Creates a scope. Root and function scopes start with their own copy
    /// of the built-in library.
    pub fn push_scope(&mut self, kind: ScopeKind, next: Option<ScopeId>) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope::new(kind, next));

        if !matches!(kind, ScopeKind::Block) {
            for builtin in Builtin::ALL {
                let definition = self.add_definition(Definition::Builtin(builtin));
                self.scopes[id.0].insert(builtin.name().to_string(), definition);
            }
        }

        id
    }

    pub fn add_function(&mut self, function: FunctionDecl) -> FunctionId {
        self.functions.push(function);
        FunctionId(self.functions.len() - 1)
    }

    fn add_definition(&mut self, definition: Definition) -> DefId {
        self.definitions.push(definition);
        DefId(self.definitions.len() - 1)
    }

    /// Binds `name` in the given scope. Shadowing a binding from an enclosing
    /// scope is allowed, re-binding within the same table is not.
    pub fn define(
        &mut self,
        scope: ScopeId,
        name: &str,
        definition: Definition,
    ) -> Result<DefId, ErrorImpl> {
        if let Some(existing) = self.scope(scope).get(name) {
            return Err(ErrorImpl::DuplicateDefinition {
                name: name.to_string(),
                previous: self.definition(existing).describe().to_string(),
            });
        }

        let id = self.add_definition(definition);
        self.scopes[scope.0].insert(name.to_string(), id);
        Ok(id)
    }

    /// Finds the nearest binding of `name` visible from `scope`.
    pub fn resolve(&self, scope: ScopeId, name: &str) -> Option<DefId> {
        let mut current = Some(scope);

        while let Some(id) = current {
            let scope = self.scope(id);
            if let Some(definition) = scope.get(name) {
                return Some(definition);
            }
            if !scope.searches_parent() {
                return None;
            }
            current = scope.next;
        }

        None
    }

    /// Number of enclosing scopes above `scope`.
    pub fn depth(&self, scope: ScopeId) -> usize {
        let mut depth = 0;
        let mut current = self.scope(scope).next;

        while let Some(id) = current {
            depth += 1;
            current = self.scope(id).next;
        }

        depth
    }

    pub fn definition_type(&self, id: DefId) -> Type {
        match self.definition(id) {
            Definition::Variable { var_type, .. } => var_type.clone(),
            Definition::Argument { function, index } => {
                self.function(*function).params[*index].param_type.clone()
            }
            Definition::Function(function) => self.function(*function).return_type.clone(),
            Definition::Builtin(builtin) => builtin.return_type(),
        }
    }

    pub fn definition_name(&self, id: DefId) -> String {
        match self.definition(id) {
            Definition::Variable { name, .. } => name.clone(),
            Definition::Argument { function, index } => {
                self.function(*function).params[*index].name.clone()
            }
            Definition::Function(function) => self.function(*function).name.clone(),
            Definition::Builtin(builtin) => builtin.name().to_string(),
        }
    }

    /// Fixes the type of a variable or argument the first time a type is
    /// known for it. Later calls must agree with the fixed type.
    pub fn set_definition_type(&mut self, id: DefId, new_type: Type) -> Result<(), ErrorImpl> {
        let current = self.definition_type(id);

        if !self.definition(id).is_variable() {
            return Err(ErrorImpl::TypeConflict {
                expected: current.to_string(),
                received: new_type.to_string(),
            });
        }

        if new_type.is_unset() {
            return Ok(());
        }

        if !current.is_unset() {
            if current.same_as(&new_type)? {
                return Ok(());
            }
            return Err(ErrorImpl::TypeConflict {
                expected: current.canonical_name()?,
                received: new_type.canonical_name()?,
            });
        }

        debug!("inferred `{}` as {}", self.definition_name(id), new_type);

        match &mut self.definitions[id.0] {
            Definition::Variable { var_type, .. } => *var_type = new_type,
            Definition::Argument { function, index } => {
                let (function, index) = (*function, *index);
                self.functions[function.0].params[index].param_type = new_type;
            }
            _ => {}
        }

        Ok(())
    }

    /// Type of an expression, read through to the definitions it names.
    ///
    /// This is evaluated on demand so a variable whose type was fixed after
    /// the expression was built reports the fixed type.
    pub fn type_of(&self, expr: &Expr) -> Result<Type, ErrorImpl> {
        match &expr.kind {
            ExprKind::Integer(_) => Ok(Type::int()),
            ExprKind::Text(_) => Ok(Type::Text),
            ExprKind::Identifier { definition, .. } => Ok(self.definition_type(*definition)),
            ExprKind::Binary { left, right, .. } => {
                let left = self.type_of(left)?;
                if left.is_unset() {
                    self.type_of(right)
                } else {
                    Ok(left)
                }
            }
            ExprKind::Unary { operand, .. } => self.type_of(operand),
            ExprKind::List { elements } => match elements.first() {
                Some(first) => Ok(Type::list_of(self.type_of(first)?)),
                None => Err(ErrorImpl::EmptyUntypedList),
            },
            ExprKind::Index { target, .. } => self.type_of(target)?.element_type(),
            ExprKind::Call { function, .. } => Ok(self.definition_type(*function)),
        }
    }

    /// Pushes a known type into an expression. Identifiers adopt it if they
    /// are still unresolved; operators forward it to their operands; every
    /// other expression must already have that type.
    pub fn propagate_type(&mut self, expr: &Expr, new_type: &Type) -> Result<(), ErrorImpl> {
        if new_type.is_unset() {
            return Ok(());
        }

        match &expr.kind {
            ExprKind::Identifier { definition, .. } => {
                self.set_definition_type(*definition, new_type.clone())
            }
            ExprKind::Binary { left, right, .. } => {
                self.propagate_type(left, new_type)?;
                self.propagate_type(right, new_type)
            }
            ExprKind::Unary { operand, .. } => self.propagate_type(operand, new_type),
            _ => {
                let own = self.type_of(expr)?;
                if own.same_as(new_type)? {
                    Ok(())
                } else {
                    Err(ErrorImpl::TypeConflict {
                        expected: new_type.canonical_name()?,
                        received: own.canonical_name()?,
                    })
                }
            }
        }
    }

    /// Functions declared directly in the root block, in declaration order.
    pub fn top_level_functions(&self) -> impl Iterator<Item = &FunctionDecl> + '_ {
        self.body.iter().filter_map(|stmt| match &stmt.kind {
            StmtKind::FunctionDecl(id) => Some(self.function(*id)),
            _ => None,
        })
    }

    /// Whether the call names a built-in that drives its own loop header.
    pub fn is_custom_iterator(&self, expr: &Expr) -> bool {
        match &expr.kind {
            ExprKind::Call { function, .. } => matches!(
                self.definition(*function),
                Definition::Builtin(builtin) if builtin.has_custom_iterator()
            ),
            _ => false,
        }
    }

    pub fn statement_count(&self) -> usize {
        fn count(program: &Program, block: &Block) -> usize {
            block.iter().map(|stmt| 1 + nested(program, stmt)).sum()
        }

        fn nested(program: &Program, stmt: &Stmt) -> usize {
            match &stmt.kind {
                StmtKind::If {
                    body,
                    elifs,
                    else_body,
                    ..
                } => {
                    count(program, body)
                        + elifs.iter().map(|elif| count(program, &elif.body)).sum::<usize>()
                        + else_body.as_ref().map_or(0, |body| count(program, body))
                }
                StmtKind::While { body, .. } | StmtKind::For { body, .. } => count(program, body),
                StmtKind::FunctionDecl(id) => count(program, &program.function(*id).body),
                _ => 0,
            }
        }

        count(self, &self.body)
    }
}
