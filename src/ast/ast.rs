use crate::{
    type_checker::{
        definitions::{DefId, FunctionId},
        scope::ScopeId,
    },
    Span,
};

/// Operators shared by binary and unary expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Less,
    Greater,
    Equals,
    NotEquals,
    GreaterEquals,
    LessEquals,
    Not,
    Or,
    And,
    Add,
    Subtract,
    Multiply,
    Divide,
    ShiftLeft,
    ShiftRight,
    BitAnd,
    BitOr,
    BitXor,
    BitNot,
}

impl Operator {
    /// Target-language spelling of the operator.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Less => "<",
            Operator::Greater => ">",
            Operator::Equals => "==",
            Operator::NotEquals => "!=",
            Operator::GreaterEquals => ">=",
            Operator::LessEquals => "<=",
            Operator::Not => "!",
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::ShiftLeft => "<<",
            Operator::ShiftRight => ">>",
            Operator::BitAnd => "&",
            Operator::BitOr => "|",
            Operator::BitXor => "^",
            Operator::BitNot => "~",
        }
    }
}

/// An expression node. `scope` is the scope that was active when the node
/// was built, and the only context the node consults afterwards.
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub scope: ScopeId,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    Integer(i64),
    /// Literal contents with the surrounding quotes already stripped
    Text(String),
    Identifier {
        name: String,
        definition: DefId,
    },
    Binary {
        left: Box<Expr>,
        operator: Operator,
        right: Box<Expr>,
    },
    Unary {
        operator: Operator,
        operand: Box<Expr>,
    },
    List {
        elements: Vec<Expr>,
    },
    Index {
        target: Box<Expr>,
        index: Box<Expr>,
    },
    Call {
        name: String,
        function: DefId,
        arguments: Vec<Expr>,
    },
}

impl Expr {
    pub fn is_binary(&self) -> bool {
        matches!(self.kind, ExprKind::Binary { .. })
    }
}

/// A statement node.
#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub scope: ScopeId,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    Expression(Expr),
    Assignment {
        name: String,
        definition: DefId,
        value: Expr,
    },
    IndexAssignment {
        target: Expr,
        index: Expr,
        value: Expr,
    },
    If {
        condition: Expr,
        body: Block,
        elifs: Vec<ConditionalBlock>,
        else_body: Option<Block>,
    },
    While {
        condition: Expr,
        body: Block,
    },
    For {
        variable: String,
        definition: DefId,
        iterable: Expr,
        body: Block,
    },
    /// The declaration itself lives in the function arena
    FunctionDecl(FunctionId),
    Return(Option<Expr>),
    Pass,
    Break,
    Continue,
}

#[derive(Debug, Clone)]
pub struct ConditionalBlock {
    pub condition: Expr,
    pub body: Block,
}

/// Ordered statements of one block, in program order.
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

impl Block {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Block { statements }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> {
        self.statements.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
