//! Typed AST for Lua chunks.
//!
//! Every statement, expression and table field carries a [`Span`] so the
//! resolver can reason about what is visible from a given line.

use smol_str::SmolStr;

use crate::base::Span;

/// A parsed source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chunk {
    pub body: Block,
    pub span: Span,
}

/// A sequence of statements.
pub type Block = Vec<Statement>;

/// A name together with where it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: SmolStr,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<SmolStr>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

// ============================================================================
// STATEMENTS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    /// `local a, b = x, y`
    Local(LocalStatement),
    /// `a, t.b = x, y`
    Assignment(AssignmentStatement),
    /// A function call used as a statement
    Call(Expression),
    If(IfStatement),
    While { condition: Expression, body: Block },
    Do { body: Block },
    Repeat { body: Block, condition: Expression },
    NumericFor {
        variable: Identifier,
        start: Expression,
        end: Expression,
        step: Option<Expression>,
        body: Block,
    },
    GenericFor {
        variables: Vec<Identifier>,
        iterators: Vec<Expression>,
        body: Block,
    },
    /// `function a.b:c() ... end`
    Function {
        name: FunctionName,
        function: FunctionBody,
    },
    /// `local function f() ... end`
    LocalFunction {
        name: Identifier,
        function: FunctionBody,
    },
    Return { arguments: Vec<Expression> },
    Break,
    Goto { label: Identifier },
    Label { name: Identifier },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalStatement {
    pub variables: Vec<Identifier>,
    pub init: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStatement {
    /// Assignment targets: identifiers, member or index expressions
    pub variables: Vec<Expression>,
    pub init: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub clauses: Vec<IfClause>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseKind {
    If,
    ElseIf,
    Else,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfClause {
    pub kind: ClauseKind,
    /// Absent for `else`
    pub condition: Option<Expression>,
    pub body: Block,
    pub span: Span,
}

/// Dotted name of a global function declaration with an optional method part.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionName {
    pub path: Vec<Identifier>,
    pub method: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionBody {
    pub parameters: Vec<Identifier>,
    pub is_vararg: bool,
    pub body: Block,
    pub span: Span,
}

impl Statement {
    /// Nested body of block-carrying statements.
    ///
    /// `if` statements are not included; their bodies live in the clauses.
    pub fn body(&self) -> Option<&Block> {
        match &self.kind {
            StatementKind::While { body, .. }
            | StatementKind::Do { body }
            | StatementKind::Repeat { body, .. }
            | StatementKind::NumericFor { body, .. }
            | StatementKind::GenericFor { body, .. } => Some(body),
            StatementKind::Function { function, .. }
            | StatementKind::LocalFunction { function, .. } => Some(&function.body),
            _ => None,
        }
    }

    /// Whether this statement binds names (local declaration or assignment)
    pub fn is_declaration(&self) -> bool {
        matches!(
            self.kind,
            StatementKind::Local(_) | StatementKind::Assignment(_)
        )
    }
}

// ============================================================================
// EXPRESSIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indexer {
    /// `a.b`
    Dot,
    /// `a:b`
    Colon,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    Nil,
    Boolean(bool),
    Number(SmolStr),
    /// Raw string literal, quotes included
    String(SmolStr),
    Vararg,
    Function(FunctionBody),
    Identifier(SmolStr),
    /// `base.identifier` or `base:identifier`
    Member {
        base: Box<Expression>,
        indexer: Indexer,
        identifier: Identifier,
    },
    /// `base[index]`
    Index {
        base: Box<Expression>,
        index: Box<Expression>,
    },
    /// `base(args)`, `base{...}` and `base"..."`
    Call {
        base: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Table(Vec<TableField>),
    Binary {
        operator: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<Expression>,
    },
    Paren(Box<Expression>),
}

impl Expression {
    /// Name of a plain identifier reference
    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            ExpressionKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Function literal held by this expression
    pub fn as_function(&self) -> Option<&FunctionBody> {
        match &self.kind {
            ExpressionKind::Function(function) => Some(function),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableField {
    pub kind: TableFieldKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableFieldKind {
    /// `[key] = value`
    Keyed { key: Expression, value: Expression },
    /// `name = value`
    Named { key: Identifier, value: Expression },
    /// `value`
    Positional { value: Expression },
}

impl TableField {
    pub fn value(&self) -> &Expression {
        match &self.kind {
            TableFieldKind::Keyed { value, .. }
            | TableFieldKind::Named { value, .. }
            | TableFieldKind::Positional { value } => value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Or,
    And,
    Lt,
    Gt,
    LtEq,
    GtEq,
    NotEq,
    Eq,
    BitOr,
    BitXor,
    BitAnd,
    ShiftLeft,
    ShiftRight,
    Concat,
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

impl BinaryOperator {
    /// Left and right binding power, Lua 5.3 precedence table.
    pub fn precedence(self) -> (u8, u8) {
        use BinaryOperator::*;
        match self {
            Or => (1, 1),
            And => (2, 2),
            Lt | Gt | LtEq | GtEq | NotEq | Eq => (3, 3),
            BitOr => (4, 4),
            BitXor => (5, 5),
            BitAnd => (6, 6),
            ShiftLeft | ShiftRight => (7, 7),
            // right associative
            Concat => (9, 8),
            Add | Sub => (10, 10),
            Mul | Div | FloorDiv | Mod => (11, 11),
            // right associative, binds tighter than unary operators
            Pow => (14, 13),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
    Length,
    Negate,
    BitNot,
}

impl UnaryOperator {
    /// Binding power of unary operators
    pub const PRECEDENCE: u8 = 12;
}
