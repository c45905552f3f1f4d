//! AST node definitions produced by the parser.
//!
//! Every node owns its children exclusively; a [`TranslationUnit`] owns the
//! scope tree and the top-level declaration sequence. Literal nodes keep
//! the decoded literal *text* — the token stream strips numeric base
//! prefixes, and evaluation is not this crate's concern.

use crate::scope::{ScopeArena, ScopeId};
use crate::token::TokenKind;

/// Line/column position of a token, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

/// Member visibility inside a class body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
    Protected,
    Internal,
}

impl Visibility {
    pub fn from_token(kind: TokenKind) -> Option<Visibility> {
        match kind {
            TokenKind::Public => Some(Visibility::Public),
            TokenKind::Private => Some(Visibility::Private),
            TokenKind::Protected => Some(Visibility::Protected),
            TokenKind::Internal => Some(Visibility::Internal),
            _ => None,
        }
    }
}

/// Base of a type specifier: a built-in type or a named class type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeName {
    Bool,
    Char,
    Double,
    Float,
    Named(String),
}

/// A type as written in source: base name plus `[]` suffixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpecifier {
    pub name: TypeName,
    pub array_dimensions: usize,
    pub location: SourceLocation,
}

/// Function parameter.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub type_specifier: TypeSpecifier,
    pub location: SourceLocation,
}

/// A class member: declaration plus modifiers.
#[derive(Debug, Clone)]
pub struct Member {
    pub visibility: Visibility,
    pub is_static: bool,
    pub declaration: Declaration,
}

/// Brace-delimited statement sequence with its own scope.
#[derive(Debug, Clone)]
pub struct Block {
    pub scope: ScopeId,
    pub statements: Vec<Statement>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone)]
pub enum Declaration {
    Using {
        path: Vec<String>,
        alias: Option<String>,
        location: SourceLocation,
    },
    Namespace {
        name: String,
        scope: ScopeId,
        declarations: Vec<Declaration>,
        location: SourceLocation,
    },
    Class {
        name: String,
        parents: Vec<String>,
        scope: ScopeId,
        members: Vec<Member>,
        location: SourceLocation,
    },
    Variable {
        name: String,
        type_specifier: TypeSpecifier,
        initializer: Option<Expression>,
        location: SourceLocation,
    },
    Function {
        name: String,
        return_type: TypeSpecifier,
        parameters: Vec<Parameter>,
        variadic: bool,
        body: Block,
        location: SourceLocation,
    },
    Constant {
        name: String,
        type_specifier: TypeSpecifier,
        value: Expression,
        location: SourceLocation,
    },
}

/// Initializer slot of a `for` statement.
#[derive(Debug, Clone)]
pub enum ForInitializer {
    Declaration(Box<Declaration>),
    Expression(Expression),
}

/// One `case value:` or `default:` clause of a switch.
#[derive(Debug, Clone)]
pub struct CaseClause {
    /// `None` for the `default` clause.
    pub value: Option<Expression>,
    pub statements: Vec<Statement>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone)]
pub enum Statement {
    Block(Block),
    Declaration(Box<Declaration>),
    Expression {
        expression: Expression,
        location: SourceLocation,
    },
    If {
        condition: Expression,
        then_branch: Box<Statement>,
        else_branch: Option<Box<Statement>>,
        location: SourceLocation,
    },
    While {
        condition: Expression,
        body: Box<Statement>,
        location: SourceLocation,
    },
    DoWhile {
        body: Box<Statement>,
        condition: Expression,
        location: SourceLocation,
    },
    For {
        scope: ScopeId,
        initializer: Option<ForInitializer>,
        condition: Option<Expression>,
        step: Option<Expression>,
        body: Box<Statement>,
        location: SourceLocation,
    },
    Switch {
        discriminant: Expression,
        cases: Vec<CaseClause>,
        location: SourceLocation,
    },
    Return {
        value: Option<Expression>,
        location: SourceLocation,
    },
    Break {
        location: SourceLocation,
    },
    Continue {
        location: SourceLocation,
    },
}

/// Unary prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
    Not,
    BitwiseNot,
    Increment,
    Decrement,
}

impl UnaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<UnaryOperator> {
        match kind {
            TokenKind::Subtraction => Some(UnaryOperator::Negate),
            TokenKind::LogicalNot => Some(UnaryOperator::Not),
            TokenKind::BitwiseNot => Some(UnaryOperator::BitwiseNot),
            TokenKind::Increment => Some(UnaryOperator::Increment),
            TokenKind::Decrement => Some(UnaryOperator::Decrement),
            _ => None,
        }
    }
}

/// Binary and compare operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    ShiftLeft,
    ShiftRight,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
}

impl BinaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<BinaryOperator> {
        match kind {
            TokenKind::LogicalOr => Some(BinaryOperator::LogicalOr),
            TokenKind::LogicalAnd => Some(BinaryOperator::LogicalAnd),
            TokenKind::BitwiseOr => Some(BinaryOperator::BitwiseOr),
            TokenKind::BitwiseXor => Some(BinaryOperator::BitwiseXor),
            TokenKind::BitwiseAnd => Some(BinaryOperator::BitwiseAnd),
            TokenKind::ShiftLeft => Some(BinaryOperator::ShiftLeft),
            TokenKind::ShiftRight => Some(BinaryOperator::ShiftRight),
            TokenKind::Addition => Some(BinaryOperator::Add),
            TokenKind::Subtraction => Some(BinaryOperator::Subtract),
            TokenKind::Multiplication => Some(BinaryOperator::Multiply),
            TokenKind::Division => Some(BinaryOperator::Divide),
            TokenKind::Modulus => Some(BinaryOperator::Modulo),
            TokenKind::Equal => Some(BinaryOperator::Equal),
            TokenKind::NotEqual => Some(BinaryOperator::NotEqual),
            TokenKind::LessThan => Some(BinaryOperator::LessThan),
            TokenKind::GreaterThan => Some(BinaryOperator::GreaterThan),
            TokenKind::LessThanOrEqual => Some(BinaryOperator::LessThanOrEqual),
            TokenKind::GreaterThanOrEqual => {
                Some(BinaryOperator::GreaterThanOrEqual)
            }
            _ => None,
        }
    }
}

/// Plain and compound assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOperator {
    Assign,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    ShiftLeft,
    ShiftRight,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl AssignmentOperator {
    pub fn from_token(kind: TokenKind) -> Option<AssignmentOperator> {
        match kind {
            TokenKind::Assignment => Some(AssignmentOperator::Assign),
            TokenKind::AssignmentBitwiseOr => Some(AssignmentOperator::BitwiseOr),
            TokenKind::AssignmentBitwiseXor => Some(AssignmentOperator::BitwiseXor),
            TokenKind::AssignmentBitwiseAnd => Some(AssignmentOperator::BitwiseAnd),
            TokenKind::AssignmentShiftLeft => Some(AssignmentOperator::ShiftLeft),
            TokenKind::AssignmentShiftRight => Some(AssignmentOperator::ShiftRight),
            TokenKind::AssignmentAddition => Some(AssignmentOperator::Add),
            TokenKind::AssignmentSubtraction => Some(AssignmentOperator::Subtract),
            TokenKind::AssignmentMultiplication => {
                Some(AssignmentOperator::Multiply)
            }
            TokenKind::AssignmentDivision => Some(AssignmentOperator::Divide),
            TokenKind::AssignmentModulus => Some(AssignmentOperator::Modulo),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Expression {
    IntegerLiteral(String, SourceLocation),
    RealLiteral(String, SourceLocation),
    CharacterLiteral(char, SourceLocation),
    StringLiteral(String, SourceLocation),
    BooleanLiteral(bool, SourceLocation),
    NullLiteral(SourceLocation),
    This(SourceLocation),
    Identifier(String, SourceLocation),
    Unary {
        operator: UnaryOperator,
        operand: Box<Expression>,
        location: SourceLocation,
    },
    Binary {
        operator: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
        location: SourceLocation,
    },
    Assignment {
        operator: AssignmentOperator,
        target: Box<Expression>,
        value: Box<Expression>,
        location: SourceLocation,
    },
    Conditional {
        condition: Box<Expression>,
        then_value: Box<Expression>,
        else_value: Box<Expression>,
        location: SourceLocation,
    },
    Invoke {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
        location: SourceLocation,
    },
    Index {
        target: Box<Expression>,
        index: Box<Expression>,
        location: SourceLocation,
    },
    ArrayLiteral {
        elements: Vec<Expression>,
        location: SourceLocation,
    },
    Tuple {
        elements: Vec<Expression>,
        location: SourceLocation,
    },
    Conversion {
        target_type: TypeSpecifier,
        operand: Box<Expression>,
        location: SourceLocation,
    },
}

impl Expression {
    pub fn location(&self) -> SourceLocation {
        match self {
            Expression::IntegerLiteral(_, location)
            | Expression::RealLiteral(_, location)
            | Expression::CharacterLiteral(_, location)
            | Expression::StringLiteral(_, location)
            | Expression::BooleanLiteral(_, location)
            | Expression::NullLiteral(location)
            | Expression::This(location)
            | Expression::Identifier(_, location)
            | Expression::Unary { location, .. }
            | Expression::Binary { location, .. }
            | Expression::Assignment { location, .. }
            | Expression::Conditional { location, .. }
            | Expression::Invoke { location, .. }
            | Expression::Index { location, .. }
            | Expression::ArrayLiteral { location, .. }
            | Expression::Tuple { location, .. }
            | Expression::Conversion { location, .. } => *location,
        }
    }
}

/// Result of a whole parse: the scope tree plus the top-level declarations.
#[derive(Debug)]
pub struct TranslationUnit {
    pub scopes: ScopeArena,
    pub global_scope: ScopeId,
    pub declarations: Vec<Declaration>,
}
