//! Abstract syntax tree types.
//!
//! Statements and expressions are closed enums so the evaluator can match
//! exhaustively. Nodes own their children; function bodies are shared via
//! `Rc` because runtime Function values keep a reference to the body
//! subtree after parsing.

use std::rc::Rc;

use serde_json::json;

use crate::lexer::TokenKind;

/// Operators across arithmetic, comparison, logic, bitwise, assignment and
/// update expressions. `Typeof` is produced from the `typeof` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Exponent,

    EqualTo,
    EqualToStrict,
    NotEqualTo,
    NotEqualToStrict,
    LessThan,
    LessThanOrEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,

    And,
    Or,
    Not,

    BitAnd,
    BitOr,

    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,

    Increment,
    Decrement,

    Typeof,
}

impl Operator {
    /// The single source-of-truth mapping from token kinds to operators.
    /// `TokenKind::is_operator` is derived from this function's domain.
    pub fn from_token(kind: TokenKind) -> Option<Operator> {
        let op = match kind {
            TokenKind::Plus => Operator::Plus,
            TokenKind::Minus => Operator::Minus,
            TokenKind::Asterisk => Operator::Multiply,
            TokenKind::Slash => Operator::Divide,
            TokenKind::Percent => Operator::Modulo,
            TokenKind::Exponentiation => Operator::Exponent,
            TokenKind::EqualTo => Operator::EqualTo,
            TokenKind::EqualToStrict => Operator::EqualToStrict,
            TokenKind::NotEqualTo => Operator::NotEqualTo,
            TokenKind::NotEqualToStrict => Operator::NotEqualToStrict,
            TokenKind::LessThan => Operator::LessThan,
            TokenKind::LessThanOrEqualTo => Operator::LessThanOrEqualTo,
            TokenKind::GreaterThan => Operator::GreaterThan,
            TokenKind::GreaterThanOrEqualTo => Operator::GreaterThanOrEqualTo,
            TokenKind::And => Operator::And,
            TokenKind::Or => Operator::Or,
            TokenKind::Not => Operator::Not,
            TokenKind::Ampersand => Operator::BitAnd,
            TokenKind::Pipe => Operator::BitOr,
            TokenKind::Equals => Operator::Assign,
            TokenKind::AdditionAssignment => Operator::AddAssign,
            TokenKind::SubtractionAssignment => Operator::SubtractAssign,
            TokenKind::MultiplicationAssignment => Operator::MultiplyAssign,
            TokenKind::DivisionAssignment => Operator::DivideAssign,
            TokenKind::Increment => Operator::Increment,
            TokenKind::Decrement => Operator::Decrement,
            _ => return None,
        };
        Some(op)
    }

    /// Textual form used in debug output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Modulo => "%",
            Operator::Exponent => "**",
            Operator::EqualTo => "==",
            Operator::EqualToStrict => "===",
            Operator::NotEqualTo => "!=",
            Operator::NotEqualToStrict => "!==",
            Operator::LessThan => "<",
            Operator::LessThanOrEqualTo => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqualTo => ">=",
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::Not => "!",
            Operator::BitAnd => "&",
            Operator::BitOr => "|",
            Operator::Assign => "=",
            Operator::AddAssign => "+=",
            Operator::SubtractAssign => "-=",
            Operator::MultiplyAssign => "*=",
            Operator::DivideAssign => "/=",
            Operator::Increment => "++",
            Operator::Decrement => "--",
            Operator::Typeof => "typeof",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TokenKind {
    /// Whether this token kind maps to an operator.
    pub fn is_operator(&self) -> bool {
        Operator::from_token(*self).is_some()
    }
}

/// Root of every parsed source: an ordered sequence of statements.
#[derive(Debug, Clone)]
pub struct Program {
    pub body: Vec<Statement>,
}

impl Program {
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "type": "Program",
            "body": self.body.iter().map(Statement::to_json).collect::<Vec<_>>(),
        })
    }
}

// ============ STATEMENTS ============

#[derive(Debug, Clone)]
pub enum Statement {
    Expression(ExpressionStatement),
    Block(BlockStatement),
    If(IfStatement),
    While(WhileStatement),
    For(ForStatement),
    FunctionDeclaration(FunctionDeclarationStatement),
    Return(ReturnStatement),
    Throw(ThrowStatement),
    TryCatch(TryCatchStatement),
}

#[derive(Debug, Clone)]
pub struct ExpressionStatement {
    pub expression: Expression,
}

#[derive(Debug, Clone)]
pub struct BlockStatement {
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone)]
pub struct IfStatement {
    pub test: Expression,
    pub consequent: Box<Statement>,
    pub alternative: Option<Box<Statement>>,
}

#[derive(Debug, Clone)]
pub struct WhileStatement {
    pub test: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone)]
pub struct ForStatement {
    pub init: Expression,
    pub test: Expression,
    pub update: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone)]
pub struct FunctionDeclarationStatement {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: Rc<Statement>,
}

#[derive(Debug, Clone)]
pub struct ReturnStatement {
    pub argument: Option<Expression>,
}

#[derive(Debug, Clone)]
pub struct ThrowStatement {
    pub argument: Expression,
}

#[derive(Debug, Clone)]
pub struct TryCatchStatement {
    pub try_body: Box<Statement>,
    pub catch_identifier: String,
    pub catch_body: Box<Statement>,
}

impl Statement {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Statement::Expression(s) => json!({
                "type": "ExpressionStatement",
                "expression": s.expression.to_json(),
            }),
            Statement::Block(s) => json!({
                "type": "BlockStatement",
                "body": s.body.iter().map(Statement::to_json).collect::<Vec<_>>(),
            }),
            Statement::If(s) => json!({
                "type": "IfStatement",
                "test": s.test.to_json(),
                "consequent": s.consequent.to_json(),
                "alternative": s.alternative.as_ref().map(|a| a.to_json()),
            }),
            Statement::While(s) => json!({
                "type": "WhileStatement",
                "test": s.test.to_json(),
                "body": s.body.to_json(),
            }),
            Statement::For(s) => json!({
                "type": "ForStatement",
                "init": s.init.to_json(),
                "test": s.test.to_json(),
                "update": s.update.to_json(),
                "body": s.body.to_json(),
            }),
            Statement::FunctionDeclaration(s) => json!({
                "type": "FunctionDeclarationStatement",
                "identifier": &s.name,
                "parameters": &s.parameters,
                "body": s.body.to_json(),
            }),
            Statement::Return(s) => json!({
                "type": "ReturnStatement",
                "argument": s.argument.as_ref().map(Expression::to_json),
            }),
            Statement::Throw(s) => json!({
                "type": "ThrowStatement",
                "argument": s.argument.to_json(),
            }),
            Statement::TryCatch(s) => json!({
                "type": "TryCatchStatement",
                "try": s.try_body.to_json(),
                "identifier": &s.catch_identifier,
                "catch": s.catch_body.to_json(),
            }),
        }
    }
}

// ============ EXPRESSIONS ============

#[derive(Debug, Clone)]
pub enum Expression {
    NumberLiteral(f64),
    StringLiteral(String),
    BooleanLiteral(bool),
    NullLiteral,
    Identifier(String),
    This,
    Array(ArrayExpression),
    Object(ObjectExpression),
    Function(FunctionExpression),
    ArrowFunction(ArrowFunctionExpression),
    VariableDeclaration(VariableDeclarationExpression),
    Call(CallExpression),
    New(NewExpression),
    Member(MemberExpression),
    Binary(BinaryExpression),
    Unary(UnaryExpression),
    Update(UpdateExpression),
    Assignment(AssignmentExpression),
    Ternary(TernaryExpression),
}

#[derive(Debug, Clone)]
pub struct ArrayExpression {
    pub elements: Vec<Expression>,
}

#[derive(Debug, Clone)]
pub struct ObjectExpression {
    pub properties: Vec<(String, Expression)>,
}

#[derive(Debug, Clone)]
pub struct FunctionExpression {
    pub name: Option<String>,
    pub parameters: Vec<String>,
    pub body: Rc<Statement>,
}

#[derive(Debug, Clone)]
pub struct ArrowFunctionExpression {
    pub parameters: Vec<String>,
    pub body: Rc<Statement>,
}

/// Kind of a variable declaration. `Let` and `Const` are parsed but behave
/// like `Var` at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

#[derive(Debug, Clone)]
pub struct VariableDeclarationExpression {
    pub kind: VariableKind,
    pub identifiers: Vec<String>,
    pub init: Option<Box<Expression>>,
}

#[derive(Debug, Clone)]
pub struct CallExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
}

#[derive(Debug, Clone)]
pub struct NewExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
}

#[derive(Debug, Clone)]
pub struct MemberExpression {
    pub object: Box<Expression>,
    pub property: Box<Expression>,
    pub computed: bool,
}

#[derive(Debug, Clone)]
pub struct BinaryExpression {
    pub left: Box<Expression>,
    pub operator: Operator,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone)]
pub struct UnaryExpression {
    pub operator: Operator,
    pub operand: Box<Expression>,
}

#[derive(Debug, Clone)]
pub struct UpdateExpression {
    pub target: Box<Expression>,
    pub operator: Operator,
    pub prefix: bool,
}

#[derive(Debug, Clone)]
pub struct AssignmentExpression {
    pub target: Box<Expression>,
    pub operator: Operator,
    pub value: Box<Expression>,
}

#[derive(Debug, Clone)]
pub struct TernaryExpression {
    pub test: Box<Expression>,
    pub consequent: Box<Expression>,
    pub alternative: Box<Expression>,
}

impl Expression {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Expression::NumberLiteral(value) => json!({
                "type": "NumberLiteralExpression",
                "value": value,
            }),
            Expression::StringLiteral(value) => json!({
                "type": "StringLiteralExpression",
                "value": value,
            }),
            Expression::BooleanLiteral(value) => json!({
                "type": "BooleanLiteralExpression",
                "value": value,
            }),
            Expression::NullLiteral => json!({
                "type": "NullLiteralExpression",
            }),
            Expression::Identifier(name) => json!({
                "type": "IdentifierExpression",
                "name": name,
            }),
            Expression::This => json!({
                "type": "ThisExpression",
            }),
            Expression::Array(e) => json!({
                "type": "ArrayExpression",
                "elements": e.elements.iter().map(Expression::to_json).collect::<Vec<_>>(),
            }),
            Expression::Object(e) => json!({
                "type": "ObjectExpression",
                "properties": e.properties
                    .iter()
                    .map(|(key, value)| json!({ "key": key, "value": value.to_json() }))
                    .collect::<Vec<_>>(),
            }),
            Expression::Function(e) => json!({
                "type": "FunctionExpression",
                "identifier": &e.name,
                "parameters": &e.parameters,
                "body": e.body.to_json(),
            }),
            Expression::ArrowFunction(e) => json!({
                "type": "ArrowFunctionExpression",
                "parameters": &e.parameters,
                "body": e.body.to_json(),
            }),
            Expression::VariableDeclaration(e) => json!({
                "type": "VariableDeclarationExpression",
                "kind": e.kind.as_str(),
                "identifiers": &e.identifiers,
                "value": e.init.as_ref().map(|init| init.to_json()),
            }),
            Expression::Call(e) => json!({
                "type": "CallExpression",
                "callee": e.callee.to_json(),
                "arguments": e.arguments.iter().map(Expression::to_json).collect::<Vec<_>>(),
            }),
            Expression::New(e) => json!({
                "type": "NewExpression",
                "callee": e.callee.to_json(),
                "arguments": e.arguments.iter().map(Expression::to_json).collect::<Vec<_>>(),
            }),
            Expression::Member(e) => json!({
                "type": "MemberExpression",
                "object": e.object.to_json(),
                "property": e.property.to_json(),
                "computed": e.computed,
            }),
            Expression::Binary(e) => json!({
                "type": "BinaryExpression",
                "left": e.left.to_json(),
                "right": e.right.to_json(),
                "op": e.operator.as_str(),
            }),
            Expression::Unary(e) => json!({
                "type": "UnaryExpression",
                "op": e.operator.as_str(),
                "operand": e.operand.to_json(),
            }),
            Expression::Update(e) => json!({
                "type": "UpdateExpression",
                "op": e.operator.as_str(),
                "prefix": e.prefix,
                "target": e.target.to_json(),
            }),
            Expression::Assignment(e) => json!({
                "type": "AssignmentExpression",
                "op": e.operator.as_str(),
                "target": e.target.to_json(),
                "value": e.value.to_json(),
            }),
            Expression::Ternary(e) => json!({
                "type": "TernaryExpression",
                "test": e.test.to_json(),
                "consequent": e.consequent.to_json(),
                "alternative": e.alternative.to_json(),
            }),
        }
    }
}
