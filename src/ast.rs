use std::rc::Rc;

use crate::util::Position;

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the raw, constant values that can appear directly in
/// source code: integers and double quoted strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A string literal, without its quotes.
    Str(String),
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Expressions always produce a value. Each variant carries the position of
/// the token that introduced it, used for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (integer or string).
    Literal {
        /// The constant value.
        value:    LiteralValue,
        /// Position in the source code.
        position: Position,
    },
    /// Array literal expression (e.g. `[1, 2, 3]`).
    ArrayLiteral {
        /// Elements of the array, in order.
        elements: Vec<Self>,
        /// Position in the source code.
        position: Position,
    },
    /// Reference to a variable by name.
    Identifier {
        /// Name of the variable.
        name:     String,
        /// Position in the source code.
        position: Position,
    },
    /// Array indexing expression (e.g., `arr[2]`).
    Index {
        /// The array to index into.
        target:   Box<Self>,
        /// The index to access.
        index:    Box<Self>,
        /// Position of the opening bracket.
        position: Position,
    },
    /// A unary operation (negation).
    UnaryOp {
        /// The unary operator to apply.
        op:       UnaryOperator,
        /// The operand expression.
        operand:  Box<Self>,
        /// Position in the source code.
        position: Position,
    },
    /// A binary operation (addition, comparison, etc.).
    BinaryOp {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       BinaryOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Position of the operator.
        position: Position,
    },
    /// Assignment to an existing binding or array element.
    Assign {
        /// What is being assigned to.
        target:   AssignTarget,
        /// The value which is being assigned.
        value:    Box<Self>,
        /// Position of the `=` token.
        position: Position,
    },
    /// Call expression (e.g. `f(x)`, `make()(1)`).
    Call {
        /// The expression producing the function to call.
        callee:    Box<Self>,
        /// Arguments to the function.
        arguments: Vec<Self>,
        /// Position of the opening parenthesis.
        position:  Position,
    },
}

impl Expr {
    /// Gets the source position of `self`.
    ///
    /// ```
    /// use minilang::{ast::Expr, util::Position};
    ///
    /// let expr = Expr::Identifier { name:     "x".to_string(),
    ///                               position: Position::new(5, 2), };
    ///
    /// assert_eq!(expr.position(), Position::new(5, 2));
    /// ```
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Literal { position, .. }
            | Self::ArrayLiteral { position, .. }
            | Self::Identifier { position, .. }
            | Self::Index { position, .. }
            | Self::UnaryOp { position, .. }
            | Self::BinaryOp { position, .. }
            | Self::Assign { position, .. }
            | Self::Call { position, .. } => *position,
        }
    }
}

/// The left-hand side of an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignTarget {
    /// Rebinds a name in the nearest scope that already holds it.
    Identifier {
        /// Name of the variable.
        name: String,
    },
    /// Replaces one element of an array in place.
    Index {
        /// The array being mutated.
        target: Box<Expr>,
        /// Index of the element to replace.
        index:  Box<Expr>,
    },
}

/// A brace-delimited sequence of statements. Introduces a new lexical scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Statements inside the block.
    pub statements: Vec<Statement>,
    /// Position of the opening brace.
    pub position:   Position,
}

/// Represents a user-defined function definition.
///
/// The definition is shared between the syntax tree and every function value
/// created from it, hence the `Rc` in [`Statement::Function`].
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name of the function.
    pub name:     String,
    /// The parameter names, in order.
    pub params:   Vec<String>,
    /// The body executed when the function is called.
    pub body:     Block,
    /// Position of the `def` keyword.
    pub position: Position,
}

/// The three clauses and body of a C-style `for` loop.
#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    /// Executed once, in the loop's own scope.
    pub init:      Box<Statement>,
    /// Checked before every iteration.
    pub condition: Expr,
    /// Executed after every body execution.
    pub update:    Box<Statement>,
    /// The loop body.
    pub body:      Block,
}

/// Represents a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A variable declaration using `let`.
    Let {
        /// The name of the variable.
        name:        String,
        /// The initial value of the variable.
        initializer: Expr,
        /// Position of the `let` keyword.
        position:    Position,
    },
    /// A nested block.
    Block(Block),
    /// Conditional execution with an optional `else` branch.
    ///
    /// `else if` chains are represented as an else-block wrapping a single
    /// `If` statement.
    If {
        /// The condition expression.
        condition:   Expr,
        /// Executed when the condition is truthy.
        then_branch: Block,
        /// Executed when the condition is falsy.
        else_branch: Option<Block>,
        /// Position of the `if` keyword.
        position:    Position,
    },
    /// A `while` loop.
    While {
        /// Checked before every iteration.
        condition: Expr,
        /// The loop body.
        body:      Block,
        /// Position of the `while` keyword.
        position:  Position,
    },
    /// A `for (init; condition; update)` loop.
    For {
        /// The loop clauses and body.
        context:  ForLoop,
        /// Position of the `for` keyword.
        position: Position,
    },
    /// A user-defined function declaration.
    Function(Rc<FunctionDef>),
    /// Leaves the enclosing function, optionally with a value.
    Return {
        /// The returned expression; `null` when absent.
        value:    Option<Expr>,
        /// Position of the `return` keyword.
        position: Position,
    },
    /// A standalone expression evaluated for its result.
    Expression {
        /// The expression to evaluate.
        expr:     Expr,
        /// Position in the source code.
        position: Position,
    },
}

impl Statement {
    /// Gets the source position of `self`.
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::Let { position, .. }
            | Self::If { position, .. }
            | Self::While { position, .. }
            | Self::For { position, .. }
            | Self::Return { position, .. }
            | Self::Expression { position, .. } => *position,
            Self::Block(block) => block.position,
            Self::Function(def) => def.position,
        }
    }
}

/// The root of a parsed source text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Top-level statements, executed in order in the global scope.
    pub statements: Vec<Statement>,
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic and comparisons.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Truncating integer division (`/`)
    Div,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
        }
    }
}
