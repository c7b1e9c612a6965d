use std::rc::Rc;

/// The five declaration types of KPL.
///
/// A type keyword opens every declaration (`num x = 1`) and annotates every
/// function parameter (`(num a, str b)`). At runtime it is also the kind of a
/// stored [`Variable`](crate::interpreter::value::variable::Variable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKeyword {
    /// `fn`
    Fn,
    /// `num`
    Num,
    /// `str`
    Str,
    /// `arr`
    Arr,
    /// `bool`
    Bool,
}

impl std::fmt::Display for TypeKeyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keyword = match self {
            Self::Fn => "fn",
            Self::Num => "num",
            Self::Str => "str",
            Self::Arr => "arr",
            Self::Bool => "bool",
        };
        write!(f, "{keyword}")
    }
}

/// Represents a literal value in the language.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A numeric literal such as `3` or `2.5`.
    Number(f64),
    /// A string literal; holds the text between the quotes.
    Str(String),
    /// `true` or `false`.
    Bool(bool),
}

/// Binary operators. Equality is the only comparison KPL has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `==`
    Equal,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Equal => "==",
        };
        write!(f, "{symbol}")
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Numeric negation, `-x`.
    Negate,
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Every variant carries the source line it started on for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string, boolean).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A unary operation.
    UnaryOp {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Function call expression (e.g. `add(2, 3)`).
    FunctionCall {
        /// Name the callee is looked up by.
        name:      String,
        /// Arguments to the function.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// Array literal expression (e.g. `[1, 2, 3]`).
    ArrayLiteral {
        /// Elements of the array.
        elements: Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use kpl::ast::Expr;
    ///
    /// let expr = Expr::Variable { name: "x".to_string(),
    ///                             line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Variable { line, .. }
            | Self::UnaryOp { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::FunctionCall { line, .. }
            | Self::ArrayLiteral { line, .. } => *line,
        }
    }
}

/// A typed function parameter, `num a`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// The declared type of the parameter.
    pub kind: TypeKeyword,
    /// The name the argument is bound to inside the body.
    pub name: String,
}

/// A user function declared with `fn name = (params) : body :`.
///
/// The body is parsed once, at declaration, and shared by every call.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The function's name.
    pub name:   String,
    /// Parameters in declaration order.
    pub params: Vec<Param>,
    /// The statements between the wrappers.
    pub body:   Rc<[Statement]>,
    /// Line of the declaration.
    pub line:   usize,
}

/// One arm of a `lada` / `badlada` / `hynrei` chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalBranch {
    /// The guard; `None` for the final `hynrei` arm.
    pub condition: Option<Expr>,
    /// Statements executed when this arm is selected.
    pub body:      Vec<Statement>,
    /// Line of the arm's keyword.
    pub line:      usize,
}

/// Header and body of `naduh <start> haduh <end> da <var> : body :`.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopContext {
    /// The loop variable.
    pub var:   String,
    /// First value of the loop variable.
    pub start: Expr,
    /// Last value of the loop variable (inclusive).
    pub end:   Expr,
    /// The loop body.
    pub body:  Vec<Statement>,
}

/// A statement of a KPL program or body.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `num|str|arr|bool name = expression`.
    VariableDeclaration {
        /// The declared type.
        kind:  TypeKeyword,
        /// The variable name.
        name:  String,
        /// The initializer.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `fn name = (params) : body :`.
    Function(FunctionDef),
    /// A conditional chain; at most one branch runs.
    Conditional {
        /// The arms in source order.
        branches: Vec<ConditionalBranch>,
        /// Line of the `lada` keyword.
        line:     usize,
    },
    /// A `naduh` counting loop.
    Loop {
        /// Loop header and body.
        context: LoopContext,
        /// Line of the `naduh` keyword.
        line:    usize,
    },
    /// `=> expression`, returning from the enclosing function or program.
    Return {
        /// The returned expression.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// A bare expression.
    Expression {
        /// The expression.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
}
