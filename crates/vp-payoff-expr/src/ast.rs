//! Expression tree. Names are resolved during parsing, so the tree only
//! refers to the free variable, literal constants, and known functions.

use crate::error::Span;
use vp_core::Real;

/// Expression node with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    /// Longest path from this node to a leaf, counting this node.
    pub height: usize,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        let height = kind.child_height() + 1;
        Self { kind, span, height }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Number(Real),
    /// The terminal price `s`.
    Price,
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// `a < b <= c` is `a < b and b <= c`, with `b` evaluated once.
    Compare {
        first: Box<Expr>,
        rest: Vec<(CompareOp, Expr)>,
    },
    /// Short-circuiting; yields the deciding operand, not a bare 0/1.
    Logical {
        op: LogicalOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Conditional {
        condition: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    Call {
        function: Function,
        args: Vec<Expr>,
    },
}

impl ExprKind {
    fn child_height(&self) -> usize {
        match self {
            Self::Number(_) | Self::Price => 0,
            Self::Unary { operand, .. } => operand.height,
            Self::Binary { lhs, rhs, .. } | Self::Logical { lhs, rhs, .. } => {
                lhs.height.max(rhs.height)
            }
            Self::Compare { first, rest } => rest
                .iter()
                .map(|(_, e)| e.height)
                .fold(first.height, usize::max),
            Self::Conditional {
                condition,
                then,
                otherwise,
            } => condition.height.max(then.height).max(otherwise.height),
            Self::Call { args, .. } => args.iter().map(|a| a.height).max().unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

/// Callable functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Max,
    Min,
    Abs,
    Exp,
    Log,
    Log10,
    Sqrt,
    Pow,
    Floor,
    Ceil,
}

/// Accepted argument counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    Between(usize, usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, n: usize) -> bool {
        match self {
            Self::Exactly(k) => n == k,
            Self::Between(lo, hi) => (lo..=hi).contains(&n),
            Self::AtLeast(k) => n >= k,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::Exactly(1) => "1",
            Self::Exactly(2) => "2",
            Self::Between(1, 2) => "1 or 2",
            Self::AtLeast(2) => "at least 2",
            _ => "a different number of",
        }
    }
}

impl Function {
    /// Look up a function by name. Behind a `math.` prefix only the math
    /// module's names resolve, so `math.max` and `math.abs` do not.
    pub fn lookup(name: &str, qualified: bool) -> Option<Self> {
        Some(match name {
            "max" if !qualified => Self::Max,
            "min" if !qualified => Self::Min,
            "abs" if !qualified => Self::Abs,
            "fabs" => Self::Abs,
            "exp" => Self::Exp,
            "log" | "ln" => Self::Log,
            "log10" => Self::Log10,
            "sqrt" => Self::Sqrt,
            "pow" => Self::Pow,
            "floor" => Self::Floor,
            "ceil" => Self::Ceil,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Max => "max",
            Self::Min => "min",
            Self::Abs => "abs",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Log10 => "log10",
            Self::Sqrt => "sqrt",
            Self::Pow => "pow",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            // A lone argument would have to be iterable.
            Self::Max | Self::Min => Arity::AtLeast(2),
            // log(x) or log(x, base)
            Self::Log => Arity::Between(1, 2),
            Self::Pow => Arity::Exactly(2),
            _ => Arity::Exactly(1),
        }
    }
}

/// Named constants, with or without the `math.` prefix.
pub fn constant(name: &str) -> Option<Real> {
    match name {
        "pi" => Some(std::f64::consts::PI),
        "e" => Some(std::f64::consts::E),
        "tau" => Some(std::f64::consts::TAU),
        "inf" => Some(Real::INFINITY),
        _ => None,
    }
}
