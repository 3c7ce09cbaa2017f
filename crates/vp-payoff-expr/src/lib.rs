//! # vp-payoff-expr
//!
//! Terminal payoffs written as text, e.g. `max(s - 100, 0)` or
//! `10 if s > 105 else 0`, parsed into a [`PayoffExpression`] that any
//! engine accepting a [`Payoff`](vp_instruments::Payoff) can price.
//!
//! The language has one free variable, `s` (the terminal price), and uses
//! Python expression syntax:
//!
//! | Kind        | Forms                                                     |
//! |-------------|-----------------------------------------------------------|
//! | literals    | `100`, `2.5`, `1e-3`, `True`, `False`, `pi`, `e`          |
//! | arithmetic  | `+ - * / % **` (unary `+ -`)                              |
//! | comparison  | `< <= > >= == !=`, chained as in `90 < s < 110`           |
//! | logic       | `and`, `or`, `not`, `a if cond else b`                    |
//! | functions   | `max`, `min`, `abs`, `exp`, `log`/`ln`, `log10`, `sqrt`, `pow`, `floor`, `ceil` |
//!
//! `max`, `min`, and `abs` are the builtins and take no `math.` prefix;
//! `max`/`min` need at least two arguments. Everything else is a `math`
//! module name and may be written with or without the prefix (`exp(s)` and
//! `math.exp(s)` are the same call). Every name is resolved when parsing,
//! so a typo fails before any simulation starts. Nesting deeper than
//! 100 levels, counting parentheses, calls, and operator chains, is a parse
//! error.
//! Failures while evaluating (division by zero, `log` of a non-positive
//! number, ...) surface as
//! [`Error::PayoffEvaluation`](vp_core::Error::PayoffEvaluation).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod ast;
mod error;
mod eval;
mod expression;
mod lexer;
mod parser;

pub use error::{annotate_source, ExprError, Span};
pub use expression::PayoffExpression;
