use std::fmt;
use std::str::FromStr;

use vp_core::{Error, Real, Result};
use vp_instruments::Payoff;

use crate::ast::Expr;
use crate::error::ExprError;
use crate::{eval, lexer, parser};

/// A parsed terminal-payoff expression in the free variable `s`.
///
/// ```
/// use vp_instruments::Payoff;
/// use vp_payoff_expr::PayoffExpression;
///
/// let call: PayoffExpression = "max(s - 100, 0)".parse().unwrap();
/// assert_eq!(call.value(125.0).unwrap(), 25.0);
/// assert_eq!(call.to_string(), "max(s - 100, 0)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PayoffExpression {
    source: String,
    root: Expr,
}

impl PayoffExpression {
    /// Parse `text`, resolving every name and checking call arities.
    ///
    /// # Errors
    /// [`ExprError`] for blank input, a bad token, a syntax error, an unknown
    /// name, or a call with the wrong number of arguments.
    pub fn parse(text: &str) -> Result<Self, ExprError> {
        if text.trim().is_empty() {
            return Err(ExprError::Empty);
        }
        let tokens = lexer::tokenize(text)?;
        let root = parser::parse(tokens, text.len())?;
        tracing::debug!(expression = text, "parsed payoff expression");
        Ok(Self {
            source: text.to_string(),
            root,
        })
    }

    /// The text the expression was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluate at terminal price `s`.
    ///
    /// # Errors
    /// [`ExprError::Evaluation`] on division or modulo by zero, a domain
    /// error, overflow, or a non-finite result.
    pub fn evaluate(&self, s: Real) -> Result<Real, ExprError> {
        let v = eval::evaluate(&self.root, s)?;
        if !v.is_finite() {
            return Err(ExprError::evaluation(
                format!("expression evaluated to {v}"),
                self.root.span,
            ));
        }
        Ok(v)
    }
}

impl Payoff for PayoffExpression {
    fn value(&self, price: Real) -> Result<Real> {
        self.evaluate(price)
            .map_err(|e| Error::payoff(price, e.to_string()))
    }

    fn name(&self) -> &str {
        "Expression"
    }

    fn description(&self) -> String {
        format!("Expression {}", self.source)
    }
}

impl fmt::Display for PayoffExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for PayoffExpression {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Span;

    #[test]
    fn blank_input_rejected() {
        assert_eq!(PayoffExpression::parse(""), Err(ExprError::Empty));
        assert_eq!(PayoffExpression::parse("  \t "), Err(ExprError::Empty));
    }

    #[test]
    fn payoff_error_names_the_price() {
        let expr = PayoffExpression::parse("1 / (s - 100)").unwrap();
        match expr.value(100.0) {
            Err(Error::PayoffEvaluation { price, reason }) => {
                assert_eq!(price, 100.0);
                assert!(reason.contains("division by zero"), "{reason}");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(expr.value(101.0).unwrap(), 1.0);
    }

    #[test]
    fn non_finite_result_rejected() {
        let expr = PayoffExpression::parse("s * inf").unwrap();
        assert_eq!(
            expr.evaluate(1.0),
            Err(ExprError::Evaluation {
                message: "expression evaluated to inf".into(),
                span: Span::new(0, 7),
            })
        );
    }

    #[test]
    fn description_and_display() {
        let expr: PayoffExpression = "math.sqrt(s)".parse().unwrap();
        assert_eq!(expr.source(), "math.sqrt(s)");
        assert_eq!(expr.name(), "Expression");
        assert_eq!(expr.description(), "Expression math.sqrt(s)");
        assert_eq!(format!("{expr}"), "math.sqrt(s)");
    }
}
