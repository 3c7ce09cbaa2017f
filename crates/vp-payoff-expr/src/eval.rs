//! Tree-walking evaluator.
//!
//! Booleans are numbers: comparisons and `not` yield `1.0` or `0.0`, and any
//! non-zero value is true. `and`/`or` short-circuit and return the operand
//! that decided the result. `%` takes the sign of the divisor.

use crate::ast::*;
use crate::error::{ExprError, Span};
use vp_core::Real;

type EvalResult = Result<Real, ExprError>;

/// Evaluate `expr` at terminal price `s`.
pub fn evaluate(expr: &Expr, s: Real) -> EvalResult {
    match &expr.kind {
        ExprKind::Number(n) => Ok(*n),
        ExprKind::Price => Ok(s),
        ExprKind::Unary { op, operand } => {
            let v = evaluate(operand, s)?;
            Ok(match op {
                UnaryOp::Plus => v,
                UnaryOp::Neg => -v,
                UnaryOp::Not => from_bool(!truthy(v)),
            })
        }
        ExprKind::Binary { op, lhs, rhs } => {
            let a = evaluate(lhs, s)?;
            let b = evaluate(rhs, s)?;
            binary(*op, a, b, expr.span)
        }
        ExprKind::Compare { first, rest } => {
            let mut left = evaluate(first, s)?;
            for (op, rhs) in rest {
                let right = evaluate(rhs, s)?;
                if !compare(*op, left, right) {
                    return Ok(0.0);
                }
                left = right;
            }
            Ok(1.0)
        }
        ExprKind::Logical { op, lhs, rhs } => {
            let a = evaluate(lhs, s)?;
            match (op, truthy(a)) {
                (LogicalOp::And, false) | (LogicalOp::Or, true) => Ok(a),
                _ => evaluate(rhs, s),
            }
        }
        ExprKind::Conditional {
            condition,
            then,
            otherwise,
        } => {
            if truthy(evaluate(condition, s)?) {
                evaluate(then, s)
            } else {
                evaluate(otherwise, s)
            }
        }
        ExprKind::Call { function, args } => {
            let values = args
                .iter()
                .map(|a| evaluate(a, s))
                .collect::<Result<Vec<_>, _>>()?;
            call(*function, &values, expr.span)
        }
    }
}

fn truthy(v: Real) -> bool {
    v != 0.0
}

fn from_bool(b: bool) -> Real {
    if b {
        1.0
    } else {
        0.0
    }
}

fn compare(op: CompareOp, a: Real, b: Real) -> bool {
    match op {
        CompareOp::Eq => a == b,
        CompareOp::Ne => a != b,
        CompareOp::Lt => a < b,
        CompareOp::Le => a <= b,
        CompareOp::Gt => a > b,
        CompareOp::Ge => a >= b,
    }
}

fn binary(op: BinaryOp, a: Real, b: Real, span: Span) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(a + b),
        BinaryOp::Sub => Ok(a - b),
        BinaryOp::Mul => Ok(a * b),
        BinaryOp::Div => {
            if b == 0.0 {
                return Err(ExprError::evaluation("division by zero", span));
            }
            Ok(a / b)
        }
        BinaryOp::Rem => {
            if b == 0.0 {
                return Err(ExprError::evaluation("modulo by zero", span));
            }
            let r = a % b;
            Ok(if r != 0.0 && (r < 0.0) != (b < 0.0) { r + b } else { r })
        }
        BinaryOp::Pow => power(a, b, span),
    }
}

fn power(base: Real, exponent: Real, span: Span) -> EvalResult {
    if base == 0.0 && exponent < 0.0 {
        return Err(ExprError::evaluation(
            "zero cannot be raised to a negative power",
            span,
        ));
    }
    if base < 0.0 && exponent.is_finite() && exponent.fract() != 0.0 {
        return Err(ExprError::evaluation(
            format!("negative base {base} with fractional exponent {exponent}"),
            span,
        ));
    }
    let v = base.powf(exponent);
    if v.is_infinite() && base.is_finite() && exponent.is_finite() {
        return Err(ExprError::evaluation("power overflowed", span));
    }
    Ok(v)
}

fn call(function: Function, args: &[Real], span: Span) -> EvalResult {
    let x = args.first().copied().unwrap_or(Real::NAN);
    let domain = |what: &str| ExprError::evaluation(format!("{what}: math domain error"), span);
    match function {
        // First extreme wins, so NaN propagates only from the first argument.
        Function::Max => Ok(args.iter().skip(1).fold(x, |m, &v| if v > m { v } else { m })),
        Function::Min => Ok(args.iter().skip(1).fold(x, |m, &v| if v < m { v } else { m })),
        Function::Abs => Ok(x.abs()),
        Function::Exp => {
            let v = x.exp();
            if v.is_infinite() && x.is_finite() {
                return Err(ExprError::evaluation("exp overflowed", span));
            }
            Ok(v)
        }
        Function::Log => {
            if x <= 0.0 {
                return Err(domain(&format!("log({x})")));
            }
            match args.get(1) {
                None => Ok(x.ln()),
                Some(&base) if base <= 0.0 || base == 1.0 => {
                    Err(domain(&format!("log base {base}")))
                }
                Some(&base) => Ok(x.ln() / base.ln()),
            }
        }
        Function::Log10 => {
            if x <= 0.0 {
                return Err(domain(&format!("log10({x})")));
            }
            Ok(x.log10())
        }
        Function::Sqrt => {
            if x < 0.0 {
                return Err(domain(&format!("sqrt({x})")));
            }
            Ok(x.sqrt())
        }
        Function::Pow => power(x, args.get(1).copied().unwrap_or(Real::NAN), span),
        Function::Floor => Ok(x.floor()),
        Function::Ceil => Ok(x.ceil()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::parse;
    use approx::assert_abs_diff_eq;

    fn eval(src: &str, s: Real) -> EvalResult {
        let expr = parse(tokenize(src)?, src.len())?;
        evaluate(&expr, s)
    }

    fn value(src: &str, s: Real) -> Real {
        eval(src, s).unwrap()
    }

    #[test]
    fn arithmetic_precedence() {
        assert_eq!(value("1 + 2 * 3", 0.0), 7.0);
        assert_eq!(value("(1 + 2) * 3", 0.0), 9.0);
        assert_eq!(value("-2 ** 2", 0.0), -4.0);
        assert_eq!(value("2 ** -1", 0.0), 0.5);
        assert_eq!(value("2 ** 3 ** 2", 0.0), 512.0);
        assert_eq!(value("10 - 4 - 3", 0.0), 3.0);
        assert_eq!(value("+s", 7.0), 7.0);
    }

    #[test]
    fn remainder_follows_divisor_sign() {
        assert_eq!(value("7 % 3", 0.0), 1.0);
        assert_eq!(value("-7 % 3", 0.0), 2.0);
        assert_eq!(value("7 % -3", 0.0), -2.0);
        assert_eq!(value("s % 10", 125.0), 5.0);
    }

    #[test]
    fn vanilla_payoffs() {
        assert_eq!(value("max(s - 100, 0)", 120.0), 20.0);
        assert_eq!(value("max(s - 100, 0)", 80.0), 0.0);
        assert_eq!(value("max(100 - s, 0)", 80.0), 20.0);
        assert_eq!(value("min(max(s - 90, 0), 20)", 150.0), 20.0);
        assert_eq!(value("min(s, 5, 1, 9)", 3.0), 1.0);
    }

    #[test]
    fn comparisons_and_logic() {
        assert_eq!(value("s > 100", 101.0), 1.0);
        assert_eq!(value("s > 100", 100.0), 0.0);
        assert_eq!(value("90 < s < 110", 100.0), 1.0);
        assert_eq!(value("90 < s < 110", 120.0), 0.0);
        assert_eq!(value("not s > 100", 50.0), 1.0);
        // Python-style: the deciding operand is returned.
        assert_eq!(value("s > 100 and s - 100", 130.0), 30.0);
        assert_eq!(value("s > 100 and s - 100", 70.0), 0.0);
        assert_eq!(value("0 or s", 4.0), 4.0);
        assert_eq!(value("True + True", 0.0), 2.0);
    }

    #[test]
    fn conditional_expression() {
        let digital = "10 if s >= 100 else 0";
        assert_eq!(value(digital, 100.0), 10.0);
        assert_eq!(value(digital, 99.0), 0.0);
        assert_eq!(value("1 if s < 90 else 2 if s < 110 else 3", 100.0), 2.0);
    }

    #[test]
    fn short_circuit_skips_failures() {
        assert_eq!(value("s > 0 or 1 / 0", 5.0), 1.0);
        assert_eq!(value("0 and 1 / 0", 5.0), 0.0);
        assert_eq!(value("1 if s > 0 else 1 / 0", 5.0), 1.0);
    }

    #[test]
    fn math_functions() {
        assert_abs_diff_eq!(value("math.exp(1)", 0.0), std::f64::consts::E, epsilon = 1e-15);
        assert_abs_diff_eq!(value("log(s)", 1.0), 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(value("log(8, 2)", 0.0), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(value("log10(s)", 1000.0), 3.0, epsilon = 1e-12);
        assert_eq!(value("sqrt(s)", 16.0), 4.0);
        assert_eq!(value("pow(s, 2)", 3.0), 9.0);
        assert_eq!(value("abs(100 - s)", 120.0), 20.0);
        assert_eq!(value("floor(s / 10)", 125.0), 12.0);
        assert_eq!(value("ceil(s / 10)", 125.0), 13.0);
        assert_abs_diff_eq!(value("2 * pi", 0.0), std::f64::consts::TAU, epsilon = 1e-15);
    }

    #[test]
    fn evaluation_failures_carry_span() {
        let err = eval("max(s / (s - 100), 0)", 100.0).unwrap_err();
        assert_eq!(
            err,
            ExprError::Evaluation {
                message: "division by zero".into(),
                span: Span::new(4, 17),
            }
        );
        assert!(matches!(eval("s % 0", 1.0), Err(ExprError::Evaluation { .. })));
        assert!(matches!(eval("log(s)", 0.0), Err(ExprError::Evaluation { .. })));
        assert!(matches!(eval("log(s, 1)", 5.0), Err(ExprError::Evaluation { .. })));
        assert!(matches!(eval("sqrt(s - 1)", 0.0), Err(ExprError::Evaluation { .. })));
        assert!(matches!(eval("(-s) ** 0.5", 4.0), Err(ExprError::Evaluation { .. })));
        assert!(matches!(eval("0 ** -1", 4.0), Err(ExprError::Evaluation { .. })));
        assert!(matches!(eval("exp(s)", 1e6), Err(ExprError::Evaluation { .. })));
    }
}
