//! Recursive-descent parser.
//!
//! Precedence, loosest first:
//!
//! ```text
//! expr        := or_expr ("if" or_expr "else" expr)?
//! or_expr     := and_expr ("or" and_expr)*
//! and_expr    := not_expr ("and" not_expr)*
//! not_expr    := "not" not_expr | comparison
//! comparison  := additive (cmp_op additive)*
//! additive    := term (("+" | "-") term)*
//! term        := factor (("*" | "/" | "%") factor)*
//! factor      := ("+" | "-") factor | power
//! power       := primary ("**" factor)?
//! primary     := number | "True" | "False" | name | call | "(" expr ")"
//! ```
//!
//! `-s ** 2` is therefore `-(s ** 2)` and `2 ** -1` is `0.5`.
//!
//! Both the parser's recursion and the height of the tree it builds are
//! capped at [`MAX_DEPTH`], so neither parsing, evaluating, nor dropping an
//! expression can exhaust the stack.

use crate::ast::*;
use crate::error::{ExprError, Span};
use crate::lexer::{Token, TokenKind};

/// Deepest nesting accepted. Every level of parentheses costs about ten
/// parser frames, so this stays well inside a 2 MiB thread stack.
pub const MAX_DEPTH: usize = 100;

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    source_len: usize,
    depth: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>, source_len: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            source_len,
            depth: 0,
        }
    }

    /// Run `rule` one level deeper, failing once the nesting limit is hit.
    fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, ExprError>,
    ) -> Result<T, ExprError> {
        if self.depth >= MAX_DEPTH {
            return Err(too_deep(self.current_span()));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn advance(&mut self) -> Option<&Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &TokenKind) -> Result<Span, ExprError> {
        match self.tokens.get(self.pos) {
            Some(tok) if &tok.kind == expected => {
                self.pos += 1;
                Ok(tok.span)
            }
            Some(tok) => Err(ExprError::Parse {
                message: format!(
                    "expected {}, got {}",
                    expected.describe(),
                    tok.kind.describe()
                ),
                span: tok.span,
            }),
            None => Err(ExprError::Parse {
                message: format!("expected {}, got end of input", expected.describe()),
                span: self.eof_span(),
            }),
        }
    }

    fn current_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map_or_else(|| self.eof_span(), |t| t.span)
    }

    fn eof_span(&self) -> Span {
        Span::new(self.source_len, self.source_len)
    }

    fn unexpected(&self, what: &str) -> ExprError {
        let message = match self.peek_kind() {
            Some(kind) => format!("expected {what}, got {}", kind.describe()),
            None => format!("expected {what}, got end of input"),
        };
        ExprError::Parse {
            message,
            span: self.current_span(),
        }
    }
}

/// Parse a token stream into an expression tree.
pub fn parse(tokens: Vec<Token>, source_len: usize) -> Result<Expr, ExprError> {
    let mut p = Parser::new(tokens, source_len);
    let expr = parse_expr(&mut p)?;
    if p.peek_kind().is_some() {
        return Err(p.unexpected("end of expression"));
    }
    Ok(expr)
}

fn too_deep(span: Span) -> ExprError {
    ExprError::Parse {
        message: "expression nested too deeply".into(),
        span,
    }
}

/// Build a node, rejecting it if the tree would grow past [`MAX_DEPTH`].
fn node(kind: ExprKind, span: Span) -> Result<Expr, ExprError> {
    let expr = Expr::new(kind, span);
    if expr.height > MAX_DEPTH {
        return Err(too_deep(span));
    }
    Ok(expr)
}

fn parse_expr(p: &mut Parser) -> Result<Expr, ExprError> {
    p.nested(parse_conditional)
}

fn parse_conditional(p: &mut Parser) -> Result<Expr, ExprError> {
    let then = parse_or(p)?;
    if !p.eat(&TokenKind::If) {
        return Ok(then);
    }
    let condition = parse_or(p)?;
    p.expect(&TokenKind::Else)?;
    let otherwise = parse_expr(p)?;
    let span = then.span.to(otherwise.span);
    node(
        ExprKind::Conditional {
            condition: Box::new(condition),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        },
        span,
    )
}

fn parse_or(p: &mut Parser) -> Result<Expr, ExprError> {
    let mut left = parse_and(p)?;
    while p.eat(&TokenKind::Or) {
        let right = parse_and(p)?;
        left = logical(LogicalOp::Or, left, right)?;
    }
    Ok(left)
}

fn parse_and(p: &mut Parser) -> Result<Expr, ExprError> {
    let mut left = parse_not(p)?;
    while p.eat(&TokenKind::And) {
        let right = parse_not(p)?;
        left = logical(LogicalOp::And, left, right)?;
    }
    Ok(left)
}

fn logical(op: LogicalOp, lhs: Expr, rhs: Expr) -> Result<Expr, ExprError> {
    let span = lhs.span.to(rhs.span);
    node(
        ExprKind::Logical {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        span,
    )
}

fn parse_not(p: &mut Parser) -> Result<Expr, ExprError> {
    if !matches!(p.peek_kind(), Some(TokenKind::Not)) {
        return parse_comparison(p);
    }
    let start = p.current_span();
    p.advance();
    let operand = p.nested(parse_not)?;
    unary(UnaryOp::Not, start, operand)
}

fn parse_comparison(p: &mut Parser) -> Result<Expr, ExprError> {
    let first = parse_additive(p)?;
    let mut rest = Vec::new();
    loop {
        let op = match p.peek_kind() {
            Some(TokenKind::EqEq) => CompareOp::Eq,
            Some(TokenKind::Ne) => CompareOp::Ne,
            Some(TokenKind::Lt) => CompareOp::Lt,
            Some(TokenKind::Le) => CompareOp::Le,
            Some(TokenKind::Gt) => CompareOp::Gt,
            Some(TokenKind::Ge) => CompareOp::Ge,
            _ => break,
        };
        p.advance();
        rest.push((op, parse_additive(p)?));
    }
    let Some(end) = rest.last().map(|(_, last)| last.span) else {
        return Ok(first);
    };
    let span = first.span.to(end);
    node(
        ExprKind::Compare {
            first: Box::new(first),
            rest,
        },
        span,
    )
}

fn parse_additive(p: &mut Parser) -> Result<Expr, ExprError> {
    let mut left = parse_term(p)?;
    loop {
        let op = match p.peek_kind() {
            Some(TokenKind::Plus) => BinaryOp::Add,
            Some(TokenKind::Minus) => BinaryOp::Sub,
            _ => break,
        };
        p.advance();
        let right = parse_term(p)?;
        left = binary(op, left, right)?;
    }
    Ok(left)
}

fn parse_term(p: &mut Parser) -> Result<Expr, ExprError> {
    let mut left = parse_factor(p)?;
    loop {
        let op = match p.peek_kind() {
            Some(TokenKind::Star) => BinaryOp::Mul,
            Some(TokenKind::Slash) => BinaryOp::Div,
            Some(TokenKind::Percent) => BinaryOp::Rem,
            _ => break,
        };
        p.advance();
        let right = parse_factor(p)?;
        left = binary(op, left, right)?;
    }
    Ok(left)
}

fn parse_factor(p: &mut Parser) -> Result<Expr, ExprError> {
    let op = match p.peek_kind() {
        Some(TokenKind::Minus) => UnaryOp::Neg,
        Some(TokenKind::Plus) => UnaryOp::Plus,
        _ => return parse_power(p),
    };
    let start = p.current_span();
    p.advance();
    let operand = p.nested(parse_factor)?;
    unary(op, start, operand)
}

fn parse_power(p: &mut Parser) -> Result<Expr, ExprError> {
    let base = parse_primary(p)?;
    if !p.eat(&TokenKind::StarStar) {
        return Ok(base);
    }
    let exponent = p.nested(parse_factor)?;
    binary(BinaryOp::Pow, base, exponent)
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Result<Expr, ExprError> {
    let span = lhs.span.to(rhs.span);
    node(
        ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        span,
    )
}

fn unary(op: UnaryOp, start: Span, operand: Expr) -> Result<Expr, ExprError> {
    let span = start.to(operand.span);
    node(
        ExprKind::Unary {
            op,
            operand: Box::new(operand),
        },
        span,
    )
}

fn parse_primary(p: &mut Parser) -> Result<Expr, ExprError> {
    let span = p.current_span();
    match p.peek_kind().cloned() {
        Some(TokenKind::Number(n)) => {
            p.advance();
            Ok(Expr::new(ExprKind::Number(n), span))
        }
        Some(TokenKind::True) => {
            p.advance();
            Ok(Expr::new(ExprKind::Number(1.0), span))
        }
        Some(TokenKind::False) => {
            p.advance();
            Ok(Expr::new(ExprKind::Number(0.0), span))
        }
        Some(TokenKind::LParen) => {
            p.advance();
            let inner = parse_expr(p)?;
            let close = p.expect(&TokenKind::RParen)?;
            Ok(Expr::new(inner.kind, span.to(close)))
        }
        Some(TokenKind::Ident(name)) => {
            p.advance();
            parse_name(p, name, span)
        }
        _ => Err(p.unexpected("an expression")),
    }
}

/// Resolve `name`, `math.name`, or a call.
fn parse_name(p: &mut Parser, name: String, start: Span) -> Result<Expr, ExprError> {
    let qualified = name == "math";
    let (name, span) = if qualified {
        p.expect(&TokenKind::Dot)?;
        match p.peek_kind().cloned() {
            Some(TokenKind::Ident(attr)) => {
                let attr_span = p.current_span();
                p.advance();
                (attr, start.to(attr_span))
            }
            _ => return Err(p.unexpected("a name after `math.`")),
        }
    } else {
        (name, start)
    };

    if matches!(p.peek_kind(), Some(TokenKind::LParen)) {
        let function = Function::lookup(&name, qualified)
            .ok_or_else(|| ExprError::UnknownName { name: name.clone(), span })?;
        p.advance();
        let mut args = Vec::new();
        if !matches!(p.peek_kind(), Some(TokenKind::RParen)) {
            args.push(parse_expr(p)?);
            while p.eat(&TokenKind::Comma) {
                if matches!(p.peek_kind(), Some(TokenKind::RParen)) {
                    break;
                }
                args.push(parse_expr(p)?);
            }
        }
        let close = p.expect(&TokenKind::RParen)?;
        let call_span = span.to(close);
        let arity = function.arity();
        if !arity.accepts(args.len()) {
            return Err(ExprError::Arity {
                function: function.name(),
                expected: arity.describe(),
                found: args.len(),
                span: call_span,
            });
        }
        return node(ExprKind::Call { function, args }, call_span);
    }

    if name == "s" && !qualified {
        return Ok(Expr::new(ExprKind::Price, span));
    }
    if let Some(value) = constant(&name) {
        return Ok(Expr::new(ExprKind::Number(value), span));
    }
    if let Some(function) = Function::lookup(&name, qualified) {
        return Err(ExprError::Parse {
            message: format!("function `{}` must be called", function.name()),
            span,
        });
    }
    Err(ExprError::UnknownName { name, span })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse_str(src: &str) -> Result<Expr, ExprError> {
        parse(tokenize(src)?, src.len())
    }

    fn kind(src: &str) -> ExprKind {
        parse_str(src).unwrap().kind
    }

    #[test]
    fn power_binds_tighter_than_negation() {
        let ExprKind::Unary { op, operand } = kind("-s ** 2") else {
            panic!("expected unary");
        };
        assert_eq!(op, UnaryOp::Neg);
        assert!(matches!(operand.kind, ExprKind::Binary { op: BinaryOp::Pow, .. }));
    }

    #[test]
    fn power_is_right_associative() {
        let ExprKind::Binary { op, lhs, rhs } = kind("2 ** 3 ** 2") else {
            panic!("expected binary");
        };
        assert_eq!(op, BinaryOp::Pow);
        assert_eq!(lhs.kind, ExprKind::Number(2.0));
        assert!(matches!(rhs.kind, ExprKind::Binary { op: BinaryOp::Pow, .. }));
    }

    #[test]
    fn subtraction_is_left_associative() {
        let ExprKind::Binary { lhs, rhs, .. } = kind("s - 1 - 2") else {
            panic!("expected binary");
        };
        assert!(matches!(lhs.kind, ExprKind::Binary { op: BinaryOp::Sub, .. }));
        assert_eq!(rhs.kind, ExprKind::Number(2.0));
    }

    #[test]
    fn chained_comparison() {
        let ExprKind::Compare { rest, .. } = kind("90 < s <= 110") else {
            panic!("expected comparison");
        };
        let ops: Vec<CompareOp> = rest.iter().map(|(op, _)| *op).collect();
        assert_eq!(ops, vec![CompareOp::Lt, CompareOp::Le]);
    }

    #[test]
    fn conditional_spans_whole_expression() {
        let expr = parse_str("1 if s > 100 else 0").unwrap();
        assert!(matches!(expr.kind, ExprKind::Conditional { .. }));
        assert_eq!(expr.span, Span::new(0, 19));
    }

    #[test]
    fn math_prefix_resolves() {
        assert_eq!(kind("math.pi"), ExprKind::Number(std::f64::consts::PI));
        assert!(matches!(
            kind("math.exp(s)"),
            ExprKind::Call { function: Function::Exp, .. }
        ));
        assert!(matches!(kind("ln(s)"), ExprKind::Call { function: Function::Log, .. }));
    }

    #[test]
    fn trailing_comma_allowed() {
        let ExprKind::Call { args, .. } = kind("max(s, 0,)") else {
            panic!("expected call");
        };
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn unknown_names_rejected() {
        assert_eq!(
            parse_str("max(s - k, 0)").unwrap_err(),
            ExprError::UnknownName {
                name: "k".into(),
                span: Span::new(8, 9),
            }
        );
        assert!(matches!(
            parse_str("open(s)"),
            Err(ExprError::UnknownName { .. })
        ));
        assert!(matches!(
            parse_str("math.system"),
            Err(ExprError::UnknownName { .. })
        ));
    }

    #[test]
    fn arity_checked() {
        assert!(matches!(
            parse_str("exp(s, 2)"),
            Err(ExprError::Arity { function: "exp", found: 2, .. })
        ));
        assert!(matches!(
            parse_str("max()"),
            Err(ExprError::Arity { function: "max", found: 0, .. })
        ));
        assert!(parse_str("log(s, 10)").is_ok());
    }

    #[test]
    fn malformed_input() {
        for src in ["s +", "(s", "s)", "max(s 0)", "1 if s", "s s", "math", "max"] {
            assert!(
                matches!(parse_str(src), Err(ExprError::Parse { .. })),
                "{src:?} parsed"
            );
        }
    }

    #[test]
    fn qualified_names_are_math_module_only() {
        for src in ["math.max(s, 1)", "math.min(s, 1)", "math.abs(s)"] {
            assert!(
                matches!(parse_str(src), Err(ExprError::UnknownName { .. })),
                "{src:?} parsed"
            );
        }
        assert!(matches!(
            kind("math.fabs(s)"),
            ExprKind::Call { function: Function::Abs, .. }
        ));
    }

    #[test]
    fn max_and_min_need_two_arguments() {
        assert!(matches!(
            parse_str("max(s)"),
            Err(ExprError::Arity { function: "max", expected: "at least 2", found: 1, .. })
        ));
        assert!(matches!(
            parse_str("min(s)"),
            Err(ExprError::Arity { function: "min", found: 1, .. })
        ));
    }

    fn is_too_deep(result: Result<Expr, ExprError>) -> bool {
        matches!(result, Err(ExprError::Parse { ref message, .. }) if message == "expression nested too deeply")
    }

    #[test]
    fn deep_parentheses_rejected() {
        let src = format!("{}s{}", "(".repeat(1_000), ")".repeat(1_000));
        assert!(is_too_deep(parse_str(&src)));

        let shallow = format!("{}s{}", "(".repeat(50), ")".repeat(50));
        assert_eq!(kind(&shallow), ExprKind::Price);
    }

    #[test]
    fn deep_unary_and_power_chains_rejected() {
        assert!(is_too_deep(parse_str(&format!("{}s", "-".repeat(10_000)))));
        assert!(is_too_deep(parse_str(&format!("{}s", "not ".repeat(10_000)))));
        assert!(is_too_deep(parse_str(&vec!["2"; 10_000].join(" ** "))));
    }

    #[test]
    fn long_flat_chains_rejected() {
        let sum = format!("s{}", " + s".repeat(50_000));
        assert!(is_too_deep(parse_str(&sum)));
        let err = parse_str(&sum).unwrap_err();
        assert_eq!(err.span().map(|span| span.start), Some(0));

        let ok = format!("s{}", " + s".repeat(50));
        assert_eq!(parse_str(&ok).unwrap().height, 51);
    }

    #[test]
    fn wide_expressions_stay_shallow() {
        let args = vec!["s"; 10_000].join(", ");
        let call = parse_str(&format!("max({args})")).unwrap();
        assert_eq!(call.height, 2);

        let chain = vec!["s"; 10_000].join(" <= ");
        assert_eq!(parse_str(&chain).unwrap().height, 2);
    }

    #[test]
    fn missing_operand_points_at_end() {
        let err = parse_str("s *").unwrap_err();
        assert_eq!(err.span(), Some(Span::new(3, 3)));
    }
}
