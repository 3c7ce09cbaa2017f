//! Tokenizer for payoff expressions.

use crate::error::{ExprError, Span};
use vp_core::Real;

/// Token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Token types.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Number(Real),
    True,
    False,

    Ident(String),

    // Keywords
    And,
    Or,
    Not,
    If,
    Else,

    // Punctuation
    LParen,
    RParen,
    Comma,
    Dot,
    EqEq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,
}

impl TokenKind {
    /// How the token reads in an error message.
    pub fn describe(&self) -> String {
        let s = match self {
            Self::Number(n) => return format!("number {n}"),
            Self::Ident(name) => return format!("name `{name}`"),
            Self::True => "`True`",
            Self::False => "`False`",
            Self::And => "`and`",
            Self::Or => "`or`",
            Self::Not => "`not`",
            Self::If => "`if`",
            Self::Else => "`else`",
            Self::LParen => "`(`",
            Self::RParen => "`)`",
            Self::Comma => "`,`",
            Self::Dot => "`.`",
            Self::EqEq => "`==`",
            Self::Ne => "`!=`",
            Self::Lt => "`<`",
            Self::Le => "`<=`",
            Self::Gt => "`>`",
            Self::Ge => "`>=`",
            Self::Plus => "`+`",
            Self::Minus => "`-`",
            Self::Star => "`*`",
            Self::StarStar => "`**`",
            Self::Slash => "`/`",
            Self::Percent => "`%`",
        };
        s.to_string()
    }
}

/// Tokenize expression source text.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ExprError> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let ch = bytes[pos];
        if ch.is_ascii_whitespace() {
            pos += 1;
            continue;
        }
        let start = pos;

        // Number literal, including `.5` and exponent form.
        if ch.is_ascii_digit()
            || (ch == b'.' && pos + 1 < bytes.len() && bytes[pos + 1].is_ascii_digit())
        {
            let (value, end) = lex_number(source, pos)?;
            tokens.push(Token {
                kind: TokenKind::Number(value),
                span: Span::new(start, end),
            });
            pos = end;
            continue;
        }

        if ch.is_ascii_alphabetic() || ch == b'_' {
            let end = lex_ident_end(bytes, pos);
            let word = &source[pos..end];
            let kind = match word {
                "and" => TokenKind::And,
                "or" => TokenKind::Or,
                "not" => TokenKind::Not,
                "if" => TokenKind::If,
                "else" => TokenKind::Else,
                "True" | "true" => TokenKind::True,
                "False" | "false" => TokenKind::False,
                _ => TokenKind::Ident(word.to_string()),
            };
            tokens.push(Token {
                kind,
                span: Span::new(start, end),
            });
            pos = end;
            continue;
        }

        let two = source.get(pos..pos + 2).and_then(|op| match op {
            "**" => Some(TokenKind::StarStar),
            "==" => Some(TokenKind::EqEq),
            "!=" => Some(TokenKind::Ne),
            "<=" => Some(TokenKind::Le),
            ">=" => Some(TokenKind::Ge),
            _ => None,
        });
        if let Some(kind) = two {
            tokens.push(Token {
                kind,
                span: Span::new(start, pos + 2),
            });
            pos += 2;
            continue;
        }

        let kind = match ch {
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b',' => TokenKind::Comma,
            b'.' => TokenKind::Dot,
            b'<' => TokenKind::Lt,
            b'>' => TokenKind::Gt,
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            _ => {
                let c = source[pos..].chars().next().unwrap_or('?');
                return Err(ExprError::Lex {
                    message: format!("unexpected character '{c}'"),
                    span: Span::new(start, start + c.len_utf8()),
                });
            }
        };
        tokens.push(Token {
            kind,
            span: Span::new(start, pos + 1),
        });
        pos += 1;
    }

    Ok(tokens)
}

fn lex_ident_end(bytes: &[u8], start: usize) -> usize {
    let mut pos = start;
    while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_') {
        pos += 1;
    }
    pos
}

fn lex_number(source: &str, start: usize) -> Result<(Real, usize), ExprError> {
    let bytes = source.as_bytes();
    let digits = |mut pos: usize| {
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        pos
    };

    let mut pos = digits(start);
    if pos < bytes.len() && bytes[pos] == b'.' {
        pos = digits(pos + 1);
    }
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut exp = pos + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        let exp_end = digits(exp);
        if exp_end == exp {
            return Err(ExprError::Lex {
                message: "exponent has no digits".to_string(),
                span: Span::new(start, exp),
            });
        }
        pos = exp_end;
    }

    let text = &source[start..pos];
    let value = text.parse::<Real>().map_err(|e| ExprError::Lex {
        message: format!("invalid number '{text}': {e}"),
        span: Span::new(start, pos),
    })?;
    Ok((value, pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lex_call() {
        assert_eq!(
            kinds("max(s - 100, 0)"),
            vec![
                TokenKind::Ident("max".into()),
                TokenKind::LParen,
                TokenKind::Ident("s".into()),
                TokenKind::Minus,
                TokenKind::Number(100.0),
                TokenKind::Comma,
                TokenKind::Number(0.0),
                TokenKind::RParen,
            ]
        );
    }

    #[test]
    fn lex_numbers() {
        assert_eq!(
            kinds("1 2.5 .25 3. 1e3 2.5E-2"),
            vec![
                TokenKind::Number(1.0),
                TokenKind::Number(2.5),
                TokenKind::Number(0.25),
                TokenKind::Number(3.0),
                TokenKind::Number(1000.0),
                TokenKind::Number(0.025),
            ]
        );
    }

    #[test]
    fn lex_two_char_operators() {
        assert_eq!(
            kinds("s**2 >= 1 != 0 <= 3 == 4"),
            vec![
                TokenKind::Ident("s".into()),
                TokenKind::StarStar,
                TokenKind::Number(2.0),
                TokenKind::Ge,
                TokenKind::Number(1.0),
                TokenKind::Ne,
                TokenKind::Number(0.0),
                TokenKind::Le,
                TokenKind::Number(3.0),
                TokenKind::EqEq,
                TokenKind::Number(4.0),
            ]
        );
    }

    #[test]
    fn lex_keywords_and_attribute() {
        assert_eq!(
            kinds("1 if not s else math.e"),
            vec![
                TokenKind::Number(1.0),
                TokenKind::If,
                TokenKind::Not,
                TokenKind::Ident("s".into()),
                TokenKind::Else,
                TokenKind::Ident("math".into()),
                TokenKind::Dot,
                TokenKind::Ident("e".into()),
            ]
        );
    }

    #[test]
    fn spans_are_byte_offsets() {
        let tokens = tokenize("  s  **  2").unwrap();
        assert_eq!(tokens[0].span, Span::new(2, 3));
        assert_eq!(tokens[1].span, Span::new(5, 7));
        assert_eq!(tokens[2].span, Span::new(9, 10));
    }

    #[test]
    fn bad_character() {
        let err = tokenize("s & 1").unwrap_err();
        assert_eq!(
            err,
            ExprError::Lex {
                message: "unexpected character '&'".into(),
                span: Span::new(2, 3),
            }
        );
    }

    #[test]
    fn bad_exponent() {
        assert!(matches!(tokenize("1e+"), Err(ExprError::Lex { .. })));
    }
}
