use bigdecimal::{BigDecimal, Zero};
use std::str::FromStr;
use tracing::debug;

use crate::context::Context;
use crate::errors::{EvalError, Result};
use crate::expression::{Operator, Token};

/// Shortest expression worth evaluating: `Number Operator Number`.
pub const MIN_TOKENS: usize = 3;

/// =========================
/// Public API (Pipeline)
/// =========================

/// Whether `tokens` is long enough to evaluate. Shorter sequences are left alone by the
/// caller rather than reported as errors.
pub fn is_complete(tokens: &[Token]) -> bool {
    tokens.len() >= MIN_TOKENS
}

/// Convert a finalized infix sequence to postfix and evaluate it.
pub fn evaluate(tokens: &[Token], ctx: &Context) -> Result<BigDecimal> {
    let postfix = to_postfix(tokens);
    debug!(postfix = %render_tokens(&postfix), "converted to postfix");
    let value = eval_postfix(&postfix, ctx)?;
    debug!(result = %value, "evaluated");
    Ok(value)
}

/// Decimal-literal form of a result: plain notation, no trailing fractional zeros.
pub fn format_result(value: &BigDecimal) -> String {
    value.normalized().to_plain_string()
}

/// =========================
/// Shunting-yard
/// =========================

/// Reorder an infix sequence into postfix.
///
/// Example:
///   infix:   [2, +, 3, *, 4]
///   postfix: [2, 3, 4, *, +]
pub fn to_postfix(tokens: &[Token]) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Operator> = Vec::new();

    for tok in tokens {
        match tok {
            Token::Number(_) => out.push(tok.clone()),
            Token::Operator(op) => {
                while let Some(&top) = ops.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    ops.pop();
                    out.push(Token::Operator(top));
                }
                ops.push(*op);
            }
        }
    }

    out.extend(ops.into_iter().rev().map(Token::Operator));
    out
}

/// =========================
/// Postfix evaluation
/// =========================

/// Evaluate a postfix sequence on a decimal stack.
pub fn eval_postfix(postfix: &[Token], ctx: &Context) -> Result<BigDecimal> {
    let mut stack: Vec<BigDecimal> = Vec::new();

    for tok in postfix {
        match tok {
            Token::Number(literal) => stack.push(parse_literal(literal)?),
            Token::Operator(op) => {
                let b = stack.pop().ok_or(EvalError::MalformedExpression)?;
                let a = stack.pop().ok_or(EvalError::MalformedExpression)?;
                stack.push(apply(*op, &a, &b, ctx)?);
            }
        }
    }

    stack.into_iter().next().ok_or(EvalError::MalformedExpression)
}

/// `a op b`, rounded to the context precision.
pub fn apply(op: Operator, a: &BigDecimal, b: &BigDecimal, ctx: &Context) -> Result<BigDecimal> {
    let raw = match op {
        Operator::Add => a + b,
        Operator::Sub => a - b,
        Operator::Mul => a * b,
        Operator::Div => {
            if b.is_zero() {
                return Err(EvalError::DivideByZero);
            }
            a / b
        }
    };
    Ok(ctx.round(&raw))
}

/// Parse a number token. Accepts a leading or trailing point (`".5"`, `"5."`) and an
/// optional leading `-` (results fed back into the sequence may be negative).
pub fn parse_literal(literal: &str) -> Result<BigDecimal> {
    let invalid = || EvalError::DecimalParse(literal.to_string());

    let (sign, body) = match literal.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", literal),
    };
    let points = body.chars().filter(|&c| c == '.').count();
    let digits = body.chars().filter(char::is_ascii_digit).count();
    if digits == 0 || points > 1 || digits + points != body.len() {
        return Err(invalid());
    }

    let mut normalized = String::with_capacity(body.len() + 3);
    normalized.push_str(sign);
    if body.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(body);
    if body.ends_with('.') {
        normalized.push('0');
    }
    BigDecimal::from_str(&normalized).map_err(|_| invalid())
}

fn render_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
