// src/expression.rs
use std::fmt;

/// The four binary operators. All are left-associative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    /// `+ -` bind at 1, `* /` at 2.
    ///
    /// Equal precedence pops before pushing in the shunting-yard, which is only correct
    /// for left-associative operators. A right-associative operator would need a strict
    /// comparison there.
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 1,
            Operator::Mul | Operator::Div => 2,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A committed token of the expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Decimal literal exactly as typed (or as produced by a previous evaluation).
    Number(String),
    Operator(Operator),
}

impl Token {
    pub fn number(literal: impl Into<String>) -> Self {
        Token::Number(literal.into())
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Token::Operator(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(s) => f.write_str(s),
            Token::Operator(op) => write!(f, "{op}"),
        }
    }
}
