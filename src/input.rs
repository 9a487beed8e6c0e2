use itertools::Itertools;

use crate::expression::{Operator, Token};

/// The expression being typed: committed tokens plus the literal under construction.
///
/// Every mutator returns `true` when it changed the state and `false` when the input
/// was rejected. Rejections are silent; they never reach the error display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    tokens: Vec<Token>,
    current: String,
    // the sequence is a collapsed result nobody has built on yet
    fresh_result: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The live literal, not yet committed.
    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.current.is_empty()
    }

    /// Append a digit or the decimal point to the live literal.
    /// A second `.` in the same literal is ignored.
    ///
    /// Typing right after a result starts a new expression. Typing after a committed
    /// number (an operator was backspaced away) continues that number, so numbers and
    /// operators always alternate.
    pub fn append_digit_or_point(&mut self, c: char) -> bool {
        if c != '.' && !c.is_ascii_digit() {
            return false;
        }
        if self.current.is_empty() {
            if self.fresh_result {
                self.tokens.clear();
            } else if matches!(self.tokens.last(), Some(Token::Number(_))) {
                if let Some(Token::Number(literal)) = self.tokens.pop() {
                    self.current = literal;
                }
            }
        }
        self.fresh_result = false;
        if c == '.' && self.current.contains('.') {
            return false;
        }
        self.current.push(c);
        true
    }

    /// Commit the live literal (if any) and then `op`.
    ///
    /// Rejected when there is nothing to apply the operator to, or when it would follow
    /// another operator.
    pub fn append_operator(&mut self, op: Operator) -> bool {
        if self.current.is_empty() {
            match self.tokens.last() {
                None => return false,
                Some(last) if last.is_operator() => return false,
                Some(_) => {}
            }
        } else {
            let literal = std::mem::take(&mut self.current);
            self.tokens.push(Token::Number(literal));
        }
        self.tokens.push(Token::Operator(op));
        self.fresh_result = false;
        true
    }

    /// Drop the last typed character, or the last committed token when the live literal
    /// is empty.
    pub fn backspace(&mut self) -> bool {
        self.fresh_result = false;
        if self.current.pop().is_some() {
            return true;
        }
        self.tokens.pop().is_some()
    }

    pub fn reset(&mut self) {
        self.tokens.clear();
        self.current.clear();
        self.fresh_result = false;
    }

    /// The committed sequence with the live literal appended as a trailing number.
    pub fn finalized(&self) -> Vec<Token> {
        let mut out = self.tokens.clone();
        if !self.current.is_empty() {
            out.push(Token::Number(self.current.clone()));
        }
        out
    }

    /// Replace the whole expression by a single result so the next operator chains from it.
    pub fn collapse(&mut self, result: impl Into<String>) {
        self.tokens = vec![Token::Number(result.into())];
        self.current.clear();
        self.fresh_result = true;
    }

    /// Raw expression text as typed, e.g. `"12+3.5*"`.
    pub fn text(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.to_string())
            .chain(std::iter::once(self.current.clone()))
            .join("")
    }
}
