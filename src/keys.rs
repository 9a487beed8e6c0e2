// src/keys.rs
use crate::errors::{EvalError, Result};
use crate::expression::Operator;

/// One input event from the keypad or keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A digit or the decimal point.
    Digit(char),
    Operator(Operator),
    Evaluate,
    Backspace,
    Clear,
}

impl Key {
    /// Single-character keys: `0-9`, `.`, `+ - * /` and `=`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' | '.' => Some(Key::Digit(c)),
            '=' => Some(Key::Evaluate),
            _ => Operator::from_char(c).map(Key::Operator),
        }
    }

    /// Named keys as reported by a keyboard event, plus the keypad's action names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Enter" | "equals" => Some(Key::Evaluate),
            "Backspace" | "Delete" | "delete" => Some(Key::Backspace),
            "Escape" | "clear" => Some(Key::Clear),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::from_char(c),
                    _ => None,
                }
            }
        }
    }
}

/// Parse a keystroke script such as `"12+3*4="` or `"2+2 [Enter] [Backspace]"`.
///
/// Whitespace separates nothing and is skipped. Named keys go in brackets.
pub fn parse_script(script: &str) -> Result<Vec<Key>> {
    let mut p = Scanner::new(script);
    let mut keys = Vec::new();
    loop {
        p.skip_ws();
        let Some(c) = p.peek_char() else { break };
        if p.consume_char('[') {
            let name = p.capture_until(']')?;
            p.expect(']')?;
            let key = Key::from_name(name.trim())
                .ok_or_else(|| EvalError::Parse(format!("unknown key '[{name}]'")))?;
            keys.push(key);
            continue;
        }
        let key = Key::from_char(c)
            .ok_or_else(|| EvalError::Parse(format!("unexpected character '{c}'")))?;
        p.i += c.len_utf8();
        keys.push(key);
    }
    Ok(keys)
}

struct Scanner<'a> {
    s: &'a str,
    i: usize,
}

impl<'a> Scanner<'a> {
    fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    fn capture_until(&mut self, end: char) -> Result<&'a str> {
        let start = self.i;
        while let Some(c) = self.peek_char() {
            if c == end {
                break;
            }
            self.i += c.len_utf8();
        }
        if self.peek_char() != Some(end) {
            return Err(EvalError::Parse(format!("expected '{end}'")));
        }
        Ok(&self.s[start..self.i])
    }

    fn expect(&mut self, c: char) -> Result<()> {
        if self.consume_char(c) {
            Ok(())
        } else {
            Err(EvalError::Parse(format!("expected '{}'", c)))
        }
    }

    fn consume_char(&mut self, c: char) -> bool {
        if self.peek_char() == Some(c) {
            self.i += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.s[self.i..].chars().next()
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.i += c.len_utf8();
            } else {
                break;
            }
        }
    }
}
