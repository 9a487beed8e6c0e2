use thiserror::Error; // Import the `Error` derive macro from the `thiserror` crate

// Define an enum to represent possible evaluation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)] // Automatically implement `Debug` and `Error` traits for the enum
pub enum EvalError {
    // An operator ran out of operands while walking the postfix form
    #[error("malformed expression: operator without two operands")]
    MalformedExpression,

    // `/` with a right operand that is exactly zero
    #[error("division by zero")]
    DivideByZero,

    // A number token that the decimal parser rejected, with the offending literal
    #[error("invalid decimal literal '{0}'")]
    DecimalParse(String),

    // Variant for errors that occur while reading a keystroke script, with a message
    #[error("parse error: {0}")] // Custom error message formatting for this variant
    Parse(String),

    // Variant for an unreadable or invalid configuration, with a message
    #[error("config error: {0}")]
    Config(String),
}

impl EvalError {
    /// True for the kinds that end the current expression and put the display in the
    /// error state.
    pub fn is_evaluation_failure(&self) -> bool {
        matches!(
            self,
            EvalError::MalformedExpression
                | EvalError::DivideByZero
                | EvalError::DecimalParse(_)
        )
    }
}

// Type alias for results that use `EvalError` as the error type
pub type Result<T> = std::result::Result<T, EvalError>;
