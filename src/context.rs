use bigdecimal::{BigDecimal, RoundingMode, Zero};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;

use crate::errors::{EvalError, Result};

/// Significant digits kept after every arithmetic step.
pub const DEFAULT_PRECISION: u32 = 15;

/// Longest literal shown as-is before switching to scientific notation.
pub const DEFAULT_DISPLAY_WIDTH: usize = 14;

/// Digits after the mantissa's decimal point in scientific notation.
pub const DEFAULT_EXPONENT_DIGITS: u32 = 8;

/// Upper bound for `precision`; quotients are computed to this many digits before rounding.
pub const MAX_PRECISION: u32 = 100;

/// Upper bound for `exponent_digits`.
pub const MAX_EXPONENT_DIGITS: u32 = 64;

/// Evaluation and display options shared by the engine and the formatter.
///
/// Both sides round with [`Context::rounding`], so a value on screen never disagrees
/// with the value kept in the token sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Context {
    pub precision: u32,
    pub display_width: usize,
    pub exponent_digits: u32,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            display_width: DEFAULT_DISPLAY_WIDTH,
            exponent_digits: DEFAULT_EXPONENT_DIGITS,
        }
    }
}

impl Context {
    /// Load options from a JSON document; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let ctx: Context =
            serde_json::from_str(json).map_err(|e| EvalError::Config(e.to_string()))?;
        if !(1..=MAX_PRECISION).contains(&ctx.precision) {
            return Err(EvalError::Config(format!(
                "precision must be between 1 and {MAX_PRECISION}"
            )));
        }
        if ctx.display_width == 0 {
            return Err(EvalError::Config("display_width must be at least 1".into()));
        }
        if ctx.exponent_digits > MAX_EXPONENT_DIGITS {
            return Err(EvalError::Config(format!(
                "exponent_digits must be at most {MAX_EXPONENT_DIGITS}"
            )));
        }
        Ok(ctx)
    }

    /// Round half-up (away from zero on a tie).
    pub fn rounding(&self) -> RoundingMode {
        RoundingMode::HalfUp
    }

    /// Round `value` to `digits` significant digits, trailing zeros stripped.
    pub fn round_significant(&self, value: &BigDecimal, digits: u64) -> BigDecimal {
        if value.is_zero() {
            return BigDecimal::zero();
        }
        let digits = NonZeroU64::new(digits).unwrap_or(NonZeroU64::MIN);
        value.with_precision_round(digits, self.rounding()).normalized()
    }

    /// Round an arithmetic result to the configured precision.
    pub fn round(&self, value: &BigDecimal) -> BigDecimal {
        self.round_significant(value, u64::from(self.precision))
    }
}
