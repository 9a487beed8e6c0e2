use bigdecimal::{BigDecimal, Zero};

use crate::context::Context;
use crate::engine;
use crate::input::InputState;

/// What the screen shows after an evaluation failure.
pub const ERROR_TEXT: &str = "Error";

/// What the screen shows with nothing typed.
pub const EMPTY_TEXT: &str = "0";

/// Display string for the current input.
pub fn render(input: &InputState, ctx: &Context) -> String {
    let raw = input.text();
    if raw.is_empty() {
        return EMPTY_TEXT.to_string();
    }
    format_for_display(&raw, ctx)
}

/// Fit `text` to the display width.
///
/// Short text is returned unchanged. A longer decimal literal is parsed the way the
/// engine parses number tokens and shown in scientific notation with
/// `ctx.exponent_digits` digits after the mantissa's point. A partial expression is
/// returned unchanged.
pub fn format_for_display(text: &str, ctx: &Context) -> String {
    if text.chars().count() <= ctx.display_width {
        return text.to_string();
    }
    match engine::parse_literal(text) {
        Ok(value) => to_exponential(&value, ctx),
        Err(_) => text.to_string(),
    }
}

/// `d.dddddddde+X` form of `value`, rounded half-up to `ctx.exponent_digits + 1`
/// significant digits.
pub fn to_exponential(value: &BigDecimal, ctx: &Context) -> String {
    let fraction_len = ctx.exponent_digits as usize;
    if value.is_zero() {
        return exponential_parts("0", "", 0, fraction_len, false);
    }

    let rounded = ctx.round_significant(value, u64::from(ctx.exponent_digits) + 1);
    let (mantissa, scale) = rounded.as_bigint_and_exponent();
    let digits = mantissa.magnitude().to_string();
    let exponent = digits.len() as i64 - 1 - scale;
    let (lead, rest) = digits.split_at(1);
    exponential_parts(lead, rest, exponent, fraction_len, rounded < BigDecimal::zero())
}

fn exponential_parts(
    lead: &str,
    rest: &str,
    exponent: i64,
    fraction_len: usize,
    negative: bool,
) -> String {
    let mut out = String::with_capacity(fraction_len + 8);
    if negative {
        out.push('-');
    }
    out.push_str(lead);
    if fraction_len > 0 {
        out.push('.');
        out.extend(rest.chars().chain(std::iter::repeat('0')).take(fraction_len));
    }
    out.push('e');
    out.push(if exponent < 0 { '-' } else { '+' });
    out.push_str(&exponent.unsigned_abs().to_string());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::Operator;
    use pretty_assertions::assert_eq;

    fn fmt(text: &str) -> String {
        format_for_display(text, &Context::default())
    }

    #[test]
    fn empty_input_shows_zero() {
        assert_eq!(render(&InputState::new(), &Context::default()), "0");
    }

    #[test]
    fn partial_expression_shown_as_typed() {
        let mut input = InputState::new();
        input.append_digit_or_point('1');
        input.append_operator(Operator::Add);
        assert_eq!(render(&input, &Context::default()), "1+");
    }

    #[test]
    fn short_literal_unchanged() {
        assert_eq!(fmt("12345678901234"), "12345678901234");
        assert_eq!(fmt("0.333333333333"), "0.333333333333");
    }

    #[test]
    fn long_literal_goes_scientific() {
        assert_eq!(fmt("123456789012345"), "1.23456789e+14");
        assert_eq!(fmt("9999999800000000"), "9.99999980e+15");
        assert_eq!(fmt("0.333333333333333"), "3.33333333e-1");
        assert_eq!(fmt("-1234567890123456"), "-1.23456789e+15");
    }

    #[test]
    fn exponential_rounds_half_up() {
        // ninth significant digit 4, tenth 5
        assert_eq!(fmt("0.0000001234567845"), "1.23456785e-7");
        assert_eq!(fmt("999999999500000"), "1.00000000e+15");
    }

    #[test]
    fn literals_beyond_machine_range_go_scientific() {
        assert_eq!(fmt("123456789012345678901234567890"), "1.23456789e+29");
        assert_eq!(fmt("1000000000000000000000000000000"), "1.00000000e+30");
        assert_eq!(
            fmt("0.000000000000000000000000000000123456789"),
            "1.23456789e-31"
        );
    }

    #[test]
    fn trailing_point_literal_goes_scientific() {
        assert_eq!(fmt("123456789012345."), "1.23456789e+14");
    }

    #[test]
    fn long_expression_text_unchanged() {
        assert_eq!(fmt("1234567+1234567"), "1234567+1234567");
    }

    #[test]
    fn exponent_digits_follow_context() {
        let ctx = Context {
            exponent_digits: 2,
            ..Context::default()
        };
        assert_eq!(
            format_for_display("123456789012345", &ctx),
            "1.23e+14"
        );
    }
}
