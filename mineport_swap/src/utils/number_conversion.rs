use crate::error::{Error, SwapResult};
use error_stack::{ResultExt, report};

pub fn decimal_string_to_u128(s: &str, decimals: u8) -> SwapResult<u128> {
    let decimals: usize = decimals.into();
    let (integer_str, fraction_str) = match s.trim().split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (s.trim(), None),
    };

    let integer_part = if integer_str.is_empty() {
        0
    } else {
        parse_integer_amount(integer_str)?
    };

    let decimal_part = match fraction_str {
        Some(fraction) if !fraction.is_empty() => {
            // Extra precision beyond `decimals` is truncated.
            let trimmed = if fraction.len() > decimals {
                &fraction[..decimals]
            } else {
                fraction
            };
            if trimmed.is_empty() {
                0
            } else {
                let value = parse_integer_amount(trimmed)?;
                value * 10u128.pow((decimals - trimmed.len()) as u32)
            }
        }
        _ => 0,
    };

    integer_part
        .checked_mul(10u128.pow(decimals as u32))
        .and_then(|scaled| scaled.checked_add(decimal_part))
        .ok_or_else(|| report!(Error::ParseError).attach_printable(format!("Amount too large: {s}")))
}

pub fn u128_to_f64(value: u128, decimals: u8) -> f64 {
    // Divide in integer space first to minimize precision loss
    let divisor = 10u128.pow(decimals as u32);
    let whole_part = (value / divisor) as f64;
    let fractional_part = (value % divisor) as f64 / divisor as f64;

    whole_part + fractional_part
}

/// Parses a base-10 integer amount in smallest units. Signs, whitespace and
/// decimal points are rejected.
pub fn parse_integer_amount(s: &str) -> SwapResult<u128> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(report!(Error::ParseError).attach_printable(format!("Not an integer amount: {s}")));
    }
    s.parse::<u128>()
        .change_context(Error::ParseError)
        .attach_printable_lazy(|| format!("Amount out of range: {s}"))
}

/// Missing or unparsable gas values count as zero.
pub fn sum_gas<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> u128 {
    values
        .into_iter()
        .map(|gas| gas.and_then(|gas| gas.parse::<u128>().ok()).unwrap_or(0))
        .fold(0u128, u128::saturating_add)
}

/// `numerator / denominator` as a plain decimal string (never exponent
/// notation). A zero denominator yields `"0"`.
pub fn ratio_to_decimal_string(numerator: &str, denominator: u128) -> String {
    if denominator == 0 {
        return "0".to_string();
    }
    let numerator = numerator.parse::<f64>().unwrap_or(0.0);
    let ratio = numerator / denominator as f64;
    if ratio.is_finite() {
        // f64's Display is positional, so 5e-14 renders as 0.00000000000005.
        ratio.to_string()
    } else {
        "0".to_string()
    }
}

pub fn slippage_to_bps(slippage_percent: f64) -> SwapResult<u32> {
    if !slippage_percent.is_finite() {
        return Err(
            report!(Error::ParseError).attach_printable("Slippage percentage is not finite")
        );
    }

    if slippage_percent < 0.0 {
        return Err(report!(Error::ParseError).attach_printable("Slippage percentage is negative"));
    }

    let scaled = (slippage_percent * 100.0).trunc();
    if scaled > (u32::MAX as f64) {
        return Err(report!(Error::ParseError).attach_printable("Slippage percentage is too large"));
    }

    Ok(scaled as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_string_to_u128() {
        assert_eq!(decimal_string_to_u128("123.456789", 6).unwrap(), 123456789);
        assert_eq!(
            decimal_string_to_u128("0.5", 18).unwrap(),
            500_000_000_000_000_000
        );
        assert_eq!(decimal_string_to_u128(".25", 2).unwrap(), 25);
        assert_eq!(decimal_string_to_u128("7", 3).unwrap(), 7000);
        assert_eq!(decimal_string_to_u128("1.23456", 2).unwrap(), 123);
    }

    #[test]
    fn test_decimal_string_to_u128_errors() {
        assert!(decimal_string_to_u128("-1", 18).is_err());
        assert!(decimal_string_to_u128("1.2.3", 18).is_err());
        assert!(decimal_string_to_u128("abc", 18).is_err());
    }

    #[test]
    fn test_u128_to_f64() {
        let result = u128_to_f64(123456789, 6);
        assert_eq!(result, 123.456789);
    }

    #[test]
    fn test_parse_integer_amount() {
        assert_eq!(
            parse_integer_amount("1000000000000000000").unwrap(),
            1_000_000_000_000_000_000
        );
        assert_eq!(parse_integer_amount("0").unwrap(), 0);
        assert!(parse_integer_amount("").is_err());
        assert!(parse_integer_amount("+1").is_err());
        assert!(parse_integer_amount("1.5").is_err());
        assert!(parse_integer_amount(" 1").is_err());
        assert!(parse_integer_amount("1e18").is_err());
    }

    #[test]
    fn test_sum_gas() {
        assert_eq!(sum_gas([Some("150000"), Some("120000")]), 270000);
        assert_eq!(sum_gas([Some("150000"), None]), 150000);
        assert_eq!(sum_gas([Some("oops"), Some("5")]), 5);
        assert_eq!(sum_gas([None, None]), 0);
    }

    #[test]
    fn test_ratio_to_decimal_string() {
        assert_eq!(
            ratio_to_decimal_string("50000", 1_000_000_000_000_000_000),
            "0.00000000000005"
        );
        assert_eq!(ratio_to_decimal_string("90", 1000), "0.09");
        assert_eq!(ratio_to_decimal_string("3000", 1000), "3");
        assert_eq!(ratio_to_decimal_string("90", 0), "0");
        assert_eq!(ratio_to_decimal_string("garbage", 10), "0");
    }

    #[test]
    fn test_slippage_to_bps_monotonic() {
        let mut last = slippage_to_bps(0.0).unwrap();
        for s in (1..=10_000).map(|x| x as f64 / 100.0) {
            let cur = slippage_to_bps(s).unwrap();
            assert!(cur >= last, "bps should be non-decreasing");
            last = cur;
        }
        assert_eq!(slippage_to_bps(10.0).unwrap(), 1000);
        assert!(slippage_to_bps(-1.0).is_err());
        assert!(slippage_to_bps(f64::NAN).is_err());
    }
}
