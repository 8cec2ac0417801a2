//! Amount parsing and display.

use crate::errors::ValidationError;

use super::record::is_valid_amount;

/// Parses raw user input into a positive, finite amount.
pub fn parse_amount(raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidAmount);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::InvalidAmount)?;
    if !is_valid_amount(value) {
        return Err(ValidationError::InvalidAmount);
    }
    Ok(value)
}

/// Formats an amount with the currency prefix and two decimal places.
pub fn format_amount(prefix: &str, value: f64) -> String {
    format!("{prefix}{value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_decimals() {
        assert_eq!(parse_amount("150.5"), Ok(150.5));
        assert_eq!(parse_amount(" 49.99 "), Ok(49.99));
        assert_eq!(parse_amount("1e2"), Ok(100.0));
    }

    #[test]
    fn rejects_non_numeric_and_non_positive() {
        for raw in ["abc", "", "   ", "0", "-3", "NaN", "inf", "12abc"] {
            assert_eq!(
                parse_amount(raw),
                Err(ValidationError::InvalidAmount),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn formats_with_prefix_and_two_decimals() {
        assert_eq!(format_amount("₹", 200.49000000000001), "₹200.49");
        assert_eq!(format_amount("$", 5.0), "$5.00");
    }
}
