//! Storefront monetary system
//!
//! Catalog prices are whole Indian rupees. The store never lists paise, so
//! the rupee is the smallest unit the builder deals in, and every total is
//! plain integer arithmetic.

/// Symbol printed in front of every amount
pub const CURRENCY_SYMBOL: &str = "₹";

/// ISO code of the catalog currency
pub const CURRENCY_CODE: &str = "INR";

/// Utility functions for amount parsing and display
pub mod conversions {
    use super::*;
    use crate::error::{BuilderError, Result};

    /// Format an amount with Indian digit grouping (last three digits, then
    /// pairs) and no fraction digits
    ///
    /// # Examples
    /// ```
    /// use rig_builder::core::monetary::conversions::format_currency;
    /// assert_eq!(format_currency(44_500), "₹44,500");
    /// assert_eq!(format_currency(1_234_567), "₹12,34,567");
    /// ```
    pub fn format_currency(amount: u64) -> String {
        let digits = amount.to_string();
        if digits.len() <= 3 {
            return format!("{CURRENCY_SYMBOL}{digits}");
        }

        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 2 {
            groups.push(&head[end - 2..end]);
            end -= 2;
        }
        groups.push(&head[..end]);
        groups.reverse();

        format!("{CURRENCY_SYMBOL}{},{tail}", groups.join(","))
    }

    /// Parse a decimal price string ("9500.0") into whole units, rounding
    /// half up
    ///
    /// # Examples
    /// ```
    /// use rig_builder::core::monetary::conversions::parse_amount;
    /// assert_eq!(parse_amount("9500.0").unwrap(), 9500);
    /// assert_eq!(parse_amount("99.5").unwrap(), 100);
    /// ```
    pub fn parse_amount(raw: &str) -> Result<u64> {
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| BuilderError::Parse(format!("Invalid amount: {raw}")))?;
        if !value.is_finite() || value < 0.0 {
            return Err(BuilderError::Parse(format!("Invalid amount: {raw}")));
        }
        let rounded = value.round();
        // u64::MAX as f64 is 2^64, one past the largest u64
        if rounded >= u64::MAX as f64 {
            return Err(BuilderError::Parse(format!("Amount out of range: {raw}")));
        }
        Ok(rounded as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::conversions::*;

    #[test]
    fn test_formatting() {
        assert_eq!(format_currency(0), "₹0");
        assert_eq!(format_currency(999), "₹999");
        assert_eq!(format_currency(1_000), "₹1,000");
        assert_eq!(format_currency(44_500), "₹44,500");
        assert_eq!(format_currency(123_456), "₹1,23,456");
        assert_eq!(format_currency(10_000_000), "₹1,00,00,000");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("24500.00").unwrap(), 24500);
        assert_eq!(parse_amount(" 0 ").unwrap(), 0);
        assert_eq!(parse_amount("3799.5").unwrap(), 3800);
        assert!(parse_amount("-1").is_err());
        assert!(parse_amount("free").is_err());
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("inf").is_err());
        assert!(parse_amount("1e30").is_err());
        assert!(parse_amount("18446744073709551616").is_err());
        assert_eq!(parse_amount("1e15").unwrap(), 1_000_000_000_000_000);
    }
}
