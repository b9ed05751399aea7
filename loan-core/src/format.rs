//! Display formatting for currency amounts and interest rates.
//!
//! Amounts are always whole units with grouped digits and no decimals. Two
//! grouping styles are supported:
//!
//! | Style                          | 1234567      |
//! |--------------------------------|--------------|
//! | [`DigitGrouping::Indian`]      | `12,34,567`  |
//! | [`DigitGrouping::International`] | `1,234,567` |
//!
//! ```
//! use loan_core::format::{DigitGrouping, format_currency};
//!
//! assert_eq!(format_currency(500000, DigitGrouping::Indian), "₹5,00,000");
//! assert_eq!(format_currency(500000, DigitGrouping::International), "₹500,000");
//! ```

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CURRENCY_SYMBOL: &str = "₹";

/// Where thousands separators go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitGrouping {
    /// Last three digits, then pairs (lakh/crore).
    #[default]
    Indian,
    /// Groups of three.
    International,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown digit grouping '{0}' (expected 'indian' or 'international')")]
pub struct ParseGroupingError(String);

impl FromStr for DigitGrouping {
    type Err = ParseGroupingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "indian" | "en-in" => Ok(Self::Indian),
            "international" | "western" => Ok(Self::International),
            _ => Err(ParseGroupingError(s.to_string())),
        }
    }
}

fn group_digits(
    digits: &str,
    first: usize,
    rest: usize,
) -> String {
    if digits.len() <= first {
        return digits.to_string();
    }

    let (mut remaining, tail) = digits.split_at(digits.len() - first);
    let mut groups = vec![tail];
    while remaining.len() > rest {
        let (head, group) = remaining.split_at(remaining.len() - rest);
        groups.push(group);
        remaining = head;
    }
    groups.push(remaining);
    groups.reverse();
    groups.join(",")
}

/// Formats a whole amount with digit grouping and no currency symbol.
pub fn format_amount(
    value: u64,
    grouping: DigitGrouping,
) -> String {
    let digits = value.to_string();
    match grouping {
        DigitGrouping::Indian => group_digits(&digits, 3, 2),
        DigitGrouping::International => group_digits(&digits, 3, 3),
    }
}

/// [`format_amount`] with the rupee symbol in front.
pub fn format_currency(
    value: u64,
    grouping: DigitGrouping,
) -> String {
    format!("{CURRENCY_SYMBOL}{}", format_amount(value, grouping))
}

/// Formats an annual rate with exactly one decimal place, e.g. `13.0% p.a.`.
pub fn format_rate(rate: Decimal) -> String {
    let mut rounded = rate.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(1);
    format!("{rounded}% p.a.")
}
