//! Utility functions for formatting and common operations
//!
//! This module provides centralized formatting utilities for consistent
//! display of currency, decimal, and percentage values throughout the
//! application.

use rust_decimal::Decimal;

/// Currency symbol options for formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencySymbol {
    /// Include "$ " prefix (base currency)
    Usd,
    /// No currency symbol (for table cells, calculations display)
    None,
}

/// Core formatting function with full control over output.
///
/// Formats a Decimal value with `,` as the thousands separator and `.` as
/// the decimal separator.
///
/// # Arguments
/// * `value` - The decimal value to format
/// * `width` - Minimum width for padding (0 for no padding, right-aligned)
/// * `symbol` - Whether to include currency symbol
///
/// # Examples
/// ```
/// use recoup::utils::{format_currency_with_width, CurrencySymbol};
/// use rust_decimal_macros::dec;
///
/// assert_eq!(
///     format_currency_with_width(dec!(1234.56), 0, CurrencySymbol::Usd),
///     "$ 1,234.56"
/// );
///
/// assert_eq!(
///     format_currency_with_width(dec!(1234), 10, CurrencySymbol::None),
///     "  1,234.00"
/// );
/// ```
pub fn format_currency_with_width(value: Decimal, width: usize, symbol: CurrencySymbol) -> String {
    let is_negative = value < Decimal::ZERO;
    let abs_value = value.abs();

    // Round to 2 decimal places and format
    let formatted = format!("{:.2}", abs_value);
    let parts: Vec<&str> = formatted.split('.').collect();

    let integer_part = parts[0];
    let decimal_part = parts.get(1).unwrap_or(&"00");

    // Add thousands separators (,) to integer part
    let with_separators: String = integer_part
        .chars()
        .rev()
        .enumerate()
        .flat_map(|(i, c)| {
            if i > 0 && i % 3 == 0 {
                vec![',', c]
            } else {
                vec![c]
            }
        })
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    let sign = if is_negative { "-" } else { "" };
    let prefix = match symbol {
        CurrencySymbol::Usd => "$ ",
        CurrencySymbol::None => "",
    };

    let result = format!("{}{}{}.{}", prefix, sign, with_separators, decimal_part);

    // Apply width padding (right-align)
    if width > 0 && result.len() < width {
        format!("{:>width$}", result, width = width)
    } else {
        result
    }
}

// ============ Convenience functions ============

/// Format as base currency with symbol: "$ 1,234.56"
///
/// # Examples
/// ```
/// use recoup::utils::format_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_currency(dec!(1234.56)), "$ 1,234.56");
/// assert_eq!(format_currency(dec!(-500)), "$ -500.00");
/// ```
pub fn format_currency(value: Decimal) -> String {
    format_currency_with_width(value, 0, CurrencySymbol::Usd)
}

/// Format an optional currency amount, rendering absent metrics as "-".
///
/// # Examples
/// ```
/// use recoup::utils::format_opt_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_opt_currency(Some(dec!(10))), "$ 10.00");
/// assert_eq!(format_opt_currency(None), "-");
/// ```
pub fn format_opt_currency(value: Option<Decimal>) -> String {
    value
        .map(format_currency)
        .unwrap_or_else(|| "-".to_string())
}

/// Format an optional percentage, rendering absent metrics as "-".
///
/// # Examples
/// ```
/// use recoup::utils::format_percent;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_percent(Some(dec!(75))), "75.00%");
/// assert_eq!(format_percent(None), "-");
/// ```
pub fn format_percent(value: Option<Decimal>) -> String {
    value
        .map(|v| format!("{:.2}%", v))
        .unwrap_or_else(|| "-".to_string())
}

/// Format number only (no symbol): "1,234.56"
pub fn format_decimal(value: Decimal) -> String {
    format_currency_with_width(value, 0, CurrencySymbol::None)
}
