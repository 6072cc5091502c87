//! Default cell formatting.
//!
//! Formatting follows a single en-US style convention: comma thousands
//! separators, `.` as decimal point, `M/D/YYYY` dates. Null values always
//! format as the placeholder glyph, whatever the column type.

use super::row::Row;
use super::schema::{ColumnSchema, ColumnType};
use super::value::CellValue;

/// Options that influence default formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Text shown for null values.
    pub placeholder: String,
    /// Symbol prefixed to currency amounts.
    pub currency_symbol: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            placeholder: "\u{2014}".into(),
            currency_symbol: "$".into(),
        }
    }
}

/// Formats a value using the type-driven default for `column_type`.
///
/// # Example
///
/// ```
/// use horizon_tabular::model::{format_value, CellValue, ColumnType, FormatOptions};
///
/// let opts = FormatOptions::default();
/// assert_eq!(format_value(&CellValue::from(1234.5), ColumnType::Currency, &opts), "$1,234.50");
/// assert_eq!(format_value(&CellValue::Null, ColumnType::Number, &opts), "—");
/// ```
pub fn format_value(value: &CellValue, column_type: ColumnType, opts: &FormatOptions) -> String {
    if value.is_null() {
        return opts.placeholder.clone();
    }

    match column_type {
        ColumnType::Number => format_number(value.to_number()),
        ColumnType::Currency => format_currency(value.to_number(), &opts.currency_symbol),
        ColumnType::Date => match value.to_datetime() {
            Some(date) => date.format("%-m/%-d/%Y").to_string(),
            None => "Invalid Date".into(),
        },
        ColumnType::Boolean => {
            if value.is_truthy() {
                "Yes".into()
            } else {
                "No".into()
            }
        }
        ColumnType::Text | ColumnType::Custom => value.to_text().unwrap_or_default(),
    }
}

/// Plain-text content of a cell: the column's `format` function if it has
/// one, otherwise the type default. Nulls always yield the placeholder.
pub fn format_cell<R: Row>(column: &ColumnSchema<R>, row: &R, opts: &FormatOptions) -> String {
    let value = row.field(column.key());
    if value.is_null() {
        return opts.placeholder.clone();
    }
    match column.format_fn() {
        Some(format) => format(&value, row),
        None => format_value(&value, column.column_type(), opts),
    }
}

/// Rendered content of a cell: the column's `render` function if it has one,
/// otherwise the same text as [`format_cell`].
pub fn render_cell<R: Row>(column: &ColumnSchema<R>, row: &R, opts: &FormatOptions) -> String {
    match column.render_fn() {
        Some(render) => render(&row.field(column.key()), row),
        None => format_cell(column, row, opts),
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".into();
    }
    if n.is_infinite() {
        return if n > 0.0 { "∞" } else { "-∞" }.into();
    }

    let fixed = format!("{:.3}", round_half_away(n, 3));
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    group_decimal(trimmed)
}

fn format_currency(n: f64, symbol: &str) -> String {
    if n.is_nan() {
        return format!("{symbol}NaN");
    }
    if n.is_infinite() {
        return if n > 0.0 {
            format!("{symbol}∞")
        } else {
            format!("-{symbol}∞")
        };
    }

    let grouped = group_decimal(&format!("{:.2}", round_half_away(n, 2)));
    match grouped.strip_prefix('-') {
        Some(magnitude) => format!("-{symbol}{magnitude}"),
        None => format!("{symbol}{grouped}"),
    }
}

/// Rounds to `digits` decimals with ties away from zero, as en-US number
/// formatting does. `{:.N}` alone rounds exact binary ties to even.
fn round_half_away(n: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    let scaled = n * scale;
    if scaled.is_finite() {
        scaled.round() / scale
    } else {
        n
    }
}

/// Inserts thousands separators into a plain decimal string such as
/// `-1234567.25`. A negative zero comes out as `0`.
fn group_decimal(decimal: &str) -> String {
    let (negative, unsigned) = match decimal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, decimal),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(decimal.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    let is_zero = grouped.chars().all(|c| matches!(c, '0' | '.' | ','));
    if negative && !is_zero {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::row::Record;
    use chrono::{TimeZone, Utc};

    fn opts() -> FormatOptions {
        FormatOptions::default()
    }

    #[test]
    fn test_number_formatting() {
        let f = |v: f64| format_value(&CellValue::from(v), ColumnType::Number, &opts());
        assert_eq!(f(0.0), "0");
        assert_eq!(f(5.0), "5");
        assert_eq!(f(1234.0), "1,234");
        assert_eq!(f(-1234567.891), "-1,234,567.891");
        assert_eq!(f(0.12345), "0.123");
        assert_eq!(f(2.5), "2.5");
        assert_eq!(f(-0.0001), "0");
        assert_eq!(f(0.0625), "0.063");
        assert_eq!(f(1.0625), "1.063");
        assert_eq!(f(-0.0625), "-0.063");
        assert_eq!(f(f64::INFINITY), "∞");
    }

    #[test]
    fn test_non_numeric_text_in_number_column() {
        let value = CellValue::from("n/a");
        assert_eq!(format_value(&value, ColumnType::Number, &opts()), "NaN");
        let value = CellValue::from(" 1500 ");
        assert_eq!(format_value(&value, ColumnType::Number, &opts()), "1,500");
    }

    #[test]
    fn test_currency_formatting() {
        let f = |v: f64| format_value(&CellValue::from(v), ColumnType::Currency, &opts());
        assert_eq!(f(0.0), "$0.00");
        assert_eq!(f(9.5), "$9.50");
        assert_eq!(f(1234567.0), "$1,234,567.00");
        assert_eq!(f(-42.126), "-$42.13");
        assert_eq!(f(0.125), "$0.13");
        assert_eq!(f(10.125), "$10.13");
        assert_eq!(f(-0.125), "-$0.13");

        let euro = FormatOptions {
            currency_symbol: "€".into(),
            ..opts()
        };
        assert_eq!(
            format_value(&CellValue::from(3), ColumnType::Currency, &euro),
            "€3.00"
        );
    }

    #[test]
    fn test_date_formatting() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 13, 0, 0).unwrap();
        assert_eq!(
            format_value(&CellValue::from(date), ColumnType::Date, &opts()),
            "1/5/2024"
        );
        assert_eq!(
            format_value(&CellValue::from("2023-12-31"), ColumnType::Date, &opts()),
            "12/31/2023"
        );
        assert_eq!(
            format_value(&CellValue::from("soon"), ColumnType::Date, &opts()),
            "Invalid Date"
        );
    }

    #[test]
    fn test_boolean_and_text_formatting() {
        assert_eq!(format_value(&CellValue::from(true), ColumnType::Boolean, &opts()), "Yes");
        assert_eq!(format_value(&CellValue::from(0), ColumnType::Boolean, &opts()), "No");
        assert_eq!(format_value(&CellValue::from(12), ColumnType::Text, &opts()), "12");
        assert_eq!(format_value(&CellValue::from("x"), ColumnType::Custom, &opts()), "x");
    }

    #[test]
    fn test_null_uses_placeholder_for_every_type() {
        for column_type in [
            ColumnType::Text,
            ColumnType::Number,
            ColumnType::Date,
            ColumnType::Boolean,
            ColumnType::Currency,
            ColumnType::Custom,
        ] {
            assert_eq!(format_value(&CellValue::Null, column_type, &opts()), "—");
        }
    }

    #[test]
    fn test_format_cell_prefers_custom_format() {
        let column = ColumnSchema::<Record>::new("stock")
            .with_type(ColumnType::Number)
            .with_format(|value, _| format!("{} units", value));
        let row = Record::new().with("stock", 3);
        assert_eq!(format_cell(&column, &row, &opts()), "3 units");

        let empty = Record::new().with("stock", None::<i32>);
        assert_eq!(format_cell(&column, &empty, &opts()), "—");
    }

    #[test]
    fn test_render_cell_precedence() {
        let row = Record::new().with("status", "active").with("id", "a");
        let plain = ColumnSchema::<Record>::new("status");
        assert_eq!(render_cell(&plain, &row, &opts()), "active");

        let rendered = plain
            .clone()
            .with_format(|v, _| v.to_string().to_uppercase())
            .with_render(|v, row| format!("<badge id={}>{}</badge>", row.key("id"), v));
        assert_eq!(render_cell(&rendered, &row, &opts()), "<badge id=a>active</badge>");
        assert_eq!(format_cell(&rendered, &row, &opts()), "ACTIVE");
    }
}
