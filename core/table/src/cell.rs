//! FILENAME: core/table/src/cell.rs
//! PURPOSE: Defines the cell value carried by raw source tables.
//! CONTEXT: Source feeds deliver heterogeneous rows (strings, numbers, blanks).
//! Every consumer goes through the coercion helpers here instead of
//! stringifying or parsing cells ad hoc.

use serde::{Deserialize, Serialize};

/// The raw content of a single table cell.
///
/// Deserializes from JSON `null`, numbers and strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

/// One data row. Rows may be ragged; missing trailing cells read as empty.
pub type OrderedRow = Vec<CellValue>;

impl CellValue {
    /// Returns the cell as display text. Empty cells become "".
    pub fn as_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => {
                // Format without unnecessary decimal places
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Text(s) => s.clone(),
        }
    }

    /// Returns the numeric reading of the cell, if it has one.
    /// Text is parsed with [`parse_number`].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Empty => None,
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => parse_number(s),
        }
    }

    /// True for `Empty` and for text that is blank after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(_) => false,
            CellValue::Text(s) => s.trim().is_empty(),
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

/// Parses a floating-point number from free text.
///
/// A comma is accepted as the decimal separator. Like a leading-number parse,
/// trailing garbage is ignored ("12 шт" reads as 12). Returns `None` when the
/// text does not start with a number.
pub fn parse_number(text: &str) -> Option<f64> {
    let normalized = text.trim().replace(',', ".");
    let bytes = normalized.as_bytes();
    let len = bytes.len();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < len && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        let frac_digits = frac_end - frac_start;
        if digits > 0 || frac_digits > 0 {
            end = frac_end;
            digits += frac_digits;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < len && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < len && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < len && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    normalized[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_string_drops_integral_decimals() {
        assert_eq!(CellValue::Number(5.0).as_string(), "5");
        assert_eq!(CellValue::Number(2.5).as_string(), "2.5");
        assert_eq!(CellValue::Number(-3.0).as_string(), "-3");
        assert_eq!(CellValue::Empty.as_string(), "");
        assert_eq!(CellValue::from("Ростов").as_string(), "Ростов");
    }

    #[test]
    fn test_parse_number_comma_decimal() {
        assert_eq!(parse_number("1,5"), Some(1.5));
        assert_eq!(parse_number("  42 "), Some(42.0));
        assert_eq!(parse_number("-0,25"), Some(-0.25));
    }

    #[test]
    fn test_parse_number_leading_prefix() {
        assert_eq!(parse_number("12 шт"), Some(12.0));
        assert_eq!(parse_number("3.5kg"), Some(3.5));
        assert_eq!(parse_number("1e3x"), Some(1000.0));
        assert_eq!(parse_number("2e"), Some(2.0));
        assert_eq!(parse_number(".5"), Some(0.5));
    }

    #[test]
    fn test_parse_number_rejects_non_numeric() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("."), None);
    }

    #[test]
    fn test_as_number() {
        assert_eq!(CellValue::Number(7.0).as_number(), Some(7.0));
        assert_eq!(CellValue::from("7,25").as_number(), Some(7.25));
        assert_eq!(CellValue::from("n/a").as_number(), None);
        assert_eq!(CellValue::Empty.as_number(), None);
    }

    #[test]
    fn test_deserialize_mixed_row() {
        let row: OrderedRow = serde_json::from_str(r#"["Казань", 2, null, "3,5"]"#).unwrap();
        assert_eq!(
            row,
            vec![
                CellValue::from("Казань"),
                CellValue::Number(2.0),
                CellValue::Empty,
                CellValue::from("3,5"),
            ]
        );
    }

    #[test]
    fn test_is_blank() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::from("   ").is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }
}
