// src/data_input/numeric.rs

use csv::StringRecord;

use crate::error::{AnalysisError, AnalysisResult};

/// Decimal separator used by a CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecimalMark {
    Point,
    Comma,
}

/// Converts one CSV cell into `f64`.
///
/// Empty or absent cells become `NaN`, the way a tabular loader treats missing values.
/// Anything else that does not parse is reported with its column name and file line.
pub fn parse_cell(
    raw: Option<&str>,
    column: &str,
    line: u64,
    decimal_mark: DecimalMark,
) -> AnalysisResult<f64> {
    let trimmed = raw.map(str::trim).unwrap_or("");
    if trimmed.is_empty() {
        return Ok(f64::NAN);
    }

    let parsed = match decimal_mark {
        DecimalMark::Point => trimmed.parse::<f64>(),
        DecimalMark::Comma => trimmed.replace(',', ".").parse::<f64>(),
    };

    parsed.map_err(|_| AnalysisError::NonNumeric {
        column: column.to_string(),
        line,
        value: trimmed.to_string(),
    })
}

/// 1-based file line of a record, falling back to `header + 1 + index` when the
/// reader did not track positions.
pub fn record_line(record: &StringRecord, record_index: usize) -> u64 {
    record
        .position()
        .map(|p| p.line())
        .unwrap_or(record_index as u64 + 2)
}

/// Locates a column by its trimmed header name.
pub fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell_point_decimal() {
        assert_eq!(parse_cell(Some(" 1.25 "), "1", 3, DecimalMark::Point).unwrap(), 1.25);
        assert_eq!(parse_cell(Some("-4e-3"), "1", 3, DecimalMark::Point).unwrap(), -0.004);
    }

    #[test]
    fn test_parse_cell_comma_decimal() {
        assert_eq!(parse_cell(Some("0,707"), "Ua", 2, DecimalMark::Comma).unwrap(), 0.707);
        assert_eq!(parse_cell(Some("340"), "Frequenz", 2, DecimalMark::Comma).unwrap(), 340.0);
    }

    #[test]
    fn test_parse_cell_empty_is_nan() {
        assert!(parse_cell(Some(""), "2", 4, DecimalMark::Point).unwrap().is_nan());
        assert!(parse_cell(None, "2", 4, DecimalMark::Point).unwrap().is_nan());
    }

    #[test]
    fn test_parse_cell_reports_column_and_line() {
        match parse_cell(Some("Volt"), "1", 7, DecimalMark::Point) {
            Err(AnalysisError::NonNumeric { column, line, value }) => {
                assert_eq!(column, "1");
                assert_eq!(line, 7);
                assert_eq!(value, "Volt");
            }
            other => panic!("expected NonNumeric, got {other:?}"),
        }
    }

    #[test]
    fn test_find_column_trims_headers() {
        let headers = StringRecord::from(vec![" x-axis", "1 ", " 2 "]);
        assert_eq!(find_column(&headers, "x-axis"), Some(0));
        assert_eq!(find_column(&headers, "2"), Some(2));
        assert_eq!(find_column(&headers, "3"), None);
    }
}
