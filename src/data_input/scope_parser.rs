// src/data_input/scope_parser.rs

use csv::ReaderBuilder;
use log::debug;
use ndarray::Array1;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::constants::{SCOPE_CHANNEL_1_COLUMN, SCOPE_CHANNEL_2_COLUMN, SCOPE_X_COLUMN};
use crate::data_input::numeric::{find_column, parse_cell, record_line, DecimalMark};
use crate::data_input::scope_table::ScopeTable;
use crate::error::{AnalysisError, AnalysisResult};

/// Parses a comma-separated scope export.
///
/// The file must carry `x-axis` and `1` columns (`2` is optional). The first data row holds
/// units and is discarded. Missing required columns are reported as
/// [`AnalysisError::MissingColumns`] so the caller can decide to skip the file.
pub fn parse_scope_file(input_file_path: &Path) -> AnalysisResult<ScopeTable> {
    let file = File::open(input_file_path)?;
    parse_scope_reader(BufReader::new(file), input_file_path)
}

/// Same as [`parse_scope_file`] for any reader; `source` is only used in error reports.
pub fn parse_scope_reader<R: Read>(input: R, source: &Path) -> AnalysisResult<ScopeTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let header_record = reader.headers()?.clone();
    debug!("Headers found in {}: {:?}", source.display(), header_record);

    let x_index = find_column(&header_record, SCOPE_X_COLUMN);
    let ch1_index = find_column(&header_record, SCOPE_CHANNEL_1_COLUMN);
    let ch2_index = find_column(&header_record, SCOPE_CHANNEL_2_COLUMN);

    let (x_index, ch1_index) = match (x_index, ch1_index) {
        (Some(x), Some(c1)) => (x, c1),
        _ => {
            let missing = [(SCOPE_X_COLUMN, x_index), (SCOPE_CHANNEL_1_COLUMN, ch1_index)]
                .iter()
                .filter(|(_, idx)| idx.is_none())
                .map(|(name, _)| name.to_string())
                .collect();
            return Err(AnalysisError::MissingColumns {
                path: source.to_path_buf(),
                missing,
            });
        }
    };

    let mut x_axis = Vec::new();
    let mut channel_1 = Vec::new();
    let mut channel_2 = ch2_index.map(|_| Vec::new());

    for (record_index, result) in reader.records().enumerate() {
        let record = result?;
        if record_index == 0 {
            debug!("Dropping unit row: {:?}", record);
            continue;
        }
        let line = record_line(&record, record_index);

        x_axis.push(parse_cell(
            record.get(x_index),
            SCOPE_X_COLUMN,
            line,
            DecimalMark::Point,
        )?);
        channel_1.push(parse_cell(
            record.get(ch1_index),
            SCOPE_CHANNEL_1_COLUMN,
            line,
            DecimalMark::Point,
        )?);
        if let (Some(values), Some(idx)) = (channel_2.as_mut(), ch2_index) {
            values.push(parse_cell(
                record.get(idx),
                SCOPE_CHANNEL_2_COLUMN,
                line,
                DecimalMark::Point,
            )?);
        }
    }

    debug!(
        "Read {} data rows from {} (channel 2 {})",
        x_axis.len(),
        source.display(),
        if channel_2.is_some() { "present" } else { "absent" }
    );

    Ok(ScopeTable {
        x_axis: Array1::from(x_axis),
        channel_1: Array1::from(channel_1),
        channel_2: channel_2.map(Array1::from),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> AnalysisResult<ScopeTable> {
        parse_scope_reader(text.as_bytes(), Path::new("test.csv"))
    }

    #[test]
    fn test_drops_unit_row_and_trims_headers() {
        let table = parse(" x-axis , 1 , 2 \nsecond,Volt,Volt\n0.0,1.0,2.0\n0.1,1.5,2.5\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.x_axis.to_vec(), vec![0.0, 0.1]);
        assert_eq!(table.channel_1.to_vec(), vec![1.0, 1.5]);
        assert_eq!(table.channel_2.unwrap().to_vec(), vec![2.0, 2.5]);
    }

    #[test]
    fn test_channel_2_is_optional() {
        let table = parse("x-axis,1\nsecond,Volt\n0.0,1.0\n").unwrap();
        assert!(!table.has_channel_2());
        assert_eq!(table.channel_1.to_vec(), vec![1.0]);
    }

    #[test]
    fn test_missing_columns_are_listed() {
        match parse("time,1\nsecond,Volt\n0.0,1.0\n") {
            Err(AnalysisError::MissingColumns { missing, .. }) => {
                assert_eq!(missing, vec!["x-axis".to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
        match parse("x-axis,2\nsecond,Volt\n0.0,1.0\n") {
            Err(AnalysisError::MissingColumns { missing, .. }) => {
                assert_eq!(missing, vec!["1".to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_value_is_an_error() {
        match parse("x-axis,1\nsecond,Volt\n0.0,1.0\n0.1,oops\n") {
            Err(AnalysisError::NonNumeric { column, line, value }) => {
                assert_eq!(column, "1");
                assert_eq!(line, 4);
                assert_eq!(value, "oops");
            }
            other => panic!("expected NonNumeric, got {other:?}"),
        }
    }

    #[test]
    fn test_short_rows_and_empty_cells_become_nan() {
        let table = parse("x-axis,1,2\nsecond,Volt,Volt\n0.0,1.0\n0.1,,3.0\n").unwrap();
        let ch2 = table.channel_2.unwrap();
        assert!(ch2[0].is_nan());
        assert_eq!(ch2[1], 3.0);
        assert!(table.channel_1[1].is_nan());
    }

    #[test]
    fn test_only_unit_row_gives_empty_table() {
        let table = parse("x-axis,1\nsecond,Volt\n").unwrap();
        assert!(table.is_empty());
    }
}
