// src/data_input/bode_parser.rs

use csv::ReaderBuilder;
use log::debug;
use ndarray::Array1;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::constants::{
    BODE_DELIMITER, BODE_FREQUENCY_COLUMN, BODE_PHASE_COLUMN, BODE_UA_COLUMN, BODE_UE_COLUMN,
};
use crate::data_input::bode_table::BodeTable;
use crate::data_input::numeric::{find_column, parse_cell, record_line, DecimalMark};
use crate::error::{AnalysisError, AnalysisResult};

/// Parses a frequency sweep exported with `;` separators and `,` as decimal mark.
///
/// Required columns: `Frequenz`, `Ue`, `Ua`, `Phase`. Every row is data; there is no unit row.
pub fn parse_bode_file(input_file_path: &Path) -> AnalysisResult<BodeTable> {
    let file = File::open(input_file_path)?;
    parse_bode_reader(BufReader::new(file), input_file_path)
}

pub fn parse_bode_reader<R: Read>(input: R, source: &Path) -> AnalysisResult<BodeTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(BODE_DELIMITER)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let header_record = reader.headers()?.clone();
    debug!("Headers found in {}: {:?}", source.display(), header_record);

    let target_headers = [
        BODE_FREQUENCY_COLUMN, // 0
        BODE_UE_COLUMN,        // 1
        BODE_UA_COLUMN,        // 2
        BODE_PHASE_COLUMN,     // 3
    ];
    let header_indices: Vec<Option<usize>> = target_headers
        .iter()
        .map(|name| find_column(&header_record, name))
        .collect();

    let missing: Vec<String> = target_headers
        .iter()
        .zip(&header_indices)
        .filter(|(_, idx)| idx.is_none())
        .map(|(name, _)| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(AnalysisError::MissingColumns {
            path: source.to_path_buf(),
            missing,
        });
    }
    let indices: Vec<usize> = header_indices.into_iter().flatten().collect();

    let mut columns: [Vec<f64>; 4] = Default::default();
    for (record_index, result) in reader.records().enumerate() {
        let record = result?;
        let line = record_line(&record, record_index);
        for (slot, (&csv_idx, name)) in indices.iter().zip(target_headers.iter()).enumerate() {
            columns[slot].push(parse_cell(
                record.get(csv_idx),
                name,
                line,
                DecimalMark::Comma,
            )?);
        }
    }

    let [frequency_hz, ue, ua, phase_deg] = columns;
    debug!("Read {} frequency points from {}", frequency_hz.len(), source.display());

    Ok(BodeTable {
        frequency_hz: Array1::from(frequency_hz),
        ue: Array1::from(ue),
        ua: Array1::from(ua),
        phase_deg: Array1::from(phase_deg),
    })
}
