// src/batch.rs

use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::SCOPE_FILE_EXTENSION;
use crate::data_analysis::signal_metrics::{analyze_scope_table, ScopeAnalysis};
use crate::data_input::scope_parser::parse_scope_file;
use crate::error::{AnalysisError, AnalysisResult};
use crate::plot_framework::png_output_path;
use crate::plot_functions::plot_scope_channels::plot_scope_channels;

/// Outcome of a directory run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub analyzed: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Loads one scope export, analyses it and writes `<stem>.png` into `output_dir`.
///
/// Returns `Ok(None)` when the file lacks the `x-axis` or `1` column; nothing is written then.
pub fn analyze_and_plot(input_path: &Path, output_dir: &Path) -> AnalysisResult<Option<ScopeAnalysis>> {
    let table = match parse_scope_file(input_path) {
        Ok(table) => table,
        Err(AnalysisError::MissingColumns { path, missing }) => {
            debug!("{}: missing {}", path.display(), missing.join(", "));
            info!(
                "Die Datei {} enthält nicht die erwarteten Spalten.",
                path.display()
            );
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let analysis = analyze_scope_table(&table)?;
    let output_file = png_output_path(input_path, output_dir, "");
    plot_scope_channels(&table, &analysis, &output_file)?;
    info!("Plot saved as '{}'", output_file.display());
    Ok(Some(analysis))
}

/// True for file names ending in `.csv` (case sensitive).
pub fn is_scope_csv(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(SCOPE_FILE_EXTENSION))
}

fn log_metrics(input_path: &Path, analysis: &ScopeAnalysis) {
    let c1 = &analysis.channel_1;
    info!("{}:", input_path.display());
    info!("  Maxima Kurve 1: {:?}", c1.maxima);
    info!(
        "  Peak-to-Peak Kurve 1: {:.2} V, Periode T1: {:.4} s, Frequenz f1: {:.2} Hz",
        c1.peak_to_peak, c1.period, c1.frequency
    );
    if let Some(c2) = &analysis.channel_2 {
        info!("  Maxima Kurve 2: {:?}", c2.maxima);
        info!(
            "  Peak-to-Peak Kurve 2: {:.2} V, Periode T2: {:.4} s, Frequenz f2: {:.2} Hz",
            c2.peak_to_peak, c2.period, c2.frequency
        );
        info!(
            "  Phasenverschiebung: {:.2}°",
            analysis.phase_shift_degrees.unwrap_or(0.0)
        );
    }
}

/// Runs [`analyze_and_plot`] on every `*.csv` file in `input_dir`, in directory listing order.
/// The first hard error stops the run.
pub fn process_directory(input_dir: &Path, output_dir: &Path) -> AnalysisResult<BatchSummary> {
    let mut summary = BatchSummary::default();

    for entry in fs::read_dir(input_dir)? {
        let path = entry?.path();
        if !path.is_file() || !is_scope_csv(&path) {
            continue;
        }

        match analyze_and_plot(&path, output_dir)? {
            Some(analysis) => {
                log_metrics(&path, &analysis);
                summary.analyzed.push(path);
            }
            None => summary.skipped.push(path),
        }
    }

    info!(
        "{} file(s) analysed, {} skipped",
        summary.analyzed.len(),
        summary.skipped.len()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_scope_csv_is_case_sensitive() {
        assert!(is_scope_csv(Path::new("messung.csv")));
        assert!(is_scope_csv(Path::new("dir/a.b.csv")));
        assert!(!is_scope_csv(Path::new("1.Versuch_korrekt.CSV")));
        assert!(!is_scope_csv(Path::new("notes.txt")));
        assert!(!is_scope_csv(Path::new("csv")));
    }
}
