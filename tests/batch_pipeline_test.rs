// tests/batch_pipeline_test.rs

use std::f64::consts::PI;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use scope_csv_render::batch::{analyze_and_plot, process_directory};
use scope_csv_render::error::AnalysisError;

const FREQUENCY_HZ: f64 = 50.0;
const SAMPLES_PER_PERIOD: usize = 6000;
const PERIODS: usize = 3;

/// Scope export with a units row: channel 1 a sine, channel 2 the same sine a quarter period later.
fn write_scope_csv(path: &Path) {
    let dt = 1.0 / (FREQUENCY_HZ * SAMPLES_PER_PERIOD as f64);
    let mut csv = String::from("x-axis,1,2\nsecond,Volt,Volt\n");
    for i in 0..SAMPLES_PER_PERIOD * PERIODS {
        let phase = 2.0 * PI * i as f64 / SAMPLES_PER_PERIOD as f64;
        let ch1 = 2.0 * phase.sin();
        let ch2 = 2.0 * (phase - PI / 2.0).sin();
        writeln!(csv, "{},{},{}", i as f64 * dt, ch1, ch2).unwrap();
    }
    fs::write(path, csv).unwrap();
}

#[test]
fn test_end_to_end_frequency_and_png() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sine_50hz.csv");
    write_scope_csv(&input);

    let analysis = analyze_and_plot(&input, dir.path())
        .unwrap()
        .expect("file has the expected columns");

    assert_eq!(analysis.maxima_1().len(), PERIODS);
    let f1 = analysis.frequency_1();
    assert!((f1 - FREQUENCY_HZ).abs() / FREQUENCY_HZ < 0.05, "f1 = {f1}");
    let f2 = analysis.frequency_2().unwrap();
    assert!((f2 - FREQUENCY_HZ).abs() / FREQUENCY_HZ < 0.05, "f2 = {f2}");
    assert!((analysis.channel_1.peak_to_peak - 4.0).abs() < 1e-6);

    let phase = analysis.phase_shift_degrees.unwrap();
    assert!((phase - 90.0).abs() < 1.0, "phase = {phase}");

    let png = dir.path().join("sine_50hz.png");
    assert!(fs::metadata(&png).unwrap().len() > 0);
}

#[test]
fn test_missing_columns_skip_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("wrong.csv");
    fs::write(&input, "time,ch1\ns,V\n0.0,1.0\n").unwrap();

    assert!(analyze_and_plot(&input, dir.path()).unwrap().is_none());
    assert!(!dir.path().join("wrong.png").exists());
}

#[test]
fn test_non_numeric_value_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.csv");
    fs::write(&input, "x-axis,1\nsecond,Volt\n0.0,1.0\n0.1,abc\n").unwrap();

    match analyze_and_plot(&input, dir.path()) {
        Err(AnalysisError::NonNumeric { column, line, value }) => {
            assert_eq!(column, "1");
            assert_eq!(line, 4);
            assert_eq!(value, "abc");
        }
        other => panic!("expected NonNumeric, got {other:?}"),
    }
    assert!(!dir.path().join("broken.png").exists());
}

#[test]
fn test_process_directory_selects_lowercase_csv_only() {
    let input_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    write_scope_csv(&input_dir.path().join("good.csv"));
    write_scope_csv(&input_dir.path().join("upper.CSV"));
    fs::write(input_dir.path().join("notes.txt"), "x-axis,1\n").unwrap();
    fs::write(input_dir.path().join("other.csv"), "a,b\n1,2\n").unwrap();
    fs::create_dir(input_dir.path().join("folder.csv")).unwrap();

    let summary = process_directory(input_dir.path(), output_dir.path()).unwrap();

    assert_eq!(summary.analyzed, vec![input_dir.path().join("good.csv")]);
    assert_eq!(summary.skipped, vec![input_dir.path().join("other.csv")]);
    assert!(output_dir.path().join("good.png").exists());
    assert!(!output_dir.path().join("upper.png").exists());
    assert!(!output_dir.path().join("other.png").exists());
}

#[test]
fn test_process_directory_stops_on_hard_error() {
    let input_dir = tempfile::tempdir().unwrap();
    fs::write(
        input_dir.path().join("broken.csv"),
        "x-axis,1\nsecond,Volt\nnope,1.0\n",
    )
    .unwrap();

    assert!(matches!(
        process_directory(input_dir.path(), input_dir.path()),
        Err(AnalysisError::NonNumeric { .. })
    ));
}

#[test]
fn test_all_empty_channel_1_still_plots_and_batch_continues() {
    let input_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    let blank = input_dir.path().join("blank.csv");
    fs::write(&blank, "x-axis,1\ns,V\n0.0,\n0.1,\n0.2,\n").unwrap();
    write_scope_csv(&input_dir.path().join("good.csv"));

    let analysis = analyze_and_plot(&blank, output_dir.path()).unwrap().unwrap();
    assert!(analysis.maxima_1().is_empty());
    assert!(analysis.channel_1.peak_to_peak.is_nan());
    assert_eq!(analysis.frequency_1(), 0.0);
    assert!(fs::metadata(output_dir.path().join("blank.png")).unwrap().len() > 0);

    let summary = process_directory(input_dir.path(), output_dir.path()).unwrap();
    let mut analyzed = summary.analyzed.clone();
    analyzed.sort();
    assert_eq!(
        analyzed,
        vec![input_dir.path().join("blank.csv"), input_dir.path().join("good.csv")]
    );
    assert!(summary.skipped.is_empty());
    assert!(output_dir.path().join("good.png").exists());
}
