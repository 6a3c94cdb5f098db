// tests/skip_message_test.rs

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs;
use std::sync::Mutex;

use scope_csv_render::batch::{analyze_and_plot, process_directory};

/// Collects formatted `info` and higher records so the test can inspect them.
struct CapturingLogger {
    lines: Mutex<Vec<String>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut lines) = self.lines.lock() {
                lines.push(record.args().to_string());
            }
        }
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    lines: Mutex::new(Vec::new()),
};

fn captured_lines() -> Vec<String> {
    LOGGER.lines.lock().unwrap().clone()
}

#[test]
fn test_missing_columns_message_is_logged() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Info);

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("wrong.csv");
    fs::write(&input, "time,ch1\ns,V\n0.0,1.0\n").unwrap();

    assert!(analyze_and_plot(&input, dir.path()).unwrap().is_none());
    let expected = format!(
        "Die Datei {} enthält nicht die erwarteten Spalten.",
        input.display()
    );
    assert!(
        captured_lines().contains(&expected),
        "missing '{expected}' in {:?}",
        captured_lines()
    );

    // The directory driver reports the same skip.
    let other = dir.path().join("other.csv");
    fs::write(&other, "a,b\n1,2\n").unwrap();
    fs::remove_file(&input).unwrap();
    let summary = process_directory(dir.path(), dir.path()).unwrap();
    assert_eq!(summary.skipped, vec![other.clone()]);
    let expected_other = format!(
        "Die Datei {} enthält nicht die erwarteten Spalten.",
        other.display()
    );
    assert!(captured_lines().contains(&expected_other));
    assert!(!dir.path().join("other.png").exists());
}
