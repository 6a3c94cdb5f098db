// src/data_analysis/mod.rs

pub mod bode_response;
pub mod peak_detection;
pub mod signal_metrics;

// src/data_analysis/mod.rs
