// src/data_analysis/signal_metrics.rs

use log::debug;
use ndarray::{Array1, ArrayView1};

use crate::constants::{
    MIN_PEAK_DISTANCE_SAMPLES, PEAK_THRESHOLD_RATIO, SCOPE_CHANNEL_1_COLUMN,
};
use crate::data_analysis::peak_detection::find_peaks;
use crate::data_input::scope_table::ScopeTable;
use crate::error::{AnalysisError, AnalysisResult};

/// Metrics derived from one scope channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMetrics {
    pub peak_to_peak: f64,
    pub peak_indices: Vec<usize>,
    pub maxima: Vec<f64>, // x-axis positions of the detected peaks.
    pub period: f64,      // 0 when fewer than two peaks were found.
    pub frequency: f64,   // 0 when the period is 0.
}

/// Everything computed for one scope export.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeAnalysis {
    pub threshold: f64,
    pub channel_1: ChannelMetrics,
    pub channel_2: Option<ChannelMetrics>,
    pub phase_shift_degrees: Option<f64>, // Some whenever channel 2 exists.
}

impl ScopeAnalysis {
    pub fn maxima_1(&self) -> &[f64] {
        &self.channel_1.maxima
    }

    pub fn maxima_2(&self) -> Option<&[f64]> {
        self.channel_2.as_ref().map(|c| c.maxima.as_slice())
    }

    pub fn period_1(&self) -> f64 {
        self.channel_1.period
    }

    pub fn period_2(&self) -> Option<f64> {
        self.channel_2.as_ref().map(|c| c.period)
    }

    pub fn frequency_1(&self) -> f64 {
        self.channel_1.frequency
    }

    pub fn frequency_2(&self) -> Option<f64> {
        self.channel_2.as_ref().map(|c| c.frequency)
    }
}

/// Largest sample, NaNs ignored. `None` if there is no numeric sample.
pub fn max_ignoring_nan(values: ArrayView1<f64>) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
}

/// Smallest sample, NaNs ignored. `None` if there is no numeric sample.
pub fn min_ignoring_nan(values: ArrayView1<f64>) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.min(v))))
}

/// `|max| + |min|`, which is the usual peak-to-peak value for a signal centred around zero.
/// NaN when the channel holds no numeric sample.
pub fn peak_to_peak(values: ArrayView1<f64>) -> f64 {
    match (max_ignoring_nan(values), min_ignoring_nan(values)) {
        (Some(max), Some(min)) => max.abs() + min.abs(),
        _ => f64::NAN,
    }
}

/// Mean spacing of consecutive maxima, or 0 with fewer than two maxima.
pub fn period_from_maxima(maxima: &[f64]) -> f64 {
    if maxima.len() < 2 {
        return 0.0;
    }
    let spacings: Array1<f64> = maxima.windows(2).map(|w| w[1] - w[0]).collect();
    spacings.mean().unwrap_or(0.0)
}

pub fn frequency_from_period(period: f64) -> f64 {
    if period != 0.0 {
        1.0 / period
    } else {
        0.0
    }
}

/// Phase shift in degrees of `reference_period`.
///
/// Uses the smallest distance between any reference maximum and any other maximum. This is
/// the nearest pair overall, not necessarily two peaks of the same cycle.
pub fn phase_shift_degrees(maxima_1: &[f64], maxima_2: &[f64], reference_period: f64) -> f64 {
    let min_time_difference = maxima_1
        .iter()
        .flat_map(|a| maxima_2.iter().map(move |b| (a - b).abs()))
        .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |m| m.min(d))))
        .unwrap_or(0.0);

    if reference_period != 0.0 {
        min_time_difference / reference_period * 360.0
    } else {
        0.0
    }
}

/// Peak-to-peak, peaks, period and frequency of one channel against the shared time base.
pub fn analyze_channel(
    x_axis: ArrayView1<f64>,
    values: ArrayView1<f64>,
    threshold: f64,
    min_distance: usize,
) -> ChannelMetrics {
    let samples = values.to_vec();
    let peak_indices = find_peaks(&samples, threshold, min_distance);
    let maxima: Vec<f64> = peak_indices.iter().map(|&idx| x_axis[idx]).collect();
    let period = period_from_maxima(&maxima);

    ChannelMetrics {
        peak_to_peak: peak_to_peak(values),
        peak_indices,
        maxima,
        period,
        frequency: frequency_from_period(period),
    }
}

/// Runs the full peak analysis on a parsed scope export.
///
/// The detection threshold is 80 % of the channel 1 maximum and is applied to channel 2 as
/// well; channel 2 does not get its own threshold. A table without rows is an
/// [`AnalysisError::EmptyChannel`]; rows whose channel 1 cells are all empty are analysed and
/// simply yield no peaks.
pub fn analyze_scope_table(table: &ScopeTable) -> AnalysisResult<ScopeAnalysis> {
    analyze_scope_table_with_distance(table, MIN_PEAK_DISTANCE_SAMPLES)
}

/// [`analyze_scope_table`] with a caller-chosen peak spacing (in samples).
pub fn analyze_scope_table_with_distance(
    table: &ScopeTable,
    min_distance: usize,
) -> AnalysisResult<ScopeAnalysis> {
    if table.is_empty() {
        return Err(AnalysisError::EmptyChannel {
            column: SCOPE_CHANNEL_1_COLUMN.to_string(),
        });
    }
    // An all-empty channel gives a NaN threshold, which no sample reaches.
    let channel_1_max = max_ignoring_nan(table.channel_1.view()).unwrap_or(f64::NAN);
    let threshold = PEAK_THRESHOLD_RATIO * channel_1_max;
    debug!("Peak threshold {threshold:.4} (channel 1 max {channel_1_max:.4}), spacing {min_distance} samples");

    let channel_1 = analyze_channel(
        table.x_axis.view(),
        table.channel_1.view(),
        threshold,
        min_distance,
    );

    let channel_2 = table.channel_2.as_ref().map(|values| {
        analyze_channel(table.x_axis.view(), values.view(), threshold, min_distance)
    });

    let phase_shift_degrees = channel_2
        .as_ref()
        .map(|c2| phase_shift_degrees(&channel_1.maxima, &c2.maxima, channel_1.period));

    Ok(ScopeAnalysis {
        threshold,
        channel_1,
        channel_2,
        phase_shift_degrees,
    })
}
