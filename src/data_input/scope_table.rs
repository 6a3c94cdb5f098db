// src/data_input/scope_table.rs

use ndarray::Array1;

/// Numeric contents of one scope export, after the unit row has been dropped.
/// `x_axis` is the time base (seconds); the channels are voltages sampled at the same instants.
#[derive(Debug, Clone)]
pub struct ScopeTable {
    pub x_axis: Array1<f64>,
    pub channel_1: Array1<f64>,
    pub channel_2: Option<Array1<f64>>, // Present only when the export has a "2" column.
}

impl ScopeTable {
    pub fn len(&self) -> usize {
        self.x_axis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x_axis.is_empty()
    }

    pub fn has_channel_2(&self) -> bool {
        self.channel_2.is_some()
    }

    /// Index of the sample the curve labels point at.
    pub fn mid_index(&self) -> usize {
        self.len() / 2
    }
}

// src/data_input/scope_table.rs
