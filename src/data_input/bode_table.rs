// src/data_input/bode_table.rs

use ndarray::Array1;

/// One frequency sweep: input/output amplitudes and measured phase per frequency point.
#[derive(Debug, Clone)]
pub struct BodeTable {
    pub frequency_hz: Array1<f64>,
    pub ue: Array1<f64>,        // Input amplitude.
    pub ua: Array1<f64>,        // Output amplitude.
    pub phase_deg: Array1<f64>, // Phase shift between output and input, degrees.
}

impl BodeTable {
    pub fn len(&self) -> usize {
        self.frequency_hz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequency_hz.is_empty()
    }
}

// src/data_input/bode_table.rs
