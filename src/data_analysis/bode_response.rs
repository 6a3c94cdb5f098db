// src/data_analysis/bode_response.rs

use ndarray::{Array1, ArrayView1, Zip};

/// Gain of output over input in decibels: `20 * log10(ua / ue)`, element by element.
///
/// No guard is applied: a zero or negative ratio yields `-inf` or `NaN`, which the renderer
/// leaves out of the chart.
pub fn ratio_db(ue: ArrayView1<f64>, ua: ArrayView1<f64>) -> Array1<f64> {
    Zip::from(&ue)
        .and(&ua)
        .map_collect(|&input, &output| 20.0 * (output / input).log10())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_ratio_db_known_values() {
        let ue = array![1.0, 2.0, 1.0];
        let ua = array![1.0, 20.0, 0.1];
        let db = ratio_db(ue.view(), ua.view());
        assert!((db[0] - 0.0).abs() < 1e-12);
        assert!((db[1] - 20.0).abs() < 1e-12);
        assert!((db[2] + 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_half_power_point_is_about_minus_three_db() {
        let ue = array![1.0];
        let ua = array![std::f64::consts::FRAC_1_SQRT_2];
        let db = ratio_db(ue.view(), ua.view());
        assert!((db[0] + 3.0103).abs() < 1e-3);
    }

    #[test]
    fn test_non_positive_ratio_is_not_finite() {
        let ue = array![1.0, 1.0, -1.0];
        let ua = array![0.0, -1.0, 1.0];
        let db = ratio_db(ue.view(), ua.view());
        assert_eq!(db[0], f64::NEG_INFINITY);
        assert!(db[1].is_nan());
        assert!(db[2].is_nan());
    }
}
