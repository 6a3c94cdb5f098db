// src/data_analysis/peak_detection.rs

use std::cmp::Ordering;

/// Finds local maxima that reach `min_height` and lie at least `min_distance` samples apart.
///
/// A sample is a local maximum when it rises above its left neighbour and the signal then
/// falls below it again; a flat top counts once, at its middle sample (the left one of the
/// two middles for an even plateau). The first and last samples are never peaks.
/// When two candidates are closer than `min_distance`, the higher one wins; on equal height
/// the later one wins. Returned indices are in ascending order.
pub fn find_peaks(signal: &[f64], min_height: f64, min_distance: usize) -> Vec<usize> {
    let candidates: Vec<usize> = local_maxima(signal)
        .into_iter()
        .filter(|&idx| signal[idx] >= min_height)
        .collect();

    select_by_distance(signal, candidates, min_distance.max(1))
}

/// Indices of all local maxima, plateau-aware, in ascending order.
fn local_maxima(signal: &[f64]) -> Vec<usize> {
    let mut maxima = Vec::new();
    if signal.len() < 3 {
        return maxima;
    }

    let last = signal.len() - 1;
    let mut i = 1;
    while i < last {
        if signal[i - 1] < signal[i] {
            // Walk across a possible plateau.
            let mut i_ahead = i + 1;
            while i_ahead < last && signal[i_ahead] == signal[i] {
                i_ahead += 1;
            }
            if signal[i_ahead] < signal[i] {
                let left_edge = i;
                let right_edge = i_ahead - 1;
                maxima.push((left_edge + right_edge) / 2);
                i = i_ahead;
                continue;
            }
        }
        i += 1;
    }
    maxima
}

/// Removes peaks closer than `min_distance` to a higher (or equally high, later) peak.
fn select_by_distance(signal: &[f64], peaks: Vec<usize>, min_distance: usize) -> Vec<usize> {
    if min_distance <= 1 || peaks.len() < 2 {
        return peaks;
    }

    // Visit order: highest first, later sample first on ties.
    let mut priority: Vec<usize> = (0..peaks.len()).collect();
    priority.sort_by(|&a, &b| {
        signal[peaks[b]]
            .partial_cmp(&signal[peaks[a]])
            .unwrap_or(Ordering::Equal)
            .then(b.cmp(&a))
    });

    let mut keep = vec![true; peaks.len()];
    for &current in &priority {
        if !keep[current] {
            continue;
        }

        // Peaks are sorted, so neighbours can be scanned outward until out of range.
        let mut k = current;
        while k > 0 && peaks[current] - peaks[k - 1] < min_distance {
            keep[k - 1] = false;
            k -= 1;
        }
        let mut k = current + 1;
        while k < peaks.len() && peaks[k] - peaks[current] < min_distance {
            keep[k] = false;
            k += 1;
        }
    }

    peaks
        .into_iter()
        .zip(keep)
        .filter_map(|(peak, kept)| kept.then_some(peak))
        .collect()
}
