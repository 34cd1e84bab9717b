//! Statistical helpers over slices of already-filtered values.
//!
//! These run on the valid entries gathered from a single lane; they return
//! `None` for an empty slice so callers decide the fallback.

use std::cmp::Ordering;

/// Arithmetic mean of a slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median of a slice using the lower-middle convention.
///
/// For an even count the smaller of the two middle values is returned, no
/// averaging. The slice is reordered in place.
pub fn lower_median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let k = (values.len() - 1) / 2;
    let (_, median, _) = values.select_nth_unstable_by(k, |a, b| a.total_cmp(b));
    Some(*median)
}

/// Smallest value of a slice.
pub fn min(values: &[f64]) -> Option<f64> {
    extremum(values, Ordering::Less)
}

/// Largest value of a slice.
pub fn max(values: &[f64]) -> Option<f64> {
    extremum(values, Ordering::Greater)
}

/// Root mean squared deviation from `center` (population standard deviation
/// when `center` is the mean).
pub fn rms_deviation(values: &[f64], center: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let ss: f64 = values.iter().map(|v| (v - center).powi(2)).sum();
    Some((ss / values.len() as f64).sqrt())
}

/// Mean absolute deviation from `center`.
pub fn mean_abs_deviation(values: &[f64], center: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().map(|v| (v - center).abs()).sum::<f64>() / values.len() as f64)
}

fn extremum(values: &[f64], keep: Ordering) -> Option<f64> {
    values
        .iter()
        .copied()
        .reduce(|acc, v| if v.total_cmp(&acc) == keep { v } else { acc })
}
