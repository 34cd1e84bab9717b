//! Guard against zero scale statistics.
//!
//! Every dividing scaler routes its raw scale through [`guard_scale`]:
//!
//! 1. a raw statistic of exactly `0.0` is replaced by the fallback statistic
//!    when one is given and nonzero, otherwise by `1.0`;
//! 2. `eps` is added to the result.
//!
//! A constant lane therefore gets unit scale, which callers see as `1 + eps`
//! in the returned statistics.

use ndarray::{ArrayD, Zip};
use tracing::trace;

/// Ratio between the median absolute deviation and the standard deviation
/// of a normal distribution (the 0.75 quantile of the standard normal).
pub const NORMAL_MAD_RATIO: f64 = 0.6744897501960817;

/// Default `eps` added to scale statistics.
pub const DEFAULT_EPS: f64 = 1e-6;

/// Replace a zero scale by `fallback` (or `1.0`) and add `eps`.
#[inline]
pub fn guard_scale(raw: f64, fallback: Option<f64>, eps: f64) -> f64 {
    let scale = if raw == 0.0 {
        match fallback {
            Some(f) if f != 0.0 => f,
            _ => 1.0,
        }
    } else {
        raw
    };
    scale + eps
}

/// [`guard_scale`] over arrays of per-lane statistics.
///
/// `fallback`, when given, has the same shape as `raw`.
pub(crate) fn guard_scales(
    raw: &ArrayD<f64>,
    fallback: Option<&ArrayD<f64>>,
    eps: f64,
) -> ArrayD<f64> {
    let degenerate = raw.iter().filter(|&&r| r == 0.0).count();
    if degenerate > 0 {
        trace!(degenerate, lanes = raw.len(), "replacing zero scale statistics");
    }
    match fallback {
        Some(fb) => Zip::from(raw)
            .and(fb)
            .map_collect(|&r, &f| guard_scale(r, Some(f), eps)),
        None => raw.mapv(|r| guard_scale(r, None, eps)),
    }
}
