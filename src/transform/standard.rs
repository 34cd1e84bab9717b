//! Standard scaler: masked mean and standard deviation.
//!
//! z = (x - mean) / std
//!
//! The standard deviation is the square root of the masked mean of squared
//! deviations (population form, `n` in the denominator).

use super::guard::guard_scales;
use super::statistics::{map_with_stats, ScalerStats};
use super::Scaled;
use crate::core::MaskElement;
use crate::error::Result;
use crate::utils::{stats, MaskedSeries};
use ndarray::{ArrayD, AsArray, Dimension};

pub(crate) fn standard_stats(series: &MaskedSeries<'_>, eps: f64) -> ScalerStats {
    let moments = series.map_lanes(true, |v| {
        let mean = stats::mean(v).unwrap_or(0.0);
        (mean, stats::rms_deviation(v, mean).unwrap_or(0.0))
    });
    let shift = moments.mapv(|(mean, _)| mean);
    let std = moments.mapv(|(_, std)| std);
    ScalerStats {
        shift,
        scale: guard_scales(&std, None, eps),
    }
}

#[inline]
pub(crate) fn forward(x: f64, shift: f64, scale: f64) -> f64 {
    (x - shift) / scale
}

#[inline]
pub(crate) fn inverse(z: f64, shift: f64, scale: f64) -> f64 {
    z * scale + shift
}

/// Masked mean and guarded standard deviation along `dim`.
///
/// A lane with zero variance gets `scale = 1 + eps`.
pub fn std_statistics<'a, 'm, D, E, M>(
    x: impl AsArray<'a, f64, D>,
    mask: impl AsArray<'m, M, E>,
    dim: isize,
    eps: f64,
) -> Result<ScalerStats>
where
    D: Dimension,
    E: Dimension,
    M: MaskElement + 'm,
{
    Ok(standard_stats(&MaskedSeries::new(x, mask, dim)?, eps))
}

/// Standardize `x` along `dim`, returning `(z, mean, std)`.
pub fn standard_scaler<'a, 'm, D, E, M>(
    x: impl AsArray<'a, f64, D>,
    mask: impl AsArray<'m, M, E>,
    dim: isize,
    eps: f64,
) -> Result<Scaled>
where
    D: Dimension,
    E: Dimension,
    M: MaskElement + 'm,
{
    let series = MaskedSeries::new(x, mask, dim)?;
    let stats = standard_stats(&series, eps);
    let z = map_with_stats(series.values(), &stats.shift, &stats.scale, forward)?;
    Ok((z, stats.shift, stats.scale))
}

/// Undo [`standard_scaler`]: `x = z * std + mean`.
pub fn inv_standard_scaler<'a, 's, 'c, D, E, F>(
    z: impl AsArray<'a, f64, D>,
    shift: impl AsArray<'s, f64, E>,
    scale: impl AsArray<'c, f64, F>,
) -> Result<ArrayD<f64>>
where
    D: Dimension,
    E: Dimension,
    F: Dimension,
{
    map_with_stats(z, shift, scale, inverse)
}
