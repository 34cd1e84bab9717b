//! Median-centred scalers: robust and invariant.
//!
//! Both centre on the masked (lower) median and scale by the masked mean
//! absolute deviation from that median (MAD). A lane whose MAD is exactly
//! zero falls back to `std * NORMAL_MAD_RATIO`, and to `1.0` if that is also
//! zero. The invariant scaler additionally passes the robust score through
//! `asinh`, which compresses large outliers while staying invertible.
//!
//! robust:    z = (x - median) / mad
//! invariant: z = asinh((x - median) / mad)

use super::guard::{guard_scales, NORMAL_MAD_RATIO};
use super::statistics::{map_with_stats, ScalerStats};
use super::Scaled;
use crate::core::MaskElement;
use crate::error::Result;
use crate::utils::{stats, MaskedSeries};
use ndarray::{ArrayD, AsArray, Dimension};

pub(crate) fn robust_stats(series: &MaskedSeries<'_>, eps: f64) -> ScalerStats {
    let lanes = series.map_lanes(true, |v| {
        // Order-independent moments first; the median reorders `v`.
        let mean = stats::mean(v).unwrap_or(0.0);
        let std = stats::rms_deviation(v, mean).unwrap_or(0.0);
        let median = stats::lower_median(v).unwrap_or(0.0);
        let mad = stats::mean_abs_deviation(v, median).unwrap_or(0.0);
        (median, mad, std * NORMAL_MAD_RATIO)
    });
    let shift = lanes.mapv(|(median, _, _)| median);
    let mad = lanes.mapv(|(_, mad, _)| mad);
    let fallback = lanes.mapv(|(_, _, aux)| aux);
    ScalerStats {
        shift,
        scale: guard_scales(&mad, Some(&fallback), eps),
    }
}

#[inline]
pub(crate) fn forward_robust(x: f64, shift: f64, scale: f64) -> f64 {
    (x - shift) / scale
}

#[inline]
pub(crate) fn inverse_robust(z: f64, shift: f64, scale: f64) -> f64 {
    z * scale + shift
}

#[inline]
pub(crate) fn forward_invariant(x: f64, shift: f64, scale: f64) -> f64 {
    ((x - shift) / scale).asinh()
}

#[inline]
pub(crate) fn inverse_invariant(z: f64, shift: f64, scale: f64) -> f64 {
    z.sinh() * scale + shift
}

/// Masked median and guarded MAD along `dim`.
///
/// Shared by the robust and invariant scalers.
pub fn robust_statistics<'a, 'm, D, E, M>(
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
    Ok(robust_stats(&MaskedSeries::new(x, mask, dim)?, eps))
}

/// Robust-scale `x` along `dim`, returning `(z, median, mad)`.
pub fn robust_scaler<'a, 'm, D, E, M>(
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
    let stats = robust_stats(&series, eps);
    let z = map_with_stats(series.values(), &stats.shift, &stats.scale, forward_robust)?;
    Ok((z, stats.shift, stats.scale))
}

/// Undo [`robust_scaler`]: `x = z * mad + median`.
pub fn inv_robust_scaler<'a, 's, 'c, D, E, F>(
    z: impl AsArray<'a, f64, D>,
    shift: impl AsArray<'s, f64, E>,
    scale: impl AsArray<'c, f64, F>,
) -> Result<ArrayD<f64>>
where
    D: Dimension,
    E: Dimension,
    F: Dimension,
{
    map_with_stats(z, shift, scale, inverse_robust)
}

/// Invariant-scale `x` along `dim`, returning `(z, median, mad)`.
pub fn invariant_scaler<'a, 'm, D, E, M>(
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
    let stats = robust_stats(&series, eps);
    let z = map_with_stats(
        series.values(),
        &stats.shift,
        &stats.scale,
        forward_invariant,
    )?;
    Ok((z, stats.shift, stats.scale))
}

/// Undo [`invariant_scaler`]: `x = sinh(z) * mad + median`.
pub fn inv_invariant_scaler<'a, 's, 'c, D, E, F>(
    z: impl AsArray<'a, f64, D>,
    shift: impl AsArray<'s, f64, E>,
    scale: impl AsArray<'c, f64, F>,
) -> Result<ArrayD<f64>>
where
    D: Dimension,
    E: Dimension,
    F: Dimension,
{
    map_with_stats(z, shift, scale, inverse_invariant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn robust_basic() {
        // median 3, |x - 3| = [2, 1, 0, 1, 97] -> mad 20.2
        let x = array![[1.0, 2.0, 3.0, 4.0, 100.0]];
        let mask = array![[true, true, true, true, true]];
        let (z, shift, scale) = robust_scaler(&x, &mask, 1, 0.0).unwrap();
        assert_relative_eq!(shift[[0, 0]], 3.0);
        assert_relative_eq!(scale[[0, 0]], 20.2, epsilon = 1e-12);
        assert_relative_eq!(z[[0, 4]], 97.0 / 20.2, epsilon = 1e-12);
    }

    #[test]
    fn robust_ignores_masked_outlier() {
        let x = array![[1.0, 2.0, 3.0, 1e9]];
        let mask = array![[true, true, true, false]];
        let (_, shift, scale) = robust_scaler(&x, &mask, 1, 0.0).unwrap();
        assert_relative_eq!(shift[[0, 0]], 2.0);
        assert_relative_eq!(scale[[0, 0]], 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn robust_constant_lane_falls_back_to_one() {
        let x = array![[4.0, 4.0, 4.0]];
        let mask = array![[true, true, true]];
        let stats = robust_statistics(&x, &mask, 1, 1e-6).unwrap();
        assert_relative_eq!(stats.shift[[0, 0]], 4.0);
        assert_relative_eq!(stats.scale[[0, 0]], 1.0 + 1e-6);
    }

    #[test]
    fn robust_zero_mad_uses_scaled_std() {
        // The float mean of [0.1; 3] is 0.10000000000000002, so the std is a
        // tiny positive number while the MAD around the median is exactly 0.
        let x = array![[0.1, 0.1, 0.1]];
        let mask = array![[true, true, true]];
        let mean = (0.1 + 0.1 + 0.1) / 3.0;
        let std = ((3.0 * (0.1_f64 - mean).powi(2)) / 3.0).sqrt();
        assert!(std > 0.0);

        let stats = robust_statistics(&x, &mask, 1, 1e-6).unwrap();
        assert_relative_eq!(stats.scale[[0, 0]], std * NORMAL_MAD_RATIO + 1e-6);
        assert!(stats.scale[[0, 0]] < 1e-5);
    }

    #[test]
    fn robust_fully_masked_lane_is_finite() {
        let x = array![[4.0, 8.0], [1.0, 3.0]];
        let mask = array![[false, false], [true, true]];
        let (z, shift, scale) = robust_scaler(&x, &mask, 1, 1e-6).unwrap();
        assert_eq!(shift[[0, 0]], 0.0);
        assert_relative_eq!(scale[[0, 0]], 1.0 + 1e-6);
        assert!(z.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn invariant_compresses_outliers() {
        let x = array![[1.0, 2.0, 3.0, 4.0, 1000.0]];
        let mask = array![[true, true, true, true, true]];
        let (z_inv, _, _) = invariant_scaler(&x, &mask, 1, 1e-6).unwrap();
        let (z_rob, _, _) = robust_scaler(&x, &mask, 1, 1e-6).unwrap();
        assert!(z_inv[[0, 4]] < z_rob[[0, 4]]);
        assert_relative_eq!(z_inv[[0, 4]], z_rob[[0, 4]].asinh(), epsilon = 1e-12);
    }

    #[test]
    fn robust_and_invariant_inverse() {
        let x = array![[-5.0, 0.5, 2.0, 9.0, 300.0, 7.0]];
        let mask = array![[true, true, false, true, true, true]];

        let (z, shift, scale) = robust_scaler(&x, &mask, -1, 1e-6).unwrap();
        let back = inv_robust_scaler(&z, &shift, &scale).unwrap();
        for (orig, rec) in x.iter().zip(back.iter()) {
            assert_relative_eq!(orig, rec, epsilon = 1e-9);
        }

        let (z, shift, scale) = invariant_scaler(&x, &mask, -1, 1e-6).unwrap();
        let back = inv_invariant_scaler(&z, &shift, &scale).unwrap();
        for (orig, rec) in x.iter().zip(back.iter()) {
            assert_relative_eq!(orig, rec, epsilon = 1e-9);
        }
    }
}
