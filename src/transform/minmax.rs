//! Range scalers: minmax to `[0, 1]` and minmax1 to `[-1, 1]`.
//!
//! minmax:  z = (x - min) / range
//! minmax1: z = 2 * (x - min) / range - 1
//!
//! `range = max - min` over the valid entries of each lane. Invalid entries
//! are excluded from the extrema, so they never win, but are still
//! transformed and may fall outside the target interval.

use super::guard::guard_scales;
use super::statistics::{map_with_stats, ScalerStats};
use super::Scaled;
use crate::core::MaskElement;
use crate::error::Result;
use crate::utils::{stats, MaskedSeries};
use ndarray::{ArrayD, AsArray, Dimension};

pub(crate) fn minmax_stats(series: &MaskedSeries<'_>, eps: f64) -> ScalerStats {
    let extrema = series.map_lanes(true, |v| {
        (
            stats::min(v).unwrap_or(0.0),
            stats::max(v).unwrap_or(0.0),
        )
    });
    let shift = extrema.mapv(|(min, _)| min);
    let range = extrema.mapv(|(min, max)| max - min);
    ScalerStats {
        shift,
        scale: guard_scales(&range, None, eps),
    }
}

#[inline]
pub(crate) fn forward_minmax(x: f64, shift: f64, scale: f64) -> f64 {
    (x - shift) / scale
}

#[inline]
pub(crate) fn inverse_minmax(z: f64, shift: f64, scale: f64) -> f64 {
    z * scale + shift
}

#[inline]
pub(crate) fn forward_minmax1(x: f64, shift: f64, scale: f64) -> f64 {
    (x - shift) / scale * 2.0 - 1.0
}

#[inline]
pub(crate) fn inverse_minmax1(z: f64, shift: f64, scale: f64) -> f64 {
    (z + 1.0) / 2.0 * scale + shift
}

/// Masked minimum and guarded range along `dim`.
///
/// Shared by the minmax and minmax1 scalers. A lane with a single distinct
/// value gets `scale = 1 + eps`.
pub fn minmax_statistics<'a, 'm, D, E, M>(
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
    Ok(minmax_stats(&MaskedSeries::new(x, mask, dim)?, eps))
}

/// Scale `x` to `[0, 1]` along `dim`, returning `(z, min, range)`.
pub fn minmax_scaler<'a, 'm, D, E, M>(
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
    let stats = minmax_stats(&series, eps);
    let z = map_with_stats(series.values(), &stats.shift, &stats.scale, forward_minmax)?;
    Ok((z, stats.shift, stats.scale))
}

/// Undo [`minmax_scaler`]: `x = z * range + min`.
pub fn inv_minmax_scaler<'a, 's, 'c, D, E, F>(
    z: impl AsArray<'a, f64, D>,
    shift: impl AsArray<'s, f64, E>,
    scale: impl AsArray<'c, f64, F>,
) -> Result<ArrayD<f64>>
where
    D: Dimension,
    E: Dimension,
    F: Dimension,
{
    map_with_stats(z, shift, scale, inverse_minmax)
}

/// Scale `x` to `[-1, 1]` along `dim`, returning `(z, min, range)`.
pub fn minmax1_scaler<'a, 'm, D, E, M>(
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
    let stats = minmax_stats(&series, eps);
    let z = map_with_stats(series.values(), &stats.shift, &stats.scale, forward_minmax1)?;
    Ok((z, stats.shift, stats.scale))
}

/// Undo [`minmax1_scaler`]: `x = (z + 1) / 2 * range + min`.
pub fn inv_minmax1_scaler<'a, 's, 'c, D, E, F>(
    z: impl AsArray<'a, f64, D>,
    shift: impl AsArray<'s, f64, E>,
    scale: impl AsArray<'c, f64, F>,
) -> Result<ArrayD<f64>>
where
    D: Dimension,
    E: Dimension,
    F: Dimension,
{
    map_with_stats(z, shift, scale, inverse_minmax1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn minmax_basic() {
        let x = array![[0.0, 25.0, 50.0, 75.0, 100.0]];
        let mask = array![[true, true, true, true, true]];
        let (z, shift, scale) = minmax_scaler(&x, &mask, 1, 0.0).unwrap();
        assert_relative_eq!(shift[[0, 0]], 0.0);
        assert_relative_eq!(scale[[0, 0]], 100.0);
        assert_eq!(z, array![[0.0, 0.25, 0.5, 0.75, 1.0]].into_dyn());
    }

    #[test]
    fn minmax_extrema_ignore_masked_entries() {
        let x = array![[-1000.0, 10.0, 20.0, 30.0, 1000.0]];
        let mask = array![[false, true, true, true, false]];
        let (z, shift, scale) = minmax_scaler(&x, &mask, 1, 1e-6).unwrap();
        assert_relative_eq!(shift[[0, 0]], 10.0);
        assert_relative_eq!(scale[[0, 0]], 20.0 + 1e-6);
        for t in 1..4 {
            assert!((0.0..=1.0).contains(&z[[0, t]]));
        }
        // Masked entries are transformed but may leave the interval.
        assert!(z[[0, 4]] > 1.0);
    }

    #[test]
    fn minmax1_bounds() {
        let x = array![[3.0, -7.0, 12.0, 0.0]];
        let mask = array![[true, true, true, true]];
        let (z, _, _) = minmax1_scaler(&x, &mask, 1, 1e-6).unwrap();
        assert!(z.iter().all(|&v| (-1.0..=1.0).contains(&v)));
        assert_relative_eq!(z[[0, 1]], -1.0);
        assert_relative_eq!(z[[0, 2]], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn minmax_constant_lane() {
        let x = array![[2.0, 2.0, 2.0]];
        let mask = array![[true, true, true]];
        let stats = minmax_statistics(&x, &mask, 1, 1e-6).unwrap();
        assert_relative_eq!(stats.shift[[0, 0]], 2.0);
        assert_relative_eq!(stats.scale[[0, 0]], 1.0 + 1e-6);
    }

    #[test]
    fn minmax_inverse() {
        let x = array![[5.0, 1.0, 9.0, -4.0], [0.0, 0.0, 3.0, 3.0]];
        let mask = array![[true, true, true, false], [true, true, true, true]];

        let (z, shift, scale) = minmax_scaler(&x, &mask, 1, 1e-6).unwrap();
        let back = inv_minmax_scaler(&z, &shift, &scale).unwrap();
        for (orig, rec) in x.iter().zip(back.iter()) {
            assert_relative_eq!(orig, rec, epsilon = 1e-10);
        }

        let (z, shift, scale) = minmax1_scaler(&x, &mask, 1, 1e-6).unwrap();
        let back = inv_minmax1_scaler(&z, &shift, &scale).unwrap();
        for (orig, rec) in x.iter().zip(back.iter()) {
            assert_relative_eq!(orig, rec, epsilon = 1e-10);
        }
    }
}
