//! Identity scaler: leaves the series untouched.

use super::statistics::ScalerStats;
use super::Scaled;
use crate::core::{zeros_and_ones, MaskElement};
use crate::error::Result;
use crate::utils::MaskedSeries;
use ndarray::{ArrayD, AsArray, Dimension};

pub(crate) fn identity_stats(series: &MaskedSeries<'_>) -> ScalerStats {
    let (shift, scale) = zeros_and_ones(series.shape(), series.axis());
    ScalerStats { shift, scale }
}

/// Zero shift and unit scale with the reduction axis collapsed.
///
/// The mask must still broadcast to `x`; its contents are ignored. `eps` is
/// accepted for signature parity and not applied.
pub fn identity_statistics<'a, 'm, D, E, M>(
    x: impl AsArray<'a, f64, D>,
    mask: impl AsArray<'m, M, E>,
    dim: isize,
    _eps: f64,
) -> Result<ScalerStats>
where
    D: Dimension,
    E: Dimension,
    M: MaskElement + 'm,
{
    Ok(identity_stats(&MaskedSeries::new(x, mask, dim)?))
}

/// Forward identity: `z = x`, `shift = 0`, `scale = 1`.
pub fn identity_scaler<'a, 'm, D, E, M>(
    x: impl AsArray<'a, f64, D>,
    mask: impl AsArray<'m, M, E>,
    dim: isize,
    _eps: f64,
) -> Result<Scaled>
where
    D: Dimension,
    E: Dimension,
    M: MaskElement + 'm,
{
    let series = MaskedSeries::new(x, mask, dim)?;
    let stats = identity_stats(&series);
    Ok((series.values().to_owned(), stats.shift, stats.scale))
}

/// Inverse identity: returns `z` unchanged.
///
/// `shift` and `scale` are ignored.
pub fn inv_identity_scaler<'a, 's, 'c, D, E, F>(
    z: impl AsArray<'a, f64, D>,
    _shift: impl AsArray<'s, f64, E>,
    _scale: impl AsArray<'c, f64, F>,
) -> Result<ArrayD<f64>>
where
    D: Dimension,
    E: Dimension,
    F: Dimension,
{
    Ok(z.into().into_dyn().to_owned())
}
