//! Masked reductions along one axis of a batched series.
//!
//! Every reduction gathers, for each lane along the reduction axis, the
//! entries whose mask is valid and whose value is not `NaN`, then reduces
//! them. A lane with no valid entry reduces to `0.0` instead of `NaN`, which
//! keeps downstream statistics finite at the cost of silently zeroing the
//! statistic of a fully masked lane.
//!
//! # Example
//!
//! ```
//! use ndarray::array;
//! use temporal_norm::utils::{masked_mean, masked_median};
//!
//! let x = array![[1.0, 2.0, 3.0, 100.0], [4.0, 4.0, 8.0, 8.0]];
//! let mask = array![[true, true, true, false], [true, true, true, true]];
//!
//! let mean = masked_mean(&x, &mask, -1, true).unwrap();
//! assert_eq!(mean.shape(), &[2, 1]);
//! assert_eq!(mean[[0, 0]], 2.0);
//!
//! // Even count: lower of the two middle values.
//! let median = masked_median(&x, &mask, -1, false).unwrap();
//! assert_eq!(median[[1]], 4.0);
//! ```

use super::stats;
use crate::core::{broadcast_to, resolve_axis, MaskElement};
use crate::error::Result;
use ndarray::{ArrayD, ArrayViewD, AsArray, Axis, Dimension, Zip};

/// A series paired with its validity mask and a resolved reduction axis.
///
/// The mask is broadcast to the series shape once at construction, so every
/// reduction over the same `(x, mask, dim)` reuses it.
#[derive(Debug, Clone)]
pub struct MaskedSeries<'a> {
    values: ArrayViewD<'a, f64>,
    valid: ArrayD<bool>,
    axis: Axis,
}

impl<'a> MaskedSeries<'a> {
    /// Pair `x` with `mask` for reductions along `dim`.
    ///
    /// # Errors
    /// [`NormError::ShapeMismatch`](crate::NormError::ShapeMismatch) when
    /// `dim` is out of range or `mask` does not broadcast to `x`.
    pub fn new<'m, D, E, M>(
        x: impl AsArray<'a, f64, D>,
        mask: impl AsArray<'m, M, E>,
        dim: isize,
    ) -> Result<Self>
    where
        D: Dimension,
        E: Dimension,
        M: MaskElement + 'm,
    {
        let values = x.into().into_dyn();
        let mask = mask.into().into_dyn();
        let axis = resolve_axis(dim, values.ndim())?;
        let valid = broadcast_to(&mask, values.shape(), "mask")?.map(|m| m.is_valid());
        Ok(Self {
            values,
            valid,
            axis,
        })
    }

    /// Reduction axis.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Shape of the underlying series.
    pub fn shape(&self) -> &[usize] {
        self.values.shape()
    }

    /// The series values, including invalid positions.
    pub fn values(&self) -> &ArrayViewD<'a, f64> {
        &self.values
    }

    /// Map every lane's valid entries to a value.
    ///
    /// The closure receives the valid entries of one lane in their original
    /// order (possibly empty) and may reorder them. The result has the
    /// reduction axis collapsed to 1 when `keepdim`, removed otherwise.
    pub fn map_lanes<R, F>(&self, keepdim: bool, mut f: F) -> ArrayD<R>
    where
        F: FnMut(&mut [f64]) -> R,
    {
        let mut buf = Vec::with_capacity(self.values.len_of(self.axis));
        let out = Zip::from(self.values.lanes(self.axis))
            .and(self.valid.lanes(self.axis))
            .map_collect(|xs, ms| {
                buf.clear();
                buf.extend(
                    xs.iter()
                        .zip(ms.iter())
                        .filter(|&(&v, &ok)| ok && !v.is_nan())
                        .map(|(&v, _)| v),
                );
                f(&mut buf)
            });
        if keepdim {
            out.insert_axis(self.axis)
        } else {
            out
        }
    }

    /// Reduce every lane with `f`; empty lanes become `0.0`.
    pub fn reduce<F>(&self, keepdim: bool, mut f: F) -> ArrayD<f64>
    where
        F: FnMut(&mut [f64]) -> Option<f64>,
    {
        self.map_lanes(keepdim, |v| f(v).unwrap_or(0.0))
    }

    /// Masked mean along the reduction axis.
    pub fn mean(&self, keepdim: bool) -> ArrayD<f64> {
        self.reduce(keepdim, |v| stats::mean(v))
    }

    /// Masked lower median along the reduction axis.
    pub fn median(&self, keepdim: bool) -> ArrayD<f64> {
        self.reduce(keepdim, stats::lower_median)
    }

    /// Masked minimum; invalid entries never win.
    pub fn min(&self, keepdim: bool) -> ArrayD<f64> {
        self.reduce(keepdim, |v| stats::min(v))
    }

    /// Masked maximum; invalid entries never win.
    pub fn max(&self, keepdim: bool) -> ArrayD<f64> {
        self.reduce(keepdim, |v| stats::max(v))
    }

    /// Number of valid entries per lane.
    pub fn count(&self, keepdim: bool) -> ArrayD<usize> {
        self.map_lanes(keepdim, |v| v.len())
    }
}

/// Mean of the valid entries of `x` along `dim`.
///
/// Output shape is `x`'s shape with `dim` collapsed to 1 (`keepdim`) or
/// removed. A lane without valid entries yields `0.0`.
pub fn masked_mean<'a, 'm, D, E, M>(
    x: impl AsArray<'a, f64, D>,
    mask: impl AsArray<'m, M, E>,
    dim: isize,
    keepdim: bool,
) -> Result<ArrayD<f64>>
where
    D: Dimension,
    E: Dimension,
    M: MaskElement + 'm,
{
    Ok(MaskedSeries::new(x, mask, dim)?.mean(keepdim))
}

/// Median of the valid entries of `x` along `dim`.
///
/// With an even number of valid entries the lower middle value is taken.
/// A lane without valid entries yields `0.0`.
pub fn masked_median<'a, 'm, D, E, M>(
    x: impl AsArray<'a, f64, D>,
    mask: impl AsArray<'m, M, E>,
    dim: isize,
    keepdim: bool,
) -> Result<ArrayD<f64>>
where
    D: Dimension,
    E: Dimension,
    M: MaskElement + 'm,
{
    Ok(MaskedSeries::new(x, mask, dim)?.median(keepdim))
}

/// Minimum of the valid entries of `x` along `dim` (`0.0` for an empty lane).
pub fn masked_min<'a, 'm, D, E, M>(
    x: impl AsArray<'a, f64, D>,
    mask: impl AsArray<'m, M, E>,
    dim: isize,
    keepdim: bool,
) -> Result<ArrayD<f64>>
where
    D: Dimension,
    E: Dimension,
    M: MaskElement + 'm,
{
    Ok(MaskedSeries::new(x, mask, dim)?.min(keepdim))
}

/// Maximum of the valid entries of `x` along `dim` (`0.0` for an empty lane).
pub fn masked_max<'a, 'm, D, E, M>(
    x: impl AsArray<'a, f64, D>,
    mask: impl AsArray<'m, M, E>,
    dim: isize,
    keepdim: bool,
) -> Result<ArrayD<f64>>
where
    D: Dimension,
    E: Dimension,
    M: MaskElement + 'm,
{
    Ok(MaskedSeries::new(x, mask, dim)?.max(keepdim))
}
