//! Closed set of scaler strategies.

use super::identity::identity_stats;
use super::minmax::{
    forward_minmax, forward_minmax1, inverse_minmax, inverse_minmax1, minmax_stats,
};
use super::robust::{
    forward_invariant, forward_robust, inverse_invariant, inverse_robust, robust_stats,
};
use super::standard::{self, standard_stats};
use super::statistics::{map_with_stats, ScalerStats};
use crate::core::MaskElement;
use crate::error::{NormError, Result};
use crate::utils::MaskedSeries;
use ndarray::{ArrayD, AsArray, Dimension};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

type Elementwise = fn(f64, f64, f64) -> f64;

/// Scaler strategy applied along the temporal axis.
///
/// Parsed from its lowercase name; see [`ScalerType::from_name`] for the
/// `None` alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalerType {
    /// No scaling.
    #[default]
    Identity,
    /// Mean / standard deviation.
    Standard,
    /// Median / mean absolute deviation.
    Robust,
    /// Min / range into `[0, 1]`.
    MinMax,
    /// Min / range into `[-1, 1]`.
    MinMax1,
    /// Median / MAD followed by `asinh`.
    Invariant,
}

impl ScalerType {
    /// Every strategy, in canonical order.
    pub const ALL: [ScalerType; 6] = [
        ScalerType::Identity,
        ScalerType::Standard,
        ScalerType::Robust,
        ScalerType::MinMax,
        ScalerType::MinMax1,
        ScalerType::Invariant,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            ScalerType::Identity => "identity",
            ScalerType::Standard => "standard",
            ScalerType::Robust => "robust",
            ScalerType::MinMax => "minmax",
            ScalerType::MinMax1 => "minmax1",
            ScalerType::Invariant => "invariant",
        }
    }

    /// Resolve an optional scaler name; `None` means no scaling.
    ///
    /// # Errors
    /// [`NormError::InvalidConfiguration`] for an unknown name.
    pub fn from_name(name: Option<&str>) -> Result<Self> {
        match name {
            None => Ok(ScalerType::Identity),
            Some(n) => n.parse(),
        }
    }

    /// Compute the statistics of this strategy along `dim`.
    pub fn statistics<'a, 'm, D, E, M>(
        self,
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
        let series = MaskedSeries::new(x, mask, dim)?;
        Ok(self.lane_statistics(&series, eps))
    }

    /// Normalize `x` along `dim`, returning `z` and the statistics to invert it.
    pub fn forward<'a, 'm, D, E, M>(
        self,
        x: impl AsArray<'a, f64, D>,
        mask: impl AsArray<'m, M, E>,
        dim: isize,
        eps: f64,
    ) -> Result<(ArrayD<f64>, ScalerStats)>
    where
        D: Dimension,
        E: Dimension,
        M: MaskElement + 'm,
    {
        let series = MaskedSeries::new(x, mask, dim)?;
        let stats = self.lane_statistics(&series, eps);
        let z = self.apply(series.values(), &stats)?;
        Ok((z, stats))
    }

    /// Normalize `x` with statistics computed elsewhere, e.g. on the
    /// in-sample window of the same series.
    ///
    /// # Errors
    /// [`NormError::ShapeMismatch`] when the statistics do not broadcast to `x`.
    pub fn apply<'a, D>(
        self,
        x: impl AsArray<'a, f64, D>,
        stats: &ScalerStats,
    ) -> Result<ArrayD<f64>>
    where
        D: Dimension,
    {
        map_with_stats(x, &stats.shift, &stats.scale, self.forward_fn())
    }

    /// Map normalized values back to the original scale.
    ///
    /// # Errors
    /// [`NormError::ShapeMismatch`] when the statistics do not broadcast to `z`.
    pub fn inverse<'a, D>(
        self,
        z: impl AsArray<'a, f64, D>,
        stats: &ScalerStats,
    ) -> Result<ArrayD<f64>>
    where
        D: Dimension,
    {
        map_with_stats(z, &stats.shift, &stats.scale, self.inverse_fn())
    }

    pub(crate) fn lane_statistics(self, series: &MaskedSeries<'_>, eps: f64) -> ScalerStats {
        match self {
            ScalerType::Identity => identity_stats(series),
            ScalerType::Standard => standard_stats(series, eps),
            ScalerType::Robust | ScalerType::Invariant => robust_stats(series, eps),
            ScalerType::MinMax | ScalerType::MinMax1 => minmax_stats(series, eps),
        }
    }

    fn forward_fn(self) -> Elementwise {
        match self {
            ScalerType::Identity => |x, _, _| x,
            ScalerType::Standard => standard::forward,
            ScalerType::Robust => forward_robust,
            ScalerType::MinMax => forward_minmax,
            ScalerType::MinMax1 => forward_minmax1,
            ScalerType::Invariant => forward_invariant,
        }
    }

    fn inverse_fn(self) -> Elementwise {
        match self {
            ScalerType::Identity => |z, _, _| z,
            ScalerType::Standard => standard::inverse,
            ScalerType::Robust => inverse_robust,
            ScalerType::MinMax => inverse_minmax,
            ScalerType::MinMax1 => inverse_minmax1,
            ScalerType::Invariant => inverse_invariant,
        }
    }
}

impl fmt::Display for ScalerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScalerType {
    type Err = NormError;

    fn from_str(s: &str) -> Result<Self> {
        ScalerType::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| {
                NormError::InvalidConfiguration(format!(
                    "unknown scaler type {s:?} (expected one of identity, standard, robust, minmax, minmax1, invariant)"
                ))
            })
    }
}
