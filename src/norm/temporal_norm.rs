//! Temporal normalization facade.

use super::config::{validate_eps, TemporalNormConfig};
use crate::core::MaskElement;
use crate::error::{NormError, Result};
use crate::transform::{ScalerStats, ScalerType, DEFAULT_EPS};
use ndarray::{ArrayD, AsArray, Dimension};
use tracing::{debug, instrument};

/// Normalizes model inputs along the temporal axis and de-normalizes outputs.
///
/// The scaler, `dim`, and `eps` are fixed at construction. [`forward`] and
/// [`inverse`] pass statistics explicitly; [`transform`] and
/// [`inverse_transform`] keep the most recent statistics so a model can
/// normalize its window once and de-normalize its forecast later.
///
/// The cache is plain instance state: use one instance per concurrent
/// caller, or wrap it in a lock.
///
/// ```
/// use ndarray::array;
/// use temporal_norm::TemporalNorm;
///
/// let mut norm = TemporalNorm::new(Some("standard"), -1, 1e-6).unwrap();
/// let x = array![[1.0, 2.0, 3.0, 4.0]];
/// let mask = array![[true, true, true, false]];
///
/// let z = norm.transform(&x, &mask).unwrap();
/// let back = norm.inverse_transform(&z, None, None).unwrap();
/// assert!((back[[0, 3]] - 4.0).abs() < 1e-9);
/// ```
///
/// [`forward`]: TemporalNorm::forward
/// [`inverse`]: TemporalNorm::inverse
/// [`transform`]: TemporalNorm::transform
/// [`inverse_transform`]: TemporalNorm::inverse_transform
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalNorm {
    scaler: ScalerType,
    dim: isize,
    eps: f64,
    stats: Option<ScalerStats>,
}

impl Default for TemporalNorm {
    fn default() -> Self {
        Self::with_scaler(ScalerType::Identity)
    }
}

impl TemporalNorm {
    /// Build from a scaler name (`None` for no scaling), axis, and `eps`.
    ///
    /// # Errors
    /// [`NormError::InvalidConfiguration`] for an unknown scaler name or an
    /// invalid `eps`.
    pub fn new(scaler_type: Option<&str>, dim: isize, eps: f64) -> Result<Self> {
        validate_eps(eps)?;
        let scaler = ScalerType::from_name(scaler_type)?;
        Ok(Self::build(scaler, dim, eps))
    }

    /// Build from a [`TemporalNormConfig`].
    ///
    /// # Errors
    /// See [`TemporalNormConfig::validate`].
    pub fn from_config(config: &TemporalNormConfig) -> Result<Self> {
        let scaler = config.validate()?;
        Ok(Self::build(scaler, config.dim, config.eps))
    }

    /// Normalizer for `scaler` along the last axis with the default `eps`.
    pub fn with_scaler(scaler: ScalerType) -> Self {
        Self::build(scaler, -1, DEFAULT_EPS)
    }

    /// Set the reduction axis.
    pub fn with_dim(mut self, dim: isize) -> Self {
        self.dim = dim;
        self
    }

    /// Set `eps`.
    ///
    /// # Errors
    /// [`NormError::InvalidConfiguration`] if `eps` is negative or not finite.
    pub fn with_eps(mut self, eps: f64) -> Result<Self> {
        validate_eps(eps)?;
        self.eps = eps;
        Ok(self)
    }

    fn build(scaler: ScalerType, dim: isize, eps: f64) -> Self {
        debug!(scaler = %scaler, dim, eps, "temporal norm configured");
        Self {
            scaler,
            dim,
            eps,
            stats: None,
        }
    }

    pub fn scaler_type(&self) -> ScalerType {
        self.scaler
    }

    pub fn dim(&self) -> isize {
        self.dim
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// Statistics from the last [`transform`](Self::transform), if any.
    pub fn stats(&self) -> Option<&ScalerStats> {
        self.stats.as_ref()
    }

    /// Drop the cached statistics.
    pub fn clear(&mut self) {
        self.stats = None;
    }

    /// Normalize `x` and return the statistics needed to invert it.
    ///
    /// Does not touch the cache.
    pub fn forward<'a, 'm, D, E, M>(
        &self,
        x: impl AsArray<'a, f64, D>,
        mask: impl AsArray<'m, M, E>,
    ) -> Result<(ArrayD<f64>, ScalerStats)>
    where
        D: Dimension,
        E: Dimension,
        M: MaskElement + 'm,
    {
        self.scaler.forward(x, mask, self.dim, self.eps)
    }

    /// Map `z` back to the original scale with explicit statistics.
    pub fn inverse<'a, D>(
        &self,
        z: impl AsArray<'a, f64, D>,
        stats: &ScalerStats,
    ) -> Result<ArrayD<f64>>
    where
        D: Dimension,
    {
        self.scaler.inverse(z, stats)
    }

    /// Normalize `x`, caching the statistics for a later
    /// [`inverse_transform`](Self::inverse_transform).
    ///
    /// Overwrites any previously cached statistics. On error the cache is
    /// left unchanged.
    #[instrument(level = "trace", skip_all, fields(scaler = %self.scaler, dim = self.dim))]
    pub fn transform<'a, 'm, D, E, M>(
        &mut self,
        x: impl AsArray<'a, f64, D>,
        mask: impl AsArray<'m, M, E>,
    ) -> Result<ArrayD<f64>>
    where
        D: Dimension,
        E: Dimension,
        M: MaskElement + 'm,
    {
        let (z, stats) = self.forward(x, mask)?;
        self.stats = Some(stats);
        Ok(z)
    }

    /// Map `z` back to the original scale.
    ///
    /// `shift` and `scale` default to the cached statistics from the last
    /// [`transform`](Self::transform).
    ///
    /// # Errors
    /// - [`NormError::StatePrecondition`] if a statistic is neither supplied
    ///   nor cached.
    /// - [`NormError::ShapeMismatch`] if the statistics do not broadcast to `z`.
    #[instrument(level = "trace", skip_all, fields(scaler = %self.scaler))]
    pub fn inverse_transform<'a, D>(
        &self,
        z: impl AsArray<'a, f64, D>,
        shift: Option<&ArrayD<f64>>,
        scale: Option<&ArrayD<f64>>,
    ) -> Result<ArrayD<f64>>
    where
        D: Dimension,
    {
        let cached = self.stats.as_ref();
        let shift = shift
            .or(cached.map(|s| &s.shift))
            .ok_or_else(|| missing_stat("shift"))?;
        let scale = scale
            .or(cached.map(|s| &s.scale))
            .ok_or_else(|| missing_stat("scale"))?;
        let stats = ScalerStats::new(shift.clone(), scale.clone())?;
        self.scaler.inverse(z, &stats)
    }
}

fn missing_stat(name: &str) -> NormError {
    NormError::StatePrecondition(format!(
        "no {name} supplied and transform has not been called"
    ))
}
