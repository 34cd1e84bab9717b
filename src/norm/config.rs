//! Configuration for [`TemporalNorm`](super::TemporalNorm).

use crate::error::{NormError, Result};
use crate::transform::{ScalerType, DEFAULT_EPS};
use serde::{Deserialize, Serialize};

fn default_dim() -> isize {
    -1
}

fn default_eps() -> f64 {
    DEFAULT_EPS
}

/// User-facing normalizer settings.
///
/// The scaler is kept as a plain name so an unknown value is reported as
/// [`NormError::InvalidConfiguration`] when the normalizer is built, not as
/// a deserialization failure. Missing fields take their defaults.
///
/// ```
/// use temporal_norm::TemporalNormConfig;
///
/// let cfg = TemporalNormConfig::from_json(r#"{"scaler_type": "robust", "dim": 1}"#).unwrap();
/// assert_eq!(cfg.dim, 1);
/// assert_eq!(cfg.eps, 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalNormConfig {
    /// One of `identity`, `standard`, `robust`, `minmax`, `minmax1`,
    /// `invariant`; absent or `null` means no scaling.
    #[serde(default)]
    pub scaler_type: Option<String>,
    /// Reduction axis; negative values count from the last axis.
    #[serde(default = "default_dim")]
    pub dim: isize,
    /// Added to every guarded scale statistic.
    #[serde(default = "default_eps")]
    pub eps: f64,
}

impl Default for TemporalNormConfig {
    fn default() -> Self {
        Self {
            scaler_type: None,
            dim: default_dim(),
            eps: default_eps(),
        }
    }
}

impl TemporalNormConfig {
    /// Config for a named scaler with default `dim` and `eps`.
    pub fn new(scaler_type: impl Into<String>) -> Self {
        Self {
            scaler_type: Some(scaler_type.into()),
            ..Self::default()
        }
    }

    pub fn with_dim(mut self, dim: isize) -> Self {
        self.dim = dim;
        self
    }

    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Parse a JSON object.
    ///
    /// # Errors
    /// [`NormError::InvalidConfiguration`] for malformed JSON or ill-typed
    /// fields. The scaler name itself is checked by [`Self::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the settings and resolve the scaler.
    ///
    /// # Errors
    /// [`NormError::InvalidConfiguration`] for an unknown scaler name or an
    /// `eps` that is negative or not finite.
    pub fn validate(&self) -> Result<ScalerType> {
        validate_eps(self.eps)?;
        ScalerType::from_name(self.scaler_type.as_deref())
    }
}

pub(crate) fn validate_eps(eps: f64) -> Result<()> {
    if !eps.is_finite() || eps < 0.0 {
        return Err(NormError::InvalidConfiguration(format!(
            "eps must be finite and >= 0, got {eps}"
        )));
    }
    Ok(())
}
