//! # temporal-norm
//!
//! Temporal normalization for neural time series forecasting.
//!
//! Provides masked reductions (mean, median, extrema) over batched series
//! with partially invalid entries, six invertible scalers (identity,
//! standard, robust, minmax, minmax1, invariant), and the [`TemporalNorm`]
//! facade that normalizes a model's input window and de-normalizes its
//! forecast.
//!
//! Series are `f64` arrays of any dimensionality, conventionally
//! `[batch, time, channels]`; masks are `bool` or numeric 0/1 arrays that
//! broadcast to the series.
//!
//! ```
//! use ndarray::Array3;
//! use temporal_norm::{ScalerType, TemporalNorm};
//!
//! let x = Array3::from_shape_fn((2, 24, 1), |(b, t, _)| (b as f64 + 1.0) * t as f64);
//! let mask = Array3::from_shape_fn((2, 24, 1), |(_, t, _)| t < 18);
//!
//! let mut norm = TemporalNorm::with_scaler(ScalerType::Standard).with_dim(1);
//! let z = norm.transform(&x, &mask).unwrap();
//! let x_hat = norm.inverse_transform(&z, None, None).unwrap();
//! assert!((x_hat[[1, 23, 0]] - 46.0).abs() < 1e-9);
//! ```

pub mod core;
pub mod error;
pub mod norm;
pub mod transform;
pub mod utils;

pub use error::{NormError, Result};
pub use norm::{TemporalNorm, TemporalNormConfig};
pub use transform::{ScalerStats, ScalerType};

pub mod prelude {
    pub use crate::core::MaskElement;
    pub use crate::error::{NormError, Result};
    pub use crate::norm::{TemporalNorm, TemporalNormConfig};
    pub use crate::transform::{ScalerStats, ScalerType};
    pub use crate::utils::{masked_mean, masked_median};
}
