//! Invertible scalers for batched time series.
//!
//! Each scaler is a pair of functions with a fixed contract:
//!
//! - forward `(x, mask, dim, eps) -> (z, shift, scale)`
//! - inverse `(z, shift, scale) -> x`
//!
//! `shift` and `scale` keep the reduction axis with length 1, so they
//! broadcast back against `x`. Statistics only ever come from valid entries,
//! but every entry of `x` is transformed, masked ones included.
//!
//! # Example
//!
//! ```
//! use ndarray::array;
//! use temporal_norm::transform::{inv_robust_scaler, robust_scaler};
//!
//! let x = array![[1.0, 2.0, 3.0, 4.0, 100.0]];
//! let mask = array![[true, true, true, true, false]];
//!
//! let (z, shift, scale) = robust_scaler(&x, &mask, -1, 1e-6).unwrap();
//! assert_eq!(shift[[0, 0]], 2.0);
//!
//! let back = inv_robust_scaler(&z, &shift, &scale).unwrap();
//! assert!((back[[0, 4]] - 100.0).abs() < 1e-9);
//! ```

pub mod guard;
pub mod identity;
pub mod minmax;
pub mod robust;
pub mod scaler;
pub mod standard;
pub mod statistics;

use ndarray::ArrayD;

/// Forward output: `(z, shift, scale)`.
pub type Scaled = (ArrayD<f64>, ArrayD<f64>, ArrayD<f64>);

pub use guard::{guard_scale, DEFAULT_EPS, NORMAL_MAD_RATIO};
pub use identity::{identity_scaler, identity_statistics, inv_identity_scaler};
pub use minmax::{
    inv_minmax1_scaler, inv_minmax_scaler, minmax1_scaler, minmax_scaler, minmax_statistics,
};
pub use robust::{
    inv_invariant_scaler, inv_robust_scaler, invariant_scaler, robust_scaler, robust_statistics,
};
pub use scaler::ScalerType;
pub use standard::{inv_standard_scaler, standard_scaler, std_statistics};
pub use statistics::ScalerStats;
