//! Statistical utilities: slice statistics and masked reductions.

pub mod masked;
pub mod stats;

pub use masked::{masked_max, masked_mean, masked_median, masked_min, MaskedSeries};
