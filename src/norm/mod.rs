//! Normalizer facade binding one scaler to its configuration.

mod config;
mod temporal_norm;

pub use config::TemporalNormConfig;
pub use temporal_norm::TemporalNorm;
