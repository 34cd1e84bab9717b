//! Core building blocks: validity masks and shape handling.

mod mask;
mod shape;

pub use mask::MaskElement;
pub use shape::{broadcast_to, reduced_shape, resolve_axis};

pub(crate) use shape::zeros_and_ones;
