//! Axis resolution and broadcasting.
//!
//! Reductions take a signed `dim` the way tensor libraries do: `-1` is the
//! last axis, `-2` the one before it. Masks and statistics are broadcast
//! against the series with the usual trailing-axis rules.

use crate::error::{NormError, Result};
use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn};

/// Resolve a signed dimension index into an [`Axis`] of an `ndim`-d array.
///
/// # Errors
/// [`NormError::ShapeMismatch`] when `dim` is outside `-ndim..ndim`.
pub fn resolve_axis(dim: isize, ndim: usize) -> Result<Axis> {
    let n = ndim as isize;
    let idx = if dim < 0 { dim + n } else { dim };
    if idx < 0 || idx >= n {
        return Err(NormError::ShapeMismatch(format!(
            "dim {dim} out of range for {ndim}-d array"
        )));
    }
    Ok(Axis(idx as usize))
}

/// Shape of `shape` with `axis` collapsed to length 1.
pub fn reduced_shape(shape: &[usize], axis: Axis) -> Vec<usize> {
    let mut out = shape.to_vec();
    out[axis.index()] = 1;
    out
}

/// Broadcast `view` to `shape`, reporting both shapes on failure.
///
/// `what` names the broadcast operand in the error message.
pub fn broadcast_to<'a, A>(
    view: &'a ArrayViewD<'_, A>,
    shape: &[usize],
    what: &str,
) -> Result<ArrayViewD<'a, A>> {
    view.broadcast(IxDyn(shape)).ok_or_else(|| {
        NormError::ShapeMismatch(format!(
            "{what} of shape {:?} cannot be broadcast to {:?}",
            view.shape(),
            shape
        ))
    })
}

/// Zero-filled and one-filled arrays of the reduced shape.
pub(crate) fn zeros_and_ones(shape: &[usize], axis: Axis) -> (ArrayD<f64>, ArrayD<f64>) {
    let reduced = reduced_shape(shape, axis);
    (
        ArrayD::zeros(IxDyn(&reduced)),
        ArrayD::ones(IxDyn(&reduced)),
    )
}
