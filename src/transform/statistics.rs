//! Shift/scale statistics produced by a forward transform.

use crate::core::broadcast_to;
use crate::error::{NormError, Result};
use ndarray::{ArrayD, AsArray, Dimension, Zip};
use serde::{Deserialize, Serialize};

/// Per-lane statistics needed to invert a scaler.
///
/// Both arrays have the reduction axis collapsed to length 1 so they
/// broadcast back against the series they were computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerStats {
    /// Location statistic (mean, median, min, or zero).
    pub shift: ArrayD<f64>,
    /// Scale statistic after the zero guard and `eps`.
    pub scale: ArrayD<f64>,
}

impl ScalerStats {
    /// Build statistics from caller-provided arrays.
    ///
    /// # Errors
    /// [`NormError::ShapeMismatch`] when `shift` and `scale` have different
    /// shapes.
    pub fn new(shift: ArrayD<f64>, scale: ArrayD<f64>) -> Result<Self> {
        if shift.shape() != scale.shape() {
            return Err(NormError::ShapeMismatch(format!(
                "shift of shape {:?} does not match scale of shape {:?}",
                shift.shape(),
                scale.shape()
            )));
        }
        Ok(Self { shift, scale })
    }

    /// Shape shared by `shift` and `scale`.
    pub fn shape(&self) -> &[usize] {
        self.shift.shape()
    }

    /// Split into `(shift, scale)`.
    pub fn into_parts(self) -> (ArrayD<f64>, ArrayD<f64>) {
        (self.shift, self.scale)
    }
}

/// Apply `f(value, shift, scale)` elementwise with the statistics broadcast
/// to the shape of `values`.
pub(crate) fn map_with_stats<'a, 's, 'c, D, E, F, G>(
    values: impl AsArray<'a, f64, D>,
    shift: impl AsArray<'s, f64, E>,
    scale: impl AsArray<'c, f64, F>,
    f: G,
) -> Result<ArrayD<f64>>
where
    D: Dimension,
    E: Dimension,
    F: Dimension,
    G: Fn(f64, f64, f64) -> f64,
{
    let values = values.into().into_dyn();
    let shift = shift.into().into_dyn();
    let scale = scale.into().into_dyn();
    let shift = broadcast_to(&shift, values.shape(), "shift")?;
    let scale = broadcast_to(&scale, values.shape(), "scale")?;
    Ok(Zip::from(&values)
        .and(&shift)
        .and(&scale)
        .map_collect(|&v, &s, &c| f(v, s, c)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn new_rejects_mismatched_shapes() {
        let shift = Array2::<f64>::zeros((2, 1)).into_dyn();
        let scale = Array2::<f64>::ones((3, 1)).into_dyn();
        assert!(matches!(
            ScalerStats::new(shift, scale),
            Err(NormError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn map_broadcasts_statistics() {
        let x = array![[1.0, 2.0, 3.0], [10.0, 20.0, 30.0]];
        let shift = array![[1.0], [10.0]];
        let scale = array![[2.0], [5.0]];
        let z = map_with_stats(&x, &shift, &scale, |v, s, c| (v - s) / c).unwrap();
        assert_eq!(z, array![[0.0, 0.5, 1.0], [0.0, 2.0, 4.0]].into_dyn());
    }

    #[test]
    fn map_rejects_unbroadcastable_statistics() {
        let x = array![[1.0, 2.0, 3.0]];
        let shift = array![[0.0, 0.0]];
        let scale = array![[1.0]];
        let err = map_with_stats(&x, &shift, &scale, |v, _, _| v).unwrap_err();
        assert!(matches!(err, NormError::ShapeMismatch(_)));
    }

    #[test]
    fn stats_roundtrip_through_json() {
        let stats = ScalerStats::new(
            array![[1.5], [2.5]].into_dyn(),
            array![[0.5], [4.0]].into_dyn(),
        )
        .unwrap();
        let json = serde_json::to_string(&stats).unwrap();
        let back: ScalerStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
        assert_eq!(back.shape(), &[2, 1]);
    }
}
