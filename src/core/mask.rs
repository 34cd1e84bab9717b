//! Validity masks accompanying a series tensor.
//!
//! A mask marks which entries of `x` take part in the statistics. Boolean
//! masks and numeric 0/1 masks (as produced by data loaders that store the
//! mask as an extra float channel) are both accepted.

/// Element type of a validity mask.
///
/// `true` or any nonzero value marks a valid entry.
pub trait MaskElement: Copy {
    /// Whether this mask entry marks the paired value as valid.
    fn is_valid(self) -> bool;
}

impl MaskElement for bool {
    #[inline]
    fn is_valid(self) -> bool {
        self
    }
}

impl MaskElement for f64 {
    #[inline]
    fn is_valid(self) -> bool {
        self != 0.0 && !self.is_nan()
    }
}

impl MaskElement for f32 {
    #[inline]
    fn is_valid(self) -> bool {
        self != 0.0 && !self.is_nan()
    }
}

impl MaskElement for u8 {
    #[inline]
    fn is_valid(self) -> bool {
        self != 0
    }
}

impl MaskElement for i32 {
    #[inline]
    fn is_valid(self) -> bool {
        self != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_mask() {
        assert!(true.is_valid());
        assert!(!false.is_valid());
    }

    #[test]
    fn numeric_masks_use_nonzero() {
        assert!(1.0_f64.is_valid());
        assert!(0.5_f32.is_valid());
        assert!(!0.0_f64.is_valid());
        assert!(!(-0.0_f64).is_valid());
        assert!(!f64::NAN.is_valid());
        assert!(1_u8.is_valid());
        assert!(!0_i32.is_valid());
    }
}
