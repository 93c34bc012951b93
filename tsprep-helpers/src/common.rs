use crate::Float;
use ndarray::ArrayView1;

/// The value written into every feature of a padding timestep.
#[inline]
pub fn sentinel<F: Float>() -> F {
    F::nan()
}

#[inline]
pub fn is_sentinel<F: Float>(value: F) -> bool {
    value.is_nan()
}

/// Returns `true` when no feature of `row` is finite.
///
/// A timestep is "real" as soon as one of its features carries a finite value,
/// so a row mixing NaN and finite values is data, not padding. Infinite values
/// are not finite and therefore do not make a row real on their own.
pub fn is_padding_row<F: Float>(row: ArrayView1<F>) -> bool {
    !row.iter().any(|v| v.is_finite())
}
