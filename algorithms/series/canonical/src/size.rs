use ndarray::{ArrayView2, Axis};
use tsprep_helpers::{Float, is_padding_row};

/// Returns the effective length of a canonical series.
///
/// Timesteps are scanned from the end; trailing timesteps whose features are
/// all non-finite are padding and are not counted. The scan stops at the first
/// real timestep, so a NaN inside the series is kept as data.
///
/// # Examples
///
/// ```
/// use ndarray::array;
/// use ts_canonical::ts_size;
///
/// assert_eq!(ts_size(array![[1.0], [2.0], [3.0], [f64::NAN]].view()), 3);
/// assert_eq!(ts_size(array![[f64::NAN]].view()), 0);
/// ```
pub fn ts_size<F: Float>(ts: ArrayView2<F>) -> usize {
    let mut sz = ts.len_of(Axis(0));
    while sz > 0 && is_padding_row(ts.row(sz - 1)) {
        sz -= 1;
    }
    sz
}
