use crate::input::SeriesInput;
use crate::{ShapeError, ts_size};
use ndarray::{Array2, ArrayView2, s};
use tsprep_helpers::Float;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// A single series in canonical `(length, d)` form.
///
/// The effective length is computed once, when the array is wrapped, so the
/// padding boundary travels with the data instead of being rediscovered from
/// NaN positions by every consumer. Serialized, a `TimeSeries` is just its
/// padded array.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(
        crate = "serde_crate",
        from = "Array2<F>",
        into = "Array2<F>",
        bound(
            serialize = "F: serde_crate::Serialize",
            deserialize = "F: serde_crate::Deserialize<'de>"
        )
    )
)]
pub struct TimeSeries<F>
where
    F: Float,
{
    values: Array2<F>,
    len: usize,
}

impl<F> TimeSeries<F>
where
    F: Float,
{
    /// Wraps a `(length, d)` array, measuring its effective length.
    pub fn from_array(values: Array2<F>) -> Self {
        let values = if values.is_standard_layout() {
            values
        } else {
            values.as_standard_layout().into_owned()
        };
        let len = ts_size(values.view());
        Self { values, len }
    }

    /// The full array, trailing padding included.
    pub fn values(&self) -> ArrayView2<'_, F> {
        self.values.view()
    }

    /// The first `len()` timesteps.
    pub fn trimmed(&self) -> ArrayView2<'_, F> {
        self.values.slice(s![..self.len, ..])
    }

    /// Effective length: timesteps before the trailing padding.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of stored timesteps, padding included.
    pub fn n_timesteps(&self) -> usize {
        self.values.nrows()
    }

    /// Number of features per timestep.
    pub fn dim(&self) -> usize {
        self.values.ncols()
    }

    /// Drops trailing padding.
    pub fn into_trimmed(self) -> Self {
        if self.len == self.values.nrows() {
            return self;
        }
        let len = self.len;
        Self {
            values: self.values.slice_move(s![..len, ..]),
            len,
        }
    }

    pub fn into_inner(self) -> Array2<F> {
        self.values
    }
}

impl<F: Float> From<Array2<F>> for TimeSeries<F> {
    fn from(values: Array2<F>) -> Self {
        Self::from_array(values)
    }
}

impl<F: Float> From<TimeSeries<F>> for Array2<F> {
    fn from(ts: TimeSeries<F>) -> Self {
        ts.values
    }
}

/// Transforms a series so that it fits the canonical `(length, d)` format.
///
/// A flat sequence becomes a single-feature series. The result never shares
/// memory with the caller's buffers. With `remove_nans`, trailing padding
/// timesteps are dropped.
///
/// # Arguments
///
/// * `ts`: A flat sequence, a list of timesteps, or a `(length, d)` array.
/// * `remove_nans`: Whether to drop the trailing padding timesteps.
///
/// # Returns
///
/// The owned `(length, d)` series along with its effective length.
///
/// # Errors
///
/// Returns a [`ShapeError`] if the timesteps do not share one width, or if
/// they have no features at all.
///
/// # Examples
///
/// ```
/// use ndarray::array;
/// use ts_canonical::to_time_series;
///
/// let ts = to_time_series(vec![1.0, 2.0, f64::NAN], true).unwrap();
/// assert_eq!(ts.values(), array![[1.0], [2.0]]);
/// ```
pub fn to_time_series<F, X>(ts: X, remove_nans: bool) -> Result<TimeSeries<F>, ShapeError>
where
    F: Float,
    X: Into<SeriesInput<F>>,
{
    let out = TimeSeries::from_array(ts.into().into_array()?);
    if remove_nans {
        Ok(out.into_trimmed())
    } else {
        Ok(out)
    }
}

/// A series of `sz` timesteps whose `d` features are all zero.
pub fn ts_zeros<F: Float>(sz: usize, d: usize) -> TimeSeries<F> {
    TimeSeries::from_array(Array2::zeros((sz, d)))
}
