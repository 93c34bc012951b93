use crate::input::{DatasetInput, SeriesInput};
use crate::series::{TimeSeries, to_time_series};
use crate::{ShapeError, ts_size};
use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis, s};
use tracing::debug;
use tsprep_helpers::{Float, sentinel};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// A batch of series stored as one `(n, max_len, d)` array.
///
/// Series shorter than `max_len` are padded at the tail with NaN. The
/// effective length of every series is kept next to the array.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(
        crate = "serde_crate",
        from = "Array3<F>",
        into = "Array3<F>",
        bound(
            serialize = "F: serde_crate::Serialize",
            deserialize = "F: serde_crate::Deserialize<'de>"
        )
    )
)]
pub struct TimeSeriesDataset<F>
where
    F: Float,
{
    values: Array3<F>,
    lengths: Vec<usize>,
}

impl<F> TimeSeriesDataset<F>
where
    F: Float,
{
    /// Wraps an `(n, length, d)` array, measuring the effective length of each series.
    pub fn from_array(values: Array3<F>) -> Self {
        let values = if values.is_standard_layout() {
            values
        } else {
            values.as_standard_layout().into_owned()
        };
        let lengths = values.outer_iter().map(ts_size).collect();
        Self { values, lengths }
    }

    /// The padded `(n, max_len, d)` storage.
    pub fn values(&self) -> ArrayView3<'_, F> {
        self.values.view()
    }

    /// Number of series in the dataset.
    pub fn n_series(&self) -> usize {
        self.values.len_of(Axis(0))
    }

    /// Length of the time axis, which is the longest effective length when
    /// the dataset was canonicalized.
    pub fn max_len(&self) -> usize {
        self.values.len_of(Axis(1))
    }

    /// Dimensionality `d` shared by all series.
    pub fn dim(&self) -> usize {
        self.values.len_of(Axis(2))
    }

    /// Effective length of every series, in order.
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Series `i`, padding included.
    ///
    /// # Panics
    ///
    /// Panics if `i >= n_series()`.
    pub fn series(&self, i: usize) -> ArrayView2<'_, F> {
        self.values.index_axis(Axis(0), i)
    }

    /// Series `i` without its trailing padding.
    ///
    /// # Panics
    ///
    /// Panics if `i >= n_series()`.
    pub fn trimmed(&self, i: usize) -> ArrayView2<'_, F> {
        self.values.slice(s![i, ..self.lengths[i], ..])
    }

    /// Iterates over the series without their trailing padding.
    pub fn iter(&self) -> impl Iterator<Item = ArrayView2<'_, F>> + '_ {
        (0..self.n_series()).map(move |i| self.trimmed(i))
    }

    /// Whether all series share one effective length.
    pub fn is_equal_size(&self) -> bool {
        self.lengths.windows(2).all(|w| w[0] == w[1])
    }

    /// The `(n, max_len * d)` flat-feature view of the same storage.
    ///
    /// Timestep `t`, feature `k` lands in column `t * d + k`, so padding stays
    /// NaN and the view can be reshaped back without loss.
    pub fn to_sklearn_view(&self) -> ArrayView2<'_, F> {
        let (n, sz, d) = self.values.dim();
        self.values
            .view()
            .into_shape_with_order((n, sz * d))
            .expect("dataset storage is kept in standard layout")
    }

    /// Owned flat-feature matrix plus the dimensionality needed to undo it.
    pub fn into_sklearn(self) -> (Array2<F>, usize) {
        let (n, sz, d) = self.values.dim();
        let flat = self
            .values
            .into_shape_with_order((n, sz * d))
            .expect("dataset storage is kept in standard layout");
        (flat, d)
    }

    /// Releases the padded storage, dropping the recorded lengths.
    pub fn into_inner(self) -> Array3<F> {
        self.values
    }
}

impl<F: Float> From<Array3<F>> for TimeSeriesDataset<F> {
    fn from(values: Array3<F>) -> Self {
        Self::from_array(values)
    }
}

impl<F: Float> From<TimeSeriesDataset<F>> for Array3<F> {
    fn from(dataset: TimeSeriesDataset<F>) -> Self {
        dataset.values
    }
}

/// Transforms a batch of series so that it fits the canonical
/// `(n, max_len, d)` format.
///
/// Series may have unequal lengths but must share their dimensionality, which
/// is taken from the first series that declares one (see
/// [`SeriesInput::stated_dim`](crate::SeriesInput::stated_dim)). Only empty
/// inputs with no declared width are exempt from that check; they become
/// fully padded rows. Trailing padding already present in an entry is
/// ignored when measuring it, and every series shorter than the longest one
/// is padded with NaN.
///
/// # Arguments
///
/// * `dataset`: A single series, a batch of series, or an already shaped
///   `(n, length, d)` array.
///
/// # Returns
///
/// The padded dataset along with the effective length of every series.
///
/// # Errors
///
/// Returns [`ShapeError::EmptyDataset`] for an empty batch,
/// [`ShapeError::DimensionMismatch`] when a series declares another
/// dimensionality than the first one, and any error raised by an individual
/// series.
///
/// # Examples
///
/// ```
/// use ts_canonical::to_time_series_dataset;
///
/// let ds = to_time_series_dataset(vec![vec![1.0f64, 2.0], vec![1.0, 4.0, 3.0]]).unwrap();
/// assert_eq!(ds.values().dim(), (2, 3, 1));
/// assert!(ds.values()[[0, 2, 0]].is_nan());
/// ```
pub fn to_time_series_dataset<F, X>(dataset: X) -> Result<TimeSeriesDataset<F>, ShapeError>
where
    F: Float,
    X: Into<DatasetInput<F>>,
{
    let inputs = dataset.into().into_entries();
    let stated: Vec<Option<usize>> = inputs.iter().map(SeriesInput::stated_dim).collect();
    let entries = inputs
        .into_iter()
        .map(|ts| to_time_series(ts, true))
        .collect::<Result<Vec<TimeSeries<F>>, _>>()?;

    let first = entries.first().ok_or(ShapeError::EmptyDataset)?;
    let d = stated.iter().flatten().copied().next().unwrap_or(first.dim());
    for (index, width) in stated.iter().enumerate() {
        if let Some(found) = *width {
            if found != d {
                return Err(ShapeError::DimensionMismatch {
                    index,
                    expected: d,
                    found,
                });
            }
        }
    }

    let max_sz = entries.iter().map(TimeSeries::len).max().unwrap_or(0);
    let mut values = Array3::from_elem((entries.len(), max_sz, d), sentinel());
    let mut lengths = Vec::with_capacity(entries.len());
    for (i, ts) in entries.iter().enumerate() {
        if !ts.is_empty() {
            values.slice_mut(s![i, ..ts.len(), ..]).assign(&ts.values());
        }
        lengths.push(ts.len());
    }
    debug!(n_ts = entries.len(), max_sz, d, "canonicalized time series dataset");

    Ok(TimeSeriesDataset { values, lengths })
}

/// Flattens a dataset into the `(n, max_len * d)` layout expected by
/// flat-feature estimators. Returns the dimensionality alongside.
pub fn to_sklearn_dataset<F, X>(dataset: X) -> Result<(Array2<F>, usize), ShapeError>
where
    F: Float,
    X: Into<DatasetInput<F>>,
{
    Ok(to_time_series_dataset(dataset)?.into_sklearn())
}

/// Reshapes an `(n, max_len * d)` flat-feature matrix back into a dataset.
///
/// # Arguments
///
/// * `flat`: One flattened series per row, timestep-major.
/// * `d`: The dimensionality the matrix was flattened from.
///
/// # Errors
///
/// Returns [`ShapeError::NoFeatures`] if `d` is zero and
/// [`ShapeError::FlatWidth`] if the width is not a multiple of `d`.
pub fn from_sklearn_dataset<F: Float>(
    flat: ArrayView2<F>,
    d: usize,
) -> Result<TimeSeriesDataset<F>, ShapeError> {
    if d == 0 {
        return Err(ShapeError::NoFeatures);
    }
    let (n, width) = flat.dim();
    if width % d != 0 {
        return Err(ShapeError::FlatWidth { width, dim: d });
    }
    let values = flat
        .as_standard_layout()
        .into_owned()
        .into_shape_with_order((n, width / d, d))
        .map_err(|_| ShapeError::FlatWidth { width, dim: d })?;
    Ok(TimeSeriesDataset::from_array(values))
}

/// Checks whether all series of a dataset have the same effective length.
///
/// # Examples
///
/// ```
/// use ts_canonical::check_equal_size;
///
/// assert!(check_equal_size(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap());
/// assert!(!check_equal_size(vec![vec![1.0, 2.0, 3.0, 4.0], vec![4.0, 5.0, 6.0]]).unwrap());
/// ```
pub fn check_equal_size<F, X>(dataset: X) -> Result<bool, ShapeError>
where
    F: Float,
    X: Into<DatasetInput<F>>,
{
    Ok(to_time_series_dataset(dataset)?.is_equal_size())
}
