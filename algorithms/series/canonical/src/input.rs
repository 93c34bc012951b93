//! The ingestion boundary: loosely shaped user data goes in, a validated
//! `(length, d)` array comes out.

use crate::ShapeError;
use crate::dataset::TimeSeriesDataset;
use crate::series::TimeSeries;
use ndarray::{Array1, Array2, Array3, ArrayView2, Axis};
use tsprep_helpers::Float;

/// One series as handed over by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesInput<F: Float> {
    /// A flat sequence of scalars, read as a series of dimensionality 1.
    Univariate(Vec<F>),
    /// A sequence of timesteps, each a feature vector of the same width.
    Multivariate(Vec<Vec<F>>),
    /// An already shaped `(length, d)` array.
    Array(Array2<F>),
}

impl<F: Float> SeriesInput<F> {
    /// The dimensionality this input declares, if any.
    ///
    /// An empty flat sequence, an empty list of timesteps and a `(0, 0)` array
    /// say nothing about their width and return `None`. Everything else
    /// declares a width, including an array made only of padding.
    pub fn stated_dim(&self) -> Option<usize> {
        match self {
            SeriesInput::Univariate(values) => (!values.is_empty()).then_some(1),
            SeriesInput::Multivariate(rows) => rows.first().map(Vec::len),
            SeriesInput::Array(values) => {
                (values.nrows() > 0 || values.ncols() > 0).then(|| values.ncols())
            }
        }
    }

    /// Validates the shape and returns a freshly owned, standard-layout array.
    pub fn into_array(self) -> Result<Array2<F>, ShapeError> {
        match self {
            SeriesInput::Univariate(values) => Ok(Array1::from_vec(values).insert_axis(Axis(1))),
            SeriesInput::Multivariate(rows) => {
                let Some(first) = rows.first() else {
                    return Ok(Array2::zeros((0, 1)));
                };
                let d = first.len();
                if d == 0 {
                    return Err(ShapeError::NoFeatures);
                }
                let mut flat = Vec::with_capacity(rows.len() * d);
                for (timestep, row) in rows.iter().enumerate() {
                    if row.len() != d {
                        return Err(ShapeError::RaggedTimestep {
                            timestep,
                            expected: d,
                            found: row.len(),
                        });
                    }
                    flat.extend_from_slice(row);
                }
                Array2::from_shape_vec((rows.len(), d), flat).map_err(|_| ShapeError::NoFeatures)
            }
            SeriesInput::Array(values) => {
                if values.ncols() == 0 {
                    if values.nrows() == 0 {
                        return Ok(Array2::zeros((0, 1)));
                    }
                    return Err(ShapeError::NoFeatures);
                }
                if values.is_standard_layout() {
                    Ok(values)
                } else {
                    Ok(values.as_standard_layout().into_owned())
                }
            }
        }
    }
}

impl<F: Float> From<Vec<F>> for SeriesInput<F> {
    fn from(values: Vec<F>) -> Self {
        SeriesInput::Univariate(values)
    }
}

impl<F: Float> From<&[F]> for SeriesInput<F> {
    fn from(values: &[F]) -> Self {
        SeriesInput::Univariate(values.to_vec())
    }
}

impl<F: Float> From<Vec<Vec<F>>> for SeriesInput<F> {
    fn from(rows: Vec<Vec<F>>) -> Self {
        SeriesInput::Multivariate(rows)
    }
}

impl<F: Float> From<Array1<F>> for SeriesInput<F> {
    fn from(values: Array1<F>) -> Self {
        SeriesInput::Univariate(values.to_vec())
    }
}

impl<F: Float> From<Array2<F>> for SeriesInput<F> {
    fn from(values: Array2<F>) -> Self {
        SeriesInput::Array(values)
    }
}

impl<F: Float> From<ArrayView2<'_, F>> for SeriesInput<F> {
    fn from(values: ArrayView2<'_, F>) -> Self {
        SeriesInput::Array(values.to_owned())
    }
}

impl<F: Float> From<&TimeSeries<F>> for SeriesInput<F> {
    fn from(ts: &TimeSeries<F>) -> Self {
        SeriesInput::Array(ts.values().to_owned())
    }
}

impl<F: Float> From<TimeSeries<F>> for SeriesInput<F> {
    fn from(ts: TimeSeries<F>) -> Self {
        SeriesInput::Array(ts.into_inner())
    }
}

/// A batch of series as handed over by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetInput<F: Float> {
    /// A single series, promoted to a one-element batch.
    Single(SeriesInput<F>),
    /// Independently shaped series, possibly of unequal lengths.
    Batch(Vec<SeriesInput<F>>),
    /// An already shaped `(n, length, d)` array.
    Array(Array3<F>),
}

impl<F: Float> DatasetInput<F> {
    /// Splits the batch into its entries, in order.
    pub fn into_entries(self) -> Vec<SeriesInput<F>> {
        match self {
            DatasetInput::Single(series) => vec![series],
            DatasetInput::Batch(entries) => entries,
            DatasetInput::Array(values) => values
                .axis_iter(Axis(0))
                .map(|ts| SeriesInput::Array(ts.to_owned()))
                .collect(),
        }
    }
}

impl<F: Float> From<Vec<F>> for DatasetInput<F> {
    fn from(values: Vec<F>) -> Self {
        DatasetInput::Single(SeriesInput::Univariate(values))
    }
}

impl<F: Float> From<Vec<Vec<F>>> for DatasetInput<F> {
    fn from(batch: Vec<Vec<F>>) -> Self {
        DatasetInput::Batch(batch.into_iter().map(SeriesInput::Univariate).collect())
    }
}

impl<F: Float> From<Vec<Vec<Vec<F>>>> for DatasetInput<F> {
    fn from(batch: Vec<Vec<Vec<F>>>) -> Self {
        DatasetInput::Batch(batch.into_iter().map(SeriesInput::Multivariate).collect())
    }
}

impl<F: Float> From<Vec<SeriesInput<F>>> for DatasetInput<F> {
    fn from(batch: Vec<SeriesInput<F>>) -> Self {
        DatasetInput::Batch(batch)
    }
}

impl<F: Float> From<Vec<TimeSeries<F>>> for DatasetInput<F> {
    fn from(batch: Vec<TimeSeries<F>>) -> Self {
        DatasetInput::Batch(batch.into_iter().map(SeriesInput::from).collect())
    }
}

impl<F: Float> From<SeriesInput<F>> for DatasetInput<F> {
    fn from(series: SeriesInput<F>) -> Self {
        DatasetInput::Single(series)
    }
}

/// Each row is one univariate series.
impl<F: Float> From<Array2<F>> for DatasetInput<F> {
    fn from(rows: Array2<F>) -> Self {
        DatasetInput::Batch(
            rows.outer_iter()
                .map(|row| SeriesInput::Univariate(row.to_vec()))
                .collect(),
        )
    }
}

impl<F: Float> From<Array3<F>> for DatasetInput<F> {
    fn from(values: Array3<F>) -> Self {
        DatasetInput::Array(values)
    }
}

impl<F: Float> From<&TimeSeriesDataset<F>> for DatasetInput<F> {
    fn from(dataset: &TimeSeriesDataset<F>) -> Self {
        DatasetInput::Array(dataset.values().to_owned())
    }
}

impl<F: Float> From<TimeSeriesDataset<F>> for DatasetInput<F> {
    fn from(dataset: TimeSeriesDataset<F>) -> Self {
        DatasetInput::Array(dataset.into_inner())
    }
}
