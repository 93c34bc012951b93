//! Canonical in-memory form for collections of time series.
//!
//! A series is a `(length, d)` array of floats; a dataset is an
//! `(n, max_len, d)` array where shorter series are padded at the tail with
//! NaN. The functions here turn loosely shaped input into that form, and
//! recover the effective length of a padded series.

mod dataset;
mod error;
mod input;
mod series;
mod size;

pub use dataset::{
    TimeSeriesDataset, check_equal_size, from_sklearn_dataset, to_sklearn_dataset,
    to_time_series_dataset,
};
pub use error::ShapeError;
pub use input::{DatasetInput, SeriesInput};
pub use series::{TimeSeries, to_time_series, ts_zeros};
pub use size::ts_size;
