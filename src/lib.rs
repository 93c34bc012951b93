//! Canonical representation, sizing and text persistence for collections of
//! possibly multivariate, possibly unequal-length time series, plus a
//! label ↔ one-hot categorizer.
//!
//! This crate re-exports the workspace members:
//!
//! * `ts_canonical`: `(length, d)` series and NaN-padded `(n, max_len, d)` datasets
//! * `ts_text`: the `|`-separated line format and its file helpers
//! * `label_categorizer`: label encoding to indicator rows and back

pub use tsprep_helpers::{Float, is_padding_row, is_sentinel, sentinel};

pub use ts_canonical::{
    DatasetInput, SeriesInput, ShapeError, TimeSeries, TimeSeriesDataset, check_equal_size,
    from_sklearn_dataset, to_sklearn_dataset, to_time_series, to_time_series_dataset, ts_size,
    ts_zeros,
};

pub use ts_text::{
    FormatError, NumberFormat, TextError, load_timeseries_txt, read_dataset, save_timeseries_txt,
    str_to_timeseries, timeseries_to_str, write_dataset,
};

pub use label_categorizer::{
    CategorizerState, FittedLabelCategorizer, LabelCategorizer, LabelError,
};
