//! Line-oriented text representation of time series datasets.
//!
//! One series per line. Inside a line, dimensions are separated by `|` and
//! the values of one dimension by spaces:
//!
//! ```text
//! 1.0 2.0 3.0|10.0 20.0 30.0
//! 4.0 5.0|40.0 50.0
//! ```
//!
//! There is no header; the reader infers the dimensionality from the number of
//! groups and the length of each series from the group sizes. Padding is never
//! written, and is re-introduced when the lines are read back as a dataset.

mod codec;
mod error;
mod format;
mod io;

pub use codec::{str_to_timeseries, timeseries_to_str};
pub use error::TextError;
pub use format::{FormatError, MAX_FIELD, NumberFormat};
pub use io::{load_timeseries_txt, read_dataset, save_timeseries_txt, write_dataset};
