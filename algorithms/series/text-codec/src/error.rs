use crate::FormatError;
use thiserror::Error;
use ts_canonical::ShapeError;

/// Errors raised while reading or writing the text representation.
#[derive(Debug, Error)]
pub enum TextError {
    /// A token that does not parse as a number.
    #[error("malformed value {token:?} in line {line:?}")]
    MalformedValue { token: String, line: String },
    /// The `|`-separated groups of a line disagree on the series length.
    #[error("dimension {group} has {found} values, expected {expected}, in line {line:?}")]
    RaggedLine {
        group: usize,
        expected: usize,
        found: usize,
        line: String,
    },
    /// Wraps an error with the 1-based line number it was found on.
    #[error("line {line_no}: {source}")]
    AtLine {
        line_no: usize,
        source: Box<TextError>,
    },
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
