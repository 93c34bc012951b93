use thiserror::Error;

/// Errors raised while bringing input into canonical `(length, d)` form.
///
/// Every variant is a shape mismatch of some kind: the input cannot be viewed
/// as a series (or a batch of series) with one consistent dimensionality.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// A timestep of a multivariate series has a different width than the first one.
    #[error("timestep {timestep} has {found} features, expected {expected}")]
    RaggedTimestep {
        timestep: usize,
        expected: usize,
        found: usize,
    },
    /// Timesteps carry no feature at all (d = 0).
    #[error("series timesteps have no features")]
    NoFeatures,
    /// A series of a dataset does not share the dimensionality of the first series.
    #[error("series {index} has dimensionality {found}, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
    /// A dataset without any series, so `d` cannot be inferred.
    #[error("cannot infer dimensionality of an empty dataset")]
    EmptyDataset,
    /// A flat feature matrix whose width is not a multiple of `d`.
    #[error("flat width {width} is not a multiple of dimensionality {dim}")]
    FlatWidth { width: usize, dim: usize },
}
