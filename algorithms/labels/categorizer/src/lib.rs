use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use thiserror::Error;
use tracing::debug;
use tsprep_helpers::Float;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Errors that can occur when encoding or decoding labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    /// A label that was not seen during fit.
    #[error("label {0} was not seen during fit")]
    UnknownLabel(String),
    /// An indicator matrix whose width does not match the fitted classes.
    #[error("expected {expected} indicator columns, got {found}")]
    ColumnMismatch { expected: usize, found: usize },
    /// Decoding requires at least one fitted class.
    #[error("categorizer was fitted on an empty label vector")]
    NoClasses,
    /// A persisted state whose two directions do not describe the same mapping.
    #[error("inconsistent categorizer state: {0}")]
    InconsistentState(String),
}

/// Turns class labels into one-hot indicator rows and back.
///
/// `LabelCategorizer` only holds configuration; [`fit`](Self::fit) produces an
/// immutable [`FittedLabelCategorizer`] that can be shared between readers.
///
/// # Example
///
/// ```
/// use label_categorizer::LabelCategorizer;
/// use ndarray::array;
///
/// let y = [-1, 2, 1, 1, 2];
/// let lc = LabelCategorizer::new().fit(&y);
/// let one_hot = lc.transform::<f64>(&y).unwrap();
/// assert_eq!(one_hot.row(1), array![0.0, 0.0, 1.0]);
/// assert_eq!(lc.inverse_transform(one_hot.view()).unwrap(), y);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct LabelCategorizer {
    single_column_if_binary: bool,
}

impl LabelCategorizer {
    /// Creates a categorizer that always emits one column per class.
    pub fn new() -> Self {
        Self::default()
    }

    /// With exactly two classes, emit a single indicator column that is 1 for
    /// the first class instead of two one-hot columns. Has no effect with any
    /// other number of classes.
    pub fn single_column_if_binary(mut self, enabled: bool) -> Self {
        self.single_column_if_binary = enabled;
        self
    }

    /// Assigns index `i` to the `i`-th smallest distinct label.
    ///
    /// # Arguments
    ///
    /// * `labels`: The training labels. Duplicates are allowed.
    ///
    /// # Returns
    ///
    /// An immutable mapping that encodes and decodes these labels. Fitting an
    /// empty slice succeeds, but the result cannot decode anything.
    pub fn fit<L>(&self, labels: &[L]) -> FittedLabelCategorizer<L>
    where
        L: Clone + Ord + Hash + Debug,
    {
        let mut backward = labels.to_vec();
        backward.sort();
        backward.dedup();
        let forward = backward
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i))
            .collect();
        debug!(
            n_labels = labels.len(),
            n_classes = backward.len(),
            "fitted label categorizer"
        );

        FittedLabelCategorizer {
            forward,
            backward,
            single_column_if_binary: self.single_column_if_binary,
        }
    }

    /// Fits on `labels` and encodes the same labels.
    pub fn fit_transform<L, F>(
        &self,
        labels: &[L],
    ) -> Result<(FittedLabelCategorizer<L>, Array2<F>), LabelError>
    where
        L: Clone + Ord + Hash + Debug,
        F: Float,
    {
        let fitted = self.fit(labels);
        let encoded = fitted.transform(labels)?;
        Ok((fitted, encoded))
    }
}

/// The complete persisted form of a fitted categorizer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct CategorizerState<L>
where
    L: Clone + Ord + Hash + Debug,
{
    /// Label to class index.
    pub forward: HashMap<L, usize>,
    /// Class index to label.
    pub backward: Vec<L>,
    pub single_column_if_binary: bool,
}

/// A fitted label ↔ index mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(
        crate = "serde_crate",
        try_from = "CategorizerState<L>",
        into = "CategorizerState<L>",
        bound(
            serialize = "L: serde_crate::Serialize",
            deserialize = "L: serde_crate::Deserialize<'de>"
        )
    )
)]
pub struct FittedLabelCategorizer<L>
where
    L: Clone + Ord + Hash + Debug,
{
    forward: HashMap<L, usize>,
    backward: Vec<L>,
    single_column_if_binary: bool,
}

impl<L> FittedLabelCategorizer<L>
where
    L: Clone + Ord + Hash + Debug,
{
    /// The distinct fitted labels, in index order.
    pub fn classes(&self) -> &[L] {
        &self.backward
    }

    /// Number of distinct fitted labels.
    pub fn n_classes(&self) -> usize {
        self.backward.len()
    }

    /// Column index of `label`, or `None` if it was not seen during fit.
    pub fn index_of(&self, label: &L) -> Option<usize> {
        self.forward.get(label).copied()
    }

    /// Whether encoding produces a single decision column.
    pub fn is_binary_collapsed(&self) -> bool {
        self.single_column_if_binary && self.backward.len() == 2
    }

    /// Width of the matrices produced by [`transform`](Self::transform).
    pub fn n_columns(&self) -> usize {
        if self.is_binary_collapsed() {
            1
        } else {
            self.backward.len()
        }
    }

    /// Fits again on new labels, keeping the configuration.
    pub fn refit(&self, labels: &[L]) -> Self {
        LabelCategorizer::new()
            .single_column_if_binary(self.single_column_if_binary)
            .fit(labels)
    }

    /// Encodes labels as `(n, n_classes)` one-hot rows, or as an `(n, 1)`
    /// column that is 1 for the first class when binary collapse applies.
    ///
    /// # Arguments
    ///
    /// * `labels`: Labels drawn from the fitted classes.
    ///
    /// # Returns
    ///
    /// An `(labels.len(), n_columns())` indicator matrix.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::UnknownLabel`] for a label not seen during fit.
    pub fn transform<F: Float>(&self, labels: &[L]) -> Result<Array2<F>, LabelError> {
        let mut out = Array2::zeros((labels.len(), self.backward.len()));
        for (i, label) in labels.iter().enumerate() {
            let idx = self
                .index_of(label)
                .ok_or_else(|| LabelError::UnknownLabel(format!("{:?}", label)))?;
            out[[i, idx]] = F::one();
        }
        if self.is_binary_collapsed() {
            Ok(out.column(0).to_owned().insert_axis(Axis(1)))
        } else {
            Ok(out)
        }
    }

    /// Decodes indicator rows back to labels.
    ///
    /// Each row is mapped to the label of its largest column, the first one
    /// winning ties, so soft scores decode to their most likely class. A single
    /// decision column `c` is read as the two columns `[c, 1 - c]` when binary
    /// collapse applies.
    ///
    /// # Arguments
    ///
    /// * `y`: Indicator rows or per-class scores, one row per sample.
    ///
    /// # Returns
    ///
    /// One label per row of `y`.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::NoClasses`] if no class was fitted and
    /// [`LabelError::ColumnMismatch`] if the width matches neither the class
    /// count nor the collapsed form.
    pub fn inverse_transform<F: Float>(&self, y: ArrayView2<F>) -> Result<Vec<L>, LabelError> {
        if self.backward.is_empty() {
            return Err(LabelError::NoClasses);
        }
        let n_cols = y.ncols();
        if n_cols == 1 && self.is_binary_collapsed() {
            return Ok(y
                .column(0)
                .iter()
                .map(|&c| {
                    let idx = argmax([c, F::one() - c].iter().copied());
                    self.backward[idx].clone()
                })
                .collect());
        }
        if n_cols != self.backward.len() {
            return Err(LabelError::ColumnMismatch {
                expected: self.n_columns(),
                found: n_cols,
            });
        }
        Ok(y.rows()
            .into_iter()
            .map(|row: ArrayView1<F>| self.backward[argmax(row.iter().copied())].clone())
            .collect())
    }

    /// Extracts the mapping for persistence.
    pub fn state(&self) -> CategorizerState<L> {
        CategorizerState {
            forward: self.forward.clone(),
            backward: self.backward.clone(),
            single_column_if_binary: self.single_column_if_binary,
        }
    }

    /// Rebuilds a categorizer from a persisted mapping.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::InconsistentState`] if `forward` is not the exact
    /// inverse of `backward`.
    pub fn from_state(state: CategorizerState<L>) -> Result<Self, LabelError> {
        if state.forward.len() != state.backward.len() {
            return Err(LabelError::InconsistentState(format!(
                "{} forward entries for {} classes",
                state.forward.len(),
                state.backward.len()
            )));
        }
        for (i, label) in state.backward.iter().enumerate() {
            if state.forward.get(label) != Some(&i) {
                return Err(LabelError::InconsistentState(format!(
                    "class {} ({:?}) is not mapped back to index {}",
                    i, label, i
                )));
            }
        }
        Ok(Self {
            forward: state.forward,
            backward: state.backward,
            single_column_if_binary: state.single_column_if_binary,
        })
    }
}

impl<L> TryFrom<CategorizerState<L>> for FittedLabelCategorizer<L>
where
    L: Clone + Ord + Hash + Debug,
{
    type Error = LabelError;

    fn try_from(state: CategorizerState<L>) -> Result<Self, Self::Error> {
        Self::from_state(state)
    }
}

impl<L> From<FittedLabelCategorizer<L>> for CategorizerState<L>
where
    L: Clone + Ord + Hash + Debug,
{
    fn from(fitted: FittedLabelCategorizer<L>) -> Self {
        CategorizerState {
            forward: fitted.forward,
            backward: fitted.backward,
            single_column_if_binary: fitted.single_column_if_binary,
        }
    }
}

/// Index of the largest value, the first one on ties. A NaN counts as the
/// largest value, so the first NaN wins.
fn argmax<F: Float>(values: impl Iterator<Item = F>) -> usize {
    let mut best_idx = 0;
    let mut best: Option<F> = None;
    for (i, v) in values.enumerate() {
        match best {
            None => {
                best = Some(v);
                best_idx = i;
            }
            Some(b) if b.is_nan() => break,
            Some(b) => {
                if v.is_nan() || v > b {
                    best = Some(v);
                    best_idx = i;
                }
            }
        }
    }
    best_idx
}
