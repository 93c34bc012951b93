//! Property-based checks of the canonical form.

use ndarray::{Array2, Axis, concatenate};
use proptest::collection::vec as prop_vec;
use proptest::prelude::*;

use ts_canonical::{SeriesInput, to_time_series, to_time_series_dataset, ts_size};

/// Finite values only, so that no generated timestep is mistaken for padding.
fn arb_value() -> impl Strategy<Value = f64> {
    -1e6f64..1e6f64
}

/// A multivariate series of dimensionality `d` with 1..20 timesteps.
fn arb_series(d: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop_vec(prop_vec(arb_value(), d), 1..20)
}

fn arb_batch() -> impl Strategy<Value = (usize, Vec<Vec<Vec<f64>>>)> {
    (1usize..4).prop_flat_map(|d| (Just(d), prop_vec(arb_series(d), 1..8)))
}

proptest! {
    #[test]
    fn canonicalize_is_idempotent(rows in arb_series(3)) {
        let once = to_time_series(rows.clone(), false).unwrap();
        let twice = to_time_series(&once, false).unwrap();
        prop_assert_eq!(once.values().dim(), (rows.len(), 3));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn dataset_keeps_prefixes_and_pads_the_rest((d, batch) in arb_batch()) {
        let ds = to_time_series_dataset(batch.clone()).unwrap();
        let max_len = batch.iter().map(Vec::len).max().unwrap();
        prop_assert_eq!(ds.values().dim(), (batch.len(), max_len, d));

        for (i, rows) in batch.iter().enumerate() {
            let expected = to_time_series(SeriesInput::Multivariate(rows.clone()), false).unwrap();
            prop_assert_eq!(ds.trimmed(i), expected.values());
            let padding = ds.series(i);
            for t in rows.len()..max_len {
                prop_assert!(padding.row(t).iter().all(|v| v.is_nan()));
            }
        }
    }

    #[test]
    fn extra_padding_does_not_change_effective_length(rows in arb_series(2), extra in 0usize..10) {
        let ts = to_time_series(rows.clone(), false).unwrap();
        let padding = Array2::from_elem((extra, 2), f64::NAN);
        let padded = concatenate(Axis(0), &[ts.values(), padding.view()]).unwrap();
        prop_assert_eq!(ts_size(padded.view()), rows.len());
    }
}
