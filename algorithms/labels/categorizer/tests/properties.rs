//! Property-based checks of label encoding.

use proptest::collection::vec as prop_vec;
use proptest::prelude::*;

use label_categorizer::LabelCategorizer;

/// Few distinct values, so that labels repeat and binary vectors are common.
fn arb_int_labels() -> impl Strategy<Value = Vec<i32>> {
    prop_vec(-3i32..3, 1..40)
}

fn arb_string_labels() -> impl Strategy<Value = Vec<String>> {
    prop_vec("[a-c]{1,2}", 1..40)
}

proptest! {
    #[test]
    fn int_labels_survive_encoding(labels in arb_int_labels(), collapse in any::<bool>()) {
        let lc = LabelCategorizer::new()
            .single_column_if_binary(collapse)
            .fit(&labels);
        let encoded = lc.transform::<f64>(&labels).unwrap();
        prop_assert_eq!(encoded.dim(), (labels.len(), lc.n_columns()));
        prop_assert_eq!(lc.inverse_transform(encoded.view()).unwrap(), labels);
    }

    #[test]
    fn string_labels_survive_encoding(labels in arb_string_labels(), collapse in any::<bool>()) {
        let lc = LabelCategorizer::new()
            .single_column_if_binary(collapse)
            .fit(&labels);
        let encoded = lc.transform::<f32>(&labels).unwrap();
        prop_assert_eq!(lc.inverse_transform(encoded.view()).unwrap(), labels);
    }

    #[test]
    fn one_hot_rows_mark_exactly_one_class(labels in arb_int_labels()) {
        let lc = LabelCategorizer::new().fit(&labels);
        let encoded = lc.transform::<f64>(&labels).unwrap();
        for (row, label) in encoded.rows().into_iter().zip(&labels) {
            prop_assert_eq!(row.sum(), 1.0);
            prop_assert_eq!(row[lc.index_of(label).unwrap()], 1.0);
        }
    }

    #[test]
    fn classes_are_sorted_and_distinct(labels in arb_int_labels()) {
        let lc = LabelCategorizer::new().fit(&labels);
        prop_assert!(lc.classes().windows(2).all(|w| w[0] < w[1]));
        prop_assert!(labels.iter().all(|l| lc.classes().contains(l)));
    }
}
