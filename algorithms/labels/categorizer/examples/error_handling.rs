//! Example demonstrating error handling with the label categorizer.
//!
//! Shows the conditions under which encoding or decoding fails, and how the
//! errors propagate through `?`.

use label_categorizer::{FittedLabelCategorizer, LabelCategorizer, LabelError};
use ndarray::array;

fn main() {
    println!("Label Categorizer Error Handling Examples");
    println!("=========================================");

    let labels = ["spam", "ham", "ham", "eggs"];
    let lc = LabelCategorizer::new().fit(&labels);
    println!("\nFitted classes: {:?}", lc.classes());

    // Example 1: a label that was not seen during fit
    println!("\n1. Encoding an unseen label:");
    match lc.transform::<f64>(&["bacon"]) {
        Ok(_) => println!("   Encoded successfully"),
        Err(e @ LabelError::UnknownLabel(_)) => println!("   ✓ Caught expected error: {}", e),
        Err(e) => println!("   ✗ Unexpected error: {}", e),
    }

    // Example 2: an indicator matrix with the wrong number of columns
    println!("\n2. Decoding a matrix with the wrong width:");
    match lc.inverse_transform(array![[1.0, 0.0]].view()) {
        Ok(labels) => println!("   Decoded: {:?}", labels),
        Err(e @ LabelError::ColumnMismatch { .. }) => {
            println!("   ✓ Caught expected error: {}", e)
        }
        Err(e) => println!("   ✗ Unexpected error: {}", e),
    }

    // Example 3: decoding soft scores
    println!("\n3. Decoding class scores:");
    let scores = array![[0.1, 0.2, 0.7], [0.5, 0.3, 0.2]];
    match lc.inverse_transform(scores.view()) {
        Ok(labels) => println!("   ✓ Most likely classes: {:?}", labels),
        Err(e) => println!("   ✗ Decoding failed: {}", e),
    }

    // Example 4: error propagation in a function
    println!("\n4. Error propagation in functions:");

    fn encode_then_restore() -> Result<Vec<i32>, LabelError> {
        let y = [-1, 2, -1, -1, 2];
        let fitted = LabelCategorizer::new().single_column_if_binary(true).fit(&y);
        let restored = FittedLabelCategorizer::from_state(fitted.state())?;
        let encoded = restored.transform::<f64>(&y)?;
        restored.inverse_transform(encoded.view())
    }

    match encode_then_restore() {
        Ok(labels) => println!("   ✓ Round trip result: {:?}", labels),
        Err(e) => println!("   ✗ Round trip failed: {}", e),
    }

    println!("\n5. Error types and their meanings:");
    println!("   - UnknownLabel: a label was not seen during fit");
    println!("   - ColumnMismatch: indicator width does not match the fitted classes");
    println!("   - NoClasses: the categorizer was fitted on no labels");
    println!("   - InconsistentState: a persisted mapping is not a bijection");

    println!("\nAll examples completed successfully!");
}
