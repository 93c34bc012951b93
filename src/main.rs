// This is a simple example showing how to use the tsprep library
use ndarray::array;
use tsprep::{LabelCategorizer, NumberFormat, timeseries_to_str, to_time_series_dataset};

fn main() {
    println!("tsprep library example");

    // Two univariate series of different lengths
    let dataset = match to_time_series_dataset(vec![vec![1.0, 2.0], vec![1.0, 4.0, 3.0]]) {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("could not build dataset: {}", e);
            return;
        }
    };
    println!("Dataset shape: {:?}", dataset.values().dim());
    println!("Effective lengths: {:?}", dataset.lengths());

    // Text form, padding is not written
    let fmt = NumberFormat::general();
    for i in 0..dataset.n_series() {
        println!("Line {}: {}", i, timeseries_to_str(dataset.series(i), &fmt));
    }

    // Labels to one-hot rows and back
    let labels = [-1, 2, 1, 1, 2];
    let lc = LabelCategorizer::new().fit(&labels);
    match lc.transform::<f64>(&labels) {
        Ok(one_hot) => {
            println!("One-hot labels:\n{}", one_hot);
            println!("Decoded: {:?}", lc.inverse_transform(one_hot.view()));
        }
        Err(e) => eprintln!("could not encode labels: {}", e),
    }

    let scores = array![[0.2, 0.5, 0.3]];
    println!("Scores {} decode to {:?}", scores, lc.inverse_transform(scores.view()));
}
