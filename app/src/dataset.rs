use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;
use tsprep::{NumberFormat, TimeSeriesDataset, load_timeseries_txt, save_timeseries_txt};

fn load(path: &Path) -> Result<TimeSeriesDataset<f64>> {
    load_timeseries_txt(path).with_context(|| format!("failed to load {}", path.display()))
}

pub fn info(path: &Path, show_lengths: bool) -> Result<()> {
    let dataset = load(path)?;
    println!("series:     {}", dataset.n_series());
    println!("max length: {}", dataset.max_len());
    println!("dimensions: {}", dataset.dim());
    println!("equal size: {}", dataset.is_equal_size());
    if show_lengths {
        for (i, len) in dataset.lengths().iter().enumerate() {
            println!("{:>6} {}", i, len);
        }
    }
    Ok(())
}

pub fn reformat(input: &Path, output: &Path, fmt: &NumberFormat) -> Result<()> {
    let dataset = load(input)?;
    save_timeseries_txt(output, &dataset, fmt)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(
        n_ts = dataset.n_series(),
        fmt = %fmt,
        "wrote {}",
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsprep::to_time_series_dataset;

    #[test]
    fn test_reformat_changes_precision_only() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        let ds = to_time_series_dataset(vec![vec![1.0, 2.5], vec![3.0]]).unwrap();
        save_timeseries_txt(&input, &ds, &NumberFormat::default()).unwrap();

        reformat(&input, &output, &"%.2f".parse().unwrap()).unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        assert_eq!(text, "1.00 2.50\n3.00\n");
    }

    #[test]
    fn test_info_missing_file_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let err = info(&dir.path().join("nope.txt"), false).unwrap_err();
        assert!(err.to_string().contains("failed to load"));
    }
}
