use crate::codec::parse_line;
use crate::{NumberFormat, TextError, timeseries_to_str};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;
use ts_canonical::{TimeSeriesDataset, to_time_series_dataset};
use tsprep_helpers::Float;

/// Writes one line per series, each terminated by `\n`, then flushes `writer`.
pub fn write_dataset<F, W>(
    mut writer: W,
    dataset: &TimeSeriesDataset<F>,
    fmt: &NumberFormat,
) -> Result<(), TextError>
where
    F: Float,
    W: Write,
{
    for ts in dataset.iter() {
        writeln!(writer, "{}", timeseries_to_str(ts, fmt))?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads one series per line and canonicalizes them into a dataset.
///
/// The dimensionality comes from the first non-blank line and every other
/// non-blank line must agree with it. The padded length is the longest series
/// found in the text.
///
/// # Errors
///
/// Returns [`TextError::AtLine`] wrapping the decoding error of a bad line,
/// [`TextError::Shape`] when lines disagree on their dimensionality or the
/// text holds no line at all, and [`TextError::Io`] if reading fails.
pub fn read_dataset<F, R>(reader: R) -> Result<TimeSeriesDataset<F>, TextError>
where
    F: Float,
    R: BufRead,
{
    let mut series = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let ts = parse_line(&line).map_err(|e| TextError::AtLine {
            line_no: i + 1,
            source: Box::new(e),
        })?;
        series.push(ts);
    }
    Ok(to_time_series_dataset(series)?)
}

/// Writes a dataset to `path`, one series per line.
///
/// The file is created (or truncated), written through a buffer and flushed
/// before returning. A failure part-way leaves a partially written file.
///
/// # Arguments
///
/// * `path`: The file to create or truncate.
/// * `dataset`: The series to write; their padding is not written.
/// * `fmt`: The conversion applied to every value.
///
/// # Errors
///
/// Returns [`TextError::Io`] if the file cannot be created or written.
///
/// ```no_run
/// use ts_canonical::to_time_series_dataset;
/// use ts_text::{NumberFormat, load_timeseries_txt, save_timeseries_txt};
///
/// let dataset = to_time_series_dataset(vec![vec![1.0, 2.0, 3.0, 4.0], vec![1.0, 2.0, 3.0]]).unwrap();
/// save_timeseries_txt("dataset.txt", &dataset, &NumberFormat::default()).unwrap();
/// let reloaded = load_timeseries_txt::<f64, _>("dataset.txt").unwrap();
/// assert_eq!(reloaded.lengths(), &[4, 3]);
/// ```
pub fn save_timeseries_txt<F, P>(
    path: P,
    dataset: &TimeSeriesDataset<F>,
    fmt: &NumberFormat,
) -> Result<(), TextError>
where
    F: Float,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let writer = BufWriter::new(File::create(path)?);
    write_dataset(writer, dataset, fmt)?;
    debug!(
        path = %path.display(),
        n_ts = dataset.n_series(),
        fmt = %fmt,
        "saved time series dataset"
    );
    Ok(())
}

/// Loads a dataset written by [`save_timeseries_txt`].
///
/// # Returns
///
/// The padded dataset, whose length axis is the longest series in the file.
///
/// # Errors
///
/// Returns [`TextError::Io`] if the file cannot be opened or read, and any
/// error [`read_dataset`] raises on its content.
pub fn load_timeseries_txt<F, P>(path: P) -> Result<TimeSeriesDataset<F>, TextError>
where
    F: Float,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let dataset = read_dataset(BufReader::new(File::open(path)?))?;
    debug!(
        path = %path.display(),
        n_ts = dataset.n_series(),
        max_sz = dataset.max_len(),
        d = dataset.dim(),
        "loaded time series dataset"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{ArrayView3, array};
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;
    use std::io::Cursor;
    use ts_canonical::ShapeError;

    fn assert_same(a: ArrayView3<f64>, b: ArrayView3<f64>, eps: f64) {
        assert_eq!(a.dim(), b.dim());
        for (x, y) in a.iter().zip(b.iter()) {
            if x.is_nan() || y.is_nan() {
                assert!(x.is_nan() && y.is_nan(), "{x} vs {y}");
            } else {
                assert!((x - y).abs() <= eps, "{x} vs {y}");
            }
        }
    }

    #[test]
    fn test_write_lines() {
        let ds = to_time_series_dataset(vec![vec![1.0, 2.0], vec![1.0, 4.0, 3.0]]).unwrap();
        let mut buf = Vec::new();
        write_dataset(&mut buf, &ds, &NumberFormat::general()).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "1 2\n1 4 3\n");
    }

    #[test]
    fn test_read_lines() {
        let ds = read_dataset::<f64, _>(Cursor::new("1 2|10 20\n3|30\n")).unwrap();
        assert_eq!(ds.values().dim(), (2, 2, 2));
        assert_eq!(ds.trimmed(0), array![[1.0, 10.0], [2.0, 20.0]]);
        assert_eq!(ds.lengths(), &[2, 1]);
    }

    #[test]
    fn test_read_reports_line_number() {
        let err = read_dataset::<f64, _>(Cursor::new("1 2\n1 x\n")).unwrap_err();
        match err {
            TextError::AtLine { line_no, source } => {
                assert_eq!(line_no, 2);
                assert!(matches!(*source, TextError::MalformedValue { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_dimension_mismatch() {
        let err = read_dataset::<f64, _>(Cursor::new("1 2|3 4\n5 6\n")).unwrap_err();
        assert!(matches!(
            err,
            TextError::Shape(ShapeError::DimensionMismatch { index: 1, .. })
        ));
    }

    #[test]
    fn test_first_line_fixes_dimensionality() {
        let err = read_dataset::<f64, _>(Cursor::new("|\n1 2\n")).unwrap_err();
        assert!(matches!(
            err,
            TextError::Shape(ShapeError::DimensionMismatch {
                index: 1,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_blank_line_is_an_empty_series() {
        let ds = read_dataset::<f64, _>(Cursor::new("\n1 2|3 4\n")).unwrap();
        assert_eq!(ds.values().dim(), (2, 2, 2));
        assert_eq!(ds.lengths(), &[0, 2]);
    }

    #[test]
    fn test_read_empty() {
        let err = read_dataset::<f64, _>(Cursor::new("")).unwrap_err();
        assert!(matches!(err, TextError::Shape(ShapeError::EmptyDataset)));
    }

    #[test]
    fn test_file_round_trip_unequal_lengths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.txt");
        let ds = to_time_series_dataset(vec![vec![1.0, 2.0, 3.0, 4.0], vec![1.0, 2.0, 3.0]]).unwrap();

        save_timeseries_txt(&path, &ds, &NumberFormat::default()).unwrap();
        let reloaded = load_timeseries_txt::<f64, _>(&path).unwrap();

        assert_eq!(reloaded.lengths(), ds.lengths());
        for (a, b) in ds.iter().zip(reloaded.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-6);
        }
        assert!(reloaded.values()[[1, 3, 0]].is_nan());
    }

    #[test]
    fn test_file_ends_with_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.txt");
        let ds = to_time_series_dataset(vec![vec![1.0, 2.0, 4.0], vec![1.0, 2.0, 3.0]]).unwrap();
        save_timeseries_txt(&path, &ds, &"%.1f".parse().unwrap()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "1.0 2.0 4.0\n1.0 2.0 3.0\n");
    }

    #[test]
    fn test_max_length_follows_file() {
        // the longest series of the original batch is not in this file
        let ds = to_time_series_dataset(vec![vec![1.0, 2.0], vec![1.0, 2.0, 3.0, 4.0, 5.0]]).unwrap();
        let mut buf = Vec::new();
        writeln!(buf, "{}", timeseries_to_str(ds.series(0), &NumberFormat::default())).unwrap();
        let reloaded = read_dataset::<f64, _>(Cursor::new(buf)).unwrap();
        assert_eq!(reloaded.max_len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_timeseries_txt::<f64, _>(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, TextError::Io(_)));
    }

    #[test]
    fn test_random_datasets_round_trip() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1234);
        for _ in 0..10 {
            let d = rng.random_range(1..4);
            let n = rng.random_range(1..6);
            let batch: Vec<Vec<Vec<f64>>> = (0..n)
                .map(|_| {
                    let len = rng.random_range(1..15);
                    (0..len)
                        .map(|_| (0..d).map(|_| rng.random_range(-100.0..100.0)).collect())
                        .collect()
                })
                .collect();
            let ds = to_time_series_dataset(batch).unwrap();

            let mut buf = Vec::new();
            write_dataset(&mut buf, &ds, &NumberFormat::default()).unwrap();
            let reloaded = read_dataset::<f64, _>(Cursor::new(buf)).unwrap();

            assert_eq!(reloaded.lengths(), ds.lengths());
            assert_same(ds.values(), reloaded.values(), 1e-12);
        }
    }
}
