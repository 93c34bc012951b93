use crate::{NumberFormat, TextError};
use ndarray::{Array2, ArrayView2, Axis};
use tracing::trace;
use ts_canonical::{SeriesInput, TimeSeries, to_time_series, ts_size};
use tsprep_helpers::Float;

/// Writes a series as one line of text.
///
/// Each dimension becomes a group of space-separated values, and groups are
/// separated by `|`. Only the first `ts_size(ts)` timesteps are written, so
/// padding never reaches the text.
///
/// # Arguments
///
/// * `ts`: A canonical `(length, d)` series, possibly padded.
/// * `fmt`: The conversion applied to every value.
///
/// ```
/// use ndarray::array;
/// use ts_text::{NumberFormat, timeseries_to_str};
///
/// let fmt: NumberFormat = "%.1f".parse().unwrap();
/// let line = timeseries_to_str(array![[1.0, 3.0], [2.0, 4.0], [f64::NAN, f64::NAN]].view(), &fmt);
/// assert_eq!(line, "1.0 2.0|3.0 4.0");
/// ```
pub fn timeseries_to_str<F: Float>(ts: ArrayView2<F>, fmt: &NumberFormat) -> String {
    let sz = ts_size(ts);
    let mut out = String::new();
    for (k, column) in ts.axis_iter(Axis(1)).enumerate() {
        if k > 0 {
            out.push('|');
        }
        for (t, v) in column.iter().take(sz).enumerate() {
            if t > 0 {
                out.push(' ');
            }
            fmt.write_to(&mut out, v.to_f64().unwrap_or(f64::NAN));
        }
    }
    out
}

/// Reads a series back from its one-line text form.
///
/// A trailing line terminator is ignored. Values inside a group may be
/// separated by any whitespace. `nan` tokens are read as data.
///
/// # Errors
///
/// Returns [`TextError::MalformedValue`] for a token that is not a number
/// and [`TextError::RaggedLine`] when groups hold different numbers of values.
///
/// ```
/// use ndarray::array;
/// use ts_text::str_to_timeseries;
///
/// let ts = str_to_timeseries::<f64>("1 2|3 4").unwrap();
/// assert_eq!(ts.values(), array![[1.0, 3.0], [2.0, 4.0]]);
/// ```
pub fn str_to_timeseries<F: Float>(line: &str) -> Result<TimeSeries<F>, TextError> {
    Ok(to_time_series(parse_line(line)?, false)?)
}

/// Decodes a line into series input, keeping track of whether the line
/// declares a dimensionality. A blank line declares none.
pub(crate) fn parse_line<F: Float>(line: &str) -> Result<SeriesInput<F>, TextError> {
    let line = line.trim_end_matches(['\n', '\r']);
    let groups = line
        .split('|')
        .map(|group| {
            group
                .split_whitespace()
                .map(|token| parse_value(token, line))
                .collect::<Result<Vec<F>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let sz = groups.first().map_or(0, Vec::len);
    for (group, values) in groups.iter().enumerate() {
        if values.len() != sz {
            return Err(TextError::RaggedLine {
                group,
                expected: sz,
                found: values.len(),
                line: line.to_owned(),
            });
        }
    }
    trace!(sz, d = groups.len(), "decoded series line");

    if groups.len() == 1 && sz == 0 {
        return Ok(SeriesInput::Univariate(Vec::new()));
    }
    let values = Array2::from_shape_fn((sz, groups.len()), |(t, k)| groups[k][t]);
    Ok(SeriesInput::Array(values))
}

fn parse_value<F: Float>(token: &str, line: &str) -> Result<F, TextError> {
    token
        .parse::<f64>()
        .ok()
        .and_then(F::from_f64)
        .ok_or_else(|| TextError::MalformedValue {
            token: token.to_owned(),
            line: line.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{Array2, array};

    fn one_decimal() -> NumberFormat {
        "%.1f".parse().unwrap()
    }

    #[test]
    fn test_encode_univariate() {
        let ts = to_time_series(vec![1.0, 2.0, 3.0, 4.0], false).unwrap();
        assert_eq!(timeseries_to_str(ts.values(), &one_decimal()), "1.0 2.0 3.0 4.0");
    }

    #[test]
    fn test_encode_multivariate() {
        let ts = array![[1.0, 3.0], [2.0, 4.0]];
        assert_eq!(timeseries_to_str(ts.view(), &one_decimal()), "1.0 2.0|3.0 4.0");
        assert_eq!(
            timeseries_to_str(ts.view(), &NumberFormat::general()),
            "1 2|3 4"
        );
    }

    #[test]
    fn test_encode_skips_padding_but_keeps_interior_nan() {
        let ts = array![[1.0], [f64::NAN], [3.0], [f64::NAN]];
        assert_eq!(timeseries_to_str(ts.view(), &one_decimal()), "1.0 nan 3.0");
    }

    #[test]
    fn test_encode_empty_series() {
        let ts = Array2::<f64>::from_elem((2, 2), f64::NAN);
        assert_eq!(timeseries_to_str(ts.view(), &one_decimal()), "|");
    }

    #[test]
    fn test_decode() {
        let ts = str_to_timeseries::<f64>("1 2 3 4").unwrap();
        assert_eq!(ts.values(), array![[1.0], [2.0], [3.0], [4.0]]);

        let ts = str_to_timeseries::<f64>("1 2|3 4\n").unwrap();
        assert_eq!(ts.values(), array![[1.0, 3.0], [2.0, 4.0]]);
    }

    #[test]
    fn test_decode_default_format_tokens() {
        let ts = str_to_timeseries::<f64>(
            "1.000000000000000000e+00 -2.500000000000000000e-01\r\n",
        )
        .unwrap();
        assert_eq!(ts.values(), array![[1.0], [-0.25]]);
    }

    #[test]
    fn test_decode_interior_nan() {
        let ts = str_to_timeseries::<f64>("1 nan 3").unwrap();
        assert_eq!(ts.len(), 3);
        assert!(ts.values()[[1, 0]].is_nan());
    }

    #[test]
    fn test_decode_empty_groups() {
        let ts = str_to_timeseries::<f64>("|").unwrap();
        assert_eq!(ts.values().dim(), (0, 2));
        assert!(ts.is_empty());
    }

    #[test]
    fn test_blank_line_declares_no_width() {
        assert_eq!(parse_line::<f64>("").unwrap().stated_dim(), None);
        assert_eq!(parse_line::<f64>("  \n").unwrap().stated_dim(), None);
        assert_eq!(parse_line::<f64>("|").unwrap().stated_dim(), Some(2));
        assert!(str_to_timeseries::<f64>("").unwrap().is_empty());
    }

    #[test]
    fn test_decode_malformed() {
        let err = str_to_timeseries::<f64>("1 two 3").unwrap_err();
        match err {
            TextError::MalformedValue { token, line } => {
                assert_eq!(token, "two");
                assert_eq!(line, "1 two 3");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_ragged_groups() {
        let err = str_to_timeseries::<f64>("1 2|3").unwrap_err();
        assert!(matches!(
            err,
            TextError::RaggedLine {
                group: 1,
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_round_trip_within_precision() {
        let ts = array![[0.123456, 10.5], [-3.25, 1e-3], [7.0, -42.125]];
        for (spec, eps) in [("%.18e", 1e-15), ("%.3f", 5e-4), ("%g", 1e-5)] {
            let fmt: NumberFormat = spec.parse().unwrap();
            let back = str_to_timeseries::<f64>(&timeseries_to_str(ts.view(), &fmt)).unwrap();
            assert_abs_diff_eq!(back.values(), ts.view(), epsilon = eps);
        }
    }

    #[test]
    fn test_f32_values() {
        let ts = array![[0.5f32], [1.25]];
        let line = timeseries_to_str(ts.view(), &NumberFormat::general());
        assert_eq!(line, "0.5 1.25");
        assert_eq!(str_to_timeseries::<f32>(&line).unwrap().values(), ts);
    }
}
