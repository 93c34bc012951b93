use anyhow::{Context, Result, bail};
use ndarray::Array2;
use std::fs;
use std::path::Path;
use tracing::info;
use tsprep::{FittedLabelCategorizer, LabelCategorizer};

fn read_labels(path: &Path) -> Result<Vec<String>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect())
}

/// Parses whitespace-separated rows of numbers into a matrix.
fn read_rows(path: &Path) -> Result<Array2<f64>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|token| token.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("line {}: malformed value in {:?}", i + 1, line))?;
        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                bail!(
                    "line {}: expected {} columns, got {}",
                    i + 1,
                    first.len(),
                    row.len()
                );
            }
        }
        rows.push(row);
    }
    let n_cols = rows.first().map_or(0, Vec::len);
    Ok(Array2::from_shape_vec(
        (rows.len(), n_cols),
        rows.into_iter().flatten().collect(),
    )?)
}

pub fn encode(path: &Path, binary: bool, state: Option<&Path>) -> Result<()> {
    let labels = read_labels(path)?;
    let (fitted, encoded) = LabelCategorizer::new()
        .single_column_if_binary(binary)
        .fit_transform::<_, f64>(&labels)?;
    info!(n_classes = fitted.n_classes(), "classes: {:?}", fitted.classes());

    for row in encoded.rows() {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        println!("{}", line.join(" "));
    }

    if let Some(state_path) = state {
        let json = serde_json::to_string_pretty(&fitted)?;
        fs::write(state_path, json)
            .with_context(|| format!("failed to write {}", state_path.display()))?;
        info!("saved categorizer to {}", state_path.display());
    }
    Ok(())
}

pub fn decode(path: &Path, state: &Path) -> Result<()> {
    let json =
        fs::read_to_string(state).with_context(|| format!("failed to read {}", state.display()))?;
    let fitted: FittedLabelCategorizer<String> = serde_json::from_str(&json)
        .with_context(|| format!("invalid categorizer state in {}", state.display()))?;
    let rows = read_rows(path)?;
    for label in fitted.inverse_transform(rows.view())? {
        println!("{}", label);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.txt");
        fs::write(&path, "0 1 0\n\n1 0 0\n").unwrap();
        let rows = read_rows(&path).unwrap();
        assert_eq!(rows, ndarray::array![[0.0, 1.0, 0.0], [1.0, 0.0, 0.0]]);
    }

    #[test]
    fn test_read_rows_ragged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.txt");
        fs::write(&path, "0 1\n1\n").unwrap();
        assert!(read_rows(&path).is_err());
    }

    #[test]
    fn test_encode_saves_state_that_decodes() {
        let dir = tempfile::tempdir().unwrap();
        let labels = dir.path().join("labels.txt");
        let state = dir.path().join("state.json");
        let rows = dir.path().join("rows.txt");
        fs::write(&labels, "dog\ncat\ndog\n").unwrap();
        fs::write(&rows, "0 1\n1 0\n").unwrap();

        encode(&labels, false, Some(&state)).unwrap();
        let json = fs::read_to_string(&state).unwrap();
        let fitted: FittedLabelCategorizer<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(fitted.classes(), &["cat".to_string(), "dog".to_string()]);

        decode(&rows, &state).unwrap();
    }
}
