use std::path::{Path, PathBuf};

use super::model::{ComparisonMatrix, DatasetKey, MotionPairDataset, ReferenceMarks};
use super::naming::NamingConvention;
use crate::color::display_domain;
use crate::config::{DomainMode, ViewerConfig};
use crate::error::ViewerError;

// ---------------------------------------------------------------------------
// DatasetLoader
// ---------------------------------------------------------------------------

/// Reads matrix + marks for a pair from one directory and one convention.
///
/// Nothing is cached: every call re-reads both files.
#[derive(Debug)]
pub struct DatasetLoader {
    dir: PathBuf,
    convention: Box<dyn NamingConvention>,
    domain_mode: DomainMode,
}

impl DatasetLoader {
    pub fn new(dir: impl Into<PathBuf>, config: &ViewerConfig) -> Self {
        DatasetLoader {
            dir: dir.into(),
            convention: config.naming(),
            domain_mode: config.domain_mode,
        }
    }

    pub fn convention(&self) -> &dyn NamingConvention {
        self.convention.as_ref()
    }

    /// Load, validate, and compute the display domain for one dataset.
    pub fn load(&self, key: &DatasetKey) -> Result<MotionPairDataset, ViewerError> {
        let paths = self.convention.resolve(&self.dir, &key.stem);
        log::debug!(
            "Loading {} from {} and {}",
            key.pair,
            paths.matrix.display(),
            paths.marks.display()
        );

        // Read both before parsing so a missing sibling is reported as such.
        let matrix_text = read_text(&paths.matrix)?;
        let marks_text = read_text(&paths.marks)?;

        let matrix = parse_matrix(&matrix_text)
            .map_err(|reason| ViewerError::malformed(&paths.matrix, reason))?;
        let marks = parse_marks(&marks_text)
            .map_err(|reason| ViewerError::malformed(&paths.marks, reason))?;
        let domain = display_domain(&matrix, self.domain_mode)
            .map_err(|reason| ViewerError::malformed(&paths.matrix, reason))?;

        log::info!(
            "Loaded {}: {}x{} matrix, {} marks",
            key.pair,
            matrix.shape().0,
            matrix.shape().1,
            marks.len()
        );

        Ok(MotionPairDataset {
            key: key.clone(),
            matrix,
            marks,
            domain,
        })
    }
}

fn read_text(path: &Path) -> Result<String, ViewerError> {
    std::fs::read_to_string(path).map_err(|source| ViewerError::DatasetNotFound {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Numeric text parsing
// ---------------------------------------------------------------------------

/// Whitespace-delimited rows of floats; blank lines and `#` comments skipped.
fn parse_rows(text: &str) -> Result<Vec<Vec<f64>>, String> {
    let mut rows = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let content = line.split('#').next().unwrap_or("");
        if content.trim().is_empty() {
            continue;
        }
        let row = content
            .split_whitespace()
            .map(|tok| {
                tok.parse::<f64>()
                    .map_err(|_| format!("line {}: '{tok}' is not a number", line_no + 1))
            })
            .collect::<Result<Vec<f64>, String>>()?;
        rows.push(row);
    }
    Ok(rows)
}

/// One matrix row per line. Must be rectangular and at least 1x1.
pub fn parse_matrix(text: &str) -> Result<ComparisonMatrix, String> {
    ComparisonMatrix::from_rows(parse_rows(text)?)
}

/// Exactly two columns per line: x then y. An empty file means no marks.
pub fn parse_marks(text: &str) -> Result<ReferenceMarks, String> {
    let rows = parse_rows(text)?;
    let mut xs = Vec::with_capacity(rows.len());
    let mut ys = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        match row.as_slice() {
            [x, y] => {
                xs.push(*x);
                ys.push(*y);
            }
            other => {
                return Err(format!(
                    "mark {} has {} columns, expected 2",
                    i + 1,
                    other.len()
                ))
            }
        }
    }
    ReferenceMarks::new(xs, ys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConventionKind;
    use crate::data::model::MotionPair;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) {
        std::fs::write(dir.path().join(name), contents).unwrap();
    }

    fn key(a: &str, b: &str) -> DatasetKey {
        DatasetKey::from_pair(MotionPair::new(a, b).unwrap())
    }

    #[test]
    fn matrix_shape_follows_text_layout() {
        let m = parse_matrix("3 4\n5 6\n7 8\n").unwrap();
        assert_eq!(m.shape(), (3, 2));
        assert_eq!(m.values(), &[3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn matrix_skips_blank_lines_and_comments() {
        let m = parse_matrix("# header\n1 2 3\n\n4 5 6 # trailing\n").unwrap();
        assert_eq!(m.shape(), (2, 3));
    }

    #[test]
    fn matrix_accepts_tabs_and_special_floats() {
        let m = parse_matrix("1\t-2.5e1\nnan inf\n").unwrap();
        assert_eq!(m.shape(), (2, 2));
        assert!(m.get(1, 0).unwrap().is_nan());
    }

    #[test]
    fn ragged_matrix_is_malformed() {
        assert!(parse_matrix("1 2\n3\n").is_err());
        assert!(parse_matrix("").is_err());
        assert!(parse_matrix("1 x\n").is_err());
    }

    #[test]
    fn marks_split_into_columns() {
        let marks = parse_marks("0 0\n1.5 2\n3 4\n").unwrap();
        assert_eq!(marks.len(), 3);
        assert_eq!(marks.xs(), &[0.0, 1.5, 3.0]);
        assert_eq!(marks.ys(), &[0.0, 2.0, 4.0]);
        assert!(parse_marks("").unwrap().is_empty());
    }

    #[test]
    fn marks_with_wrong_column_count_are_malformed() {
        assert!(parse_marks("1 2 3\n").is_err());
        assert!(parse_marks("1 2\n3\n").is_err());
    }

    #[test]
    fn loads_pair_extension_dataset() {
        let dir = TempDir::new().unwrap();
        write(&dir, "x_y.hm", "3 4\n5 6\n7 8");
        write(&dir, "x_y.ref", "0 0");

        let loader = DatasetLoader::new(dir.path(), &ViewerConfig::default());
        let ds = loader.load(&key("x", "y")).unwrap();
        assert_eq!(ds.matrix.shape(), (3, 2));
        assert_eq!(ds.marks.xs(), &[0.0]);
        assert_eq!(ds.marks.ys(), &[0.0]);
        assert_eq!((ds.domain.min, ds.domain.max), (3.0, 8.0));
    }

    #[test]
    fn loads_suffixed_text_dataset() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a_b__heatmap.txt", "1 -2\n");
        write(&dir, "a_b__refFrames.txt", "0 1\n");

        let config = ViewerConfig {
            convention: ConventionKind::SuffixedText,
            domain_mode: DomainMode::SymmetricAbs,
            ..ViewerConfig::default()
        };
        let loader = DatasetLoader::new(dir.path(), &config);
        let ds = loader.load(&key("a", "b")).unwrap();
        assert_eq!((ds.domain.min, ds.domain.max), (0.0, 2.0));
    }

    #[test]
    fn missing_marks_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        write(&dir, "x_y.hm", "1 2\n");

        let loader = DatasetLoader::new(dir.path(), &ViewerConfig::default());
        let err = loader.load(&key("x", "y")).unwrap_err();
        match err {
            ViewerError::DatasetNotFound { path, .. } => assert!(path.ends_with("x_y.ref")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn conventions_are_not_mixed() {
        let dir = TempDir::new().unwrap();
        write(&dir, "x_y.hm", "1 2\n");
        write(&dir, "x_y__refFrames.txt", "0 0\n");

        let loader = DatasetLoader::new(dir.path(), &ViewerConfig::default());
        assert!(matches!(
            loader.load(&key("x", "y")),
            Err(ViewerError::DatasetNotFound { .. })
        ));
    }

    #[test]
    fn ragged_file_is_malformed() {
        let dir = TempDir::new().unwrap();
        write(&dir, "x_y.hm", "1 2\n3 4 5\n");
        write(&dir, "x_y.ref", "0 0\n");

        let loader = DatasetLoader::new(dir.path(), &ViewerConfig::default());
        assert!(matches!(
            loader.load(&key("x", "y")),
            Err(ViewerError::MalformedDataset { .. })
        ));
    }

    #[test]
    fn out_of_range_marks_are_accepted() {
        let dir = TempDir::new().unwrap();
        write(&dir, "x_y.hm", "1 2\n3 4\n");
        write(&dir, "x_y.ref", "10 -3\n");

        let loader = DatasetLoader::new(dir.path(), &ViewerConfig::default());
        let ds = loader.load(&key("x", "y")).unwrap();
        assert_eq!(ds.marks.xs(), &[10.0]);
    }

    #[test]
    fn every_call_rereads_storage() {
        let dir = TempDir::new().unwrap();
        write(&dir, "x_y.hm", "1\n");
        write(&dir, "x_y.ref", "");

        let loader = DatasetLoader::new(dir.path(), &ViewerConfig::default());
        assert_eq!(loader.load(&key("x", "y")).unwrap().matrix.shape(), (1, 1));

        write(&dir, "x_y.hm", "1 2\n3 4\n");
        assert_eq!(loader.load(&key("x", "y")).unwrap().matrix.shape(), (2, 2));
    }
}
