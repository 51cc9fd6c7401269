use std::fmt;
use std::path::Path;

use crate::error::ViewerError;

/// Separates the two motion names in every naming convention.
pub const PAIR_DELIMITER: char = '_';

// ---------------------------------------------------------------------------
// MotionPair – the two motion names
// ---------------------------------------------------------------------------

/// An ordered pair of motion names.
///
/// Both names are non-empty and contain neither a path separator nor the
/// pair delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MotionPair {
    first: String,
    second: String,
}

impl MotionPair {
    /// Build a pair from two explicit names, kept verbatim.
    pub fn new(first: &str, second: &str) -> Result<Self, ViewerError> {
        let whole = format!("{first}{PAIR_DELIMITER}{second}");
        validate_name(first, &whole)?;
        validate_name(second, &whole)?;
        Ok(MotionPair {
            first: first.to_string(),
            second: second.to_string(),
        })
    }

    /// Parse a file name such as `dir/walk_run.hm` or
    /// `walk_run__heatmap.txt`.
    ///
    /// Only the last path component is considered, without its extension.
    pub fn from_file_name(name: &str) -> Result<Self, ViewerError> {
        let stem = Path::new(name)
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ViewerError::pair_name(name, "no file name component"))?;
        Self::parse_tokens(stem, name)
    }

    /// Parse a bare prefix such as `walk.v2_run` or `walk_run_take2`.
    ///
    /// Nothing is stripped: dots belong to the motion names.
    pub fn from_prefix(prefix: &str) -> Result<Self, ViewerError> {
        Self::parse_tokens(prefix, prefix)
    }

    /// The first two `_`-separated tokens of `text` become the pair.
    fn parse_tokens(text: &str, whole: &str) -> Result<Self, ViewerError> {
        let mut tokens = text.split(PAIR_DELIMITER);
        let (Some(first), Some(second)) = (tokens.next(), tokens.next()) else {
            return Err(ViewerError::pair_name(
                whole,
                format!("expected two names separated by '{PAIR_DELIMITER}'"),
            ));
        };
        validate_name(first, whole)?;
        validate_name(second, whole)?;
        Ok(MotionPair {
            first: first.to_string(),
            second: second.to_string(),
        })
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    /// Canonical file stem: `<first>_<second>`.
    pub fn stem(&self) -> String {
        format!("{}{PAIR_DELIMITER}{}", self.first, self.second)
    }
}

impl fmt::Display for MotionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

fn validate_name(part: &str, whole: &str) -> Result<(), ViewerError> {
    if part.is_empty() {
        return Err(ViewerError::pair_name(whole, "empty motion name"));
    }
    if part.contains(PAIR_DELIMITER) {
        return Err(ViewerError::pair_name(
            whole,
            format!("motion name '{part}' contains '{PAIR_DELIMITER}'"),
        ));
    }
    if part.contains(std::path::is_separator) {
        return Err(ViewerError::pair_name(
            whole,
            format!("motion name '{part}' contains a path separator"),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// DatasetKey – where a pair's files live
// ---------------------------------------------------------------------------

/// A motion pair plus the file stem its artifacts are stored under.
///
/// Explicit pairs use the canonical stem; discovered pairs keep the stem
/// found on disk, which may carry extra tokens after the two names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetKey {
    pub pair: MotionPair,
    pub stem: String,
}

impl DatasetKey {
    pub fn from_pair(pair: MotionPair) -> Self {
        let stem = pair.stem();
        DatasetKey { pair, stem }
    }

    pub fn from_stem(stem: &str) -> Result<Self, ViewerError> {
        Ok(DatasetKey {
            pair: MotionPair::from_prefix(stem)?,
            stem: stem.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// ComparisonMatrix
// ---------------------------------------------------------------------------

/// Rectangular, non-empty grid of values, stored row-major.
///
/// Rows are samples of the first motion, columns samples of the second.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl ComparisonMatrix {
    /// Build from parsed rows, rejecting empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, String> {
        let n_cols = match rows.first() {
            Some(r) if !r.is_empty() => r.len(),
            _ => return Err("matrix is empty".to_string()),
        };
        let n_rows = rows.len();
        let mut values = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(format!(
                    "row {} has {} values, expected {n_cols}",
                    i + 1,
                    row.len()
                ));
            }
            values.extend(row);
        }
        Ok(ComparisonMatrix {
            rows: n_rows,
            cols: n_cols,
            values,
        })
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.values[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

// ---------------------------------------------------------------------------
// ReferenceMarks
// ---------------------------------------------------------------------------

/// Aligned coordinate columns into the matrix index space.
///
/// Coordinates may be fractional or out of range; they are plotted as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceMarks {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl ReferenceMarks {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, String> {
        if xs.len() != ys.len() {
            return Err(format!(
                "mark columns differ in length ({} vs {})",
                xs.len(),
                ys.len()
            ));
        }
        Ok(ReferenceMarks { xs, ys })
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.xs.iter().zip(&self.ys).map(|(&x, &y)| [x, y])
    }
}

// ---------------------------------------------------------------------------
// DisplayDomain
// ---------------------------------------------------------------------------

/// Value range mapped onto the colormap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayDomain {
    pub min: f64,
    pub max: f64,
}

impl DisplayDomain {
    /// Position of `value` inside the domain, clamped to `0.0 ..= 1.0`.
    ///
    /// A degenerate domain maps everything to `0.0`.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if !(span > 0.0) {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

// ---------------------------------------------------------------------------
// MotionPairDataset – everything one scene needs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MotionPairDataset {
    pub key: DatasetKey,
    pub matrix: ComparisonMatrix,
    pub marks: ReferenceMarks,
    pub domain: DisplayDomain,
}

impl MotionPairDataset {
    pub fn pair(&self) -> &MotionPair {
        &self.key.pair
    }
}
