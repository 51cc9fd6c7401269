use std::fmt::Debug;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Naming conventions
// ---------------------------------------------------------------------------

/// The two on-disk artifacts of one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub matrix: PathBuf,
    pub marks: PathBuf,
}

/// Maps a file stem to artifact paths and back.
///
/// A loader holds exactly one convention, so two schemes are never mixed
/// within one run.
pub trait NamingConvention: Debug {
    /// Suffix appended to the stem for the matrix file.
    fn matrix_suffix(&self) -> &'static str;

    /// Suffix appended to the stem for the marks file.
    fn marks_suffix(&self) -> &'static str;

    fn resolve(&self, dir: &Path, stem: &str) -> DatasetPaths {
        DatasetPaths {
            matrix: dir.join(format!("{stem}{}", self.matrix_suffix())),
            marks: dir.join(format!("{stem}{}", self.marks_suffix())),
        }
    }

    /// Stem of `file_name` if it is one of this convention's artifacts.
    fn stem_of<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        [self.matrix_suffix(), self.marks_suffix()]
            .into_iter()
            .find_map(|suffix| file_name.strip_suffix(suffix))
            .filter(|stem| !stem.is_empty())
    }
}

/// `<m1>_<m2>.hm` + `<m1>_<m2>.ref`
#[derive(Debug, Clone, Copy, Default)]
pub struct PairExtension;

impl NamingConvention for PairExtension {
    fn matrix_suffix(&self) -> &'static str {
        ".hm"
    }

    fn marks_suffix(&self) -> &'static str {
        ".ref"
    }
}

/// `<prefix>__heatmap.txt` + `<prefix>__refFrames.txt`
#[derive(Debug, Clone, Copy, Default)]
pub struct SuffixedText;

impl NamingConvention for SuffixedText {
    fn matrix_suffix(&self) -> &'static str {
        "__heatmap.txt"
    }

    fn marks_suffix(&self) -> &'static str {
        "__refFrames.txt"
    }
}
