use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Every way loading or identifying a motion pair can fail.
///
/// All of these come from static input defects, so nothing is retried.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// An expected file or directory is missing or unreadable.
    #[error("data not found at {}: {source}", .path.display())]
    DatasetNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but its contents break a shape invariant.
    #[error("malformed data in {}: {reason}", .path.display())]
    MalformedDataset { path: PathBuf, reason: String },

    /// A file name or explicit name does not yield two motion names.
    #[error("cannot derive a motion pair from '{name}': {reason}")]
    MalformedPairName { name: String, reason: String },
}

/// Coarse error category, used in batch summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    DatasetNotFound,
    MalformedDataset,
    MalformedPairName,
}

impl ViewerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ViewerError::DatasetNotFound { .. } => ErrorKind::DatasetNotFound,
            ViewerError::MalformedDataset { .. } => ErrorKind::MalformedDataset,
            ViewerError::MalformedPairName { .. } => ErrorKind::MalformedPairName,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ViewerError::MalformedDataset {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn pair_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ViewerError::MalformedPairName {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        let err = ViewerError::DatasetNotFound {
            path: PathBuf::from("missing.hm"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(err.kind(), ErrorKind::DatasetNotFound);
        assert_eq!(
            ViewerError::malformed("a.hm", "ragged").kind(),
            ErrorKind::MalformedDataset
        );
        assert_eq!(
            ViewerError::pair_name("ab", "no delimiter").kind(),
            ErrorKind::MalformedPairName
        );
    }

    #[test]
    fn messages_name_the_offending_input() {
        let err = ViewerError::malformed("dir/a_b.hm", "row 2 has 3 values, expected 2");
        let msg = err.to_string();
        assert!(msg.contains("dir/a_b.hm"));
        assert!(msg.contains("row 2 has 3 values"));
    }
}
