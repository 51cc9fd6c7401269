use std::collections::HashSet;
use std::path::Path;

use super::naming::NamingConvention;
use crate::error::ViewerError;

/// Distinct dataset stems in `dir` for the given convention.
///
/// A stem seen through both its matrix and its marks file is listed once.
/// Entries are visited in name order, so the result does not depend on the
/// platform's directory listing order.
pub fn discover_stems(
    dir: &Path,
    convention: &dyn NamingConvention,
) -> Result<Vec<String>, ViewerError> {
    let not_found = |source| ViewerError::DatasetNotFound {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(not_found)? {
        let entry = entry.map_err(not_found)?;
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }
        // Non UTF-8 names cannot carry motion names.
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    names.sort();

    let mut seen = HashSet::new();
    let stems: Vec<String> = names
        .iter()
        .filter_map(|name| convention.stem_of(name))
        .filter(|stem| seen.insert(stem.to_string()))
        .map(str::to_string)
        .collect();

    log::info!(
        "Found {} candidate pair(s) in {}",
        stems.len(),
        dir.display()
    );
    Ok(stems)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::DatasetKey;
    use crate::data::naming::{PairExtension, SuffixedText};
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) {
        std::fs::write(dir.path().join(name), "0 0\n").unwrap();
    }

    #[test]
    fn each_pair_is_listed_once() {
        let dir = TempDir::new().unwrap();
        for name in [
            "c_d__refFrames.txt",
            "a_b__heatmap.txt",
            "c_d__heatmap.txt",
            "a_b__refFrames.txt",
        ] {
            touch(&dir, name);
        }

        let stems = discover_stems(dir.path(), &SuffixedText).unwrap();
        assert_eq!(stems, vec!["a_b", "c_d"]);

        let pairs: Vec<_> = stems
            .iter()
            .map(|s| DatasetKey::from_stem(s).unwrap().pair)
            .collect();
        assert_eq!((pairs[0].first(), pairs[0].second()), ("a", "b"));
        assert_eq!((pairs[1].first(), pairs[1].second()), ("c", "d"));
    }

    #[test]
    fn foreign_files_and_directories_are_skipped() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "x_y.hm");
        touch(&dir, "readme.md");
        touch(&dir, "a_b__heatmap.txt");
        std::fs::create_dir(dir.path().join("z_w.hm")).unwrap();

        let stems = discover_stems(dir.path(), &PairExtension).unwrap();
        assert_eq!(stems, vec!["x_y"]);
    }

    #[test]
    fn missing_directory_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = discover_stems(&dir.path().join("nope"), &PairExtension).unwrap_err();
        assert!(matches!(err, ViewerError::DatasetNotFound { .. }));
    }
}
