//! File content processing
//!
//! Reads a file in full, runs a substitution over its text, and keeps both versions so
//! the caller can show a diff or write the result back.

use crate::error::{WorkspaceError, WorkspaceResult};
use recase_core::{Replaced, Replacer};
use similar::TextDiff;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The result of running a substitution over one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: PathBuf,
    pub original: String,
    pub modified: String,
    /// Number of substitutions made
    pub count: usize,
}

impl FileChange {
    pub fn is_modified(&self) -> bool {
        self.count > 0
    }

    /// Unified diff from `original` to `modified`, empty when the text did not change
    pub fn diff(&self) -> String {
        if self.original == self.modified {
            return String::new();
        }

        let name = self.path.display();
        TextDiff::from_lines(&self.original, &self.modified)
            .unified_diff()
            .context_radius(3)
            .header(&format!("a/{name}"), &format!("b/{name}"))
            .to_string()
    }

    /// Persist `modified` over the file, returning whether anything was written
    pub async fn write(&self) -> WorkspaceResult<bool> {
        if !self.is_modified() {
            return Ok(false);
        }

        tokio::fs::write(&self.path, &self.modified)
            .await
            .map_err(|e| WorkspaceError::io(&self.path, e))?;
        debug!(file_path = %self.path.display(), count = self.count, "Wrote file");
        Ok(true)
    }
}

/// Read `path` and run `substitute` over its contents
///
/// # Errors
///
/// Returns [`WorkspaceError::Io`] when the file cannot be read and
/// [`WorkspaceError::BinaryFile`] when its contents are not valid UTF-8.
pub async fn process_file<F>(path: impl AsRef<Path>, substitute: F) -> WorkspaceResult<FileChange>
where
    F: for<'t> FnOnce(&'t str) -> Replaced<'t>,
{
    let path = path.as_ref();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| WorkspaceError::io(path, e))?;
    let original = String::from_utf8(bytes).map_err(|_| WorkspaceError::BinaryFile {
        path: path.to_path_buf(),
    })?;

    let (modified, count) = substitute(&original).into_owned();
    debug!(file_path = %path.display(), count, "Processed file");

    Ok(FileChange {
        path: path.to_path_buf(),
        original,
        modified,
        count,
    })
}

/// Run `replacer` over the contents of `path`
pub async fn replace_in_file(
    replacer: &Replacer,
    path: impl AsRef<Path>,
) -> WorkspaceResult<FileChange> {
    process_file(path, |text| replacer.apply(text)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use recase_core::{replace_literal, ReplaceMode};
    use tempfile::TempDir;

    const TESTING_MD: &str = "# Testing\n\nThe quick brown fox.\nthe lazy dog.\n";

    fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_process_file_reports_counts() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, "testing.md", TESTING_MD);

        let change = process_file(&path, |text| replace_literal("the", "THE", text))
            .await
            .unwrap();

        assert_eq!(change.original, TESTING_MD);
        assert_eq!(change.modified, "# Testing\n\nThe quick brown fox.\nTHE lazy dog.\n");
        assert_eq!(change.count, 1);
        assert!(change.is_modified());
    }

    #[tokio::test]
    async fn test_diff_is_unified() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, "testing.md", TESTING_MD);
        let replacer = Replacer::new(ReplaceMode::Preserve, "the", "this").unwrap();

        let change = replace_in_file(&replacer, &path).await.unwrap();
        assert_eq!(change.count, 2);

        let diff = change.diff();
        assert!(diff.contains(&format!("--- a/{}", path.display())));
        assert!(diff.contains(&format!("+++ b/{}", path.display())));
        assert!(diff.contains("-The quick brown fox.\n"));
        assert!(diff.contains("+This quick brown fox.\n"));
        assert!(diff.contains("+this lazy dog.\n"));
    }

    #[tokio::test]
    async fn test_unchanged_file_has_empty_diff_and_is_not_written() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, "testing.md", TESTING_MD);
        let replacer = Replacer::new(ReplaceMode::Literal, "absent", "x").unwrap();

        let change = replace_in_file(&replacer, &path).await.unwrap();
        assert_eq!(change.count, 0);
        assert_eq!(change.modified, change.original);
        assert!(change.diff().is_empty());
        assert!(!change.write().await.unwrap());
    }

    #[tokio::test]
    async fn test_write_persists_modified_text() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, "testing.md", TESTING_MD);
        let replacer = Replacer::new(ReplaceMode::Regex, "(?i)the", "THE").unwrap();

        let change = replace_in_file(&replacer, &path).await.unwrap();
        assert!(change.write().await.unwrap());

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "# Testing\n\nTHE quick brown fox.\nTHE lazy dog.\n");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.md");

        let err = process_file(&missing, |text| replace_literal("a", "b", text))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkspaceError::Io { ref path, .. } if path == &missing));
    }

    #[tokio::test]
    async fn test_undecodable_file_is_binary() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin1.txt");
        std::fs::write(&path, b"caf\xe9 user_name\n").unwrap();

        let err = process_file(&path, |text| replace_literal("user_name", "id", text))
            .await
            .unwrap_err();
        assert!(err.is_binary_file());
        assert_eq!(std::fs::read(&path).unwrap(), b"caf\xe9 user_name\n");
    }
}
