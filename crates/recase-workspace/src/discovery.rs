//! Discovery of candidate files
//!
//! Targets may be files or directories. Directories are walked with the `ignore` crate, so
//! `.gitignore` rules apply. Every discovered file is filtered through the include and
//! exclude globs, then checked against the size ceiling and for binary content before
//! the matcher sees its text.

use crate::error::{WorkspaceError, WorkspaceResult};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Files larger than this are skipped unless `no_limit` is set
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// A walk that finds more files than this is aborted
pub const DEFAULT_MAX_FILE_COUNT: usize = 1_000_000;

/// How much of a file is inspected when deciding whether it is text
const SNIFF_LEN: usize = 8 * 1024;

/// Which files a walk considers and how it treats them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Glob patterns a file must match (any of them), when non-empty
    pub include: Vec<String>,
    /// Glob patterns that reject a file
    pub exclude: Vec<String>,
    /// Consider dot-files and dot-directories
    pub include_hidden: bool,
    /// Descend into subdirectories of directory targets
    pub recurse: bool,
    /// Skip the file size ceiling
    pub no_limit: bool,
    /// Skip the binary extension and content checks
    ///
    /// A file must still be valid UTF-8 to reach the matcher; anything else is reported
    /// as a binary file.
    pub binary_as_text: bool,
    pub max_file_size: u64,
    pub max_file_count: usize,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            include_hidden: false,
            recurse: true,
            no_limit: false,
            binary_as_text: false,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_file_count: DEFAULT_MAX_FILE_COUNT,
        }
    }
}

/// Outcome of a completed walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Every file considered, in walk order
    pub files: Vec<PathBuf>,
    /// The files the matcher accepted
    pub matches: Vec<PathBuf>,
}

/// Include/exclude glob filter
///
/// With no patterns at all every path is allowed. An exclude match always rejects.
/// Otherwise a path is allowed when there are no include patterns or one of them matches.
/// Patterns are tried against the whole (relative) path and against the file name alone.
#[derive(Debug, Clone, Default)]
pub struct ScopeFilter {
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
}

impl ScopeFilter {
    pub fn new(include: &[String], exclude: &[String]) -> WorkspaceResult<Self> {
        Ok(Self {
            include: build_globset(include)?,
            exclude: build_globset(exclude)?,
        })
    }

    pub fn is_included(&self, path: &Path) -> bool {
        if self
            .exclude
            .as_ref()
            .is_some_and(|exclude| set_matches(exclude, path))
        {
            return false;
        }

        match &self.include {
            None => true,
            Some(include) => set_matches(include, path),
        }
    }
}

fn build_globset(patterns: &[String]) -> WorkspaceResult<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).map_err(|e| WorkspaceError::invalid_glob(pattern, e.to_string()))?;
        builder.add(glob);
    }
    let set = builder
        .build()
        .map_err(|e| WorkspaceError::invalid_glob(patterns.join(", "), e.to_string()))?;
    Ok(Some(set))
}

fn set_matches(set: &GlobSet, path: &Path) -> bool {
    set.is_match(path) || path.file_name().is_some_and(|name| set.is_match(name))
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.') && name != "." && name != "..")
}

/// Extensions that are never treated as text
fn has_binary_extension(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    matches!(
        ext.as_str(),
        "png"
            | "jpg"
            | "jpeg"
            | "gif"
            | "ico"
            | "webp"
            | "avif"
            | "bmp"
            | "woff"
            | "woff2"
            | "ttf"
            | "otf"
            | "eot"
            | "zip"
            | "tar"
            | "gz"
            | "rar"
            | "7z"
            | "mp3"
            | "mp4"
            | "webm"
            | "wav"
            | "avi"
            | "mov"
            | "glb"
            | "pdf"
            | "exe"
            | "dll"
            | "so"
            | "dylib"
            | "wasm"
    )
}

/// True when the start of `data` holds a NUL byte or is not valid UTF-8
///
/// A multi-byte character cut off by the end of the inspected window does not count.
pub fn looks_binary(data: &[u8]) -> bool {
    let window = &data[..data.len().min(SNIFF_LEN)];
    if memchr::memchr(0, window).is_some() {
        return true;
    }
    match std::str::from_utf8(window) {
        Ok(_) => false,
        Err(e) => e.error_len().is_some(),
    }
}

/// Collect the unique files under `targets` allowed by the hidden-file rule and the globs
///
/// # Errors
///
/// Fails on an invalid glob pattern or when walking a directory fails.
pub fn find_all_included(
    targets: &[PathBuf],
    options: &DiscoveryOptions,
) -> WorkspaceResult<Vec<PathBuf>> {
    let filter = ScopeFilter::new(&options.include, &options.exclude)?;
    let mut seen = HashSet::new();
    let mut found = Vec::new();

    for target in targets {
        if target.is_file() {
            if !options.include_hidden && is_hidden(target) {
                continue;
            }
            if seen.insert(target.clone()) && filter.is_included(target) {
                found.push(target.clone());
            }
        } else if target.is_dir() {
            let mut walker = WalkBuilder::new(target);
            walker
                .hidden(!options.include_hidden)
                .git_ignore(true)
                .require_git(false)
                .sort_by_file_name(|a, b| a.cmp(b));
            if !options.recurse {
                walker.max_depth(Some(1));
            }

            for entry in walker.build() {
                let entry = entry?;
                if !entry.file_type().is_some_and(|kind| kind.is_file()) {
                    continue;
                }

                let path = entry.path();
                // Globs work on paths relative to the walked directory
                let relative = path.strip_prefix(target).unwrap_or(path);
                if seen.insert(path.to_path_buf()) && filter.is_included(relative) {
                    found.push(path.to_path_buf());
                }
            }
        } else {
            warn!(target = %target.display(), "Target is neither a file nor a directory");
        }
    }

    debug!(files_count = found.len(), "Discovered candidate files");
    Ok(found)
}

/// Walk `targets`, running `matcher` over the text of every eligible file
///
/// `observer` is called once per file with whether it matched and, for files that were
/// skipped or could not be read, the reason. Per-file failures never stop the walk.
///
/// # Errors
///
/// Returns [`WorkspaceError::TooManyFiles`] as soon as more than `max_file_count` files
/// have been found, plus the errors of [`find_all_included`].
pub fn find_all_matching<M, O>(
    targets: &[PathBuf],
    options: &DiscoveryOptions,
    mut matcher: M,
    mut observer: O,
) -> WorkspaceResult<Discovery>
where
    M: FnMut(&str) -> bool,
    O: FnMut(&Path, bool, Option<&WorkspaceError>),
{
    let mut discovery = Discovery::default();

    for path in find_all_included(targets, options)? {
        discovery.files.push(path.clone());
        if discovery.files.len() > options.max_file_count {
            warn!(limit = options.max_file_count, "Too many files, aborting walk");
            return Err(WorkspaceError::TooManyFiles {
                limit: options.max_file_count,
            });
        }

        match match_file(&path, options, &mut matcher) {
            Ok(matched) => {
                if matched {
                    discovery.matches.push(path.clone());
                }
                observer(&path, matched, None);
            }
            Err(err) => {
                debug!(file_path = %path.display(), error = %err, "Skipping file");
                observer(&path, false, Some(&err));
            }
        }
    }

    info!(
        files = discovery.files.len(),
        matches = discovery.matches.len(),
        "Discovery complete"
    );
    Ok(discovery)
}

fn match_file<M>(path: &Path, options: &DiscoveryOptions, matcher: &mut M) -> WorkspaceResult<bool>
where
    M: FnMut(&str) -> bool,
{
    if !options.no_limit {
        let size = std::fs::metadata(path)
            .map_err(|e| WorkspaceError::io(path, e))?
            .len();
        if size > options.max_file_size {
            return Err(WorkspaceError::LargeFile {
                path: path.to_path_buf(),
                size,
                limit: options.max_file_size,
            });
        }
    }

    if !options.binary_as_text && has_binary_extension(path) {
        return Err(WorkspaceError::BinaryFile {
            path: path.to_path_buf(),
        });
    }

    let data = std::fs::read(path).map_err(|e| WorkspaceError::io(path, e))?;
    if !options.binary_as_text && looks_binary(&data) {
        return Err(WorkspaceError::BinaryFile {
            path: path.to_path_buf(),
        });
    }

    // Substitutions rewrite the file as text, so undecodable bytes are never matched
    let text = String::from_utf8(data).map_err(|_| WorkspaceError::BinaryFile {
        path: path.to_path_buf(),
    })?;
    Ok(matcher(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(globs: &[&str]) -> Vec<String> {
        globs.iter().map(|g| g.to_string()).collect()
    }

    #[test]
    fn test_no_constraints_allows_everything() {
        let filter = ScopeFilter::new(&[], &[]).unwrap();
        assert!(filter.is_included(Path::new("src/main.rs")));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let filter = ScopeFilter::new(&patterns(&["**/*.rs"]), &patterns(&["**/target/**"])).unwrap();
        assert!(filter.is_included(Path::new("src/lib.rs")));
        assert!(!filter.is_included(Path::new("target/debug/build.rs")));
        assert!(!filter.is_included(Path::new("README.md")));
    }

    #[test]
    fn test_exclude_only() {
        let filter = ScopeFilter::new(&[], &patterns(&["*.lock"])).unwrap();
        assert!(!filter.is_included(Path::new("nested/Cargo.lock")));
        assert!(filter.is_included(Path::new("nested/Cargo.toml")));
    }

    #[test]
    fn test_file_name_matching() {
        let filter = ScopeFilter::new(&patterns(&["Makefile"]), &[]).unwrap();
        assert!(filter.is_included(Path::new("deep/dir/Makefile")));
    }

    #[test]
    fn test_invalid_glob() {
        let err = ScopeFilter::new(&patterns(&["a[b"]), &[]).unwrap_err();
        assert!(matches!(err, WorkspaceError::InvalidGlob { ref pattern, .. } if pattern == "a[b"));
    }

    #[test]
    fn test_hidden_names() {
        assert!(is_hidden(Path::new("dir/.env")));
        assert!(!is_hidden(Path::new("dir/env")));
        assert!(!is_hidden(Path::new("..")));
    }

    #[test]
    fn test_binary_sniffing() {
        assert!(!looks_binary(b"plain text\n"));
        assert!(looks_binary(b"GIF89a\0\0"));
        assert!(looks_binary(&[0xff, 0xfe, b'a']));
        assert!(!looks_binary("héllo".as_bytes()));

        // A character split by the end of the window is still text
        let mut data = vec![b'a'; SNIFF_LEN - 1];
        data.extend_from_slice("é".as_bytes());
        assert!(!looks_binary(&data));
    }

    #[test]
    fn test_binary_extensions() {
        assert!(has_binary_extension(Path::new("logo.PNG")));
        assert!(!has_binary_extension(Path::new("main.rs")));
        assert!(!has_binary_extension(Path::new("Makefile")));
    }

    #[test]
    fn test_default_limits() {
        let options = DiscoveryOptions::default();
        assert_eq!(options.max_file_size, 5 * 1024 * 1024);
        assert_eq!(options.max_file_count, 1_000_000);
        assert!(options.recurse);
    }
}
