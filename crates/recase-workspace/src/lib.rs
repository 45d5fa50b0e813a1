//! Filesystem collaborators for the recase engines
//!
//! The engines in `recase-core` never touch the filesystem. This crate finds the files
//! to work on ([`discovery`]) and runs a substitution over a file's contents ([`file`]).

pub mod discovery;
pub mod error;
pub mod file;

pub use discovery::{
    find_all_included, find_all_matching, looks_binary, Discovery, DiscoveryOptions,
    ScopeFilter, DEFAULT_MAX_FILE_COUNT, DEFAULT_MAX_FILE_SIZE,
};
pub use error::{WorkspaceError, WorkspaceResult};
pub use file::{process_file, replace_in_file, FileChange};
