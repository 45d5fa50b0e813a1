//! The `replace` command: discover, substitute, then diff or write

use anyhow::Context;
use clap::{Args, ValueEnum};
use recase_config::RecaseConfig;
use recase_core::{ReplaceMode, Replacer};
use recase_workspace::{find_all_matching, replace_in_file, DiscoveryOptions, WorkspaceError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Unified diffs followed by a summary line
    #[default]
    Text,
    /// A single JSON summary object
    Json,
}

#[derive(Debug, Args)]
pub struct ReplaceArgs {
    /// Text (or regular expression with --regex) to search for
    pub search: String,

    /// Replacement text; `$1` and `${name}` refer to captures with --regex
    pub replace: String,

    /// Files or directories to process (defaults to the current directory)
    pub paths: Vec<PathBuf>,

    /// Treat SEARCH as a regular expression
    #[arg(long)]
    pub regex: bool,

    /// Apply the regular expression to each line separately
    #[arg(long, requires = "regex", conflicts_with = "preserve_case")]
    pub lines: bool,

    /// Match regardless of case
    #[arg(short = 'i', long)]
    pub ignore_case: bool,

    /// Match regardless of case and render the replacement in each match's case style
    #[arg(short = 'p', long)]
    pub preserve_case: bool,

    /// Write the changes instead of printing diffs
    #[arg(short = 'w', long)]
    pub write: bool,

    /// Only process files matching this glob (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub include: Vec<String>,

    /// Skip files matching this glob, in addition to the configured excludes (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Include dot-files and dot-directories
    #[arg(long)]
    pub hidden: bool,

    /// Do not descend into subdirectories
    #[arg(long)]
    pub no_recurse: bool,

    /// Process files regardless of size
    #[arg(long)]
    pub no_limit: bool,

    /// Process binary files as text
    #[arg(long)]
    pub binary_as_text: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl ReplaceArgs {
    /// The engine the flags select
    fn mode(&self) -> ReplaceMode {
        match (self.regex, self.lines, self.preserve_case, self.ignore_case) {
            // clap rejects --lines together with --preserve-case
            (true, _, true, _) => ReplaceMode::RegexPreserve,
            (true, true, false, _) => ReplaceMode::RegexLines,
            (true, false, false, _) => ReplaceMode::Regex,
            (false, _, true, _) => ReplaceMode::Preserve,
            (false, _, false, true) => ReplaceMode::Insensitive,
            (false, _, false, false) => ReplaceMode::Literal,
        }
    }

    /// The search text handed to the engine
    fn pattern(&self) -> String {
        // The plain regex engines honour inline flags only
        if self.regex && self.ignore_case && !self.preserve_case {
            format!("(?i){}", self.search)
        } else {
            self.search.clone()
        }
    }

    fn targets(&self) -> Vec<PathBuf> {
        if self.paths.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.paths.clone()
        }
    }

    /// Overlay the command-line scope flags on the configured options
    fn discovery_options(&self, config: &RecaseConfig) -> DiscoveryOptions {
        let mut options = config.discovery_options();
        if !self.include.is_empty() {
            options.include = self.include.clone();
        }
        options.exclude.extend(self.exclude.iter().cloned());
        options.include_hidden |= self.hidden;
        options.recurse &= !self.no_recurse;
        options.no_limit = self.no_limit;
        options.binary_as_text |= self.binary_as_text;
        options
    }
}

/// Summary of a replace run
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyResult {
    pub success: bool,
    pub files_scanned: usize,
    pub files_modified: Vec<String>,
    pub matches_found: usize,
    pub matches_replaced: usize,
    pub dry_run: bool,
}

pub async fn execute(args: ReplaceArgs, config: &RecaseConfig) -> anyhow::Result<()> {
    let mode = args.mode();
    let replacer = Replacer::new(mode, args.pattern(), args.replace.clone())
        .context("Invalid search pattern")?;
    let options = args.discovery_options(config);
    let targets = args.targets();

    info!(
        mode = %mode,
        search = %args.search,
        targets = targets.len(),
        dry_run = !args.write,
        "Starting replace"
    );

    // Discovery reads files synchronously
    let matcher = replacer.clone();
    let discovery = tokio::task::spawn_blocking(move || {
        find_all_matching(
            &targets,
            &options,
            |text| matcher.is_match(text),
            report_discovery,
        )
    })
    .await
    .context("Discovery task failed")??;

    let mut result = ApplyResult {
        success: true,
        files_scanned: discovery.files.len(),
        dry_run: !args.write,
        ..ApplyResult::default()
    };

    for path in &discovery.matches {
        let change = match replace_in_file(&replacer, path).await {
            Ok(change) => change,
            Err(e) => {
                warn!(file_path = %path.display(), error = %e, "Failed to process file");
                result.success = false;
                continue;
            }
        };

        if !change.is_modified() {
            continue;
        }

        if args.write {
            if let Err(e) = change.write().await {
                warn!(file_path = %path.display(), error = %e, "Failed to write file");
                result.success = false;
                continue;
            }
            result.matches_replaced += change.count;
        } else if args.format == OutputFormat::Text {
            print!("{}", change.diff());
        }

        result.matches_found += change.count;
        result.files_modified.push(path.display().to_string());
    }

    info!(
        files_scanned = result.files_scanned,
        files_modified = result.files_modified.len(),
        matches_found = result.matches_found,
        "Replace completed"
    );

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => println!("{}", summary(&result)),
    }

    Ok(())
}

fn report_discovery(path: &Path, matched: bool, err: Option<&WorkspaceError>) {
    match err {
        Some(e) if e.is_binary_file() || e.is_large_file() => {
            debug!(file_path = %path.display(), reason = %e, "Skipped file")
        }
        Some(e) => warn!(file_path = %path.display(), error = %e, "Skipped file"),
        None if matched => debug!(file_path = %path.display(), "Matched file"),
        None => {}
    }
}

fn summary(result: &ApplyResult) -> String {
    let files = result.files_modified.len();
    if result.dry_run {
        format!(
            "{} match(es) in {} of {} file(s) (dry run, pass --write to apply)",
            result.matches_found, files, result.files_scanned
        )
    } else {
        format!(
            "Replaced {} match(es) in {} of {} file(s)",
            result.matches_replaced, files, result.files_scanned
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: ReplaceArgs,
    }

    fn parse(argv: &[&str]) -> ReplaceArgs {
        let mut full = vec!["replace"];
        full.extend_from_slice(argv);
        Harness::try_parse_from(full).unwrap().args
    }

    #[test]
    fn test_mode_selection() {
        assert_eq!(parse(&["a", "b"]).mode(), ReplaceMode::Literal);
        assert_eq!(parse(&["a", "b", "-i"]).mode(), ReplaceMode::Insensitive);
        assert_eq!(parse(&["a", "b", "-p"]).mode(), ReplaceMode::Preserve);
        assert_eq!(parse(&["a", "b", "-p", "-i"]).mode(), ReplaceMode::Preserve);
        assert_eq!(parse(&["a", "b", "--regex"]).mode(), ReplaceMode::Regex);
        assert_eq!(
            parse(&["a", "b", "--regex", "--lines"]).mode(),
            ReplaceMode::RegexLines
        );
        assert_eq!(
            parse(&["a", "b", "--regex", "-p"]).mode(),
            ReplaceMode::RegexPreserve
        );
    }

    #[test]
    fn test_lines_requires_regex() {
        assert!(Harness::try_parse_from(["replace", "a", "b", "--lines"]).is_err());
    }

    #[test]
    fn test_lines_conflicts_with_preserve_case() {
        let err = Harness::try_parse_from(["replace", "a", "b", "--regex", "--lines", "-p"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_ignore_case_regex_gets_inline_flag() {
        assert_eq!(parse(&["a+", "b", "--regex", "-i"]).pattern(), "(?i)a+");
        assert_eq!(parse(&["a+", "b", "--regex", "-i", "-p"]).pattern(), "a+");
        assert_eq!(parse(&["a+", "b", "-i"]).pattern(), "a+");
    }

    #[test]
    fn test_flags_overlay_configuration() {
        let mut config = RecaseConfig::default();
        config.scope.include = vec!["**/*.md".to_string()];
        let configured_excludes = config.scope.exclude.len();

        let args = parse(&[
            "a",
            "b",
            "--include",
            "**/*.rs",
            "--exclude",
            "**/gen/**",
            "--hidden",
            "--no-recurse",
        ]);
        let options = args.discovery_options(&config);

        assert_eq!(options.include, vec!["**/*.rs".to_string()]);
        assert_eq!(options.exclude.len(), configured_excludes + 1);
        assert!(options.include_hidden);
        assert!(!options.recurse);
        assert!(!options.no_limit);
    }

    #[test]
    fn test_default_target_is_current_directory() {
        assert_eq!(parse(&["a", "b"]).targets(), vec![PathBuf::from(".")]);
    }

    #[test]
    fn test_apply_result_is_camel_case() {
        let value = serde_json::to_value(ApplyResult {
            success: true,
            files_scanned: 3,
            dry_run: true,
            ..ApplyResult::default()
        })
        .unwrap();
        assert_eq!(value["filesScanned"], 3);
        assert_eq!(value["dryRun"], true);
        assert!(value["filesModified"].as_array().unwrap().is_empty());
    }
}
