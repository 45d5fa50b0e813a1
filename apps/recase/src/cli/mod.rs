//! CLI command handling for recase

mod replace;
mod text;

use anyhow::Context;
use clap::{Parser, Subcommand};
use recase_config::RecaseConfig;
use recase_core::CaseStyle;
use std::path::PathBuf;

pub use replace::ReplaceArgs;

/// The main CLI struct.
#[derive(Parser)]
#[command(name = "recase")]
#[command(about = "Find and replace text across files, keeping each match's case style")]
#[command(version)]
pub struct Cli {
    /// The command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// The available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Replace text in files (dry run unless --write is given)
    ///
    /// Examples:
    ///   recase replace user_name account_id src/ --preserve-case
    ///   recase replace 'get_(\w+)' 'fetch_$1' --regex --write
    Replace(ReplaceArgs),

    /// Expand $name and ${name} references in a file or stdin
    Expand {
        /// Variable definition (NAME=VALUE), repeatable
        #[arg(long = "var", value_name = "NAME=VALUE", value_parser = text::parse_var)]
        vars: Vec<(String, String)>,

        /// Also take variables from the process environment (--var wins)
        #[arg(long)]
        env: bool,

        /// File to expand (reads stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Render text in a case style
    Case {
        /// Target style (lower, upper, camel, lower-camel, kebab, screaming-kebab, snake,
        /// screaming-snake)
        style: CaseStyle,

        /// Text to render, one result per line
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Print the detected case style of each token
    Detect {
        /// Tokens to classify, one result per line
        #[arg(required = true)]
        text: Vec<String>,
    },
}

pub async fn run() -> anyhow::Result<()> {
    // Parse CLI arguments first
    let cli = Cli::parse();

    let root = std::env::current_dir().context("Failed to resolve the working directory")?;
    let config = RecaseConfig::load(&root).context("Failed to load configuration")?;
    recase_config::logging::initialize(&config.logging);

    match cli.command {
        Commands::Replace(args) => replace::execute(args, &config).await,
        Commands::Expand { vars, env, file } => text::expand(vars, env, file).await,
        Commands::Case { style, text } => {
            text::render_case(style, &text);
            Ok(())
        }
        Commands::Detect { text } => {
            text::detect(&text);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_case_command() {
        let cli = Cli::try_parse_from(["recase", "case", "screaming-snake", "userName"]).unwrap();
        match cli.command {
            Commands::Case { style, text } => {
                assert_eq!(style, CaseStyle::ScreamingSnake);
                assert_eq!(text, vec!["userName".to_string()]);
            }
            _ => panic!("expected case command"),
        }
    }

    #[test]
    fn test_unknown_style_is_rejected() {
        assert!(Cli::try_parse_from(["recase", "case", "wavy", "x"]).is_err());
    }
}
