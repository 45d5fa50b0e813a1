//! Commands that work on text given on the command line or stdin

use anyhow::Context;
use recase_core::{expand_vars, CaseStyle};
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

/// Parse a `NAME=VALUE` argument
pub fn parse_var(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, _)) if name.is_empty() => Err(format!("Missing variable name in '{s}'")),
        Some((name, value)) => Ok((name.to_string(), value.to_string())),
        None => Err(format!("Expected NAME=VALUE, got '{s}'")),
    }
}

fn variables(defined: Vec<(String, String)>, from_env: bool) -> HashMap<String, String> {
    let mut vars: HashMap<String, String> = if from_env {
        std::env::vars().collect()
    } else {
        HashMap::new()
    };
    vars.extend(defined);
    vars
}

pub async fn expand(
    defined: Vec<(String, String)>,
    from_env: bool,
    file: Option<PathBuf>,
) -> anyhow::Result<()> {
    let text = match file {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read stdin")?;
            buf
        }
    };

    let vars = variables(defined, from_env);
    print!("{}", expand_vars(&text, &vars));
    Ok(())
}

pub fn render_case(style: CaseStyle, tokens: &[String]) {
    for token in tokens {
        println!("{}", style.apply(token));
    }
}

pub fn detect(tokens: &[String]) {
    for token in tokens {
        println!("{}", style_label(CaseStyle::detect(token)));
    }
}

fn style_label(style: CaseStyle) -> &'static str {
    match style {
        CaseStyle::Unknown => "unknown",
        known => known.name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var() {
        assert_eq!(
            parse_var("HOME=/home/me").unwrap(),
            ("HOME".to_string(), "/home/me".to_string())
        );
        assert_eq!(
            parse_var("EMPTY=").unwrap(),
            ("EMPTY".to_string(), String::new())
        );
        assert_eq!(
            parse_var("EQ=a=b").unwrap(),
            ("EQ".to_string(), "a=b".to_string())
        );
        assert!(parse_var("novalue").is_err());
        assert!(parse_var("=x").is_err());
    }

    #[test]
    fn test_defined_vars_win_over_environment() {
        let vars = variables(vec![("PATH".to_string(), "override".to_string())], true);
        assert_eq!(vars["PATH"], "override");
        assert!(variables(Vec::new(), false).is_empty());
    }

    #[test]
    fn test_unknown_style_label() {
        assert_eq!(style_label(CaseStyle::Unknown), "unknown");
        assert_eq!(style_label(CaseStyle::Snake), CaseStyle::Snake.name());
    }
}
