//! Command-line arguments and their translation into a parser configuration.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Parser;
use sqlnode_core::{dialect_by_name, Features, IdentifierCase, ParserConfig};
use tracing::debug;

use crate::error::{CliError, Result};
use crate::report::Mode;

/// Parse SQL statements and print their syntax trees.
#[derive(Debug, Parser)]
#[command(name = "sqlnode")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// SQL text to parse (read from --file or standard input if omitted).
    #[arg(conflicts_with = "file")]
    pub sql: Option<String>,

    /// Read SQL from a file.
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Dialect preset providing the base configuration.
    #[arg(short, long, env = "SQLNODE_DIALECT", default_value = "generic")]
    pub dialect: String,

    /// JSON parser configuration; replaces the dialect preset.
    #[arg(short, long, env = "SQLNODE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable an optional grammar feature (repeatable).
    #[arg(long = "feature", value_name = "NAME", value_parser = parse_feature)]
    pub features: Vec<Features>,

    /// Casing of unquoted identifiers: upper, lower or preserve.
    #[arg(long, value_parser = parse_identifier_case)]
    pub identifier_case: Option<IdentifierCase>,

    /// Longest accepted identifier, in characters.
    #[arg(long)]
    pub max_identifier_length: Option<usize>,

    /// Print node counts instead of trees.
    #[arg(long, conflicts_with = "equivalence")]
    pub count: bool,

    /// Report whether the first two statements are equivalent.
    #[arg(long)]
    pub equivalence: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_feature(name: &str) -> std::result::Result<Features, String> {
    Features::parse_name(name).ok_or_else(|| {
        let known: Vec<_> = Features::all().names();
        format!("unknown feature '{name}' (expected one of: {})", known.join(", "))
    })
}

fn parse_identifier_case(name: &str) -> std::result::Result<IdentifierCase, String> {
    IdentifierCase::parse_name(name).ok_or_else(|| {
        format!("unknown identifier case '{name}' (expected upper, lower or preserve)")
    })
}

fn read_config_file(path: &Path) -> Result<ParserConfig> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::ConfigFile {
        path: path.to_path_buf(),
        source,
    })
}

impl Cli {
    /// Builds the parser configuration: the config file or dialect preset,
    /// then the individual overrides on top.
    ///
    /// # Errors
    ///
    /// Fails on an unknown dialect or an unreadable configuration file.
    pub fn parser_config(&self) -> Result<ParserConfig> {
        let mut config = match &self.config {
            Some(path) => {
                debug!(path = %path.display(), "loading parser configuration");
                read_config_file(path)?
            }
            None => dialect_by_name(&self.dialect)
                .ok_or_else(|| CliError::UnknownDialect(self.dialect.clone()))?
                .config(),
        };
        for feature in &self.features {
            config = config.enable(*feature);
        }
        if let Some(case) = self.identifier_case {
            config = config.with_identifier_case(case);
        }
        if let Some(max) = self.max_identifier_length {
            config = config.with_max_identifier_length(max);
        }
        Ok(config)
    }

    /// Returns the SQL text from the positional argument, the file or
    /// standard input, in that order.
    ///
    /// # Errors
    ///
    /// Fails if the file or standard input cannot be read.
    pub fn input(&self) -> Result<String> {
        if let Some(sql) = &self.sql {
            return Ok(sql.clone());
        }
        if let Some(path) = &self.file {
            return std::fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            });
        }
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(CliError::Stdin)?;
        Ok(text)
    }

    /// The output mode selected by the flags.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        if self.count {
            Mode::Count
        } else if self.equivalence {
            Mode::Equivalence
        } else {
            Mode::Tree
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sqlnode").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_default_config_is_generic() {
        let config = cli(&["SELECT 1"]).parser_config().unwrap();
        assert_eq!(config, ParserConfig::default());
    }

    #[test]
    fn test_dialect_preset() {
        let config = cli(&["--dialect", "mysql", "SELECT 1"])
            .parser_config()
            .unwrap();
        assert!(config.has(Features::INFIX_BIT_OPERATORS));
        assert_eq!(config.identifier_case, IdentifierCase::Preserve);
    }

    #[test]
    fn test_unknown_dialect() {
        let err = cli(&["--dialect", "oracle", "SELECT 1"])
            .parser_config()
            .unwrap_err();
        assert!(matches!(err, CliError::UnknownDialect(name) if name == "oracle"));
    }

    #[test]
    fn test_feature_flags_add_to_base() {
        let config = cli(&["--feature", "grouping", "--feature", "infix-bit-operators", "x"])
            .parser_config()
            .unwrap();
        assert!(config.has(Features::GROUPING | Features::INFIX_BIT_OPERATORS));
        assert!(config.has(Features::INFIX_MOD));
    }

    #[test]
    fn test_unknown_feature_is_rejected_by_clap() {
        let result = Cli::try_parse_from(["sqlnode", "--feature", "window_functions", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides() {
        let config = cli(&[
            "--identifier-case",
            "upper",
            "--max-identifier-length",
            "30",
            "x",
        ])
        .parser_config()
        .unwrap();
        assert_eq!(config.identifier_case, IdentifierCase::Upper);
        assert_eq!(config.max_identifier_length, 30);
    }

    #[test]
    fn test_config_file_replaces_dialect() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"features": ["GROUPING"], "identifier_case": "preserve"}}"#
        )
        .unwrap();
        let path = file.path().to_str().unwrap();

        let config = cli(&["--dialect", "mysql", "--config", path, "x"])
            .parser_config()
            .unwrap();
        assert_eq!(config.features, Features::GROUPING);
        assert_eq!(config.identifier_case, IdentifierCase::Preserve);
        assert_eq!(config.max_identifier_length, 128);
    }

    #[test]
    fn test_invalid_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"features": ["NOPE"]}}"#).unwrap();
        let path = file.path().to_str().unwrap();

        let err = cli(&["--config", path, "x"]).parser_config().unwrap_err();
        assert!(matches!(err, CliError::ConfigFile { .. }));
    }

    #[test]
    fn test_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "SELECT a FROM t;").unwrap();
        let path = file.path().to_str().unwrap();

        let input = cli(&["--file", path]).input().unwrap();
        assert_eq!(input, "SELECT a FROM t;");
    }

    #[test]
    fn test_positional_conflicts_with_file() {
        let result = Cli::try_parse_from(["sqlnode", "--file", "a.sql", "SELECT 1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_mode_selection() {
        assert_eq!(cli(&["x"]).mode(), Mode::Tree);
        assert_eq!(cli(&["--count", "x"]).mode(), Mode::Count);
        assert_eq!(cli(&["--equivalence", "x"]).mode(), Mode::Equivalence);
        assert!(Cli::try_parse_from(["sqlnode", "--count", "--equivalence", "x"]).is_err());
    }
}
