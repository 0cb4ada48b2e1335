//! Command line argument parsing for Lexifold CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::FoldTokenizer;
use crate::error::{LexifoldError, Result};
use crate::matches::MatchInstance;

/// Lexifold - full-text-search tokenizers for message text
#[derive(Parser, Debug, Clone)]
#[command(name = "lexifold")]
#[command(about = "Tokenize text and extract match snippets with the Lexifold tokenizers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct LexifoldArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl LexifoldArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the tokens of a text
    Tokenize(TokenizeArgs),

    /// Extract matched substrings from column texts
    Snippet(SnippetArgs),

    /// List the available stemmer languages
    Languages,
}

/// Tokenizer selection shared by the subcommands
#[derive(Args, Debug, Clone)]
pub struct TokenizerArgs {
    /// Registered tokenizer name
    #[arg(short, long, default_value = FoldTokenizer::NAME)]
    pub tokenizer: String,

    /// Tokenizer argument (key=value), may be repeated
    #[arg(short = 'a', long = "arg", value_name = "KEY=VALUE")]
    pub args: Vec<String>,

    /// Fold tokenizer configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for tokenizing
#[derive(Parser, Debug, Clone)]
pub struct TokenizeArgs {
    /// Text to tokenize (reads INPUT_FILE or stdin when omitted)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(short, long, value_name = "INPUT_FILE", conflicts_with = "text")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub tokenizer: TokenizerArgs,
}

/// Arguments for snippet extraction
#[derive(Parser, Debug, Clone)]
pub struct SnippetArgs {
    /// Column text, may be repeated; columns are numbered from 0
    #[arg(long = "column", value_name = "TEXT", required = true)]
    pub columns: Vec<String>,

    /// Match instance as COLUMN:TOKEN or TOKEN (column 0), may be repeated
    #[arg(short, long = "match", value_name = "[PHRASE:]COLUMN:TOKEN", value_parser = parse_match_instance)]
    pub matches: Vec<MatchInstance>,

    #[command(flatten)]
    pub tokenizer: TokenizerArgs,
}

/// Parse a `PHRASE:COLUMN:TOKEN`, `COLUMN:TOKEN` or `TOKEN` match instance.
pub fn parse_match_instance(value: &str) -> Result<MatchInstance> {
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|e| LexifoldError::invalid_argument(format!("{value}: {e}")))
    };
    let parts: Vec<&str> = value.split(':').collect();
    match parts.as_slice() {
        [token] => Ok(MatchInstance::new(0, parse(token)?)),
        [column, token] => Ok(MatchInstance::new(parse(column)?, parse(token)?)),
        [phrase, column, token] => {
            Ok(MatchInstance::new(parse(column)?, parse(token)?).with_phrase_rank(parse(phrase)?))
        }
        _ => Err(LexifoldError::invalid_argument(value)),
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_tokenize_command() {
        let args = LexifoldArgs::try_parse_from([
            "lexifold",
            "tokenize",
            "Café, naïve",
            "--arg",
            "stemmer=french",
            "-a",
            "tokenchars=-",
        ])
        .unwrap();

        if let Command::Tokenize(tokenize_args) = args.command {
            assert_eq!(tokenize_args.text.as_deref(), Some("Café, naïve"));
            assert_eq!(tokenize_args.tokenizer.tokenizer, "unicode_fold");
            assert_eq!(
                tokenize_args.tokenizer.args,
                vec!["stemmer=french", "tokenchars=-"]
            );
        } else {
            panic!("Expected Tokenize command");
        }
    }

    #[test]
    fn test_snippet_command() {
        let args = LexifoldArgs::try_parse_from([
            "lexifold",
            "--format",
            "json",
            "snippet",
            "--column",
            "The quick brown fox",
            "--match",
            "0:2",
            "-m",
            "3",
            "--tokenizer",
            "word_break",
        ])
        .unwrap();

        assert_eq!(args.output_format, OutputFormat::Json);
        if let Command::Snippet(snippet_args) = args.command {
            assert_eq!(snippet_args.columns.len(), 1);
            assert_eq!(
                snippet_args.matches,
                vec![MatchInstance::new(0, 2), MatchInstance::new(0, 3)]
            );
            assert_eq!(snippet_args.tokenizer.tokenizer, "word_break");
        } else {
            panic!("Expected Snippet command");
        }
    }

    #[test]
    fn test_parse_match_instance() {
        assert_eq!(parse_match_instance("1:4").unwrap(), MatchInstance::new(1, 4));
        assert_eq!(parse_match_instance("7").unwrap(), MatchInstance::new(0, 7));
        assert!(parse_match_instance("a:1").is_err());
        assert!(parse_match_instance("1:").is_err());
        assert_eq!(
            parse_match_instance("2:1:4").unwrap(),
            MatchInstance::new(1, 4).with_phrase_rank(2)
        );
        assert!(parse_match_instance("1:2:3:4").is_err());
    }

    #[test]
    fn test_verbosity() {
        let args = LexifoldArgs::try_parse_from(["lexifold", "-vv", "languages"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args = LexifoldArgs::try_parse_from(["lexifold", "-q", "-vvv", "languages"]).unwrap();
        assert_eq!(args.verbosity(), 0);

        let args = LexifoldArgs::try_parse_from(["lexifold", "languages"]).unwrap();
        assert_eq!(args.verbosity(), 1);
    }
}
