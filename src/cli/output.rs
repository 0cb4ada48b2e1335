//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::cli::args::{LexifoldArgs, OutputFormat};
use crate::error::Result;

/// Human-readable rendering of a command result.
pub trait HumanOutput {
    fn human_lines(&self) -> Vec<String>;
}

/// Result structure for tokenization.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenizeResult {
    pub tokenizer: String,
    pub args: Vec<String>,
    pub tokens: Vec<Token>,
}

/// Result structure for snippet extraction.
#[derive(Debug, Serialize, Deserialize)]
pub struct SnippetResult {
    pub instances: usize,
    pub snippet: Option<String>,
}

/// Stemmer languages.
#[derive(Debug, Serialize, Deserialize)]
pub struct LanguagesResult {
    pub languages: Vec<String>,
}

impl HumanOutput for TokenizeResult {
    fn human_lines(&self) -> Vec<String> {
        self.tokens
            .iter()
            .map(|token| {
                let mut line = format!(
                    "{:>4}  {:>6}..{:<6}  {}",
                    token.position, token.start_offset, token.end_offset, token.text
                );
                if let Some(token_type) = token.token_type {
                    line.push_str(&format!("  ({token_type})"));
                }
                line
            })
            .collect()
    }
}

impl HumanOutput for SnippetResult {
    fn human_lines(&self) -> Vec<String> {
        match &self.snippet {
            Some(snippet) => vec![snippet.clone()],
            None => vec!["(no matches)".to_string()],
        }
    }
}

impl HumanOutput for LanguagesResult {
    fn human_lines(&self) -> Vec<String> {
        self.languages.clone()
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &LexifoldArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanOutput>(message: &str, result: &T, args: &LexifoldArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }
    for line in result.human_lines() {
        println!("{line}");
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &LexifoldArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}
