//! Command implementations for Lexifold CLI.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use log::{debug, info};

use crate::analysis::stemmer;
use crate::analysis::tokenizer::{FoldTokenizer, FoldTokenizerConfig, Tokenizer};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{LexifoldError, Result};
use crate::host::{InMemoryRegistry, LEGACY_FOLD_TOKENIZER_NAME};
use crate::matches::{MatchExtractor, StaticMatchContext};

/// Execute a CLI command.
pub fn execute_command(args: LexifoldArgs) -> Result<()> {
    match &args.command {
        Command::Tokenize(tokenize_args) => tokenize_text(tokenize_args.clone(), &args),
        Command::Snippet(snippet_args) => extract_snippet(snippet_args.clone(), &args),
        Command::Languages => list_languages(&args),
    }
}

/// Tokenize a text and print its tokens.
fn tokenize_text(args: TokenizeArgs, cli_args: &LexifoldArgs) -> Result<()> {
    let text = match (&args.text, &args.input) {
        (Some(text), _) => text.clone().into_bytes(),
        (None, Some(path)) => read_input_file(path)?,
        (None, None) => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            buffer
        }
    };

    let (tokenizer_args, tokenizer) = build_tokenizer(&args.tokenizer)?;
    let tokens = tokenizer.tokenize(&text)?;
    info!("{} produced {} tokens", tokenizer.name(), tokens.len());

    output_result(
        "Tokens",
        &TokenizeResult {
            tokenizer: args.tokenizer.tokenizer.clone(),
            args: tokenizer_args,
            tokens,
        },
        cli_args,
    )
}

/// Run the match extractor over the given columns.
fn extract_snippet(args: SnippetArgs, cli_args: &LexifoldArgs) -> Result<()> {
    let (_, tokenizer) = build_tokenizer(&args.tokenizer)?;

    let mut context = StaticMatchContext::new(tokenizer);
    for column in &args.columns {
        context.add_column(column);
    }
    for instance in &args.matches {
        context.push_instance(*instance);
    }

    let snippet = MatchExtractor::new().extract(&context, &[])?;
    output_result(
        "Matches",
        &SnippetResult {
            instances: args.matches.len(),
            snippet,
        },
        cli_args,
    )
}

/// List the compiled-in stemmer languages.
fn list_languages(cli_args: &LexifoldArgs) -> Result<()> {
    let languages = stemmer::builtin()
        .languages()
        .into_iter()
        .map(str::to_string)
        .collect();
    output_result("Stemmer languages", &LanguagesResult { languages }, cli_args)
}

/// Resolve the effective argument list and create the tokenizer.
pub fn build_tokenizer(args: &TokenizerArgs) -> Result<(Vec<String>, Box<dyn Tokenizer>)> {
    let mut tokenizer_args = Vec::new();
    if let Some(path) = &args.config {
        if !is_fold_tokenizer(&args.tokenizer) {
            return Err(LexifoldError::invalid_argument(format!(
                "--config only applies to {}",
                FoldTokenizer::NAME
            )));
        }
        tokenizer_args.extend(load_fold_config(path)?.to_args());
    }
    tokenizer_args.extend(args.args.iter().cloned());
    debug!("tokenizer {} args {:?}", args.tokenizer, tokenizer_args);

    let registry = InMemoryRegistry::with_defaults()?;
    let arg_refs: Vec<&str> = tokenizer_args.iter().map(String::as_str).collect();
    let tokenizer = registry.create_tokenizer(&args.tokenizer, &arg_refs)?;
    Ok((tokenizer_args, tokenizer))
}

fn is_fold_tokenizer(name: &str) -> bool {
    name == FoldTokenizer::NAME || name == LEGACY_FOLD_TOKENIZER_NAME
}

/// Load a fold tokenizer configuration file.
pub fn load_fold_config(path: &Path) -> Result<FoldTokenizerConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read config {}: {e}", path.display()))?;
    let config: FoldTokenizerConfig = serde_json::from_str(&content)?;
    Ok(config)
}

fn read_input_file(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path)
        .map_err(|e| anyhow::anyhow!("cannot read input {}: {e}", path.display()))?;
    Ok(bytes)
}
