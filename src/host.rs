//! Registration with the host search engine.
//!
//! The host engine sees tokenizers through [`TokenizerModule`] (a named
//! factory) and scalar functions through [`AuxiliaryFunction`]. Both are
//! registered into an [`ExtensionRegistry`]. [`extension_init`] is the
//! loadable-library entry point: it registers everything this crate provides
//! and reports the outcome as a [`StatusCode`].
//!
//! [`InMemoryRegistry`] is a complete host-side registry, used by the CLI
//! and by tests.
//!
//! # Examples
//!
//! ```
//! use lexifold::analysis::tokenizer::Tokenizer;
//! use lexifold::host::{InMemoryRegistry, StatusCode, extension_init};
//!
//! let registry = InMemoryRegistry::new();
//! assert_eq!(extension_init(&registry), StatusCode::Ok);
//!
//! let tokenizer = registry.create_tokenizer("unicode_fold", &["stemmer=english"]).unwrap();
//! let tokens = tokenizer.tokenize(b"running").unwrap();
//! assert_eq!(tokens[0].text, "run");
//! ```

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;
use log::{debug, info, warn};
use parking_lot::RwLock;

use crate::analysis::token::Token;
use crate::analysis::tokenizer::{FoldTokenizer, Tokenizer, WordBreakTokenizer};
use crate::error::{LexifoldError, Result};
use crate::matches::{MatchContext, MatchExtractor};

/// Name the fold tokenizer was registered under by earlier releases.
pub const LEGACY_FOLD_TOKENIZER_NAME: &str = "unicodesn";

/// Host engine status vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Ok,
    NotFound,
    NoMem,
    Error,
    /// A cursor reached the end of its input
    Done,
}

impl StatusCode {
    /// Numeric status code as understood by the host engine.
    pub fn code(self) -> i32 {
        match self {
            StatusCode::Ok => 0,
            StatusCode::Error => 1,
            StatusCode::NoMem => 7,
            StatusCode::NotFound => 12,
            StatusCode::Done => 101,
        }
    }

    /// Status of a host call that returned `result`.
    pub fn of<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => StatusCode::Ok,
            Err(e) => e.status(),
        }
    }

    /// Status of one cursor step.
    pub fn of_cursor_step(step: &Result<Option<Token>>) -> Self {
        match step {
            Ok(Some(_)) => StatusCode::Ok,
            Ok(None) => StatusCode::Done,
            Err(e) => e.status(),
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "NOTFOUND",
            StatusCode::NoMem => "NOMEM",
            StatusCode::Error => "ERROR",
            StatusCode::Done => "DONE",
        };
        f.write_str(name)
    }
}

/// A named tokenizer factory.
pub trait TokenizerModule: Send + Sync {
    /// Name of the tokenizer this module creates.
    fn name(&self) -> &'static str;

    /// Build a tokenizer instance from configuration arguments.
    fn create(&self, args: &[&str]) -> Result<Box<dyn Tokenizer>>;
}

/// A scalar function callable by the host for each result row.
pub trait AuxiliaryFunction: Send + Sync {
    fn name(&self) -> &'static str;

    fn call(&self, context: &dyn MatchContext, args: &[String]) -> Result<Option<String>>;
}

/// Host-side registration surface.
pub trait ExtensionRegistry {
    fn register_tokenizer(&self, name: &str, module: Arc<dyn TokenizerModule>) -> Result<()>;

    fn register_function(&self, name: &str, function: Arc<dyn AuxiliaryFunction>) -> Result<()>;
}

/// Module for [`FoldTokenizer`].
#[derive(Clone, Copy, Debug, Default)]
pub struct FoldTokenizerModule;

impl TokenizerModule for FoldTokenizerModule {
    fn name(&self) -> &'static str {
        FoldTokenizer::NAME
    }

    fn create(&self, args: &[&str]) -> Result<Box<dyn Tokenizer>> {
        Ok(Box::new(FoldTokenizer::from_args(args)?))
    }
}

/// Module for [`WordBreakTokenizer`].
#[derive(Clone, Copy, Debug, Default)]
pub struct WordBreakTokenizerModule;

impl TokenizerModule for WordBreakTokenizerModule {
    fn name(&self) -> &'static str {
        WordBreakTokenizer::NAME
    }

    fn create(&self, args: &[&str]) -> Result<Box<dyn Tokenizer>> {
        Ok(Box::new(WordBreakTokenizer::from_args(args)?))
    }
}

impl AuxiliaryFunction for MatchExtractor {
    fn name(&self) -> &'static str {
        MatchExtractor::NAME
    }

    fn call(&self, context: &dyn MatchContext, args: &[String]) -> Result<Option<String>> {
        self.extract(context, args)
    }
}

/// Register every tokenizer and function this crate provides.
pub fn register_all(registry: &dyn ExtensionRegistry) -> Result<()> {
    let fold: Arc<dyn TokenizerModule> = Arc::new(FoldTokenizerModule);
    registry.register_tokenizer(FoldTokenizer::NAME, Arc::clone(&fold))?;
    registry.register_tokenizer(LEGACY_FOLD_TOKENIZER_NAME, fold)?;
    registry.register_tokenizer(WordBreakTokenizer::NAME, Arc::new(WordBreakTokenizerModule))?;
    registry.register_function(MatchExtractor::NAME, Arc::new(MatchExtractor::new()))?;
    Ok(())
}

/// Extension entry point.
pub fn extension_init(registry: &dyn ExtensionRegistry) -> StatusCode {
    match register_all(registry) {
        Ok(()) => {
            info!("lexifold {} registered", crate::VERSION);
            StatusCode::Ok
        }
        Err(e) => {
            warn!("extension registration failed: {e}");
            e.status()
        }
    }
}

/// Thread-safe in-memory [`ExtensionRegistry`].
#[derive(Default)]
pub struct InMemoryRegistry {
    tokenizers: RwLock<AHashMap<String, Arc<dyn TokenizerModule>>>,
    functions: RwLock<AHashMap<String, Arc<dyn AuxiliaryFunction>>>,
}

impl InMemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        InMemoryRegistry {
            tokenizers: RwLock::new(AHashMap::new()),
            functions: RwLock::new(AHashMap::new()),
        }
    }

    /// Create a registry with everything this crate provides.
    pub fn with_defaults() -> Result<Self> {
        let registry = Self::new();
        register_all(&registry)?;
        Ok(registry)
    }

    /// Look up a tokenizer module.
    pub fn tokenizer(&self, name: &str) -> Result<Arc<dyn TokenizerModule>> {
        self.tokenizers
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| LexifoldError::not_found(format!("tokenizer {name}")))
    }

    /// Look up and instantiate a tokenizer.
    pub fn create_tokenizer(&self, name: &str, args: &[&str]) -> Result<Box<dyn Tokenizer>> {
        self.tokenizer(name)?.create(args).inspect_err(|e| {
            debug!("creating tokenizer {name} failed: {e}");
        })
    }

    /// Look up a function.
    pub fn function(&self, name: &str) -> Result<Arc<dyn AuxiliaryFunction>> {
        self.functions
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| LexifoldError::not_found(format!("function {name}")))
    }

    /// Registered tokenizer names in ascending order.
    pub fn tokenizer_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tokenizers.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Registered function names in ascending order.
    pub fn function_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }
}

impl ExtensionRegistry for InMemoryRegistry {
    fn register_tokenizer(&self, name: &str, module: Arc<dyn TokenizerModule>) -> Result<()> {
        debug!("registering tokenizer {name} ({})", module.name());
        self.tokenizers.write().insert(name.to_string(), module);
        Ok(())
    }

    fn register_function(&self, name: &str, function: Arc<dyn AuxiliaryFunction>) -> Result<()> {
        debug!("registering function {name}");
        self.functions.write().insert(name.to_string(), function);
        Ok(())
    }
}

impl fmt::Debug for InMemoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryRegistry")
            .field("tokenizers", &self.tokenizer_names())
            .field("functions", &self.function_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matches::StaticMatchContext;

    struct RejectingRegistry;

    impl ExtensionRegistry for RejectingRegistry {
        fn register_tokenizer(&self, name: &str, _module: Arc<dyn TokenizerModule>) -> Result<()> {
            Err(LexifoldError::allocation(format!("no room for {name}")))
        }

        fn register_function(&self, _name: &str, _function: Arc<dyn AuxiliaryFunction>) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_extension_init() {
        let registry = InMemoryRegistry::new();
        assert_eq!(extension_init(&registry), StatusCode::Ok);
        assert_eq!(
            registry.tokenizer_names(),
            vec!["unicode_fold", "unicodesn", "word_break"]
        );
        assert_eq!(registry.function_names(), vec!["matches"]);
    }

    #[test]
    fn test_registration_failure_status() {
        assert_eq!(extension_init(&RejectingRegistry), StatusCode::NoMem);
    }

    #[test]
    fn test_legacy_alias() {
        let registry = InMemoryRegistry::with_defaults().unwrap();
        let legacy = registry.create_tokenizer("unicodesn", &["tokenchars=-"]).unwrap();
        assert_eq!(legacy.name(), FoldTokenizer::NAME);
        assert_eq!(legacy.tokenize(b"x-ray").unwrap()[0].text, "x-ray");
    }

    #[test]
    fn test_lookup_failures() {
        let registry = InMemoryRegistry::with_defaults().unwrap();

        let err = registry.create_tokenizer("porter", &[]).err().unwrap();
        assert_eq!(err.status(), StatusCode::NotFound);

        let err = registry.create_tokenizer("unicode_fold", &["stemmer=xx"]).err().unwrap();
        assert_eq!(err.status(), StatusCode::Error);

        let err = registry.create_tokenizer("word_break", &["a=b"]).err().unwrap();
        assert!(err.is_construction_error());

        assert!(registry.function("snippet").is_err());
    }

    #[test]
    fn test_function_call() {
        let registry = InMemoryRegistry::with_defaults().unwrap();
        let function = registry.function("matches").unwrap();

        let mut context = StaticMatchContext::new(registry.create_tokenizer("word_break", &[]).unwrap());
        let column = context.add_column("Hello, World");
        context.add_instance(column, 1);

        assert_eq!(function.call(&context, &[]).unwrap().as_deref(), Some("World"));
    }

    #[test]
    fn test_cursor_status() {
        let tokenizer = FoldTokenizer::new();
        let mut cursor = tokenizer.open(b"one").unwrap();
        assert_eq!(StatusCode::of_cursor_step(&cursor.next_token()), StatusCode::Ok);
        assert_eq!(StatusCode::of_cursor_step(&cursor.next_token()), StatusCode::Done);
        assert_eq!(StatusCode::Done.code(), 101);
        assert_eq!(StatusCode::of(&FoldTokenizer::from_args(&["x"])), StatusCode::Error);
    }
}
