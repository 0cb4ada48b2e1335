//! Stemmer bindings.
//!
//! A tokenizer configured with `stemmer=<language>` resolves the language
//! name once, at construction time, to a [`StemmerBinding`]. Each cursor then
//! instantiates its own [`StemmingEngine`] from the binding: engines keep
//! mutable scratch state and are never shared between tokenizations. The
//! engine is released when the cursor drops it.
//!
//! Languages are looked up in a [`StemmerRegistry`]. The built-in registry
//! holds every stemmer compiled into this crate; hosts can build their own
//! registry and add engines with [`StemmerRegistry::register`].
//!
//! # Examples
//!
//! ```
//! use lexifold::analysis::stemmer;
//!
//! let binding = stemmer::resolve("english").unwrap();
//! let mut engine = binding.instantiate();
//! assert_eq!(engine.stem("running"), Some("run"));
//!
//! assert!(stemmer::resolve("English").is_err());
//! ```

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;
use lazy_static::lazy_static;

use crate::error::{LexifoldError, Result};

pub mod porter;
pub mod snowball;

pub use porter::{PorterFactory, PorterStemmer};
pub use snowball::{Language, SnowballEngine, SnowballFactory};

/// A stemming context owned by a single cursor.
pub trait StemmingEngine: Send {
    /// Stem `token`.
    ///
    /// The returned text lives in the engine's own buffer and is valid until
    /// the next call. `None` signals that stemming failed; callers then use
    /// the unstemmed token.
    fn stem(&mut self, token: &str) -> Option<&str>;
}

/// Creates fresh stemming engines for one language.
pub trait StemmerFactory: Send + Sync {
    /// Instantiate a new engine.
    fn create(&self) -> Box<dyn StemmingEngine>;
}

/// A language name resolved to a stemming capability.
#[derive(Clone)]
pub struct StemmerBinding {
    language: String,
    factory: Arc<dyn StemmerFactory>,
}

impl StemmerBinding {
    /// Bind `language` to `factory`.
    pub fn new<S: Into<String>>(language: S, factory: Arc<dyn StemmerFactory>) -> Self {
        StemmerBinding {
            language: language.into(),
            factory,
        }
    }

    /// The configured language name.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Create a new engine for one cursor.
    pub fn instantiate(&self) -> Box<dyn StemmingEngine> {
        self.factory.create()
    }
}

impl fmt::Debug for StemmerBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StemmerBinding")
            .field("language", &self.language)
            .finish()
    }
}

impl PartialEq for StemmerBinding {
    fn eq(&self, other: &Self) -> bool {
        self.language == other.language
    }
}

/// Table of language names to stemmer factories.
///
/// Names are matched exactly and case-sensitively.
#[derive(Clone, Default)]
pub struct StemmerRegistry {
    factories: AHashMap<String, Arc<dyn StemmerFactory>>,
}

impl StemmerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        StemmerRegistry {
            factories: AHashMap::new(),
        }
    }

    /// Create a registry holding every stemmer compiled into this crate.
    pub fn with_builtin() -> Self {
        let mut registry = StemmerRegistry::new();
        registry.register(PorterStemmer::NAME, Arc::new(PorterFactory));
        for language in Language::ALL {
            registry.register(language.name(), Arc::new(SnowballFactory::new(language)));
        }
        registry
    }

    /// Register (or replace) the factory for `language`.
    pub fn register<S: Into<String>>(&mut self, language: S, factory: Arc<dyn StemmerFactory>) {
        self.factories.insert(language.into(), factory);
    }

    /// Resolve `language` to a binding.
    pub fn resolve(&self, language: &str) -> Result<StemmerBinding> {
        self.factories
            .get(language)
            .map(|factory| StemmerBinding::new(language, Arc::clone(factory)))
            .ok_or_else(|| LexifoldError::unsupported_language(language))
    }

    /// Whether `language` is registered.
    pub fn contains(&self, language: &str) -> bool {
        self.factories.contains_key(language)
    }

    /// Registered language names in ascending order.
    pub fn languages(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for StemmerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StemmerRegistry")
            .field("languages", &self.languages())
            .finish()
    }
}

lazy_static! {
    static ref BUILTIN: StemmerRegistry = StemmerRegistry::with_builtin();
}

/// The registry of compiled-in stemmers.
pub fn builtin() -> &'static StemmerRegistry {
    &BUILTIN
}

/// Resolve `language` against the compiled-in stemmers.
pub fn resolve(language: &str) -> Result<StemmerBinding> {
    BUILTIN.resolve(language)
}
