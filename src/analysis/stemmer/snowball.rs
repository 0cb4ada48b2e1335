//! Snowball stemmers backed by `rust-stemmers`.

use std::fmt;

use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};

use crate::analysis::stemmer::{StemmerFactory, StemmingEngine};

/// Languages with a Snowball stemmer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Arabic,
    Danish,
    Dutch,
    English,
    Finnish,
    French,
    German,
    Greek,
    Hungarian,
    Italian,
    Norwegian,
    Portuguese,
    Romanian,
    Russian,
    Spanish,
    Swedish,
    Tamil,
    Turkish,
}

impl Language {
    /// Every Snowball language, in name order.
    pub const ALL: [Language; 18] = [
        Language::Arabic,
        Language::Danish,
        Language::Dutch,
        Language::English,
        Language::Finnish,
        Language::French,
        Language::German,
        Language::Greek,
        Language::Hungarian,
        Language::Italian,
        Language::Norwegian,
        Language::Portuguese,
        Language::Romanian,
        Language::Russian,
        Language::Spanish,
        Language::Swedish,
        Language::Tamil,
        Language::Turkish,
    ];

    /// The configuration name of this language.
    pub fn name(self) -> &'static str {
        match self {
            Language::Arabic => "arabic",
            Language::Danish => "danish",
            Language::Dutch => "dutch",
            Language::English => "english",
            Language::Finnish => "finnish",
            Language::French => "french",
            Language::German => "german",
            Language::Greek => "greek",
            Language::Hungarian => "hungarian",
            Language::Italian => "italian",
            Language::Norwegian => "norwegian",
            Language::Portuguese => "portuguese",
            Language::Romanian => "romanian",
            Language::Russian => "russian",
            Language::Spanish => "spanish",
            Language::Swedish => "swedish",
            Language::Tamil => "tamil",
            Language::Turkish => "turkish",
        }
    }

    fn to_algorithm(self) -> Algorithm {
        match self {
            Language::Arabic => Algorithm::Arabic,
            Language::Danish => Algorithm::Danish,
            Language::Dutch => Algorithm::Dutch,
            Language::English => Algorithm::English,
            Language::Finnish => Algorithm::Finnish,
            Language::French => Algorithm::French,
            Language::German => Algorithm::German,
            Language::Greek => Algorithm::Greek,
            Language::Hungarian => Algorithm::Hungarian,
            Language::Italian => Algorithm::Italian,
            Language::Norwegian => Algorithm::Norwegian,
            Language::Portuguese => Algorithm::Portuguese,
            Language::Romanian => Algorithm::Romanian,
            Language::Russian => Algorithm::Russian,
            Language::Spanish => Algorithm::Spanish,
            Language::Swedish => Algorithm::Swedish,
            Language::Tamil => Algorithm::Tamil,
            Language::Turkish => Algorithm::Turkish,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A Snowball stemmer with its own output buffer.
pub struct SnowballEngine {
    language: Language,
    stemmer: Stemmer,
    buffer: String,
}

impl SnowballEngine {
    /// Create an engine for `language`.
    pub fn new(language: Language) -> Self {
        SnowballEngine {
            language,
            stemmer: Stemmer::create(language.to_algorithm()),
            buffer: String::new(),
        }
    }

    /// The stemmer language.
    pub fn language(&self) -> Language {
        self.language
    }
}

impl fmt::Debug for SnowballEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowballEngine")
            .field("language", &self.language)
            .finish()
    }
}

impl StemmingEngine for SnowballEngine {
    fn stem(&mut self, token: &str) -> Option<&str> {
        let stemmed = self.stemmer.stem(token);
        self.buffer.clear();
        self.buffer.push_str(&stemmed);
        Some(&self.buffer)
    }
}

/// Creates [`SnowballEngine`]s for one language.
#[derive(Debug, Clone, Copy)]
pub struct SnowballFactory {
    language: Language,
}

impl SnowballFactory {
    pub fn new(language: Language) -> Self {
        SnowballFactory { language }
    }
}

impl StemmerFactory for SnowballFactory {
    fn create(&self) -> Box<dyn StemmingEngine> {
        Box::new(SnowballEngine::new(self.language))
    }
}
