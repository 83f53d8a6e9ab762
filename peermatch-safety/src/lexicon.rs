//! The versioned safety lexicon.
//!
//! Profanity words, severe-distress substrings, and offensive regex
//! patterns live in an embedded JSON data table (the same treatment as the
//! topic taxonomy) so they can be updated and tested independently of the
//! classifier algorithm.

use std::sync::OnceLock;

use regex::RegexSet;
use serde::Deserialize;

/// Embedded lexicon table. Validated by the unit tests below.
const EMBEDDED_LEXICON: &str = include_str!("../data/safety_lexicon.json");

static GLOBAL: OnceLock<SafetyLexicon> = OnceLock::new();

#[derive(Debug, Deserialize)]
struct LexiconTable {
    version: u32,
    profanity: Vec<String>,
    distress: Vec<String>,
    offensive_patterns: Vec<String>,
}

/// Error raised when a lexicon table cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    /// The table JSON was malformed.
    #[error("lexicon table failed to parse: {source}")]
    Parse {
        /// Underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
    /// An offensive pattern was not a valid regex.
    #[error("lexicon pattern failed to compile: {source}")]
    Pattern {
        /// Underlying regex error.
        #[from]
        source: regex::Error,
    },
}

/// Compiled word lists and patterns used by the distress classifier.
///
/// Offensive patterns match as regexes and profanity words as whole words;
/// distress keywords match as plain substrings.
#[derive(Debug, Clone)]
pub struct SafetyLexicon {
    version: u32,
    profanity: Vec<String>,
    distress: Vec<String>,
    offensive: RegexSet,
    profanity_words: RegexSet,
}

impl SafetyLexicon {
    /// Access the process-wide lexicon loaded from the embedded table.
    ///
    /// A malformed embedded table degrades to an empty lexicon (logged);
    /// classification then reports every text as ok rather than failing.
    #[must_use]
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| match Self::from_json(EMBEDDED_LEXICON) {
            Ok(lexicon) => lexicon,
            Err(err) => {
                log::error!("embedded safety lexicon failed to load: {err}");
                Self::empty()
            }
        })
    }

    /// Parse and compile a lexicon from its JSON table representation.
    ///
    /// # Errors
    /// Returns [`LexiconError`] when the table is malformed or a pattern
    /// does not compile.
    pub fn from_json(json: &str) -> Result<Self, LexiconError> {
        let table: LexiconTable = serde_json::from_str(json)?;
        let offensive = RegexSet::new(&table.offensive_patterns)?;
        let word_patterns: Vec<String> = table
            .profanity
            .iter()
            .map(|word| format!(r"\b{}\b", regex::escape(word)))
            .collect();
        let profanity_words = RegexSet::new(&word_patterns)?;
        Ok(Self {
            version: table.version,
            profanity: table.profanity,
            distress: table.distress,
            offensive,
            profanity_words,
        })
    }

    fn empty() -> Self {
        Self {
            version: 0,
            profanity: Vec::new(),
            distress: Vec::new(),
            offensive: RegexSet::empty(),
            profanity_words: RegexSet::empty(),
        }
    }

    /// Version number of the loaded table.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Whether lowercased `text` matches an offensive pattern or contains
    /// a profanity word as a whole word.
    #[must_use]
    pub fn is_offensive(&self, lowercased: &str) -> bool {
        self.offensive.is_match(lowercased) || self.profanity_words.is_match(lowercased)
    }

    /// Whether lowercased `text` contains a severe-distress keyword as a
    /// substring.
    #[must_use]
    pub fn is_distressed(&self, lowercased: &str) -> bool {
        self.distress
            .iter()
            .any(|keyword| lowercased.contains(keyword.as_str()))
    }

    /// Whether `text` contains any profanity word as a plain substring.
    ///
    /// Looser than [`SafetyLexicon::is_offensive`]; used to validate
    /// member-supplied group names and topics, where embedded profanity is
    /// rejected even inside longer words.
    #[must_use]
    pub fn contains_profanity(&self, text: &str) -> bool {
        let lowercased = text.to_lowercase();
        self.profanity
            .iter()
            .any(|word| lowercased.contains(word.as_str()))
    }
}
