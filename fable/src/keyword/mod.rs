use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

/// Error returned when a keyword has no translations at all for a language
/// symbol. This is distinct from a no-match, which is only reported when
/// translations exist but none applies to the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage {
    /// Path identifier of the keyword, e.g. `scenario.then`.
    pub keyword: String,
    /// The language symbol that has no translations, e.g. `de`.
    pub symbol: String,
}

impl fmt::Display for UnknownLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no translation exists for the '{}' keyword and the '{}' language",
            self.keyword, self.symbol
        )
    }
}

impl std::error::Error for UnknownLanguage {}

/// A localized literal keyword recognized at a fixed structural position.
///
/// Each keyword maps a language symbol to an ordered, non-empty list of
/// lower-cased variants. Matching is case-insensitive literal prefix
/// matching in registration order.
#[derive(Debug, Clone)]
pub struct Keyword {
    path: String,
    translations: HashMap<String, Vec<String>>,
}

impl Keyword {
    pub fn new(path: impl Into<String>) -> Keyword {
        Keyword {
            path: path.into(),
            translations: HashMap::new(),
        }
    }

    /// Stable path identifier, e.g. `scenario.then`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Register (or replace) the variants for a language. Variants are
    /// stored lower-cased; registration order decides match priority.
    ///
    /// Panics if `variants` is empty: a registered language must offer at
    /// least one expression.
    pub fn add_language(mut self, symbol: &str, variants: &[&str]) -> Keyword {
        assert!(
            !variants.is_empty(),
            "at least one variant is required for the '{}' keyword",
            self.path
        );
        let variants = variants.iter().map(|v| v.to_lowercase()).collect();
        self.translations.insert(symbol.to_string(), variants);
        self
    }

    /// The first registered variant for a symbol, used in "expecting the
    /// ... keyword" messages. Falls back to the keyword path when the
    /// symbol is unknown.
    pub fn expected(&self, symbol: &str) -> &str {
        self.translations
            .get(symbol)
            .and_then(|variants| variants.first())
            .map(String::as_str)
            .unwrap_or(&self.path)
    }

    /// Match `line` against the variants registered for `symbol`.
    ///
    /// Returns `Ok(Some(remainder))` on the first prefix match, with the
    /// remainder's leading whitespace trimmed; `Ok(None)` when translations
    /// exist but none matches; `Err(UnknownLanguage)` when the symbol has
    /// no translations for this keyword.
    pub fn parse(&self, symbol: &str, line: &str) -> Result<Option<String>, UnknownLanguage> {
        let variants = self.translations.get(symbol).ok_or_else(|| UnknownLanguage {
            keyword: self.path.clone(),
            symbol: symbol.to_string(),
        })?;

        for variant in variants {
            if let Some(matched) = prefix_length(line, variant) {
                let remainder = line[matched..].trim_start();
                return Ok(Some(remainder.to_string()));
            }
        }

        Ok(None)
    }
}

/// Byte length of the prefix of `line` matching `variant` (already
/// lower-cased) case-insensitively, or `None` when it is not a prefix.
///
/// The walk lowercases `line` one character at a time and counts the bytes
/// consumed in `line` itself, so the returned offset is a valid boundary
/// even when lowercasing changes a character's byte length. A variant that
/// ends inside one character's lowercase expansion leaves no boundary to
/// cut at and is treated as a non-match.
fn prefix_length(line: &str, variant: &str) -> Option<usize> {
    let mut expected = variant.chars();
    let mut consumed = 0;

    for c in line.chars() {
        for lowered in c.to_lowercase() {
            match expected.next() {
                Some(e) if e == lowered => {}
                _ => return None,
            }
        }
        consumed += c.len_utf8();
        if expected.as_str().is_empty() {
            return Some(consumed);
        }
    }

    None
}

/// Read-only collection of keywords indexed by path, registered once at
/// startup. Concurrent reads from parallel parses need no locking.
#[derive(Debug, Clone)]
pub struct KeywordRegistry {
    keywords: HashMap<String, Keyword>,
}

impl KeywordRegistry {
    pub fn empty() -> KeywordRegistry {
        KeywordRegistry {
            keywords: HashMap::new(),
        }
    }

    pub fn insert(&mut self, keyword: Keyword) {
        self.keywords.insert(keyword.path().to_string(), keyword);
    }

    pub fn get(&self, path: &str) -> Option<&Keyword> {
        self.keywords.get(path)
    }
}

/// The standard registry: the complete English set and the partial French
/// set the story language ships with.
impl Default for KeywordRegistry {
    fn default() -> KeywordRegistry {
        let mut registry = KeywordRegistry::empty();
        registry.insert(Keyword::new("story.title").add_language("en", &["feature:"]));
        registry.insert(Keyword::new("scenario.title").add_language("en", &["scenario:"]));
        registry.insert(Keyword::new("scenario.given").add_language("en", &["given"]));
        registry.insert(
            Keyword::new("scenario.when")
                .add_language("en", &["when"])
                .add_language("fr", &["si"]),
        );
        registry.insert(
            Keyword::new("scenario.then")
                .add_language("en", &["then"])
                .add_language("fr", &["alors"]),
        );
        registry.insert(Keyword::new("scenario.and").add_language("en", &["and"]));
        registry
    }
}

/// Process-wide default registry, populated once and read-only afterward.
pub fn default_registry() -> &'static KeywordRegistry {
    static REGISTRY: Lazy<KeywordRegistry> = Lazy::new(KeywordRegistry::default);
    &REGISTRY
}
