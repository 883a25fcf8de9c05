pub mod error;
mod scenario;
mod story;

pub use error::{SyntaxError, SyntaxErrorKind};

use crate::keyword::{self, Keyword, KeywordRegistry};
use crate::story::Story;

/// Parser entry point for one story document.
///
/// The source text is supplied already read; parsing performs no I/O and
/// produces an immutable `Story` or the first `SyntaxError` encountered.
pub struct Parser<'a> {
    path: String,
    source: String,
    registry: &'a KeywordRegistry,
    symbol: String,
}

impl Parser<'static> {
    /// Parser over the process-wide default keyword registry.
    pub fn new(path: impl Into<String>, source: impl Into<String>) -> Parser<'static> {
        Parser::with_registry(path, source, keyword::default_registry())
    }
}

impl<'a> Parser<'a> {
    pub fn with_registry(
        path: impl Into<String>,
        source: impl Into<String>,
        registry: &'a KeywordRegistry,
    ) -> Parser<'a> {
        Parser {
            path: path.into(),
            source: source.into(),
            registry,
            symbol: "en".to_string(),
        }
    }

    /// Select the language symbol used for keyword matching (default `en`).
    pub fn language(mut self, symbol: &str) -> Parser<'a> {
        self.symbol = symbol.to_string();
        self
    }

    /// Parse the source into a complete Story.
    pub fn parse(&self) -> Result<Story, SyntaxError> {
        story::parse(&self.path, &self.source, self.registry, &self.symbol)
    }
}

/// Look up a keyword by path, failing with a structure error when a custom
/// registry does not define it.
fn lookup<'r>(
    registry: &'r KeywordRegistry,
    id: &str,
    path: &str,
    line: usize,
) -> Result<&'r Keyword, SyntaxError> {
    registry
        .get(id)
        .ok_or_else(|| SyntaxError::structure(path, line, format!("no '{}' keyword is registered", id)))
}

/// Match a line against a keyword, lifting an unknown-language failure into
/// a positioned syntax error.
fn match_keyword(
    keyword: &Keyword,
    symbol: &str,
    text: &str,
    path: &str,
    line: usize,
) -> Result<Option<String>, SyntaxError> {
    keyword
        .parse(symbol, text)
        .map_err(|error| SyntaxError::unknown_language(path, line, error))
}
