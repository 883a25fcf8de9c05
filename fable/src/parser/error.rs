use std::fmt;
use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label};

use crate::keyword::{Keyword, UnknownLanguage};

/// A syntax error in a story document, addressed to a source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Path of the document being parsed.
    pub path: String,
    /// 1-based line number the error points at.
    pub line: usize,
    pub kind: SyntaxErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// An expected keyword is absent at its structural position.
    MissingKeyword {
        /// Path identifier of the keyword, e.g. `scenario.when`.
        keyword: String,
        /// The literal the reader expected, e.g. `when`.
        expected: String,
    },
    /// The document contains no content at all.
    EmptyFile,
    /// The document shape is wrong: missing description, scenario without
    /// a body, dangling scenario title at end of file.
    Structure(String),
    /// A keyword has no translations for the requested language symbol.
    UnknownLanguage { keyword: String, symbol: String },
}

impl SyntaxError {
    pub fn missing_keyword(path: &str, line: usize, keyword: &Keyword, symbol: &str) -> SyntaxError {
        SyntaxError {
            path: path.to_string(),
            line,
            kind: SyntaxErrorKind::MissingKeyword {
                keyword: keyword.path().to_string(),
                expected: keyword.expected(symbol).to_string(),
            },
        }
    }

    pub fn empty_file(path: &str) -> SyntaxError {
        SyntaxError {
            path: path.to_string(),
            line: 1,
            kind: SyntaxErrorKind::EmptyFile,
        }
    }

    pub fn structure(path: &str, line: usize, message: impl Into<String>) -> SyntaxError {
        SyntaxError {
            path: path.to_string(),
            line,
            kind: SyntaxErrorKind::Structure(message.into()),
        }
    }

    pub fn unknown_language(path: &str, line: usize, error: UnknownLanguage) -> SyntaxError {
        SyntaxError {
            path: path.to_string(),
            line,
            kind: SyntaxErrorKind::UnknownLanguage {
                keyword: error.keyword,
                symbol: error.symbol,
            },
        }
    }

    /// The kind-specific message, without the file/line prefix.
    pub fn message(&self) -> String {
        match &self.kind {
            SyntaxErrorKind::MissingKeyword { expected, .. } => {
                format!("expecting the '{}' keyword", expected)
            }
            SyntaxErrorKind::EmptyFile => "the story file is empty".to_string(),
            SyntaxErrorKind::Structure(message) => message.clone(),
            SyntaxErrorKind::UnknownLanguage { keyword, symbol } => format!(
                "no translation exists for the '{}' keyword and the '{}' language",
                keyword, symbol
            ),
        }
    }

    /// Convert to a codespan-reporting Diagnostic labelling the failing line.
    pub fn to_diagnostic(&self, file_id: usize, source: &str) -> Diagnostic<usize> {
        Diagnostic::error()
            .with_message(self.message())
            .with_labels(vec![Label::primary(file_id, line_span(source, self.line))])
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "File '{}', line {}: {}",
            self.path,
            self.line,
            self.message()
        )
    }
}

impl std::error::Error for SyntaxError {}

/// Byte span of a 1-based source line, excluding its terminator. Lines past
/// the end of the source collapse to an empty span at the end.
fn line_span(source: &str, line: usize) -> Range<usize> {
    let mut offset = 0;
    let mut current = 1;
    for raw in source.split_inclusive('\n') {
        if current == line {
            let text = raw.trim_end_matches(['\n', '\r']);
            return offset..offset + text.len();
        }
        offset += raw.len();
        current += 1;
    }
    source.len()..source.len()
}
