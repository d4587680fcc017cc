//! Purpose: Decode raw response text into a JSON value.
//! Exports: `from_str`, `categorize_error`, `ParseFailureCategory`.
//! Role: Maps serde_json failures onto `ErrorKind::MalformedJson`.
//! Invariants: The error message is the decoder's message; context goes in the hint.
//! Invariants: The decoder error is kept as the error source.

use crate::core::error::{Error, ErrorKind};
use serde_json::Value;
use serde_json::error::Category;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ParseFailureCategory {
    Syntax,
    Eof,
    Data,
    Io,
}

impl ParseFailureCategory {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::Eof => "eof",
            ParseFailureCategory::Data => "data",
            ParseFailureCategory::Io => "io",
        }
    }
}

pub(crate) fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    match err.classify() {
        Category::Syntax => ParseFailureCategory::Syntax,
        Category::Eof => ParseFailureCategory::Eof,
        Category::Data => ParseFailureCategory::Data,
        Category::Io => ParseFailureCategory::Io,
    }
}

pub(crate) fn hint_for_error(err: &serde_json::Error) -> String {
    format!(
        "parse category: {} (line {}, column {})",
        categorize_error(err).as_str(),
        err.line(),
        err.column()
    )
}

pub(crate) fn from_str(input: &str) -> Result<Value, Error> {
    serde_json::from_str::<Value>(input).map_err(|err| {
        Error::new(ErrorKind::MalformedJson)
            .with_message(err.to_string())
            .with_hint(hint_for_error(&err))
            .with_source(err)
    })
}
