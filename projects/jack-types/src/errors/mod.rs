use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::Span;

mod convert;
mod display;

/// The result type of this crate.
pub type Result<T> = std::result::Result<T, JackError>;

/// A boxed error kind, wrapping a [JackErrorKind].
#[derive(Clone, PartialEq, Eq)]
pub struct JackError {
    kind: Box<JackErrorKind>,
}

/// The kind of [JackError].
///
/// Every kind is fatal to the source unit it was raised in; none of them is
/// recovered from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JackErrorKind {
    /// A source unit could not be read or an artifact could not be written.
    #[error("{}: {message}", path.display())]
    IoError { path: PathBuf, message: String },

    /// A lexeme matched none of the five token classes.
    #[error("line {line}: {message} '{lexeme}'")]
    LexicalError { span: Span, line: usize, lexeme: String, message: String },

    /// A grammar rule met a token it cannot consume.
    #[error("line {line}: {message}, found {found}")]
    ParseError { span: Span, line: usize, found: String, message: String },

    /// `jack.toml` could not be parsed.
    #[error("config error: {message}")]
    ConfigError { message: String },
}

impl JackError {
    pub fn kind(&self) -> &JackErrorKind {
        &self.kind
    }

    pub fn io(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        JackErrorKind::IoError { path: path.as_ref().to_path_buf(), message: message.into() }.into()
    }

    pub fn lexical(span: Span, line: usize, lexeme: impl Into<String>, message: impl Into<String>) -> Self {
        JackErrorKind::LexicalError { span, line, lexeme: lexeme.into(), message: message.into() }.into()
    }

    pub fn parse(span: Span, line: usize, found: impl Into<String>, message: impl Into<String>) -> Self {
        JackErrorKind::ParseError { span, line, found: found.into(), message: message.into() }.into()
    }

    pub fn config(message: impl Into<String>) -> Self {
        JackErrorKind::ConfigError { message: message.into() }.into()
    }

    /// Byte span of the offending lexeme or token, if the error has one.
    pub fn span(&self) -> Option<Span> {
        match self.kind() {
            JackErrorKind::LexicalError { span, .. } | JackErrorKind::ParseError { span, .. } => Some(*span),
            _ => None,
        }
    }

    /// 1-based source line of the offending lexeme or token, if the error has one.
    pub fn line(&self) -> Option<usize> {
        match self.kind() {
            JackErrorKind::LexicalError { line, .. } | JackErrorKind::ParseError { line, .. } => Some(*line),
            _ => None,
        }
    }
}
