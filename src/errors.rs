use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn the input bytes into text.
#[derive(Error, Debug, PartialEq, Eq, Copy, Clone)]
pub enum EncodingError {
    #[error("Unknown character encoding has been provided.")]
    UnknownEncoding,
    #[error("Expected ASCII-compatible encoding.")]
    NonAsciiCompatibleEncoding,
    #[error("Input is not valid {encoding}.")]
    MalformedInput { encoding: &'static str },
}

/// Failure of a whole parse.
///
/// These come from the tokenizer side: the dispatcher itself never fails and
/// reports its mismatches as [`Diagnostic`](crate::Diagnostic)s instead.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Can't read `{}`: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("{message} (line {line}, column {column})")]
    Syntax {
        message: String,
        position: usize,
        line: usize,
        column: usize,
    },

    #[error("Document has no root element.")]
    NoRootElement,

    #[error("Element `{tag}` is not closed at the end of input.")]
    UnclosedElement { tag: String },
}

impl ParseError {
    #[inline]
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            ParseError::Syntax { .. } | ParseError::NoRootElement | ParseError::UnclosedElement { .. }
        )
    }
}
