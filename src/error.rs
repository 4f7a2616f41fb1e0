//! Error types for document parsing.

use std::path::PathBuf;
use thiserror::Error;

/// A declaration did not have the token shape we expect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    #[error("declaration ended before token {0}")]
    UnexpectedEnd(usize),

    #[error("expected `{expected}` at token {position}, found `{found}`")]
    Unexpected {
        expected: &'static str,
        found: String,
        position: usize,
    },
}

/// A math construct outside of the vocabulary we know how to render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("unknown math element <{0}>")]
    UnknownElement(String),

    #[error("<{element}> needs {expected} children, found {found}")]
    Arity {
        element: String,
        expected: usize,
        found: usize,
    },

    #[error("malformed <mtable>: unexpected <{0}>")]
    MalformedTable(String),
}

/// Anything which stops a single document from producing records.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing `{0}` region")]
    MissingRegion(&'static str),

    #[error("the version table has no rows")]
    EmptyVersionTable,

    #[error("bad version label `{0}`")]
    BadVersion(String),

    #[error(transparent)]
    Declaration(#[from] DeclarationError),

    #[error(transparent)]
    Math(#[from] MathError),
}
