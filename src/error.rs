//! Error types for quire operations.
//!
//! Almost nothing in this crate fails: malformed markup and stylesheets
//! degrade to less structure or less styling, never to an error. The
//! variants below cover the few conditions a caller has to act on.

use thiserror::Error;

/// Errors that can occur while assembling a document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("document has no spine entries")]
    EmptySpine,

    #[error("stylesheet is {len} bytes, limit is {limit}")]
    StylesheetTooLarge { len: usize, limit: usize },

    #[error("stylesheet has {count} rules, limit is {limit}")]
    TooManyRules { count: usize, limit: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
