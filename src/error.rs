//! Recoverable failures reported back to whoever drives the library. None of
//! these are fatal; the UI turns them into footer messages and keeps running.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::BookId;

/// Why a login attempt was turned away.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    /// Name or degree was blank after trimming.
    #[error("Please fill all fields")]
    EmptyField,
    /// The degree did not match the one the desk is restricted to.
    #[error("Only {required} students are allowed!")]
    WrongDegree { required: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BorrowError {
    #[error("no reader named '{0}' is registered")]
    UnknownUser(String),
    #[error("book {0} is not in the catalog")]
    BookNotFound(BookId),
    #[error("'{title}' has no copies left")]
    OutOfStock { id: BookId, title: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReturnError {
    #[error("no reader named '{0}' is registered")]
    UnknownUser(String),
    /// The reader holds no copy of the requested book (or no book by that
    /// title at all).
    #[error("'{0}' is not among your borrowed books")]
    NotBorrowedByUser(String),
}

/// Problems reading the optional configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file at '{path}'")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}
