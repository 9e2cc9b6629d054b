//! Error types for the filexpand core library
//!
//! Path expansion itself never fails: anything the filesystem refuses is
//! folded into "matches nothing". These errors cover the fallible edges of
//! the crate: configuration loading, template file substitution and regex
//! based splitting.

use thiserror::Error;

pub mod io;
pub mod validation;

pub use self::io::{IoError, IoErrorKind};
pub use self::validation::ValidationError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the filexpand core library
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Layered configuration could not be extracted
    #[error("Failed to load configuration: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}
