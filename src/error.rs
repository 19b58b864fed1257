use std::fmt;
use std::io;

/// Unified error type for the index.
///
/// Key-not-found is deliberately not in here: `get` signals it with
/// `Option` and `delete` is an idempotent no-op on absent keys.
#[derive(Debug)]
pub enum Error {
    /// IO error from the snapshot file or stream.
    Io(io::Error),
    /// A snapshot line that cannot be split into key and value.
    MalformedRecord {
        /// 1-based line number in the snapshot.
        line: usize,
        content: String,
    },
}

impl Error {
    /// True if this is a missing-file error on load.
    ///
    /// Callers treat a missing snapshot as "no data loaded" rather than a
    /// failure; any other IO error still propagates as fatal.
    pub fn is_missing_file(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "IO error: {e}"),
            Error::MalformedRecord { line, content } => {
                write!(f, "malformed record at line {line}: {content:?}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
