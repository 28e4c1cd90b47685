use std::path::PathBuf;
use std::string::FromUtf8Error;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SweepError>;

/// File variants leave the path out of their message; the sweep report
/// prefixes it once.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("{0}")]
    Usage(String),

    #[error("Directory {} does not exist", .0.display())]
    InvalidRoot(PathBuf),

    #[error("read failed: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not valid UTF-8: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },

    #[error("write failed: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SweepError {
    /// Fatal errors stop the run before any file is touched; the rest are
    /// reported per file and the sweep moves on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SweepError::Usage(_) | SweepError::InvalidRoot(_))
    }
}
