//! Errors raised while publishing.

use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur during publish.
///
/// Filesystem failures keep the underlying [`io::Error`] intact so callers can
/// still match on its kind.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid site config: {0}")]
    Config(String),
}

impl PublishError {
    pub(crate) fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Wrap a directory walk error, keeping the path it failed on.
    pub(crate) fn walk(fallback: &Path, err: walkdir::Error) -> Self {
        let path = err
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| fallback.to_path_buf());
        Self::Io {
            action: "read",
            path,
            source: io::Error::from(err),
        }
    }

    /// Kind of the underlying filesystem error, if this is one.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Io { source, .. } => Some(source.kind()),
            Self::Config(_) => None,
        }
    }

    /// Path the failing operation was applied to.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::Config(_) => None,
        }
    }
}
