//! Site config handed over by the documentation build, and the copy jobs run against it.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::PublishError;

/// Build configuration supplied by the documentation generator.
///
/// Only `site_dir` is read. Any other keys in the mapping are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SiteConfig {
    /// Output root of the documentation build
    pub site_dir: PathBuf,
}

impl SiteConfig {
    pub fn new(site_dir: impl Into<PathBuf>) -> Self {
        Self {
            site_dir: site_dir.into(),
        }
    }

    /// Parse the build tool's config mapping from JSON.
    pub fn from_json(json: &str) -> Result<Self, PublishError> {
        serde_json::from_str(json).map_err(|e| PublishError::Config(e.to_string()))
    }
}

/// A directory to publish under the site directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyJob {
    /// Subdirectory name at the destination
    pub name: String,

    /// Directory on disk, when it differs from `name`
    pub source: Option<PathBuf>,
}

impl CopyJob {
    /// A job whose source directory has the same name as its destination.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
        }
    }

    /// A job published under `name` but read from `source`.
    pub fn remapped(name: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source: Some(source.into()),
        }
    }

    /// Physical source directory name.
    pub fn source_dir(&self) -> &Path {
        self.source
            .as_deref()
            .unwrap_or_else(|| Path::new(&self.name))
    }

    /// Resolve against the site directory and the root sources live under.
    pub fn resolve(&self, site_dir: &Path, source_root: &Path) -> ResolvedJob {
        ResolvedJob {
            name: self.name.clone(),
            source: source_root.join(self.source_dir()),
            destination: site_dir.join(&self.name),
        }
    }

    /// Jobs run when nothing else is configured: the `build` output
    /// published as `dist`, then `demos`.
    pub fn defaults() -> Vec<CopyJob> {
        vec![CopyJob::remapped("dist", "build"), CopyJob::new("demos")]
    }
}

/// A copy job with concrete paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedJob {
    pub name: String,
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// How trees are copied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyOptions {
    /// Recreate symbolic links instead of copying what they point to
    pub symlinks: bool,

    /// Entry names skipped at any depth
    pub ignore: Vec<String>,
}

impl CopyOptions {
    pub(crate) fn is_ignored(&self, name: &std::ffi::OsStr) -> bool {
        self.ignore.iter().any(|i| name == i.as_str())
    }
}

/// Configuration for a publisher.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    /// Relative job sources resolve against this directory
    pub source_root: PathBuf,

    /// Jobs, run in order
    pub jobs: Vec<CopyJob>,

    /// Tree copy behaviour
    pub options: CopyOptions,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("."),
            jobs: CopyJob::defaults(),
            options: CopyOptions::default(),
        }
    }
}
