//! docship.toml loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use docship_static::{CopyJob, CopyOptions, PublishConfig};
use serde::Deserialize;

/// Configuration file structure (docship.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub source: SourceSection,
    /// Copy jobs; the built-in `dist` and `demos` jobs when absent
    pub copy: Option<Vec<JobEntry>>,
    #[serde(default)]
    pub options: OptionsSection,
}

#[derive(Debug, Deserialize)]
pub struct SiteSection {
    #[serde(default = "default_site_dir")]
    pub dir: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            dir: default_site_dir(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SourceSection {
    #[serde(default = "default_source_root")]
    pub root: String,
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            root: default_source_root(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct JobEntry {
    name: String,
    source: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct OptionsSection {
    #[serde(default)]
    symlinks: bool,
    #[serde(default)]
    ignore: Vec<String>,
}

fn default_site_dir() -> String {
    "site".to_string()
}
fn default_source_root() -> String {
    ".".to_string()
}

impl ConfigFile {
    /// Load configuration from `path` if it exists.
    /// Returns an error if the config file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
            let config = Self::parse(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
            tracing::info!("Loaded config from {}", path.display());
            return Ok(config);
        }
        Ok(Self::default())
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn site_dir(&self) -> PathBuf {
        PathBuf::from(&self.site.dir)
    }

    pub fn publish_config(&self) -> PublishConfig {
        let jobs = match &self.copy {
            Some(entries) => entries
                .iter()
                .map(|entry| match &entry.source {
                    Some(source) => CopyJob::remapped(&entry.name, source),
                    None => CopyJob::new(&entry.name),
                })
                .collect(),
            None => CopyJob::defaults(),
        };

        PublishConfig {
            source_root: PathBuf::from(&self.source.root),
            jobs,
            options: CopyOptions {
                symlinks: self.options.symlinks,
                ignore: self.options.ignore.clone(),
            },
        }
    }
}
