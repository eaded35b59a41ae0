//! Post-build hook command.
//!
//! The documentation build passes its configuration mapping as JSON on stdin.
//! Only `site_dir` is read from it.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use docship_static::SiteConfig;

use crate::config::ConfigFile;

/// Run the hook command.
pub fn run(config_path: &Path, site_dir: Option<PathBuf>) -> Result<()> {
    run_with(config_path, io::stdin().lock(), site_dir)
}

/// Publish using the build config mapping read from `input`.
///
/// `site_dir`, when given, replaces the site directory from the mapping.
pub fn run_with(config_path: &Path, mut input: impl Read, site_dir: Option<PathBuf>) -> Result<()> {
    let mut json = String::new();
    input
        .read_to_string(&mut json)
        .context("Failed to read build config")?;

    let mut site = SiteConfig::from_json(&json)?;
    if let Some(dir) = site_dir {
        site.site_dir = dir;
    }

    let file_config = ConfigFile::load(config_path)?;

    super::publish::publish(&file_config, &site)
}
