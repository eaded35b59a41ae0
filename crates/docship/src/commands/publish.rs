//! Publish command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use docship_static::{PublishResult, Publisher, SiteConfig};

use crate::config::ConfigFile;

/// Run the publish command.
pub fn run(config_path: &Path, site_dir: Option<PathBuf>) -> Result<()> {
    let file_config = ConfigFile::load(config_path)?;

    let site = SiteConfig::new(site_dir.unwrap_or_else(|| file_config.site_dir()));

    publish(&file_config, &site)
}

/// Publish into `site` using the jobs from `file_config`.
pub fn publish(file_config: &ConfigFile, site: &SiteConfig) -> Result<()> {
    tracing::info!("Publishing into {}...", site.site_dir.display());

    let result = Publisher::new(file_config.publish_config())
        .publish(site)
        .with_context(|| format!("Failed to publish into {}", site.site_dir.display()))?;

    report(&result);

    Ok(())
}

fn report(result: &PublishResult) {
    for job in &result.jobs {
        tracing::info!(
            "{}: {} files -> {}",
            job.name,
            job.stats.files,
            job.destination.display()
        );
    }

    let totals = result.totals();
    tracing::info!(
        "Published {} files in {} directories in {}ms",
        totals.files,
        totals.dirs,
        result.duration_ms
    );
}
