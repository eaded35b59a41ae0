//! Write a default docship.toml.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());

    Ok(())
}

pub const DEFAULT_CONFIG: &str = r#"# docship configuration

[site]
# Documentation build output directory
dir = "site"

[source]
# Directory the copy sources below are relative to
root = "."

# Published as <site>/dist, read from ./build
[[copy]]
name = "dist"
source = "build"

[[copy]]
name = "demos"

[options]
# Recreate symbolic links instead of copying their targets
symlinks = false

# File or directory names to skip
ignore = []
"#;
