//! Publishes configured directories into a built documentation site.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use crate::config::{PublishConfig, ResolvedJob, SiteConfig};
use crate::copy::{copy_tree, CopyStats};
use crate::error::PublishError;

/// Outcome of a single copy job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    /// Logical name the job was published under
    pub name: String,

    /// Directory written to
    pub destination: PathBuf,

    /// What was copied
    pub stats: CopyStats,
}

/// Result of a publish.
#[derive(Debug)]
pub struct PublishResult {
    /// Per-job reports, in the order jobs ran
    pub jobs: Vec<JobReport>,

    /// Total publish time in milliseconds
    pub duration_ms: u64,
}

impl PublishResult {
    /// Combined stats across all jobs.
    pub fn totals(&self) -> CopyStats {
        let mut totals = CopyStats::default();
        for job in &self.jobs {
            totals += job.stats;
        }
        totals
    }
}

/// Copies build output and demos into the site directory after a docs build.
pub struct Publisher {
    config: PublishConfig,
}

impl Publisher {
    /// Create a new publisher.
    pub fn new(config: PublishConfig) -> Self {
        Self { config }
    }

    /// Resolve every job against `site`.
    pub fn resolve(&self, site: &SiteConfig) -> Vec<ResolvedJob> {
        self.config
            .jobs
            .iter()
            .map(|job| job.resolve(&site.site_dir, &self.config.source_root))
            .collect()
    }

    /// Run every job in order. The first failure stops the publish.
    pub fn publish(&self, site: &SiteConfig) -> Result<PublishResult, PublishError> {
        let start = Instant::now();
        let mut jobs = Vec::with_capacity(self.config.jobs.len());

        for job in &self.config.jobs {
            let resolved = job.resolve(&site.site_dir, &self.config.source_root);
            jobs.push(self.run_job(resolved)?);
        }

        Ok(PublishResult {
            jobs,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn run_job(&self, job: ResolvedJob) -> Result<JobReport, PublishError> {
        tracing::info!(
            "Publishing {} -> {}",
            job.source.display(),
            job.destination.display()
        );

        fs::create_dir_all(&job.destination)
            .map_err(|e| PublishError::io("create", &job.destination, e))?;

        let stats = copy_tree(&job.source, &job.destination, &self.config.options)?;

        tracing::debug!(
            "Published {}: {} files, {} directories, {} links",
            job.name,
            stats.files,
            stats.dirs,
            stats.symlinks
        );

        Ok(JobReport {
            name: job.name,
            destination: job.destination,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CopyJob, CopyOptions};
    use pretty_assertions::assert_eq;
    use std::io;
    use std::path::Path;
    use tempfile::tempdir;
    use walkdir::WalkDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn publisher(root: &Path) -> Publisher {
        Publisher::new(PublishConfig {
            source_root: root.to_path_buf(),
            ..Default::default()
        })
    }

    /// Relative path, contents and mtime of every file under `dir`.
    fn snapshot(dir: &Path) -> Vec<(PathBuf, Vec<u8>, std::time::SystemTime)> {
        WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .map(|e| e.unwrap())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                (
                    e.path().strip_prefix(dir).unwrap().to_path_buf(),
                    fs::read(e.path()).unwrap(),
                    e.metadata().unwrap().modified().unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn publishes_build_as_dist_and_demos() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("project");
        let out = temp.path().join("out");

        write(&root.join("build/app.js"), "console.log('app');");
        write(&root.join("demos/demo1/index.html"), "<h1>demo</h1>");

        let result = publisher(&root).publish(&SiteConfig::new(&out)).unwrap();

        assert_eq!(
            fs::read_to_string(out.join("dist/app.js")).unwrap(),
            "console.log('app');"
        );
        assert_eq!(
            fs::read_to_string(out.join("demos/demo1/index.html")).unwrap(),
            "<h1>demo</h1>"
        );
        assert!(!out.join("build").exists());

        let names: Vec<&str> = result.jobs.iter().map(|j| j.name.as_str()).collect();
        assert_eq!(names, vec!["dist", "demos"]);
        assert_eq!(result.totals().files, 2);
    }

    #[test]
    fn creates_missing_site_dir() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("project");
        let out = temp.path().join("does/not/exist/yet");

        fs::create_dir_all(root.join("build")).unwrap();
        fs::create_dir_all(root.join("demos")).unwrap();

        publisher(&root).publish(&SiteConfig::new(&out)).unwrap();

        assert!(out.join("dist").is_dir());
        assert!(out.join("demos").is_dir());
    }

    #[test]
    fn copies_are_identical_and_idempotent() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("project");
        let out = temp.path().join("out");

        write(&root.join("build/app.js"), "app");
        write(&root.join("build/chunks/vendor.js"), "vendor");
        write(&root.join("demos/demo1/index.html"), "<html>");

        let publisher = publisher(&root);
        let site = SiteConfig::new(&out);

        publisher.publish(&site).unwrap();
        let first = snapshot(&out);
        publisher.publish(&site).unwrap();
        let second = snapshot(&out);

        assert_eq!(first, second);

        let mut expected = snapshot(&root.join("build"))
            .into_iter()
            .map(|(p, c, m)| (Path::new("dist").join(p), c, m))
            .collect::<Vec<_>>();
        expected.extend(
            snapshot(&root.join("demos"))
                .into_iter()
                .map(|(p, c, m)| (Path::new("demos").join(p), c, m)),
        );
        expected.sort_by(|a, b| a.0.cmp(&b.0));
        let mut actual = second;
        actual.sort_by(|a, b| a.0.cmp(&b.0));

        assert_eq!(actual, expected);
    }

    #[test]
    fn missing_source_stops_remaining_jobs() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("project");
        let out = temp.path().join("out");

        write(&root.join("demos/demo1/index.html"), "<html>");

        let err = publisher(&root)
            .publish(&SiteConfig::new(&out))
            .unwrap_err();

        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
        assert_eq!(err.path(), Some(root.join("build").as_path()));
        // The destination for the failing job is created before copying.
        assert!(out.join("dist").is_dir());
        assert!(!out.join("demos").exists());
    }

    #[test]
    fn runs_extra_configured_jobs() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("project");
        let out = temp.path().join("out");

        write(&root.join("plugins/search/plugin.js"), "search");
        write(&root.join("plugins/.DS_Store"), "");

        let publisher = Publisher::new(PublishConfig {
            source_root: root.clone(),
            jobs: vec![CopyJob::new("plugins")],
            options: CopyOptions {
                ignore: vec![".DS_Store".to_string()],
                ..Default::default()
            },
        });

        let result = publisher.publish(&SiteConfig::new(&out)).unwrap();

        assert_eq!(result.jobs.len(), 1);
        assert!(out.join("plugins/search/plugin.js").exists());
        assert!(!out.join("plugins/.DS_Store").exists());
    }

    #[test]
    fn resolves_jobs_against_site_dir() {
        let publisher = publisher(Path::new("/project"));

        let resolved = publisher.resolve(&SiteConfig::new("/out"));

        let destinations: Vec<PathBuf> = resolved.into_iter().map(|j| j.destination).collect();
        assert_eq!(
            destinations,
            vec![PathBuf::from("/out/dist"), PathBuf::from("/out/demos")]
        );
    }
}
