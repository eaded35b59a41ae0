//! Recursive directory copy that keeps file metadata.

use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::CopyOptions;
use crate::error::PublishError;

/// What a copy wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub files: usize,
    pub dirs: usize,
    pub symlinks: usize,
}

impl std::ops::AddAssign for CopyStats {
    fn add_assign(&mut self, other: Self) {
        self.files += other.files;
        self.dirs += other.dirs;
        self.symlinks += other.symlinks;
    }
}

enum EntryKind {
    File,
    Dir,
    Symlink,
}

/// Copy the contents of `source` into `destination`.
///
/// The top-level listing of `source` is read once up front. Subdirectories are
/// copied as whole subtrees and merged into any existing directory of the same
/// name; files overwrite existing files. `destination` must already exist.
pub fn copy_tree(
    source: &Path,
    destination: &Path,
    options: &CopyOptions,
) -> Result<CopyStats, PublishError> {
    let mut entries = fs::read_dir(source)
        .map_err(|e| PublishError::io("read", source, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<PathBuf>, io::Error>>()
        .map_err(|e| PublishError::io("read", source, e))?;
    entries.sort();

    let mut stats = CopyStats::default();

    for src in entries {
        let Some(name) = src.file_name() else {
            continue;
        };
        if options.is_ignored(name) {
            tracing::debug!("Skipping {}", src.display());
            continue;
        }

        let dst = destination.join(name);

        match entry_kind(&src, options)? {
            EntryKind::Dir => stats += copy_subtree(&src, &dst, options)?,
            EntryKind::Symlink => {
                copy_symlink(&src, &dst)?;
                stats.symlinks += 1;
            }
            EntryKind::File => {
                copy_file(&src, &dst)?;
                stats.files += 1;
            }
        }
    }

    Ok(stats)
}

/// Classify a top-level entry. Links are followed unless they are preserved.
fn entry_kind(path: &Path, options: &CopyOptions) -> Result<EntryKind, PublishError> {
    if options.symlinks {
        let meta = fs::symlink_metadata(path).map_err(|e| PublishError::io("read", path, e))?;
        if meta.file_type().is_symlink() {
            return Ok(EntryKind::Symlink);
        }
    }

    let meta = fs::metadata(path).map_err(|e| PublishError::io("read", path, e))?;
    if meta.is_dir() {
        Ok(EntryKind::Dir)
    } else {
        Ok(EntryKind::File)
    }
}

/// Copy a whole directory tree, including `source` itself, to `destination`.
fn copy_subtree(
    source: &Path,
    destination: &Path,
    options: &CopyOptions,
) -> Result<CopyStats, PublishError> {
    let mut stats = CopyStats::default();

    fs::create_dir_all(destination).map_err(|e| PublishError::io("create", destination, e))?;
    stats.dirs += 1;

    // Directory metadata is applied after their contents are written.
    let mut dirs = vec![(source.to_path_buf(), destination.to_path_buf())];

    let walker = WalkDir::new(source)
        .min_depth(1)
        .follow_links(!options.symlinks)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !options.is_ignored(e.file_name()));

    for entry in walker {
        let entry = entry.map_err(|e| PublishError::walk(source, e))?;
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let dst = destination.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&dst).map_err(|e| PublishError::io("create", &dst, e))?;
            dirs.push((entry.path().to_path_buf(), dst));
            stats.dirs += 1;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &dst)?;
            stats.symlinks += 1;
        } else {
            copy_file(entry.path(), &dst)?;
            stats.files += 1;
        }
    }

    for (src, dst) in dirs.iter().rev() {
        copy_dir_metadata(src, dst)?;
    }

    Ok(stats)
}

/// Copy one file with its permissions and access/modification times.
pub fn copy_file(source: &Path, destination: &Path) -> Result<(), PublishError> {
    let metadata = fs::metadata(source).map_err(|e| PublishError::io("read", source, e))?;

    let mut reader = File::open(source).map_err(|e| PublishError::io("read", source, e))?;
    let mut writer =
        File::create(destination).map_err(|e| PublishError::io("write", destination, e))?;
    io::copy(&mut reader, &mut writer).map_err(|e| PublishError::io("write", destination, e))?;

    let times = file_times(&metadata).map_err(|e| PublishError::io("read", source, e))?;
    writer
        .set_times(times)
        .map_err(|e| PublishError::io("set times on", destination, e))?;
    drop(writer);

    fs::set_permissions(destination, metadata.permissions())
        .map_err(|e| PublishError::io("set permissions on", destination, e))?;

    tracing::debug!("Copied {} -> {}", source.display(), destination.display());

    Ok(())
}

fn file_times(metadata: &fs::Metadata) -> io::Result<FileTimes> {
    let mut times = FileTimes::new().set_modified(metadata.modified()?);
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    Ok(times)
}

fn copy_dir_metadata(source: &Path, destination: &Path) -> Result<(), PublishError> {
    let metadata = fs::metadata(source).map_err(|e| PublishError::io("read", source, e))?;

    #[cfg(unix)]
    {
        let times = file_times(&metadata).map_err(|e| PublishError::io("read", source, e))?;
        let dir = File::open(destination).map_err(|e| PublishError::io("open", destination, e))?;
        dir.set_times(times)
            .map_err(|e| PublishError::io("set times on", destination, e))?;
    }

    fs::set_permissions(destination, metadata.permissions())
        .map_err(|e| PublishError::io("set permissions on", destination, e))
}

/// Recreate the link at `source` as a link at `destination`, replacing an existing link.
fn copy_symlink(source: &Path, destination: &Path) -> Result<(), PublishError> {
    let target = fs::read_link(source).map_err(|e| PublishError::io("read link", source, e))?;

    if let Ok(existing) = fs::symlink_metadata(destination) {
        if existing.file_type().is_symlink() {
            fs::remove_file(destination)
                .map_err(|e| PublishError::io("remove", destination, e))?;
        }
    }

    make_symlink(source, &target, destination)
        .map_err(|e| PublishError::io("create link", destination, e))?;

    tracing::debug!(
        "Linked {} -> {}",
        destination.display(),
        target.display()
    );

    Ok(())
}

#[cfg(unix)]
fn make_symlink(_source: &Path, target: &Path, destination: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, destination)
}

#[cfg(windows)]
fn make_symlink(source: &Path, target: &Path, destination: &Path) -> io::Result<()> {
    if fs::metadata(source).map(|m| m.is_dir()).unwrap_or(false) {
        std::os::windows::fs::symlink_dir(target, destination)
    } else {
        std::os::windows::fs::symlink_file(target, destination)
    }
}

#[cfg(not(any(unix, windows)))]
fn make_symlink(_source: &Path, _target: &Path, _destination: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symbolic links are not supported on this platform",
    ))
}
