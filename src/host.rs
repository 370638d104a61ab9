use crate::types::BuildStatus;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Subdirectory of the build storage dir that receives the copied reports.
pub const SELENIUM_REPORTS_TARGET: &str = "seleniumReports";

/// Everything the publish pipeline needs from the enclosing build: a few
/// filesystem operations, the build log, and the build status. Nothing
/// else of the host leaks into the core.
pub trait BuildHost {
    /// All files under `dir`, recursively, as paths relative to `dir`,
    /// in directory-scan order (not sorted).
    fn read_dir_recursive(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Copy `src` into `dst` recursively, preserving relative paths and
    /// overwriting whatever is already there.
    fn copy_tree(&self, src: &Path, dst: &Path) -> io::Result<()>;

    /// Append one line to the build log.
    fn append_log(&mut self, line: &str);

    fn status(&self) -> BuildStatus;

    fn set_status(&mut self, status: BuildStatus);

    /// Persistent storage directory owned by this build.
    fn storage_dir(&self) -> PathBuf;
}

/// A build backed by the local filesystem. Retains its log lines so the
/// rendered summary (and the tests) can inspect them; echoes each line to
/// stdout unless quiet.
#[derive(Debug)]
pub struct LocalBuild {
    storage_dir: PathBuf,
    status: BuildStatus,
    quiet: bool,
    log: Vec<String>,
}

impl LocalBuild {
    pub fn new(storage_dir: PathBuf, quiet: bool) -> Self {
        LocalBuild {
            storage_dir,
            status: BuildStatus::Success,
            quiet,
            log: Vec::new(),
        }
    }

    pub fn log_lines(&self) -> &[String] {
        &self.log
    }
}

impl BuildHost for LocalBuild {
    fn read_dir_recursive(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir) {
            let entry = entry.map_err(io::Error::other)?;
            if entry.file_type().is_file() {
                let rel = entry
                    .path()
                    .strip_prefix(dir)
                    .expect("walkdir yields paths under its root");
                files.push(rel.to_path_buf());
            }
        }
        Ok(files)
    }

    fn copy_tree(&self, src: &Path, dst: &Path) -> io::Result<()> {
        for entry in WalkDir::new(src) {
            let entry = entry.map_err(io::Error::other)?;
            let rel = entry
                .path()
                .strip_prefix(src)
                .expect("walkdir yields paths under its root");
            let target = dst.join(rel);
            if entry.file_type().is_dir() {
                fs::create_dir_all(&target)?;
            } else {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                debug!("copying {} -> {}", entry.path().display(), target.display());
                fs::copy(entry.path(), &target)?;
            }
        }
        Ok(())
    }

    fn append_log(&mut self, line: &str) {
        if !self.quiet {
            println!("{line}");
        }
        self.log.push(line.to_string());
    }

    fn status(&self) -> BuildStatus {
        self.status
    }

    fn set_status(&mut self, status: BuildStatus) {
        self.status = status;
    }

    fn storage_dir(&self) -> PathBuf {
        self.storage_dir.clone()
    }
}
