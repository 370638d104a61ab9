//! Report archival: verify the source directory, then copy it verbatim
//! into the build's report storage.

use crate::error::PublishError;
use crate::host::BuildHost;
use std::fs;
use std::path::Path;

/// Gate on the source directory, then copy its whole tree to `target`.
///
/// Re-running a build simply re-copies over the previous contents; there
/// is no incremental sync and no conflict handling. Any I/O failure during
/// the copy aborts the publish step.
pub fn copy_reports<H: BuildHost>(
    host: &mut H,
    source: &Path,
    target: &Path,
) -> Result<(), PublishError> {
    if !source.exists() {
        host.append_log(&format!("Missing directory {}", source.display()));
        return Err(PublishError::MissingSourceDir {
            dir: source.to_path_buf(),
        });
    }
    if fs::read_dir(source)?.next().is_none() {
        host.append_log(&format!(
            "Missing selenium result files in directory {}",
            source.display()
        ));
        return Err(PublishError::EmptySourceDir {
            dir: source.to_path_buf(),
        });
    }
    host.append_log("Copying the reports.");
    host.copy_tree(source, target)?;
    Ok(())
}
