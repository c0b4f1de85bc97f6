//! Delivery of finished figures.

use std::fs::{self, File, FileTimes};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::info;

/// Copy `src` into the existing directory `dest_dir`, keeping permissions
/// and access/modification times. Returns the destination path.
pub fn copy_with_metadata(src: &Path, dest_dir: &Path) -> Result<PathBuf> {
    if !dest_dir.is_dir() {
        bail!("Delivery directory does not exist: {}", dest_dir.display());
    }
    let file_name = src
        .file_name()
        .with_context(|| format!("Not a file path: {}", src.display()))?;
    let dest = dest_dir.join(file_name);
    if dest.exists() && fs::canonicalize(src)? == fs::canonicalize(&dest)? {
        bail!(
            "{} and {} are the same file",
            src.display(),
            dest.display()
        );
    }

    let metadata = fs::metadata(src)
        .with_context(|| format!("Failed to stat {}", src.display()))?;
    // fs::copy also carries the permission bits over
    let bytes = fs::copy(src, &dest)
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dest.display()))?;

    let times = FileTimes::new()
        .set_accessed(metadata.accessed()?)
        .set_modified(metadata.modified()?);
    File::open(&dest)
        .and_then(|f| f.set_times(times))
        .with_context(|| format!("Failed to set file times on {}", dest.display()))?;

    info!(
        src = %src.display(),
        dest = %dest.display(),
        bytes = bytes,
        "Copied figure"
    );
    Ok(dest)
}
