//! Snapshots of the steering macro.

use std::fs::FileTimes;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use anyhow::anyhow;
use tokio::fs;
use tracing::debug;
use tracing::warn;

/// The name of the snapshot directory inside the output directory.
pub const SNAPSHOT_DIR: &str = "steering_snapshot";

/// Copies `source` into `dest_dir`, keeping its file name.
///
/// The destination directory is created if it is missing; failing to create
/// it is an error. The copy itself is best effort: if it fails, the failure is
/// logged and `None` is returned.
pub async fn write_snapshot(source: &Path, dest_dir: &Path) -> Result<Option<PathBuf>> {
    fs::create_dir_all(dest_dir).await.with_context(|| {
        format!(
            "failed to create snapshot directory `{dir}`",
            dir = dest_dir.display()
        )
    })?;

    let Some(name) = source.file_name() else {
        warn!("steering macro `{path}` has no file name", path = source.display());
        return Ok(None);
    };

    let dest = dest_dir.join(name);
    match copy_preserving_times(source, &dest).await {
        Ok(()) => {
            debug!(
                "copied `{source}` to `{dest}`",
                source = source.display(),
                dest = dest.display()
            );
            Ok(Some(dest))
        }
        Err(e) => {
            warn!("steering macro was not copied: {e:#}");
            Ok(None)
        }
    }
}

/// Copies a file and carries over its access and modification times.
///
/// Only a failed copy is an error; failing to carry over the times is logged.
async fn copy_preserving_times(source: &Path, dest: &Path) -> Result<()> {
    fs::copy(source, dest).await.with_context(|| {
        format!(
            "failed to copy `{source}` to `{dest}`",
            source = source.display(),
            dest = dest.display()
        )
    })?;

    if let Err(e) = copy_times(source, dest).await {
        warn!("{e:#}");
    }

    Ok(())
}

/// Sets the access and modification times of `dest` to those of `source`.
async fn copy_times(source: &Path, dest: &Path) -> Result<()> {
    let metadata = fs::metadata(source).await?;
    let mut times = FileTimes::new().set_modified(metadata.modified()?);
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }

    let dest = dest.to_path_buf();
    tokio::task::spawn_blocking(move || {
        // The copy keeps the source's permissions, which may be read-only; the
        // owner can still set times through a read handle.
        std::fs::File::open(&dest)
            .and_then(|file| file.set_times(times))
            .with_context(|| {
                format!("failed to set file times of `{dest}`", dest = dest.display())
            })
    })
    .await
    .map_err(|e| anyhow!("file time task failed: {e}"))?
}
