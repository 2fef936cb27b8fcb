//! Timestamped artifact backups

use chrono::{Local, NaiveDateTime};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Timestamp format used in backup names (`20240101_120000`)
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// What `create_backup` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    /// A copy was written to this path
    Created(PathBuf),
    /// The artifact did not exist; nothing was copied
    Skipped { artifact: PathBuf },
}

/// `<stem>_<timestamp>.<ext>` for `artifact`
pub fn backup_file_name(artifact: &Path, timestamp: &NaiveDateTime) -> String {
    numbered_file_name(artifact, timestamp, 0)
}

/// `backup_file_name`, with `_<n>` after the timestamp for `n > 0`
fn numbered_file_name(artifact: &Path, timestamp: &NaiveDateTime, n: u32) -> String {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut base = format!("{}_{}", stem, timestamp.format(BACKUP_TIMESTAMP_FORMAT));
    if n > 0 {
        base.push_str(&format!("_{}", n));
    }

    match artifact.extension() {
        Some(ext) => format!("{}.{}", base, ext.to_string_lossy()),
        None => base,
    }
}

/// Copy `artifact` into `backup_dir` under a name stamped with local time
pub fn create_backup(
    artifact: impl AsRef<Path>,
    backup_dir: impl AsRef<Path>,
) -> Result<BackupOutcome> {
    create_backup_at(artifact, backup_dir, &Local::now().naive_local())
}

/// Same as [`create_backup`] with an explicit timestamp
///
/// A missing artifact is not an error. The backup directory is created on
/// demand. Existing backups are never replaced: a second backup in the same
/// second is named `<stem>_<timestamp>_1.<ext>`, then `_2`, and so on.
pub fn create_backup_at(
    artifact: impl AsRef<Path>,
    backup_dir: impl AsRef<Path>,
    timestamp: &NaiveDateTime,
) -> Result<BackupOutcome> {
    let artifact = artifact.as_ref();
    let backup_dir = backup_dir.as_ref();

    if !artifact.is_file() {
        log::warn!("no artifact at {}, skipping backup", artifact.display());
        return Ok(BackupOutcome::Skipped {
            artifact: artifact.to_path_buf(),
        });
    }

    fs::create_dir_all(backup_dir)?;
    let mut n = 0;
    let target = loop {
        let candidate = backup_dir.join(numbered_file_name(artifact, timestamp, n));
        match copy_new(artifact, &candidate) {
            Ok(()) => break candidate,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => n += 1,
            Err(e) => return Err(e.into()),
        }
    };
    log::debug!("backed up {} → {}", artifact.display(), target.display());

    Ok(BackupOutcome::Created(target))
}

/// Copy `source` to `target`, failing with `AlreadyExists` instead of
/// replacing an existing file
fn copy_new(source: &Path, target: &Path) -> io::Result<()> {
    let mut reader = File::open(source)?;
    let mut writer = OpenOptions::new().write(true).create_new(true).open(target)?;
    io::copy(&mut reader, &mut writer)?;
    Ok(())
}
