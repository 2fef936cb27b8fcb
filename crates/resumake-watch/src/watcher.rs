//! Watch loop

use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use resumake_core::{Result, ResumakeError};
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crate::handler::ChangeHandler;
use crate::regenerate::Regenerator;

/// What to watch
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Resume data file; must exist when watching starts
    pub data_file: PathBuf,
    /// Minimum time between two accepted changes
    pub debounce: Duration,
}

/// Watch `options.data_file` until `shutdown` fires
///
/// Runs one regeneration immediately, then one per accepted change. The
/// directory holding the file is watched non-recursively, so saves that
/// replace the file (write to temp + rename) are seen too. Returns `Ok` when
/// a shutdown message arrives or every sender is dropped.
pub fn watch<R: Regenerator>(
    options: WatchOptions,
    regenerator: R,
    shutdown: Receiver<()>,
) -> Result<()> {
    if !options.data_file.is_file() {
        return Err(ResumakeError::MissingFile {
            role: "data",
            path: options.data_file,
        });
    }

    let mut handler = ChangeHandler::new(&options.data_file, options.debounce, regenerator)?;
    let target = handler.target().to_path_buf();
    let dir = target.parent().map(PathBuf::from).ok_or_else(|| {
        ResumakeError::WatchFailed(format!("{} has no parent directory", target.display()))
    })?;

    handler.regenerate();

    let mut watcher = RecommendedWatcher::new(
        move |event: notify::Result<notify::Event>| {
            handler.handle(event);
        },
        Config::default(),
    )
    .map_err(|e| ResumakeError::WatchFailed(e.to_string()))?;

    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .map_err(|e| ResumakeError::WatchFailed(format!("{}: {}", dir.display(), e)))?;
    log::info!(
        "watching {} (debounce {} ms)",
        target.display(),
        options.debounce.as_millis()
    );

    // Err means every sender is gone, which is a shutdown too
    let _ = shutdown.recv();

    drop(watcher);
    log::info!("stopped watching {}", target.display());
    Ok(())
}
