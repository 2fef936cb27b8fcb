//! notify event filtering

use notify::{Event, EventKind};
use resumake_core::{Result, ResumakeError};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::debounce::Debouncer;
use crate::regenerate::Regenerator;

/// Turns raw notify events for one file into debounced regenerations
pub struct ChangeHandler<R: Regenerator> {
    target: PathBuf,
    debouncer: Debouncer,
    regenerator: R,
}

impl<R: Regenerator> ChangeHandler<R> {
    /// `target` must exist; it is stored as a canonical path
    pub fn new(target: &Path, window: Duration, regenerator: R) -> Result<Self> {
        let target = target.canonicalize().map_err(|_| ResumakeError::MissingFile {
            role: "data",
            path: target.to_path_buf(),
        })?;

        Ok(Self {
            target,
            debouncer: Debouncer::new(window),
            regenerator,
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Regenerate now, outside the debounce window
    pub fn regenerate(&self) {
        self.regenerator.trigger();
    }

    /// Entry point for the notify callback. Returns whether a regeneration
    /// was triggered.
    pub fn handle(&mut self, event: notify::Result<Event>) -> bool {
        match event {
            Ok(event) => self.handle_at(&event, Instant::now()),
            Err(e) => {
                log::warn!("watch error: {}", e);
                false
            }
        }
    }

    /// Same as [`handle`](Self::handle) with an explicit event time
    pub fn handle_at(&mut self, event: &Event, now: Instant) -> bool {
        if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
            return false;
        }
        if !event.paths.iter().any(|path| self.is_target(path)) {
            return false;
        }
        if !self.debouncer.accept(now) {
            log::debug!("ignoring change to {} (debounced)", self.target.display());
            return false;
        }

        log::info!("{} changed", self.target.display());
        self.regenerator.trigger();
        true
    }

    fn is_target(&self, path: &Path) -> bool {
        if path.is_dir() {
            return false;
        }
        match path.canonicalize() {
            Ok(canonical) => canonical == self.target,
            // Already gone again (editor swap files); compare by location
            Err(_) => match (path.parent().and_then(|p| p.canonicalize().ok()), path.file_name()) {
                (Some(dir), Some(name)) => dir.join(name) == self.target,
                _ => false,
            },
        }
    }
}
