//! Data file watcher for resumake.
//!
//! Watches the directory containing the resume data file and re-runs the
//! generator whenever the file changes.
//!
//! - [`debounce`]: drops events that arrive too soon after an accepted one
//! - [`handler`]: filters notify events down to the target file
//! - [`regenerate`]: launches the generator as a separate process
//! - [`watcher`]: ties them to a notify watcher until shutdown

pub mod debounce;
pub mod handler;
pub mod regenerate;
pub mod watcher;

pub use debounce::Debouncer;
pub use handler::ChangeHandler;
pub use regenerate::{RegenerationEvent, Regenerator, SubprocessRegenerator};
pub use watcher::{WatchOptions, watch};
