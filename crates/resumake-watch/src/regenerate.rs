//! Out-of-process regeneration

use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

/// Something that rebuilds the resume when the data changes
///
/// `trigger` is called on the notify event thread and must not block.
pub trait Regenerator: Send + 'static {
    fn trigger(&self);
}

/// Progress of one generator run, as passed to a reporter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegenerationEvent {
    Started,
    /// The generator exited 0; `stdout` is what it printed
    Succeeded { stdout: String },
    /// The generator could not be started or exited non-zero
    Failed { reason: String, output: String },
}

type Reporter = Box<dyn Fn(&RegenerationEvent) + Send + Sync>;

#[derive(Debug, Default)]
struct RunState {
    running: bool,
    pending: bool,
    completed: usize,
}

struct Inner {
    program: PathBuf,
    args: Vec<String>,
    state: Mutex<RunState>,
    reporter: Reporter,
}

impl Inner {
    fn state(&self) -> MutexGuard<'_, RunState> {
        // A panicking reaper must not stop the watcher
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn report(&self, event: RegenerationEvent) {
        (self.reporter)(&event);
    }
}

/// Runs the generator as a child process
///
/// At most one child runs at a time. Triggers that arrive while a child is
/// running collapse into a single rerun, started as soon as it exits.
#[derive(Clone)]
pub struct SubprocessRegenerator {
    inner: Arc<Inner>,
}

impl SubprocessRegenerator {
    /// Regenerator that only logs
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self::with_reporter(program, args, |_| {})
    }

    /// Regenerator that also hands every [`RegenerationEvent`] to `reporter`.
    /// Outcomes are reported from the reaper thread.
    pub fn with_reporter<F>(program: impl Into<PathBuf>, args: Vec<String>, reporter: F) -> Self
    where
        F: Fn(&RegenerationEvent) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                program: program.into(),
                args,
                state: Mutex::new(RunState::default()),
                reporter: Box::new(reporter),
            }),
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner.state().running
    }

    /// Number of finished child runs (successful or not)
    pub fn completed_runs(&self) -> usize {
        self.inner.state().completed
    }
}

impl fmt::Debug for SubprocessRegenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubprocessRegenerator")
            .field("program", &self.inner.program)
            .field("args", &self.inner.args)
            .finish_non_exhaustive()
    }
}

impl Regenerator for SubprocessRegenerator {
    fn trigger(&self) {
        {
            let mut state = self.inner.state();
            if state.running {
                state.pending = true;
                log::debug!("regeneration in progress, queued another run");
                return;
            }
            state.running = true;
        }
        launch(Arc::clone(&self.inner));
    }
}

/// Spawn the child and a reaper thread that waits for it
fn launch(inner: Arc<Inner>) {
    log::info!(
        "regenerating: {} {}",
        inner.program.display(),
        inner.args.join(" ")
    );
    inner.report(RegenerationEvent::Started);

    let child = Command::new(&inner.program)
        .args(&inner.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn();

    let child = match child {
        Ok(child) => child,
        Err(e) => {
            let reason = format!("failed to start {}: {}", inner.program.display(), e);
            log::error!("{}", reason);
            inner.report(RegenerationEvent::Failed {
                reason,
                output: String::new(),
            });
            finish(&inner);
            return;
        }
    };

    let reaper = Arc::clone(&inner);
    let spawned = thread::Builder::new()
        .name("resumake-reaper".to_string())
        .spawn(move || {
            let event = match child.wait_with_output() {
                Ok(output) if output.status.success() => {
                    log::info!("regeneration finished");
                    log_output(&output.stdout, log::Level::Debug);
                    RegenerationEvent::Succeeded {
                        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    }
                }
                Ok(output) => {
                    log::error!("regeneration failed ({})", output.status);
                    log_output(&output.stdout, log::Level::Debug);
                    log_output(&output.stderr, log::Level::Debug);
                    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
                    combined.push_str(&String::from_utf8_lossy(&output.stderr));
                    RegenerationEvent::Failed {
                        reason: format!("generator exited with {}", output.status),
                        output: combined,
                    }
                }
                Err(e) => {
                    log::error!("failed to wait for generator: {}", e);
                    RegenerationEvent::Failed {
                        reason: format!("failed to wait for generator: {}", e),
                        output: String::new(),
                    }
                }
            };
            reaper.report(event);
            finish(&reaper);
        });

    if let Err(e) = spawned {
        log::error!("failed to start reaper thread: {}", e);
        finish(&inner);
    }
}

/// Mark the current run done and start the queued one, if any
fn finish(inner: &Arc<Inner>) {
    let rerun = {
        let mut state = inner.state();
        state.completed += 1;
        if state.pending {
            state.pending = false;
            true
        } else {
            state.running = false;
            false
        }
    };

    if rerun {
        launch(Arc::clone(inner));
    }
}

fn log_output(bytes: &[u8], level: log::Level) {
    for line in String::from_utf8_lossy(bytes).lines().filter(|l| !l.trim().is_empty()) {
        log::log!(level, "  {}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resumake_testkit::temp_dir_in_workspace;
    use std::fs;
    use std::time::{Duration, Instant};

    fn wait_for_idle(regenerator: &SubprocessRegenerator) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while regenerator.is_running() {
            assert!(Instant::now() < deadline, "regeneration did not finish");
            thread::sleep(Duration::from_millis(20));
        }
    }

    /// Reporter that records every event
    fn recorder() -> (
        Arc<Mutex<Vec<RegenerationEvent>>>,
        impl Fn(&RegenerationEvent) + Send + Sync + 'static,
    ) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        (events, move |event: &RegenerationEvent| {
            sink.lock().unwrap().push(event.clone())
        })
    }

    #[test]
    fn test_missing_program_reports_failure() {
        let (events, reporter) = recorder();
        let regenerator = SubprocessRegenerator::with_reporter(
            "/nonexistent/resumake-generator",
            Vec::new(),
            reporter,
        );
        regenerator.trigger();

        let events = events.lock().unwrap().clone();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], RegenerationEvent::Started);
        match &events[1] {
            RegenerationEvent::Failed { reason, .. } => {
                assert!(reason.contains("failed to start"), "got: {}", reason)
            }
            other => panic!("Expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_program_does_not_stick() {
        let regenerator =
            SubprocessRegenerator::new("/nonexistent/resumake-generator", Vec::new());
        regenerator.trigger();
        assert!(!regenerator.is_running());
        assert_eq!(regenerator.completed_runs(), 1);

        // Still usable afterwards
        regenerator.trigger();
        assert_eq!(regenerator.completed_runs(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_child_process() {
        let temp = temp_dir_in_workspace();
        let marker = temp.path().join("ran.txt");
        let script = format!("echo run >> '{}'", marker.display());
        let regenerator = SubprocessRegenerator::new("sh", vec!["-c".to_string(), script]);

        regenerator.trigger();
        wait_for_idle(&regenerator);

        assert_eq!(fs::read_to_string(&marker).unwrap(), "run\n");
        assert_eq!(regenerator.completed_runs(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_overlapping_triggers_coalesce_into_one_rerun() {
        let temp = temp_dir_in_workspace();
        let marker = temp.path().join("ran.txt");
        let script = format!("echo run >> '{}'; sleep 0.3", marker.display());
        let regenerator = SubprocessRegenerator::new("sh", vec!["-c".to_string(), script]);

        regenerator.trigger();
        assert!(regenerator.is_running());
        regenerator.trigger();
        regenerator.trigger();
        regenerator.trigger();
        wait_for_idle(&regenerator);

        // First run plus exactly one queued rerun
        assert_eq!(fs::read_to_string(&marker).unwrap(), "run\nrun\n");
        assert_eq!(regenerator.completed_runs(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_success_is_reported_with_stdout() {
        let (events, reporter) = recorder();
        let regenerator = SubprocessRegenerator::with_reporter(
            "sh",
            vec!["-c".to_string(), "echo generated".to_string()],
            reporter,
        );

        regenerator.trigger();
        wait_for_idle(&regenerator);

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                RegenerationEvent::Started,
                RegenerationEvent::Succeeded {
                    stdout: "generated\n".to_string()
                },
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_failure_is_reported_with_output() {
        let (events, reporter) = recorder();
        let regenerator = SubprocessRegenerator::with_reporter(
            "sh",
            vec!["-c".to_string(), "echo partial; echo broken >&2; exit 1".to_string()],
            reporter,
        );

        regenerator.trigger();
        wait_for_idle(&regenerator);

        let events = events.lock().unwrap().clone();
        assert_eq!(events.len(), 2);
        match &events[1] {
            RegenerationEvent::Failed { output, .. } => {
                assert_eq!(output, "partial\nbroken\n");
            }
            other => panic!("Expected Failed, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_child_is_not_fatal() {
        let regenerator =
            SubprocessRegenerator::new("sh", vec!["-c".to_string(), "exit 1".to_string()]);
        regenerator.trigger();
        wait_for_idle(&regenerator);
        assert_eq!(regenerator.completed_runs(), 1);
    }
}
