use resumake_core::{Result, ResumakeError};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;

use crate::resolve::resolve_engine;

/// Result of a command execution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
}

impl ExecResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs one engine invocation to completion
///
/// `Err` means the command could not be run at all; a command that ran and
/// failed is an `Ok` with a non-zero `exit_code`.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<ExecResult>;
}

/// Runs real processes, resolving the program first
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<ExecResult> {
        let binary = resolve_engine(program)?;
        log::debug!("running {} {:?} in {}", binary.display(), args, cwd.display());

        let start = Instant::now();
        let output = Command::new(&binary)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                ResumakeError::EngineExecFailed(format!(
                    "Failed to execute {}: {}",
                    binary.display(),
                    e
                ))
            })?;

        Ok(ExecResult {
            // Killed by a signal
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resumake_testkit::temp_dir_in_workspace;

    #[test]
    fn test_success_is_exit_code_zero() {
        let ok = ExecResult::default();
        assert!(ok.success());
        let failed = ExecResult {
            exit_code: 1,
            ..Default::default()
        };
        assert!(!failed.success());
    }

    #[test]
    fn test_system_runner_missing_program() {
        let temp = temp_dir_in_workspace();
        let result = SystemRunner.run("resumake-no-such-engine-xyz", &[], temp.path());
        assert!(matches!(result, Err(ResumakeError::EngineNotFound { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_captures_output() {
        let temp = temp_dir_in_workspace();
        let args = vec!["-c".to_string(), "echo out; echo err >&2; pwd; exit 3".to_string()];
        let result = SystemRunner.run("sh", &args, temp.path()).unwrap();

        assert_eq!(result.exit_code, 3);
        assert!(result.stdout.starts_with("out\n"));
        assert_eq!(result.stderr, "err\n");
        let cwd = result.stdout.lines().nth(1).unwrap();
        assert_eq!(
            Path::new(cwd).canonicalize().unwrap(),
            temp.path().canonicalize().unwrap()
        );
    }
}
