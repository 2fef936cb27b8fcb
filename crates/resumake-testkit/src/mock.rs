//! Mock LaTeX engine for testing
//!
//! A small `sh` script standing in for `pdflatex`. Each run appends its
//! arguments to a call log, then either fails (on a chosen pass) the way a
//! LaTeX engine does, or writes `<stem>.pdf` plus the usual auxiliary
//! files into its working directory.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

const SCRIPT: &str = r#"#!/bin/sh
log='@LOG@'
echo "$*" >> "$log"
pass=$(wc -l < "$log" | tr -d ' ')
for last; do :; done
stem="${last%.tex}"
if [ "$pass" = "@FAIL_PASS@" ]; then
  echo "This is mock pdfTeX"
  echo "! LaTeX Error: mock failure on pass $pass."
  echo "mock engine failed" >&2
  exit 1
fi
echo "Output written on $stem.pdf"
printf '%%PDF-1.5 mock pass %s\n' "$pass" > "$stem.pdf"
: > "$stem.aux"
: > "$stem.out"
: > "$stem.log"
exit 0
"#;

/// An executable mock engine installed in a directory
#[derive(Debug, Clone)]
pub struct MockEngine {
    script: PathBuf,
    log: PathBuf,
}

impl MockEngine {
    /// Install an engine that always succeeds
    pub fn install(dir: &Path) -> Self {
        Self::write(dir, None)
    }

    /// Install an engine whose `pass`-th run (1-based, counted across the
    /// engine's lifetime) exits with status 1
    pub fn failing_on(dir: &Path, pass: u32) -> Self {
        Self::write(dir, Some(pass))
    }

    fn write(dir: &Path, fail_pass: Option<u32>) -> Self {
        let script = dir.join("mock-pdflatex");
        let log = dir.join("mock-pdflatex.calls");
        let fail = fail_pass.map(|p| p.to_string()).unwrap_or_else(|| "never".to_string());

        let body = SCRIPT
            .replace("@LOG@", &log.to_string_lossy())
            .replace("@FAIL_PASS@", &fail);
        fs::write(&script, body).expect("Failed to write mock engine");

        let mut perms = fs::metadata(&script)
            .expect("Failed to get metadata")
            .permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script, perms).expect("Failed to set permissions");

        Self { script, log }
    }

    /// Absolute path of the script, usable as `engine.program`
    pub fn program(&self) -> String {
        self.script.to_string_lossy().into_owned()
    }

    pub fn path(&self) -> &Path {
        &self.script
    }

    /// Argument lists of every run so far, one string per run
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }
}
