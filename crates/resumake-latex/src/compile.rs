//! Two-pass document compilation

use resumake_core::config::EngineConfig;
use resumake_core::{Result, ResumakeError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::exec::{CommandRunner, ExecResult};

/// Engine passes per compile (the second resolves cross-references)
pub const COMPILE_PASSES: u8 = 2;

/// What to compile and how
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Rendered `.tex` document
    pub document: PathBuf,
    /// Final artifact base name, without extension
    pub artifact_name: String,
    pub engine: EngineConfig,
}

/// Result of a successful compile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutcome {
    /// Final artifact path (`<dir>/<artifact_name>.<ext>`)
    pub artifact: PathBuf,
    /// Auxiliary files that were removed
    pub removed: Vec<PathBuf>,
    /// Total engine time across passes
    pub duration_ms: u64,
}

/// Compile `options.document` into `<artifact_name>.<ext>` next to it
///
/// # Steps
/// 1. Run the engine [`COMPILE_PASSES`] times in the document directory,
///    stopping at the first failing pass
/// 2. Rename `<stem>.<ext>` to `<artifact_name>.<ext>`
/// 3. Remove `<stem>.<aux ext>` for every configured aux extension
///
/// I/O failures in steps 2 and 3 are reported as
/// `ResumakeError::CompileCleanupFailed`.
pub fn compile_document(
    options: &CompileOptions,
    runner: &dyn CommandRunner,
) -> Result<CompileOutcome> {
    let document = options.document.as_path();
    if !document.is_file() {
        return Err(ResumakeError::MissingFile {
            role: "document",
            path: document.to_path_buf(),
        });
    }

    let dir = document_dir(document);
    let (file_name, stem) = match (document.file_name(), document.file_stem()) {
        (Some(name), Some(stem)) => (name.to_string_lossy(), stem.to_string_lossy()),
        _ => {
            return Err(ResumakeError::MissingFile {
                role: "document",
                path: document.to_path_buf(),
            });
        }
    };

    let mut args = options.engine.args.clone();
    args.push(file_name.into_owned());

    let mut duration_ms = 0;
    for pass in 1..=COMPILE_PASSES {
        log::debug!(
            "compile pass {}/{}: {}",
            pass,
            COMPILE_PASSES,
            options.engine.program
        );
        let result = runner.run(&options.engine.program, &args, dir)?;
        duration_ms += result.duration_ms;

        if !result.success() {
            let diagnostic = extract_diagnostic(&result);
            log::error!(
                "{} pass {} exited with code {}:\n{}",
                options.engine.program,
                pass,
                result.exit_code,
                diagnostic
            );
            return Err(ResumakeError::CompilePassFailed {
                pass,
                exit_code: result.exit_code,
                diagnostic,
            });
        }
    }

    let extension = &options.engine.artifact_extension;
    let produced = dir.join(format!("{}.{}", stem, extension));
    if !produced.is_file() {
        return Err(ResumakeError::ArtifactMissing { path: produced });
    }

    let artifact = dir.join(format!("{}.{}", options.artifact_name, extension));
    if produced != artifact {
        fs::rename(&produced, &artifact).map_err(|source| ResumakeError::CompileCleanupFailed {
            path: artifact.clone(),
            source,
        })?;
    }

    let removed = remove_aux_files(dir, &stem, &options.engine.aux_extensions)?;
    log::info!(
        "compiled {} in {} ms ({} aux file(s) removed)",
        artifact.display(),
        duration_ms,
        removed.len()
    );

    Ok(CompileOutcome {
        artifact,
        removed,
        duration_ms,
    })
}

/// Captured stderr plus the `!`-prefixed error lines from stdout
///
/// LaTeX engines report errors on stdout; stderr is usually empty.
pub fn extract_diagnostic(result: &ExecResult) -> String {
    let mut lines: Vec<&str> = result
        .stderr
        .lines()
        .filter(|l| !l.trim().is_empty())
        .collect();
    lines.extend(result.stdout.lines().filter(|l| l.starts_with('!')));
    lines.join("\n")
}

fn document_dir(document: &Path) -> &Path {
    match document.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn remove_aux_files(dir: &Path, stem: &str, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();

    for extension in extensions {
        let path = dir.join(format!("{}.{}", stem, extension.trim_start_matches('.')));
        match fs::remove_file(&path) {
            Ok(()) => removed.push(path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(ResumakeError::CompileCleanupFailed { path, source }),
        }
    }

    Ok(removed)
}
