use resumake_core::{Result, ResumakeError};
use std::path::{Path, PathBuf};

/// Resolve the engine program to an absolute executable path
///
/// A program containing a path separator is taken literally (relative to
/// the current directory); a bare name is looked up in `PATH`.
pub fn resolve_engine(program: &str) -> Result<PathBuf> {
    let not_found = || ResumakeError::EngineNotFound {
        program: program.to_string(),
    };

    let candidate = Path::new(program);
    if is_literal_path(candidate) {
        if !candidate.is_file() {
            return Err(not_found());
        }
        // The engine runs with the document directory as cwd
        return candidate.canonicalize().map_err(|_| not_found());
    }

    let path = which::which(program).map_err(|_| not_found())?;
    log::debug!("resolved engine '{}' → {}", program, path.display());
    Ok(path)
}

fn is_literal_path(path: &Path) -> bool {
    path.is_absolute() || path.components().count() > 1
}
