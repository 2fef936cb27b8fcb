//! Test utilities for resumake
//!
//! This crate provides shared testing utilities used across the resumake workspace.

pub mod fixtures;
#[cfg(unix)]
pub mod mock;

pub use fixtures::{SAMPLE_DATA, SAMPLE_TEMPLATE, SampleInputs, write_sample_inputs};
#[cfg(unix)]
pub use mock::MockEngine;

use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` under the current directory
///
/// Cargo runs tests with the crate root as working directory, so every test
/// temp dir ends up in `<crate>/.tmp/`, which is gitignored and easy to clean
/// up manually if needed.
///
/// # Panics
///
/// Panics if `.tmp/` or the temporary subdirectory cannot be created.
///
/// # Examples
///
/// ```rust
/// use resumake_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("resume_data.yaml");
/// std::fs::write(&file_path, "name: Ada").unwrap();
/// // Cleanup happens automatically when temp is dropped
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let workspace_root = std::env::current_dir()?;
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_in_workspace_creates_in_tmp() {
        let temp = temp_dir_in_workspace();
        let path = temp.path();

        assert!(
            path.to_string_lossy().contains(".tmp"),
            "Path should contain .tmp, got: {}",
            path.display()
        );
        assert!(path.is_dir(), "Path should be a directory");
    }

    #[test]
    fn test_temp_dir_auto_cleanup() {
        let path = {
            let temp = temp_dir_in_workspace();
            let p = temp.path().to_path_buf();
            assert!(p.exists(), "Directory should exist before drop");
            p
        };

        assert!(
            !path.exists(),
            "Directory should not exist after drop: {}",
            path.display()
        );
    }

    #[test]
    fn test_multiple_temp_dirs_unique() {
        let temp1 = temp_dir_in_workspace();
        let temp2 = temp_dir_in_workspace();
        assert_ne!(temp1.path(), temp2.path());
    }

    #[test]
    fn test_try_temp_dir_in_workspace_returns_ok() {
        let temp = try_temp_dir_in_workspace().unwrap();
        assert!(temp.path().exists());
    }
}
