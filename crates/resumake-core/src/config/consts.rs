//! Constants shared across the workspace

/// Config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "resumake.toml";

/// Built-in defaults, used when neither a flag nor the config file sets a value
pub mod defaults {
    pub const DATA_FILE: &str = "resume_data.yaml";
    pub const TEMPLATE_FILE: &str = "resume_template.tex";
    pub const OUTPUT_FILE: &str = "resume.tex";
    pub const BACKUP_DIR: &str = "backups";
    pub const PDF_NAME: &str = "Resume";

    pub const ENGINE_PROGRAM: &str = "pdflatex";
    pub const ENGINE_ARGS: &[&str] = &["-interaction=nonstopmode"];
    pub const ARTIFACT_EXTENSION: &str = "pdf";
    pub const AUX_EXTENSIONS: &[&str] = &["aux", "out", "fls", "fdb_latexmk"];

    /// Watcher debounce window in milliseconds
    pub const DEBOUNCE_MS: u64 = 1000;
}

/// Environment variable overriding `engine.program`
pub const ENGINE_ENV_VAR: &str = "RESUMAKE_ENGINE";
