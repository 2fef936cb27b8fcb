use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::consts::{defaults, CONFIG_FILE_NAME};
use crate::error::{ResumakeError, Result};

/// resumake.toml schema. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_data")]
    pub data: PathBuf,
    #[serde(default = "default_template")]
    pub template: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_backup_dir")]
    pub backup_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data: default_data(),
            template: default_template(),
            output: default_output(),
            backup_dir: default_backup_dir(),
        }
    }
}

fn default_data() -> PathBuf {
    PathBuf::from(defaults::DATA_FILE)
}

fn default_template() -> PathBuf {
    PathBuf::from(defaults::TEMPLATE_FILE)
}

fn default_output() -> PathBuf {
    PathBuf::from(defaults::OUTPUT_FILE)
}

fn default_backup_dir() -> PathBuf {
    PathBuf::from(defaults::BACKUP_DIR)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Artifact base name, without extension
    #[serde(default = "default_pdf_name")]
    pub pdf_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pdf_name: default_pdf_name(),
        }
    }
}

fn default_pdf_name() -> String {
    defaults::PDF_NAME.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default = "default_engine_args")]
    pub args: Vec<String>,
    #[serde(default = "default_artifact_extension")]
    pub artifact_extension: String,
    #[serde(default = "default_aux_extensions")]
    pub aux_extensions: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_engine_args(),
            artifact_extension: default_artifact_extension(),
            aux_extensions: default_aux_extensions(),
        }
    }
}

fn default_program() -> String {
    defaults::ENGINE_PROGRAM.to_string()
}

fn default_engine_args() -> Vec<String> {
    defaults::ENGINE_ARGS.iter().map(|s| s.to_string()).collect()
}

fn default_artifact_extension() -> String {
    defaults::ARTIFACT_EXTENSION.to_string()
}

fn default_aux_extensions() -> Vec<String> {
    defaults::AUX_EXTENSIONS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    defaults::DEBOUNCE_MS
}

impl Config {
    /// Read and validate a resumake.toml
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ResumakeError::ConfigParseError(e.to_string()))?;

        let config: Config =
            toml::from_str(&content).map_err(|e| ResumakeError::ConfigParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `resumake.toml` from `dir` if present, otherwise the defaults
    pub fn load_or_default(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        if path.is_file() {
            log::debug!("loading config from {}", path.display());
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.engine.program.trim().is_empty() {
            return Err(ResumakeError::ConfigInvalidValue {
                field: "engine.program".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.output.pdf_name.trim().is_empty() {
            return Err(ResumakeError::ConfigInvalidValue {
                field: "output.pdf_name".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.watch.debounce_ms == 0 {
            return Err(ResumakeError::ConfigInvalidValue {
                field: "watch.debounce_ms".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resumake_testkit::temp_dir_in_workspace;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.paths.data, PathBuf::from("resume_data.yaml"));
        assert_eq!(config.paths.template, PathBuf::from("resume_template.tex"));
        assert_eq!(config.paths.output, PathBuf::from("resume.tex"));
        assert_eq!(config.paths.backup_dir, PathBuf::from("backups"));
        assert_eq!(config.output.pdf_name, "Resume");
        assert_eq!(config.engine.program, "pdflatex");
        assert_eq!(config.engine.args, vec!["-interaction=nonstopmode"]);
        assert_eq!(
            config.engine.aux_extensions,
            vec!["aux", "out", "fls", "fdb_latexmk"]
        );
        assert_eq!(config.watch.debounce_ms, 1000);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[paths]
data = "cv.yaml"
template = "templates/cv.tex"
output = "build/cv.tex"
backup_dir = "archive"

[output]
pdf_name = "CV"

[engine]
program = "xelatex"
args = ["-interaction=nonstopmode", "-halt-on-error"]
aux_extensions = ["aux", "log"]

[watch]
debounce_ms = 250
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.paths.data, PathBuf::from("cv.yaml"));
        assert_eq!(config.paths.output, PathBuf::from("build/cv.tex"));
        assert_eq!(config.output.pdf_name, "CV");
        assert_eq!(config.engine.program, "xelatex");
        assert_eq!(config.engine.args.len(), 2);
        assert_eq!(config.engine.artifact_extension, "pdf");
        assert_eq!(config.engine.aux_extensions, vec!["aux", "log"]);
        assert_eq!(config.watch.debounce_ms, 250);
    }

    #[test]
    fn test_validate_rejects_zero_debounce() {
        let mut config = Config::default();
        config.watch.debounce_ms = 0;
        match config.validate() {
            Err(ResumakeError::ConfigInvalidValue { field, .. }) => {
                assert_eq!(field, "watch.debounce_ms");
            }
            other => panic!("Expected ConfigInvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_empty_program() {
        let mut config = Config::default();
        config.engine.program = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ResumakeError::ConfigInvalidValue { .. })
        ));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let temp = temp_dir_in_workspace();
        let config = Config::load_or_default(temp.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_or_default_reads_file() {
        let temp = temp_dir_in_workspace();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[output]\npdf_name = \"Jane_Doe\"\n",
        )
        .unwrap();
        let config = Config::load_or_default(temp.path()).unwrap();
        assert_eq!(config.output.pdf_name, "Jane_Doe");
        assert_eq!(config.engine.program, "pdflatex");
    }

    #[test]
    fn test_from_file_reports_parse_error() {
        let temp = temp_dir_in_workspace();
        let path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[watch]\ndebounce_ms = \"soon\"\n").unwrap();
        assert!(matches!(
            Config::from_file(&path),
            Err(ResumakeError::ConfigParseError(_))
        ));
    }
}
