//! Generate command - render the resume, compile it to PDF and back it up

use crate::cli::GenerateArgs;
use crate::context::Context;
use crate::output;
use anyhow::{Result, bail};
use resumake_core::backup::{BackupOutcome, create_backup};
use resumake_core::config::{Config, EngineConfig};
use resumake_core::data::load_resume_data;
use resumake_core::render::render_document;
use resumake_core::ResumakeError;
use resumake_latex::{CompileOptions, SystemRunner, compile_document};
use std::path::{Path, PathBuf};

/// Effective settings after merging flags over the config file
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    data: PathBuf,
    template: PathBuf,
    output: PathBuf,
    pdf_name: String,
    backup_dir: PathBuf,
    engine: EngineConfig,
    pdf: bool,
    backup: bool,
}

impl Settings {
    fn resolve(args: GenerateArgs, config: &Config) -> Self {
        let mut engine = config.engine.clone();
        if let Some(program) = args.engine {
            engine.program = program;
        }

        Self {
            data: args.data.unwrap_or_else(|| config.paths.data.clone()),
            template: args.template.unwrap_or_else(|| config.paths.template.clone()),
            output: args.output.unwrap_or_else(|| config.paths.output.clone()),
            pdf_name: args.pdf_name.unwrap_or_else(|| config.output.pdf_name.clone()),
            backup_dir: args.backup_dir.unwrap_or_else(|| config.paths.backup_dir.clone()),
            engine,
            pdf: !args.no_pdf,
            backup: !args.no_backup,
        }
    }
}

/// Render → compile → back up
///
/// # Arguments
///
/// * `args` - Generator flags
/// * `config_path` - Explicit config file, if any
/// * `verbose` - Enable verbose output if true
pub fn run(args: GenerateArgs, config_path: Option<&Path>, verbose: bool) -> Result<()> {
    let ctx = Context::new(config_path, verbose)?;
    let settings = Settings::resolve(args, &ctx.config);
    log::debug!("effective settings: {:?}", settings);

    // Step 1: Check inputs exist
    ctx.step("Checking input files");
    require_file("data", &settings.data)?;
    require_file("template", &settings.template)?;

    // Step 2: Load data and render
    ctx.step(format!("Loading data from {}", settings.data.display()));
    let data = load_resume_data(&settings.data)?;

    ctx.step(format!("Rendering {}", settings.template.display()));
    let rendered = render_document(&data, &settings.template, &settings.output)?;
    output::success(format!("LaTeX resume generated: {}", rendered.output.display()));

    if !settings.pdf {
        return Ok(());
    }

    // Step 3: Compile
    ctx.step(format!(
        "Compiling with {} {}",
        settings.engine.program,
        settings.engine.args.join(" ")
    ));
    let options = CompileOptions {
        document: settings.output.clone(),
        artifact_name: settings.pdf_name.clone(),
        engine: settings.engine.clone(),
    };
    let outcome = match compile_document(&options, &SystemRunner) {
        Ok(outcome) => outcome,
        Err(e) if e.is_compilation_failure() => {
            output::failure(&e);
            bail!("PDF generation failed");
        }
        Err(e) => return Err(e.into()),
    };
    output::success(format!("PDF generated: {}", outcome.artifact.display()));

    // Step 4: Back up
    if settings.backup {
        match create_backup(&outcome.artifact, &settings.backup_dir)? {
            BackupOutcome::Created(path) => {
                output::success(format!("Backup created: {}", path.display()))
            }
            BackupOutcome::Skipped { artifact } => output::warning(format!(
                "PDF file {} not found for backup",
                artifact.display()
            )),
        }
    }

    Ok(())
}

fn require_file(role: &'static str, path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(ResumakeError::MissingFile {
            role,
            path: path.to_path_buf(),
        }
        .into());
    }
    Ok(())
}
