//! CLI command structure using clap

use clap::{Args, Parser, Subcommand};
use resumake_core::config::ENGINE_ENV_VAR;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resumake")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub generate: GenerateArgs,

    /// Config file [default: ./resumake.toml if present]
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Regenerate the resume whenever the data file changes
    Watch,
}

/// Generator flags. Unset flags fall back to the config file, then to
/// the built-in defaults.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// YAML file containing resume data [default: resume_data.yaml]
    #[arg(short, long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// LaTeX template file [default: resume_template.tex]
    #[arg(short, long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Output LaTeX file [default: resume.tex]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Name for the generated PDF, without extension [default: Resume]
    #[arg(long, value_name = "NAME")]
    pub pdf_name: Option<String>,

    /// Directory for timestamped backups [default: backups]
    #[arg(long, value_name = "DIR")]
    pub backup_dir: Option<PathBuf>,

    /// Skip PDF generation
    #[arg(long)]
    pub no_pdf: bool,

    /// Skip creating a backup
    #[arg(long)]
    pub no_backup: bool,

    /// LaTeX engine program or path [default: pdflatex]
    #[arg(long, env = ENGINE_ENV_VAR, value_name = "PROGRAM")]
    pub engine: Option<String>,
}
