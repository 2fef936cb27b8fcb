//! Watch command - regenerate on every change to the data file

use crate::context::Context;
use crate::output;
use anyhow::{Result, anyhow};
use resumake_core::ResumakeError;
use resumake_watch::{RegenerationEvent, SubprocessRegenerator, WatchOptions, watch};
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

/// Watch the configured data file until Ctrl+C
///
/// Each regeneration runs this same executable without a subcommand, so it
/// picks up the same config file and `RESUMAKE_ENGINE`.
pub fn run(config_path: Option<&Path>, verbose: bool) -> Result<()> {
    let ctx = Context::new(config_path, verbose)?;
    let data_file = ctx.config.paths.data.clone();

    if !data_file.is_file() {
        return Err(ResumakeError::MissingFile {
            role: "data",
            path: data_file,
        }
        .into());
    }

    let mut args = Vec::new();
    if let Some(path) = config_path {
        args.push("--config".to_string());
        args.push(path.display().to_string());
    }
    if verbose {
        args.push("--verbose".to_string());
    }
    let regenerator =
        SubprocessRegenerator::with_reporter(std::env::current_exe()?, args, report);

    let (shutdown_tx, shutdown_rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = shutdown_tx.send(());
    })
    .map_err(|e| anyhow!("Failed to install Ctrl+C handler: {}", e))?;

    let debounce = Duration::from_millis(ctx.config.watch.debounce_ms);
    ctx.step(format!("Debounce window: {} ms", debounce.as_millis()));
    output::success(format!(
        "Watching {} for changes (Ctrl+C to stop)",
        data_file.display()
    ));

    watch(WatchOptions { data_file, debounce }, regenerator, shutdown_rx)?;

    output::success("Stopped watching");
    Ok(())
}

/// Print one regeneration event, with the generator's own status lines
fn report(event: &RegenerationEvent) {
    match event {
        RegenerationEvent::Started => output::step("Regenerating resume..."),
        RegenerationEvent::Succeeded { stdout } => {
            print_indented(stdout);
            output::success("Resume updated successfully");
        }
        RegenerationEvent::Failed { reason, output: text } => {
            print_indented(text);
            output::failure(format!("Resume update failed: {}", reason));
        }
    }
}

fn print_indented(text: &str) {
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        println!("  {}", line);
    }
}
