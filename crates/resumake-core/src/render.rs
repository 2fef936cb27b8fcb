//! Document rendering - resume data + LaTeX template → .tex file

use serde_yaml::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::data::ResumeData;
use crate::error::{ResumakeError, Result};
use crate::template::{coerce_text, TemplateContext, TemplateEngine};

/// Escape LaTeX special characters in user text
///
/// Each character is mapped once, so the backslashes introduced by the
/// replacements are never escaped again.
pub fn latex_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + text.len() / 4);

    for c in text.chars() {
        match c {
            '\\' => escaped.push_str(r"\textbackslash{}"),
            '&' => escaped.push_str(r"\&"),
            '%' => escaped.push_str(r"\%"),
            '$' => escaped.push_str(r"\$"),
            '#' => escaped.push_str(r"\#"),
            '^' => escaped.push_str(r"\textasciicircum{}"),
            '_' => escaped.push_str(r"\_"),
            '{' => escaped.push_str(r"\{"),
            '}' => escaped.push_str(r"\}"),
            '~' => escaped.push_str(r"\textasciitilde{}"),
            other => escaped.push(other),
        }
    }

    escaped
}

/// Template engine with the LaTeX syntax and the `latex_escape` filter
///
/// The filter coerces any value to text first, so a list escapes as its
/// comma-joined items.
pub fn latex_engine() -> TemplateEngine {
    let mut engine = TemplateEngine::new();
    engine.add_filter("latex_escape", |value: &Value, _: &[Value]| {
        Ok(Value::String(latex_escape(&coerce_text(value))))
    });
    engine
}

/// Result of a successful render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutcome {
    /// Path of the written document
    pub output: PathBuf,
    /// Size of the written document in bytes
    pub bytes: usize,
}

/// Render `template_path` with `data` and write the result to `output_path`
///
/// # Steps
/// 1. Read the template (missing → `MISSING_FILE`)
/// 2. Render with the LaTeX engine; includes resolve next to the template
/// 3. Write to a temp file beside the output → atomic rename
///
/// Nothing is written when rendering fails, so a previous document
/// survives a broken template.
pub fn render_document(
    data: &ResumeData,
    template_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<RenderOutcome> {
    let template_path = template_path.as_ref();
    let output_path = output_path.as_ref();

    if !template_path.is_file() {
        return Err(ResumakeError::MissingFile {
            role: "template",
            path: template_path.to_path_buf(),
        });
    }

    let template = fs::read_to_string(template_path)?;
    let base_dir = template_path.parent().unwrap_or_else(|| Path::new("."));
    let context = TemplateContext::from(data);
    let rendered = latex_engine().render_with_base(&template, &context, base_dir)?;

    write_atomic(output_path, rendered.as_bytes())?;
    log::debug!(
        "rendered {} → {} ({} bytes)",
        template_path.display(),
        output_path.display(),
        rendered.len()
    );

    Ok(RenderOutcome {
        output: output_path.to_path_buf(),
        bytes: rendered.len(),
    })
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(contents)?;
    temp.flush()?;
    temp.persist(path).map_err(|e| ResumakeError::IoError(e.error))?;
    Ok(())
}
