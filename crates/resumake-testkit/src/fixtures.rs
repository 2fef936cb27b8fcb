//! Sample resume inputs

use std::fs;
use std::path::{Path, PathBuf};

/// Resume data exercising nesting, lists and LaTeX specials
pub const SAMPLE_DATA: &str = r#"basics:
  name: "Ada Lovelace"
  email: "ada@example.com"
  summary: "Engineer & mathematician, 100% analytical"
skills:
  - Rust
  - LaTeX
experience:
  - company: "R&D Ltd"
    title: "Engineer"
    highlights:
      - "Cut build time by 50%"
      - "Owned the C# to Rust port"
  - company: "Analytical Engines"
    title: "Lead"
    highlights: []
"#;

/// Template using the LaTeX-safe delimiters and `latex_escape`
pub const SAMPLE_TEMPLATE: &str = r#"\documentclass{article}
<# Generated by resumake #>
\begin{document}
\section*{<< basics.name | latex_escape >>}
<< basics.email >> \\
<< basics.summary | latex_escape >>

\textbf{Skills:} << skills | join(", ") | latex_escape >>

<BLOCK> for job in experience </BLOCK>
\subsection*{<< job.title >>, << job.company | latex_escape >>}
<BLOCK> if job.highlights </BLOCK>\begin{itemize}
<BLOCK> for item in job.highlights </BLOCK>  \item << item | latex_escape >>
<BLOCK> endfor </BLOCK>\end{itemize}
<BLOCK> endif </BLOCK>
<BLOCK> endfor </BLOCK>
\end{document}
"#;

/// Paths of the written sample inputs
#[derive(Debug, Clone)]
pub struct SampleInputs {
    pub data: PathBuf,
    pub template: PathBuf,
}

/// Write `resume_data.yaml` and `resume_template.tex` into `dir`
///
/// # Panics
///
/// Panics if the files cannot be written.
pub fn write_sample_inputs(dir: &Path) -> SampleInputs {
    let data = dir.join("resume_data.yaml");
    let template = dir.join("resume_template.tex");
    fs::write(&data, SAMPLE_DATA).expect("Failed to write sample data");
    fs::write(&template, SAMPLE_TEMPLATE).expect("Failed to write sample template");
    SampleInputs { data, template }
}
