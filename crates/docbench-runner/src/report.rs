//! Markdown summary report.
//!
//! [`render_report`] is a pure function of the results, input path and
//! timestamp; [`ReportGenerator::write`] stamps the current local time and
//! overwrites `configuration_test_report.md` in the output directory.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::error::RunnerError;
use crate::models::RunResult;
use crate::progress::TIMESTAMP_FORMAT;

/// File name of the report inside the output directory.
pub const REPORT_FILE_NAME: &str = "configuration_test_report.md";

const SUCCESS_MARKER: &str = "✅ Success";
const FAILURE_MARKER: &str = "❌ Failed";

const OUTPUT_FILES_SECTION: &str = "## Output Files\n\n\
Each configuration generates the following files:\n\
- `{base_name}_{config_name}.md` - Markdown output with image references\n\
- `{base_name}_{config_name}.json` - Full JSON document structure\n\
- `{base_name}_{config_name}_artifacts/images/` - Extracted image files (when using referenced mode)\n\
\n\
Compare the markdown files to evaluate:\n\
- Table extraction quality (headers, column order, cell alignment)\n\
- Image extraction quality (extracted images, OCR text, AI descriptions)\n\
- Image reference accuracy in markdown\n\
- Overall markdown structure\n";

fn status_marker(success: bool) -> &'static str {
    if success { SUCCESS_MARKER } else { FAILURE_MARKER }
}

/// Escape table-cell text so a `|` cannot split the row.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Render the full report.
pub fn render_report(
    results: &[RunResult<'_>],
    input: &Path,
    generated_at: NaiveDateTime,
) -> String {
    let mut out = String::new();

    out.push_str("# Docling Configuration Test Report\n\n");
    out.push_str(&format!(
        "**Generated:** {}\n\n",
        generated_at.format(TIMESTAMP_FORMAT)
    ));
    out.push_str(&format!("**Test PDF:** `{}`\n\n", input.display()));
    out.push_str("---\n\n");

    out.push_str("## Summary\n\n");
    out.push_str("| Configuration | Status | Description |\n");
    out.push_str("|---------------|--------|-------------|\n");
    for result in results {
        out.push_str(&format!(
            "| {} | {} | {} |\n",
            escape_cell(&result.config.name),
            status_marker(result.success),
            escape_cell(&result.config.description),
        ));
    }
    out.push_str("\n---\n\n");

    out.push_str("## Detailed Results\n\n");
    for result in results {
        let config = result.config;
        out.push_str(&format!("### {}: {}\n\n", config.name, config.description));
        out.push_str(&format!("**Rationale:** {}\n\n", config.rationale));
        out.push_str(&format!("**Status:** {}\n\n", status_marker(result.success)));
        out.push_str("**Configuration:**\n");
        out.push_str("```text\n");
        for (key, value) in config.options.entries() {
            out.push_str(&format!("  {key} = {value}\n"));
        }
        out.push_str("```\n\n");

        if !result.success {
            out.push_str("**Error Output:**\n");
            out.push_str("```\n");
            out.push_str(&result.output);
            out.push_str("\n```\n\n");
        }

        out.push_str("---\n\n");
    }

    out.push_str(OUTPUT_FILES_SECTION);
    out
}

/// Writes the summary report into an output directory.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl ReportGenerator {
    /// Generator for `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Where the report is written.
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(REPORT_FILE_NAME)
    }

    /// Render with the current local time and write, replacing any old report.
    pub async fn write(
        &self,
        results: &[RunResult<'_>],
        input: &Path,
    ) -> Result<PathBuf, RunnerError> {
        let path = self.report_path();
        let content = render_report(results, input, Local::now().naive_local());

        tokio::fs::write(&path, content)
            .await
            .map_err(|source| RunnerError::ReportWrite {
                path: path.clone(),
                source,
            })?;

        info!(path = %path.display(), results = results.len(), "Summary report written");
        Ok(path)
    }
}
