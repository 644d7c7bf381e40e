//! Console progress output.
//!
//! Everything here renders to a `String` first so the text can be tested;
//! the `print_*` wrappers write it to stdout. Nothing here mutates state.

use std::path::Path;
use std::time::Duration;

use chrono::NaiveDateTime;

use crate::command::CommandLine;
use crate::models::ConfigurationRecord;
use crate::tally::RunTally;

/// Timestamp format used on the console and in the report.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const HEAVY_RULE: &str = "================================================================================";
const LIGHT_RULE: &str = "────────────────────────────────────────────────────────────────────────────────";

/// Format seconds for humans: `45.3s`, `1m 15s`, `1h 1m`.
pub fn format_duration(seconds: f64) -> String {
    if seconds < 60.0 {
        format!("{seconds:.1}s")
    } else if seconds < 3600.0 {
        let minutes = (seconds / 60.0).floor() as u64;
        let secs = (seconds % 60.0) as u64;
        format!("{minutes}m {secs}s")
    } else {
        let hours = (seconds / 3600.0).floor() as u64;
        let minutes = ((seconds % 3600.0) / 60.0).floor() as u64;
        format!("{hours}h {minutes}m")
    }
}

/// [`format_duration`] for a `Duration`.
pub fn format_elapsed(duration: Duration) -> String {
    format_duration(duration.as_secs_f64())
}

fn status_label(success: bool) -> &'static str {
    if success { "✅ SUCCESS" } else { "❌ FAILED" }
}

/// Banner printed before the first run.
pub fn render_banner(
    input: &Path,
    output_dir: &Path,
    total: usize,
    started_at: NaiveDateTime,
) -> String {
    format!(
        "\n{HEAVY_RULE}\n🚀 Starting Docling Configuration Tests\n{HEAVY_RULE}\n\
         PDF: {}\nOutput Directory: {}\nTotal configurations to test: {}\nStarted at: {}\n{HEAVY_RULE}\n",
        input.display(),
        output_dir.display(),
        total,
        started_at.format(TIMESTAMP_FORMAT),
    )
}

/// Header printed before each run.
pub fn render_run_header(
    index: usize,
    total: usize,
    record: &ConfigurationRecord,
    command: &CommandLine,
) -> String {
    format!(
        "\n{HEAVY_RULE}\n[{index}/{total}] Running Configuration: {}\nDescription: {}\nRationale: {}\n{HEAVY_RULE}\n\nCommand: {}\n",
        record.name, record.description, record.rationale, command,
    )
}

/// Status block printed after each run. `tally` must already include it.
pub fn render_update(name: &str, success: bool, duration: Duration, tally: &RunTally) -> String {
    let mut out = format!(
        "\n{LIGHT_RULE}\nConfiguration '{name}': {} (took {})\n\
         Progress: {}/{} ({:.1}%) | ✅ {} | ❌ {}\n",
        status_label(success),
        format_elapsed(duration),
        tally.completed(),
        tally.total(),
        tally.percent_complete(),
        tally.succeeded(),
        tally.failed(),
    );

    if let Some(estimate) = tally.estimated_remaining() {
        out.push_str(&format!(
            "Estimated time remaining: {} ({} configurations left)\n",
            format_elapsed(estimate),
            tally.remaining()
        ));
    }

    out.push_str(LIGHT_RULE);
    out.push('\n');
    out
}

/// Diagnostics printed when the converter exits with a failure status.
/// `code` is `None` when the process was terminated by a signal.
pub fn render_failure(name: &str, code: Option<i32>, stdout: &str, stderr: &str) -> String {
    let code = match code {
        Some(c) => c.to_string(),
        None => "none (terminated by signal)".to_string(),
    };
    format!(
        "ERROR: Configuration '{name}' failed!\nReturn code: {code}\n\
         STDOUT:\n{stdout}\nSTDERR:\n{stderr}"
    )
}

/// One-line error for runs that never produced an exit status.
pub fn render_error(message: &str) -> String {
    format!("ERROR: {message}")
}

/// Closing summary printed after the report is written.
pub fn render_final_summary(
    tally: &RunTally,
    elapsed: Duration,
    output_dir: &Path,
    report_path: &Path,
    finished_at: NaiveDateTime,
) -> String {
    let per_config = if tally.total() == 0 {
        Duration::ZERO
    } else {
        elapsed.div_f64(tally.total() as f64)
    };

    format!(
        "\n{HEAVY_RULE}\n✨ Test Run Complete\n{HEAVY_RULE}\n\
         Total configurations: {}\n✅ Successful: {}\n❌ Failed: {}\n\
         ⏱️  Total time: {}\n⏱️  Average time per config: {}\nCompleted at: {}\n\
         \n📁 Review the output files in: {}\n📊 See summary report: {}\n{HEAVY_RULE}\n",
        tally.total(),
        tally.succeeded(),
        tally.failed(),
        format_elapsed(elapsed),
        format_elapsed(per_config),
        finished_at.format(TIMESTAMP_FORMAT),
        output_dir.display(),
        report_path.display(),
    )
}

/// Print the per-run status block.
pub fn print_update(name: &str, success: bool, duration: Duration, tally: &RunTally) {
    println!("{}", render_update(name, success, duration, tally));
}
