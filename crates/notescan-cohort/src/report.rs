//! Review output: shortlists as JSON arrays on disk, and short text
//! previews for a manual audit pass.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use notescan_core::traits::RecordSink;
use notescan_core::types::{ConditionDefinition, Record, ReportSettings};

/// Writes each shortlist verbatim to `<out_dir>/<name>_top_<limit>.json`.
pub struct JsonShortlistSink {
    out_dir: PathBuf,
}

impl JsonShortlistSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self { Self { out_dir: out_dir.into() } }

    pub fn out_dir(&self) -> &Path { &self.out_dir }

    pub fn path_for(&self, condition: &ConditionDefinition) -> PathBuf {
        self.out_dir.join(format!("{}_top_{}.json", condition.name, condition.limit))
    }
}

impl RecordSink for JsonShortlistSink {
    fn write(&self, condition: &ConditionDefinition, records: &[Record]) -> Result<()> {
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("creating {}", self.out_dir.display()))?;
        let path = self.path_for(condition);
        let file = fs::File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, records)
            .with_context(|| format!("writing {}", path.display()))?;
        writer.flush()?;
        info!(path = %path.display(), records = records.len(), "shortlist saved");
        Ok(())
    }
}

/// Renders the first few records of a shortlist as truncated text/summary
/// blocks under a banner.
#[derive(Debug, Clone)]
pub struct PreviewRenderer {
    pub samples: usize,
    pub text_chars: usize,
    pub summary_chars: usize,
}

impl From<&ReportSettings> for PreviewRenderer {
    fn from(settings: &ReportSettings) -> Self {
        Self {
            samples: settings.samples,
            text_chars: settings.text_preview_chars,
            summary_chars: settings.summary_preview_chars,
        }
    }
}

impl Default for PreviewRenderer {
    fn default() -> Self { Self::from(&ReportSettings::default()) }
}

impl PreviewRenderer {
    pub fn render(&self, label: &str, records: &[Record]) -> String {
        let rule = "=".repeat(80);
        let mut out = String::new();
        let _ = writeln!(out, "\n{rule}");
        let _ = writeln!(out, "SAMPLE {} CASES (showing {})", label.to_uppercase(), self.samples);
        let _ = writeln!(out, "{rule}");
        for (i, record) in records.iter().take(self.samples).enumerate() {
            let _ = writeln!(out, "\n--- {label} CASE {} ---", i + 1);
            let _ = writeln!(out, "TEXT:");
            let _ = writeln!(out, "{}", truncate_chars(record.text().unwrap_or(""), self.text_chars));
            let _ = writeln!(out, "\nSUMMARY:");
            let _ = writeln!(out, "{}", truncate_chars(record.summary(), self.summary_chars));
        }
        out
    }
}

/// Prints previews to stdout.
pub struct ConsolePreviewSink {
    renderer: PreviewRenderer,
}

impl ConsolePreviewSink {
    pub fn new(renderer: PreviewRenderer) -> Self { Self { renderer } }
}

impl RecordSink for ConsolePreviewSink {
    fn write(&self, condition: &ConditionDefinition, records: &[Record]) -> Result<()> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(self.renderer.render(condition.display_label(), records).as_bytes())?;
        Ok(())
    }
}

/// The first `max` characters of `s`.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}
