//! JSON-lines record source.
//!
//! Reads one JSON object per line from a file, or from every `*.jsonl` /
//! `*.json` file below a directory (sorted by path). Blank lines are
//! ignored; lines that are not valid UTF-8, not valid JSON, or not a JSON
//! object are skipped with a warning.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::Error;
use crate::traits::RecordSource;
use crate::types::Record;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub files: usize,
    pub records: usize,
    pub skipped: usize,
}

pub struct JsonlSource {
    root: PathBuf,
}

impl JsonlSource {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

    pub fn root(&self) -> &Path { &self.root }

    pub fn load_with_stats(&self) -> Result<(Vec<Record>, LoadStats)> {
        if !self.root.exists() {
            return Err(Error::NotFound(format!("input {}", self.root.display())).into());
        }
        let files = if self.root.is_dir() { self.list_jsonl_files() } else { vec![self.root.clone()] };
        if files.is_empty() {
            warn!(dir = %self.root.display(), "no .jsonl or .json files found");
        }

        let mut records = Vec::new();
        let mut stats = LoadStats { files: files.len(), ..LoadStats::default() };
        for path in &files {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            let origin = path.display().to_string();
            stats.skipped += read_records(BufReader::new(file), &origin, &mut records)
                .with_context(|| format!("reading {}", path.display()))?;
        }
        stats.records = records.len();
        debug!(files = stats.files, records = stats.records, skipped = stats.skipped, "records loaded");
        Ok((records, stats))
    }

    fn list_jsonl_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(&self.root)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .filter(|p| matches!(p.extension().and_then(|s| s.to_str()), Some("jsonl" | "json")))
            .collect();
        files.sort();
        files
    }
}

impl RecordSource for JsonlSource {
    fn load(&self) -> Result<Vec<Record>> { Ok(self.load_with_stats()?.0) }
}

/// Append every record parsed from `reader` to `out`; returns the number of
/// lines skipped. Only I/O failures are errors.
pub fn read_records<R: BufRead>(mut reader: R, origin: &str, out: &mut Vec<Record>) -> Result<usize> {
    let mut skipped = 0;
    let mut line_no = 0usize;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 { break; }
        line_no += 1;
        let Ok(line) = std::str::from_utf8(&buf) else {
            warn!(origin, line = line_no, "skipping line that is not valid UTF-8");
            skipped += 1;
            continue;
        };
        let line = line.trim();
        if line.is_empty() { continue; }
        let parsed = serde_json::from_str::<Value>(line)
            .map_err(|e| e.to_string())
            .and_then(|v| Record::try_from(v).map_err(|e| e.to_string()));
        match parsed {
            Ok(record) => out.push(record),
            Err(reason) => {
                warn!(origin, line = line_no, %reason, "skipping malformed line");
                skipped += 1;
            }
        }
    }
    Ok(skipped)
}
