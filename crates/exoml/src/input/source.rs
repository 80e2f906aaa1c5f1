//! Raw dataset text and source metadata.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{ExomlError, Result};

/// Byte-order mark some spreadsheet tools prepend to CSV exports.
const BOM: char = '\u{feff}';

/// Metadata about the file a dataset was read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Text encoding the contents were decoded with.
    pub encoding: String,
    /// When the file was read.
    pub read_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has just been read.
    pub fn new(path: PathBuf, hash: String, size_bytes: u64) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            encoding: "utf-8".to_string(),
            read_at: Utc::now(),
        }
    }
}

/// CSV-like text as handed over by the caller, split into lines.
///
/// Immutable once built. The byte-order mark, if any, is removed before the
/// text is split so that the first header cell is never polluted by it.
#[derive(Debug, Clone)]
pub struct RawDataset {
    lines: Vec<String>,
    source: Option<SourceMetadata>,
}

impl RawDataset {
    /// Build a dataset from in-memory text.
    pub fn from_text(text: impl Into<String>) -> Self {
        let mut text = text.into();
        if text.starts_with(BOM) {
            text.replace_range(..BOM.len_utf8(), "");
        }

        let lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();

        Self {
            lines,
            source: None,
        }
    }

    /// Read a `.csv` file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let is_csv = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if !is_csv {
            return Err(ExomlError::UnsupportedFormat(format!(
                "'{}' is not a .csv file",
                path.display()
            )));
        }

        let mut file = File::open(path).map_err(|e| ExomlError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| ExomlError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let metadata = SourceMetadata::new(path.to_path_buf(), hash, contents.len() as u64);
        let text = String::from_utf8_lossy(&contents).into_owned();

        let mut dataset = Self::from_text(text);
        dataset.source = Some(metadata);
        Ok(dataset)
    }

    /// All lines, untrimmed, in file order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines, blank and comment lines included.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// File metadata, when the dataset was read from disk.
    pub fn source(&self) -> Option<&SourceMetadata> {
        self.source.as_ref()
    }

    /// Check whether a line carries no data: blank, or a comment.
    pub fn is_skippable(line: &str, comment_marker: char) -> bool {
        let trimmed = line.trim();
        trimmed.is_empty() || trimmed.starts_with(comment_marker)
    }

    /// Trim a cell and strip surrounding double quotes.
    pub fn clean_cell(raw: &str) -> &str {
        raw.trim().trim_matches('"').trim()
    }
}
