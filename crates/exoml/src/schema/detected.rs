//! Result of header and delimiter detection.

use serde::{Deserialize, Serialize};

use crate::input::Delimiter;

/// Header names, delimiter and header line position found in raw text.
///
/// Header order is the original column order. Duplicate names are kept as
/// they appear. Blank header cells are not listed in `headers`, but the raw
/// column of every listed header is kept in `columns` so data rows are read
/// from the right cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedSchema {
    pub headers: Vec<String>,
    /// Raw cell index of each entry in `headers`.
    pub columns: Vec<usize>,
    /// Number of cells on the header line, blank ones included.
    pub raw_width: usize,
    pub delimiter: Delimiter,
    /// Zero-based index of the header line, `None` when detection failed.
    pub header_index: Option<usize>,
}

impl DetectedSchema {
    /// Create a schema whose headers occupy contiguous columns.
    pub fn new(headers: Vec<String>, delimiter: Delimiter, header_index: usize) -> Self {
        let columns = (0..headers.len()).collect();
        Self {
            raw_width: headers.len(),
            headers,
            columns,
            delimiter,
            header_index: Some(header_index),
        }
    }

    /// Create a schema from the cleaned cells of a header line, dropping blanks.
    pub fn from_cells(cells: &[&str], delimiter: Delimiter, header_index: usize) -> Self {
        let (columns, headers) = cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(idx, cell)| (idx, cell.to_string()))
            .unzip();

        Self {
            headers,
            columns,
            raw_width: cells.len(),
            delimiter,
            header_index: Some(header_index),
        }
    }

    /// The schema reported when no header line could be found.
    pub fn undetected() -> Self {
        Self {
            headers: Vec::new(),
            columns: Vec::new(),
            raw_width: 0,
            delimiter: Delimiter::Comma,
            header_index: None,
        }
    }

    /// An empty header list means detection failed, not a zero-column table.
    pub fn is_detected(&self) -> bool {
        self.header_index.is_some() && !self.headers.is_empty()
    }

    /// Number of named columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Position in `headers` of the first header equal to `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Raw cell index holding the column `name` in data rows.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.position(name).and_then(|pos| self.columns.get(pos).copied())
    }

    /// Whether `name` is one of the detected headers.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Whether cleaned `cells` repeat the header line cell for cell.
    pub fn matches_header_row(&self, cells: &[&str]) -> bool {
        if !self.is_detected() || cells.len() != self.raw_width {
            return false;
        }
        let mut named = self.columns.iter().zip(&self.headers).peekable();
        cells.iter().enumerate().all(|(idx, cell)| match named.peek() {
            Some(&(&col, header)) if col == idx => {
                named.next();
                *cell == header.as_str()
            }
            _ => cell.is_empty(),
        })
    }
}
