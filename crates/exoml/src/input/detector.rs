//! Header line and delimiter detection.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::source::RawDataset;
use crate::schema::DetectedSchema;

/// Field delimiters the detector knows how to try.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    Comma,
    Semicolon,
    Tab,
    Pipe,
}

impl Delimiter {
    /// The character this delimiter splits on.
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Semicolon => ';',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    /// Short format name, as used in logs and CLI output.
    pub fn name(&self) -> &'static str {
        match self {
            Delimiter::Comma => "comma",
            Delimiter::Semicolon => "semicolon",
            Delimiter::Tab => "tab",
            Delimiter::Pipe => "pipe",
        }
    }

    /// Split a line into raw (uncleaned) cells.
    pub fn split<'a>(&self, line: &'a str) -> std::str::Split<'a, char> {
        line.split(self.as_char())
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Delimiter::Comma
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Detector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Candidate delimiters, in tie-break order.
    pub delimiters: Vec<Delimiter>,
    /// Lines starting with this character (after trimming) are comments.
    pub comment_marker: char,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            delimiters: vec![
                Delimiter::Comma,
                Delimiter::Semicolon,
                Delimiter::Tab,
                Delimiter::Pipe,
            ],
            comment_marker: '#',
        }
    }
}

/// Finds the header line and field delimiter of CSV-like text.
pub struct SchemaDetector {
    config: DetectorConfig,
}

impl SchemaDetector {
    /// Create a detector with default configuration.
    pub fn new() -> Self {
        Self {
            config: DetectorConfig::default(),
        }
    }

    /// Create a detector with custom configuration.
    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Comment marker in effect.
    pub fn comment_marker(&self) -> char {
        self.config.comment_marker
    }

    /// Scan the dataset for its header line.
    ///
    /// The first non-blank, non-comment line that splits into at least two
    /// columns under some candidate delimiter becomes the header. When no
    /// line qualifies the returned schema is undetected: no headers, no
    /// header index, and a comma placeholder delimiter.
    pub fn detect(&self, dataset: &RawDataset) -> DetectedSchema {
        for (index, raw) in dataset.lines().iter().enumerate() {
            if RawDataset::is_skippable(raw, self.config.comment_marker) {
                continue;
            }

            let line = raw.trim_matches([' ', '\r']);
            let (delimiter, columns) = self.best_delimiter(line);
            if columns < 2 {
                debug!(line = index, "line has a single column, still looking for header");
                continue;
            }

            let cells: Vec<&str> = delimiter.split(line).map(RawDataset::clean_cell).collect();

            debug!(
                line = index,
                delimiter = %delimiter,
                columns,
                "header line detected"
            );
            return DetectedSchema::from_cells(&cells, delimiter, index);
        }

        DetectedSchema::undetected()
    }

    /// Pick the delimiter yielding the strictly highest column count.
    ///
    /// Starts from (comma, 1) so a tie never displaces an earlier candidate
    /// and a line with no delimiter at all reports a single column.
    fn best_delimiter(&self, line: &str) -> (Delimiter, usize) {
        let mut best = (Delimiter::Comma, 1);
        for &delimiter in &self.config.delimiters {
            let count = delimiter.split(line).count();
            if count > best.1 {
                best = (delimiter, count);
            }
        }
        best
    }
}

impl Default for SchemaDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(text: &str) -> DetectedSchema {
        SchemaDetector::new().detect(&RawDataset::from_text(text))
    }

    #[test]
    fn test_detect_comma() {
        let schema = detect("a,b,c\n1,2,3");
        assert_eq!(schema.delimiter, Delimiter::Comma);
        assert_eq!(schema.header_index, Some(0));
        assert_eq!(schema.headers, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_tie_keeps_comma() {
        let schema = detect("a,b;c\n1,2;3");
        assert_eq!(schema.delimiter, Delimiter::Comma);
        assert_eq!(schema.headers, vec!["a", "b;c"]);
    }

    #[test]
    fn test_semicolon_wins_with_more_columns() {
        let schema = detect("a,b;c;d\n1,2;3;4");
        assert_eq!(schema.delimiter, Delimiter::Semicolon);
        assert_eq!(schema.headers, vec!["a,b", "c", "d"]);
    }

    #[test]
    fn test_detect_tab_and_pipe() {
        assert_eq!(detect("a\tb\tc\n1\t2\t3").delimiter, Delimiter::Tab);
        assert_eq!(detect("a|b\n1|2").delimiter, Delimiter::Pipe);
    }

    #[test]
    fn test_skips_comments_and_blanks() {
        let schema = detect("# exported 2024-01-01\n\n  # another\nkoi_period,koi_depth\n1,2");
        assert_eq!(schema.header_index, Some(3));
        assert_eq!(schema.headers, vec!["koi_period", "koi_depth"]);
    }

    #[test]
    fn test_skips_single_column_lines() {
        let schema = detect("title line\na;b\n1;2");
        assert_eq!(schema.header_index, Some(1));
        assert_eq!(schema.delimiter, Delimiter::Semicolon);
    }

    #[test]
    fn test_headers_quote_stripped_and_empty_dropped() {
        let schema = detect("\"period\", \"depth\" ,,\"\"\n1,2,3,4");
        assert_eq!(schema.headers, vec!["period", "depth"]);
        assert_eq!(schema.columns, vec![0, 1]);
        assert_eq!(schema.raw_width, 4);
    }

    #[test]
    fn test_leading_blank_header_cell() {
        let schema = detect(",koi_period,koi_depth\n0,3.5,0.008");
        assert_eq!(schema.headers, vec!["koi_period", "koi_depth"]);
        assert_eq!(schema.column_index("koi_period"), Some(1));
    }

    #[test]
    fn test_leading_blank_tab_cell_kept() {
        let schema = detect("\tperiod\tdepth\n0\t3.5\t0.008");
        assert_eq!(schema.delimiter, Delimiter::Tab);
        assert_eq!(schema.column_index("period"), Some(1));
        assert_eq!(schema.raw_width, 3);
    }

    #[test]
    fn test_detection_failure() {
        let schema = detect("# only comments\n\nsingle\ncolumn");
        assert!(!schema.is_detected());
        assert!(schema.headers.is_empty());
        assert_eq!(schema.header_index, None);
        assert_eq!(schema.delimiter, Delimiter::Comma);
    }

    #[test]
    fn test_custom_delimiters() {
        let config = DetectorConfig {
            delimiters: vec![Delimiter::Pipe],
            ..DetectorConfig::default()
        };
        let schema = SchemaDetector::with_config(config).detect(&RawDataset::from_text("a,b,c\nx|y"));
        assert_eq!(schema.header_index, Some(1));
        assert_eq!(schema.delimiter, Delimiter::Pipe);
    }
}
