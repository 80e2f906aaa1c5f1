//! Sample, feature and class counts for an ingested dataset.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::detected::DetectedSchema;
use super::field::FieldId;
use super::mapping::ColumnMapping;
use crate::input::RawDataset;

/// One data line after the header, split and cleaned.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRow<'a> {
    /// Zero-based index of the line in the raw text.
    pub line_index: usize,
    pub cells: Vec<&'a str>,
}

impl<'a> SampleRow<'a> {
    /// Cell at `column`, or `None` for a short row.
    pub fn cell(&self, column: usize) -> Option<&'a str> {
        self.cells.get(column).copied()
    }
}

/// Iterator over the lines that count as samples.
///
/// Skips blank and comment lines, and the line directly after the header
/// when it repeats the header cell for cell. Malformed rows are yielded as-is.
pub struct SampleRows<'a> {
    lines: &'a [String],
    schema: &'a DetectedSchema,
    comment_marker: char,
    first_data_line: usize,
    next: usize,
}

impl<'a> SampleRows<'a> {
    pub fn new(dataset: &'a RawDataset, schema: &'a DetectedSchema, comment_marker: char) -> Self {
        let first_data_line = schema.header_index.map(|i| i + 1).unwrap_or(0);
        Self {
            lines: dataset.lines(),
            schema,
            comment_marker,
            first_data_line,
            next: first_data_line,
        }
    }

}

impl<'a> Iterator for SampleRows<'a> {
    type Item = SampleRow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.lines.len() {
            let index = self.next;
            self.next += 1;

            let lines = self.lines;
            let raw: &'a String = &lines[index];
            if RawDataset::is_skippable(raw, self.comment_marker) {
                continue;
            }

            let cells: Vec<&'a str> = self
                .schema
                .delimiter
                .split(raw.trim_matches([' ', '\r']))
                .map(RawDataset::clean_cell)
                .collect();

            if index == self.first_data_line && self.schema.matches_header_row(&cells) {
                continue;
            }

            return Some(SampleRow {
                line_index: index,
                cells,
            });
        }
        None
    }
}

/// Row, column and class counts for a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetStatistics {
    /// Number of sample lines after the header.
    pub sample_count: usize,
    /// Number of detected header columns.
    pub feature_count: usize,
    /// Distinct non-empty target values; `None` while the target is unmapped.
    pub class_count: Option<usize>,
    /// Rows per target value, in first-seen order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_counts: Option<IndexMap<String, usize>>,
}

impl DatasetStatistics {
    /// Count samples, features and (when the target is mapped) classes.
    ///
    /// A target mapped to a name that is not a detected header leaves the
    /// class count unknown.
    pub fn compute(
        dataset: &RawDataset,
        schema: &DetectedSchema,
        mapping: Option<&ColumnMapping>,
        comment_marker: char,
    ) -> Self {
        let target_index = mapping
            .and_then(|m| m.get(FieldId::Target))
            .and_then(|column| schema.column_index(column));

        let mut sample_count = 0;
        let mut class_counts: Option<IndexMap<String, usize>> =
            target_index.map(|_| IndexMap::new());

        for row in SampleRows::new(dataset, schema, comment_marker) {
            sample_count += 1;

            if let (Some(counts), Some(idx)) = (class_counts.as_mut(), target_index) {
                let value = row.cell(idx).unwrap_or("");
                if !value.is_empty() {
                    *counts.entry(value.to_string()).or_insert(0) += 1;
                }
            }
        }

        Self {
            sample_count,
            feature_count: schema.column_count(),
            class_count: class_counts.as_ref().map(|c| c.len()),
            class_counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::SchemaDetector;

    fn stats(text: &str, mapping: Option<&ColumnMapping>) -> DatasetStatistics {
        let dataset = RawDataset::from_text(text);
        let schema = SchemaDetector::new().detect(&dataset);
        DatasetStatistics::compute(&dataset, &schema, mapping, '#')
    }

    #[test]
    fn test_counts_without_target() {
        let s = stats("a,b,c\n1,2,3\n\n# note\n4,5,6\n", None);
        assert_eq!(s.sample_count, 2);
        assert_eq!(s.feature_count, 3);
        assert_eq!(s.class_count, None);
        assert!(s.class_counts.is_none());
    }

    #[test]
    fn test_repeated_header_row_excluded() {
        let s = stats("a,b,label\n\"a\", b ,label\n1,2,x\n3,4,y", None);
        assert_eq!(s.sample_count, 2);
    }

    #[test]
    fn test_repeated_header_only_directly_after_header() {
        let s = stats("a,b\n1,2\na,b\n", None);
        assert_eq!(s.sample_count, 2);
    }

    #[test]
    fn test_malformed_rows_still_count() {
        let s = stats("a,b,c\n1\n1,2,3,4,5\n", None);
        assert_eq!(s.sample_count, 2);
    }

    #[test]
    fn test_class_count_with_target() {
        let mapping = ColumnMapping::new().with(FieldId::Target, "disp");
        let s = stats(
            "p,disp\n1,CONFIRMED\n2,FALSE POSITIVE\n3, CONFIRMED \n4,\n5",
            Some(&mapping),
        );
        assert_eq!(s.sample_count, 5);
        assert_eq!(s.class_count, Some(2));
        let counts = s.class_counts.unwrap();
        assert_eq!(counts.get("CONFIRMED"), Some(&2));
        assert_eq!(counts.keys().next().map(String::as_str), Some("CONFIRMED"));
    }

    #[test]
    fn test_target_mapped_to_unknown_header() {
        let mapping = ColumnMapping::new().with(FieldId::Target, "missing");
        let s = stats("a,b\n1,2", Some(&mapping));
        assert_eq!(s.class_count, None);
    }

    #[test]
    fn test_class_count_reads_raw_column_past_blank_header() {
        let mapping = ColumnMapping::new().with(FieldId::Target, "disp");
        let s = stats(",p,disp\n,p,disp\n0,1,PC\n1,2,FP\n2,3,PC\n", Some(&mapping));
        assert_eq!(s.sample_count, 3);
        assert_eq!(s.feature_count, 2);
        assert_eq!(s.class_count, Some(2));
        assert_eq!(s.class_counts.unwrap().get("PC"), Some(&2));
    }

    #[test]
    fn test_sample_rows_clean_cells() {
        let dataset = RawDataset::from_text("x;y\n \"1\" ; 2 \n");
        let schema = SchemaDetector::new().detect(&dataset);
        let rows: Vec<SampleRow> = SampleRows::new(&dataset, &schema, '#').collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].line_index, 1);
        assert_eq!(rows[0].cells, vec!["1", "2"]);
        assert_eq!(rows[0].cell(5), None);
    }
}
