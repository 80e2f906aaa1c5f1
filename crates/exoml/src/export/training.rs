//! Canonical training-table export for a fully mapped dataset.

use std::io::Write;

use tracing::info;

use crate::error::{ExomlError, Result};
use crate::input::RawDataset;
use crate::schema::{ColumnMapping, DetectedSchema, FieldRegistry, SampleRows};

/// Writes sample rows projected onto the mapped columns, one CSV column per field.
pub struct TrainingExporter<'a> {
    registry: &'a FieldRegistry,
    comment_marker: char,
}

impl<'a> TrainingExporter<'a> {
    pub fn new(registry: &'a FieldRegistry, comment_marker: char) -> Self {
        Self {
            registry,
            comment_marker,
        }
    }

    /// Write the table and return the number of data rows written.
    ///
    /// The header row is the field ids in registry order. Cells missing from
    /// short rows are written empty.
    pub fn write<W: Write>(
        &self,
        dataset: &RawDataset,
        schema: &DetectedSchema,
        mapping: &ColumnMapping,
        writer: W,
    ) -> Result<usize> {
        let columns = self.resolve_columns(schema, mapping)?;

        let mut wtr = csv::WriterBuilder::new().from_writer(writer);
        wtr.write_record(self.registry.fields().iter().map(|f| f.id.as_str()))?;

        let mut rows = 0;
        for row in SampleRows::new(dataset, schema, self.comment_marker) {
            wtr.write_record(columns.iter().map(|&idx| row.cell(idx).unwrap_or("")))?;
            rows += 1;
        }
        wtr.flush().map_err(csv::Error::from)?;

        info!(rows, fields = columns.len(), "training table written");
        Ok(rows)
    }

    /// Raw cell index of every registry field's mapped column.
    fn resolve_columns(&self, schema: &DetectedSchema, mapping: &ColumnMapping) -> Result<Vec<usize>> {
        let missing = mapping.missing(self.registry);
        if !missing.is_empty() {
            return Err(ExomlError::IncompleteMapping { missing });
        }

        self.registry
            .fields()
            .iter()
            .map(|spec| {
                let column = mapping.get(spec.id).unwrap_or_default();
                schema.column_index(column).ok_or_else(|| ExomlError::UnknownColumn {
                    field: spec.id,
                    column: column.to_string(),
                })
            })
            .collect()
    }
}
