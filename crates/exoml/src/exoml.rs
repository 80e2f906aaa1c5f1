//! Main ExoML struct and public API.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::classify::{ClassificationInput, ClassificationResult, Classifier, RawInputs};
use crate::error::{ExomlError, Result};
use crate::export::TrainingExporter;
use crate::input::{DetectorConfig, RawDataset, SchemaDetector, SourceMetadata};
use crate::schema::{
    ColumnMapping, DatasetStatistics, DetectedSchema, FieldId, FieldRegistry, MapperConfig,
    SynonymMapper,
};

/// Configuration for ingestion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExomlConfig {
    /// Header and delimiter detection.
    pub detector: DetectorConfig,
    /// Synonym column mapping.
    pub mapper: MapperConfig,
}

impl ExomlConfig {
    /// Load configuration from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ExomlError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.detector.delimiters.is_empty() {
            return Err(ExomlError::Config(
                "at least one candidate delimiter is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Whether an ingestion can proceed without caller input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum IngestionStatus {
    /// Every field was mapped automatically.
    Ready,
    /// The listed fields need a manual column choice.
    NeedsMapping { missing: Vec<FieldId> },
}

/// A dataset whose header was found and whose columns were auto-mapped.
#[derive(Debug, Clone)]
pub struct Ingestion {
    pub dataset: RawDataset,
    pub schema: DetectedSchema,
    pub mapping: ColumnMapping,
    /// Class count stays unknown until the mapping is complete.
    pub statistics: DatasetStatistics,
    missing: Vec<FieldId>,
}

impl Ingestion {
    pub fn status(&self) -> IngestionStatus {
        if self.missing.is_empty() {
            IngestionStatus::Ready
        } else {
            IngestionStatus::NeedsMapping {
                missing: self.missing.clone(),
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.missing.is_empty()
    }

    /// Fields the automatic mapping could not resolve, in registry order.
    pub fn missing_fields(&self) -> &[FieldId] {
        &self.missing
    }

    pub fn source(&self) -> Option<&SourceMetadata> {
        self.dataset.source()
    }

    /// Serializable view without the raw text.
    pub fn summary(&self) -> IngestionSummary {
        IngestionSummary {
            source: self.dataset.source().cloned(),
            schema: self.schema.clone(),
            mapping: self.mapping.clone(),
            statistics: self.statistics.clone(),
            status: self.status(),
        }
    }
}

/// What an ingestion found, for display or JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
    pub schema: DetectedSchema,
    pub mapping: ColumnMapping,
    pub statistics: DatasetStatistics,
    pub status: IngestionStatus,
}

/// A dataset with every required field mapped, ready for training export.
#[derive(Debug, Clone)]
pub struct PreparedDataset {
    pub dataset: RawDataset,
    pub schema: DetectedSchema,
    pub mapping: ColumnMapping,
    pub statistics: DatasetStatistics,
    registry: FieldRegistry,
    comment_marker: char,
}

impl PreparedDataset {
    /// Write the canonical training table; returns the number of rows.
    pub fn write_training_csv<W: Write>(&self, writer: W) -> Result<usize> {
        TrainingExporter::new(&self.registry, self.comment_marker).write(
            &self.dataset,
            &self.schema,
            &self.mapping,
            writer,
        )
    }

    /// Write the canonical training table to a file.
    pub fn save_training_csv(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| ExomlError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.write_training_csv(BufWriter::new(file))
    }
}

/// The ExoML engine: dataset ingestion and signal classification.
///
/// Holds configuration only; every call is independent of every other.
pub struct Exoml {
    config: ExomlConfig,
    detector: SchemaDetector,
    mapper: SynonymMapper,
    classifier: Classifier,
}

impl Exoml {
    /// Create an engine with default configuration.
    pub fn new() -> Self {
        Self::with_config(ExomlConfig::default())
    }

    /// Create an engine with custom configuration.
    pub fn with_config(config: ExomlConfig) -> Self {
        let detector = SchemaDetector::with_config(config.detector.clone());
        let mapper = SynonymMapper::with_config(FieldRegistry::standard(), config.mapper.clone());

        Self {
            config,
            detector,
            mapper,
            classifier: Classifier::new(),
        }
    }

    pub fn config(&self) -> &ExomlConfig {
        &self.config
    }

    pub fn registry(&self) -> &FieldRegistry {
        self.mapper.registry()
    }

    /// Read and ingest a `.csv` file.
    pub fn ingest_file(&self, path: impl AsRef<Path>) -> Result<Ingestion> {
        let dataset = RawDataset::from_path(path)?;
        self.ingest(dataset)
    }

    /// Ingest in-memory CSV text.
    pub fn ingest_text(&self, text: impl Into<String>) -> Result<Ingestion> {
        self.ingest(RawDataset::from_text(text))
    }

    /// Detect the schema, map columns and count what can be counted.
    pub fn ingest(&self, dataset: RawDataset) -> Result<Ingestion> {
        let schema = self.detector.detect(&dataset);
        if !schema.is_detected() {
            warn!(lines = dataset.line_count(), "no header line found");
            return Err(ExomlError::SchemaDetectionFailed {
                lines_scanned: dataset.line_count(),
            });
        }

        let mapping = self.mapper.map(&schema.headers);
        let missing = mapping.missing(self.registry());

        let statistics = if missing.is_empty() {
            DatasetStatistics::compute(&dataset, &schema, Some(&mapping), self.comment_marker())
        } else {
            warn!(?missing, "automatic column mapping is incomplete");
            DatasetStatistics::compute(&dataset, &schema, None, self.comment_marker())
        };

        info!(
            columns = schema.column_count(),
            delimiter = %schema.delimiter,
            samples = statistics.sample_count,
            classes = ?statistics.class_count,
            "dataset ingested"
        );

        Ok(Ingestion {
            dataset,
            schema,
            mapping,
            statistics,
            missing,
        })
    }

    /// Apply manual column choices and require every field to be mapped.
    ///
    /// `overrides` may be partial; its entries replace the automatic ones.
    /// Each override must name a detected header.
    pub fn finalize(&self, ingestion: &Ingestion, overrides: &ColumnMapping) -> Result<PreparedDataset> {
        for (field, mapped) in overrides.iter() {
            if !ingestion.schema.contains(&mapped.column) {
                return Err(ExomlError::UnknownColumn {
                    field,
                    column: mapped.column.clone(),
                });
            }
        }

        let mapping = ingestion.mapping.merged_with(overrides);
        let missing = mapping.missing(self.registry());
        if !missing.is_empty() {
            return Err(ExomlError::IncompleteMapping { missing });
        }

        let statistics = DatasetStatistics::compute(
            &ingestion.dataset,
            &ingestion.schema,
            Some(&mapping),
            self.comment_marker(),
        );
        info!(classes = ?statistics.class_count, "column mapping finalized");

        Ok(PreparedDataset {
            dataset: ingestion.dataset.clone(),
            schema: ingestion.schema.clone(),
            mapping,
            statistics,
            registry: self.registry().clone(),
            comment_marker: self.comment_marker(),
        })
    }

    /// Classify a transit-like signal.
    pub fn classify(&self, input: &ClassificationInput) -> Result<ClassificationResult> {
        self.classifier.classify(input)
    }

    /// Classify a signal given as strings.
    pub fn classify_raw(&self, raw: &RawInputs) -> Result<ClassificationResult> {
        self.classifier.classify_raw(raw)
    }

    fn comment_marker(&self) -> char {
        self.detector.comment_marker()
    }
}

impl Default for Exoml {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_from_empty_json() {
        let config: ExomlConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.detector.delimiters.len(), 4);
        assert_eq!(config.detector.comment_marker, '#');
        assert!(config.mapper.substring_matching);
        assert!(config.mapper.exclusive_columns);
    }

    #[test]
    fn test_config_partial_override() {
        let config: ExomlConfig =
            serde_json::from_str(r#"{"detector": {"delimiters": ["tab"]}}"#).unwrap();
        assert_eq!(config.detector.delimiters, vec![crate::input::Delimiter::Tab]);
        assert_eq!(config.detector.comment_marker, '#');
    }

    #[test]
    fn test_empty_delimiter_list_rejected() {
        let config: ExomlConfig =
            serde_json::from_str(r#"{"detector": {"delimiters": []}}"#).unwrap();
        assert!(matches!(config.validate(), Err(ExomlError::Config(_))));
    }

    #[test]
    fn test_ingest_detection_failure() {
        let err = Exoml::new().ingest_text("# nothing here\n\nsingle\n").unwrap_err();
        assert!(matches!(err, ExomlError::SchemaDetectionFailed { lines_scanned: 4 }));
    }

    #[test]
    fn test_partial_mapping_keeps_class_count_unknown() {
        let ingestion = Exoml::new()
            .ingest_text("P,Dur,Depth,Rad,Noise,StarR,Disp\n1,2,3,4,5,6,A\n1,2,3,4,5,6,B\n")
            .unwrap();
        assert!(!ingestion.is_ready());
        assert_eq!(
            ingestion.status(),
            IngestionStatus::NeedsMapping {
                missing: vec![FieldId::Snr, FieldId::StellarRadius]
            }
        );
        assert_eq!(ingestion.statistics.sample_count, 2);
        assert_eq!(ingestion.statistics.feature_count, 7);
        assert_eq!(ingestion.statistics.class_count, None);
    }

    #[test]
    fn test_finalize_rejects_unknown_column() {
        let exoml = Exoml::new();
        let ingestion = exoml.ingest_text("P,Dur,Depth,Rad,Noise,StarR,Disp\n").unwrap();
        let overrides = ColumnMapping::new().with(FieldId::Snr, "signal");
        let err = exoml.finalize(&ingestion, &overrides).unwrap_err();
        assert!(matches!(err, ExomlError::UnknownColumn { field: FieldId::Snr, .. }));
    }
}
