//! ExoML: dataset schema inference and heuristic classification of transit signals.
//!
//! Two independent, stateless pipelines:
//!
//! - **Ingestion** turns CSV-like text of candidate transit signals into a
//!   detected schema, a mapping of free-form column names onto the seven
//!   required fields, and row/column/class counts.
//! - **Classification** turns six physical measurements into a class label,
//!   a probability per class, and a rule-based explanation.
//!
//! # Example
//!
//! ```no_run
//! use exoml::{ClassificationInput, Exoml};
//!
//! let exoml = Exoml::new();
//! let ingestion = exoml.ingest_file("cumulative.csv").unwrap();
//! println!("Samples: {}", ingestion.statistics.sample_count);
//!
//! let input = ClassificationInput::new(3.5, 2.8, 0.008, 2.1, 25.0, 0.95);
//! let result = exoml.classify(&input).unwrap();
//! println!("{} ({:.1}%)", result.label, result.confidence * 100.0);
//! ```

pub mod classify;
pub mod error;
pub mod export;
pub mod input;
pub mod schema;

mod exoml;

pub use crate::exoml::{
    Exoml, ExomlConfig, Ingestion, IngestionStatus, IngestionSummary, PreparedDataset,
};
pub use classify::{
    ClassLabel, ClassProbabilities, ClassificationInput, ClassificationResult, Classifier,
    DerivedFeatures, Explanation, InputField, RawInputs,
};
pub use error::{ExomlError, InputViolation, Result, ViolationKind};
pub use export::{ClassificationReport, TrainingExporter};
pub use input::{Delimiter, RawDataset, SourceMetadata};
pub use schema::{
    ColumnMapping, DatasetStatistics, DetectedSchema, FieldId, FieldRegistry, FieldSpec,
    MatchKind, SynonymMapper,
};
