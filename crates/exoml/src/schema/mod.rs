//! Semantic field registry, detected schemas, column mapping and dataset statistics.

mod detected;
mod field;
mod mapping;
mod statistics;

pub use detected::DetectedSchema;
pub use field::{FieldId, FieldRegistry, FieldSpec};
pub use mapping::{ColumnMapping, MappedColumn, MapperConfig, MatchKind, SynonymMapper};
pub use statistics::{DatasetStatistics, SampleRow, SampleRows};
