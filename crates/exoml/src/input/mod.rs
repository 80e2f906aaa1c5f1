//! Raw dataset handling and header/delimiter detection.

mod detector;
mod source;

pub use detector::{Delimiter, DetectorConfig, SchemaDetector};
pub use source::{RawDataset, SourceMetadata};
