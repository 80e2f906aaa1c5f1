//! Hand-off artifacts: the canonical training table and classification reports.

mod report;
mod training;

pub use report::{ClassificationReport, ReportInput};
pub use training::TrainingExporter;
