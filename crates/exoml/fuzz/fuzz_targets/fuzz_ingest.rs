//! Fuzz target for header detection, mapping and training export.
//!
//! This fuzzer tests that ingestion:
//! 1. Never panics on malformed text
//! 2. Either detects a schema or reports detection failure
//! 3. Exports whatever it can map without panicking

#![no_main]

use exoml::{ColumnMapping, Exoml, ExomlError};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let text = String::from_utf8_lossy(data).into_owned();
    let exoml = Exoml::new();

    match exoml.ingest_text(text) {
        Ok(ingestion) => {
            assert!(ingestion.schema.is_detected());
            assert_eq!(
                ingestion.statistics.feature_count,
                ingestion.schema.column_count()
            );

            if let Ok(prepared) = exoml.finalize(&ingestion, &ColumnMapping::new()) {
                let mut out = Vec::new();
                let _ = prepared.write_training_csv(&mut out);
            }
        }
        Err(ExomlError::SchemaDetectionFailed { .. }) => {}
        Err(e) => panic!("unexpected ingestion error: {e}"),
    }
});
