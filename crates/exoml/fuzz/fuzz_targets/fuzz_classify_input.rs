//! Fuzz target for classification input parsing.
//!
//! Any six strings must either classify into a proper distribution or be
//! rejected with a validation error.

#![no_main]

use arbitrary::Arbitrary;
use exoml::{Exoml, ExomlError, RawInputs};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Signal {
    period: String,
    duration: String,
    depth: String,
    radius: String,
    snr: String,
    stellar_radius: String,
}

fuzz_target!(|signal: Signal| {
    let raw = RawInputs {
        period: signal.period,
        duration: signal.duration,
        depth: signal.depth,
        radius: signal.radius,
        snr: signal.snr,
        stellar_radius: signal.stellar_radius,
    };

    match Exoml::new().classify_raw(&raw) {
        Ok(result) => {
            let sum = result.probabilities.sum();
            assert!((sum - 1.0).abs() < 1e-9);
            assert!(result.confidence > 0.0 && result.confidence < 1.0);
        }
        Err(ExomlError::InvalidClassificationInput { violations }) => {
            assert!(!violations.is_empty());
        }
        Err(e) => panic!("unexpected classification error: {e}"),
    }
});
