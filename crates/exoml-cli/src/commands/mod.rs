//! CLI command implementations.

pub mod classify;
pub mod export;
pub mod inspect;

use std::path::Path;

use exoml::{ColumnMapping, Exoml, ExomlConfig, FieldId};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Build the engine, reading configuration when a path is given.
pub fn build_engine(config: Option<&Path>) -> Result<Exoml, Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => ExomlConfig::from_json_file(path)?,
        None => ExomlConfig::default(),
    };
    Ok(Exoml::with_config(config))
}

/// Collect `--map` pairs; later pairs win for a repeated field.
pub fn overrides_from(pairs: Vec<(FieldId, String)>) -> ColumnMapping {
    pairs
        .into_iter()
        .fold(ColumnMapping::new(), |mapping, (field, column)| mapping.with(field, column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_last_wins() {
        let mapping = overrides_from(vec![
            (FieldId::Snr, "a".to_string()),
            (FieldId::Snr, "b".to_string()),
        ]);
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get(FieldId::Snr), Some("b"));
    }
}
