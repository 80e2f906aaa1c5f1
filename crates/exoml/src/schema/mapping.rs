//! Synonym-based mapping of detected headers onto required fields.

use std::collections::HashSet;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::field::{FieldId, FieldRegistry};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// How a column came to be assigned to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Normalized header equals a normalized synonym.
    Exact,
    /// Header contains a synonym, or a synonym contains the header.
    Substring,
    /// Supplied by the caller.
    Manual,
}

/// A header assigned to a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedColumn {
    pub column: String,
    pub kind: MatchKind,
}

/// Field id to header name, kept in registry order. Absent fields are unmapped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping {
    entries: IndexMap<FieldId, MappedColumn>,
}

impl ColumnMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a column by hand.
    pub fn with(mut self, field: FieldId, column: impl Into<String>) -> Self {
        self.insert(field, column, MatchKind::Manual);
        self
    }

    /// Assign a column, keeping entries in registry order.
    pub fn insert(&mut self, field: FieldId, column: impl Into<String>, kind: MatchKind) {
        self.entries.insert(
            field,
            MappedColumn {
                column: column.into(),
                kind,
            },
        );
        self.entries.sort_keys();
    }

    /// Column assigned to `field`, if any.
    pub fn get(&self, field: FieldId) -> Option<&str> {
        self.entries.get(&field).map(|m| m.column.as_str())
    }

    /// Column and match kind assigned to `field`.
    pub fn entry(&self, field: FieldId) -> Option<&MappedColumn> {
        self.entries.get(&field)
    }

    /// Assigned fields in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &MappedColumn)> {
        self.entries.iter().map(|(id, m)| (*id, m))
    }

    /// Number of assigned fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no field has a column yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fields of `registry` without a column, in registry order.
    pub fn missing(&self, registry: &FieldRegistry) -> Vec<FieldId> {
        registry
            .fields()
            .iter()
            .map(|f| f.id)
            .filter(|id| !self.entries.contains_key(id))
            .collect()
    }

    /// Every registry field has a column.
    pub fn is_complete(&self, registry: &FieldRegistry) -> bool {
        self.missing(registry).is_empty()
    }

    /// Overlay `overrides` on this mapping; overrides win per field.
    pub fn merged_with(&self, overrides: &ColumnMapping) -> ColumnMapping {
        let mut merged = self.clone();
        for (field, mapped) in overrides.iter() {
            merged.insert(field, mapped.column.clone(), MatchKind::Manual);
        }
        merged
    }
}

/// Mapper configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Fall back to substring matching when no exact synonym matches.
    pub substring_matching: bool,
    /// A header claimed by an earlier field is not offered to later fields.
    pub exclusive_columns: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            substring_matching: true,
            exclusive_columns: true,
        }
    }
}

/// Maps free-form headers onto the field registry by synonym.
pub struct SynonymMapper {
    registry: FieldRegistry,
    config: MapperConfig,
    /// Normalized synonyms per field, in registry order.
    synonyms: Vec<(FieldId, Vec<String>)>,
}

impl SynonymMapper {
    /// Create a mapper over the standard registry.
    pub fn new() -> Self {
        Self::with_config(FieldRegistry::standard(), MapperConfig::default())
    }

    /// Create a mapper with a custom registry and configuration.
    pub fn with_config(registry: FieldRegistry, config: MapperConfig) -> Self {
        let synonyms = registry
            .fields()
            .iter()
            .map(|spec| {
                let normalized = spec.synonyms.iter().map(|s| Self::normalize(s)).collect();
                (spec.id, normalized)
            })
            .collect();

        Self {
            registry,
            config,
            synonyms,
        }
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Lower-case, trim, and collapse whitespace runs to a single underscore.
    pub fn normalize(name: &str) -> String {
        WHITESPACE_RUN
            .replace_all(&name.trim().to_lowercase(), "_")
            .into_owned()
    }

    /// Map headers onto fields. Deterministic: the first qualifying header in
    /// column order wins, exact matches are tried before substring matches.
    pub fn map(&self, headers: &[String]) -> ColumnMapping {
        let normalized: Vec<String> = headers.iter().map(|h| Self::normalize(h)).collect();
        let mut claimed: HashSet<usize> = HashSet::new();
        let mut mapping = ColumnMapping::new();

        for (field, synonyms) in &self.synonyms {
            let available = |idx: &usize| !(self.config.exclusive_columns && claimed.contains(idx));

            let exact = (0..headers.len())
                .filter(available)
                .find(|&idx| synonyms.iter().any(|s| *s == normalized[idx]))
                .map(|idx| (idx, MatchKind::Exact));

            let found = exact.or_else(|| {
                if !self.config.substring_matching {
                    return None;
                }
                (0..headers.len())
                    .filter(available)
                    .find(|&idx| {
                        let header = &normalized[idx];
                        !header.is_empty()
                            && synonyms
                                .iter()
                                .any(|s| header.contains(s.as_str()) || s.contains(header.as_str()))
                    })
                    .map(|idx| (idx, MatchKind::Substring))
            });

            match found {
                Some((idx, kind)) => {
                    debug!(field = %field, column = %headers[idx], ?kind, "field mapped");
                    claimed.insert(idx);
                    mapping.insert(*field, headers[idx].clone(), kind);
                }
                None => debug!(field = %field, "no column matches field"),
            }
        }

        mapping
    }
}

impl Default for SynonymMapper {
    fn default() -> Self {
        Self::new()
    }
}
