//! The fixed registry of semantic fields a training dataset must provide.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExomlError;

/// Identifier of a required semantic field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    OrbitalPeriod,
    TransitDuration,
    TransitDepth,
    PlanetRadius,
    Snr,
    StellarRadius,
    Target,
}

impl FieldId {
    /// All fields, in registry order.
    pub const ALL: [FieldId; 7] = [
        FieldId::OrbitalPeriod,
        FieldId::TransitDuration,
        FieldId::TransitDepth,
        FieldId::PlanetRadius,
        FieldId::Snr,
        FieldId::StellarRadius,
        FieldId::Target,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::OrbitalPeriod => "orbital_period",
            FieldId::TransitDuration => "transit_duration",
            FieldId::TransitDepth => "transit_depth",
            FieldId::PlanetRadius => "planet_radius",
            FieldId::Snr => "snr",
            FieldId::StellarRadius => "stellar_radius",
            FieldId::Target => "target",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = ExomlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        FieldId::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| ExomlError::UnknownField(s.to_string()))
    }
}

/// A required field: id, display label and accepted column-name synonyms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub id: FieldId,
    pub label: &'static str,
    pub synonyms: &'static [&'static str],
}

// No SNR synonym may contain "noise".
const STANDARD_FIELDS: [FieldSpec; 7] = [
    FieldSpec {
        id: FieldId::OrbitalPeriod,
        label: "Orbital Period (days)",
        synonyms: &[
            "orbital_period",
            "period",
            "p",
            "pl_orbper",
            "koi_period",
            "orbper",
            "orb per",
            "orbital period",
            "per",
            "t0_p",
        ],
    },
    FieldSpec {
        id: FieldId::TransitDuration,
        label: "Transit Duration (days)",
        synonyms: &[
            "transit_duration",
            "duration",
            "koi_duration",
            "tdur",
            "transitdur",
            "tr_dur",
            "tr_dur_days",
            "tdur_d",
        ],
    },
    FieldSpec {
        id: FieldId::TransitDepth,
        label: "Transit Depth (fraction)",
        synonyms: &[
            "transit_depth",
            "depth",
            "koi_depth",
            "pl_trandep",
            "tran_depth",
            "depth_frac",
            "transit depth",
        ],
    },
    FieldSpec {
        id: FieldId::PlanetRadius,
        label: "Planet Radius (Earth radii)",
        synonyms: &[
            "planet_radius",
            "pl_rade",
            "pl_radj",
            "koi_prad",
            "radius",
            "prad",
            "rp",
            "planet radius",
        ],
    },
    FieldSpec {
        id: FieldId::Snr,
        label: "Signal-to-Noise Ratio (SNR)",
        synonyms: &[
            "snr",
            "koi_snr",
            "koi_model_snr",
            "tce_snr",
            "mes",
            "snratio",
            "sn_ratio",
            "s/n",
        ],
    },
    FieldSpec {
        id: FieldId::StellarRadius,
        label: "Stellar Radius (solar radii)",
        synonyms: &[
            "stellar_radius",
            "st_rad",
            "radius_star",
            "rstar",
            "host_radius",
            "star_radius",
            "rs",
            "koi_srad",
        ],
    },
    FieldSpec {
        id: FieldId::Target,
        label: "Label / Target",
        synonyms: &[
            "target",
            "label",
            "class",
            "tfopwg_disp",
            "koi_disposition",
            "disposition",
            "y",
            "outcome",
            "status",
        ],
    },
];

/// Ordered sequence of the fields a dataset must map.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    fields: Vec<FieldSpec>,
}

impl FieldRegistry {
    /// The seven standard fields.
    pub fn standard() -> Self {
        Self {
            fields: STANDARD_FIELDS.to_vec(),
        }
    }

    /// Fields in mapping and export order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the registry has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
