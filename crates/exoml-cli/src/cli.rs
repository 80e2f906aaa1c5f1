//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use exoml::FieldId;
use std::path::PathBuf;

/// ExoML: exoplanet dataset ingestion and transit-signal classification
#[derive(Parser)]
#[command(name = "exoml")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON configuration file for detection and mapping
    #[arg(long, global = true, value_name = "CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect the schema of a CSV dataset and map its columns
    Inspect {
        /// Path to the dataset (.csv)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Manual column choice, e.g. --map snr=koi_model_snr
        #[arg(short, long = "map", value_name = "FIELD=COLUMN", value_parser = parse_override)]
        overrides: Vec<(FieldId, String)>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export a dataset as a canonical training table
    Export {
        /// Path to the dataset (.csv)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (default: <file>.training.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Manual column choice, e.g. --map snr=koi_model_snr
        #[arg(short, long = "map", value_name = "FIELD=COLUMN", value_parser = parse_override)]
        overrides: Vec<(FieldId, String)>,
    },

    /// Classify a single transit-like signal
    Classify {
        #[command(flatten)]
        signal: SignalArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Also write a plain-text report to this path
        #[arg(long, value_name = "PATH")]
        report: Option<PathBuf>,
    },
}

/// The six measurements, taken as text so every bad value is reported at once.
#[derive(clap::Args)]
pub struct SignalArgs {
    /// Orbital period in days
    #[arg(long, default_value = "")]
    pub period: String,

    /// Transit duration in hours
    #[arg(long, default_value = "")]
    pub duration: String,

    /// Transit depth as a fraction of stellar flux
    #[arg(long, default_value = "")]
    pub depth: String,

    /// Planet radius in Earth radii
    #[arg(long, default_value = "")]
    pub radius: String,

    /// Signal-to-noise ratio
    #[arg(long, default_value = "")]
    pub snr: String,

    /// Stellar radius in solar radii
    #[arg(long, default_value = "")]
    pub stellar_radius: String,
}

fn parse_override(s: &str) -> Result<(FieldId, String), String> {
    let (field, column) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=COLUMN, got '{}'", s))?;
    let field: FieldId = field.parse().map_err(|e: exoml::ExomlError| e.to_string())?;
    let column = column.trim();
    if column.is_empty() {
        return Err(format!("no column given for '{}'", field));
    }
    Ok((field, column.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_override() {
        let (field, column) = parse_override("snr=koi_model_snr").unwrap();
        assert_eq!(field, FieldId::Snr);
        assert_eq!(column, "koi_model_snr");
    }

    #[test]
    fn test_parse_override_rejects_bad_input() {
        assert!(parse_override("snr").is_err());
        assert!(parse_override("wobble=x").is_err());
        assert!(parse_override("snr=").is_err());
    }

    #[test]
    fn test_cli_parses_classify() {
        let cli = Cli::try_parse_from([
            "exoml",
            "classify",
            "--period",
            "3.5",
            "--duration",
            "2.8",
            "--depth",
            "0.008",
            "--radius",
            "2.1",
            "--snr",
            "25",
            "--stellar-radius",
            "0.95",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Classify { signal, json, .. } => {
                assert!(json);
                assert_eq!(signal.stellar_radius, "0.95");
            }
            _ => panic!("expected classify"),
        }
    }
}
