//! Example: ingest an exoplanet candidate table and classify its first rows.
//!
//! Usage:
//!   cargo run --example ingest -- <file.csv>

use std::env;
use std::path::Path;

use exoml::{ClassificationInput, Exoml, FieldId, RawInputs};

fn main() -> exoml::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example ingest -- <file.csv>");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("ExoML Ingestion: {}", path.display());
    println!("{}", separator);
    println!();

    let exoml = Exoml::new();
    let ingestion = exoml.ingest_file(path)?;

    println!("## Schema");
    println!("  Delimiter: {}", ingestion.schema.delimiter);
    println!("  Columns:   {}", ingestion.schema.column_count());
    println!();

    println!("## Mapping");
    for spec in exoml.registry().fields() {
        match ingestion.mapping.entry(spec.id) {
            Some(mapped) => println!("  {:16} <- {} ({:?})", spec.id, mapped.column, mapped.kind),
            None => println!("  {:16} <- (unmapped)", spec.id),
        }
    }
    println!();

    println!("## Statistics");
    println!("  Samples:  {}", ingestion.statistics.sample_count);
    println!("  Features: {}", ingestion.statistics.feature_count);
    match ingestion.statistics.class_count {
        Some(n) => println!("  Classes:  {}", n),
        None => println!("  Classes:  unknown"),
    }
    println!();

    if !ingestion.is_ready() {
        println!("Map {:?} manually before classifying rows.", ingestion.missing_fields());
        return Ok(());
    }

    println!("## First rows");
    let prepared = exoml.finalize(&ingestion, &Default::default())?;
    let mut out = Vec::new();
    prepared.write_training_csv(&mut out)?;
    let table = String::from_utf8_lossy(&out);

    for line in table.lines().skip(1).take(5) {
        let cells: Vec<&str> = line.split(',').collect();
        let cell = |field: FieldId| {
            let idx = FieldId::ALL.iter().position(|f| *f == field).unwrap_or(0);
            cells.get(idx).copied().unwrap_or("").to_string()
        };
        let raw = RawInputs {
            period: cell(FieldId::OrbitalPeriod),
            duration: cell(FieldId::TransitDuration),
            depth: cell(FieldId::TransitDepth),
            radius: cell(FieldId::PlanetRadius),
            snr: cell(FieldId::Snr),
            stellar_radius: cell(FieldId::StellarRadius),
        };
        let target = cell(FieldId::Target);

        match ClassificationInput::parse(&raw).and_then(|input| exoml.classify(&input)) {
            Ok(result) => println!(
                "  {:20} -> {} ({:.1}%)",
                target,
                result.label,
                result.confidence * 100.0
            ),
            Err(e) => println!("  {:20} -> skipped: {}", target, e),
        }
    }

    Ok(())
}
