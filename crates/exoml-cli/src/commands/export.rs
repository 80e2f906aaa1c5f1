//! Export command - write the canonical training table.

use std::path::PathBuf;

use colored::Colorize;
use exoml::{Exoml, ExomlError, FieldId};

use super::{CommandResult, overrides_from};

pub fn run(
    exoml: &Exoml,
    file: PathBuf,
    output: Option<PathBuf>,
    overrides: Vec<(FieldId, String)>,
) -> CommandResult {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let ingestion = exoml.ingest_file(&file)?;
    let prepared = match exoml.finalize(&ingestion, &overrides_from(overrides)) {
        Ok(prepared) => prepared,
        Err(e @ ExomlError::IncompleteMapping { .. }) => {
            eprintln!(
                "{} {}",
                "Available columns:".yellow().bold(),
                ingestion.schema.headers.join(", ")
            );
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    let output_path = output.unwrap_or_else(|| {
        let mut p = file.clone();
        let stem = p.file_stem().unwrap_or_default().to_string_lossy();
        p.set_file_name(format!("{}.training.csv", stem));
        p
    });

    let rows = prepared.save_training_csv(&output_path)?;

    println!(
        "{} {} rows to {}",
        "Exported".green().bold(),
        rows.to_string().white().bold(),
        output_path.display().to_string().white()
    );
    if let Some(classes) = prepared.statistics.class_count {
        println!("Classes: {}", classes);
    }

    Ok(())
}
