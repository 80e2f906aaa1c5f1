//! Inspect command - detect schema, map columns and count samples.

use std::path::PathBuf;

use colored::Colorize;
use exoml::{DatasetStatistics, Exoml, ExomlError, FieldId, Ingestion, MatchKind};

use super::{CommandResult, overrides_from};

pub fn run(
    exoml: &Exoml,
    file: PathBuf,
    overrides: Vec<(FieldId, String)>,
    json_output: bool,
    verbose: bool,
) -> CommandResult {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let mut ingestion = exoml.ingest_file(&file)?;

    // Manual choices are checked by finalize but shown even when still incomplete.
    if !overrides.is_empty() {
        let overrides = overrides_from(overrides);
        match exoml.finalize(&ingestion, &overrides) {
            Ok(prepared) => {
                ingestion.mapping = prepared.mapping;
                ingestion.statistics = prepared.statistics;
            }
            Err(ExomlError::IncompleteMapping { .. }) => {
                ingestion.mapping = ingestion.mapping.merged_with(&overrides);
            }
            Err(e) => return Err(e.into()),
        }
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&ingestion.summary())?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Inspecting".cyan().bold(),
        file.display().to_string().white()
    );
    if let (true, Some(source)) = (verbose, ingestion.source()) {
        println!("  {} ({} bytes)", source.hash.dimmed(), source.size_bytes);
    }
    println!();

    print_schema(&ingestion);
    print_mapping(exoml, &ingestion);
    print_statistics(&ingestion.statistics);

    let missing = ingestion.mapping.missing(exoml.registry());
    if missing.is_empty() {
        println!();
        println!(
            "Run {} to write the training table",
            format!("exoml export {}", file.display()).cyan().bold()
        );
    } else {
        println!();
        println!(
            "{} {}",
            "Unmapped fields:".yellow().bold(),
            missing
                .iter()
                .map(|f| f.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!(
            "Choose columns with {}",
            format!("--map {}=<column>", missing[0]).cyan()
        );
    }

    Ok(())
}

fn print_schema(ingestion: &Ingestion) {
    let schema = &ingestion.schema;
    println!("{}", "Schema:".yellow().bold());
    println!("  Delimiter:   {}", schema.delimiter.name());
    if let Some(index) = schema.header_index {
        println!("  Header line: {}", index + 1);
    }
    println!("  Columns:     {}", schema.column_count());
    for header in &schema.headers {
        println!("    {}", header);
    }
    println!();
}

fn print_mapping(exoml: &Exoml, ingestion: &Ingestion) {
    println!("{}", "Mapping:".yellow().bold());
    for spec in exoml.registry().fields() {
        match ingestion.mapping.entry(spec.id) {
            Some(mapped) => {
                let how = match mapped.kind {
                    MatchKind::Exact => "exact".green(),
                    MatchKind::Substring => "substring".yellow(),
                    MatchKind::Manual => "manual".blue(),
                };
                println!("  {:16} {:24} {}", spec.id.as_str(), mapped.column, how);
            }
            None => println!("  {:16} {}", spec.id.as_str(), "-".red()),
        }
    }
    println!();
}

fn print_statistics(stats: &DatasetStatistics) {
    println!("{}", "Statistics:".yellow().bold());
    println!("  Samples:  {}", stats.sample_count.to_string().white().bold());
    println!("  Features: {}", stats.feature_count.to_string().white().bold());
    match stats.class_count {
        Some(count) => println!("  Classes:  {}", count.to_string().white().bold()),
        None => println!("  Classes:  {}", "unknown (target not mapped)".dimmed()),
    }
    if let Some(counts) = &stats.class_counts {
        for (value, count) in counts {
            println!("    {:20} {}", value, count);
        }
    }
}
