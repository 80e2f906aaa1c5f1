//! Classify command - score a single transit-like signal.

use std::path::PathBuf;

use colored::Colorize;
use exoml::{ClassLabel, ClassificationInput, ClassificationReport, Exoml, RawInputs};

use super::CommandResult;
use crate::cli::SignalArgs;

pub fn run(
    exoml: &Exoml,
    signal: SignalArgs,
    json_output: bool,
    report_path: Option<PathBuf>,
) -> CommandResult {
    let raw = RawInputs {
        period: signal.period,
        duration: signal.duration,
        depth: signal.depth,
        radius: signal.radius,
        snr: signal.snr,
        stellar_radius: signal.stellar_radius,
    };
    let input = ClassificationInput::parse(&raw)?;
    let result = exoml.classify(&input)?;
    let report = ClassificationReport::new(&input, &result);

    if let Some(path) = &report_path {
        std::fs::write(path, report.render_text())?;
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let label = match result.label {
        ClassLabel::ConfirmedPlanet => result.label.as_str().green().bold(),
        ClassLabel::FalsePositive => result.label.as_str().red().bold(),
        ClassLabel::Candidate => result.label.as_str().yellow().bold(),
    };
    println!(
        "{} {} ({:.1}% confidence)",
        "Prediction:".cyan().bold(),
        label,
        result.confidence * 100.0
    );
    println!();

    for (class, p) in result.probabilities.iter() {
        let filled = (p * 30.0).round() as usize;
        let bar: String = "█".repeat(filled) + &"░".repeat(30 - filled.min(30));
        println!("  {:16} {} {:5.1}%", class.as_str(), bar.cyan(), p * 100.0);
    }
    println!();

    println!("{}", result.explanation);

    if let Some(path) = report_path {
        println!();
        println!(
            "{} {}",
            "Report saved to".green().bold(),
            path.display().to_string().white()
        );
    }

    Ok(())
}
