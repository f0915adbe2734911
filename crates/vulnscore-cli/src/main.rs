//! vulnscore - CVSS v3.1 calculator
//!
//! Scores each vector given on the command line, or one vector per line of
//! stdin when none are given.

mod report;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing::{debug, info};
use vulnscore_common::{Config, LogConfig, OutputConfig, OutputFormat};
use vulnscore_core::{evaluate, parse_vector, Severity};

/// CVSS v3.1 score calculator
#[derive(Parser, Debug)]
#[command(name = "vulnscore")]
#[command(author = "Forge Cyber Defense")]
#[command(version)]
#[command(about = "Compute CVSS v3.1 scores from vector strings", long_about = None)]
struct Args {
    /// Vector strings, e.g. CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H
    vectors: Vec<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Output format (text, json)
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Include impact and exploitability sub-scores
    #[arg(long)]
    subscores: bool,

    /// List every metric with its long name (text output only)
    #[arg(long)]
    explain: bool,

    /// Exit with status 2 when any vector reaches this severity
    #[arg(long)]
    fail_on: Option<Severity>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (pretty, json, compact)
    #[arg(long)]
    log_format: Option<String>,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Load configuration
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    }
    .merge_env();

    // Command-line flags override config and environment
    if let Some(format) = args.format {
        config.output.format = format;
    }
    if args.subscores {
        config.output.show_subscores = true;
    }
    if let Some(severity) = args.fail_on {
        config.output.fail_on = Some(severity);
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if let Some(format) = &args.log_format {
        config.logging.format = format.clone();
    }
    config.validate()?;

    vulnscore_common::init_logging_with_config(LogConfig::from(&config.logging));
    info!("vulnscore {}", env!("CARGO_PKG_VERSION"));

    let vectors = if args.vectors.is_empty() {
        read_vectors(io::stdin().lock()).context("Failed to read vectors from stdin")?
    } else {
        args.vectors
    };
    if vectors.is_empty() {
        anyhow::bail!("no vectors given");
    }

    let stdout = io::stdout();
    let stderr = io::stderr();
    let tally = score_vectors(
        &vectors,
        &mut stdout.lock(),
        &mut stderr.lock(),
        &config.output,
        args.explain,
    )?;

    info!(total = vectors.len(), failures = tally.failures, "Scoring complete");

    if tally.failures > 0 {
        anyhow::bail!("{} of {} vectors could not be scored", tally.failures, vectors.len());
    }
    if tally.threshold_reached {
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}

/// Outcome of scoring a batch of vectors
#[derive(Debug, Default, PartialEq, Eq)]
struct Tally {
    failures: usize,
    threshold_reached: bool,
}

/// Score every vector, reporting each one before looking at the next.
///
/// A vector that fails to parse or score is written to `errors` and counted;
/// it never stops the batch.
fn score_vectors(
    vectors: &[String],
    out: &mut impl Write,
    errors: &mut impl Write,
    config: &OutputConfig,
    explain: bool,
) -> Result<Tally> {
    let mut tally = Tally::default();

    for vector in vectors {
        let scored = parse_vector(vector).and_then(|record| {
            let result = evaluate(&record)?;
            Ok((record, result))
        });

        match scored {
            Ok((record, result)) => {
                report::write_report(out, &record, &result, config, explain)?;
                if let Some(threshold) = config.fail_on {
                    tally.threshold_reached |= result.overall_severity() >= threshold;
                }
            }
            Err(e) => {
                debug!(vector = %vector, code = e.code(), "Vector rejected");
                writeln!(errors, "error: {vector}: {e}")?;
                tally.failures += 1;
            }
        }
    }
    out.flush()?;

    Ok(tally)
}

/// Collect non-empty, non-comment lines
fn read_vectors(input: impl BufRead) -> io::Result<Vec<String>> {
    let mut vectors = Vec::new();
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() && !line.starts_with('#') {
            vectors.push(line.to_string());
        }
    }
    Ok(vectors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_vectors_skips_blanks_and_comments() {
        let input = "# scan results\n\nCVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H\n  CVSS:3.1/AV:L/AC:L/PR:L/UI:N/S:U/C:H/I:N/A:N  \n";
        let vectors = read_vectors(input.as_bytes()).unwrap();
        assert_eq!(
            vectors,
            vec![
                "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H",
                "CVSS:3.1/AV:L/AC:L/PR:L/UI:N/S:U/C:H/I:N/A:N",
            ]
        );
    }

    fn run(vectors: &[&str], fail_on: Option<Severity>) -> (Tally, String, String) {
        let vectors: Vec<String> = vectors.iter().map(|v| v.to_string()).collect();
        let config = OutputConfig {
            fail_on,
            ..OutputConfig::default()
        };
        let mut out = Vec::new();
        let mut errors = Vec::new();
        let tally = score_vectors(&vectors, &mut out, &mut errors, &config, false).unwrap();
        (
            tally,
            String::from_utf8(out).unwrap(),
            String::from_utf8(errors).unwrap(),
        )
    }

    #[test]
    fn test_failures_do_not_stop_the_batch() {
        let (tally, out, errors) = run(
            &[
                "CVSS:3.1/AV:N/AC:M/PR:N/UI:N/S:U/C:H/I:H/A:H",
                "CVSS:3.1/AV:L/AC:L/PR:L/UI:N/S:U/C:H/I:N/A:N",
                "CVSS:3.1/AV:N/AC:L",
            ],
            None,
        );
        assert_eq!(
            tally,
            Tally {
                failures: 2,
                threshold_reached: false
            }
        );
        assert!(out.contains("CVSS:3.1/AV:L/AC:L/PR:L/UI:N/S:U/C:H/I:N/A:N"));
        assert_eq!(errors.lines().count(), 2);
        assert!(errors.contains("Invalid value 'M' for metric AC"));
        assert!(errors.contains("Missing mandatory metric"));
    }

    #[test]
    fn test_fail_on_threshold() {
        let critical = "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H";
        let medium = "CVSS:3.1/AV:L/AC:L/PR:L/UI:N/S:U/C:H/I:N/A:N";

        let (tally, _, _) = run(&[medium, critical], Some(Severity::Critical));
        assert!(tally.threshold_reached);
        assert_eq!(tally.failures, 0);

        let (tally, _, _) = run(&[medium], Some(Severity::High));
        assert!(!tally.threshold_reached);

        let (tally, _, _) = run(&[critical], None);
        assert!(!tally.threshold_reached);
    }

    #[test]
    fn test_environmental_severity_reaches_threshold() {
        // Base 6.3 (Medium), environmental 7.4 (High)
        let (tally, _, _) = run(
            &["CVSS:3.1/AV:N/AC:L/PR:L/UI:N/S:U/C:L/I:L/A:L/CR:H/IR:H/AR:H"],
            Some(Severity::High),
        );
        assert!(tally.threshold_reached);
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "vulnscore",
            "--format",
            "json",
            "--fail-on",
            "high",
            "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H",
        ])
        .unwrap();
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.fail_on, Some(Severity::High));
        assert_eq!(args.vectors.len(), 1);
    }
}
