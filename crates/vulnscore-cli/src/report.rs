//! Rendering of score results for the terminal

use anyhow::Result;
use std::io::Write;
use vulnscore_common::{OutputConfig, OutputFormat};
use vulnscore_core::{MetricsRecord, ScoreResult};

/// Write one report for `result` in the configured format
pub fn write_report(
    out: &mut impl Write,
    record: &MetricsRecord,
    result: &ScoreResult,
    config: &OutputConfig,
    explain: bool,
) -> Result<()> {
    match config.format {
        OutputFormat::Text => write_text(out, record, result, config.show_subscores, explain),
        OutputFormat::Json => write_json(out, result, config),
    }
}

fn write_text(
    out: &mut impl Write,
    record: &MetricsRecord,
    result: &ScoreResult,
    show_subscores: bool,
    explain: bool,
) -> Result<()> {
    writeln!(out, "{}", result.vector)?;
    writeln!(
        out,
        "  Base:          {:>4.1} ({})",
        result.base_score, result.base_severity
    )?;
    writeln!(
        out,
        "  Temporal:      {:>4.1} ({})",
        result.temporal_score, result.temporal_severity
    )?;
    writeln!(
        out,
        "  Environmental: {:>4.1} ({})",
        result.environmental_score, result.environmental_severity
    )?;

    if show_subscores {
        let sub = &result.sub_scores;
        writeln!(
            out,
            "  Impact: {:.4}  Exploitability: {:.4}",
            sub.impact, sub.exploitability
        )?;
        writeln!(
            out,
            "  Modified Impact: {:.4}  Modified Exploitability: {:.4}",
            sub.modified_impact, sub.modified_exploitability
        )?;
    }

    if explain {
        for (metric, code) in record.iter() {
            writeln!(
                out,
                "  {:<30} {}",
                metric.name(),
                metric.value_name(code).unwrap_or(code)
            )?;
        }
    }

    Ok(())
}

fn write_json(out: &mut impl Write, result: &ScoreResult, config: &OutputConfig) -> Result<()> {
    let mut value = serde_json::to_value(result)?;
    if !config.show_subscores {
        if let Some(map) = value.as_object_mut() {
            map.remove("sub_scores");
        }
    }

    if config.pretty_json {
        serde_json::to_writer_pretty(&mut *out, &value)?;
    } else {
        serde_json::to_writer(&mut *out, &value)?;
    }
    writeln!(out)?;
    Ok(())
}
