//! Console rendering of run reports.

use std::io::{self, Write};

use torfind_core::{MaterializeAction, MaterializePhase, RunReport};

/// Writes the report as JSON.
pub fn write_json<W: Write>(out: &mut W, report: &RunReport) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}

/// Writes the human-readable report.
pub fn write_text<W: Write>(out: &mut W, report: &RunReport) -> io::Result<()> {
    let count = report.matches.len();
    writeln!(
        out,
        "Found {} matching torrent{} in {}",
        count,
        if count == 1 { "" } else { "s" },
        report.root.display()
    )?;
    for record in &report.matches {
        writeln!(out, "  {}", record.decoded_name)?;
        writeln!(out, "    {}", record.relative_path)?;
    }

    for failure in &report.failures {
        writeln!(
            out,
            "Could not decode torrent file: {} ({})",
            failure.relative_path, failure.reason
        )?;
    }

    match &report.materialize {
        MaterializePhase::NotRequested => {}
        MaterializePhase::Completed(materialized) => {
            let destination = materialized
                .destination
                .as_deref()
                .map(|d| d.display().to_string())
                .unwrap_or_default();
            writeln!(out)?;
            writeln!(out, "Materialized into {}", destination)?;
            for outcome in &materialized.outcomes {
                let line = match &outcome.action {
                    MaterializeAction::Copied { file_name, .. } => format!("-> {}", file_name),
                    MaterializeAction::SkippedDuplicate { file_name } => {
                        format!("skipped, identical to {}", file_name)
                    }
                    MaterializeAction::SkippedSameFile => "skipped, already in place".to_string(),
                    MaterializeAction::Failed { reason } => format!("failed: {}", reason),
                };
                writeln!(out, "  {} {}", outcome.relative_path, line)?;
            }
            writeln!(
                out,
                "{} copied, {} skipped, {} failed",
                materialized.copied_count(),
                materialized.skipped_count(),
                materialized.failed_count()
            )?;
        }
        MaterializePhase::Aborted {
            destination,
            reason,
        } => {
            writeln!(out)?;
            writeln!(
                out,
                "Materialize aborted: {}: {}",
                destination.display(),
                reason
            )?;
        }
    }

    Ok(())
}
