use std::fs;
use std::path::Path;

use log::info;

use crate::constants::{SEPARATOR_WIDTH, TIMESTAMP_FORMAT};
use crate::error::{Error, Result};
use crate::sweep::SweepOutcome;

/// Writes a plain-text report of the active hosts found by a sweep.
///
/// Nothing is written when the sweep found no hosts. Returns whether a file
/// was produced.
///
/// # Errors
/// Fails if the file cannot be written; the outcome passed in is left
/// untouched either way.
pub fn save(path: &Path, outcome: &SweepOutcome) -> Result<bool> {
    if outcome.active.is_empty() {
        return Ok(false);
    }

    let mut report = format!(
        "Ping Sweep Results - {}\n",
        outcome.finished_at.format(TIMESTAMP_FORMAT)
    );
    report.push_str(&format!("Network: {}\n", outcome.network));
    report.push_str(&"-".repeat(SEPARATOR_WIDTH));
    report.push('\n');
    for host in &outcome.active {
        report.push_str(&host.to_string());
        report.push('\n');
    }

    fs::write(path, report).map_err(|err| {
        Error::Opaque(
            format!(
                "failed to write report to {}, reason: {}",
                path.display(),
                err
            )
            .into(),
        )
    })?;
    info!("results saved to {}", path.display());
    Ok(true)
}
