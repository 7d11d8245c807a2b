//! Markdown report assembly.

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};

use crate::config::RunConfig;
use crate::run::AnalysisSummary;

/// Write `results.md` into the out dir, referencing the metrics and figure
/// artifacts by relative path.
pub fn write_report(cfg: &RunConfig, summary: &AnalysisSummary) -> Result<()> {
    let out_dir = &cfg.paths.out_dir;
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let metrics = &summary.metrics;
    let ts = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    let mut lines: Vec<String> = Vec::new();
    lines.push("# Dimuon Invariant Mass".to_string());
    lines.push(String::new());
    lines.push(format!("_Generated {ts}_"));
    lines.push(String::new());
    lines.push("## Summary".to_string());
    lines.push(String::new());
    lines.push(format!("- Events analyzed: **{}**", metrics.events));
    lines.push(format!("- Residual mean: **{:.3e} GeV**", metrics.residual_mean));
    lines.push(format!("- Residual RMS: **{:.3e} GeV**", metrics.residual_rms));
    lines.push(format!(
        "- Computed mass range: **{:.3} to {:.3} GeV**",
        metrics.min_mass_calc, metrics.max_mass_calc
    ));
    lines.push(format!("- Input file: `{}` (see `metrics.json`)", metrics.csv_file));
    lines.push(String::new());
    lines.push("## Figures".to_string());
    lines.push(String::new());
    for fig in &summary.figures {
        lines.push(format!("![{fig}](figures/{fig})"));
    }
    lines.push(String::new());
    lines.push("## Interpretation".to_string());
    lines.push(String::new());
    lines.push(
        "Resonant structure appears only after aggregating many events. \
         Invariant mass is not an event-level property but a statistical \
         construct derived from Lorentz-invariant constraints."
            .to_string(),
    );
    lines.push(String::new());

    let report_path = out_dir.join("results.md");
    std::fs::write(&report_path, lines.join("\n"))
        .with_context(|| format!("failed to write {}", report_path.display()))?;
    tracing::info!(path = %report_path.display(), "report written");

    Ok(())
}
