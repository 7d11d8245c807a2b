//! `dmspec run` orchestration: locate → sniff → load → coerce → reconstruct
//! → figures + metrics.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};

use dm_ingest::{coerce, locate, sniff, table};
use dm_physics::reconstruct;
use dm_render::hist::Histogram;
use dm_render::output::svg::write_svg;
use dm_render::plot::HistogramFigure;

use crate::config::{FigureFormat, RunConfig};

/// Flat metrics record, persisted verbatim as `metrics.json`.
#[derive(Debug, Clone, Serialize)]
pub struct RunMetrics {
    pub events: usize,
    pub residual_mean: f64,
    pub residual_rms: f64,
    pub csv_file: String,
    pub min_mass_calc: f64,
    pub max_mass_calc: f64,
    pub input_sha256: String,
}

/// What a completed run hands to the report writer.
#[derive(Debug, Clone)]
pub struct AnalysisSummary {
    pub metrics: RunMetrics,
    /// Figure file names, relative to `<out_dir>/figures/`.
    pub figures: Vec<String>,
}

/// Run the whole pipeline for one dataset.
///
/// Every fatal condition aborts the run before the artifact set is
/// completed; figures and metrics are only written from a fully validated
/// table.
pub fn run_analysis(cfg: &RunConfig) -> Result<AnalysisSummary> {
    let fig_dir = cfg.paths.out_dir.join("figures");
    std::fs::create_dir_all(&fig_dir)
        .with_context(|| format!("failed to create {}", fig_dir.display()))?;

    let data_file = locate::find_data_file(&cfg.paths.data_dir)?;
    tracing::info!(path = %data_file.display(), "loading data");

    let sample = sniff::read_sample(&data_file)?;
    let format = sniff::sniff(&sample);

    let table = table::load_table(&data_file, &format)?;
    tracing::info!(rows = table.n_rows(), columns = table.n_cols(), "table loaded");

    let (numeric, coercion) = coerce::coerce(&table)?;
    let result = reconstruct(&numeric)?;
    tracing::info!(
        events = result.stats.events,
        dropped = coercion.rows_dropped(),
        "invariant mass reconstructed"
    );

    let figures = write_figures(cfg, &fig_dir, &result.mass, &result.residual)?;

    let metrics = RunMetrics {
        events: result.stats.events,
        residual_mean: result.stats.residual_mean,
        residual_rms: result.stats.residual_rms,
        csv_file: data_file.display().to_string(),
        min_mass_calc: result.stats.min_mass_calc,
        max_mass_calc: result.stats.max_mass_calc,
        input_sha256: sha256_file(&data_file)?,
    };

    let metrics_path = cfg.paths.out_dir.join("metrics.json");
    std::fs::write(&metrics_path, serde_json::to_string_pretty(&metrics)?)
        .with_context(|| format!("failed to write {}", metrics_path.display()))?;
    tracing::info!(path = %metrics_path.display(), "metrics written");

    Ok(AnalysisSummary { metrics, figures })
}

fn write_figures(
    cfg: &RunConfig,
    fig_dir: &Path,
    mass: &[f64],
    residual: &[f64],
) -> Result<Vec<String>> {
    let plots = &cfg.plots;
    let [lo, hi] = plots.mass_range;
    let mut figures = Vec::new();

    let mut emit = |name: &str, figure: &HistogramFigure, hist: &Histogram| -> Result<()> {
        let file = format!("{name}.{}", plots.format.extension());
        let path = fig_dir.join(&file);
        let svg = figure.render(hist);
        match plots.format {
            FigureFormat::Svg => write_svg(&path, &svg)?,
            FigureFormat::Png => {
                let bytes = dm_render::output::png::svg_to_png(&svg, 144)?;
                std::fs::write(&path, bytes)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
        }
        tracing::debug!(path = %path.display(), "figure written");
        figures.push(file);
        Ok(())
    };

    emit(
        "mass_spectrum",
        &HistogramFigure {
            title: "Dimuon Invariant Mass Spectrum".into(),
            x_label: "Invariant Mass [GeV]".into(),
            y_label: "Events".into(),
            log_y: false,
        },
        &Histogram::new(mass, lo, hi, plots.bins),
    )?;

    emit(
        "mass_spectrum_log",
        &HistogramFigure {
            title: "Dimuon Invariant Mass Spectrum (log scale)".into(),
            x_label: "Invariant Mass [GeV]".into(),
            y_label: "Events (log)".into(),
            log_y: true,
        },
        &Histogram::new(mass, lo, hi, plots.bins),
    )?;

    let (res_lo, res_hi) = value_range(residual);
    emit(
        "mass_residuals",
        &HistogramFigure {
            title: "Invariant Mass Residuals".into(),
            x_label: "M_calc - M_given [GeV]".into(),
            y_label: "Events".into(),
            log_y: false,
        },
        &Histogram::new(residual, res_lo, res_hi, plots.residual_bins),
    )?;

    for zoom in &plots.zooms {
        let [zlo, zhi] = zoom.range;
        emit(
            &format!("mass_zoom_{}", zoom.name),
            &HistogramFigure {
                title: format!("Dimuon Invariant Mass ({} window)", zoom.name),
                x_label: "Invariant Mass [GeV]".into(),
                y_label: "Events".into(),
                log_y: false,
            },
            &Histogram::new(mass, zlo, zhi, zoom.bins),
        )?;
    }

    Ok(figures)
}

/// Data-driven range for the residual histogram, widened when degenerate so
/// the binning stays well defined.
fn value_range(values: &[f64]) -> (f64, f64) {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if hi > lo {
        (lo, hi)
    } else {
        let center = if lo.is_finite() { lo } else { 0.0 };
        (center - 1.0, center + 1.0)
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    let out = h.finalize();
    let mut s = String::with_capacity(64);
    for b in out {
        s.push_str(&format!("{b:02x}"));
    }
    s
}

fn sha256_file(path: &Path) -> Result<String> {
    Ok(sha256_hex(&std::fs::read(path)?))
}
