//! Run configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level run configuration (YAML by default, JSON by extension).
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    pub paths: PathsConfig,
    pub plots: PlotsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Directory searched for the input data file.
    pub data_dir: PathBuf,
    /// Directory receiving metrics, figures and the report.
    pub out_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlotsConfig {
    /// Bin count for the primary mass spectrum.
    pub bins: usize,
    /// Mass axis range `[low, high]` in GeV for the primary spectrum.
    pub mass_range: [f64; 2],

    /// Bin count for the residual histogram.
    #[serde(default = "default_residual_bins")]
    pub residual_bins: usize,

    /// Figure format.
    #[serde(default)]
    pub format: FigureFormat,

    /// Fixed-range zoom windows rendered in addition to the full spectrum.
    /// An explicit empty list disables them.
    #[serde(default = "default_zooms")]
    pub zooms: Vec<ZoomWindow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FigureFormat {
    #[default]
    Svg,
    Png,
}

impl FigureFormat {
    pub fn extension(self) -> &'static str {
        match self {
            FigureFormat::Svg => "svg",
            FigureFormat::Png => "png",
        }
    }
}

/// A named fixed-range window over the mass spectrum.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoomWindow {
    pub name: String,
    pub range: [f64; 2],
    pub bins: usize,
}

fn default_residual_bins() -> usize {
    200
}

/// The known dimuon resonances, low to high.
fn default_zooms() -> Vec<ZoomWindow> {
    vec![
        ZoomWindow { name: "jpsi".into(), range: [2.6, 3.6], bins: 100 },
        ZoomWindow { name: "upsilon".into(), range: [8.0, 11.5], bins: 100 },
        ZoomWindow { name: "z".into(), range: [60.0, 120.0], bins: 120 },
    ]
}

pub fn read_run_config(path: &Path) -> Result<RunConfig> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("").to_ascii_lowercase();
    let cfg: RunConfig = if ext == "json" {
        serde_json::from_slice(&bytes).context("failed to parse JSON config")?
    } else {
        serde_yaml_ng::from_slice(&bytes).context("failed to parse YAML config")?
    };
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_with_defaults() {
        let yaml = "paths:\n  data_dir: data\n  out_dir: out\nplots:\n  bins: 300\n  mass_range: [0.3, 300.0]\n";
        let cfg: RunConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(cfg.plots.bins, 300);
        assert_eq!(cfg.plots.residual_bins, 200);
        assert_eq!(cfg.plots.format, FigureFormat::Svg);
        assert_eq!(cfg.plots.zooms.len(), 3);
        assert_eq!(cfg.plots.zooms[0].name, "jpsi");
    }

    #[test]
    fn explicit_empty_zooms_disable_them() {
        let yaml = "paths:\n  data_dir: d\n  out_dir: o\nplots:\n  bins: 10\n  mass_range: [0, 10]\n  zooms: []\n";
        let cfg: RunConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert!(cfg.plots.zooms.is_empty());
    }

    #[test]
    fn png_format_parses() {
        let yaml = "paths:\n  data_dir: d\n  out_dir: o\nplots:\n  bins: 10\n  mass_range: [0, 10]\n  format: png\n";
        let cfg: RunConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(cfg.plots.format, FigureFormat::Png);
    }
}
