//! Histogram figure rendering.
//!
//! The native output is SVG built on a minimal immediate-mode canvas;
//! rasterization to PNG is available behind the `png` feature.

pub mod axes;
pub mod canvas;
pub mod color;
pub mod hist;
pub mod output;
pub mod plot;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "png")]
    #[error("PNG encoding error: {0}")]
    Png(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
