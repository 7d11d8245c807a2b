use crate::RenderError;

/// Rasterize an SVG string to PNG bytes at the given DPI.
///
/// Text rendering relies on the system font database; figures use generic
/// `sans-serif` so any available family resolves.
pub fn svg_to_png(svg: &str, dpi: u32) -> crate::Result<Vec<u8>> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|e| RenderError::Png(e.to_string()))?;

    let scale = dpi as f32 / 72.0;
    let size = tree.size();
    let w = (size.width() * scale) as u32;
    let h = (size.height() * scale) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(w, h)
        .ok_or_else(|| RenderError::Png("failed to create pixmap".into()))?;
    pixmap.fill(tiny_skia::Color::WHITE);

    resvg::render(&tree, tiny_skia::Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    pixmap.encode_png().map_err(|e| RenderError::Png(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hist::Histogram;
    use crate::plot::HistogramFigure;

    #[test]
    fn rasterizes_a_figure() {
        let hist = Histogram::new(&[1.0, 2.0, 3.0], 0.0, 4.0, 4);
        let figure = HistogramFigure {
            title: "t".into(),
            x_label: "x".into(),
            y_label: "y".into(),
            log_y: false,
        };
        let png = svg_to_png(&figure.render(&hist), 72).unwrap();
        // PNG signature.
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']);
    }
}
