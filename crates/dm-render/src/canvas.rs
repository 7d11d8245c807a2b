//! Minimal immediate-mode SVG canvas.
//!
//! Elements are written straight into the output buffer in draw order;
//! there is no deferred element tree. Coordinates are in points.

use std::fmt::Write as _;

use crate::color::Color;

/// Horizontal text anchoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

pub struct Canvas {
    width: f64,
    height: f64,
    body: String,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        let mut body = String::with_capacity(16 * 1024);
        let _ = writeln!(
            body,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        let _ = writeln!(body, r#"<rect width="{width}" height="{height}" fill="white" />"#);
        Canvas { width, height, body }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color, width: f64) {
        let _ = writeln!(
            self.body,
            r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="{color}" stroke-width="{width:.2}" />"#
        );
    }

    pub fn rect_outline(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color, width: f64) {
        let _ = writeln!(
            self.body,
            r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="none" stroke="{color}" stroke-width="{width:.2}" />"#
        );
    }

    pub fn polyline(&mut self, points: &[(f64, f64)], color: Color, width: f64) {
        if points.len() < 2 {
            return;
        }
        let mut attr = String::with_capacity(points.len() * 12);
        for (i, (x, y)) in points.iter().enumerate() {
            if i > 0 {
                attr.push(' ');
            }
            let _ = write!(attr, "{x:.2},{y:.2}");
        }
        let _ = writeln!(
            self.body,
            r#"<polyline points="{attr}" fill="none" stroke="{color}" stroke-width="{width:.2}" />"#
        );
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, size: f64, anchor: Anchor, color: Color) {
        self.write_text(x, y, content, size, anchor, color, None);
    }

    /// Text rotated around its own anchor point (degrees).
    pub fn text_rotated(
        &mut self,
        x: f64,
        y: f64,
        content: &str,
        size: f64,
        anchor: Anchor,
        color: Color,
        angle: f64,
    ) {
        self.write_text(x, y, content, size, anchor, color, Some(angle));
    }

    #[allow(clippy::too_many_arguments)]
    fn write_text(
        &mut self,
        x: f64,
        y: f64,
        content: &str,
        size: f64,
        anchor: Anchor,
        color: Color,
        rotate: Option<f64>,
    ) {
        let _ = write!(
            self.body,
            r#"<text x="{x:.2}" y="{y:.2}" font-family="sans-serif" font-size="{size:.1}" fill="{color}" text-anchor="{}""#,
            anchor.as_str()
        );
        if let Some(angle) = rotate {
            let _ = write!(self.body, r#" transform="rotate({angle:.1},{x:.2},{y:.2})""#);
        }
        self.body.push('>');
        for ch in content.chars() {
            match ch {
                '<' => self.body.push_str("&lt;"),
                '>' => self.body.push_str("&gt;"),
                '&' => self.body.push_str("&amp;"),
                '"' => self.body.push_str("&quot;"),
                _ => self.body.push(ch),
            }
        }
        self.body.push_str("</text>\n");
    }

    pub fn finish(mut self) -> String {
        self.body.push_str("</svg>\n");
        self.body
    }
}

/// Rough width of a sans-serif string, for margin layout. No font metrics
/// are embedded; 0.6 em per character is close enough for tick labels.
pub fn estimate_text_width(content: &str, size: f64) -> f64 {
    content.chars().count() as f64 * size * 0.6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_canvas_is_well_formed() {
        let svg = Canvas::new(100.0, 50.0).finish();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="100""#));
        assert!(svg.contains(r#"height="50""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn text_is_escaped() {
        let mut c = Canvas::new(10.0, 10.0);
        c.text(1.0, 1.0, "a<b & c", 8.0, Anchor::Start, Color::BLACK);
        let svg = c.finish();
        assert!(svg.contains("a&lt;b &amp; c"));
    }

    #[test]
    fn polyline_needs_two_points() {
        let mut c = Canvas::new(10.0, 10.0);
        c.polyline(&[(1.0, 1.0)], Color::BLACK, 1.0);
        let svg = c.finish();
        assert!(!svg.contains("polyline"));
    }
}
