//! Step-outline histogram figures.

use crate::axes::Axis;
use crate::canvas::{Anchor, Canvas, estimate_text_width};
use crate::color::Color;
use crate::hist::Histogram;

// 8" x 5" at 72 dpi.
const FIG_WIDTH: f64 = 576.0;
const FIG_HEIGHT: f64 = 360.0;

const TITLE_SIZE: f64 = 13.0;
const LABEL_SIZE: f64 = 11.0;
const TICK_SIZE: f64 = 9.0;
const TICK_LEN: f64 = 4.0;

/// A single histogram figure: title, axis labels, optional log-scale y.
#[derive(Debug, Clone)]
pub struct HistogramFigure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub log_y: bool,
}

impl HistogramFigure {
    /// Render the figure to an SVG string.
    pub fn render(&self, hist: &Histogram) -> String {
        let mut canvas = Canvas::new(FIG_WIDTH, FIG_HEIGHT);

        let x_axis = Axis::linear(hist.lo, hist.hi, 7);
        let y_axis = self.y_axis(hist);

        // Margins: left sized to the widest y tick label.
        let y_label_width = y_axis
            .ticks
            .iter()
            .map(|t| estimate_text_width(&t.label, TICK_SIZE))
            .fold(0.0_f64, f64::max);
        let left = y_label_width + LABEL_SIZE + 24.0;
        let right = 14.0;
        let top = TITLE_SIZE + 18.0;
        let bottom = TICK_SIZE + LABEL_SIZE + 22.0;

        let px_left = left;
        let px_right = FIG_WIDTH - right;
        let px_top = top;
        let px_bottom = FIG_HEIGHT - bottom;

        self.draw_frame(&mut canvas, px_left, px_top, px_right, px_bottom, &x_axis, &y_axis);
        self.draw_steps(&mut canvas, px_left, px_top, px_right, px_bottom, &x_axis, &y_axis, hist);

        // Title and axis labels.
        canvas.text(
            (px_left + px_right) / 2.0,
            px_top - 8.0,
            &self.title,
            TITLE_SIZE,
            Anchor::Middle,
            Color::BLACK,
        );
        canvas.text(
            (px_left + px_right) / 2.0,
            FIG_HEIGHT - 6.0,
            &self.x_label,
            LABEL_SIZE,
            Anchor::Middle,
            Color::BLACK,
        );
        canvas.text_rotated(
            14.0,
            (px_top + px_bottom) / 2.0,
            &self.y_label,
            LABEL_SIZE,
            Anchor::Middle,
            Color::BLACK,
            -90.0,
        );

        canvas.finish()
    }

    fn y_axis(&self, hist: &Histogram) -> Axis {
        let max = hist.max_count() as f64;
        if self.log_y {
            Axis::log10(0.5, (max * 2.0).max(5.0))
        } else {
            Axis::linear(0.0, (max * 1.15).max(1.0), 5)
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_frame(
        &self,
        canvas: &mut Canvas,
        px_left: f64,
        px_top: f64,
        px_right: f64,
        px_bottom: f64,
        x_axis: &Axis,
        y_axis: &Axis,
    ) {
        canvas.rect_outline(
            px_left,
            px_top,
            px_right - px_left,
            px_bottom - px_top,
            Color::FRAME,
            1.0,
        );

        for tick in &x_axis.ticks {
            let px = x_axis.data_to_pixel(tick.value, px_left, px_right);
            canvas.line(px, px_bottom, px, px_bottom + TICK_LEN, Color::FRAME, 0.8);
            canvas.text(
                px,
                px_bottom + TICK_LEN + TICK_SIZE,
                &tick.label,
                TICK_SIZE,
                Anchor::Middle,
                Color::BLACK,
            );
        }

        for tick in &y_axis.ticks {
            let py = y_axis.data_to_pixel(tick.value, px_bottom, px_top);
            canvas.line(px_left - TICK_LEN, py, px_left, py, Color::FRAME, 0.8);
            canvas.text(
                px_left - TICK_LEN - 3.0,
                py + TICK_SIZE * 0.35,
                &tick.label,
                TICK_SIZE,
                Anchor::End,
                Color::BLACK,
            );
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_steps(
        &self,
        canvas: &mut Canvas,
        px_left: f64,
        px_top: f64,
        px_right: f64,
        px_bottom: f64,
        x_axis: &Axis,
        y_axis: &Axis,
        hist: &Histogram,
    ) {
        if hist.bins() == 0 {
            return;
        }

        // Staircase outline: rise at each left edge, fall back to the
        // baseline after the last bin. The log baseline is the axis floor.
        let base = if self.log_y { y_axis.min } else { 0.0 };
        let count_of = |i: usize| {
            let c = hist.counts[i] as f64;
            if self.log_y && c <= 0.0 {
                base
            } else {
                c
            }
        };

        let mut points = Vec::with_capacity(2 * hist.bins() + 2);
        points.push((
            x_axis.data_to_pixel(hist.edge(0), px_left, px_right),
            y_axis.data_to_pixel(base, px_bottom, px_top),
        ));
        for i in 0..hist.bins() {
            let y = y_axis.data_to_pixel(count_of(i), px_bottom, px_top);
            points.push((x_axis.data_to_pixel(hist.edge(i), px_left, px_right), y));
            points.push((x_axis.data_to_pixel(hist.edge(i + 1), px_left, px_right), y));
        }
        points.push((
            x_axis.data_to_pixel(hist.edge(hist.bins()), px_left, px_right),
            y_axis.data_to_pixel(base, px_bottom, px_top),
        ));

        canvas.polyline(&points, Color::SPECTRUM, 1.2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn figure(log_y: bool) -> HistogramFigure {
        HistogramFigure {
            title: "Spectrum".into(),
            x_label: "Mass [GeV]".into(),
            y_label: "Events".into(),
            log_y,
        }
    }

    #[test]
    fn linear_figure_contains_marks_and_labels() {
        let hist = Histogram::new(&[1.0, 2.0, 2.5, 3.0], 0.0, 4.0, 4);
        let svg = figure(false).render(&hist);
        assert!(svg.contains("polyline"));
        assert!(svg.contains("Spectrum"));
        assert!(svg.contains("Mass [GeV]"));
        assert!(svg.contains("Events"));
    }

    #[test]
    fn empty_histogram_still_renders() {
        let hist = Histogram::new(&[], 0.0, 4.0, 4);
        let svg = figure(false).render(&hist);
        assert!(svg.contains("</svg>"));
        assert!(svg.contains("polyline"));
    }

    #[test]
    fn log_figure_renders_zero_bins_at_floor() {
        let hist = Histogram::new(&[0.5, 0.6, 0.7], 0.0, 4.0, 4);
        let svg = figure(true).render(&hist);
        assert!(svg.contains("polyline"));
    }
}
