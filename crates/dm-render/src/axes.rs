//! Axis scaling and tick generation.
//!
//! Unlike free-scaling plots, histogram figures here keep the configured
//! data range exactly; ticks are placed at nice values inside the range
//! rather than expanding the bounds to the next nice number.

/// Axis with tick positions and a data → pixel mapping.
#[derive(Debug, Clone)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub log: bool,
    pub ticks: Vec<Tick>,
}

#[derive(Debug, Clone)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

impl Axis {
    /// Linear axis over exactly `[min, max]`, with ticks at nice multiples
    /// inside the range.
    pub fn linear(min: f64, max: f64, target_ticks: usize) -> Self {
        let mut ticks = Vec::new();
        if max > min {
            let step = nice_step((max - min) / target_ticks.max(2) as f64);
            let mut v = (min / step).ceil() * step;
            while v <= max + step * 1e-9 {
                // Avoid "-0" from rounding just below zero.
                let value = if v.abs() < step * 1e-9 { 0.0 } else { v };
                ticks.push(Tick { value, label: format_tick(value, step) });
                v += step;
            }
        }
        Self { min, max, log: false, ticks }
    }

    /// Log10 axis with decade ticks. `min` is clamped to a small positive
    /// floor since zero has no logarithm.
    pub fn log10(min: f64, max: f64) -> Self {
        let min = min.max(1e-12);
        let max = max.max(min * 10.0);
        let lo_exp = min.log10().ceil() as i32;
        let hi_exp = max.log10().floor() as i32;

        let mut ticks = Vec::new();
        for exp in lo_exp..=hi_exp {
            let value = 10f64.powi(exp);
            ticks.push(Tick { value, label: format_pow10(exp) });
        }
        Self { min, max, log: true, ticks }
    }

    /// Map a data value to a pixel coordinate on `[px_min, px_max]`.
    pub fn data_to_pixel(&self, value: f64, px_min: f64, px_max: f64) -> f64 {
        let frac = if self.log {
            let v = value.max(self.min).ln();
            (v - self.min.ln()) / (self.max.ln() - self.min.ln())
        } else {
            (value - self.min) / (self.max - self.min)
        };
        px_min + frac * (px_max - px_min)
    }
}

/// Largest "nice" step (1/2/5 times a power of ten) not much smaller than
/// the rough spacing.
fn nice_step(rough: f64) -> f64 {
    let exp = rough.abs().log10().floor();
    let base = 10f64.powf(exp);
    let frac = rough / base;
    let nice = if frac <= 1.5 {
        1.0
    } else if frac <= 3.5 {
        2.0
    } else if frac <= 7.5 {
        5.0
    } else {
        10.0
    };
    nice * base
}

fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 { 0 } else { (-step.log10().floor()) as usize };
    if decimals == 0 {
        format!("{}", value.round() as i64)
    } else {
        format!("{value:.decimals$}")
    }
}

fn format_pow10(exp: i32) -> String {
    if (0..=4).contains(&exp) {
        format!("{}", 10f64.powi(exp) as i64)
    } else {
        format!("1e{exp}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_ticks_stay_inside_range() {
        let ax = Axis::linear(0.3, 300.0, 6);
        assert!(!ax.ticks.is_empty());
        for t in &ax.ticks {
            assert!(t.value >= 0.3 - 1e-9 && t.value <= 300.0 + 1e-9);
        }
        assert_eq!(ax.min, 0.3);
        assert_eq!(ax.max, 300.0);
    }

    #[test]
    fn linear_mapping_is_affine() {
        let ax = Axis::linear(0.0, 100.0, 5);
        assert_eq!(ax.data_to_pixel(0.0, 0.0, 500.0), 0.0);
        assert_eq!(ax.data_to_pixel(100.0, 0.0, 500.0), 500.0);
        assert!((ax.data_to_pixel(50.0, 0.0, 500.0) - 250.0).abs() < 1e-9);
    }

    #[test]
    fn log_ticks_are_decades() {
        let ax = Axis::log10(0.5, 2000.0);
        let values: Vec<f64> = ax.ticks.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![1.0, 10.0, 100.0, 1000.0]);
    }

    #[test]
    fn log_mapping_clamps_below_min() {
        let ax = Axis::log10(0.5, 100.0);
        let floor = ax.data_to_pixel(0.0, 0.0, 100.0);
        assert_eq!(floor, 0.0);
    }

    #[test]
    fn nice_step_values() {
        assert!((nice_step(3.2) - 2.0).abs() < 1e-9);
        assert!((nice_step(0.7) - 0.5).abs() < 1e-9);
        assert!((nice_step(15.0) - 10.0).abs() < 1e-9);
        assert!((nice_step(4.5) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn tick_labels_match_step_precision() {
        assert_eq!(format_tick(2.5, 0.5), "2.5");
        assert_eq!(format_tick(10.0, 5.0), "10");
    }
}
