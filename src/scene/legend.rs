use eframe::egui::Color32;

use crate::color::Colormap;
use crate::data::model::DisplayDomain;

const GRADIENT_STEPS: usize = 256;
const TARGET_TICKS: usize = 6;

/// Colour bar keyed to a display domain.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorLegend {
    pub domain: DisplayDomain,
    /// Low to high.
    pub gradient: Vec<Color32>,
    /// Tick values, all inside the domain, ascending.
    pub ticks: Vec<f64>,
}

impl ColorLegend {
    pub fn new(colormap: Colormap, domain: DisplayDomain) -> Self {
        ColorLegend {
            domain,
            gradient: colormap.gradient(GRADIENT_STEPS),
            ticks: nice_ticks(domain.min, domain.max, TARGET_TICKS),
        }
    }

    /// Fraction of the bar height (0 = bottom) where `value` sits.
    pub fn position(&self, value: f64) -> f64 {
        self.domain.normalize(value)
    }
}

/// Round tick values (1, 2, 5 × 10^k steps) inside `[min, max]`.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if !(min.is_finite() && max.is_finite()) || target < 2 {
        return Vec::new();
    }
    let span = max - min;
    if span <= 0.0 {
        return vec![min];
    }

    let raw_step = span / (target - 1) as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw_step)
        .unwrap_or(10.0 * magnitude);

    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last)
        .map(|k| k as f64 * step)
        // -0.0 prints badly
        .map(|v| if v == 0.0 { 0.0 } else { v })
        .collect()
}

/// Short label for a tick, precision chosen from the tick spacing.
pub fn format_tick(value: f64, ticks: &[f64]) -> String {
    let step = match ticks {
        [a, b, ..] => (b - a).abs(),
        _ => value.abs(),
    };
    if step == 0.0 || step >= 1.0 {
        return format!("{value:.0}");
    }
    let decimals = (-step.log10().floor()) as usize;
    format!("{value:.decimals$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_fall_on_round_values() {
        assert_eq!(nice_ticks(0.0, 10.0, 6), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(nice_ticks(3.0, 8.0, 6), vec![3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn ticks_stay_inside_domain() {
        let ticks = nice_ticks(-0.37, 1.42, 6);
        assert!(!ticks.is_empty());
        assert!(ticks.iter().all(|t| (-0.37..=1.42).contains(t)));
        assert!(ticks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn degenerate_domain_has_one_tick() {
        assert_eq!(nice_ticks(2.0, 2.0, 6), vec![2.0]);
    }

    #[test]
    fn tick_labels_follow_spacing() {
        assert_eq!(format_tick(4.0, &[0.0, 2.0]), "4");
        assert_eq!(format_tick(0.5, &[0.0, 0.5]), "0.5");
        assert_eq!(format_tick(0.25, &[0.0, 0.05]), "0.25");
    }

    #[test]
    fn legend_spans_domain() {
        let legend = ColorLegend::new(Colormap::Gray, DisplayDomain { min: 0.0, max: 4.0 });
        assert_eq!(legend.gradient.first(), Some(&Color32::from_gray(0)));
        assert_eq!(legend.gradient.last(), Some(&Color32::from_gray(255)));
        assert_eq!(legend.position(1.0), 0.25);
    }
}
