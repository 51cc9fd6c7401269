use std::f64::consts::PI;

use clap::ValueEnum;
use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

use crate::config::DomainMode;
use crate::data::model::{ComparisonMatrix, DisplayDomain};

// ---------------------------------------------------------------------------
// Colour scale: matrix → display domain
// ---------------------------------------------------------------------------

/// Derive the value range used for colour mapping.
///
/// Non-finite cells are ignored. Fails when no finite value exists.
pub fn display_domain(matrix: &ComparisonMatrix, mode: DomainMode) -> Result<DisplayDomain, String> {
    let mut finite = matrix.values().iter().copied().filter(|v| v.is_finite()).peekable();
    if finite.peek().is_none() {
        return Err("matrix has no finite values".to_string());
    }

    let domain = match mode {
        DomainMode::Auto => {
            let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
            DisplayDomain { min, max }
        }
        DomainMode::SymmetricAbs => DisplayDomain {
            min: 0.0,
            max: finite.map(f64::abs).fold(0.0, f64::max),
        },
    };
    Ok(domain)
}

// ---------------------------------------------------------------------------
// Colormaps: normalized value → Color32
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Colormap {
    /// gnuplot-style rainbow (purple → red).
    Rainbow,
    Viridis,
    Gray,
    Coolwarm,
}

// Anchor colours (sRGB) for the interpolated maps.
const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];
const COOLWARM: [(u8, u8, u8); 3] = [(59, 76, 192), (221, 221, 221), (180, 4, 38)];

impl Colormap {
    /// Colour for `t` in `0.0 ..= 1.0`. NaN maps to transparent.
    pub fn color_at(self, t: f64) -> Color32 {
        if t.is_nan() {
            return Color32::TRANSPARENT;
        }
        let t = t.clamp(0.0, 1.0);
        match self {
            Colormap::Rainbow => {
                let r = (2.0 * t - 0.5).abs();
                let g = (PI * t).sin();
                let b = (PI * t / 2.0).cos();
                to_color32(Srgb::new(r as f32, g as f32, b as f32))
            }
            Colormap::Gray => {
                let v = (t * 255.0).round() as u8;
                Color32::from_gray(v)
            }
            Colormap::Viridis => interpolate(&VIRIDIS, t),
            Colormap::Coolwarm => interpolate(&COOLWARM, t),
        }
    }

    /// Colour for a raw matrix value under `domain`.
    pub fn map(self, value: f64, domain: &DisplayDomain) -> Color32 {
        if !value.is_finite() {
            return Color32::TRANSPARENT;
        }
        self.color_at(domain.normalize(value))
    }

    /// `n` evenly spaced samples from low to high, for the legend strip.
    pub fn gradient(self, n: usize) -> Vec<Color32> {
        match n {
            0 => Vec::new(),
            1 => vec![self.color_at(0.0)],
            _ => (0..n)
                .map(|i| self.color_at(i as f64 / (n - 1) as f64))
                .collect(),
        }
    }
}

/// Piecewise-linear blend between anchors, done in linear RGB.
fn interpolate(anchors: &[(u8, u8, u8)], t: f64) -> Color32 {
    let segments = anchors.len() - 1;
    let pos = t * segments as f64;
    let idx = (pos.floor() as usize).min(segments - 1);
    let frac = (pos - idx as f64) as f32;

    let lin = |(r, g, b): (u8, u8, u8)| -> LinSrgb {
        Srgb::new(r, g, b).into_format::<f32>().into_linear()
    };
    let mixed = lin(anchors[idx]).mix(lin(anchors[idx + 1]), frac);
    to_color32(Srgb::from_linear(mixed))
}

fn to_color32(rgb: Srgb) -> Color32 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgb(channel(rgb.red), channel(rgb.green), channel(rgb.blue))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<f64>>) -> ComparisonMatrix {
        ComparisonMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn auto_domain_spans_values() {
        let m = matrix(vec![vec![3.0, -1.0], vec![7.5, 2.0]]);
        let d = display_domain(&m, DomainMode::Auto).unwrap();
        assert_eq!((d.min, d.max), (-1.0, 7.5));
    }

    #[test]
    fn symmetric_abs_starts_at_zero() {
        for rows in [
            vec![vec![-3.0_f64, -1.0], vec![-7.0, -2.0]],
            vec![vec![3.0, 1.0], vec![7.0, 2.0]],
            vec![vec![-9.0, 4.0]],
        ] {
            let expected = rows.iter().flatten().map(|v| v.abs()).fold(0.0, f64::max);
            let d = display_domain(&matrix(rows), DomainMode::SymmetricAbs).unwrap();
            assert_eq!(d.min, 0.0);
            assert_eq!(d.max, expected);
        }
    }

    #[test]
    fn non_finite_values_are_ignored() {
        let m = matrix(vec![vec![f64::NAN, 2.0], vec![f64::INFINITY, 5.0]]);
        let d = display_domain(&m, DomainMode::Auto).unwrap();
        assert_eq!((d.min, d.max), (2.0, 5.0));

        let all_nan = matrix(vec![vec![f64::NAN]]);
        assert!(display_domain(&all_nan, DomainMode::Auto).is_err());
    }

    #[test]
    fn rainbow_endpoints() {
        // t = 0: r = 0.5, g = 0, b = 1
        assert_eq!(Colormap::Rainbow.color_at(0.0), Color32::from_rgb(128, 0, 255));
        // t = 1: r = 1.5 → 1, g ≈ 0, b ≈ 0
        assert_eq!(Colormap::Rainbow.color_at(1.0), Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn interpolated_maps_hit_their_anchors() {
        assert_eq!(Colormap::Viridis.color_at(0.0), Color32::from_rgb(68, 1, 84));
        assert_eq!(Colormap::Viridis.color_at(1.0), Color32::from_rgb(253, 231, 37));
        assert_eq!(Colormap::Coolwarm.color_at(0.5), Color32::from_rgb(221, 221, 221));
    }

    #[test]
    fn nan_is_transparent() {
        let d = DisplayDomain { min: 0.0, max: 1.0 };
        assert_eq!(Colormap::Gray.map(f64::NAN, &d), Color32::TRANSPARENT);
        assert_eq!(Colormap::Gray.map(1.0, &d), Color32::from_gray(255));
    }

    #[test]
    fn gradient_runs_low_to_high() {
        let g = Colormap::Gray.gradient(3);
        assert_eq!(g, vec![Color32::from_gray(0), Color32::from_gray(128), Color32::from_gray(255)]);
    }
}
