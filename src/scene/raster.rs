use eframe::egui::{Color32, ColorImage};

use crate::color::Colormap;
use crate::config::Interpolation;
use crate::data::model::{ComparisonMatrix, DisplayDomain};

/// Longer side the gaussian upsampling aims for, in texels.
const TARGET_SIDE: usize = 256;
const MAX_UPSAMPLE: usize = 8;

// ---------------------------------------------------------------------------
// Raster – coloured matrix, ready for upload
// ---------------------------------------------------------------------------

/// RGBA pixels in image order: row 0 is the top of the picture.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Color32>,
}

impl Raster {
    /// Colour the matrix with the plot's lower-left origin.
    ///
    /// Matrix row `i` runs along x and column `j` along y, so pixel column
    /// `i` of the bottom image row holds cell `(i, 0)`.
    pub fn from_matrix(matrix: &ComparisonMatrix, colormap: Colormap, domain: &DisplayDomain) -> Self {
        let (rows, cols) = matrix.shape();
        let width = rows;
        let height = cols;
        let mut pixels = vec![Color32::TRANSPARENT; width * height];
        for i in 0..rows {
            for j in 0..cols {
                let value = matrix.get(i, j).unwrap_or(f64::NAN);
                let image_row = height - 1 - j;
                pixels[image_row * width + i] = colormap.map(value, domain);
            }
        }
        Raster {
            width,
            height,
            pixels,
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Color32 {
        self.pixels[y * self.width + x]
    }

    /// Apply the smoothing the interpolation mode asks for.
    ///
    /// Only gaussian alters the pixels; the other two are texture filters.
    pub fn smoothed(self, interpolation: Interpolation) -> Self {
        match interpolation {
            Interpolation::Nearest | Interpolation::Bilinear => self,
            Interpolation::Gaussian => {
                let factor = upsample_factor(self.width.max(self.height));
                let up = self.upsample(factor);
                up.gaussian_blur(factor as f32 / 2.0)
            }
        }
    }

    fn upsample(&self, factor: usize) -> Self {
        if factor <= 1 {
            return self.clone();
        }
        let width = self.width * factor;
        let height = self.height * factor;
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(self.get(x / factor, y / factor));
            }
        }
        Raster {
            width,
            height,
            pixels,
        }
    }

    /// Separable blur on premultiplied channels, edges clamped.
    fn gaussian_blur(self, sigma: f32) -> Self {
        let kernel = gaussian_kernel(sigma);
        if kernel.len() <= 1 {
            return self;
        }
        let radius = (kernel.len() / 2) as isize;
        let src: Vec<[f32; 4]> = self
            .pixels
            .iter()
            .map(|c| c.to_array().map(f32::from))
            .collect();

        let (w, h) = (self.width as isize, self.height as isize);
        let pass = |input: &[[f32; 4]], horizontal: bool| -> Vec<[f32; 4]> {
            let mut out = vec![[0.0f32; 4]; input.len()];
            for y in 0..h {
                for x in 0..w {
                    let mut acc = [0.0f32; 4];
                    for (k, weight) in kernel.iter().enumerate() {
                        let d = k as isize - radius;
                        let (sx, sy) = if horizontal {
                            ((x + d).clamp(0, w - 1), y)
                        } else {
                            (x, (y + d).clamp(0, h - 1))
                        };
                        let px = input[(sy * w + sx) as usize];
                        for c in 0..4 {
                            acc[c] += px[c] * weight;
                        }
                    }
                    out[(y * w + x) as usize] = acc;
                }
            }
            out
        };

        let blurred = pass(&pass(&src, true), false);
        let to_u8 = |v: f32| v.round().clamp(0.0, 255.0) as u8;
        let pixels = blurred
            .into_iter()
            .map(|[r, g, b, a]| Color32::from_rgba_premultiplied(to_u8(r), to_u8(g), to_u8(b), to_u8(a)))
            .collect();
        Raster { pixels, ..self }
    }

    pub fn to_color_image(&self) -> ColorImage {
        let bytes: Vec<u8> = self
            .pixels
            .iter()
            .flat_map(|c| c.to_srgba_unmultiplied())
            .collect();
        ColorImage::from_rgba_unmultiplied([self.width, self.height], &bytes)
    }
}

fn upsample_factor(longest_side: usize) -> usize {
    if longest_side == 0 {
        return 1;
    }
    TARGET_SIDE.div_ceil(longest_side).clamp(1, MAX_UPSAMPLE)
}

/// Normalised 1-D kernel covering ±3σ.
fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    if sigma <= 0.0 {
        return vec![1.0];
    }
    let radius = (3.0 * sigma).ceil() as i32;
    let weights: Vec<f32> = (-radius..=radius)
        .map(|i| (-((i * i) as f32) / (2.0 * sigma * sigma)).exp())
        .collect();
    let sum: f32 = weights.iter().sum();
    weights.into_iter().map(|w| w / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_raster(rows: Vec<Vec<f64>>) -> Raster {
        let m = ComparisonMatrix::from_rows(rows).unwrap();
        let domain = DisplayDomain { min: 0.0, max: 255.0 };
        Raster::from_matrix(&m, Colormap::Gray, &domain)
    }

    #[test]
    fn origin_is_lower_left() {
        // 3x2 matrix: x runs over rows, y over columns.
        let r = gray_raster(vec![vec![10.0, 20.0], vec![30.0, 40.0], vec![50.0, 60.0]]);
        assert_eq!((r.width, r.height), (3, 2));
        // Bottom image row (y = 1) is matrix column 0.
        assert_eq!(r.get(0, 1), Color32::from_gray(10));
        assert_eq!(r.get(2, 1), Color32::from_gray(50));
        // Top image row is matrix column 1.
        assert_eq!(r.get(0, 0), Color32::from_gray(20));
        assert_eq!(r.get(2, 0), Color32::from_gray(60));
    }

    #[test]
    fn nearest_and_bilinear_keep_native_size() {
        let r = gray_raster(vec![vec![0.0, 255.0]]);
        assert_eq!(r.clone().smoothed(Interpolation::Nearest), r);
        assert_eq!(r.clone().smoothed(Interpolation::Bilinear), r);
    }

    #[test]
    fn gaussian_upsamples_and_keeps_flat_regions() {
        let r = gray_raster(vec![vec![100.0; 4]; 4]);
        let s = r.smoothed(Interpolation::Gaussian);
        assert_eq!((s.width, s.height), (32, 32));
        assert!(s.pixels.iter().all(|&p| p == Color32::from_gray(100)));
    }

    #[test]
    fn gaussian_softens_edges() {
        let r = gray_raster(vec![vec![0.0], vec![255.0]]);
        let s = r.smoothed(Interpolation::Gaussian);
        let mid = s.get(s.width / 2, 0);
        assert!(mid.r() > 0 && mid.r() < 255);
    }

    #[test]
    fn upsample_factor_is_bounded() {
        assert_eq!(upsample_factor(1), 8);
        assert_eq!(upsample_factor(100), 3);
        assert_eq!(upsample_factor(1000), 1);
    }

    #[test]
    fn kernel_is_normalised() {
        let k = gaussian_kernel(1.5);
        assert_eq!(k.len(), 11);
        assert!((k.iter().sum::<f32>() - 1.0).abs() < 1e-5);
    }
}
