use clap::ValueEnum;
use eframe::egui::Color32;

use crate::color::Colormap;
use crate::data::naming::{NamingConvention, PairExtension, SuffixedText};

// ---------------------------------------------------------------------------
// Viewer configuration
// ---------------------------------------------------------------------------

/// Everything that shapes a run, fixed once at startup and passed by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// File naming scheme used to resolve and discover datasets.
    pub convention: ConventionKind,
    /// How the colour domain is derived from the matrix.
    pub domain_mode: DomainMode,
    pub style: SceneStyle,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            convention: ConventionKind::PairExtension,
            domain_mode: DomainMode::Auto,
            style: SceneStyle::default(),
        }
    }
}

impl ViewerConfig {
    /// Build the naming strategy selected by `convention`.
    pub fn naming(&self) -> Box<dyn NamingConvention> {
        match self.convention {
            ConventionKind::PairExtension => Box::new(PairExtension),
            ConventionKind::SuffixedText => Box::new(SuffixedText),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConventionKind {
    /// `<m1>_<m2>.hm` and `<m1>_<m2>.ref`
    #[value(name = "hm")]
    PairExtension,
    /// `<prefix>__heatmap.txt` and `<prefix>__refFrames.txt`
    #[value(name = "txt")]
    SuffixedText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DomainMode {
    /// Full value range of the matrix.
    Auto,
    /// `0 ..= max(|v|)`, for magnitude or error matrices.
    SymmetricAbs,
}

// ---------------------------------------------------------------------------
// Scene style
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SceneStyle {
    pub colormap: Colormap,
    pub interpolation: Interpolation,
    pub marker: MarkerStyle,
    pub grid: GridStyle,
    pub label_case: LabelCase,
    /// `{first}` and `{second}` are replaced by the (case-folded) motion names.
    pub title_template: String,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            colormap: Colormap::Rainbow,
            interpolation: Interpolation::Gaussian,
            marker: MarkerStyle::default(),
            grid: GridStyle::Plain,
            label_case: LabelCase::Upper,
            title_template: "From {first} to {second}".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Interpolation {
    Nearest,
    Bilinear,
    Gaussian,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridStyle {
    Plain,
    LightGrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LabelCase {
    Upper,
    Preserve,
    Lower,
}

impl LabelCase {
    pub fn apply(self, name: &str) -> String {
        match self {
            LabelCase::Upper => name.to_uppercase(),
            LabelCase::Preserve => name.to_string(),
            LabelCase::Lower => name.to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Circle,
    Square,
    Cross,
    Diamond,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// Radius in screen pixels.
    pub size: f32,
    pub color: Color32,
    pub shape: MarkerShape,
    /// 0.0 (invisible) ..= 1.0 (opaque).
    pub opacity: f32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            size: 1.5,
            color: Color32::BLACK,
            shape: MarkerShape::Circle,
            opacity: 0.3,
        }
    }
}

impl MarkerStyle {
    /// Marker colour with `opacity` folded into the alpha channel.
    pub fn fill(&self) -> Color32 {
        let alpha = (self.opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color32::from_rgba_unmultiplied(self.color.r(), self.color.g(), self.color.b(), alpha)
    }
}
