use std::path::PathBuf;

use clap::Parser;

use crate::color::Colormap;
use crate::config::{
    ConventionKind, DomainMode, GridStyle, Interpolation, LabelCase, SceneStyle, ViewerConfig,
};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Folder holding the heatmap and reference files
    #[arg(value_name = "FOLDER")]
    pub folder: PathBuf,

    /// First motion (x axis)
    #[arg(value_name = "MOTION1", required_unless_present = "batch")]
    pub motion1: Option<String>,

    /// Second motion (y axis)
    #[arg(value_name = "MOTION2", required_unless_present = "batch")]
    pub motion2: Option<String>,

    /// Light grid when this starts with 't' or 'T' (e.g. "true")
    #[arg(value_name = "USE_GRID")]
    pub use_grid: Option<String>,

    /// Render every pair found in FOLDER
    #[arg(long, default_value_t = false)]
    pub batch: bool,

    /// Light grid behind the heatmap
    #[arg(long, default_value_t = false)]
    pub grid: bool,

    /// File naming convention
    #[arg(long, value_enum, default_value_t = ConventionKind::PairExtension)]
    pub convention: ConventionKind,

    /// Colour domain
    #[arg(long, value_enum, default_value_t = DomainMode::Auto)]
    pub domain: DomainMode,

    #[arg(long, value_enum, default_value_t = Colormap::Rainbow)]
    pub colormap: Colormap,

    #[arg(long, value_enum, default_value_t = Interpolation::Gaussian)]
    pub interpolation: Interpolation,

    /// Case of axis labels and title names
    #[arg(long, value_enum, default_value_t = LabelCase::Upper)]
    pub labels: LabelCase,

    /// Print the batch summary as JSON on stdout
    #[arg(long, default_value_t = false)]
    pub summary_json: bool,
}

impl Args {
    pub fn wants_grid(&self) -> bool {
        self.grid || self.use_grid.as_deref().is_some_and(grid_toggle)
    }

    pub fn to_config(&self) -> ViewerConfig {
        ViewerConfig {
            convention: self.convention,
            domain_mode: self.domain,
            style: SceneStyle {
                colormap: self.colormap,
                interpolation: self.interpolation,
                grid: if self.wants_grid() {
                    GridStyle::LightGrid
                } else {
                    GridStyle::Plain
                },
                label_case: self.labels,
                ..SceneStyle::default()
            },
        }
    }
}

/// `t`, `T`, `true`: any word starting with t or T.
fn grid_toggle(value: &str) -> bool {
    value.starts_with(['t', 'T'])
}
