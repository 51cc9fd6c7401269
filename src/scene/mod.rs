//! Scene composition: dataset + style → everything the window draws.
//!
//! Z-order inside a scene is fixed: raster, marks, legend, then labels and
//! title. Composition is pure; presenting happens in [`crate::surface`].

pub mod legend;
pub mod raster;

use crate::config::{GridStyle, Interpolation, MarkerStyle, SceneStyle};
use crate::data::model::MotionPairDataset;

use legend::ColorLegend;
use raster::Raster;

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// One fully composed chart for a motion pair.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Stable id for texture and window bookkeeping.
    pub id: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub raster: Raster,
    /// Plot-space rectangle covered by the raster: `[x_min, y_min, x_max, y_max]`.
    pub extent: [f64; 4],
    pub interpolation: Interpolation,
    /// Scatter points in plot coordinates.
    pub marks: Vec<[f64; 2]>,
    pub marker: MarkerStyle,
    pub legend: ColorLegend,
    pub grid: GridStyle,
}

impl Scene {
    /// Centre of the raster in plot coordinates.
    pub fn center(&self) -> [f64; 2] {
        let [x0, y0, x1, y1] = self.extent;
        [(x0 + x1) / 2.0, (y0 + y1) / 2.0]
    }

    /// Width and height of the raster in plot units.
    pub fn size(&self) -> [f64; 2] {
        let [x0, y0, x1, y1] = self.extent;
        [x1 - x0, y1 - y0]
    }
}

// ---------------------------------------------------------------------------
// SceneRenderer
// ---------------------------------------------------------------------------

pub struct SceneRenderer<'a> {
    style: &'a SceneStyle,
}

impl<'a> SceneRenderer<'a> {
    pub fn new(style: &'a SceneStyle) -> Self {
        Self { style }
    }

    /// Compose the scene for one dataset, consuming it.
    pub fn compose(&self, dataset: MotionPairDataset) -> Scene {
        let style = self.style;
        let first = style.label_case.apply(dataset.pair().first());
        let second = style.label_case.apply(dataset.pair().second());
        let title = style
            .title_template
            .replace("{first}", &first)
            .replace("{second}", &second);

        let (rows, cols) = dataset.matrix.shape();
        let raster = Raster::from_matrix(&dataset.matrix, style.colormap, &dataset.domain)
            .smoothed(style.interpolation);

        Scene {
            id: dataset.key.stem.clone(),
            title,
            x_label: first,
            y_label: second,
            raster,
            // Cell (i, j) is centred on (i, j).
            extent: [-0.5, -0.5, rows as f64 - 0.5, cols as f64 - 0.5],
            interpolation: style.interpolation,
            marks: dataset.marks.points().collect(),
            marker: style.marker,
            legend: ColorLegend::new(style.colormap, dataset.domain),
            grid: style.grid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LabelCase;
    use crate::data::model::{
        ComparisonMatrix, DatasetKey, DisplayDomain, MotionPair, ReferenceMarks,
    };

    fn dataset() -> MotionPairDataset {
        MotionPairDataset {
            key: DatasetKey::from_pair(MotionPair::new("walk", "run").unwrap()),
            matrix: ComparisonMatrix::from_rows(vec![
                vec![3.0, 4.0],
                vec![5.0, 6.0],
                vec![7.0, 8.0],
            ])
            .unwrap(),
            marks: ReferenceMarks::new(vec![0.0], vec![0.0]).unwrap(),
            domain: DisplayDomain { min: 3.0, max: 8.0 },
        }
    }

    #[test]
    fn labels_and_title_are_upper_cased_by_default() {
        let style = SceneStyle::default();
        let scene = SceneRenderer::new(&style).compose(dataset());
        assert_eq!(scene.x_label, "WALK");
        assert_eq!(scene.y_label, "RUN");
        assert_eq!(scene.title, "From WALK to RUN");
        assert_eq!(scene.id, "walk_run");
    }

    #[test]
    fn case_folding_is_configurable() {
        let style = SceneStyle {
            label_case: LabelCase::Preserve,
            title_template: "{second} vs {first}".to_string(),
            ..SceneStyle::default()
        };
        let scene = SceneRenderer::new(&style).compose(dataset());
        assert_eq!(scene.x_label, "walk");
        assert_eq!(scene.title, "run vs walk");
    }

    #[test]
    fn single_mark_sits_on_lower_left_cell() {
        let style = SceneStyle {
            interpolation: Interpolation::Nearest,
            ..SceneStyle::default()
        };
        let scene = SceneRenderer::new(&style).compose(dataset());
        assert_eq!(scene.marks, vec![[0.0, 0.0]]);
        assert_eq!(scene.extent, [-0.5, -0.5, 2.5, 1.5]);
        assert_eq!(scene.size(), [3.0, 2.0]);
        assert_eq!(scene.center(), [1.0, 0.5]);
        // Cell (0, 0) is the bottom-left pixel.
        let bottom_left = scene.raster.get(0, scene.raster.height - 1);
        assert_eq!(bottom_left, style.colormap.map(3.0, &scene.legend.domain));
    }
}
