use eframe::egui::{Id, TextureId, Ui, Vec2};
use egui_plot::{MarkerShape as PlotMarker, Plot, PlotImage, PlotPoint, PlotPoints, Points};

use crate::config::{GridStyle, MarkerShape};
use crate::scene::Scene;

// ---------------------------------------------------------------------------
// Heatmap plot (raster + reference marks)
// ---------------------------------------------------------------------------

/// Draw the raster with the marks on top, axes labelled by motion name.
pub fn heatmap_plot(ui: &mut Ui, scene: &Scene, texture: TextureId, width: f32, height: f32) {
    let [x0, y0, x1, y1] = scene.extent;
    let center = scene.center();
    let [w, h] = scene.size();

    let points: PlotPoints = scene.marks.iter().copied().collect();
    let markers = Points::new(points)
        .name("reference")
        .radius(scene.marker.size)
        .color(scene.marker.fill())
        .shape(plot_marker(scene.marker.shape))
        .filled(true);

    Plot::new(Id::new(("heatmap_plot", scene.id.as_str())))
        .width(width)
        .height(height)
        .x_axis_label(scene.x_label.clone())
        .y_axis_label(scene.y_label.clone())
        .show_grid(scene.grid == GridStyle::LightGrid)
        .include_x(x0)
        .include_x(x1)
        .include_y(y0)
        .include_y(y1)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.image(PlotImage::new(
                texture,
                PlotPoint::new(center[0], center[1]),
                Vec2::new(w as f32, h as f32),
            ));
            plot_ui.points(markers);
        });
}

fn plot_marker(shape: MarkerShape) -> PlotMarker {
    match shape {
        MarkerShape::Circle => PlotMarker::Circle,
        MarkerShape::Square => PlotMarker::Square,
        MarkerShape::Cross => PlotMarker::Cross,
        MarkerShape::Diamond => PlotMarker::Diamond,
    }
}
