use eframe::egui;

use crate::state::ViewerState;
use crate::ui::{panels, plot};

/// Default scene window size; the plot takes what the legend leaves.
const SCENE_SIZE: [f32; 2] = [620.0, 480.0];
/// Offset between successive scene windows so a batch fans out.
const CASCADE_STEP: f32 = 32.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MotionHeatmapApp {
    pub state: ViewerState,
}

impl MotionHeatmapApp {
    pub fn new(state: ViewerState) -> Self {
        Self { state }
    }
}

impl eframe::App for MotionHeatmapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: status bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: batch failures ----
        if self.state.show_failures {
            egui::TopBottomPanel::bottom("failures")
                .resizable(true)
                .show(ctx, |ui| {
                    panels::failure_panel(ui, &self.state);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                ui.weak("Close every chart (or this window) to finish.");
            });
        });

        // ---- One floating window per scene ----
        for (idx, view) in self.state.scenes.iter_mut().enumerate() {
            if !view.open {
                continue;
            }
            let raster = view.raster_texture(ctx).id();
            let legend = view.legend_texture(ctx).id();
            let scene = &view.scene;
            let offset = CASCADE_STEP * (idx % 10) as f32;

            let mut open = view.open;
            egui::Window::new(&scene.title)
                .id(egui::Id::new(("scene", idx)))
                .open(&mut open)
                .default_size(SCENE_SIZE)
                .default_pos([40.0 + offset, 60.0 + offset])
                .show(ctx, |ui| {
                    let avail = ui.available_size();
                    let height = avail.y.max(200.0);
                    let width = (avail.x - panels::LEGEND_WIDTH).max(200.0);
                    ui.horizontal(|ui| {
                        plot::heatmap_plot(ui, scene, raster, width, height);
                        panels::color_legend(ui, &scene.legend, legend, height);
                    });
                });
            if !open {
                log::debug!("Scene '{}' dismissed", scene.title);
            }
            view.open = open;
        }

        if self.state.all_dismissed() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}
