use eframe::egui::{
    self, pos2, vec2, Align2, Color32, FontId, Rect, RichText, ScrollArea, Sense, Stroke,
    TextureId, Ui,
};

use crate::scene::legend::{format_tick, ColorLegend};
use crate::state::ViewerState;

/// Horizontal room taken by the colour bar and its tick labels.
pub const LEGEND_WIDTH: f32 = 72.0;
const BAR_WIDTH: f32 = 16.0;
const BAR_MARGIN: f32 = 8.0;

// ---------------------------------------------------------------------------
// Colour legend
// ---------------------------------------------------------------------------

/// Vertical colour bar with tick labels, high values on top.
pub fn color_legend(ui: &mut Ui, legend: &ColorLegend, texture: TextureId, height: f32) {
    let (rect, _) = ui.allocate_exact_size(vec2(LEGEND_WIDTH, height), Sense::hover());
    let bar = Rect::from_min_size(
        rect.min + vec2(4.0, BAR_MARGIN),
        vec2(BAR_WIDTH, (height - 2.0 * BAR_MARGIN).max(1.0)),
    );

    let painter = ui.painter_at(rect);
    let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
    painter.image(texture, bar, uv, Color32::WHITE);

    let text_color = ui.visuals().text_color();
    let stroke = Stroke::new(1.0, text_color);
    for &tick in &legend.ticks {
        let y = bar.bottom() - legend.position(tick) as f32 * bar.height();
        painter.line_segment([pos2(bar.right(), y), pos2(bar.right() + 4.0, y)], stroke);
        painter.text(
            pos2(bar.right() + 6.0, y),
            Align2::LEFT_CENTER,
            format_tick(tick, &legend.ticks),
            FontId::proportional(11.0),
            text_color,
        );
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("View", |ui: &mut Ui| {
            if ui.button("Reopen all scenes").clicked() {
                state.reopen_all();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} of {} scene(s) open",
            state.open_count(),
            state.scenes.len()
        ));

        if let Some(summary) = &state.summary {
            ui.separator();
            ui.label(format!(
                "Batch: {} rendered, {} failed",
                summary.succeeded.len(),
                summary.failed.len()
            ));
            if !summary.failed.is_empty()
                && ui
                    .selectable_label(state.show_failures, "Failures")
                    .clicked()
            {
                state.show_failures = !state.show_failures;
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Failure list
// ---------------------------------------------------------------------------

/// List pairs that could not be rendered.
pub fn failure_panel(ui: &mut Ui, state: &ViewerState) {
    let Some(summary) = &state.summary else {
        return;
    };
    ui.strong("Pairs not rendered");
    ScrollArea::vertical()
        .max_height(140.0)
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            for failure in &summary.failed {
                ui.label(
                    RichText::new(format!("{}: {}", failure.stem, failure.message))
                        .color(Color32::RED),
                );
            }
        });
}
