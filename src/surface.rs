use anyhow::{anyhow, Result};
use eframe::egui;

use crate::app::MotionHeatmapApp;
use crate::batch::BatchSummary;
use crate::scene::Scene;
use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Presentation surface
// ---------------------------------------------------------------------------

/// Where composed scenes end up.
///
/// `present` never blocks, so a run can queue every scene first and then
/// wait once for the user to dismiss them all.
pub trait Surface {
    fn present(&mut self, scene: Scene);

    /// Attach a batch summary to whatever the user sees while waiting.
    fn report(&mut self, _summary: &BatchSummary) {}

    /// Block until the user has dismissed every presented scene.
    fn wait_for_dismissal(&mut self) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Native window surface
// ---------------------------------------------------------------------------

/// Shows all scenes as floating windows inside one native window.
#[derive(Default)]
pub struct WindowSurface {
    state: Option<ViewerState>,
}

impl WindowSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for WindowSurface {
    fn present(&mut self, scene: Scene) {
        let state = self.state.get_or_insert_with(ViewerState::default);
        log::debug!("Queued scene '{}'", scene.title);
        state.add_scene(scene);
    }

    fn report(&mut self, summary: &BatchSummary) {
        self.state
            .get_or_insert_with(ViewerState::default)
            .set_summary(summary.clone());
    }

    fn wait_for_dismissal(&mut self) -> Result<()> {
        let Some(state) = self.state.take() else {
            return Ok(());
        };
        if state.scenes.is_empty() {
            log::info!("Nothing to show");
            return Ok(());
        }

        let window_title = match state.scenes.as_slice() {
            [only] => only.scene.title.clone(),
            many => format!("Motion heatmaps ({} pairs)", many.len()),
        };

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1200.0, 800.0])
                .with_min_inner_size([600.0, 400.0]),
            ..Default::default()
        };

        eframe::run_native(
            &window_title,
            options,
            Box::new(move |_cc| Ok(Box::new(MotionHeatmapApp::new(state)))),
        )
        .map_err(|e| anyhow!("viewer window failed: {e}"))
    }
}
