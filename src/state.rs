use eframe::egui::{self, TextureHandle, TextureOptions};

use crate::batch::BatchSummary;
use crate::config::Interpolation;
use crate::scene::Scene;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// A presented scene plus its window bookkeeping.
pub struct SceneView {
    pub scene: Scene,
    /// Window still open (not yet dismissed by the user).
    pub open: bool,
    /// Raster texture, uploaded on first draw.
    pub raster_texture: Option<TextureHandle>,
    /// Colour-bar texture, uploaded on first draw.
    pub legend_texture: Option<TextureHandle>,
}

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct ViewerState {
    pub scenes: Vec<SceneView>,

    /// Outcome of a batch run, shown in the top bar.
    pub summary: Option<BatchSummary>,

    /// Whether the failure list is expanded.
    pub show_failures: bool,
}

impl ViewerState {
    /// Queue a scene; returns its index.
    pub fn add_scene(&mut self, scene: Scene) -> usize {
        self.scenes.push(SceneView {
            scene,
            open: true,
            raster_texture: None,
            legend_texture: None,
        });
        self.scenes.len() - 1
    }

    pub fn set_summary(&mut self, summary: BatchSummary) {
        self.show_failures = !summary.failed.is_empty();
        self.summary = Some(summary);
    }

    pub fn open_count(&self) -> usize {
        self.scenes.iter().filter(|v| v.open).count()
    }

    /// Every scene has been dismissed.
    pub fn all_dismissed(&self) -> bool {
        !self.scenes.is_empty() && self.open_count() == 0
    }

    /// Reopen every dismissed scene window.
    pub fn reopen_all(&mut self) {
        for view in &mut self.scenes {
            view.open = true;
        }
    }
}

impl SceneView {
    /// Texture filter matching the scene's interpolation mode.
    pub fn texture_options(&self) -> TextureOptions {
        match self.scene.interpolation {
            Interpolation::Nearest => TextureOptions::NEAREST,
            Interpolation::Bilinear | Interpolation::Gaussian => TextureOptions::LINEAR,
        }
    }

    /// Upload the raster texture if needed and return it.
    pub fn raster_texture(&mut self, ctx: &egui::Context) -> &TextureHandle {
        let options = self.texture_options();
        let scene = &self.scene;
        self.raster_texture.get_or_insert_with(|| {
            ctx.load_texture(
                format!("raster_{}", scene.id),
                scene.raster.to_color_image(),
                options,
            )
        })
    }

    /// Upload the legend strip (one texel wide, high values on top).
    pub fn legend_texture(&mut self, ctx: &egui::Context) -> &TextureHandle {
        let scene = &self.scene;
        self.legend_texture.get_or_insert_with(|| {
            let pixels: Vec<u8> = scene
                .legend
                .gradient
                .iter()
                .rev()
                .flat_map(|c| c.to_srgba_unmultiplied())
                .collect();
            let image = egui::ColorImage::from_rgba_unmultiplied(
                [1, scene.legend.gradient.len()],
                &pixels,
            );
            ctx.load_texture(format!("legend_{}", scene.id), image, TextureOptions::LINEAR)
        })
    }
}
