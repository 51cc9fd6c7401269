use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::config::ViewerConfig;
use crate::data::discovery::discover_stems;
use crate::data::loader::DatasetLoader;
use crate::data::model::{DatasetKey, MotionPair};
use crate::error::{ErrorKind, ViewerError};
use crate::scene::SceneRenderer;
use crate::surface::Surface;

// ---------------------------------------------------------------------------
// Batch summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    /// Stems rendered, in discovery order.
    pub succeeded: Vec<String>,
    pub failed: Vec<PairFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PairFailure {
    pub stem: String,
    pub kind: ErrorKind,
    pub message: String,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// True when at least one pair was found and none failed.
    pub fn all_succeeded(&self) -> bool {
        self.total() > 0 && self.failed.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

/// Render every pair in `dir`, then wait once for dismissal.
///
/// A pair that fails to load is recorded and skipped; only a missing
/// directory stops the run.
pub fn run_batch(
    dir: &Path,
    config: &ViewerConfig,
    surface: &mut dyn Surface,
) -> Result<BatchSummary> {
    let loader = DatasetLoader::new(dir, config);
    let renderer = SceneRenderer::new(&config.style);
    let stems = discover_stems(dir, loader.convention())?;

    let mut summary = BatchSummary::default();
    for stem in stems {
        let outcome = DatasetKey::from_stem(&stem).and_then(|key| loader.load(&key));
        match outcome {
            Ok(dataset) => {
                surface.present(renderer.compose(dataset));
                summary.succeeded.push(stem);
            }
            Err(e) => {
                log::error!("Skipping '{stem}': {e:#}");
                summary.failed.push(PairFailure {
                    stem,
                    kind: e.kind(),
                    message: e.to_string(),
                });
            }
        }
    }

    log::info!(
        "Batch finished: {} rendered, {} failed",
        summary.succeeded.len(),
        summary.failed.len()
    );
    surface.report(&summary);
    surface.wait_for_dismissal()?;
    Ok(summary)
}

/// Render one explicit pair and block until it is dismissed.
///
/// Data errors surface as [`ViewerError`] before anything is presented.
pub fn run_single(
    dir: &Path,
    first: &str,
    second: &str,
    config: &ViewerConfig,
    surface: &mut dyn Surface,
) -> Result<()> {
    let key = DatasetKey::from_pair(MotionPair::new(first, second)?);
    let dataset = DatasetLoader::new(dir, config).load(&key)?;
    surface.present(SceneRenderer::new(&config.style).compose(dataset));
    surface.wait_for_dismissal()
}

/// Whether a top-level error came from the data rather than the window.
pub fn is_data_error(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ViewerError>().is_some()
}
