//! Core logic for the convolution teaching game: ground-truth feature
//! maps, reveal bookkeeping, and the input-to-instruction controller.

pub mod controller;
pub mod model;

pub use controller::{GridController, InputEvent, RenderInstruction};
pub use model::{FeatureMapSnapshot, FeatureModel};

use shared::{
    config::PuzzleConfig,
    domain::{Cell, FeatureId, GridGeometry},
    error::ConfigError,
};

/// One running puzzle: a [`FeatureModel`] paired with its
/// [`GridController`], driven through a single entry point by the
/// rendering collaborator.
pub struct Game {
    model: FeatureModel,
    controller: GridController,
}

impl Game {
    pub fn new(config: &PuzzleConfig, final_image_available: bool) -> Result<Self, ConfigError> {
        let model = FeatureModel::from_config(config)?;
        let controller = GridController::new(config, final_image_available);
        Ok(Self { model, controller })
    }

    /// Process one input event to completion and return the drawing
    /// instructions it produced, in emission order.
    pub fn apply(&mut self, event: InputEvent) -> Vec<RenderInstruction> {
        self.controller.handle(&mut self.model, event)
    }

    pub fn model(&self) -> &FeatureModel {
        &self.model
    }

    pub fn snapshot(&self, feature: FeatureId) -> FeatureMapSnapshot {
        self.model.snapshot(feature)
    }

    pub fn selected_feature(&self) -> FeatureId {
        self.controller.selected_feature()
    }

    pub fn cursor(&self) -> Option<Cell> {
        self.controller.cursor()
    }

    pub fn geometry(&self) -> GridGeometry {
        self.controller.geometry()
    }

    pub fn image_revealed(&self) -> bool {
        self.controller.image_revealed()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
