use serde::{Deserialize, Serialize};
use shared::{
    config::PuzzleConfig,
    domain::{Cell, Direction, FeatureId, FeedbackTone, GridGeometry, RevealState},
};
use tracing::{debug, info};

use crate::model::FeatureModel;

/// Raw interactions forwarded by the rendering/input collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown { x_px: f32, y_px: f32 },
    DirectionalKey(Direction),
    SelectFeature(FeatureId),
    SubmitGuess(String),
}

/// Drawing instructions consumed by the rendering collaborator, in
/// emission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum RenderInstruction {
    RedrawCell {
        feature: FeatureId,
        cell: Cell,
        state: RevealState,
    },
    HighlightPatch {
        x_px: u32,
        y_px: u32,
        width_px: u32,
        height_px: u32,
    },
    HighlightFeatureMapCell {
        feature: FeatureId,
        cell: Cell,
    },
    SetSelectorActive(FeatureId),
    ShowFeedback {
        message: String,
        tone: FeedbackTone,
    },
    RevealFinalImage {
        asset_available: bool,
    },
}

/// Cursor and selection state plus the input-to-cell mapping. All grid
/// mutation is delegated to [`FeatureModel`].
///
/// The cursor starts undefined: directional keys are no-ops until the
/// first click lands. Each feature keeps its own last probed cell, and
/// selecting a feature restores it.
pub struct GridController {
    geometry: GridGeometry,
    answer: String,
    selected: FeatureId,
    cursor: Option<Cell>,
    saved_cursor: Vec<Option<Cell>>,
    final_image_available: bool,
    image_revealed: bool,
}

impl GridController {
    /// Expects an already-validated [`PuzzleConfig`].
    pub fn new(config: &PuzzleConfig, final_image_available: bool) -> Self {
        Self {
            geometry: config.geometry,
            answer: config.answer.trim().to_ascii_lowercase(),
            selected: FeatureId(0),
            cursor: None,
            saved_cursor: vec![None; config.features.len()],
            final_image_available,
            image_revealed: false,
        }
    }

    pub fn selected_feature(&self) -> FeatureId {
        self.selected
    }

    pub fn cursor(&self) -> Option<Cell> {
        self.cursor
    }

    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    pub fn image_revealed(&self) -> bool {
        self.image_revealed
    }

    /// Process one event to completion. Out-of-bounds input is rejected
    /// silently; the returned instructions are empty in that case.
    pub fn handle(
        &mut self,
        model: &mut FeatureModel,
        event: InputEvent,
    ) -> Vec<RenderInstruction> {
        match event {
            InputEvent::PointerDown { x_px, y_px } => self.pointer_down(model, x_px, y_px),
            InputEvent::DirectionalKey(direction) => self.directional_key(model, direction),
            InputEvent::SelectFeature(feature) => self.select_feature(feature),
            InputEvent::SubmitGuess(text) => self.submit_guess(&text),
        }
    }

    fn select_feature(&mut self, feature: FeatureId) -> Vec<RenderInstruction> {
        assert!(
            feature.0 < self.saved_cursor.len(),
            "unknown feature id {feature:?}"
        );
        self.selected = feature;
        self.cursor = self.saved_cursor[feature.0];

        let mut instructions = vec![RenderInstruction::SetSelectorActive(feature)];
        if let Some(cell) = self.cursor {
            instructions.push(self.feature_map_highlight(cell));
            instructions.push(self.patch_highlight(cell));
        }
        instructions
    }

    fn pointer_down(
        &mut self,
        model: &mut FeatureModel,
        x_px: f32,
        y_px: f32,
    ) -> Vec<RenderInstruction> {
        if self.image_revealed {
            // The canvas shows the solution image now; probing is over.
            return Vec::new();
        }

        let canvas = self.geometry.image_canvas_px() as f32;
        if x_px < 0.0 || y_px < 0.0 || x_px >= canvas || y_px >= canvas {
            debug!(x_px, y_px, "ignoring pointer outside the image canvas");
            return Vec::new();
        }

        let cell_px = self.geometry.cell_px as usize;
        let col = x_px as usize / cell_px;
        let row = y_px as usize / cell_px;
        let cell = Cell::new(row / self.geometry.stride, col / self.geometry.stride);

        let side = self.geometry.feature_map_size();
        if cell.row >= side || cell.col >= side {
            return Vec::new();
        }

        self.reveal_at(model, cell)
    }

    fn directional_key(
        &mut self,
        model: &mut FeatureModel,
        direction: Direction,
    ) -> Vec<RenderInstruction> {
        // No cell probed yet; arrow keys wait for the first click.
        let Some(cell) = self.cursor else {
            return Vec::new();
        };

        let side = self.geometry.feature_map_size();
        let moved = match direction {
            Direction::Left if cell.col > 0 => Some(Cell::new(cell.row, cell.col - 1)),
            Direction::Right if cell.col + 1 < side => Some(Cell::new(cell.row, cell.col + 1)),
            Direction::Up if cell.row > 0 => Some(Cell::new(cell.row - 1, cell.col)),
            Direction::Down if cell.row + 1 < side => Some(Cell::new(cell.row + 1, cell.col)),
            _ => None,
        };

        match moved {
            Some(next) => self.reveal_at(model, next),
            None => Vec::new(),
        }
    }

    fn reveal_at(&mut self, model: &mut FeatureModel, cell: Cell) -> Vec<RenderInstruction> {
        self.cursor = Some(cell);
        self.saved_cursor[self.selected.0] = Some(cell);
        let state = model.reveal(self.selected, cell);
        vec![
            RenderInstruction::RedrawCell {
                feature: self.selected,
                cell,
                state,
            },
            self.patch_highlight(cell),
            self.feature_map_highlight(cell),
        ]
    }

    fn patch_highlight(&self, cell: Cell) -> RenderInstruction {
        let (x_px, y_px) = self.geometry.patch_origin_px(cell);
        let extent = self.geometry.patch_extent_px();
        RenderInstruction::HighlightPatch {
            x_px,
            y_px,
            width_px: extent,
            height_px: extent,
        }
    }

    fn feature_map_highlight(&self, cell: Cell) -> RenderInstruction {
        RenderInstruction::HighlightFeatureMapCell {
            feature: self.selected,
            cell,
        }
    }

    fn submit_guess(&mut self, text: &str) -> Vec<RenderInstruction> {
        if text.trim().eq_ignore_ascii_case(&self.answer) {
            info!("puzzle solved");
            if self.final_image_available {
                self.image_revealed = true;
            }
            vec![
                RenderInstruction::ShowFeedback {
                    message: "Correct!".to_string(),
                    tone: FeedbackTone::Positive,
                },
                RenderInstruction::RevealFinalImage {
                    asset_available: self.final_image_available,
                },
            ]
        } else {
            vec![RenderInstruction::ShowFeedback {
                message: "Incorrect!".to_string(),
                tone: FeedbackTone::Negative,
            }]
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
