use shared::{
    config::PuzzleConfig,
    domain::{Cell, FeatureId, RevealState},
    error::ConfigError,
};
use tracing::debug;

/// Ground-truth activation grids plus the per-feature reveal overlays.
///
/// The activation grids are built once from configuration and never
/// mutated; the reveal grids only ever move a cell from `Unrevealed` to
/// the state dictated by the matching activation, so re-revealing is
/// idempotent.
pub struct FeatureModel {
    labels: Vec<String>,
    side: usize,
    activations: Vec<Vec<bool>>,
    revealed: Vec<Vec<RevealState>>,
}

impl FeatureModel {
    pub fn from_config(config: &PuzzleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let side = config.geometry.feature_map_size();
        let labels: Vec<String> = config.labels().map(str::to_string).collect();
        let activations = config
            .features
            .iter()
            .map(|feature| {
                feature
                    .activation
                    .iter()
                    .flatten()
                    .map(|&value| value != 0)
                    .collect()
            })
            .collect();
        let revealed = vec![vec![RevealState::Unrevealed; side * side]; labels.len()];
        Ok(Self {
            labels,
            side,
            activations,
            revealed,
        })
    }

    pub fn feature_map_size(&self) -> usize {
        self.side
    }

    pub fn feature_count(&self) -> usize {
        self.labels.len()
    }

    pub fn label(&self, feature: FeatureId) -> &str {
        &self.labels[feature.0]
    }

    pub fn feature_ids(&self) -> impl Iterator<Item = FeatureId> {
        (0..self.labels.len()).map(FeatureId)
    }

    fn index(&self, feature: FeatureId, cell: Cell) -> usize {
        assert!(
            feature.0 < self.labels.len(),
            "unknown feature id {feature:?}"
        );
        let side = self.side;
        assert!(
            cell.row < side && cell.col < side,
            "cell ({}, {}) outside the {side}x{side} feature map",
            cell.row,
            cell.col
        );
        cell.row * side + cell.col
    }

    /// Ground-truth activation at one cell. Coordinates are a caller
    /// contract: the controller pre-validates input, so an out-of-range
    /// cell here is a bug and panics.
    pub fn activation_at(&self, feature: FeatureId, cell: Cell) -> bool {
        let index = self.index(feature, cell);
        self.activations[feature.0][index]
    }

    pub fn revealed_at(&self, feature: FeatureId, cell: Cell) -> RevealState {
        let index = self.index(feature, cell);
        self.revealed[feature.0][index]
    }

    /// Expose the activation truth at one cell and return the stored
    /// state. The only mutator on the model.
    pub fn reveal(&mut self, feature: FeatureId, cell: Cell) -> RevealState {
        let index = self.index(feature, cell);
        let state = if self.activations[feature.0][index] {
            RevealState::RevealedTrue
        } else {
            RevealState::RevealedFalse
        };
        self.revealed[feature.0][index] = state;
        debug!(
            feature = self.labels[feature.0].as_str(),
            row = cell.row,
            col = cell.col,
            ?state,
            "revealed feature-map cell"
        );
        state
    }

    /// Owned copy of one feature's reveal grid, for whole-map redraws
    /// without handing out internal storage.
    pub fn snapshot(&self, feature: FeatureId) -> FeatureMapSnapshot {
        assert!(
            feature.0 < self.labels.len(),
            "unknown feature id {feature:?}"
        );
        FeatureMapSnapshot {
            side: self.side,
            cells: self.revealed[feature.0].clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureMapSnapshot {
    side: usize,
    cells: Vec<RevealState>,
}

impl FeatureMapSnapshot {
    pub fn side(&self) -> usize {
        self.side
    }

    pub fn at(&self, cell: Cell) -> RevealState {
        let side = self.side;
        assert!(
            cell.row < side && cell.col < side,
            "cell ({}, {}) outside the {side}x{side} snapshot",
            cell.row,
            cell.col
        );
        self.cells[cell.row * side + cell.col]
    }

    pub fn cells(&self) -> impl Iterator<Item = (Cell, RevealState)> + '_ {
        let side = self.side;
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, &state)| (Cell::new(index / side, index % side), state))
    }
}

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod tests;
