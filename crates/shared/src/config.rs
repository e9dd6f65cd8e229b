use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    domain::{FeatureId, GridGeometry},
    error::ConfigError,
};

/// One hidden-subject puzzle: geometry, the guessable answer, and one
/// ground-truth activation matrix per feature.
#[derive(Debug, Clone, Deserialize)]
pub struct PuzzleConfig {
    pub title: String,
    pub answer: String,
    pub geometry: GridGeometry,
    /// Image shown when the answer is guessed; the puzzle works without it.
    #[serde(default)]
    pub reveal_image: Option<PathBuf>,
    pub features: Vec<FeatureConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureConfig {
    pub label: String,
    /// Rows of 0/1 values, `feature_map_size` by `feature_map_size`.
    pub activation: Vec<Vec<u8>>,
}

impl PuzzleConfig {
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let geometry = &self.geometry;
        if geometry.image_size == 0
            || geometry.patch_size == 0
            || geometry.stride == 0
            || geometry.cell_px == 0
        {
            return Err(ConfigError::ZeroDimension {
                image_size: geometry.image_size,
                patch_size: geometry.patch_size,
                stride: geometry.stride,
                cell_px: geometry.cell_px,
            });
        }
        if geometry.image_size % geometry.stride != 0 {
            return Err(ConfigError::StrideMismatch {
                image_size: geometry.image_size,
                stride: geometry.stride,
            });
        }
        if self.answer.trim().is_empty() {
            return Err(ConfigError::EmptyAnswer);
        }
        if self.features.is_empty() {
            return Err(ConfigError::NoFeatures);
        }

        let expected = geometry.feature_map_size();
        let mut seen = HashSet::new();
        for feature in &self.features {
            if !seen.insert(feature.label.as_str()) {
                return Err(ConfigError::DuplicateFeature {
                    label: feature.label.clone(),
                });
            }
            if feature.activation.len() != expected {
                return Err(ConfigError::ActivationRows {
                    label: feature.label.clone(),
                    expected,
                    actual: feature.activation.len(),
                });
            }
            for (row, cols) in feature.activation.iter().enumerate() {
                if cols.len() != expected {
                    return Err(ConfigError::ActivationRowWidth {
                        label: feature.label.clone(),
                        row,
                        expected,
                        actual: cols.len(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Resolve a configured feature label to its dense id.
    pub fn feature_id(&self, label: &str) -> Result<FeatureId, ConfigError> {
        self.features
            .iter()
            .position(|feature| feature.label == label)
            .map(FeatureId)
            .ok_or_else(|| ConfigError::UnknownFeature {
                label: label.to_string(),
            })
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|feature| feature.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_toml() -> String {
        r#"
            title = "Guess the Animal!"
            answer = "giraffe"

            [geometry]
            image_size = 6
            patch_size = 3
            stride = 3
            cell_px = 20

            [[features]]
            label = "eye"
            activation = [[1, 0], [0, 0]]

            [[features]]
            label = "ear"
            activation = [[0, 1], [0, 0]]
        "#
        .to_string()
    }

    fn parse(raw: &str) -> PuzzleConfig {
        toml::from_str(raw).expect("puzzle toml")
    }

    #[test]
    fn accepts_well_formed_puzzle() {
        let config = parse(&sample_toml());
        config.validate().expect("valid puzzle");
        assert_eq!(config.geometry.feature_map_size(), 2);
        assert_eq!(config.feature_id("ear").expect("ear id"), FeatureId(1));
    }

    #[test]
    fn rejects_image_size_not_divisible_by_stride() {
        let mut config = parse(&sample_toml());
        config.geometry.image_size = 7;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StrideMismatch {
                image_size: 7,
                stride: 3
            })
        ));
    }

    #[test]
    fn rejects_activation_matrix_with_wrong_row_count() {
        let mut config = parse(&sample_toml());
        config.features[0].activation.push(vec![0, 0]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ActivationRows {
                expected: 2,
                actual: 3,
                ..
            })
        ));
    }

    #[test]
    fn rejects_ragged_activation_row() {
        let mut config = parse(&sample_toml());
        config.features[1].activation[1] = vec![0, 1, 1];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ActivationRowWidth { row: 1, actual: 3, .. })
        ));
    }

    #[test]
    fn rejects_duplicate_feature_labels() {
        let mut config = parse(&sample_toml());
        config.features[1].label = "eye".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateFeature { .. })
        ));
    }

    #[test]
    fn rejects_blank_answer() {
        let mut config = parse(&sample_toml());
        config.answer = "   ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyAnswer)));
    }

    #[test]
    fn unknown_feature_label_is_an_error() {
        let config = parse(&sample_toml());
        assert!(matches!(
            config.feature_id("tail"),
            Err(ConfigError::UnknownFeature { .. })
        ));
    }
}
