use thiserror::Error;

/// Defects in a puzzle definition. All of these are fatal at load or
/// construction time; none is a recoverable user-input condition.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("image size {image_size} is not divisible by stride {stride}")]
    StrideMismatch { image_size: usize, stride: usize },

    #[error(
        "geometry dimensions must be non-zero \
         (image_size={image_size}, patch_size={patch_size}, stride={stride}, cell_px={cell_px})"
    )]
    ZeroDimension {
        image_size: usize,
        patch_size: usize,
        stride: usize,
        cell_px: u32,
    },

    #[error("feature '{label}': expected {expected} activation rows, got {actual}")]
    ActivationRows {
        label: String,
        expected: usize,
        actual: usize,
    },

    #[error("feature '{label}': activation row {row} has {actual} columns, expected {expected}")]
    ActivationRowWidth {
        label: String,
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("duplicate feature label '{label}'")]
    DuplicateFeature { label: String },

    #[error("puzzle defines no features")]
    NoFeatures,

    #[error("unknown feature label '{label}'")]
    UnknownFeature { label: String },

    #[error("puzzle answer must not be empty")]
    EmptyAnswer,

    #[error("failed to read puzzle file '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse puzzle file '{path}'")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
