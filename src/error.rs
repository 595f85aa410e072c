//! Error types for Equidad

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("classifier exposes neither a probability-scoring nor a label-scoring interface")]
    UnsupportedModelInterface,

    #[error("Shape mismatch: expected {expected} values, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("{group} group is empty under protected attribute {attribute:?}")]
    DegenerateGroupPartition {
        attribute: String,
        group: &'static str,
    },

    #[error("privileged favorable rate is zero, disparate impact is undefined")]
    UndefinedDisparateImpact,

    #[error("classifier classes do not include the favorable label {label}")]
    FavorableClassNotFound { label: f64 },

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
