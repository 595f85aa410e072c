//! # Equidad: Group-Fairness Evaluation Library
//!
//! Equidad evaluates trained binary classifiers for demographic bias across a
//! sweep of decision thresholds, using the privileged/unprivileged group
//! formulation of fairness metrics.
//!
//! ## Architecture
//!
//! - **data**: Binary-label dataset model, group partitions, and the MEPS
//!   health-survey cleaning routine
//! - **metrics**: Group-fairness metric engine (balanced accuracy, average
//!   odds difference, disparate impact, statistical parity difference, equal
//!   opportunity difference, Theil index)
//! - **sweep**: Threshold-sweep controller with capability dispatch over
//!   probability-scoring and label-scoring classifiers
//! - **report**: Formatted text summary of a completed sweep
//! - **config**: Declarative YAML evaluation configuration

pub mod config;
pub mod data;
pub mod metrics;
pub mod report;
pub mod sweep;

pub mod error;

// Re-export commonly used types
pub use data::{BinaryLabelDataset, Frame, GroupPartition};
pub use error::{Error, Result};
pub use metrics::ClassificationMetric;
pub use sweep::{
    sweep, BestThreshold, BiasMetric, Classifier, LabelScorer, MetricSweep, ProbabilityScorer,
};
