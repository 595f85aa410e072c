//! Evaluation configuration schema

use serde::{Deserialize, Serialize};

use crate::data::GroupPartition;

/// Declarative configuration for one bias evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Protected attribute and its privileged/unprivileged values.
    pub protected: ProtectedSpec,
    /// Label domain; defaults to favorable 1.0, unfavorable 0.0.
    #[serde(default)]
    pub labels: LabelSpec,
    /// Decision thresholds to sweep.
    pub thresholds: ThresholdSpec,
}

impl EvalConfig {
    /// The group partition this configuration describes.
    pub fn partition(&self) -> GroupPartition {
        GroupPartition::new(
            self.protected.attribute.clone(),
            self.protected.privileged,
            self.protected.unprivileged,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtectedSpec {
    pub attribute: String,
    pub privileged: f64,
    pub unprivileged: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelSpec {
    pub favorable: f64,
    pub unfavorable: f64,
}

impl Default for LabelSpec {
    fn default() -> Self {
        Self {
            favorable: 1.0,
            unfavorable: 0.0,
        }
    }
}

/// Threshold grid: either an explicit list or an evenly spaced span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThresholdSpec {
    Grid(Vec<f64>),
    Linspace { start: f64, stop: f64, count: usize },
}

impl ThresholdSpec {
    /// Materialize the threshold sequence, in sweep order.
    ///
    /// `Linspace` includes both endpoints, so `{start: 0.01, stop: 0.5,
    /// count: 50}` reproduces a 0.01-stepped grid from 0.01 to 0.5.
    pub fn expand(&self) -> Vec<f64> {
        match self {
            Self::Grid(values) => values.clone(),
            Self::Linspace { start, stop, count } => match count {
                0 => Vec::new(),
                1 => vec![*start],
                _ => {
                    let step = (stop - start) / (count - 1) as f64;
                    (0..*count).map(|i| start + step * i as f64).collect()
                }
            },
        }
    }
}
