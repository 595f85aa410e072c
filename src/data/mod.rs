//! Dataset model for fairness evaluation
//!
//! A [`BinaryLabelDataset`] couples a feature matrix with binary ground-truth
//! labels, a declared favorable label value, and named protected attributes.
//! A [`GroupPartition`] names one protected attribute and the two values that
//! split the population into privileged and unprivileged groups; it is
//! supplied by the caller (typically from configuration) and fixed for the
//! lifetime of an evaluation run.

mod frame;
pub mod meps;

pub use frame::Frame;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Ground-truth dataset for binary classification with protected attributes.
#[derive(Debug, Clone)]
pub struct BinaryLabelDataset {
    features: Array2<f64>,
    labels: Array1<f64>,
    favorable_label: f64,
    unfavorable_label: f64,
    protected: Vec<(String, Array1<f64>)>,
}

impl BinaryLabelDataset {
    /// Create a dataset from a feature matrix and labels.
    ///
    /// `favorable_label` is the label value that counts as the positive
    /// outcome; `unfavorable_label` is the other value of the label domain.
    pub fn new(
        features: Array2<f64>,
        labels: Array1<f64>,
        favorable_label: f64,
        unfavorable_label: f64,
    ) -> Result<Self> {
        if labels.len() != features.nrows() {
            return Err(Error::ShapeMismatch {
                expected: features.nrows(),
                got: labels.len(),
            });
        }
        Ok(Self {
            features,
            labels,
            favorable_label,
            unfavorable_label,
            protected: Vec::new(),
        })
    }

    /// Attach a named protected attribute, one value per record.
    pub fn with_protected_attribute(
        mut self,
        name: impl Into<String>,
        values: Array1<f64>,
    ) -> Result<Self> {
        if values.len() != self.len() {
            return Err(Error::ShapeMismatch {
                expected: self.len(),
                got: values.len(),
            });
        }
        self.protected.push((name.into(), values));
        Ok(self)
    }

    /// Build a dataset from a cleaned [`Frame`].
    ///
    /// Every column except `label` becomes a feature, in frame column order
    /// (protected attributes stay in the feature matrix, mirroring how the
    /// cleaned survey table is consumed). The named `protected` columns are
    /// additionally registered as protected attributes.
    pub fn from_frame(
        frame: &Frame,
        label: &str,
        protected: &[&str],
        favorable_label: f64,
        unfavorable_label: f64,
    ) -> Result<Self> {
        let labels = Array1::from_vec(frame.column(label)?.to_vec());
        let feature_names: Vec<&str> = frame
            .names()
            .iter()
            .map(String::as_str)
            .filter(|&name| name != label)
            .collect();

        let n_rows = frame.n_rows();
        let mut features = Array2::zeros((n_rows, feature_names.len()));
        for (j, name) in feature_names.iter().enumerate() {
            for (i, &value) in frame.column(name)?.iter().enumerate() {
                features[[i, j]] = value;
            }
        }

        let mut dataset = Self::new(features, labels, favorable_label, unfavorable_label)?;
        for &name in protected {
            let values = Array1::from_vec(frame.column(name)?.to_vec());
            dataset = dataset.with_protected_attribute(name, values)?;
        }
        Ok(dataset)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Feature matrix, one row per record.
    pub fn features(&self) -> &Array2<f64> {
        &self.features
    }

    /// Ground-truth labels.
    pub fn labels(&self) -> &Array1<f64> {
        &self.labels
    }

    /// Label value that counts as the favorable outcome.
    pub fn favorable_label(&self) -> f64 {
        self.favorable_label
    }

    /// Label value that counts as the unfavorable outcome.
    pub fn unfavorable_label(&self) -> f64 {
        self.unfavorable_label
    }

    /// Values of a protected attribute, one per record.
    pub fn protected_attribute(&self, name: &str) -> Result<&Array1<f64>> {
        self.protected
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, values)| values)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }
}

/// Privileged/unprivileged split of the population over one protected
/// attribute. Records matching `privileged_value` form the privileged group,
/// records matching `unprivileged_value` the unprivileged group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupPartition {
    pub attribute: String,
    pub privileged_value: f64,
    pub unprivileged_value: f64,
}

impl GroupPartition {
    pub fn new(attribute: impl Into<String>, privileged_value: f64, unprivileged_value: f64) -> Self {
        Self {
            attribute: attribute.into(),
            privileged_value,
            unprivileged_value,
        }
    }
}
