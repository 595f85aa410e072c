//! Threshold-sweep bias evaluation
//!
//! The controller scores a dataset exactly once through one of two classifier
//! capabilities, then re-binarizes the score vector at each candidate
//! threshold and delegates to the metric engine, accumulating one ordered
//! sequence per metric. Selection over the finished sweep picks the threshold
//! with the best balanced accuracy (first occurrence wins on ties).
//!
//! # Example
//!
//! ```
//! use equidad::{sweep, BinaryLabelDataset, Classifier, GroupPartition, LabelScorer};
//! use ndarray::{array, Array1, Array2};
//!
//! struct Precomputed(Vec<f64>);
//!
//! impl LabelScorer for Precomputed {
//!     fn predict_scores(&self, _dataset: &BinaryLabelDataset) -> Array1<f64> {
//!         Array1::from_vec(self.0.clone())
//!     }
//! }
//!
//! impl Classifier for Precomputed {
//!     fn as_label_scorer(&self) -> Option<&dyn LabelScorer> {
//!         Some(self)
//!     }
//! }
//!
//! let dataset = BinaryLabelDataset::new(Array2::zeros((4, 1)), array![0.0, 1.0, 1.0, 1.0], 1.0, 0.0)
//!     .unwrap()
//!     .with_protected_attribute("RACE", array![1.0, 1.0, 0.0, 0.0])
//!     .unwrap();
//! let model = Precomputed(vec![0.2, 0.6, 0.4, 0.9]);
//! let partition = GroupPartition::new("RACE", 1.0, 0.0);
//!
//! let result = sweep(&dataset, &model, &[0.3, 0.5], &partition).unwrap();
//! let best = result.best().unwrap();
//! assert_eq!(best.threshold, 0.3);
//! ```

use std::collections::HashMap;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::data::{BinaryLabelDataset, GroupPartition};
use crate::error::{Error, Result};
use crate::metrics::ClassificationMetric;


// =============================================================================
// Classifier capabilities
// =============================================================================

/// Classifier that exposes class probabilities.
pub trait ProbabilityScorer {
    /// Class-probability matrix: one row per record, one column per class.
    fn predict_proba(&self, features: &Array2<f64>) -> Array2<f64>;

    /// Class labels, in the column order of [`Self::predict_proba`].
    fn classes(&self) -> &[f64];
}

/// In-process fairness-aware estimator that scores the dataset directly.
pub trait LabelScorer {
    /// Favorable-outcome score per record.
    fn predict_scores(&self, dataset: &BinaryLabelDataset) -> Array1<f64>;
}

/// Capability surface of a classifier under evaluation.
///
/// The controller queries [`Classifier::as_probability_scorer`] first and
/// falls back to [`Classifier::as_label_scorer`]; a classifier advertising
/// neither capability fails the sweep with
/// [`Error::UnsupportedModelInterface`]. Implementations override exactly the
/// accessors for the capabilities they have.
pub trait Classifier {
    fn as_probability_scorer(&self) -> Option<&dyn ProbabilityScorer> {
        None
    }

    fn as_label_scorer(&self) -> Option<&dyn LabelScorer> {
        None
    }
}

// =============================================================================
// Sweep results
// =============================================================================

/// Names of the six swept metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BiasMetric {
    BalancedAccuracy,
    AverageOddsDifference,
    DisparateImpact,
    StatisticalParityDifference,
    EqualOpportunityDifference,
    TheilIndex,
}

impl BiasMetric {
    pub const ALL: [BiasMetric; 6] = [
        BiasMetric::BalancedAccuracy,
        BiasMetric::AverageOddsDifference,
        BiasMetric::DisparateImpact,
        BiasMetric::StatisticalParityDifference,
        BiasMetric::EqualOpportunityDifference,
        BiasMetric::TheilIndex,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::BalancedAccuracy => "bal_acc",
            Self::AverageOddsDifference => "avg_odds_diff",
            Self::DisparateImpact => "disp_imp",
            Self::StatisticalParityDifference => "stat_par_diff",
            Self::EqualOpportunityDifference => "eq_opp_diff",
            Self::TheilIndex => "theil_ind",
        }
    }
}

impl std::fmt::Display for BiasMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-metric value sequences, one entry per swept threshold, in the order
/// the thresholds were supplied. Immutable once the sweep completes.
#[derive(Debug, Clone, Serialize)]
pub struct MetricSweep {
    thresholds: Vec<f64>,
    series: HashMap<BiasMetric, Vec<f64>>,
}

impl MetricSweep {
    fn with_thresholds(thresholds: &[f64]) -> Self {
        let series = BiasMetric::ALL
            .iter()
            .map(|&metric| (metric, Vec::with_capacity(thresholds.len())))
            .collect();
        Self {
            thresholds: thresholds.to_vec(),
            series,
        }
    }

    fn push(&mut self, metric: BiasMetric, value: f64) {
        self.series.entry(metric).or_default().push(value);
    }

    /// The swept thresholds, in input order.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Value sequence for one metric, parallel to [`Self::thresholds`].
    pub fn series(&self, metric: BiasMetric) -> &[f64] {
        self.series.get(&metric).map_or(&[], Vec::as_slice)
    }

    /// Number of swept thresholds.
    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    /// Select the threshold with the best balanced accuracy.
    ///
    /// First occurrence wins on ties. `None` when the sweep is empty.
    pub fn best(&self) -> Option<BestThreshold> {
        if self.is_empty() {
            return None;
        }
        let balanced = self.series(BiasMetric::BalancedAccuracy);
        let mut index = 0;
        for (i, &value) in balanced.iter().enumerate() {
            if value > balanced[index] {
                index = i;
            }
        }

        let at = |metric: BiasMetric| self.series(metric)[index];
        let disparate_impact = at(BiasMetric::DisparateImpact);
        Some(BestThreshold {
            index,
            threshold: self.thresholds[index],
            balanced_accuracy: balanced[index],
            disparate_impact,
            impact_distance: 1.0 - disparate_impact.min(1.0 / disparate_impact),
            average_odds_difference: at(BiasMetric::AverageOddsDifference),
            statistical_parity_difference: at(BiasMetric::StatisticalParityDifference),
            equal_opportunity_difference: at(BiasMetric::EqualOpportunityDifference),
            theil_index: at(BiasMetric::TheilIndex),
        })
    }
}

/// Metric values at the best-balanced-accuracy threshold of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BestThreshold {
    pub index: usize,
    pub threshold: f64,
    pub balanced_accuracy: f64,
    pub disparate_impact: f64,
    /// 1 - min(DI, 1/DI): symmetric distance of disparate impact from parity.
    pub impact_distance: f64,
    pub average_odds_difference: f64,
    pub statistical_parity_difference: f64,
    pub equal_opportunity_difference: f64,
    pub theil_index: f64,
}

// =============================================================================
// Controller
// =============================================================================

/// Evaluate `model` on `dataset` at every threshold in `thresholds`.
///
/// The classifier is scored once; each threshold then binarizes the shared
/// score vector (score > threshold is favorable) and runs the metric engine
/// under the fixed `partition`. Thresholds are processed in input order, with
/// no sorting or deduplication; an empty threshold sequence yields an empty
/// sweep with every metric key present.
pub fn sweep(
    dataset: &BinaryLabelDataset,
    model: &dyn Classifier,
    thresholds: &[f64],
    partition: &GroupPartition,
) -> Result<MetricSweep> {
    let scores = favorable_scores(dataset, model)?;

    let mut result = MetricSweep::with_thresholds(thresholds);
    for &threshold in thresholds {
        let predictions = binarize(
            &scores,
            threshold,
            dataset.favorable_label(),
            dataset.unfavorable_label(),
        );
        let metric = ClassificationMetric::new(dataset, &predictions, partition)?;

        result.push(BiasMetric::BalancedAccuracy, metric.balanced_accuracy());
        result.push(
            BiasMetric::AverageOddsDifference,
            metric.average_odds_difference(),
        );
        result.push(BiasMetric::DisparateImpact, metric.disparate_impact()?);
        result.push(
            BiasMetric::StatisticalParityDifference,
            metric.statistical_parity_difference(),
        );
        result.push(
            BiasMetric::EqualOpportunityDifference,
            metric.equal_opportunity_difference(),
        );
        result.push(BiasMetric::TheilIndex, metric.theil_index());
    }
    Ok(result)
}

/// Obtain the per-record favorable-outcome score vector, exactly once.
///
/// Probability capability first: the score column is the one whose class
/// label equals the dataset's favorable label. Label capability second: the
/// estimator returns the score vector directly. Neither capability is an
/// [`Error::UnsupportedModelInterface`].
fn favorable_scores(dataset: &BinaryLabelDataset, model: &dyn Classifier) -> Result<Array1<f64>> {
    if let Some(scorer) = model.as_probability_scorer() {
        let probabilities = scorer.predict_proba(dataset.features());
        let favorable = dataset.favorable_label();
        let column = scorer
            .classes()
            .iter()
            .position(|&class| class == favorable)
            .ok_or(Error::FavorableClassNotFound { label: favorable })?;
        Ok(probabilities.column(column).to_owned())
    } else if let Some(scorer) = model.as_label_scorer() {
        Ok(scorer.predict_scores(dataset))
    } else {
        Err(Error::UnsupportedModelInterface)
    }
}

/// Binarize scores: strictly above the threshold is favorable.
pub(crate) fn binarize(
    scores: &Array1<f64>,
    threshold: f64,
    favorable: f64,
    unfavorable: f64,
) -> Array1<f64> {
    scores.mapv(|score| if score > threshold { favorable } else { unfavorable })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array2};

    fn four_record_dataset() -> BinaryLabelDataset {
        BinaryLabelDataset::new(Array2::zeros((4, 1)), array![0.0, 1.0, 1.0, 1.0], 1.0, 0.0)
            .unwrap()
            .with_protected_attribute("RACE", array![1.0, 1.0, 0.0, 0.0])
            .unwrap()
    }

    fn race_partition() -> GroupPartition {
        GroupPartition::new("RACE", 1.0, 0.0)
    }

    /// Probability scorer over two classes, [unfavorable, favorable].
    struct ProbaModel(Vec<f64>);

    impl ProbabilityScorer for ProbaModel {
        fn predict_proba(&self, features: &Array2<f64>) -> Array2<f64> {
            let mut out = Array2::zeros((features.nrows(), 2));
            for (i, &score) in self.0.iter().enumerate() {
                out[[i, 0]] = 1.0 - score;
                out[[i, 1]] = score;
            }
            out
        }

        fn classes(&self) -> &[f64] {
            &[0.0, 1.0]
        }
    }

    impl Classifier for ProbaModel {
        fn as_probability_scorer(&self) -> Option<&dyn ProbabilityScorer> {
            Some(self)
        }
    }

    /// Label scorer whose probability path panics if ever taken.
    struct ScoresModel(Vec<f64>);

    impl ProbabilityScorer for ScoresModel {
        fn predict_proba(&self, _features: &Array2<f64>) -> Array2<f64> {
            panic!("probability path must not be taken for a label scorer");
        }

        fn classes(&self) -> &[f64] {
            panic!("probability path must not be taken for a label scorer");
        }
    }

    impl LabelScorer for ScoresModel {
        fn predict_scores(&self, _dataset: &BinaryLabelDataset) -> Array1<f64> {
            Array1::from_vec(self.0.clone())
        }
    }

    impl Classifier for ScoresModel {
        fn as_label_scorer(&self) -> Option<&dyn LabelScorer> {
            Some(self)
        }
    }

    struct NoCapabilities;

    impl Classifier for NoCapabilities {}

    #[test]
    fn probability_path_reads_favorable_column() {
        let dataset = four_record_dataset();
        let model = ProbaModel(vec![0.2, 0.6, 0.4, 0.9]);
        let result = sweep(&dataset, &model, &[0.5], &race_partition()).unwrap();

        assert_relative_eq!(result.series(BiasMetric::BalancedAccuracy)[0], 5.0 / 6.0);
        assert_relative_eq!(result.series(BiasMetric::DisparateImpact)[0], 1.0);
        assert_relative_eq!(result.series(BiasMetric::StatisticalParityDifference)[0], 0.0);
    }

    #[test]
    fn label_path_never_touches_probability_interface() {
        let dataset = four_record_dataset();
        let model = ScoresModel(vec![0.2, 0.6, 0.4, 0.9]);
        let result = sweep(&dataset, &model, &[0.5], &race_partition()).unwrap();

        assert_relative_eq!(result.series(BiasMetric::BalancedAccuracy)[0], 5.0 / 6.0);
    }

    #[test]
    fn missing_capabilities_are_unsupported() {
        let dataset = four_record_dataset();
        let err = sweep(&dataset, &NoCapabilities, &[0.5], &race_partition()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedModelInterface));
    }

    #[test]
    fn missing_favorable_class_is_an_error() {
        struct WrongClasses;

        impl ProbabilityScorer for WrongClasses {
            fn predict_proba(&self, features: &Array2<f64>) -> Array2<f64> {
                Array2::zeros((features.nrows(), 2))
            }

            fn classes(&self) -> &[f64] {
                &[2.0, 3.0]
            }
        }

        impl Classifier for WrongClasses {
            fn as_probability_scorer(&self) -> Option<&dyn ProbabilityScorer> {
                Some(self)
            }
        }

        let dataset = four_record_dataset();
        let err = sweep(&dataset, &WrongClasses, &[0.5], &race_partition()).unwrap_err();
        assert!(matches!(err, Error::FavorableClassNotFound { label } if label == 1.0));
    }

    #[test]
    fn empty_threshold_sequence_yields_empty_series() {
        let dataset = four_record_dataset();
        let model = ScoresModel(vec![0.2, 0.6, 0.4, 0.9]);
        let result = sweep(&dataset, &model, &[], &race_partition()).unwrap();

        assert!(result.is_empty());
        for metric in BiasMetric::ALL {
            assert!(result.series(metric).is_empty());
        }
        assert!(result.best().is_none());
    }

    #[test]
    fn threshold_order_is_preserved_including_duplicates() {
        let dataset = four_record_dataset();
        let model = ScoresModel(vec![0.2, 0.6, 0.4, 0.9]);
        let thresholds = [0.5, 0.1, 0.5];
        let result = sweep(&dataset, &model, &thresholds, &race_partition()).unwrap();

        assert_eq!(result.thresholds(), &thresholds);
        let balanced = result.series(BiasMetric::BalancedAccuracy);
        assert_eq!(balanced.len(), 3);
        assert_relative_eq!(balanced[0], balanced[2]);
    }

    #[test]
    fn best_takes_first_balanced_accuracy_argmax() {
        let dataset = four_record_dataset();
        let model = ScoresModel(vec![0.2, 0.6, 0.4, 0.9]);
        // 0.3 classifies everything favorable except record 0: bal_acc = 1.
        let result = sweep(&dataset, &model, &[0.3, 0.5, 0.3], &race_partition()).unwrap();
        let best = result.best().unwrap();

        assert_eq!(best.index, 0);
        assert_eq!(best.threshold, 0.3);
        assert_relative_eq!(best.balanced_accuracy, 1.0);
        assert_relative_eq!(best.disparate_impact, 2.0);
        assert_relative_eq!(best.impact_distance, 0.5);
    }

    #[test]
    fn sweep_surfaces_undefined_disparate_impact() {
        let dataset = four_record_dataset();
        // Scores leave the privileged group entirely unfavorable at 0.7.
        let model = ScoresModel(vec![0.2, 0.6, 0.4, 0.9]);
        let err = sweep(&dataset, &model, &[0.7], &race_partition()).unwrap_err();
        assert!(matches!(err, Error::UndefinedDisparateImpact));
    }
}
