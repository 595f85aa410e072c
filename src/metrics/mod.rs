//! Group-fairness metric engine
//!
//! [`ClassificationMetric`] compares a ground-truth dataset against one
//! prediction vector under a fixed privileged/unprivileged partition and
//! exposes one scalar per metric:
//!
//! - Balanced accuracy: (TPR + TNR) / 2 over the whole dataset
//! - Average odds difference: mean of the FPR and TPR gaps between groups
//! - Disparate impact: unprivileged/privileged favorable-rate ratio
//! - Statistical parity difference: favorable-rate gap between groups
//! - Equal opportunity difference: TPR gap between groups
//! - Theil index: generalized entropy (α = 1) of per-record benefits
//!
//! All group differences are oriented unprivileged minus privileged, so zero
//! means parity and negative values disadvantage the unprivileged group.
//! Every computation is a pure function of its inputs.

use ndarray::Array1;

use crate::data::{BinaryLabelDataset, GroupPartition};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, Default)]
struct ConfusionCounts {
    tp: usize,
    fp: usize,
    fn_: usize,
    tn: usize,
}

impl ConfusionCounts {
    fn tally(&mut self, truth_favorable: bool, pred_favorable: bool) {
        match (truth_favorable, pred_favorable) {
            (true, true) => self.tp += 1,
            (false, true) => self.fp += 1,
            (true, false) => self.fn_ += 1,
            (false, false) => self.tn += 1,
        }
    }

    fn total(&self) -> usize {
        self.tp + self.fp + self.fn_ + self.tn
    }

    /// Fraction of records predicted favorable.
    fn selection_rate(&self) -> f64 {
        let n = self.total();
        if n == 0 {
            0.0
        } else {
            (self.tp + self.fp) as f64 / n as f64
        }
    }

    /// TP / (TP + FN); 0.0 when there are no favorable ground-truth records.
    fn true_positive_rate(&self) -> f64 {
        let positives = self.tp + self.fn_;
        if positives == 0 {
            0.0
        } else {
            self.tp as f64 / positives as f64
        }
    }

    /// TN / (TN + FP); 0.0 when there are no unfavorable ground-truth records.
    fn true_negative_rate(&self) -> f64 {
        let negatives = self.tn + self.fp;
        if negatives == 0 {
            0.0
        } else {
            self.tn as f64 / negatives as f64
        }
    }

    /// FP / (FP + TN); 0.0 when there are no unfavorable ground-truth records.
    fn false_positive_rate(&self) -> f64 {
        let negatives = self.fp + self.tn;
        if negatives == 0 {
            0.0
        } else {
            self.fp as f64 / negatives as f64
        }
    }
}

/// Fairness metrics over one (dataset, predictions, partition) triple.
///
/// Confusion counts are computed once at construction; each metric method is
/// then a cheap read. Construction fails with
/// [`Error::ShapeMismatch`] when the prediction vector length disagrees with
/// the dataset, and with [`Error::DegenerateGroupPartition`] when either
/// group predicate selects no records, which would leave the ratio metrics
/// undefined.
#[derive(Debug, Clone)]
pub struct ClassificationMetric {
    overall: ConfusionCounts,
    privileged: ConfusionCounts,
    unprivileged: ConfusionCounts,
    benefits: Array1<f64>,
}

impl ClassificationMetric {
    pub fn new(
        dataset: &BinaryLabelDataset,
        predictions: &Array1<f64>,
        partition: &GroupPartition,
    ) -> Result<Self> {
        if predictions.len() != dataset.len() {
            return Err(Error::ShapeMismatch {
                expected: dataset.len(),
                got: predictions.len(),
            });
        }
        let attribute = dataset.protected_attribute(&partition.attribute)?;
        let favorable = dataset.favorable_label();

        let mut overall = ConfusionCounts::default();
        let mut privileged = ConfusionCounts::default();
        let mut unprivileged = ConfusionCounts::default();
        let mut benefits = Vec::with_capacity(dataset.len());

        for ((&truth, &pred), &group) in dataset
            .labels()
            .iter()
            .zip(predictions.iter())
            .zip(attribute.iter())
        {
            let truth_favorable = truth == favorable;
            let pred_favorable = pred == favorable;

            overall.tally(truth_favorable, pred_favorable);
            if group == partition.privileged_value {
                privileged.tally(truth_favorable, pred_favorable);
            }
            if group == partition.unprivileged_value {
                unprivileged.tally(truth_favorable, pred_favorable);
            }

            // Benefit in favorable coding: prediction - truth + 1.
            let truth01 = if truth_favorable { 1.0 } else { 0.0 };
            let pred01 = if pred_favorable { 1.0 } else { 0.0 };
            benefits.push(pred01 - truth01 + 1.0);
        }

        if privileged.total() == 0 {
            return Err(Error::DegenerateGroupPartition {
                attribute: partition.attribute.clone(),
                group: "privileged",
            });
        }
        if unprivileged.total() == 0 {
            return Err(Error::DegenerateGroupPartition {
                attribute: partition.attribute.clone(),
                group: "unprivileged",
            });
        }

        Ok(Self {
            overall,
            privileged,
            unprivileged,
            benefits: Array1::from_vec(benefits),
        })
    }

    /// (TPR + TNR) / 2 over the whole dataset.
    pub fn balanced_accuracy(&self) -> f64 {
        (self.overall.true_positive_rate() + self.overall.true_negative_rate()) / 2.0
    }

    /// Mean of the FPR and TPR differences, unprivileged minus privileged.
    pub fn average_odds_difference(&self) -> f64 {
        let fpr_diff =
            self.unprivileged.false_positive_rate() - self.privileged.false_positive_rate();
        let tpr_diff =
            self.unprivileged.true_positive_rate() - self.privileged.true_positive_rate();
        (fpr_diff + tpr_diff) / 2.0
    }

    /// P(favorable | unprivileged) / P(favorable | privileged).
    ///
    /// Fails with [`Error::UndefinedDisparateImpact`] when the privileged
    /// favorable rate is zero; the ratio is never coerced to 0 or 1.
    pub fn disparate_impact(&self) -> Result<f64> {
        let privileged_rate = self.privileged.selection_rate();
        if privileged_rate == 0.0 {
            return Err(Error::UndefinedDisparateImpact);
        }
        Ok(self.unprivileged.selection_rate() / privileged_rate)
    }

    /// P(favorable | unprivileged) - P(favorable | privileged).
    pub fn statistical_parity_difference(&self) -> f64 {
        self.unprivileged.selection_rate() - self.privileged.selection_rate()
    }

    /// TPR(unprivileged) - TPR(privileged).
    pub fn equal_opportunity_difference(&self) -> f64 {
        self.unprivileged.true_positive_rate() - self.privileged.true_positive_rate()
    }

    /// Generalized entropy index (α = 1) of the per-record benefit
    /// distribution bᵢ = ŷᵢ - yᵢ + 1. Zero is perfect equality.
    pub fn theil_index(&self) -> f64 {
        let n = self.benefits.len();
        if n == 0 {
            return 0.0;
        }
        let mean = self.benefits.mean().unwrap_or(0.0);
        if mean == 0.0 {
            return 0.0;
        }
        self.benefits
            .iter()
            .map(|&b| {
                let ratio = b / mean;
                if ratio > 0.0 {
                    ratio * ratio.ln()
                } else {
                    // lim x→0 of x ln x
                    0.0
                }
            })
            .sum::<f64>()
            / n as f64
    }
}
