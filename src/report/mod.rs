//! Text summary of a completed sweep
//!
//! Formats the metric values at the best-balanced-accuracy threshold, one
//! line per metric, four decimal places. Plotting stays presentation-side
//! and outside this crate.

use crate::sweep::MetricSweep;

/// Describe the best threshold of a sweep. `None` when the sweep is empty.
pub fn describe(sweep: &MetricSweep) -> Option<String> {
    let best = sweep.best()?;
    let lines = [
        format!(
            "Threshold corresponding to best balanced accuracy: {:.4}",
            best.threshold
        ),
        format!("Best balanced accuracy: {:.4}", best.balanced_accuracy),
        format!(
            "Corresponding 1-min(DI, 1/DI) value: {:.4}",
            best.impact_distance
        ),
        format!(
            "Corresponding average odds difference value: {:.4}",
            best.average_odds_difference
        ),
        format!(
            "Corresponding statistical parity difference value: {:.4}",
            best.statistical_parity_difference
        ),
        format!(
            "Corresponding equal opportunity difference value: {:.4}",
            best.equal_opportunity_difference
        ),
        format!(
            "Corresponding Theil index value: {:.4}",
            best.theil_index
        ),
    ];
    Some(lines.join("\n"))
}
