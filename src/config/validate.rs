//! Configuration validation

use super::schema::EvalConfig;

/// Validation error type
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Protected attribute name is empty")]
    EmptyAttribute,

    #[error("Privileged and unprivileged values are identical: {0}")]
    IdenticalGroupValues(f64),

    #[error("Favorable and unfavorable labels are identical: {0}")]
    IdenticalLabelValues(f64),

    #[error("Threshold grid is empty")]
    EmptyThresholdGrid,

    #[error("Threshold is not finite: {0}")]
    NonFiniteThreshold(f64),
}

/// Validate an evaluation configuration
///
/// Checks:
/// - The protected attribute is named and its two values differ
/// - The label domain has two distinct values
/// - The threshold grid is non-empty and finite
pub fn validate_config(config: &EvalConfig) -> Result<(), ValidationError> {
    if config.protected.attribute.is_empty() {
        return Err(ValidationError::EmptyAttribute);
    }
    if config.protected.privileged == config.protected.unprivileged {
        return Err(ValidationError::IdenticalGroupValues(
            config.protected.privileged,
        ));
    }
    if config.labels.favorable == config.labels.unfavorable {
        return Err(ValidationError::IdenticalLabelValues(config.labels.favorable));
    }

    let thresholds = config.thresholds.expand();
    if thresholds.is_empty() {
        return Err(ValidationError::EmptyThresholdGrid);
    }
    for &threshold in &thresholds {
        if !threshold.is_finite() {
            return Err(ValidationError::NonFiniteThreshold(threshold));
        }
    }

    Ok(())
}
