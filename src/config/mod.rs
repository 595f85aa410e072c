//! Declarative YAML configuration
//!
//! Describes a bias evaluation run — the protected-attribute partition, the
//! label domain, and the threshold grid — so the same core can be reused
//! across protected attributes without process-wide constants.
//!
//! # Example
//!
//! ```yaml
//! protected:
//!   attribute: RACE
//!   privileged: 1.0
//!   unprivileged: 0.0
//!
//! labels:
//!   favorable: 1.0
//!   unfavorable: 0.0
//!
//! thresholds:
//!   start: 0.01
//!   stop: 0.5
//!   count: 50
//! ```

mod schema;
mod validate;


pub use schema::{EvalConfig, LabelSpec, ProtectedSpec, ThresholdSpec};
pub use validate::{validate_config, ValidationError};

use std::path::Path;

use crate::error::Result;

/// Load and parse an evaluation configuration from a YAML file.
pub fn load_config(path: impl AsRef<Path>) -> Result<EvalConfig> {
    let text = std::fs::read_to_string(path)?;
    let config: EvalConfig = serde_yaml::from_str(&text)?;
    Ok(config)
}
