//! Robustness evaluation
//!
//! - [`evaluate`] - accuracy of a classifier on attacked test batches
//! - [`evaluate_suite`] - one [`AttackReport`] per attack
//! - [`RobustnessReport`] - the suite result as written to `robustness.json`

mod report;
mod robustness;

pub use report::{AttackReport, RobustnessReport, REPORT_FILE};
pub use robustness::{evaluate, evaluate_suite, with_clean};
