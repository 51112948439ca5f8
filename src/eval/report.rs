//! Evaluation reports

use crate::data::Dataset;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// File name of the robustness report inside the output directory
pub const REPORT_FILE: &str = "robustness.json";

/// Accuracy of one attack over the test set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackReport {
    pub attack: String,
    pub correct: usize,
    pub total: usize,
    /// `100 * correct / total`; 0 when `total` is 0
    pub accuracy_pct: f64,
}

impl AttackReport {
    pub fn new(attack: impl Into<String>, correct: usize, total: usize) -> Self {
        let accuracy_pct = if total == 0 {
            0.0
        } else {
            100.0 * correct as f64 / total as f64
        };
        Self {
            attack: attack.into(),
            correct,
            total,
            accuracy_pct,
        }
    }
}

impl fmt::Display for AttackReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<8} {:>7.2}% ({}/{})",
            self.attack, self.accuracy_pct, self.correct, self.total
        )
    }
}

/// Robustness of one checkpoint against a suite of attacks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobustnessReport {
    pub dataset: Dataset,
    /// Checkpoint stem that was evaluated
    pub checkpoint: String,
    /// Epoch the checkpoint was saved after
    pub epoch: usize,
    pub results: Vec<AttackReport>,
    pub evaluated_at: DateTime<Utc>,
}

impl RobustnessReport {
    pub fn new(
        dataset: Dataset,
        checkpoint: impl Into<String>,
        epoch: usize,
        results: Vec<AttackReport>,
    ) -> Self {
        Self {
            dataset,
            checkpoint: checkpoint.into(),
            epoch,
            results,
            evaluated_at: Utc::now(),
        }
    }

    /// Result for the attack with display name `attack`
    pub fn get(&self, attack: &str) -> Option<&AttackReport> {
        self.results.iter().find(|r| r.attack == attack)
    }

    /// Write as pretty JSON, creating parent directories
    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .map_err(|e| Error::io(format!("creating {}", dir.display()), e))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| Error::io(format!("writing {}", path.display()), e))
    }
}

impl fmt::Display for RobustnessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Robustness of {} ({}, epoch {}):",
            self.checkpoint, self.dataset, self.epoch
        )?;
        for result in &self.results {
            writeln!(f, "  {result}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tempfile::TempDir;

    #[test]
    fn test_accuracy_pct() {
        assert_relative_eq!(AttackReport::new("PGD-20", 4_712, 10_000).accuracy_pct, 47.12);
        assert_eq!(AttackReport::new("FGSM", 0, 0).accuracy_pct, 0.0);
    }

    #[test]
    fn test_display_lists_every_attack() {
        let report = RobustnessReport::new(
            Dataset::Cifar10,
            "bestCIFAR10",
            17,
            vec![
                AttackReport::new("Clean", 80, 100),
                AttackReport::new("PGD-20", 45, 100),
            ],
        );
        let text = report.to_string();
        assert!(text.contains("epoch 17"));
        assert!(text.contains("PGD-20"));
        assert!(text.contains("45.00%"));
    }

    #[test]
    fn test_write_json_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join(REPORT_FILE);
        let report = RobustnessReport::new(
            Dataset::Cifar100,
            "bestCIFAR100",
            3,
            vec![AttackReport::new("FGSM", 1, 4)],
        );
        report.write_json(&path).unwrap();
        let read: RobustnessReport =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read, report);
        assert_relative_eq!(read.get("FGSM").unwrap().accuracy_pct, 25.0);
        assert!(read.get("PGD-50").is_none());
    }
}
