//! Running training statistics

/// Loss and accuracy accumulated over the replays of one epoch.
///
/// Every replay counts: a batch of `n` images replayed `m` times adds
/// `n·m` to `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EpochStats {
    pub loss_sum: f64,
    pub steps: usize,
    pub correct: usize,
    pub total: usize,
}

impl EpochStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one replay: its mean loss and the batch's hits
    pub fn record(&mut self, loss: f64, correct: usize, batch_size: usize) {
        self.loss_sum += loss;
        self.steps += 1;
        self.correct += correct;
        self.total += batch_size;
    }

    /// Mean of the per-replay losses
    pub fn mean_loss(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.loss_sum / self.steps as f64
        }
    }

    /// `100 * correct / total`
    pub fn accuracy_pct(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * self.correct as f64 / self.total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_empty_stats() {
        let stats = EpochStats::new();
        assert_eq!(stats.mean_loss(), 0.0);
        assert_eq!(stats.accuracy_pct(), 0.0);
    }

    #[test]
    fn test_every_replay_counts() {
        let mut stats = EpochStats::new();
        // one batch of 4 images replayed 3 times
        stats.record(2.0, 1, 4);
        stats.record(1.5, 2, 4);
        stats.record(1.0, 3, 4);
        assert_eq!(stats.total, 12);
        assert_eq!(stats.correct, 6);
        assert_abs_diff_eq!(stats.accuracy_pct(), 50.0, epsilon = 1e-12);
        assert_abs_diff_eq!(stats.mean_loss(), 1.5, epsilon = 1e-12);
    }
}
