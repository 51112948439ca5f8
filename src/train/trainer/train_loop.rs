//! Multi-epoch training loop

use super::core::{Best, FreeAdvTrainer};
use super::result::{EpochRecord, TrainResult};
use crate::data::BatchLoader;
use crate::error::Result;
use crate::io::{save_checkpoint, CheckpointMeta};
use crate::model::Classifier;
use crate::train::callback::CallbackAction;
use burn::module::AutodiffModule;
use burn::optim::Optimizer;
use burn::tensor::backend::AutodiffBackend;
use chrono::Utc;
use std::time::Instant;

impl<B, M, O> FreeAdvTrainer<B, M, O>
where
    B: AutodiffBackend,
    M: AutodiffModule<B> + Classifier<B>,
    O: Optimizer<M, B>,
{
    /// Train from the start (or resume) epoch up to `config.epochs`.
    ///
    /// After every epoch the model is attacked with the epoch attack on
    /// `test`; when its robust accuracy is strictly higher than the best so
    /// far, the weights and metadata are saved to the checkpoint stem.
    ///
    /// Returns the model as it is after the last epoch, which is not
    /// necessarily the best one.
    pub fn fit(
        &mut self,
        model: M,
        train: &BatchLoader,
        test: &BatchLoader,
    ) -> Result<(M, TrainResult)> {
        self.start_time = Some(Instant::now());
        let mut model = model;
        let mut history = Vec::new();
        let mut final_train_acc = 0.0;
        let mut stopped_early = false;

        let lr = self.lr_at(self.start_epoch);
        let ctx = self.build_context(self.start_epoch, lr);
        if self.callbacks.on_train_begin(&ctx) == CallbackAction::Stop {
            return Ok((model, self.result(history, 0.0, true)));
        }

        for epoch in self.start_epoch..self.config.epochs {
            let lr = self.lr_at(epoch);
            let ctx = self.build_context(epoch, lr);
            match self.callbacks.on_epoch_begin(&ctx) {
                CallbackAction::Stop => {
                    stopped_early = true;
                    break;
                }
                CallbackAction::SkipEpoch => continue,
                CallbackAction::Continue => {}
            }

            let (trained, stats, action) = self.train_epoch(model, train, epoch, lr)?;
            model = trained;
            final_train_acc = stats.accuracy_pct();

            let report = self.evaluate_epoch(&model, test);
            let is_best = self
                .best
                .map_or(true, |best| report.accuracy_pct > best.robust_acc);
            if is_best {
                let meta = CheckpointMeta {
                    epoch,
                    train_acc: final_train_acc,
                    robust_acc: report.accuracy_pct,
                    robust_attack: report.attack.clone(),
                    dataset: self.config.dataset,
                    num_classes: self.config.num_classes,
                    base_width: self.config.base_width,
                    seed: self.config.seed,
                    lr,
                    saved_at: Utc::now(),
                };
                save_checkpoint(&model, &meta, &self.config.checkpoint_stem)?;
                self.best = Some(Best {
                    epoch,
                    robust_acc: report.accuracy_pct,
                });
            }

            history.push(EpochRecord {
                epoch,
                lr,
                loss: stats.mean_loss(),
                train_acc: final_train_acc,
                robust_acc: report.accuracy_pct,
                saved: is_best,
            });

            let mut ctx = self.build_context(epoch, lr);
            ctx.loss = stats.mean_loss() as f32;
            ctx.train_acc = final_train_acc;
            ctx.correct = stats.correct;
            ctx.total = stats.total;
            ctx.robust_acc = Some(report.accuracy_pct);
            ctx.is_best = is_best;
            ctx.perturbation_norm = self.observed_perturbation_norm();
            let epoch_action = self.callbacks.on_epoch_end(&ctx);
            if action == CallbackAction::Stop || epoch_action == CallbackAction::Stop {
                stopped_early = true;
                break;
            }
        }

        let result = self.result(history, final_train_acc, stopped_early);
        let final_epoch = result.final_epoch.unwrap_or(self.start_epoch);
        let lr = self.scheduler.get_lr();
        let ctx = self.build_context(final_epoch, lr);
        self.callbacks.on_train_end(&ctx);
        Ok((model, result))
    }

    fn result(
        &self,
        history: Vec<EpochRecord>,
        final_train_acc: f64,
        stopped_early: bool,
    ) -> TrainResult {
        TrainResult {
            final_epoch: history.last().map(|r| r.epoch),
            best_robust_acc: self.best.map(|b| b.robust_acc),
            best_epoch: self.best.map(|b| b.epoch),
            final_train_acc,
            stopped_early,
            elapsed_secs: self.start_time.map_or(0.0, |t| t.elapsed().as_secs_f64()),
            history,
        }
    }
}
