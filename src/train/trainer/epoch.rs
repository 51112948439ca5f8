//! Epoch-level training and evaluation

use super::core::FreeAdvTrainer;
use crate::data::BatchLoader;
use crate::error::Result;
use crate::eval::{evaluate, AttackReport};
use crate::model::Classifier;
use crate::train::callback::CallbackAction;
use crate::train::EpochStats;
use burn::module::AutodiffModule;
use burn::optim::Optimizer;
use burn::tensor::backend::AutodiffBackend;

impl<B, M, O> FreeAdvTrainer<B, M, O>
where
    B: AutodiffBackend,
    M: AutodiffModule<B> + Classifier<B>,
    O: Optimizer<M, B>,
{
    /// Train for one epoch at learning rate `lr`
    ///
    /// Returns the updated model, the epoch's statistics and `Stop` if a
    /// step callback asked to end training.
    pub fn train_epoch(
        &mut self,
        model: M,
        loader: &BatchLoader,
        epoch: usize,
        lr: f64,
    ) -> Result<(M, EpochStats, CallbackAction)> {
        let steps_per_epoch = loader.num_batches();
        let mut stats = EpochStats::new();
        let mut model = model;

        for (step, batch) in loader
            .epoch::<B>(self.config.seed, epoch, &self.device)
            .enumerate()
        {
            let mut ctx = self.build_context(epoch, lr);
            ctx.step = step;
            ctx.steps_per_epoch = steps_per_epoch;
            if self.callbacks.on_step_begin(&ctx) == CallbackAction::Stop {
                return Ok((model, stats, CallbackAction::Stop));
            }

            model = self.train_batch(model, &batch, lr, &mut stats)?;
            self.global_step += 1;

            let mut ctx = self.build_context(epoch, lr);
            ctx.step = step + 1;
            ctx.steps_per_epoch = steps_per_epoch;
            ctx.loss = stats.mean_loss() as f32;
            ctx.train_acc = stats.accuracy_pct();
            ctx.correct = stats.correct;
            ctx.total = stats.total;
            ctx.perturbation_norm = self.observed_perturbation_norm();
            if self.callbacks.on_step_end(&ctx) == CallbackAction::Stop {
                return Ok((model, stats, CallbackAction::Stop));
            }
        }

        Ok((model, stats, CallbackAction::Continue))
    }

    /// Robust accuracy of `model` on `loader` under the epoch attack
    pub fn evaluate_epoch(&self, model: &M, loader: &BatchLoader) -> AttackReport {
        evaluate(
            model,
            loader,
            &self.config.epoch_attack,
            self.config.seed,
            &self.device,
        )
    }
}
