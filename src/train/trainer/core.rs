//! Core trainer struct and basic methods

use crate::io::CheckpointMeta;
use crate::optim::LRScheduler;
use crate::train::callback::{CallbackContext, CallbackManager, TrainerCallback};
use crate::train::{CrossEntropyLoss, PerturbationBuffer, TrainConfig};
use burn::module::AutodiffModule;
use burn::optim::Optimizer;
use burn::tensor::backend::AutodiffBackend;
use std::marker::PhantomData;
use std::time::Instant;

/// Best robust accuracy so far and the epoch that reached it
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Best {
    pub epoch: usize,
    pub robust_acc: f64,
}

/// Free adversarial training loop over a model `M` updated by optimizer `O`
pub struct FreeAdvTrainer<B, M, O>
where
    B: AutodiffBackend,
    M: AutodiffModule<B>,
    O: Optimizer<M, B>,
{
    pub(crate) optimizer: O,
    pub(crate) scheduler: Box<dyn LRScheduler>,
    pub(crate) loss_fn: CrossEntropyLoss,
    pub(crate) config: TrainConfig,
    pub(crate) callbacks: CallbackManager,

    /// Allocated on the first batch; persists across batches and epochs
    pub(crate) buffer: Option<PerturbationBuffer<B>>,

    pub(crate) start_epoch: usize,
    pub(crate) best: Option<Best>,
    pub(crate) global_step: usize,
    pub(crate) start_time: Option<Instant>,
    pub(crate) device: B::Device,
    _model: PhantomData<fn() -> M>,
}

impl<B, M, O> FreeAdvTrainer<B, M, O>
where
    B: AutodiffBackend,
    M: AutodiffModule<B>,
    O: Optimizer<M, B>,
{
    pub fn new(
        optimizer: O,
        scheduler: Box<dyn LRScheduler>,
        config: TrainConfig,
        device: B::Device,
    ) -> Self {
        Self {
            optimizer,
            scheduler,
            loss_fn: CrossEntropyLoss::default(),
            config,
            callbacks: CallbackManager::new(),
            buffer: None,
            start_epoch: 0,
            best: None,
            global_step: 0,
            start_time: None,
            device,
            _model: PhantomData,
        }
    }

    /// Add a callback to the trainer
    pub fn add_callback<C: TrainerCallback + 'static>(&mut self, callback: C) {
        self.callbacks.add(callback);
    }

    pub fn callbacks(&self) -> &CallbackManager {
        &self.callbacks
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Continue after the checkpoint described by `meta`.
    ///
    /// Training restarts at the following epoch and only a strictly better
    /// robust accuracy replaces the checkpoint. The weights themselves are
    /// loaded by the caller.
    pub fn resume_from(&mut self, meta: &CheckpointMeta) {
        self.start_epoch = meta.next_epoch();
        self.best = Some(Best {
            epoch: meta.epoch,
            robust_acc: meta.robust_acc,
        });
    }

    /// First epoch `fit` will train
    pub fn start_epoch(&self) -> usize {
        self.start_epoch
    }

    /// Best robust accuracy (%) seen so far
    pub fn best_robust_acc(&self) -> Option<f64> {
        self.best.map(|b| b.robust_acc)
    }

    /// The persistent perturbation, once training has started
    pub fn perturbation(&self) -> Option<&PerturbationBuffer<B>> {
        self.buffer.as_ref()
    }

    /// Learning rate for `epoch`
    pub fn lr_at(&mut self, epoch: usize) -> f64 {
        self.scheduler.set_epoch(epoch);
        self.scheduler.get_lr()
    }

    /// `|delta|∞` for callbacks; skipped when none are registered
    pub(crate) fn observed_perturbation_norm(&self) -> f32 {
        if self.callbacks.is_empty() {
            return 0.0;
        }
        self.buffer.as_ref().map_or(0.0, PerturbationBuffer::max_abs)
    }

    /// Build callback context from current state
    pub(crate) fn build_context(&self, epoch: usize, lr: f64) -> CallbackContext {
        CallbackContext {
            epoch,
            max_epochs: self.config.epochs,
            global_step: self.global_step,
            lr,
            best_robust_acc: self.best_robust_acc(),
            elapsed_secs: self.start_time.map_or(0.0, |t| t.elapsed().as_secs_f64()),
            ..Default::default()
        }
    }
}
