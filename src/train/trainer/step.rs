//! Minibatch replays

use super::core::FreeAdvTrainer;
use crate::data::ImageBatch;
use crate::error::{Error, Result};
use crate::model::{Classifier, Mode};
use crate::train::{count_correct, EpochStats, LossFn, PerturbationBuffer};
use burn::module::AutodiffModule;
use burn::optim::{GradientsParams, Optimizer};
use burn::tensor::backend::AutodiffBackend;
use burn::tensor::{ElementConversion, Tensor};

impl<B, M, O> FreeAdvTrainer<B, M, O>
where
    B: AutodiffBackend,
    M: AutodiffModule<B> + Classifier<B>,
    O: Optimizer<M, B>,
{
    /// Train on one minibatch, replayed `replays` times.
    ///
    /// Each replay runs a single backward pass whose gradients serve twice:
    /// the parameter gradients drive an optimizer step, the input gradient
    /// drives a sign ascent of the persistent perturbation. The adversarial
    /// input `x + delta` is not clipped to the pixel range.
    ///
    /// The perturbation buffer is sized by the first batch it sees; larger
    /// batches afterwards are rejected.
    pub fn train_batch(
        &mut self,
        model: M,
        batch: &ImageBatch<B>,
        lr: f64,
        stats: &mut EpochStats,
    ) -> Result<M> {
        let n = batch.len();
        let [_, channels, height, width] = batch.images.dims();
        let eps = self.config.epsilon;
        let device = batch.images.device();
        let buffer = self.buffer.get_or_insert_with(|| {
            PerturbationBuffer::new([n, channels, height, width], eps, &device)
        });
        if n > buffer.capacity() {
            return Err(Error::InvalidState(format!(
                "batch of {n} images exceeds perturbation buffer of {}",
                buffer.capacity()
            )));
        }

        let mut model = model;
        for _ in 0..self.config.replays {
            let adv = (batch.images.clone() + buffer.delta_for(n))
                .detach()
                .require_grad();
            let logits = model.logits(adv.clone(), Mode::Train);
            let loss = self.loss_fn.forward(logits.clone(), batch.labels.clone());
            let loss_value = loss.clone().into_scalar().elem::<f64>();
            let correct = count_correct(logits.detach(), batch.labels.clone());

            let mut grads = loss.backward();
            let input_grad = adv.grad_remove(&mut grads);
            let grads = GradientsParams::from_grads(grads, &model);
            model = self.optimizer.step(lr, model, grads);

            if let Some(grad) = input_grad {
                buffer.ascend(Tensor::from_inner(grad));
            }
            stats.record(loss_value, correct, n);
        }
        Ok(model)
    }
}
