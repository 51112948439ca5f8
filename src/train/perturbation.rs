//! Persistent adversarial perturbation for free adversarial training

use burn::tensor::backend::Backend;
use burn::tensor::{ElementConversion, Tensor};

/// The perturbation `delta` shared by every replay of every minibatch.
///
/// Allocated once, shaped like a full training batch, and never reset
/// between minibatches or epochs: each batch starts from the perturbation
/// the previous batch left behind.
///
/// Invariant: `|delta|∞ <= eps` after every update.
#[derive(Debug, Clone)]
pub struct PerturbationBuffer<B: Backend> {
    delta: Tensor<B, 4>,
    eps: f32,
}

impl<B: Backend> PerturbationBuffer<B> {
    /// Zero perturbation for batches of shape `[batch_size, channels, height, width]`
    pub fn new(shape: [usize; 4], eps: f32, device: &B::Device) -> Self {
        Self {
            delta: Tensor::zeros(shape, device),
            eps,
        }
    }

    pub fn epsilon(&self) -> f32 {
        self.eps
    }

    /// Leading dimension of the buffer
    pub fn capacity(&self) -> usize {
        self.delta.dims()[0]
    }

    pub fn shape(&self) -> [usize; 4] {
        self.delta.dims()
    }

    /// Perturbation for a batch of `n <= capacity` images, detached
    pub fn delta_for(&self, n: usize) -> Tensor<B, 4> {
        let [cap, c, h, w] = self.delta.dims();
        if n >= cap {
            return self.delta.clone().detach();
        }
        self.delta.clone().slice([0..n, 0..c, 0..h, 0..w]).detach()
    }

    /// Sign-gradient ascent: `delta ← clamp(delta + eps·sign(grad), -eps, eps)`.
    ///
    /// `grad` may cover fewer rows than the buffer; only those rows move.
    pub fn ascend(&mut self, grad: Tensor<B, 4>) {
        let [n, c, h, w] = grad.dims();
        let step = grad.detach().sign().mul_scalar(self.eps);
        let updated = (self.delta_for(n) + step).clamp(-self.eps, self.eps);
        self.delta = if n >= self.capacity() {
            updated
        } else {
            self.delta
                .clone()
                .slice_assign([0..n, 0..c, 0..h, 0..w], updated)
        }
        .detach();
    }

    /// `|delta|∞`
    pub fn max_abs(&self) -> f32 {
        self.delta.clone().abs().max().into_scalar().elem::<f32>()
    }

    /// Back to zero
    pub fn reset(&mut self) {
        self.delta = self.delta.zeros_like();
    }
}
