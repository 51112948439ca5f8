//! L∞ adversarial attacks
//!
//! Attacks are compositions of burn tensor ops: input gradients come from
//! the autodiff backend, the perturbation rules (sign step, projection,
//! clipping) are applied on detached tensors.
//!
//! - [`LinfPgd`] - projected gradient descent with optional random start
//! - [`Fgsm`] - single signed-gradient step
//! - [`AttackSpec`] - serializable attack description used by configs

mod fgsm;
mod pgd;
mod spec;

pub use fgsm::Fgsm;
pub use pgd::LinfPgd;
pub use spec::AttackSpec;

use crate::model::{Classifier, Mode};
use crate::train::{CrossEntropyLoss, LossFn, Reduction};
use burn::tensor::backend::AutodiffBackend;
use burn::tensor::{Int, Tensor};

/// Default L∞ budget, 8/255
pub const DEFAULT_EPSILON: f32 = 8.0 / 255.0;

/// Default PGD step size, 2/255
pub const DEFAULT_STEP_SIZE: f32 = 2.0 / 255.0;

/// Valid pixel range
pub const PIXEL_RANGE: (f32, f32) = (0.0, 1.0);

/// An untargeted evasion attack
pub trait Attack<B: AutodiffBackend> {
    /// Adversarial counterparts of `images`, detached from any graph
    fn perturb<M: Classifier<B>>(
        &self,
        model: &M,
        images: Tensor<B, 4>,
        labels: Tensor<B, 1, Int>,
    ) -> Tensor<B, 4>;

    /// Display name, e.g. "PGD-20"
    fn name(&self) -> String;
}

/// Gradient of the cross-entropy w.r.t. `inputs`, evaluated at `inputs`
pub fn input_gradient<B: AutodiffBackend, M: Classifier<B>>(
    model: &M,
    inputs: Tensor<B, 4>,
    labels: Tensor<B, 1, Int>,
    mode: Mode,
    reduction: Reduction,
) -> Tensor<B, 4> {
    let inputs = inputs.detach().require_grad();
    let logits = model.logits(inputs.clone(), mode);
    let loss = CrossEntropyLoss::new(reduction).forward(logits, labels);
    let grads = loss.backward();
    match inputs.grad(&grads) {
        Some(grad) => Tensor::from_inner(grad),
        None => Tensor::zeros(inputs.dims(), &inputs.device()),
    }
}
