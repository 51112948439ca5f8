//! L∞ projected gradient descent

use super::{input_gradient, Attack, DEFAULT_EPSILON, DEFAULT_STEP_SIZE, PIXEL_RANGE};
use crate::model::{Classifier, Mode};
use crate::train::Reduction;
use burn::tensor::backend::AutodiffBackend;
use burn::tensor::{Distribution, Int, Tensor};

/// Untargeted L∞ PGD.
///
/// Starting from a uniform random point in the ε-ball (or the clean image),
/// each iteration steps `eps_iter * sign(∇x L)` on the summed cross-entropy,
/// projects back onto the ε-ball and clips to the pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinfPgd {
    pub eps: f32,
    pub eps_iter: f32,
    pub nb_iter: usize,
    pub rand_init: bool,
    pub clip_min: f32,
    pub clip_max: f32,
}

impl LinfPgd {
    pub fn new(eps: f32, eps_iter: f32, nb_iter: usize) -> Self {
        Self {
            eps,
            eps_iter,
            nb_iter,
            rand_init: true,
            clip_min: PIXEL_RANGE.0,
            clip_max: PIXEL_RANGE.1,
        }
    }

    /// ε = 8/255, step 2/255, 20 iterations, random start
    pub fn pgd20() -> Self {
        Self::new(DEFAULT_EPSILON, DEFAULT_STEP_SIZE, 20)
    }

    /// ε = 8/255, step 2/255, 50 iterations, random start
    pub fn pgd50() -> Self {
        Self::new(DEFAULT_EPSILON, DEFAULT_STEP_SIZE, 50)
    }

    pub fn with_rand_init(mut self, rand_init: bool) -> Self {
        self.rand_init = rand_init;
        self
    }

    fn project<B: AutodiffBackend>(&self, x: &Tensor<B, 4>, delta: Tensor<B, 4>) -> Tensor<B, 4> {
        let delta = delta.clamp(-self.eps, self.eps);
        (x.clone() + delta).clamp(self.clip_min, self.clip_max) - x.clone()
    }
}

impl Default for LinfPgd {
    fn default() -> Self {
        Self::pgd20()
    }
}

impl<B: AutodiffBackend> Attack<B> for LinfPgd {
    fn perturb<M: Classifier<B>>(
        &self,
        model: &M,
        images: Tensor<B, 4>,
        labels: Tensor<B, 1, Int>,
    ) -> Tensor<B, 4> {
        let x = images.detach();
        let delta = if self.rand_init {
            Tensor::random(
                x.dims(),
                Distribution::Uniform(-f64::from(self.eps), f64::from(self.eps)),
                &x.device(),
            )
        } else {
            x.zeros_like()
        };
        let mut delta = self.project(&x, delta);

        for _ in 0..self.nb_iter {
            let grad = input_gradient(
                model,
                x.clone() + delta.clone(),
                labels.clone(),
                Mode::Eval,
                Reduction::Sum,
            );
            delta = self.project(&x, delta + grad.sign().mul_scalar(self.eps_iter));
        }

        (x + delta).clamp(self.clip_min, self.clip_max).detach()
    }

    fn name(&self) -> String {
        format!("PGD-{}", self.nb_iter)
    }
}
